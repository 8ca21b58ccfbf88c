use super::*;

fn push_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// Minimal RDEF: header, cbuffer table, binding table, string pool
fn build_rdef(
    version: u32,
    cbuffers: &[(&str, u32)],
    bindings: &[(&str, u32, u32, u32, u32)],
    entry_len: usize,
) -> Vec<u8> {
    let cb_offset = HEADER_LEN;
    let res_offset = cb_offset + cbuffers.len() * CBUFFER_ENTRY_LEN;
    let strings_offset = res_offset + bindings.len() * entry_len;

    let mut strings = Vec::new();
    let mut name_offset = |name: &str| {
        let offset = (strings_offset + strings.len()) as u32;
        strings.extend_from_slice(name.as_bytes());
        strings.push(0);
        offset
    };
    let cb_names: Vec<u32> = cbuffers.iter().map(|(name, _)| name_offset(*name)).collect();
    let res_names: Vec<u32> = bindings.iter().map(|(name, ..)| name_offset(*name)).collect();

    let mut out = Vec::new();
    push_u32(&mut out, cbuffers.len() as u32);
    push_u32(&mut out, cb_offset as u32);
    push_u32(&mut out, bindings.len() as u32);
    push_u32(&mut out, res_offset as u32);
    push_u32(&mut out, version);
    push_u32(&mut out, 0);
    push_u32(&mut out, 0);

    for ((_, size), name) in cbuffers.iter().zip(&cb_names) {
        push_u32(&mut out, *name);
        push_u32(&mut out, 1);
        push_u32(&mut out, 0);
        push_u32(&mut out, *size);
        push_u32(&mut out, 0);
        push_u32(&mut out, 0);
    }
    for ((_, ty, bind, count, space), name) in bindings.iter().zip(&res_names) {
        push_u32(&mut out, *name);
        push_u32(&mut out, *ty);
        push_u32(&mut out, 0);
        push_u32(&mut out, 0);
        push_u32(&mut out, 0);
        push_u32(&mut out, *bind);
        push_u32(&mut out, *count);
        push_u32(&mut out, 0);
        if entry_len == BINDING_ENTRY_LEN_SM51 {
            push_u32(&mut out, *space);
            push_u32(&mut out, 0);
        }
    }
    out.extend_from_slice(&strings);
    out
}

const SM_4_0: u32 = 0xFFFE_0400;
const SM_5_1: u32 = 0xFFFE_0501;

// ============================================================================
// Input type tests
// ============================================================================

#[test]
fn test_input_type_from_raw() {
    assert_eq!(ShaderInputType::from_raw(0), ShaderInputType::ConstantBuffer);
    assert_eq!(ShaderInputType::from_raw(2), ShaderInputType::Texture);
    assert_eq!(ShaderInputType::from_raw(3), ShaderInputType::Sampler);
    assert_eq!(ShaderInputType::from_raw(11), ShaderInputType::UavRwStructuredWithCounter);
    assert_eq!(ShaderInputType::from_raw(99), ShaderInputType::Unknown(99));
}

#[test]
fn test_uav_kinds() {
    let uavs: Vec<u32> = (0..16).filter(|raw| ShaderInputType::from_raw(*raw).is_uav()).collect();
    assert_eq!(uavs, vec![4, 6, 8, 9, 10, 11, 13]);
}

// ============================================================================
// Parsing tests
// ============================================================================

#[test]
fn test_parse_sm40_bindings() {
    let data = build_rdef(
        SM_4_0,
        &[("PerFrame", 64)],
        &[("PerFrame", 0, 0, 1, 0), ("albedo", 2, 3, 1, 0), ("linear", 3, 1, 1, 0)],
        BINDING_ENTRY_LEN_SM50,
    );
    let rdef = parse_rdef(&data).unwrap();

    assert_eq!(
        rdef.constant_buffers,
        vec![ConstantBufferDesc { name: "PerFrame".to_string(), variable_count: 1, size: 64 }]
    );
    assert_eq!(rdef.bound_resources.len(), 3);
    assert_eq!(rdef.bound_resources[1].name, "albedo");
    assert_eq!(rdef.bound_resources[1].input_type, ShaderInputType::Texture);
    assert_eq!(rdef.bound_resources[1].bind_point, 3);
    assert_eq!(rdef.bound_resources[2].input_type, ShaderInputType::Sampler);
    assert!(rdef.bound_resources.iter().all(|r| r.space == 0));
}

#[test]
fn test_parse_sm51_reads_space() {
    let data = build_rdef(
        SM_5_1,
        &[],
        &[("textures", 2, 0, 16, 2), ("output", 4, 1, 1, 0)],
        BINDING_ENTRY_LEN_SM51,
    );
    let rdef = parse_rdef(&data).unwrap();

    assert_eq!(rdef.bound_resources[0].space, 2);
    assert_eq!(rdef.bound_resources[0].bind_count, 16);
    assert_eq!(rdef.bound_resources[1].input_type, ShaderInputType::UavRwTyped);
    assert_eq!(rdef.bound_resources[1].bind_point, 1);
}

#[test]
fn test_binding_entry_len_from_version() {
    assert_eq!(binding_entry_len(&[0; HEADER_LEN], SM_4_0), BINDING_ENTRY_LEN_SM50);
    assert_eq!(binding_entry_len(&[0; HEADER_LEN], 0xFFFF_0500), BINDING_ENTRY_LEN_SM50);
    assert_eq!(binding_entry_len(&[0; HEADER_LEN], SM_5_1), BINDING_ENTRY_LEN_SM51);
    assert_eq!(binding_entry_len(&[0; HEADER_LEN], 0xFFFE_0600), BINDING_ENTRY_LEN_SM51);
}

/// `RDEF` header followed by an `RD11` sub-header announcing `binding_len`
fn rd11_prefix(tag: &[u8; 4], binding_len: u32) -> Vec<u8> {
    let mut data = vec![0u8; HEADER_LEN];
    data.extend_from_slice(tag);
    // header, cbuffer, binding, variable, type, member desc sizes, interface slots
    for size in [60u32, 24, binding_len, 40, 36, 12, 0] {
        push_u32(&mut data, size);
    }
    data
}

#[test]
fn test_binding_entry_len_prefers_rd11_header() {
    // Declared 5.0 but the sub-header announces 40-byte bindings
    let data = rd11_prefix(b"RD11", 40);
    assert_eq!(binding_entry_len(&data, 0xFFFF_0500), BINDING_ENTRY_LEN_SM51);

    // Declared 5.1 but the sub-header announces 32-byte bindings
    let data = rd11_prefix(b"RD11", 32);
    assert_eq!(binding_entry_len(&data, SM_5_1), BINDING_ENTRY_LEN_SM50);
}

#[test]
fn test_binding_entry_len_accepts_reversed_rd11_tag() {
    let data = rd11_prefix(b"11DR", 40);
    assert_eq!(binding_entry_len(&data, 0xFFFF_0500), BINDING_ENTRY_LEN_SM51);
}

#[test]
fn test_binding_entry_len_ignores_unknown_rd11_size() {
    let data = rd11_prefix(b"RD11", 12);
    assert_eq!(binding_entry_len(&data, 0xFFFF_0500), BINDING_ENTRY_LEN_SM50);
}

#[test]
fn test_parse_empty_tables() {
    let data = build_rdef(SM_4_0, &[], &[], BINDING_ENTRY_LEN_SM50);
    assert_eq!(parse_rdef(&data).unwrap(), ResourceDefinitions::default());
}

#[test]
fn test_parse_rejects_truncated_header() {
    assert!(matches!(parse_rdef(&[0u8; 12]), Err(DxbcError::InvalidChunk { .. })));
}

#[test]
fn test_parse_rejects_table_past_end() {
    let mut data = build_rdef(SM_4_0, &[], &[("tex", 2, 0, 1, 0)], BINDING_ENTRY_LEN_SM50);
    data.truncate(HEADER_LEN + 16);
    assert!(parse_rdef(&data).is_err());
}

#[test]
fn test_parse_rejects_bad_name_offset() {
    let mut data = build_rdef(SM_4_0, &[], &[("tex", 2, 0, 1, 0)], BINDING_ENTRY_LEN_SM50);
    data[HEADER_LEN..HEADER_LEN + 4].copy_from_slice(&0xFFFFu32.to_le_bytes());
    assert!(matches!(parse_rdef(&data), Err(DxbcError::OutOfBounds(_))));
}
