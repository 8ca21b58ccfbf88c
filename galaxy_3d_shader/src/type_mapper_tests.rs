use super::*;

// ============================================================================
// SPIR-V mapping
// ============================================================================

#[test]
fn test_spirv_float_vectors() {
    assert_eq!(map_spirv_type(ScalarKind::Float32, 1, 1), VertexElementFormat::Float);
    assert_eq!(map_spirv_type(ScalarKind::Float32, 2, 1), VertexElementFormat::Float2);
    assert_eq!(map_spirv_type(ScalarKind::Float32, 3, 1), VertexElementFormat::Float3);
    assert_eq!(map_spirv_type(ScalarKind::Float32, 4, 1), VertexElementFormat::Float4);
}

#[test]
fn test_spirv_integer_vectors() {
    assert_eq!(map_spirv_type(ScalarKind::Int32, 3, 1), VertexElementFormat::Int3);
    assert_eq!(map_spirv_type(ScalarKind::UInt32, 4, 1), VertexElementFormat::UInt4);
}

#[test]
fn test_spirv_matrix_is_invalid() {
    assert_eq!(map_spirv_type(ScalarKind::Float32, 4, 4), VertexElementFormat::Invalid);
    assert_eq!(map_spirv_type(ScalarKind::Float32, 3, 2), VertexElementFormat::Invalid);
}

#[test]
fn test_spirv_unsupported_kind_or_width() {
    assert_eq!(map_spirv_type(ScalarKind::Other, 2, 1), VertexElementFormat::Invalid);
    assert_eq!(map_spirv_type(ScalarKind::Float32, 0, 1), VertexElementFormat::Invalid);
    assert_eq!(map_spirv_type(ScalarKind::Float32, 5, 1), VertexElementFormat::Invalid);
}

// ============================================================================
// D3D mapping
// ============================================================================

#[test]
fn test_component_type_from_raw() {
    assert_eq!(RegisterComponentType::from_raw(0), RegisterComponentType::Unknown);
    assert_eq!(RegisterComponentType::from_raw(1), RegisterComponentType::UInt32);
    assert_eq!(RegisterComponentType::from_raw(2), RegisterComponentType::SInt32);
    assert_eq!(RegisterComponentType::from_raw(3), RegisterComponentType::Float32);
    assert_eq!(RegisterComponentType::from_raw(99), RegisterComponentType::Unknown);
}

#[test]
fn test_d3d_unknown_component_is_invalid() {
    assert_eq!(
        map_d3d_component(RegisterComponentType::Unknown, 4),
        VertexElementFormat::Invalid
    );
}

// ============================================================================
// Cross-family agreement
// ============================================================================

#[test]
fn test_families_agree_on_every_width() {
    let pairs = [
        (ScalarKind::Float32, RegisterComponentType::Float32),
        (ScalarKind::Int32, RegisterComponentType::SInt32),
        (ScalarKind::UInt32, RegisterComponentType::UInt32),
    ];
    for (spirv_kind, d3d_kind) in pairs {
        for width in 1..=4 {
            assert_eq!(
                map_spirv_type(spirv_kind, width, 1),
                map_d3d_component(d3d_kind, width),
                "{:?} x{}",
                spirv_kind,
                width
            );
        }
    }
}

#[test]
fn test_float2_maps_to_float2_for_both_families() {
    assert_eq!(map_spirv_type(ScalarKind::Float32, 2, 1), VertexElementFormat::Float2);
    assert_eq!(
        map_d3d_component(RegisterComponentType::Float32, 2),
        VertexElementFormat::Float2
    );
}

#[test]
fn test_width_four_is_never_invalid() {
    assert!(!map_spirv_type(ScalarKind::Float32, 4, 1).is_invalid());
    assert!(!map_d3d_component(RegisterComponentType::Float32, 4).is_invalid());
    assert!(!map_d3d_component(RegisterComponentType::SInt32, 4).is_invalid());
}
