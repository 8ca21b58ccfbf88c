/// Container builder for unit tests
///
/// Checksum is left zeroed; the reader does not verify it.
pub(crate) fn build_container(chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
    let header_len = 4 + 16 + 4 + 4 + 4 + 4 * chunks.len();
    let mut out = Vec::with_capacity(header_len);
    out.extend_from_slice(b"DXBC");
    out.extend_from_slice(&[0u8; 16]);
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(chunks.len() as u32).to_le_bytes());
    out.resize(header_len, 0);

    for (i, (fourcc, data)) in chunks.iter().enumerate() {
        let offset = out.len() as u32;
        out[32 + i * 4..36 + i * 4].copy_from_slice(&offset.to_le_bytes());
        out.extend_from_slice(*fourcc);
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(data);
    }

    let total = out.len() as u32;
    out[24..28].copy_from_slice(&total.to_le_bytes());
    out
}
