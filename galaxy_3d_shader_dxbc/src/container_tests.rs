use super::*;

use crate::test_utils::build_container as build;

// ============================================================================
// Container parsing tests
// ============================================================================

#[test]
fn test_parse_finds_chunks_in_order() {
    let bytes = build(&[(b"RDEF", &[1, 2, 3, 4]), (b"SHEX", &[5, 6, 7, 8])]);
    let container = DxbcContainer::parse(&bytes).unwrap();

    assert_eq!(container.chunks().len(), 2);
    assert_eq!(container.find(b"SHEX"), Some(&[5u8, 6, 7, 8][..]));
    assert_eq!(container.find(b"DXIL"), None);
}

#[test]
fn test_find_any_respects_preference_order() {
    let bytes = build(&[(b"ISGN", &[0; 8]), (b"ISG1", &[1; 8])]);
    let container = DxbcContainer::parse(&bytes).unwrap();

    let chunk = container.find_any(&[b"ISG1", b"ISGN"]).unwrap();
    assert_eq!(&chunk.fourcc, b"ISG1");
}

#[test]
fn test_parse_empty_container() {
    let bytes = build(&[]);
    let container = DxbcContainer::parse(&bytes).unwrap();
    assert!(container.chunks().is_empty());
}

#[test]
fn test_parse_rejects_bad_magic() {
    let mut bytes = build(&[]);
    bytes[0] = b'X';
    assert!(matches!(DxbcContainer::parse(&bytes), Err(DxbcError::MalformedHeader(_))));
}

#[test]
fn test_parse_rejects_truncated_header() {
    assert!(matches!(DxbcContainer::parse(b"DXBC"), Err(DxbcError::MalformedHeader(_))));
}

#[test]
fn test_parse_rejects_total_size_past_buffer() {
    let mut bytes = build(&[(b"SHDR", &[0; 4])]);
    bytes.truncate(bytes.len() - 2);
    assert!(matches!(DxbcContainer::parse(&bytes), Err(DxbcError::OutOfBounds(_))));
}

#[test]
fn test_parse_rejects_chunk_size_past_end() {
    let mut bytes = build(&[(b"SHDR", &[0; 4])]);
    // chunk size field sits right after the fourcc
    let size_pos = bytes.len() - 8;
    bytes[size_pos..size_pos + 4].copy_from_slice(&64u32.to_le_bytes());
    assert!(matches!(DxbcContainer::parse(&bytes), Err(DxbcError::OutOfBounds(_))));
}

#[test]
fn test_parse_rejects_offset_into_header() {
    let mut bytes = build(&[(b"SHDR", &[0; 4])]);
    bytes[32..36].copy_from_slice(&4u32.to_le_bytes());
    assert!(matches!(DxbcContainer::parse(&bytes), Err(DxbcError::OutOfBounds(_))));
}

// ============================================================================
// Reader tests
// ============================================================================

#[test]
fn test_read_cstr() {
    let bytes = b"abc\0def\0";
    assert_eq!(read_cstr(bytes, 0).unwrap(), "abc");
    assert_eq!(read_cstr(bytes, 4).unwrap(), "def");
    assert!(read_cstr(b"abc", 0).is_err());
    assert!(read_cstr(bytes, 8).is_err());
    assert!(read_cstr(bytes, 9).is_err());
}

#[test]
fn test_read_u32_bounds() {
    let bytes = [1u8, 0, 0, 0, 2];
    assert_eq!(read_u32(&bytes, 0).unwrap(), 1);
    assert!(read_u32(&bytes, 2).is_err());
    assert!(read_u32(&bytes, usize::MAX).is_err());
}
