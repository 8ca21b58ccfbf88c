/// Input / output signature chunks (`ISGN`, `OSGN`, `ISG1`, `OSG1`)
///
/// Header: parameter count, table offset. `*SGN` entries are 24 bytes,
/// `*SG1` entries are 32 (a leading stream index and a trailing min precision).
/// The layout implied by the fourcc is tried first, the other one second.

use crate::container::{read_cstr, read_u32, read_u8, slice};
use crate::error::DxbcError;

const HEADER_LEN: usize = 8;
const ENTRY_LEN_V0: usize = 24;
const ENTRY_LEN_V1: usize = 32;

bitflags::bitflags! {
    /// Register components a parameter occupies
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ComponentMask: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const Z = 1 << 2;
        const W = 1 << 3;
    }
}

impl ComponentMask {
    /// Number of components set
    pub fn component_count(&self) -> u32 {
        self.bits().count_ones()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParameter {
    pub semantic_name: String,
    pub semantic_index: u32,
    /// `D3D_NAME` system value, 0 for user semantics
    pub system_value: u32,
    /// Raw `D3D_REGISTER_COMPONENT_TYPE`
    pub component_type: u32,
    pub register: u32,
    pub mask: ComponentMask,
}

impl SignatureParameter {
    /// Semantic name with the index appended when nonzero (`TEXCOORD1`)
    pub fn display_name(&self) -> String {
        if self.semantic_index > 0 {
            format!("{}{}", self.semantic_name, self.semantic_index)
        } else {
            self.semantic_name.clone()
        }
    }
}

/// Parse a signature chunk payload tagged `fourcc`
pub fn parse_signature(fourcc: &[u8; 4], data: &[u8]) -> Result<Vec<SignatureParameter>, DxbcError> {
    if data.len() < HEADER_LEN {
        return Err(DxbcError::invalid_chunk(
            fourcc,
            format!("need {} header bytes, got {}", HEADER_LEN, data.len()),
        ));
    }

    let count = read_u32(data, 0)? as usize;
    let table = read_u32(data, 4)? as usize;
    if count == 0 {
        return Ok(Vec::new());
    }

    let (primary, fallback) = if fourcc[3] == b'1' {
        (ENTRY_LEN_V1, ENTRY_LEN_V0)
    } else {
        (ENTRY_LEN_V0, ENTRY_LEN_V1)
    };

    parse_entries(data, count, table, primary)
        .or_else(|primary_err| parse_entries(data, count, table, fallback).map_err(|_| primary_err))
        .map_err(|err| match err {
            DxbcError::OutOfBounds(reason) => DxbcError::invalid_chunk(fourcc, reason),
            other => other,
        })
}

fn parse_entries(
    data: &[u8],
    count: usize,
    table: usize,
    entry_len: usize,
) -> Result<Vec<SignatureParameter>, DxbcError> {
    let table_len = count
        .checked_mul(entry_len)
        .ok_or_else(|| DxbcError::OutOfBounds(format!("{} parameters overflow", count)))?;
    let table = slice(data, table, table_len)?;
    // v1 entries carry the stream index first
    let base = if entry_len == ENTRY_LEN_V1 { 4 } else { 0 };

    table
        .chunks_exact(entry_len)
        .map(|entry| {
            Ok(SignatureParameter {
                semantic_name: read_cstr(data, read_u32(entry, base)? as usize)?,
                semantic_index: read_u32(entry, base + 4)?,
                system_value: read_u32(entry, base + 8)?,
                component_type: read_u32(entry, base + 12)?,
                register: read_u32(entry, base + 16)?,
                mask: ComponentMask::from_bits_truncate(read_u8(entry, base + 20)?),
            })
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
