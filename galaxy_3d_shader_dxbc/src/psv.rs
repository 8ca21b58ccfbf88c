/// `PSV0` pipeline state validation part
///
/// DXC writes this part into every SM6 container, reflection-stripped or
/// not. Only the resource binding table is decoded: a u32 runtime info size,
/// the runtime info, a u32 resource count and, when non-zero, a u32 record
/// size followed by the records. Each record starts with type, space, lower
/// bound and upper bound; newer versions append kind and flags, which the
/// declared record size lets us skip. Names are not stored in this part.

use crate::container::{read_u32, slice};
use crate::error::DxbcError;

const FOURCC: &[u8; 4] = b"PSV0";
const MIN_RECORD_LEN: usize = 16;
const UNBOUNDED: u32 = u32::MAX;

/// `PSVResourceType`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PsvResourceType {
    Invalid,
    Sampler,
    Cbv,
    SrvTyped,
    SrvRaw,
    SrvStructured,
    UavTyped,
    UavRaw,
    UavStructured,
    UavStructuredWithCounter,
    Unknown(u32),
}

impl PsvResourceType {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => PsvResourceType::Invalid,
            1 => PsvResourceType::Sampler,
            2 => PsvResourceType::Cbv,
            3 => PsvResourceType::SrvTyped,
            4 => PsvResourceType::SrvRaw,
            5 => PsvResourceType::SrvStructured,
            6 => PsvResourceType::UavTyped,
            7 => PsvResourceType::UavRaw,
            8 => PsvResourceType::UavStructured,
            9 => PsvResourceType::UavStructuredWithCounter,
            other => PsvResourceType::Unknown(other),
        }
    }

    pub fn is_uav(&self) -> bool {
        matches!(
            self,
            PsvResourceType::UavTyped
                | PsvResourceType::UavRaw
                | PsvResourceType::UavStructured
                | PsvResourceType::UavStructuredWithCounter
        )
    }
}

/// One register range of the binding table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PsvResourceBinding {
    pub res_type: PsvResourceType,
    pub space: u32,
    pub lower_bound: u32,
    /// Inclusive; `u32::MAX` for unbounded arrays
    pub upper_bound: u32,
}

impl PsvResourceBinding {
    /// Registers covered by the range, 0 when unbounded or inverted
    pub fn bind_count(&self) -> u32 {
        if self.upper_bound == UNBOUNDED || self.upper_bound < self.lower_bound {
            return 0;
        }
        self.upper_bound - self.lower_bound + 1
    }
}

/// Parse the resource binding table of a `PSV0` payload
pub fn parse_psv_bindings(data: &[u8]) -> Result<Vec<PsvResourceBinding>, DxbcError> {
    let info_len = read_u32(data, 0)? as usize;
    let count_offset = info_len
        .checked_add(4)
        .ok_or_else(|| DxbcError::invalid_chunk(FOURCC, format!("runtime info size {} overflows", info_len)))?;
    let count = read_u32(data, count_offset)? as usize;
    if count == 0 {
        return Ok(Vec::new());
    }

    let record_len = read_u32(data, count_offset + 4)? as usize;
    if record_len < MIN_RECORD_LEN {
        return Err(DxbcError::invalid_chunk(
            FOURCC,
            format!("resource record size {} below {}", record_len, MIN_RECORD_LEN),
        ));
    }
    let table_offset = count_offset + 8;
    let table_len = count
        .checked_mul(record_len)
        .ok_or_else(|| DxbcError::invalid_chunk(FOURCC, format!("{} resource records overflow", count)))?;
    let table = slice(data, table_offset, table_len)?;

    table
        .chunks_exact(record_len)
        .map(|record| {
            Ok(PsvResourceBinding {
                res_type: PsvResourceType::from_raw(read_u32(record, 0)?),
                space: read_u32(record, 4)?,
                lower_bound: read_u32(record, 8)?,
                upper_bound: read_u32(record, 12)?,
            })
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "psv_tests.rs"]
mod tests;
