/// `RDEF` resource definition chunk
///
/// Only the parts reflection needs are decoded: the constant buffer table
/// (name, size) and the bound resource table (name, type, register, count,
/// space). Variable and type descriptions are skipped.

use crate::container::{read_cstr, read_u32, slice};
use crate::error::DxbcError;

const FOURCC: &[u8; 4] = b"RDEF";
const HEADER_LEN: usize = 28;
/// `RD11` sub-header tag; SM5.1 writes it reversed
const RD11_TAGS: [&[u8; 4]; 2] = [b"RD11", b"11DR"];
/// Tag, header size, cbuffer desc size, then binding desc size
const RD11_BIND_SIZE_OFFSET: usize = HEADER_LEN + 12;
const CBUFFER_ENTRY_LEN: usize = 24;
const BINDING_ENTRY_LEN_SM50: usize = 32;
const BINDING_ENTRY_LEN_SM51: usize = 40;

/// `D3D_SHADER_INPUT_TYPE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderInputType {
    ConstantBuffer,
    TextureBuffer,
    Texture,
    Sampler,
    UavRwTyped,
    Structured,
    UavRwStructured,
    ByteAddress,
    UavRwByteAddress,
    UavAppendStructured,
    UavConsumeStructured,
    UavRwStructuredWithCounter,
    RtAccelerationStructure,
    UavFeedbackTexture,
    Unknown(u32),
}

impl ShaderInputType {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => ShaderInputType::ConstantBuffer,
            1 => ShaderInputType::TextureBuffer,
            2 => ShaderInputType::Texture,
            3 => ShaderInputType::Sampler,
            4 => ShaderInputType::UavRwTyped,
            5 => ShaderInputType::Structured,
            6 => ShaderInputType::UavRwStructured,
            7 => ShaderInputType::ByteAddress,
            8 => ShaderInputType::UavRwByteAddress,
            9 => ShaderInputType::UavAppendStructured,
            10 => ShaderInputType::UavConsumeStructured,
            11 => ShaderInputType::UavRwStructuredWithCounter,
            12 => ShaderInputType::RtAccelerationStructure,
            13 => ShaderInputType::UavFeedbackTexture,
            other => ShaderInputType::Unknown(other),
        }
    }

    /// Any unordered-access view kind
    pub fn is_uav(&self) -> bool {
        matches!(
            self,
            ShaderInputType::UavRwTyped
                | ShaderInputType::UavRwStructured
                | ShaderInputType::UavRwByteAddress
                | ShaderInputType::UavAppendStructured
                | ShaderInputType::UavConsumeStructured
                | ShaderInputType::UavRwStructuredWithCounter
                | ShaderInputType::UavFeedbackTexture
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantBufferDesc {
    pub name: String,
    pub variable_count: u32,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundResourceDesc {
    pub name: String,
    pub input_type: ShaderInputType,
    pub bind_point: u32,
    pub bind_count: u32,
    /// Register space, 0 before shader model 5.1
    pub space: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceDefinitions {
    pub constant_buffers: Vec<ConstantBufferDesc>,
    pub bound_resources: Vec<BoundResourceDesc>,
}

/// Parse an `RDEF` chunk payload
pub fn parse_rdef(data: &[u8]) -> Result<ResourceDefinitions, DxbcError> {
    if data.len() < HEADER_LEN {
        return Err(DxbcError::invalid_chunk(
            FOURCC,
            format!("need {} header bytes, got {}", HEADER_LEN, data.len()),
        ));
    }

    let cb_count = read_u32(data, 0)? as usize;
    let cb_offset = read_u32(data, 4)? as usize;
    let res_count = read_u32(data, 8)? as usize;
    let res_offset = read_u32(data, 12)? as usize;
    let version = read_u32(data, 16)?;
    let binding_len = binding_entry_len(data, version);

    let mut constant_buffers = Vec::with_capacity(cb_count.min(256));
    for i in 0..cb_count {
        let entry = slice(data, entry_offset(cb_offset, i, CBUFFER_ENTRY_LEN)?, CBUFFER_ENTRY_LEN)?;
        constant_buffers.push(ConstantBufferDesc {
            name: read_cstr(data, read_u32(entry, 0)? as usize)?,
            variable_count: read_u32(entry, 4)?,
            size: read_u32(entry, 12)?,
        });
    }

    let mut bound_resources = Vec::with_capacity(res_count.min(256));
    for i in 0..res_count {
        let entry = slice(data, entry_offset(res_offset, i, binding_len)?, binding_len)?;
        let space = if binding_len >= BINDING_ENTRY_LEN_SM51 {
            read_u32(entry, 32)?
        } else {
            0
        };
        bound_resources.push(BoundResourceDesc {
            name: read_cstr(data, read_u32(entry, 0)? as usize)?,
            input_type: ShaderInputType::from_raw(read_u32(entry, 4)?),
            bind_point: read_u32(entry, 20)?,
            bind_count: read_u32(entry, 24)?,
            space,
        });
    }

    Ok(ResourceDefinitions {
        constant_buffers,
        bound_resources,
    })
}

/// Size of one bound resource entry
///
/// Taken from the `RD11` sub-header when present, otherwise from the target
/// version (space/id fields exist from shader model 5.1 on).
fn binding_entry_len(data: &[u8], version: u32) -> usize {
    let minor = (version & 0xFF) as u8;
    let major = ((version >> 8) & 0xFF) as u8;

    let tagged = data
        .get(HEADER_LEN..HEADER_LEN + 4)
        .map_or(false, |tag| RD11_TAGS.iter().any(|t| tag == &t[..]));
    if major >= 5 && tagged {
        if let Ok(len) = read_u32(data, RD11_BIND_SIZE_OFFSET) {
            let len = len as usize;
            if len == BINDING_ENTRY_LEN_SM50 || len == BINDING_ENTRY_LEN_SM51 {
                return len;
            }
        }
    }

    if (major, minor) >= (5, 1) {
        BINDING_ENTRY_LEN_SM51
    } else {
        BINDING_ENTRY_LEN_SM50
    }
}

fn entry_offset(table: usize, index: usize, entry_len: usize) -> Result<usize, DxbcError> {
    index
        .checked_mul(entry_len)
        .and_then(|rel| rel.checked_add(table))
        .ok_or_else(|| DxbcError::invalid_chunk(FOURCC, format!("entry {} offset overflows", index)))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "rdef_tests.rs"]
mod tests;
