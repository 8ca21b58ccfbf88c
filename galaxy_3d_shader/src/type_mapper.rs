/// Type mapping from backend-native type descriptors to [`VertexElementFormat`]
///
/// One function per bytecode family. Both share a single canonical table, so
/// a `float3` is `Float3` whichever backend reported it. Anything the table
/// cannot express maps to [`VertexElementFormat::Invalid`] instead of failing.

use crate::format::VertexElementFormat;

/// Base scalar kind of a SPIR-V interface variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Float32,
    Int32,
    UInt32,
    /// Any other scalar (16/64-bit, bool, void)
    Other,
}

/// D3D register component type as stored in signature chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterComponentType {
    Unknown,
    UInt32,
    SInt32,
    Float32,
}

impl RegisterComponentType {
    /// Decode the raw `D3D_REGISTER_COMPONENT_TYPE` value
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => RegisterComponentType::UInt32,
            2 => RegisterComponentType::SInt32,
            3 => RegisterComponentType::Float32,
            _ => RegisterComponentType::Unknown,
        }
    }
}

fn canonical_format(kind: ScalarKind, width: u32) -> VertexElementFormat {
    use VertexElementFormat::*;
    match (kind, width) {
        (ScalarKind::Float32, 1) => Float,
        (ScalarKind::Float32, 2) => Float2,
        (ScalarKind::Float32, 3) => Float3,
        (ScalarKind::Float32, 4) => Float4,
        (ScalarKind::Int32, 1) => Int,
        (ScalarKind::Int32, 2) => Int2,
        (ScalarKind::Int32, 3) => Int3,
        (ScalarKind::Int32, 4) => Int4,
        (ScalarKind::UInt32, 1) => UInt,
        (ScalarKind::UInt32, 2) => UInt2,
        (ScalarKind::UInt32, 3) => UInt3,
        (ScalarKind::UInt32, 4) => UInt4,
        _ => Invalid,
    }
}

/// Map a SPIR-V scalar/vector type
///
/// `columns != 1` means a matrix and is always `Invalid`.
pub fn map_spirv_type(kind: ScalarKind, vector_size: u32, columns: u32) -> VertexElementFormat {
    if columns != 1 {
        return VertexElementFormat::Invalid;
    }
    canonical_format(kind, vector_size)
}

/// Map a D3D signature parameter (component type, populated component count)
pub fn map_d3d_component(component_type: RegisterComponentType, count: u32) -> VertexElementFormat {
    let kind = match component_type {
        RegisterComponentType::Float32 => ScalarKind::Float32,
        RegisterComponentType::SInt32 => ScalarKind::Int32,
        RegisterComponentType::UInt32 => ScalarKind::UInt32,
        RegisterComponentType::Unknown => return VertexElementFormat::Invalid,
    };
    canonical_format(kind, count)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "type_mapper_tests.rs"]
mod tests;
