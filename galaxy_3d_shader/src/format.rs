/// Vertex element formats shared by every reflection backend

/// Format of one vertex attribute or stage-IO value
///
/// `Invalid` is the sentinel returned by the type mapper for anything it
/// cannot express (matrices, 64-bit scalars, booleans, widths above 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertexElementFormat {
    #[default]
    Invalid,

    // 32-bit signed integers
    Int,
    Int2,
    Int3,
    Int4,

    // 32-bit unsigned integers
    UInt,
    UInt2,
    UInt3,
    UInt4,

    // 32-bit floats
    Float,
    Float2,
    Float3,
    Float4,

    // 8-bit
    Byte2,
    Byte4,
    UByte2,
    UByte4,
    Byte2Norm,
    Byte4Norm,
    UByte2Norm,
    UByte4Norm,

    // 16-bit
    Short2,
    Short4,
    UShort2,
    UShort4,
    Short2Norm,
    Short4Norm,
    UShort2Norm,
    UShort4Norm,
    Half2,
    Half4,
}

impl VertexElementFormat {
    /// Whether this is the unsupported sentinel
    pub fn is_invalid(&self) -> bool {
        *self == VertexElementFormat::Invalid
    }

    /// Number of components (0 for `Invalid`)
    pub fn component_count(&self) -> u32 {
        use VertexElementFormat::*;
        match self {
            Invalid => 0,
            Int | UInt | Float => 1,
            Int2 | UInt2 | Float2 | Byte2 | UByte2 | Byte2Norm | UByte2Norm | Short2
            | UShort2 | Short2Norm | UShort2Norm | Half2 => 2,
            Int3 | UInt3 | Float3 => 3,
            Int4 | UInt4 | Float4 | Byte4 | UByte4 | Byte4Norm | UByte4Norm | Short4
            | UShort4 | Short4Norm | UShort4Norm | Half4 => 4,
        }
    }

    /// Size in bytes of one element of this format (0 for `Invalid`)
    pub fn byte_size(&self) -> u32 {
        use VertexElementFormat::*;
        let component_size = match self {
            Invalid => 0,
            Int | Int2 | Int3 | Int4 | UInt | UInt2 | UInt3 | UInt4 | Float | Float2
            | Float3 | Float4 => 4,
            Byte2 | Byte4 | UByte2 | UByte4 | Byte2Norm | Byte4Norm | UByte2Norm
            | UByte4Norm => 1,
            Short2 | Short4 | UShort2 | UShort4 | Short2Norm | Short4Norm | UShort2Norm
            | UShort4Norm | Half2 | Half4 => 2,
        };
        component_size * self.component_count()
    }
}
