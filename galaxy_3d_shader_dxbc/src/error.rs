/// Container parse errors
///
/// Local to this crate; the reflector converts them to the toolchain
/// `Error` before returning.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DxbcError {
    /// Container header is missing, truncated or has the wrong magic
    MalformedHeader(String),

    /// An offset or size points outside the data it indexes
    OutOfBounds(String),

    /// A chunk payload does not follow its layout
    InvalidChunk {
        fourcc: [u8; 4],
        reason: String,
    },

    /// The container holds neither a `DXIL` nor a `SHDR`/`SHEX` program
    MissingProgram,
}

impl DxbcError {
    pub(crate) fn invalid_chunk(fourcc: &[u8; 4], reason: impl Into<String>) -> Self {
        DxbcError::InvalidChunk {
            fourcc: *fourcc,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DxbcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DxbcError::MalformedHeader(msg) => write!(f, "malformed DXBC header: {}", msg),
            DxbcError::OutOfBounds(msg) => write!(f, "out of bounds: {}", msg),
            DxbcError::InvalidChunk { fourcc, reason } => {
                write!(f, "invalid {} chunk: {}", String::from_utf8_lossy(fourcc), reason)
            }
            DxbcError::MissingProgram => write!(f, "container has no DXIL, SHDR or SHEX program"),
        }
    }
}

impl std::error::Error for DxbcError {}
