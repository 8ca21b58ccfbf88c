//! Error types for the Galaxy3D shader toolchain
//!
//! Every compile and reflect failure is reported as one of these variants.
//! Errors raised by the native backends (process exit codes, SPIR-V parser
//! errors, malformed containers) are converted at the extractor or compiler
//! boundary and never leak past it.

use std::fmt;

/// Result type for shader toolchain operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing, empty or malformed required input
    InvalidArgument,
    /// Requested bytecode family has no extractor or compiler on this host
    UnsupportedPlatform,
    /// Backend rejected the source
    CompilationFailed,
    /// Allocation, marshalling or unexpected backend failure
    InternalError,
}

/// Shader toolchain errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Missing or empty required input (path, entry point, bytecode)
    InvalidArgument(String),

    /// SPIR-V bytecode whose length is not a multiple of 4 bytes
    MisalignedBytecode {
        /// Offending length in bytes
        len: usize,
    },

    /// Family not available on this host
    UnsupportedPlatform(String),

    /// Backend rejected the source (diagnostic text attached)
    CompilationFailed(String),

    /// Internal or backend failure not caused by the input
    InternalError(String),
}

impl Error {
    /// Coarse classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) | Error::MisalignedBytecode { .. } => ErrorKind::InvalidArgument,
            Error::UnsupportedPlatform(_) => ErrorKind::UnsupportedPlatform,
            Error::CompilationFailed(_) => ErrorKind::CompilationFailed,
            Error::InternalError(_) => ErrorKind::InternalError,
        }
    }

    /// Diagnostic text attached to this error
    pub fn diagnostic(&self) -> String {
        match self {
            Error::InvalidArgument(msg)
            | Error::UnsupportedPlatform(msg)
            | Error::CompilationFailed(msg)
            | Error::InternalError(msg) => msg.clone(),
            Error::MisalignedBytecode { len } => {
                format!("shader blob size {} is not aligned to 4 bytes", len)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::MisalignedBytecode { len } => {
                write!(f, "Invalid argument: shader blob size {} is not aligned to 4 bytes", len)
            }
            Error::UnsupportedPlatform(msg) => write!(f, "Unsupported platform: {}", msg),
            Error::CompilationFailed(msg) => write!(f, "Compilation failed: {}", msg),
            Error::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::InternalError(err.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
