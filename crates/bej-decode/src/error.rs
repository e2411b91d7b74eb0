//! Decode error type.
//!
//! One flat `thiserror`-derived enum, no nested causes beyond the wrapped
//! I/O error.

use thiserror::Error;

/// Everything that can make a `decode` call fail.
///
/// All variants are fatal to the call that produced them. Container-length mismatches and unknown
/// format codes are *not* represented here — they are warnings routed
/// through [`crate::diagnostics::Diagnostics`], not errors.
#[derive(Debug, Error)]
pub enum BejError {
    #[error("truncated input at offset {offset}")]
    Truncated { offset: usize },

    #[error("malformed dictionary: {reason}")]
    MalformedDictionary { reason: &'static str },

    #[error("malformed value at offset {offset}: {reason}")]
    MalformedValue { offset: usize, reason: &'static str },

    #[error("unsupported BEJ version")]
    UnsupportedVersion,

    #[error("unsupported schema class 0x{0:02x}")]
    UnsupportedSchemaClass(u8),

    #[error("nesting too deep (max 16)")]
    NestingTooDeep,

    #[error("output sink failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type BejResult<T> = Result<T, BejError>;
