//! Error types for canonical binary encoding and decoding.

use thiserror::Error;

/// Errors that can occur while encoding a host value or decoding bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Value {value} does not fit in {ty}")]
    OutOfRange { value: String, ty: String },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Malformed numeric literal: '{0}'")]
    MalformedNumericLiteral(String),

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Sequence of {0} elements exceeds the maximum length")]
    SequenceTooLong(u64),

    #[error("Buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("Invalid UTF-8 in string")]
    InvalidUtf8,

    #[error("Invalid bool value: {0}")]
    InvalidBool(u8),

    #[error("Non-canonical ULEB128 length prefix")]
    NonCanonicalUleb128,

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
}

impl CodecError {
    pub(crate) fn mismatch(expected: impl ToString, got: &str) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }
}
