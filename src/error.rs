//! Unified error type for the move-abi-client library.
//!
//! Each layer has its own error enum ([`TypeTagError`], [`CodecError`],
//! [`PayloadError`], [`TransportError`], [`ConfigError`]); this module wraps
//! them so callers can use `?` across layers and match on a single flat
//! [`ErrorKind`] when they only care about the category.

use thiserror::Error;

use crate::bcs::CodecError;
use crate::client::TransportError;
use crate::config::ConfigError;
use crate::payload::PayloadError;
use crate::types::TypeTagError;

/// Unified error type for move-abi-client operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    TypeTag(#[from] TypeTagError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Operation {0} submits a transaction and needs an account")]
    MissingAccount(String),

    #[error("Invalid ABI document: {0}")]
    Schema(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Flat error category, independent of the layer that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedTypeTag,
    FunctionNotFound,
    OperationNotFound,
    ArityMismatch,
    GenericArityMismatch,
    TypeMismatch,
    InvalidAddress,
    MalformedNumericLiteral,
    UnsupportedType,
    Transport,
    Timeout,
    MissingAccount,
    Schema,
    Config,
    Io,
    /// Bytes that do not form a valid encoding.
    Malformed,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Payload(e) => payload_kind(e),
            Error::Codec(e) => codec_kind(e),
            Error::TypeTag(e) => type_tag_kind(e),
            Error::Transport(TransportError::Timeout { .. }) => ErrorKind::Timeout,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Config(_) => ErrorKind::Config,
            Error::MissingAccount(_) => ErrorKind::MissingAccount,
            Error::Schema(_) => ErrorKind::Schema,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

fn payload_kind(e: &PayloadError) -> ErrorKind {
    match e {
        PayloadError::FunctionNotFound(_) => ErrorKind::FunctionNotFound,
        PayloadError::OperationNotFound(_) => ErrorKind::OperationNotFound,
        PayloadError::ArityMismatch { .. } => ErrorKind::ArityMismatch,
        PayloadError::GenericArityMismatch { .. } => ErrorKind::GenericArityMismatch,
        PayloadError::TypeTag { source, .. } => type_tag_kind(source),
        PayloadError::ModuleAddress(_) => ErrorKind::InvalidAddress,
        PayloadError::Argument { source, .. } => codec_kind(source),
    }
}

fn type_tag_kind(e: &TypeTagError) -> ErrorKind {
    match e {
        TypeTagError::Malformed { .. } => ErrorKind::MalformedTypeTag,
        TypeTagError::UnboundGeneric { .. } => ErrorKind::GenericArityMismatch,
    }
}

fn codec_kind(e: &CodecError) -> ErrorKind {
    match e {
        CodecError::TypeMismatch { .. } | CodecError::OutOfRange { .. } => ErrorKind::TypeMismatch,
        CodecError::InvalidAddress(_) => ErrorKind::InvalidAddress,
        CodecError::MalformedNumericLiteral(_) => ErrorKind::MalformedNumericLiteral,
        CodecError::UnsupportedType(_) => ErrorKind::UnsupportedType,
        CodecError::SequenceTooLong(_)
        | CodecError::BufferTooSmall { .. }
        | CodecError::InvalidUtf8
        | CodecError::InvalidBool(_)
        | CodecError::NonCanonicalUleb128
        | CodecError::TrailingBytes(_) => ErrorKind::Malformed,
    }
}

/// Result type alias using the unified Error.
pub type Result<T> = std::result::Result<T, Error>;
