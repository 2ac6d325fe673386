//! Error types for type tag parsing.

use thiserror::Error;

/// Errors produced while parsing or instantiating a type tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeTagError {
    #[error("Malformed type tag '{tag}': {reason}")]
    Malformed { tag: String, reason: String },

    #[error("Generic type parameter T{index} is unbound: {available} type arguments supplied")]
    UnboundGeneric { index: u16, available: usize },
}

impl TypeTagError {
    pub(crate) fn malformed(tag: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            tag: tag.to_string(),
            reason: reason.into(),
        }
    }
}
