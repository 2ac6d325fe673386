//! Transport traits the client is generic over.
//!
//! The client never talks to a node itself. Whatever executes view
//! functions, submits signed transactions or drives a wallet implements
//! one of these traits; the client only validates, encodes and decodes.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::payload::{EntryFunction, ViewRequest, WalletPayload};

/// Default time to wait for a submitted transaction to finalize.
pub const DEFAULT_FINALITY_TIMEOUT: Duration = Duration::from_secs(120);

/// Hash of a submitted transaction, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionHash(pub String);

impl TransactionHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionHash {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TransactionHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// How long to wait for finality, and whether a failed VM status is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOptions {
    pub timeout: Duration,
    pub check_success: bool,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FINALITY_TIMEOUT,
            check_success: true,
        }
    }
}

/// Failures reported by a transport.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Transaction {hash} did not finalize within {}s", timeout.as_secs())]
    Timeout {
        hash: TransactionHash,
        timeout: Duration,
    },

    #[error("Transaction {hash} failed: {vm_status}")]
    Failed {
        hash: TransactionHash,
        vm_status: String,
    },

    #[error("Transport error: {0}")]
    Other(#[source] Box<dyn StdError + Send + Sync>),
}

impl TransportError {
    pub fn other(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        TransportError::Other(err.into())
    }
}

/// Executes read-only view functions.
#[async_trait]
pub trait ViewTransport: Send + Sync {
    /// Run the view request and return one JSON value per declared return slot.
    async fn execute_view(&self, request: &ViewRequest) -> Result<Vec<JsonValue>, TransportError>;
}

/// Signs, submits and waits for entry-function transactions.
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    /// Whatever the transport signs with.
    type Account: Send + Sync;

    /// Submit the call signed by `account` and wait until it is finalized
    /// or `options.timeout` elapses.
    async fn submit_and_wait(
        &self,
        call: &EntryFunction,
        account: &Self::Account,
        options: &SubmitOptions,
    ) -> Result<TransactionHash, TransportError>;
}

/// A wallet that holds its own keys and accepts unsigned payloads.
#[async_trait]
pub trait WalletTransport: Send + Sync {
    async fn sign_and_submit(
        &self,
        payload: &WalletPayload,
        options: &SubmitOptions,
    ) -> Result<TransactionHash, TransportError>;
}
