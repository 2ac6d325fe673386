//! ABI-driven call construction for Move modules.
//!
//! Given a module's ABI (its exposed function signatures), this library
//! validates calls, encodes entry-function arguments to their canonical
//! binary form, formats view requests, decodes wide-integer view results
//! and dispatches calls by generated operation name.
//!
//! # Quick Start
//!
//! ```ignore
//! use move_abi_client::prelude::*;
//!
//! let abi = guid_abi()?;
//!
//! // Encoded, ready for a signing transport
//! let payload = build_entry(&abi, "create_id", &[], &["0x1".into(), 42u64.into()])?;
//! let bytes = payload.entry_function.to_bytes()?;
//!
//! // Or dispatched through a client
//! let client = MoveClient::new(node);
//! let out = client
//!     .use_abi(&abi)
//!     .invoke("viewCreationNum", CallArgs::new().arg(id))
//!     .await?;
//! ```
//!
//! # Modules
//!
//! - [`schema`] - ABI documents and the bundled GUID module ABI
//! - [`types`] - Type tag parsing and account addresses
//! - [`bcs`] - Canonical binary encoding and decoding
//! - [`payload`] - View and entry payload construction
//! - [`decoder`] - View result decoding
//! - [`dispatch`] - Operation names and the dispatch table
//! - [`client`] - Async clients over pluggable transports
//! - [`config`] - TOML client configuration
//!
//! # Feature Flags
//!
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the `move-abi` command-line binary
//! - `full` - Enable all features

pub mod bcs;
pub mod client;
pub mod config;
pub mod decoder;
pub mod dispatch;
mod error;
mod logging;
pub mod payload;
pub mod prelude;
pub mod schema;
#[cfg(feature = "cli")]
pub mod subscriber;
pub mod types;
pub mod value;

// Re-export the unified error type
pub use error::{Error, ErrorKind, Result};

pub use bcs::CodecError;
pub use client::{
    AbiClient, CallArgs, CallOutcome, MoveClient, SubmitOptions, SubmitTransport,
    TransactionHash, TransportError, ViewTransport, WalletClient, WalletTransport,
};
pub use config::{ClientConfig, ConfigError};
pub use decoder::{ReturnDecoder, ReturnValue};
pub use dispatch::{CallKind, DispatchTable, Operation};
pub use payload::{
    EntryFunction, EntryPayload, PayloadError, RawEntryPayload, ViewPayload, ViewRequest,
    WalletPayload, build_entry, build_view,
};
pub use schema::{FunctionSignature, ModuleAbi};
pub use types::{AccountAddress, PrimitiveKind, StructTag, TypeDescriptor, TypeTagError};
pub use value::HostValue;

// Integer type used for u64/u128/u256 values
pub use alloy_primitives::U256;
