//! Single import for the common path: load an ABI, build or dispatch a
//! call, match on the error kind.
//!
//! ```ignore
//! use move_abi_client::prelude::*;
//!
//! let abi = ModuleAbi::from_file("abis/guid.json")?;
//! let view = build_view(&abi, "creation_num", &[], &[id])?;
//! ```

pub use crate::error::{Error, ErrorKind, Result};

pub use crate::client::{
    AbiClient, CallArgs, CallOutcome, MoveClient, SubmitOptions, SubmitTransport,
    TransactionHash, TransportError, ViewTransport, WalletClient, WalletTransport,
};
pub use crate::decoder::ReturnValue;
pub use crate::dispatch::{CallKind, DispatchTable};
pub use crate::payload::{EntryFunction, EntryPayload, ViewPayload, build_entry, build_view};
pub use crate::schema::ModuleAbi;
pub use crate::schema::guid::guid_abi;
pub use crate::types::{AccountAddress, TypeDescriptor};
pub use crate::value::HostValue;

pub use alloy_primitives::U256;
