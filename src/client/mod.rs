//! Async clients over pluggable transports.
//!
//! [`MoveClient`] runs validated payloads through a transport: views come
//! back decoded, entry calls come back as the hash of a finalized
//! transaction. [`MoveClient::use_abi`] binds a client to one module ABI
//! and dispatches by generated operation name.
//!
//! # Example
//!
//! ```rust,ignore
//! let client = MoveClient::new(node);
//! let guid = client.use_abi(&abi);
//!
//! let out = guid
//!     .invoke("viewCreationNum", CallArgs::new().arg(id))
//!     .await?;
//! ```

mod transport;
mod wallet;

pub use transport::{
    DEFAULT_FINALITY_TIMEOUT, SubmitOptions, SubmitTransport, TransactionHash, TransportError,
    ViewTransport, WalletTransport,
};
pub use wallet::{WalletAbiClient, WalletClient};

use crate::decoder::{ReturnValue, apply_decoders};
use crate::dispatch::{CallKind, DispatchTable};
use crate::error::{Error, Result};
use crate::logging::{debug, info, warn};
use crate::payload::{EntryPayload, ViewPayload, build_entry, build_view};
use crate::schema::ModuleAbi;
use crate::value::HostValue;

/// Client over a node transport.
#[derive(Debug, Clone)]
pub struct MoveClient<T> {
    transport: T,
    options: SubmitOptions,
}

impl<T> MoveClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            options: SubmitOptions::default(),
        }
    }

    /// Replace the finality options used for every entry call.
    pub fn with_options(mut self, options: SubmitOptions) -> Self {
        self.options = options;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn options(&self) -> &SubmitOptions {
        &self.options
    }

    /// Bind this client to a module ABI.
    pub fn use_abi<'a>(&'a self, abi: &'a ModuleAbi) -> AbiClient<'a, T> {
        AbiClient {
            client: self,
            abi,
            table: DispatchTable::new(abi),
        }
    }
}

impl<T: ViewTransport> MoveClient<T> {
    /// Execute a view payload and decode its result slots.
    pub async fn view(&self, payload: &ViewPayload) -> Result<Vec<ReturnValue>> {
        let raw = match self.transport.execute_view(&payload.request).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(function = %payload.request.function, error = %err, "view failed");
                return Err(err.into());
            }
        };
        debug!(function = %payload.request.function, slots = raw.len(), "view executed");
        Ok(apply_decoders(&payload.decoders, raw)?)
    }
}

impl<T: SubmitTransport> MoveClient<T> {
    /// Submit an entry payload signed by `account` and wait for finality.
    pub async fn submit(&self, payload: &EntryPayload, account: &T::Account) -> Result<TransactionHash> {
        info!(
            function = %payload.raw.function,
            args = payload.entry_function.args.len(),
            "submitting entry function"
        );
        let submitted = self
            .transport
            .submit_and_wait(&payload.entry_function, account, &self.options)
            .await;
        match submitted {
            Ok(hash) => {
                info!(function = %payload.raw.function, hash = %hash, "transaction finalized");
                Ok(hash)
            }
            Err(err) => {
                warn!(function = %payload.raw.function, error = %err, "submission failed");
                Err(err.into())
            }
        }
    }
}

/// Arguments for a dispatched call.
pub struct CallArgs<'a, A> {
    pub type_arguments: Vec<String>,
    pub arguments: Vec<HostValue>,
    /// Signing account, required by entry operations.
    pub account: Option<&'a A>,
}

impl<A> Default for CallArgs<'_, A> {
    fn default() -> Self {
        Self {
            type_arguments: Vec::new(),
            arguments: Vec::new(),
            account: None,
        }
    }
}

impl<'a, A> CallArgs<'a, A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_arg(mut self, tag: impl Into<String>) -> Self {
        self.type_arguments.push(tag.into());
        self
    }

    pub fn arg(mut self, value: impl Into<HostValue>) -> Self {
        self.arguments.push(value.into());
        self
    }

    pub fn args<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<HostValue>,
    {
        self.arguments.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn signed_by(mut self, account: &'a A) -> Self {
        self.account = Some(account);
        self
    }
}

/// What a dispatched call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    View(Vec<ReturnValue>),
    Submitted(TransactionHash),
}

impl CallOutcome {
    pub fn into_view(self) -> Option<Vec<ReturnValue>> {
        match self {
            CallOutcome::View(values) => Some(values),
            CallOutcome::Submitted(_) => None,
        }
    }

    pub fn into_hash(self) -> Option<TransactionHash> {
        match self {
            CallOutcome::Submitted(hash) => Some(hash),
            CallOutcome::View(_) => None,
        }
    }
}

/// A client bound to one module ABI.
pub struct AbiClient<'a, T> {
    client: &'a MoveClient<T>,
    abi: &'a ModuleAbi,
    table: DispatchTable,
}

impl<T> AbiClient<'_, T> {
    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    pub fn abi(&self) -> &ModuleAbi {
        self.abi
    }
}

impl<T: ViewTransport + SubmitTransport> AbiClient<'_, T> {
    /// Dispatch `operation` (`viewCreationNum`, `entryCreate`, ...).
    pub async fn invoke(&self, operation: &str, args: CallArgs<'_, T::Account>) -> Result<CallOutcome> {
        let op = self.table.resolve(operation)?;
        match op.kind {
            CallKind::View => {
                let payload = build_view(self.abi, &op.function, &args.type_arguments, &args.arguments)?;
                Ok(CallOutcome::View(self.client.view(&payload).await?))
            }
            CallKind::Entry => {
                let account = args
                    .account
                    .ok_or_else(|| Error::MissingAccount(operation.to_string()))?;
                let payload =
                    build_entry(self.abi, &op.function, &args.type_arguments, &args.arguments)?;
                Ok(CallOutcome::Submitted(self.client.submit(&payload, account).await?))
            }
        }
    }
}
