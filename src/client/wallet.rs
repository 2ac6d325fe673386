//! Client for wallets that sign on the caller's behalf.

use super::{SubmitOptions, TransactionHash, WalletTransport};
use crate::dispatch::{CallKind, DispatchTable};
use crate::error::Result;
use crate::logging::{info, warn};
use crate::payload::{EntryPayload, PayloadError, build_entry};
use crate::schema::ModuleAbi;
use crate::value::HostValue;

/// Entry-only client over a wallet transport.
#[derive(Debug, Clone)]
pub struct WalletClient<W> {
    wallet: W,
    options: SubmitOptions,
}

impl<W> WalletClient<W> {
    pub fn new(wallet: W) -> Self {
        Self {
            wallet,
            options: SubmitOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SubmitOptions) -> Self {
        self.options = options;
        self
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn use_abi<'a>(&'a self, abi: &'a ModuleAbi) -> WalletAbiClient<'a, W> {
        WalletAbiClient {
            client: self,
            abi,
            table: DispatchTable::new(abi),
        }
    }
}

impl<W: WalletTransport> WalletClient<W> {
    /// Hand the payload to the wallet with stringified arguments.
    pub async fn submit(&self, payload: &EntryPayload) -> Result<TransactionHash> {
        let body = payload.raw.to_wallet_payload()?;
        match self.wallet.sign_and_submit(&body, &self.options).await {
            Ok(hash) => {
                info!(function = %body.function, hash = %hash, "transaction finalized");
                Ok(hash)
            }
            Err(err) => {
                warn!(function = %body.function, error = %err, "wallet submission failed");
                Err(err.into())
            }
        }
    }
}

/// A wallet client bound to one module ABI. View operations are not
/// available through a wallet.
pub struct WalletAbiClient<'a, W> {
    client: &'a WalletClient<W>,
    abi: &'a ModuleAbi,
    table: DispatchTable,
}

impl<W: WalletTransport> WalletAbiClient<'_, W> {
    pub async fn invoke(
        &self,
        operation: &str,
        type_arguments: &[String],
        arguments: &[HostValue],
    ) -> Result<TransactionHash> {
        let op = self.table.resolve(operation)?;
        if op.kind != CallKind::Entry {
            return Err(PayloadError::OperationNotFound(operation.to_string()).into());
        }
        let payload = build_entry(self.abi, &op.function, type_arguments, arguments)?;
        self.client.submit(&payload).await
    }
}
