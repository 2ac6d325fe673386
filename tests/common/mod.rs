//! Common test utilities and fixtures.
//!
//! Sample ABIs plus mock transports that record every request they see.

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use move_abi_client::client::{
    SubmitOptions, SubmitTransport, TransactionHash, TransportError, ViewTransport,
    WalletTransport,
};
use move_abi_client::payload::{EntryFunction, ViewRequest, WalletPayload};
use move_abi_client::schema::ModuleAbi;

// =============================================================================
// ABI Fixtures
// =============================================================================

/// A generic coin module: one signer-taking entry function, one view.
pub const COIN_ABI: &str = r#"{
    "address": "0x1",
    "name": "coin",
    "friends": [],
    "exposed_functions": [
        {
            "name": "transfer",
            "visibility": "public",
            "is_entry": true,
            "is_view": false,
            "generic_type_params": [{ "constraints": [] }],
            "params": ["&signer", "address", "u64"],
            "return": []
        },
        {
            "name": "balance",
            "visibility": "public",
            "is_entry": false,
            "is_view": true,
            "generic_type_params": [{ "constraints": [] }],
            "params": ["address"],
            "return": ["u64"]
        },
        {
            "name": "supply",
            "visibility": "public",
            "is_entry": false,
            "is_view": true,
            "generic_type_params": [{ "constraints": [] }],
            "params": [],
            "return": ["u128", "bool"]
        }
    ],
    "structs": []
}"#;

/// Every primitive once, plus a nested vector.
pub const KITCHEN_SINK_ABI: &str = r#"{
    "address": "0xcafe",
    "name": "sink",
    "exposed_functions": [
        {
            "name": "everything",
            "visibility": "public",
            "is_entry": true,
            "is_view": false,
            "generic_type_params": [],
            "params": [
                "signer", "bool", "u8", "u16", "u32", "u64", "u128", "u256",
                "address", "0x1::string::String", "vector<u8>", "vector<vector<u64>>"
            ],
            "return": []
        }
    ]
}"#;

pub fn coin_abi() -> ModuleAbi {
    ModuleAbi::from_json(COIN_ABI).unwrap()
}

pub fn kitchen_sink_abi() -> ModuleAbi {
    ModuleAbi::from_json(KITCHEN_SINK_ABI).unwrap()
}

pub const APTOS_COIN: &str = "0x1::aptos_coin::AptosCoin";

pub fn aptos_coin() -> Vec<String> {
    vec![APTOS_COIN.to_string()]
}

// =============================================================================
// Mock Transports
// =============================================================================

/// Hash every mock submission reports.
pub const MOCK_HASH: &str = "0xfeed";

/// Signing identity used by [`MockNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestAccount(pub String);

/// A node that answers views with a canned result and records submissions.
#[derive(Default)]
pub struct MockNode {
    pub view_result: Vec<JsonValue>,
    /// Report a finality timeout for every submission.
    pub time_out: bool,
    pub views: Mutex<Vec<ViewRequest>>,
    pub submissions: Mutex<Vec<(EntryFunction, TestAccount, SubmitOptions)>>,
}

impl MockNode {
    pub fn answering(view_result: Vec<JsonValue>) -> Self {
        Self {
            view_result,
            ..Self::default()
        }
    }

    pub fn timing_out() -> Self {
        Self {
            time_out: true,
            ..Self::default()
        }
    }

    pub fn view_count(&self) -> usize {
        self.views.lock().unwrap().len()
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

#[async_trait]
impl ViewTransport for MockNode {
    async fn execute_view(&self, request: &ViewRequest) -> Result<Vec<JsonValue>, TransportError> {
        self.views.lock().unwrap().push(request.clone());
        Ok(self.view_result.clone())
    }
}

#[async_trait]
impl SubmitTransport for MockNode {
    type Account = TestAccount;

    async fn submit_and_wait(
        &self,
        call: &EntryFunction,
        account: &TestAccount,
        options: &SubmitOptions,
    ) -> Result<TransactionHash, TransportError> {
        self.submissions
            .lock()
            .unwrap()
            .push((call.clone(), account.clone(), *options));
        if self.time_out {
            return Err(TransportError::Timeout {
                hash: MOCK_HASH.into(),
                timeout: options.timeout,
            });
        }
        Ok(MOCK_HASH.into())
    }
}

/// A node whose every request fails before reaching the chain.
pub struct UnreachableNode;

#[async_trait]
impl ViewTransport for UnreachableNode {
    async fn execute_view(&self, _request: &ViewRequest) -> Result<Vec<JsonValue>, TransportError> {
        Err(TransportError::other("connection refused"))
    }
}

/// A wallet that records the payloads it is asked to sign.
#[derive(Default)]
pub struct MockWallet {
    pub signed: Mutex<Vec<(WalletPayload, SubmitOptions)>>,
}

#[async_trait]
impl WalletTransport for MockWallet {
    async fn sign_and_submit(
        &self,
        payload: &WalletPayload,
        options: &SubmitOptions,
    ) -> Result<TransactionHash, TransportError> {
        self.signed.lock().unwrap().push((payload.clone(), *options));
        Ok(MOCK_HASH.into())
    }
}

/// A wallet whose user declines every request.
pub struct RejectingWallet;

#[async_trait]
impl WalletTransport for RejectingWallet {
    async fn sign_and_submit(
        &self,
        _payload: &WalletPayload,
        _options: &SubmitOptions,
    ) -> Result<TransactionHash, TransportError> {
        Err(TransportError::other("user rejected the request"))
    }
}

pub fn short_timeout() -> SubmitOptions {
    SubmitOptions {
        timeout: Duration::from_secs(2),
        check_success: true,
    }
}
