//! View and entry payload construction.
//!
//! Both builders look the function up by name, check argument and
//! type-argument counts against the ABI, then turn each argument into what
//! the transport expects: JSON for view calls, canonical bytes for entry
//! calls.
//!
//! # Example
//!
//! ```ignore
//! use move_abi_client::payload::build_view;
//! use move_abi_client::schema::guid::guid_abi;
//!
//! let abi = guid_abi()?;
//! let payload = build_view(&abi, "create_id", &[], &["0xabc".into(), 7u64.into()])?;
//! assert_eq!(payload.request.function, "0x1::guid::create_id");
//! ```

use std::fmt;

use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::bcs::{self, BcsWriter, CodecError};
use crate::decoder::{ReturnDecoder, decoders_for};
use crate::logging::debug;
use crate::schema::{FunctionSignature, ModuleAbi};
use crate::types::{AccountAddress, TypeDescriptor, TypeTagError};
use crate::value::HostValue;

/// Errors raised while validating a call against its ABI.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    #[error("Function {0} not found in ABI")]
    FunctionNotFound(String),

    #[error("Operation \"{0}\" not found")]
    OperationNotFound(String),

    #[error("Function {function} expects {expected} arguments, but {actual} were provided")]
    ArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("Function {function} expects {expected} type arguments, but {actual} were provided")]
    GenericArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid type in {context}: {source}")]
    TypeTag {
        context: String,
        source: TypeTagError,
    },

    #[error("Invalid module address: {0}")]
    ModuleAddress(#[source] CodecError),

    #[error("Argument {index} ({ty}): {source}")]
    Argument {
        index: usize,
        ty: String,
        source: CodecError,
    },
}

/// The JSON body of a view request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRequest {
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<JsonValue>,
}

/// A validated view call plus the decoders for its result slots.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewPayload {
    pub request: ViewRequest,
    pub decoders: Vec<Option<ReturnDecoder>>,
}

/// Human-readable entry call, as accepted by wallet signing flows.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntryPayload {
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<HostValue>,
}

/// The JSON body handed to a wallet for signing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletPayload {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<JsonValue>,
}

impl RawEntryPayload {
    /// Format the arguments the way wallets expect them: every scalar as a
    /// string, lists element-wise, bytes as hex. Struct-shaped values are
    /// rejected.
    pub fn to_wallet_payload(&self) -> Result<WalletPayload, CodecError> {
        Ok(WalletPayload {
            kind: "entry_function_payload",
            function: self.function.clone(),
            type_arguments: self.type_arguments.clone(),
            arguments: self
                .arguments
                .iter()
                .map(wallet_argument)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// `address::name` of a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleId {
    pub address: AccountAddress,
    pub name: String,
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.address.to_short_string(), self.name)
    }
}

/// Fully encoded entry call, ready to be wrapped in a transaction and signed.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFunction {
    pub module: ModuleId,
    pub function: String,
    pub ty_args: Vec<TypeDescriptor>,
    /// Canonical bytes of each argument, in order.
    pub args: Vec<Vec<u8>>,
}

impl EntryFunction {
    /// Canonical bytes of the whole call description.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut writer = BcsWriter::new();
        writer.write_fixed(self.module.address.as_bytes());
        writer.write_str(&self.module.name)?;
        writer.write_str(&self.function)?;
        writer.write_len(self.ty_args.len())?;
        for ty in &self.ty_args {
            bcs::encode_type_tag(ty, &mut writer)?;
        }
        writer.write_len(self.args.len())?;
        for arg in &self.args {
            writer.write_bytes(arg)?;
        }
        Ok(writer.into_bytes())
    }
}

/// A validated entry call in both its raw and encoded forms.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPayload {
    pub raw: RawEntryPayload,
    pub entry_function: EntryFunction,
}

/// Build a view payload.
pub fn build_view(
    abi: &ModuleAbi,
    function: &str,
    type_arguments: &[String],
    arguments: &[HostValue],
) -> Result<ViewPayload, PayloadError> {
    let signature = lookup(abi, function)?;
    let (_, params) = resolve_params(signature, &signature.params, type_arguments, arguments)?;

    let formatted = params
        .iter()
        .zip(arguments)
        .map(|(ty, value)| format_view_argument(ty, value))
        .collect();

    let decoders = decoders_for(&signature.returns).map_err(|source| PayloadError::TypeTag {
        context: format!("return types of {function}"),
        source,
    })?;

    let function_id = abi.function_id(function);
    debug!(function = %function_id, args = arguments.len(), "built view payload");

    Ok(ViewPayload {
        request: ViewRequest {
            function: function_id,
            type_arguments: type_arguments.to_vec(),
            arguments: formatted,
        },
        decoders,
    })
}

/// Build an entry payload. A leading signer parameter is not supplied by
/// the caller.
pub fn build_entry(
    abi: &ModuleAbi,
    function: &str,
    type_arguments: &[String],
    arguments: &[HostValue],
) -> Result<EntryPayload, PayloadError> {
    let signature = lookup(abi, function)?;
    let (ty_args, params) =
        resolve_params(signature, signature.entry_params(), type_arguments, arguments)?;

    let args = params
        .iter()
        .zip(arguments)
        .enumerate()
        .map(|(index, (ty, value))| {
            bcs::encode(ty, value).map_err(|source| PayloadError::Argument {
                index,
                ty: ty.to_string(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let address = AccountAddress::from_hex(&abi.address).map_err(PayloadError::ModuleAddress)?;
    let function_id = abi.function_id(function);
    debug!(function = %function_id, args = args.len(), "built entry payload");

    Ok(EntryPayload {
        raw: RawEntryPayload {
            function: function_id,
            type_arguments: type_arguments.to_vec(),
            arguments: arguments.to_vec(),
        },
        entry_function: EntryFunction {
            module: ModuleId {
                address,
                name: abi.name.clone(),
            },
            function: function.to_string(),
            ty_args,
            args,
        },
    })
}

fn lookup<'a>(abi: &'a ModuleAbi, function: &str) -> Result<&'a FunctionSignature, PayloadError> {
    abi.function(function)
        .ok_or_else(|| PayloadError::FunctionNotFound(function.to_string()))
}

/// Check both counts, then parse each parameter tag with generics bound to
/// the supplied type arguments. Returns the parsed type arguments alongside
/// the parameter types.
fn resolve_params(
    signature: &FunctionSignature,
    params: &[String],
    type_arguments: &[String],
    arguments: &[HostValue],
) -> Result<(Vec<TypeDescriptor>, Vec<TypeDescriptor>), PayloadError> {
    if params.len() != arguments.len() {
        debug!(
            function = %signature.name,
            expected = params.len(),
            actual = arguments.len(),
            "argument count mismatch"
        );
        return Err(PayloadError::ArityMismatch {
            function: signature.name.clone(),
            expected: params.len(),
            actual: arguments.len(),
        });
    }
    if signature.generic_type_params.len() != type_arguments.len() {
        return Err(PayloadError::GenericArityMismatch {
            function: signature.name.clone(),
            expected: signature.generic_type_params.len(),
            actual: type_arguments.len(),
        });
    }

    let ty_args = parse_type_arguments(type_arguments)?;
    let params = params
        .iter()
        .enumerate()
        .map(|(index, tag)| {
            TypeDescriptor::parse(tag)
                .and_then(|ty| ty.substitute(&ty_args))
                .map_err(|source| PayloadError::TypeTag {
                    context: format!("parameter {index} of {}", signature.name),
                    source,
                })
        })
        .collect::<Result<_, _>>()?;
    Ok((ty_args, params))
}

/// Type arguments instantiate generics, so each must name a concrete type:
/// no placeholders, no references and no signer.
fn parse_type_arguments(type_arguments: &[String]) -> Result<Vec<TypeDescriptor>, PayloadError> {
    type_arguments
        .iter()
        .enumerate()
        .map(|(index, tag)| {
            TypeDescriptor::parse(tag)
                .and_then(|ty| {
                    if ty.is_concrete() {
                        Ok(ty)
                    } else {
                        Err(TypeTagError::malformed(tag, "not a concrete type"))
                    }
                })
                .map_err(|source| PayloadError::TypeTag {
                    context: format!("type argument {index}"),
                    source,
                })
        })
        .collect()
}

/// View arguments travel as JSON; integer-typed values are stringified so
/// wide integers survive.
fn format_view_argument(ty: &TypeDescriptor, value: &HostValue) -> JsonValue {
    let is_integer = ty.primitive().is_some_and(|kind| kind.is_integer());
    match (ty, value) {
        (_, HostValue::Int(v)) if is_integer => JsonValue::String(v.to_string()),
        (_, HostValue::Number(n)) if is_integer => JsonValue::String(n.to_string()),
        (TypeDescriptor::Vector(inner), HostValue::List(items)) => JsonValue::Array(
            items
                .iter()
                .map(|item| format_view_argument(inner, item))
                .collect(),
        ),
        _ => value.to_json(),
    }
}

fn wallet_argument(value: &HostValue) -> Result<JsonValue, CodecError> {
    Ok(match value {
        HostValue::List(items) => JsonValue::Array(
            items
                .iter()
                .map(wallet_argument)
                .collect::<Result<_, _>>()?,
        ),
        HostValue::Object(_) | HostValue::Null => {
            return Err(CodecError::UnsupportedType(format!(
                "a value of struct type: {} is not supported",
                value.to_json()
            )));
        }
        HostValue::Bytes(_) => value.to_json(),
        HostValue::Bool(b) => JsonValue::String(b.to_string()),
        HostValue::Int(v) => JsonValue::String(v.to_string()),
        HostValue::Number(n) => JsonValue::String(n.to_string()),
        HostValue::Str(s) => JsonValue::String(s.clone()),
    })
}
