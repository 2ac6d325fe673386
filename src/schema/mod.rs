//! In-memory model of a Move module ABI.
//!
//! The shapes mirror the JSON document a node returns for a deployed module
//! (`address`, `name`, `friends`, `exposed_functions`, `structs`). Values are
//! loaded once and never mutated, so a [`ModuleAbi`] can be shared freely
//! between concurrent calls.

pub mod guid;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::TypeDescriptor;

/// ABI of one deployed module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleAbi {
    /// Owning account address, as written in the schema (e.g. `0x1`).
    pub address: String,
    /// Module name.
    pub name: String,
    /// Friend modules (informational).
    #[serde(default)]
    pub friends: Vec<String>,
    /// Functions callable from outside the module.
    #[serde(default)]
    pub exposed_functions: Vec<FunctionSignature>,
    /// Struct layouts declared by the module.
    #[serde(default)]
    pub structs: Vec<StructLayout>,
}

/// Declared visibility of a function. Not enforced when building payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Friend,
    Private,
}

/// One exposed function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    pub visibility: Visibility,
    #[serde(default)]
    pub is_entry: bool,
    #[serde(default)]
    pub is_view: bool,
    #[serde(default)]
    pub generic_type_params: Vec<GenericTypeParam>,
    /// Parameter type tags, in declaration order.
    #[serde(default)]
    pub params: Vec<String>,
    /// Return type tags, in declaration order.
    #[serde(default, rename = "return")]
    pub returns: Vec<String>,
}

impl FunctionSignature {
    /// Whether the first declared parameter is the signer injected by the VM.
    pub fn takes_signer(&self) -> bool {
        self.params
            .first()
            .and_then(|p| TypeDescriptor::parse(p).ok())
            .is_some_and(|ty| ty.is_signer())
    }

    /// Parameters a caller supplies for an entry call (leading signer removed).
    pub fn entry_params(&self) -> &[String] {
        if self.takes_signer() {
            self.params.get(1..).unwrap_or_default()
        } else {
            &self.params
        }
    }
}

/// A generic type slot. Constraints are kept for completeness; any type tag
/// is accepted when building a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericTypeParam {
    #[serde(default)]
    pub constraints: Vec<String>,
}

/// A struct declared in the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructLayout {
    pub name: String,
    #[serde(default)]
    pub is_native: bool,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub generic_type_params: Vec<GenericTypeParam>,
    #[serde(default)]
    pub fields: Vec<StructField>,
}

/// A named struct field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
}

impl ModuleAbi {
    /// Parse a module ABI from its JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::Schema)
    }

    /// Load a module ABI from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// `address::name`, the module id used in function identifiers.
    pub fn module_id(&self) -> String {
        format!("{}::{}", self.address, self.name)
    }

    /// Fully qualified `address::module::function` identifier.
    pub fn function_id(&self, function: &str) -> String {
        format!("{}::{}::{}", self.address, self.name, function)
    }

    /// Look up a function by exact name.
    pub fn function(&self, name: &str) -> Option<&FunctionSignature> {
        self.exposed_functions.iter().find(|f| f.name == name)
    }

    /// Look up a struct layout by exact name.
    pub fn struct_layout(&self, name: &str) -> Option<&StructLayout> {
        self.structs.iter().find(|s| s.name == name)
    }
}
