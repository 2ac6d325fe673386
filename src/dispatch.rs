//! Operation naming and dispatch.
//!
//! Every ABI function is reachable under a generated operation name: the
//! call-kind prefix joined to the function name and camel-cased, so
//! `creation_num` becomes `viewCreationNum` and `entryCreationNum`. The
//! table is built once per ABI; resolving an operation decodes the name
//! back to its call kind and function, then looks that pair up.

use std::collections::BTreeMap;

use crate::logging::trace;
use crate::payload::PayloadError;
use crate::schema::ModuleAbi;

/// How an operation reaches the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CallKind {
    /// Read-only query.
    View,
    /// Signed, state-changing transaction.
    Entry,
}

impl CallKind {
    pub fn prefix(self) -> &'static str {
        match self {
            CallKind::View => "view",
            CallKind::Entry => "entry",
        }
    }
}

/// A resolved operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub kind: CallKind,
    /// Function name as declared in the ABI.
    pub function: String,
}

/// Generated operation name for a function: `creation_num` under
/// [`CallKind::View`] becomes `viewCreationNum`.
///
/// An underscore before a lower-case ASCII letter folds into the capital.
/// Every other underscore is written twice and an upper-case letter already
/// in the name is escaped as `_X`, so `a_1` is `viewA__1` and `a1` is
/// `viewA1`. Distinct functions never share an operation name and
/// [`parse_operation`] inverts this exactly.
pub fn operation_name(kind: CallKind, function: &str) -> String {
    let mut out = String::with_capacity(kind.prefix().len() + function.len() + 1);
    out.push_str(kind.prefix());
    let mut chars = std::iter::once('_').chain(function.chars()).peekable();
    while let Some(c) = chars.next() {
        match c {
            '_' => match chars.next_if(char::is_ascii_lowercase) {
                Some(next) => out.push(next.to_ascii_uppercase()),
                None => out.push_str("__"),
            },
            c if c.is_ascii_uppercase() => {
                out.push('_');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Split an operation name into its call kind and declared function name.
/// `None` when the name is not one [`operation_name`] produces.
pub fn parse_operation(operation: &str) -> Option<(CallKind, String)> {
    [CallKind::View, CallKind::Entry]
        .into_iter()
        .find_map(|kind| {
            let decoded = decode_name(operation.strip_prefix(kind.prefix())?)?;
            let function = decoded.strip_prefix('_').filter(|f| !f.is_empty())?;
            Some((kind, function.to_string()))
        })
}

fn decode_name(encoded: &str) -> Option<String> {
    let mut out = String::with_capacity(encoded.len() + 4);
    let mut chars = encoded.chars();
    while let Some(c) = chars.next() {
        match c {
            '_' => match chars.next()? {
                '_' => out.push('_'),
                upper if upper.is_ascii_uppercase() => out.push(upper),
                _ => return None,
            },
            c if c.is_ascii_uppercase() => {
                out.push('_');
                out.push(c.to_ascii_lowercase());
            }
            c => out.push(c),
        }
    }
    Some(out)
}

/// Operation name to function mapping for one ABI.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    operations: BTreeMap<(CallKind, String), Operation>,
}

impl DispatchTable {
    /// Register every exposed function under both call kinds. The ABI's
    /// `is_view` / `is_entry` flags are not consulted.
    pub fn new(abi: &ModuleAbi) -> Self {
        Self::build(abi, |_| true)
    }

    /// Register only what the ABI marks as view or entry functions.
    pub fn strict(abi: &ModuleAbi) -> Self {
        Self::build(abi, |op| match op.kind {
            CallKind::View => op.is_view,
            CallKind::Entry => op.is_entry,
        })
    }

    fn build(abi: &ModuleAbi, include: impl Fn(&Candidate) -> bool) -> Self {
        let mut operations = BTreeMap::new();
        for f in &abi.exposed_functions {
            for kind in [CallKind::View, CallKind::Entry] {
                let candidate = Candidate {
                    kind,
                    is_view: f.is_view,
                    is_entry: f.is_entry,
                };
                if !include(&candidate) {
                    continue;
                }
                operations.insert(
                    (kind, f.name.clone()),
                    Operation {
                        kind,
                        function: f.name.clone(),
                    },
                );
            }
        }
        Self { operations }
    }

    /// Resolve an operation name to its call kind and declared function.
    pub fn resolve(&self, operation: &str) -> Result<&Operation, PayloadError> {
        let op = parse_operation(operation)
            .and_then(|key| self.operations.get(&key))
            .ok_or_else(|| PayloadError::OperationNotFound(operation.to_string()))?;
        trace!(operation, function = %op.function, kind = op.kind.prefix(), "resolved operation");
        Ok(op)
    }

    /// Every registered operation with its generated name, views first.
    pub fn operations(&self) -> impl Iterator<Item = (String, &Operation)> {
        self.operations
            .values()
            .map(|op| (operation_name(op.kind, &op.function), op))
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

struct Candidate {
    kind: CallKind,
    is_view: bool,
    is_entry: bool,
}
