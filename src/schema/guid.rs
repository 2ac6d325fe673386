//! ABI of the framework `0x1::guid` module, bundled as a sample schema.

use super::ModuleAbi;
use crate::error::Result;

/// The `0x1::guid` ABI document, as published by the framework.
pub const GUID_ABI_JSON: &str = include_str!("../../abis/guid.json");

/// Parse the bundled `0x1::guid` ABI.
///
/// Each call returns a fresh value; pass it to whatever needs it rather
/// than keeping a process-wide copy.
pub fn guid_abi() -> Result<ModuleAbi> {
    ModuleAbi::from_json(GUID_ABI_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Visibility;

    #[test]
    fn test_guid_abi_loads() {
        let abi = guid_abi().unwrap();
        assert_eq!(abi.module_id(), "0x1::guid");
        assert_eq!(abi.friends, vec!["0x1::account", "0x1::object"]);
        assert_eq!(abi.exposed_functions.len(), 8);
        assert_eq!(abi.structs.len(), 2);

        let create = abi.function("create").unwrap();
        assert_eq!(create.visibility, Visibility::Friend);
        assert_eq!(create.params, vec!["address", "&mut u64"]);

        let num = abi.function("creation_num").unwrap();
        assert_eq!(num.returns, vec!["u64"]);

        let id = abi.struct_layout("ID").unwrap();
        assert_eq!(id.fields.len(), 2);
        assert_eq!(id.fields.first().unwrap().type_tag, "u64");
    }
}
