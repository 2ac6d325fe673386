//! Payload construction against whole ABIs, without a transport.

mod common;

use serde_json::json;

use move_abi_client::bcs;
use move_abi_client::decoder::{ReturnDecoder, apply_decoders};
use move_abi_client::dispatch::{CallKind, DispatchTable};
use move_abi_client::prelude::*;
use move_abi_client::types::PrimitiveKind;
use move_abi_client::PayloadError;

use common::*;

const ABC: &str = "0x0000000000000000000000000000000000000000000000000000000000000abc";

#[test]
fn test_guid_create_id_view() {
    let abi = guid_abi().unwrap();
    let table = DispatchTable::new(&abi);
    let op = table.resolve("viewCreateId").unwrap();
    assert_eq!(op.kind, CallKind::View);

    let payload = build_view(&abi, &op.function, &[], &[ABC.into(), 7u64.into()]).unwrap();
    assert_eq!(
        serde_json::to_value(&payload.request).unwrap(),
        json!({
            "function": "0x1::guid::create_id",
            "type_arguments": [],
            "arguments": [ABC, "7"],
        })
    );
    // struct return: pass-through
    assert_eq!(payload.decoders, vec![None]);
}

#[test]
fn test_guid_creation_num_view_decodes_u64() {
    let abi = guid_abi().unwrap();
    let guid = json!({"id": {"creation_num": "2", "addr": ABC}});
    let payload = build_view(&abi, "creation_num", &[], &[guid.into()]).unwrap();

    assert_eq!(
        payload.decoders,
        vec![Some(ReturnDecoder::WideInteger(PrimitiveKind::U64))]
    );
    let values = apply_decoders(&payload.decoders, vec![json!("18446744073709551615")]).unwrap();
    assert_eq!(
        values.first().and_then(ReturnValue::as_integer),
        Some(U256::from(18_446_744_073_709_551_615u64))
    );
}

#[test]
fn test_entry_operation_on_absent_function() {
    let abi = guid_abi().unwrap();
    let table = DispatchTable::new(&abi);
    assert_eq!(
        table.resolve("entryDestroy").unwrap_err(),
        PayloadError::OperationNotFound("entryDestroy".to_string())
    );
}

#[test]
fn test_signer_is_stripped_only_for_entry_calls() {
    let abi = coin_abi();
    let args: Vec<HostValue> = vec!["0xb0b".into(), 1u64.into()];

    assert!(build_entry(&abi, "transfer", &aptos_coin(), &args).is_ok());

    // a view over the same function counts the signer
    let err = build_view(&abi, "transfer", &aptos_coin(), &args).unwrap_err();
    assert_eq!(
        err,
        PayloadError::ArityMismatch {
            function: "transfer".to_string(),
            expected: 3,
            actual: 2,
        }
    );
}

#[test]
fn test_every_primitive_encodes() {
    let abi = kitchen_sink_abi();
    let args: Vec<HostValue> = vec![
        true.into(),
        255u8.into(),
        "65535".into(),
        u32::MAX.into(),
        "0xffffffffffffffff".into(),
        u128::MAX.into(),
        HostValue::Int(U256::MAX),
        "cafe".into(),
        "hello".into(),
        vec![1u8, 2, 3].into(),
        HostValue::from(json!([[1, 2], [], ["3"]])),
    ];
    let payload = build_entry(&abi, "everything", &[], &args).unwrap();
    let encoded = &payload.entry_function.args;

    let lengths: Vec<usize> = encoded.iter().map(Vec::len).collect();
    assert_eq!(lengths, vec![1, 1, 2, 4, 8, 16, 32, 32, 6, 4, 1 + 1 + 16 + 1 + 1 + 8]);

    assert_eq!(encoded.get(7).unwrap().get(30..), Some(&[0xca, 0xfe][..]));
    assert_eq!(encoded.get(8).unwrap(), &b"\x05hello".to_vec());
    assert_eq!(encoded.get(9).unwrap(), &vec![3, 1, 2, 3]);
}

#[test]
fn test_struct_arguments_are_unsupported_for_entry_calls() {
    let abi = ModuleAbi::from_json(
        r#"{
            "address": "0x1",
            "name": "guid_user",
            "exposed_functions": [{
                "name": "forget",
                "visibility": "public",
                "is_entry": true,
                "is_view": false,
                "generic_type_params": [],
                "params": ["signer", "0x1::guid::ID"],
                "return": []
            }]
        }"#,
    )
    .unwrap();
    let id = json!({"creation_num": "1", "addr": "0x1"});
    let err = Error::from(build_entry(&abi, "forget", &[], &[id.into()]).unwrap_err());
    assert_eq!(err.kind(), ErrorKind::UnsupportedType);
}

#[test]
fn test_entry_function_envelope() {
    let abi = coin_abi();
    let payload =
        build_entry(&abi, "transfer", &aptos_coin(), &["0x2".into(), 3u64.into()]).unwrap();
    let bytes = payload.entry_function.to_bytes().unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(AccountAddress::ONE.as_bytes());
    expected.extend_from_slice(b"\x04coin");
    expected.extend_from_slice(b"\x08transfer");
    // one struct type argument
    expected.extend_from_slice(&[1, 7]);
    expected.extend_from_slice(AccountAddress::ONE.as_bytes());
    expected.extend_from_slice(b"\x0aaptos_coin");
    expected.extend_from_slice(b"\x09AptosCoin");
    expected.push(0);
    // two arguments, each length-prefixed
    expected.push(2);
    expected.push(32);
    expected.extend_from_slice(AccountAddress::from_hex("0x2").unwrap().as_bytes());
    expected.push(8);
    expected.extend_from_slice(&3u64.to_le_bytes());

    assert_eq!(bytes, expected);
}

#[test]
fn test_generic_parameters_encode_under_type_argument() {
    let abi = ModuleAbi::from_json(
        r#"{
            "address": "0x1",
            "name": "store",
            "exposed_functions": [{
                "name": "put_all",
                "visibility": "public",
                "is_entry": true,
                "is_view": false,
                "generic_type_params": [{ "constraints": ["drop"] }],
                "params": ["&signer", "vector<T0>"],
                "return": []
            }]
        }"#,
    )
    .unwrap();

    let payload =
        build_entry(&abi, "put_all", &["u16".to_string()], &[HostValue::list([1u16, 2])]).unwrap();
    assert_eq!(payload.entry_function.args, vec![vec![2, 1, 0, 2, 0]]);

    let bad = ["0x1::coin::".to_string()];
    let err = build_entry(&abi, "put_all", &bad, &[HostValue::list([1u16])]).unwrap_err();
    assert_eq!(Error::from(err).kind(), ErrorKind::MalformedTypeTag);
}

#[test]
fn test_non_concrete_type_arguments_are_rejected_up_front() {
    let abi = coin_abi();
    let args: Vec<HostValue> = vec!["0xb0b".into(), 1u64.into()];

    for tag in ["T0", "&u64", "signer"] {
        let err = build_entry(&abi, "transfer", &[tag.to_string()], &args).unwrap_err();
        assert!(
            matches!(&err, PayloadError::TypeTag { context, .. } if context == "type argument 0"),
            "{tag}: {err:?}"
        );
        assert_eq!(Error::from(err).kind(), ErrorKind::MalformedTypeTag);
    }
}

#[test]
fn test_wallet_payload_rejects_struct_values() {
    let abi = guid_abi().unwrap();
    // the guid module has no entry functions, but the encoder still refuses
    // struct-shaped values before the wallet ever sees them
    let id = json!({"addr": "0x1"});
    let err = build_entry(&abi, "id_creation_num", &[], &[id.into()]).unwrap_err();
    assert_eq!(Error::from(err).kind(), ErrorKind::UnsupportedType);

    let raw = move_abi_client::RawEntryPayload {
        function: "0x1::guid::id_creation_num".to_string(),
        type_arguments: vec![],
        arguments: vec![json!({"addr": "0x1"}).into()],
    };
    assert!(matches!(
        raw.to_wallet_payload(),
        Err(move_abi_client::CodecError::UnsupportedType(_))
    ));
}

#[test]
fn test_decode_inverts_encode_for_entry_arguments() {
    let abi = kitchen_sink_abi();
    let signature = abi.function("everything").unwrap();
    let nested = HostValue::from(json!([[1, 2], [3]]));
    let ty = TypeDescriptor::parse(signature.params.last().unwrap()).unwrap();

    let bytes = bcs::encode(&ty, &nested).unwrap();
    assert_eq!(bcs::decode(&ty, &bytes).unwrap(), nested);
}
