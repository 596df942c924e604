//! Message tree building on top of decoded nodes.

mod common;

use common::*;
use sml_decoder::message::{MessageBody, OpenResponse, SmlValue};
use sml_decoder::{build_file, DecodeError, DecoderConfig, SmlFile};

const ENERGY: [u8; 6] = [1, 0, 1, 8, 0, 255];

#[test]
fn test_meter_sequence() {
    let payload = meter_payload(vec![entry(
        ENERGY,
        Some(30),
        Some(-1),
        unsigned(12345, 4),
    )]);
    let file = build_file(&payload).unwrap();

    assert_eq!(file.messages.len(), 3);
    assert_eq!(file.messages[0].transaction_id, vec![1]);
    assert_eq!(
        file.messages[0].body,
        MessageBody::OpenResponse(OpenResponse {
            codepage: None,
            client_id: None,
            req_file_id: vec![0x00, 0x01],
            server_id: vec![0x0A, 0x01, 0x45, 0x4D, 0x48, 0x00, 0x00, 0x12, 0x34, 0x56],
            ref_time: None,
            sml_version: None,
        })
    );

    let MessageBody::GetListResponse(response) = &file.messages[1].body else {
        panic!("expected GetList response");
    };
    let energy = &response.val_list[0];
    assert_eq!(energy.obj_name.to_string(), "1-0:1.8.0*255");
    assert_eq!(energy.unit, Some(30));
    assert_eq!(energy.scaler, Some(-1));
    assert_eq!(energy.value, Some(SmlValue::Unsigned(12345)));
}

#[test]
fn test_absent_versus_present_optional() {
    let absent = payload(vec![message(1, 0x0201, list(vec![Optional]))]);
    let present = payload(vec![message(1, 0x0201, list(vec![octets(&[0x5A, 0x5A])]))]);

    let absent = build_file(&absent).unwrap();
    let present = build_file(&present).unwrap();

    let MessageBody::CloseResponse(absent) = &absent.messages[0].body else {
        panic!("expected close response");
    };
    let MessageBody::CloseResponse(present) = &present.messages[0].body else {
        panic!("expected close response");
    };
    assert_eq!(absent.global_signature, None);
    assert_eq!(present.global_signature, Some(vec![0x5A, 0x5A]));
}

#[test]
fn test_schema_mismatch_is_isolated() {
    let good = || message(1, 0x0701, get_list_response(vec![entry(ENERGY, Some(30), None, unsigned(1, 1))]));
    // a list entry with five fields instead of seven
    let broken = message(
        2,
        0x0701,
        get_list_response(vec![list(vec![octets(&ENERGY), Optional, Optional, Optional, Optional])]),
    );

    let bytes = payload(vec![good(), broken, good(), good()]);
    let file = build_file(&bytes).unwrap();

    assert_eq!(file.messages.len(), 3);
    assert_eq!(file.rejected.len(), 1);
    assert_eq!(file.rejected[0].index, 1);
    assert_eq!(
        file.rejected[0].error,
        DecodeError::SchemaMismatch("SML_ListEntry: expected 7 fields, found 5".to_string())
    );
    assert!(!file.is_complete());
}

#[test]
fn test_unknown_body_tag_rejects_message() {
    let bytes = payload(vec![
        message(1, 0x0999, list(vec![])),
        message(2, 0x0201, close_response()),
    ]);
    let file = build_file(&bytes).unwrap();
    assert_eq!(file.messages.len(), 1);
    assert!(matches!(file.rejected[0].error, DecodeError::SchemaMismatch(_)));
}

#[test]
fn test_short_obis_code() {
    let bytes = payload(vec![message(
        1,
        0x0701,
        get_list_response(vec![list(vec![
            octets(&[1, 0, 1, 8]),
            Optional,
            Optional,
            Optional,
            Optional,
            unsigned(1, 1),
            Optional,
        ])]),
    )]);
    let file = build_file(&bytes).unwrap();
    assert_eq!(
        file.rejected[0].error,
        DecodeError::SchemaMismatch("objName: expected 6 bytes, found 4".to_string())
    );
}

#[test]
fn test_list_value_is_rejected() {
    let bytes = payload(vec![message(
        1,
        0x0701,
        get_list_response(vec![entry(ENERGY, None, None, list(vec![unsigned(1, 1)]))]),
    )]);
    let file = build_file(&bytes).unwrap();
    assert!(file.messages.is_empty());
    assert_eq!(file.rejected.len(), 1);
}

#[test]
fn test_unit_of_text_value_is_dropped() {
    let bytes = payload(vec![message(
        1,
        0x0701,
        get_list_response(vec![entry(ENERGY, Some(30), Some(-1), octets(b"EMH"))]),
    )]);
    let file = build_file(&bytes).unwrap();
    let MessageBody::GetListResponse(response) = &file.messages[0].body else {
        panic!("expected GetList response");
    };
    assert_eq!(response.val_list[0].unit, None);
    assert_eq!(response.val_list[0].scaler, None);
}

#[test]
fn test_message_crc_verification() {
    let mut bytes = payload(vec![
        message(1, 0x0201, close_response()),
        message(2, 0x0201, close_response()),
    ]);
    // corrupt the transaction id of the first message
    bytes[2] ^= 0xFF;

    let strict = DecoderConfig::default().with_message_crc(true);
    let file = SmlFile::parse_with_config(&bytes, &strict).unwrap();
    assert_eq!(file.messages.len(), 1);
    assert!(matches!(
        file.rejected[0].error,
        DecodeError::MessageChecksum { .. }
    ));

    // off by default
    assert_eq!(build_file(&bytes).unwrap().messages.len(), 2);
}

#[test]
fn test_nesting_limit_from_config() {
    let bytes = payload(vec![message(1, 0x0201, close_response())]);
    let shallow = DecoderConfig::default().with_max_depth(2);
    assert_eq!(
        SmlFile::parse_with_config(&bytes, &shallow),
        Err(DecodeError::NestingTooDeep(2))
    );
}
