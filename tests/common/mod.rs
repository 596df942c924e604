//! Builders for SML test payloads.

#![allow(dead_code)]

use sml_decoder::payload::{to_bytes, DecodedNode};
use sml_decoder::transport::message_crc;

pub use DecodedNode::{EndOfMessage, Optional};

pub fn octets(bytes: &[u8]) -> DecodedNode {
    DecodedNode::OctetString(bytes.to_vec())
}

pub fn unsigned(value: u64, width: u8) -> DecodedNode {
    DecodedNode::Unsigned(value, width)
}

pub fn integer(value: i64, width: u8) -> DecodedNode {
    DecodedNode::Integer(value, width)
}

pub fn list(children: Vec<DecodedNode>) -> DecodedNode {
    DecodedNode::List(children)
}

/// A list entry with the fields a meter usually fills in.
pub fn entry(obis: [u8; 6], unit: Option<u8>, scaler: Option<i8>, value: DecodedNode) -> DecodedNode {
    list(vec![
        octets(&obis),
        Optional,
        Optional,
        unit.map_or(Optional, |u| unsigned(u64::from(u), 1)),
        scaler.map_or(Optional, |s| integer(i64::from(s), 1)),
        value,
        Optional,
    ])
}

pub fn get_list_response(entries: Vec<DecodedNode>) -> DecodedNode {
    list(vec![
        Optional,
        octets(&[0x0A, 0x01, 0x45, 0x4D, 0x48, 0x00, 0x00, 0x12, 0x34, 0x56]),
        Optional,
        Optional,
        list(entries),
        Optional,
        Optional,
    ])
}

pub fn open_response() -> DecodedNode {
    list(vec![
        Optional,
        Optional,
        octets(&[0x00, 0x01]),
        octets(&[0x0A, 0x01, 0x45, 0x4D, 0x48, 0x00, 0x00, 0x12, 0x34, 0x56]),
        Optional,
        Optional,
    ])
}

pub fn close_response() -> DecodedNode {
    list(vec![Optional])
}

/// A message node with a zero crc16 field.
pub fn message(transaction_id: u8, tag: u32, body: DecodedNode) -> DecodedNode {
    list(vec![
        octets(&[transaction_id]),
        unsigned(0, 1),
        unsigned(0, 1),
        list(vec![unsigned(u64::from(tag), 2), body]),
        unsigned(0, 2),
        EndOfMessage,
    ])
}

/// Encodes a message node and fills in a valid crc16 field.
pub fn message_bytes(mut node: DecodedNode) -> Vec<u8> {
    let raw = to_bytes(&node);
    // crc16 field (3 bytes) and end marker (1 byte) trail the message
    let crc = message_crc(&raw[..raw.len() - 4]);
    if let DecodedNode::List(fields) = &mut node {
        fields[4] = unsigned(u64::from(crc), 2);
    }
    to_bytes(&node).to_vec()
}

/// Concatenates encoded messages into a file payload.
pub fn payload(messages: Vec<DecodedNode>) -> Vec<u8> {
    messages.into_iter().flat_map(message_bytes).collect()
}

/// Open, one GetList response and close, the sequence a meter pushes.
pub fn meter_payload(entries: Vec<DecodedNode>) -> Vec<u8> {
    payload(vec![
        message(1, 0x0101, open_response()),
        message(2, 0x0701, get_list_response(entries)),
        message(3, 0x0201, close_response()),
    ])
}
