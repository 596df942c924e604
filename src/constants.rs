//! SML Protocol Constants
//!
//! This module defines constants used in the SML implementation, following
//! BSI TR-03109-1 (SML transport v1 and binary encoding).

/// Escape block that introduces every transport control sequence
pub const SML_ESCAPE: [u8; 4] = [0x1B, 0x1B, 0x1B, 0x1B];

/// Start sequence: escape block followed by the transport version 1 marker
pub const SML_START_SEQUENCE: [u8; 8] = [0x1B, 0x1B, 0x1B, 0x1B, 0x01, 0x01, 0x01, 0x01];

/// First byte after the escape block marking the end of a datagram
pub const SML_END_MARKER: u8 = 0x1A;

/// Transport body block size
pub const SML_BLOCK_SIZE: usize = 4;

/// Largest fill-byte count allowed by the block alignment
pub const SML_MAX_FILL: u8 = 3;

/// Type-length byte: more type-length bytes follow
pub const SML_TL_MORE: u8 = 0x80;

/// Type-length byte: type field mask
pub const SML_TL_TYPE_MASK: u8 = 0x70;

/// Type-length byte: length nibble mask
pub const SML_TL_LENGTH_MASK: u8 = 0x0F;

/// Type field: octet string
pub const SML_TYPE_OCTET_STRING: u8 = 0x00;

/// Type field: boolean
pub const SML_TYPE_BOOLEAN: u8 = 0x40;

/// Type field: signed integer
pub const SML_TYPE_INTEGER: u8 = 0x50;

/// Type field: unsigned integer
pub const SML_TYPE_UNSIGNED: u8 = 0x60;

/// Type field: list
pub const SML_TYPE_LIST: u8 = 0x70;

/// End of SML message
pub const SML_END_OF_MESSAGE: u8 = 0x00;

/// Optional field not present
pub const SML_OPTIONAL_SKIPPED: u8 = 0x01;

/// Widest integer payload in bytes
pub const SML_MAX_NUMBER_WIDTH: usize = 8;

/// Most type-length bytes a u32 length can need
pub const SML_MAX_TL_BYTES: usize = 8;

/// Default bound on list nesting
pub const SML_DEFAULT_MAX_DEPTH: usize = 16;

/// Elements of an SML_Message list
pub const SML_MESSAGE_FIELDS: usize = 6;

/// Elements of an SML_MessageBody list
pub const SML_MESSAGE_BODY_FIELDS: usize = 2;

/// Elements of an SML_GetList.Res list
pub const SML_GET_LIST_RESPONSE_FIELDS: usize = 7;

/// Elements of an SML_ListEntry list
pub const SML_LIST_ENTRY_FIELDS: usize = 7;

/// Elements of an SML_PublicOpen.Res list
pub const SML_OPEN_RESPONSE_FIELDS: usize = 6;

/// Elements of an SML_PublicClose.Res list
pub const SML_CLOSE_RESPONSE_FIELDS: usize = 1;

/// Length of an OBIS object name
pub const SML_OBIS_LEN: usize = 6;

/// SML_Time choice: seconds index
pub const SML_TIME_SEC_INDEX: u8 = 0x01;

/// SML_Time choice: UNIX timestamp
pub const SML_TIME_TIMESTAMP: u8 = 0x02;

/// SML_Time choice: local timestamp with offsets
pub const SML_TIME_LOCAL_TIMESTAMP: u8 = 0x03;
