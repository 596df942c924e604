//! # SML Binary Value Decoder
//!
//! Decodes the self-describing type-length encoding of SML. Every node starts
//! with one or more type-length (TL) bytes:
//!
//! ```text
//! bit 7     more TL bytes follow
//! bits 6..4 type: 000 octet string, 100 boolean, 101 integer,
//!           110 unsigned, 111 list
//! bits 3..0 length nibble, accumulated big-endian over all TL bytes
//! ```
//!
//! For lists the length is the element count. For every other type it is the
//! total node length including the TL bytes themselves. The single byte `0x00`
//! marks the end of a message and `0x01` an optional field that is absent.

use crate::constants::{
    SML_DEFAULT_MAX_DEPTH, SML_END_OF_MESSAGE, SML_MAX_NUMBER_WIDTH, SML_MAX_TL_BYTES,
    SML_TL_LENGTH_MASK, SML_TL_MORE, SML_TL_TYPE_MASK, SML_TYPE_BOOLEAN, SML_TYPE_INTEGER,
    SML_TYPE_LIST, SML_TYPE_OCTET_STRING, SML_TYPE_UNSIGNED,
};
use crate::error::DecodeError;
use crate::payload::node::DecodedNode;
use nom::{bytes::complete::take, number::complete::be_u8, IResult};

/// Read position over a de-framed payload.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, position: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The bytes not consumed yet.
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.position..]
    }

    pub fn is_empty(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.remaining().first().copied()
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let result: IResult<&[u8], u8> = be_u8(self.remaining());
        let (_, byte) = result.map_err(|_| DecodeError::UnexpectedEndOfInput)?;
        self.position += 1;
        Ok(byte)
    }

    pub fn take(&mut self, count: usize) -> Result<&'a [u8], DecodeError> {
        let result: IResult<&'a [u8], &'a [u8]> = take(count)(self.remaining());
        let (_, bytes) = result.map_err(|_| DecodeError::UnexpectedEndOfInput)?;
        self.position += count;
        Ok(bytes)
    }
}

/// Type field of a TL byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    OctetString,
    Boolean,
    Integer,
    Unsigned,
    List,
    EndOfMessage,
}

/// A decoded type-length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeLength {
    pub class: TypeClass,
    /// Element count for lists, total node length otherwise.
    pub len: u32,
    /// Number of TL bytes read.
    pub size: usize,
    /// The first TL byte, kept for error reporting.
    pub first: u8,
}

/// Reads one type-length field.
pub fn parse_type_length(cursor: &mut Cursor<'_>) -> Result<TypeLength, DecodeError> {
    let first = cursor.read_u8()?;
    if first == SML_END_OF_MESSAGE {
        return Ok(TypeLength {
            class: TypeClass::EndOfMessage,
            len: 0,
            size: 1,
            first,
        });
    }

    let class = match first & SML_TL_TYPE_MASK {
        SML_TYPE_OCTET_STRING => TypeClass::OctetString,
        SML_TYPE_BOOLEAN => TypeClass::Boolean,
        SML_TYPE_INTEGER => TypeClass::Integer,
        SML_TYPE_UNSIGNED => TypeClass::Unsigned,
        SML_TYPE_LIST => TypeClass::List,
        _ => return Err(DecodeError::InvalidTag(first)),
    };

    let mut len = u32::from(first & SML_TL_LENGTH_MASK);
    let mut size = 1;
    let mut more = first & SML_TL_MORE != 0;
    while more {
        let byte = cursor.read_u8()?;
        if byte & SML_TL_TYPE_MASK != 0 {
            return Err(DecodeError::InvalidTag(byte));
        }
        size += 1;
        if size > SML_MAX_TL_BYTES || len > u32::MAX >> 4 {
            return Err(DecodeError::LengthOverflow);
        }
        len = (len << 4) | u32::from(byte & SML_TL_LENGTH_MASK);
        more = byte & SML_TL_MORE != 0;
    }

    Ok(TypeLength {
        class,
        len,
        size,
        first,
    })
}

/// Decodes one node, including all children of a list, with the default
/// nesting limit.
pub fn decode_node(cursor: &mut Cursor<'_>) -> Result<DecodedNode, DecodeError> {
    decode_node_with_depth(cursor, SML_DEFAULT_MAX_DEPTH)
}

/// Decodes one node, rejecting lists nested deeper than `max_depth`.
pub fn decode_node_with_depth(
    cursor: &mut Cursor<'_>,
    max_depth: usize,
) -> Result<DecodedNode, DecodeError> {
    decode_at(cursor, 0, max_depth)
}

fn decode_at(
    cursor: &mut Cursor<'_>,
    depth: usize,
    max_depth: usize,
) -> Result<DecodedNode, DecodeError> {
    let tl = parse_type_length(cursor)?;

    match tl.class {
        TypeClass::EndOfMessage => Ok(DecodedNode::EndOfMessage),
        TypeClass::List => {
            if depth >= max_depth {
                return Err(DecodeError::NestingTooDeep(max_depth));
            }
            let count = usize::try_from(tl.len).map_err(|_| DecodeError::LengthOverflow)?;
            // every child needs at least one byte
            let mut children = Vec::with_capacity(count.min(cursor.remaining().len()));
            for _ in 0..count {
                children.push(decode_at(cursor, depth + 1, max_depth)?);
            }
            Ok(DecodedNode::List(children))
        }
        class => {
            let total = usize::try_from(tl.len).map_err(|_| DecodeError::LengthOverflow)?;
            let payload_len = total
                .checked_sub(tl.size)
                .ok_or(DecodeError::InvalidTag(tl.first))?;
            decode_primitive(cursor, class, payload_len, tl.first)
        }
    }
}

fn decode_primitive(
    cursor: &mut Cursor<'_>,
    class: TypeClass,
    payload_len: usize,
    first: u8,
) -> Result<DecodedNode, DecodeError> {
    match class {
        TypeClass::OctetString if payload_len == 0 => Ok(DecodedNode::Optional),
        TypeClass::OctetString => Ok(DecodedNode::OctetString(cursor.take(payload_len)?.to_vec())),
        TypeClass::Boolean => {
            if payload_len != 1 {
                return Err(DecodeError::InvalidTag(first));
            }
            Ok(DecodedNode::Boolean(cursor.read_u8()? != 0))
        }
        TypeClass::Integer | TypeClass::Unsigned => {
            if payload_len == 0 {
                return Err(DecodeError::InvalidTag(first));
            }
            if payload_len > SML_MAX_NUMBER_WIDTH {
                return Err(DecodeError::LengthOverflow);
            }
            let bytes = cursor.take(payload_len)?;
            let raw = bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
            let width = payload_len as u8;
            if class == TypeClass::Unsigned {
                return Ok(DecodedNode::Unsigned(raw, width));
            }
            let shift = 64 - 8 * payload_len as u32;
            Ok(DecodedNode::Integer(((raw << shift) as i64) >> shift, width))
        }
        TypeClass::List | TypeClass::EndOfMessage => Err(DecodeError::InvalidTag(first)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Result<DecodedNode, DecodeError> {
        decode_node(&mut Cursor::new(bytes))
    }

    #[test]
    fn test_unsigned_widths() {
        assert_eq!(decode(&[0x62, 0x1E]), Ok(DecodedNode::Unsigned(30, 1)));
        assert_eq!(decode(&[0x63, 0x01, 0x01]), Ok(DecodedNode::Unsigned(0x0101, 2)));
        assert_eq!(
            decode(&[0x65, 0x00, 0x00, 0x30, 0x39]),
            Ok(DecodedNode::Unsigned(12345, 4))
        );
    }

    #[test]
    fn test_integer_sign_extension() {
        assert_eq!(decode(&[0x52, 0xFF]), Ok(DecodedNode::Integer(-1, 1)));
        assert_eq!(decode(&[0x53, 0xFF, 0x38]), Ok(DecodedNode::Integer(-200, 2)));
        assert_eq!(decode(&[0x52, 0x7F]), Ok(DecodedNode::Integer(127, 1)));
        // five-byte integers occur in the wild
        assert_eq!(
            decode(&[0x56, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE]),
            Ok(DecodedNode::Integer(-2, 5))
        );
    }

    #[test]
    fn test_eight_byte_integer() {
        let bytes = [0x59, 0x80, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(decode(&bytes), Ok(DecodedNode::Integer(i64::MIN, 8)));
    }

    #[test]
    fn test_boolean() {
        assert_eq!(decode(&[0x42, 0x00]), Ok(DecodedNode::Boolean(false)));
        assert_eq!(decode(&[0x42, 0x05]), Ok(DecodedNode::Boolean(true)));
        assert_eq!(decode(&[0x43, 0x00, 0x00]), Err(DecodeError::InvalidTag(0x43)));
    }

    #[test]
    fn test_octet_string_and_optional() {
        assert_eq!(
            decode(&[0x03, 0xAB, 0xCD]),
            Ok(DecodedNode::OctetString(vec![0xAB, 0xCD]))
        );
        assert_eq!(decode(&[0x01]), Ok(DecodedNode::Optional));
    }

    #[test]
    fn test_multi_byte_length() {
        // 0x81 0x02 -> total length 0x12 = 18, two TL bytes, 16 payload bytes
        let mut bytes = vec![0x81, 0x02];
        bytes.extend_from_slice(&[0x55; 16]);
        assert_eq!(decode(&bytes), Ok(DecodedNode::OctetString(vec![0x55; 16])));
    }

    #[test]
    fn test_multi_byte_list_count() {
        // 0xF1 0x01 -> 17 elements
        let mut bytes = vec![0xF1, 0x01];
        bytes.extend_from_slice(&[0x01; 17]);
        match decode(&bytes) {
            Ok(DecodedNode::List(children)) => assert_eq!(children.len(), 17),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_end_of_message() {
        assert_eq!(decode(&[0x00]), Ok(DecodedNode::EndOfMessage));
    }

    #[test]
    fn test_invalid_type_bits() {
        assert_eq!(decode(&[0x12]), Err(DecodeError::InvalidTag(0x12)));
        assert_eq!(decode(&[0x82, 0x13]), Err(DecodeError::InvalidTag(0x13)));
    }

    #[test]
    fn test_length_smaller_than_tl() {
        assert_eq!(decode(&[0x80, 0x01]), Err(DecodeError::InvalidTag(0x80)));
    }

    #[test]
    fn test_zero_width_number() {
        assert_eq!(decode(&[0x61]), Err(DecodeError::InvalidTag(0x61)));
    }

    #[test]
    fn test_number_too_wide() {
        let mut bytes = vec![0x6A];
        bytes.extend_from_slice(&[0x00; 9]);
        assert_eq!(decode(&bytes), Err(DecodeError::LengthOverflow));
    }

    #[test]
    fn test_length_overflow() {
        let bytes = [0x8F, 0x8F, 0x8F, 0x8F, 0x8F, 0x8F, 0x8F, 0x8F, 0x0F];
        assert_eq!(decode(&bytes), Err(DecodeError::LengthOverflow));
    }

    #[test]
    fn test_truncated_payload() {
        assert_eq!(decode(&[0x65, 0x00, 0x01]), Err(DecodeError::UnexpectedEndOfInput));
        assert_eq!(decode(&[0x81]), Err(DecodeError::UnexpectedEndOfInput));
        assert_eq!(decode(&[]), Err(DecodeError::UnexpectedEndOfInput));
    }

    #[test]
    fn test_nesting_limit() {
        let bytes = [0x71, 0x71, 0x71, 0x01];
        assert_eq!(
            decode_node_with_depth(&mut Cursor::new(&bytes), 2),
            Err(DecodeError::NestingTooDeep(2))
        );
        assert!(decode_node_with_depth(&mut Cursor::new(&bytes), 3).is_ok());
    }

    #[test]
    fn test_cursor_position_after_node() {
        let bytes = [0x62, 0x01, 0x62, 0x02];
        let mut cursor = Cursor::new(&bytes);
        decode_node(&mut cursor).unwrap();
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.peek(), Some(0x62));
    }
}
