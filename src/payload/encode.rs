//! Encoder for the SML type-length format.
//!
//! The inverse of [`crate::payload::decoder`]. Used to build datagrams for
//! tests, benchmarks and meter simulators.

use crate::constants::{
    SML_END_OF_MESSAGE, SML_OPTIONAL_SKIPPED, SML_TL_MORE, SML_TYPE_BOOLEAN, SML_TYPE_INTEGER,
    SML_TYPE_LIST, SML_TYPE_OCTET_STRING, SML_TYPE_UNSIGNED,
};
use crate::payload::node::DecodedNode;
use bytes::{BufMut, Bytes, BytesMut};

/// Encodes a node tree into a new buffer.
pub fn to_bytes(node: &DecodedNode) -> Bytes {
    let mut buf = BytesMut::new();
    encode_node(node, &mut buf);
    buf.freeze()
}

/// Appends the encoding of `node` to `buf`.
///
/// Integers are written with the width stored in the node; a value that does
/// not fit that width is truncated to its low-order bytes.
pub fn encode_node(node: &DecodedNode, buf: &mut BytesMut) {
    match node {
        DecodedNode::OctetString(bytes) if bytes.is_empty() => buf.put_u8(SML_OPTIONAL_SKIPPED),
        DecodedNode::OctetString(bytes) => {
            put_type_length(buf, SML_TYPE_OCTET_STRING, bytes.len(), true);
            buf.put_slice(bytes);
        }
        DecodedNode::Boolean(value) => {
            put_type_length(buf, SML_TYPE_BOOLEAN, 1, true);
            buf.put_u8(u8::from(*value));
        }
        DecodedNode::Integer(value, width) => {
            let width = clamp_width(*width);
            put_type_length(buf, SML_TYPE_INTEGER, width, true);
            buf.put_slice(&value.to_be_bytes()[8 - width..]);
        }
        DecodedNode::Unsigned(value, width) => {
            let width = clamp_width(*width);
            put_type_length(buf, SML_TYPE_UNSIGNED, width, true);
            buf.put_slice(&value.to_be_bytes()[8 - width..]);
        }
        DecodedNode::List(children) => {
            put_type_length(buf, SML_TYPE_LIST, children.len(), false);
            for child in children {
                encode_node(child, buf);
            }
        }
        DecodedNode::EndOfMessage => buf.put_u8(SML_END_OF_MESSAGE),
        DecodedNode::Optional => buf.put_u8(SML_OPTIONAL_SKIPPED),
    }
}

fn clamp_width(width: u8) -> usize {
    usize::from(width).clamp(1, 8)
}

/// Writes a TL field. For non-list types the encoded length covers the TL
/// bytes themselves, so the field may need to grow to hold its own size.
fn put_type_length(buf: &mut BytesMut, ty: u8, len: usize, counts_itself: bool) {
    let mut size = 1;
    let value = loop {
        let value = if counts_itself { len + size } else { len };
        if value < 1usize << (4 * size) {
            break value;
        }
        size += 1;
    };

    for i in 0..size {
        let nibble = ((value >> (4 * (size - 1 - i))) & 0x0F) as u8;
        let mut byte = nibble;
        if i == 0 {
            byte |= ty;
        }
        if i + 1 < size {
            byte |= SML_TL_MORE;
        }
        buf.put_u8(byte);
    }
}
