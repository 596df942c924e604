//! Helpers that map generic nodes onto typed message fields.
//!
//! Every helper consumes its node and names the field in the error, so a
//! schema mismatch tells which part of the message was malformed.

use crate::error::DecodeError;
use crate::payload::DecodedNode;

/// Unpacks a fixed-arity list.
pub(crate) fn expect_fields<const N: usize>(
    node: DecodedNode,
    what: &str,
) -> Result<[DecodedNode; N], DecodeError> {
    match node {
        DecodedNode::List(children) => {
            let found = children.len();
            children.try_into().map_err(|_| {
                DecodeError::schema(format!("{what}: expected {N} fields, found {found}"))
            })
        }
        other => Err(mismatch(what, "list", &other)),
    }
}

/// Unpacks a list of any length.
pub(crate) fn expect_list(node: DecodedNode, what: &str) -> Result<Vec<DecodedNode>, DecodeError> {
    match node {
        DecodedNode::List(children) => Ok(children),
        other => Err(mismatch(what, "list", &other)),
    }
}

/// A mandatory octet string.
pub(crate) fn octet_string(node: DecodedNode, what: &str) -> Result<Vec<u8>, DecodeError> {
    match node {
        DecodedNode::OctetString(bytes) => Ok(bytes),
        other => Err(mismatch(what, "octet string", &other)),
    }
}

/// A mandatory unsigned number narrowed to `T`.
pub(crate) fn unsigned<T: TryFrom<u64>>(node: DecodedNode, what: &str) -> Result<T, DecodeError> {
    match node {
        DecodedNode::Unsigned(value, _) => T::try_from(value)
            .map_err(|_| DecodeError::schema(format!("{what}: value {value} out of range"))),
        other => Err(mismatch(what, "unsigned", &other)),
    }
}

/// A mandatory signed number narrowed to `T`.
pub(crate) fn integer<T: TryFrom<i64>>(node: DecodedNode, what: &str) -> Result<T, DecodeError> {
    match node {
        DecodedNode::Integer(value, _) => T::try_from(value)
            .map_err(|_| DecodeError::schema(format!("{what}: value {value} out of range"))),
        other => Err(mismatch(what, "integer", &other)),
    }
}

/// Applies `parse` unless the node is the optional-absent marker.
pub(crate) fn optional<T>(
    node: DecodedNode,
    parse: impl FnOnce(DecodedNode) -> Result<T, DecodeError>,
) -> Result<Option<T>, DecodeError> {
    match node {
        DecodedNode::Optional => Ok(None),
        other => parse(other).map(Some),
    }
}

pub(crate) fn optional_octet_string(
    node: DecodedNode,
    what: &str,
) -> Result<Option<Vec<u8>>, DecodeError> {
    optional(node, |n| octet_string(n, what))
}

pub(crate) fn mismatch(what: &str, expected: &str, found: &DecodedNode) -> DecodeError {
    DecodeError::schema(format!("{what}: expected {expected}, found {}", found.kind()))
}
