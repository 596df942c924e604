//! The generic node tree produced by the TLV decoder.

use std::fmt;

/// One decoded SML value.
///
/// Lists own their children, so a decoded tree is strictly acyclic and is
/// freed as a whole when its root goes out of scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedNode {
    /// Octet string with at least one payload byte.
    OctetString(Vec<u8>),
    Boolean(bool),
    /// Signed integer and its width in bytes.
    Integer(i64, u8),
    /// Unsigned integer and its width in bytes.
    Unsigned(u64, u8),
    List(Vec<DecodedNode>),
    /// The `0x00` end-of-message marker.
    EndOfMessage,
    /// The `0x01` marker of an optional field that is not present.
    Optional,
}

impl DecodedNode {
    /// Short name of the node variant, used in schema error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodedNode::OctetString(_) => "octet string",
            DecodedNode::Boolean(_) => "boolean",
            DecodedNode::Integer(..) => "integer",
            DecodedNode::Unsigned(..) => "unsigned",
            DecodedNode::List(_) => "list",
            DecodedNode::EndOfMessage => "end of message",
            DecodedNode::Optional => "optional",
        }
    }
}

impl fmt::Display for DecodedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedNode::OctetString(bytes) => write!(f, "{}", hex::encode(bytes)),
            DecodedNode::Boolean(value) => write!(f, "{value}"),
            DecodedNode::Integer(value, _) => write!(f, "{value}"),
            DecodedNode::Unsigned(value, _) => write!(f, "{value}"),
            DecodedNode::List(children) => {
                write!(f, "[")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, "]")
            }
            DecodedNode::EndOfMessage => write!(f, "<end>"),
            DecodedNode::Optional => write!(f, "-"),
        }
    }
}
