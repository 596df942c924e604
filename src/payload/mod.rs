//! The payload module contains the components responsible for decoding the
//! SML binary value encoding into a generic node tree.

pub mod decoder;
pub mod encode;
pub mod node;

pub use decoder::{decode_node, decode_node_with_depth, parse_type_length, Cursor, TypeClass, TypeLength};
pub use encode::{encode_node, to_bytes};
pub use node::DecodedNode;
