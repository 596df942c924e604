//! A single SML message.

use crate::constants::SML_MESSAGE_FIELDS;
use crate::error::DecodeError;
use crate::message::body::{MessageBody, MessageTag};
use crate::message::schema::{expect_fields, mismatch, octet_string, unsigned};
use crate::payload::DecodedNode;
use crate::transport::crc::message_crc;

/// Position of the crc16 field inside a message list.
const CRC_FIELD: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmlMessage {
    pub transaction_id: Vec<u8>,
    pub group_no: u8,
    pub abort_on_error: u8,
    pub body: MessageBody,
    pub crc: u16,
}

impl SmlMessage {
    pub fn tag(&self) -> MessageTag {
        self.body.tag()
    }

    pub(crate) fn from_node(node: DecodedNode) -> Result<Self, DecodeError> {
        let [transaction_id, group_no, abort_on_error, body, crc, end] =
            expect_fields::<SML_MESSAGE_FIELDS>(node, "SML_Message")?;

        let message = SmlMessage {
            transaction_id: octet_string(transaction_id, "transactionId")?,
            group_no: unsigned(group_no, "groupNo")?,
            abort_on_error: unsigned(abort_on_error, "abortOnError")?,
            body: MessageBody::from_node(body)?,
            crc: unsigned(crc, "crc16")?,
        };

        match end {
            DecodedNode::EndOfMessage => Ok(message),
            other => Err(mismatch("endOfSmlMsg", "end of message", &other)),
        }
    }
}

/// Checks the crc16 field of a decoded message against its wire bytes.
///
/// `raw` holds the complete encoded message. The checksum covers everything
/// before the crc16 field, which sits in front of the one-byte end marker.
pub(crate) fn verify_crc(node: &DecodedNode, raw: &[u8]) -> Result<(), DecodeError> {
    let (expected, width) = match node {
        DecodedNode::List(fields) => match fields.get(CRC_FIELD) {
            Some(DecodedNode::Unsigned(value, width)) => (*value, usize::from(*width)),
            Some(other) => return Err(mismatch("crc16", "unsigned", other)),
            None => return Ok(()),
        },
        _ => return Ok(()),
    };

    let covered = raw
        .len()
        .checked_sub(width + 2)
        .ok_or(DecodeError::UnexpectedEndOfInput)?;
    let calculated = message_crc(&raw[..covered]);
    let expected = u16::try_from(expected)
        .map_err(|_| DecodeError::schema(format!("crc16: value {expected} out of range")))?;

    if expected != calculated {
        return Err(DecodeError::MessageChecksum {
            expected,
            calculated,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::to_bytes;

    fn close_message(crc: u64) -> DecodedNode {
        DecodedNode::List(vec![
            DecodedNode::OctetString(vec![0x01, 0x02]),
            DecodedNode::Unsigned(0, 1),
            DecodedNode::Unsigned(0, 1),
            DecodedNode::List(vec![
                DecodedNode::Unsigned(0x0201, 2),
                DecodedNode::List(vec![DecodedNode::Optional]),
            ]),
            DecodedNode::Unsigned(crc, 2),
            DecodedNode::EndOfMessage,
        ])
    }

    #[test]
    fn test_from_node() {
        let message = SmlMessage::from_node(close_message(0x1234)).unwrap();
        assert_eq!(message.transaction_id, vec![0x01, 0x02]);
        assert_eq!(message.crc, 0x1234);
        assert_eq!(message.tag(), MessageTag::CloseResponse);
    }

    #[test]
    fn test_missing_end_of_message() {
        let mut node = close_message(0);
        if let DecodedNode::List(fields) = &mut node {
            fields[5] = DecodedNode::Optional;
        }
        assert!(matches!(
            SmlMessage::from_node(node),
            Err(DecodeError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_verify_crc() {
        let raw = to_bytes(&close_message(0));
        // crc16 field is 3 bytes, end marker 1 byte
        let calculated = message_crc(&raw[..raw.len() - 4]);

        let good = close_message(u64::from(calculated));
        let raw = to_bytes(&good);
        assert_eq!(verify_crc(&good, &raw), Ok(()));

        let bad = close_message(u64::from(calculated ^ 0x0101));
        let raw = to_bytes(&bad);
        assert_eq!(
            verify_crc(&bad, &raw),
            Err(DecodeError::MessageChecksum {
                expected: calculated ^ 0x0101,
                calculated
            })
        );
    }
}
