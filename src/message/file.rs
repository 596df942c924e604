//! # SML File Builder
//!
//! An SML file is the de-framed payload of one datagram: a sequence of
//! message lists, optionally separated by zero padding bytes. Each message is
//! decoded into a generic node first and then mapped onto [`SmlMessage`].
//!
//! Errors are kept as local as the byte layout allows. A schema mismatch or a
//! failed message checksum leaves the message boundaries intact, so only that
//! message is rejected. A broken type-length field leaves no way to find the
//! next message; decoding stops there and the messages read so far are kept.

use std::fmt;

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::message::sml_message::{verify_crc, SmlMessage};
use crate::payload::{decode_node_with_depth, Cursor};
use crate::reading::{extract, Readings};

/// A message that was skipped while building a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedMessage {
    /// Position of the message in the file, counting rejected ones.
    pub index: usize,
    /// Byte offset of the message inside the payload.
    pub offset: usize,
    pub error: DecodeError,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SmlFile {
    pub messages: Vec<SmlMessage>,
    pub rejected: Vec<RejectedMessage>,
    /// Payload length in bytes.
    pub len: usize,
}

impl SmlFile {
    /// Builds a file with the default configuration.
    pub fn parse(payload: &[u8]) -> Result<Self, DecodeError> {
        Self::parse_with_config(payload, &DecoderConfig::default())
    }

    /// Builds a file from a de-framed payload.
    ///
    /// Fails only if the first message cannot be delimited. Later failures
    /// are recorded in [`SmlFile::rejected`].
    pub fn parse_with_config(payload: &[u8], config: &DecoderConfig) -> Result<Self, DecodeError> {
        let mut cursor = Cursor::new(payload);
        let mut file = SmlFile {
            len: payload.len(),
            ..Default::default()
        };
        let mut index = 0;

        loop {
            skip_padding(&mut cursor)?;
            if cursor.is_empty() {
                break;
            }

            let offset = cursor.position();
            let node = match decode_node_with_depth(&mut cursor, config.max_depth) {
                Ok(node) => node,
                Err(err) if index == 0 => return Err(err),
                Err(err) => {
                    log::warn!("could not read the whole file: {err} at offset {offset}");
                    file.rejected.push(RejectedMessage {
                        index,
                        offset,
                        error: err,
                    });
                    break;
                }
            };

            let raw = &payload[offset..cursor.position()];
            let checked = if config.verify_message_crc {
                verify_crc(&node, raw)
            } else {
                Ok(())
            };

            match checked.and_then(|()| SmlMessage::from_node(node)) {
                Ok(message) => {
                    log::debug!("SML message {} at offset {offset}", message.tag().name());
                    file.messages.push(message);
                }
                Err(err) => {
                    log::warn!("Rejected SML message {index} at offset {offset}: {err}");
                    file.rejected.push(RejectedMessage {
                        index,
                        offset,
                        error: err,
                    });
                }
            }
            index += 1;
        }

        if index == 0 {
            return Err(DecodeError::UnexpectedEndOfInput);
        }
        Ok(file)
    }

    /// `true` if no message was rejected.
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Readings of every GetList response in the file.
    pub fn readings(&self) -> Readings<'_> {
        extract(self)
    }
}

/// Builds a file with the default configuration.
pub fn build_file(payload: &[u8]) -> Result<SmlFile, DecodeError> {
    SmlFile::parse(payload)
}

fn skip_padding(cursor: &mut Cursor<'_>) -> Result<(), DecodeError> {
    while cursor.peek() == Some(0x00) {
        cursor.read_u8()?;
    }
    Ok(())
}

impl fmt::Display for SmlFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "SML file ({} SML messages, {} bytes)",
            self.messages.len(),
            self.len
        )?;
        for message in &self.messages {
            writeln!(f, "SML message {}", message.tag())?;
        }
        for rejected in &self.rejected {
            writeln!(
                f,
                "rejected message {} at offset {}: {}",
                rejected.index, rejected.offset, rejected.error
            )?;
        }
        Ok(())
    }
}
