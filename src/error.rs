//! # SML Error Handling
//!
//! This module defines the error enums for the sml-decoder crate. Each pipeline
//! stage has its own error type: [`FrameError`] for the transport envelope and
//! [`DecodeError`] for the TLV payload and the message schema. [`SmlError`]
//! wraps both for callers that drive the whole pipeline.

use thiserror::Error;

/// Errors raised while stripping the SML transport envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The input does not begin with the start escape sequence.
    #[error("Missing start escape sequence")]
    MissingStartMarker,

    /// The input ended on a block boundary before an end escape sequence.
    #[error("Missing end escape sequence")]
    MissingEndMarker,

    /// The transmitted checksum does not match the computed one.
    #[error("Invalid checksum: expected 0x{expected:04X}, calculated 0x{calculated:04X}")]
    ChecksumMismatch { expected: u16, calculated: u16 },

    /// The input ended inside a block or inside the end sequence.
    #[error("Truncated datagram")]
    Truncated,

    /// An escape sequence with an unknown payload was found in the body.
    #[error("Unknown escape sequence: {0:02X?}")]
    InvalidEscape([u8; 4]),

    /// The fill-byte count is out of range.
    #[error("Invalid padding count: {0}")]
    InvalidPadding(u8),

    /// Bytes remain after a complete datagram.
    #[error("{0} trailing bytes after datagram")]
    TrailingBytes(usize),
}

/// Errors raised while decoding the TLV payload or mapping it onto SML messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload ended before a node was complete.
    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,

    /// A type-length byte has an unknown type or an impossible length.
    #[error("Invalid type-length byte: 0x{0:02X}")]
    InvalidTag(u8),

    /// A length field does not fit the supported range.
    #[error("Length overflow")]
    LengthOverflow,

    /// Lists are nested deeper than the configured limit.
    #[error("Nesting deeper than {0} levels")]
    NestingTooDeep(usize),

    /// A decoded node does not match the SML message schema.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The message crc16 field does not match the message bytes.
    #[error("Invalid message checksum: expected 0x{expected:04X}, calculated 0x{calculated:04X}")]
    MessageChecksum { expected: u16, calculated: u16 },
}

impl DecodeError {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        DecodeError::SchemaMismatch(message.into())
    }

    /// Returns `true` if the error leaves the message boundaries intact, so
    /// decoding can continue with the next message in the same file.
    pub fn is_message_local(&self) -> bool {
        matches!(
            self,
            DecodeError::SchemaMismatch(_) | DecodeError::MessageChecksum { .. }
        )
    }
}

/// Umbrella error for the complete decode pipeline.
#[derive(Debug, Error)]
pub enum SmlError {
    #[error("Transport error: {0}")]
    Frame(#[from] FrameError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
