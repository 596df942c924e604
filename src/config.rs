//! Decoder configuration.

use crate::constants::SML_DEFAULT_MAX_DEPTH;

/// How a buffer handed to the decoder is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// Transport v1 envelope with escape sequences and checksum.
    #[default]
    Transport,
    /// Already de-framed payload, as produced by capture tools that strip
    /// the envelope.
    Raw,
}

/// Settings shared by every stage of the decode pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    pub framing: Framing,
    /// Check the crc16 field of every message.
    pub verify_message_crc: bool,
    /// Deepest list nesting accepted by the TLV decoder.
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            framing: Framing::Transport,
            verify_message_crc: false,
            max_depth: SML_DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecoderConfig {
    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    pub fn with_message_crc(mut self, verify: bool) -> Self {
        self.verify_message_crc = verify;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
