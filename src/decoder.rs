//! # Decode Pipeline
//!
//! [`SmlDecoder`] runs the stages in order: transport framing, TLV decoding,
//! message building. Each call is independent; the decoder keeps no state
//! between datagrams and can be shared freely.
//!
//! ```rust
//! use sml_decoder::{DecoderConfig, SmlDecoder};
//!
//! let decoder = SmlDecoder::new(DecoderConfig::default());
//! let files = decoder.decode_stream(&[0x00, 0x01, 0x02]);
//! assert!(files.is_empty());
//! ```

use crate::config::{DecoderConfig, Framing};
use crate::error::{DecodeError, SmlError};
use crate::message::SmlFile;
use crate::transport::{frame, DatagramScanner};

#[derive(Debug, Clone, Default)]
pub struct SmlDecoder {
    config: DecoderConfig,
}

impl SmlDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes one complete datagram.
    ///
    /// With [`Framing::Raw`] the buffer is taken as an already de-framed
    /// payload.
    pub fn decode_datagram(&self, raw: &[u8]) -> Result<SmlFile, SmlError> {
        match self.config.framing {
            Framing::Transport => {
                let payload = frame(raw)?;
                Ok(self.decode_payload(&payload)?)
            }
            Framing::Raw => Ok(self.decode_payload(raw)?),
        }
    }

    /// Builds a file from a de-framed payload.
    pub fn decode_payload(&self, payload: &[u8]) -> Result<SmlFile, DecodeError> {
        SmlFile::parse_with_config(payload, &self.config)
    }

    /// Decodes every datagram found in `buf`, skipping bytes between them.
    ///
    /// A malformed datagram yields an error entry and scanning resumes at the
    /// next start sequence. With [`Framing::Raw`] the whole buffer is one
    /// payload.
    pub fn decode_stream(&self, buf: &[u8]) -> Vec<Result<SmlFile, SmlError>> {
        if self.config.framing == Framing::Raw {
            return vec![self.decode_payload(buf).map_err(SmlError::from)];
        }

        DatagramScanner::new(buf)
            .map(|datagram| {
                let payload = datagram?;
                self.decode_payload(&payload).map_err(|err| {
                    log::warn!("Dropping datagram: {err}");
                    SmlError::from(err)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;
    use crate::transport::wrap;

    // SML_PublicClose.Res without signature, crc16 left at zero
    const CLOSE: [u8; 17] = [
        0x76, 0x02, 0x01, 0x62, 0x00, 0x62, 0x00, 0x72, 0x63, 0x02, 0x01, 0x71, 0x01, 0x63, 0x00,
        0x00, 0x00,
    ];

    fn close_payload() -> Vec<u8> {
        CLOSE.to_vec()
    }

    #[test]
    fn test_decode_datagram() {
        let decoder = SmlDecoder::default();
        let file = decoder.decode_datagram(&wrap(&close_payload())).unwrap();
        assert_eq!(file.messages.len(), 1);
    }

    #[test]
    fn test_raw_framing() {
        let decoder = SmlDecoder::new(DecoderConfig::default().with_framing(Framing::Raw));
        assert_eq!(decoder.config().framing, Framing::Raw);
        assert_eq!(decoder.decode_datagram(&close_payload()).unwrap().messages.len(), 1);

        let framed = SmlDecoder::default();
        assert!(matches!(
            framed.decode_datagram(&close_payload()),
            Err(SmlError::Frame(FrameError::MissingStartMarker))
        ));
    }

    #[test]
    fn test_stream_resynchronizes() {
        let datagram = wrap(&close_payload());
        let mut corrupt = datagram.to_vec();
        let last = corrupt.len() - 1;
        corrupt[last] ^= 0xFF;

        let mut buf = vec![0x55; 3];
        buf.extend_from_slice(&corrupt);
        buf.extend_from_slice(&datagram);

        let results = SmlDecoder::default().decode_stream(&buf);
        assert!(results[0].is_err());
        assert!(results.last().unwrap().is_ok());
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    }
}
