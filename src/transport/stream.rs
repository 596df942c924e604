//! # Datagram Scanner
//!
//! Finds SML datagrams in a continuous byte stream. Bytes that do not belong to
//! a datagram are skipped; after a malformed datagram the scanner moves one byte
//! forward and searches for the next start sequence, so a single corrupt
//! transmission never ends the stream.

use std::time::Duration;

use crate::constants::SML_START_SEQUENCE;
use crate::error::FrameError;
use crate::transport::frame::{parse_datagram, Payload};
use crate::util::logging::{log_frame_hex, LogThrottle};

/// Iterator over the datagrams contained in a byte buffer.
///
/// Yields `Ok(payload)` for each valid datagram and `Err(FrameError)` for each
/// start sequence that did not lead to a valid datagram.
#[derive(Debug)]
pub struct DatagramScanner<'a> {
    input: &'a [u8],
    position: usize,
    throttle: LogThrottle,
}

impl<'a> DatagramScanner<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            position: 0,
            throttle: LogThrottle::new(Duration::from_secs(1), 5),
        }
    }

    /// Offset of the next byte the scanner will look at.
    pub fn position(&self) -> usize {
        self.position
    }

    fn find_start(&self) -> Option<usize> {
        self.input[self.position..]
            .windows(SML_START_SEQUENCE.len())
            .position(|window| window == SML_START_SEQUENCE)
            .map(|offset| self.position + offset)
    }
}

impl Iterator for DatagramScanner<'_> {
    type Item = Result<Payload, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        let Some(start) = self.find_start() else {
            if self.position < self.input.len() {
                log::debug!(
                    "Discarding {} bytes without start sequence",
                    self.input.len() - self.position
                );
                self.position = self.input.len();
            }
            return None;
        };

        if start > self.position {
            log::debug!("Skipped {} bytes before start sequence", start - self.position);
        }

        match parse_datagram(&self.input[start..]) {
            Ok((consumed, payload)) => {
                log_frame_hex("SML datagram", &self.input[start..start + consumed]);
                self.position = start + consumed;
                Some(Ok(payload))
            }
            Err(err) => {
                if self.throttle.allow() {
                    let suppressed = self.throttle.take_suppressed();
                    if suppressed > 0 {
                        log::warn!("{suppressed} resync warnings suppressed");
                    }
                    log::warn!("Malformed datagram at offset {start}: {err}, resynchronizing");
                }
                self.position = start + 1;
                Some(Err(err))
            }
        }
    }
}
