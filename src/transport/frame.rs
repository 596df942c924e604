//! # SML Transport Framer
//!
//! This module strips and builds the SML transport v1 envelope. A datagram on
//! the wire looks like this:
//!
//! ```text
//! 1B 1B 1B 1B 01 01 01 01   start sequence
//! .. .. .. ..               body, in 4-byte blocks, escape blocks doubled
//! 1B 1B 1B 1B 1A nn cc cc   end sequence, fill count, CRC-16/X-25 (LE)
//! ```
//!
//! The checksum covers every byte from the start sequence up to and including
//! the fill count. The last `nn` body bytes are zero padding that aligns the
//! body to the block size.
//!
//! ## Usage
//!
//! ```rust
//! use sml_decoder::transport::frame::{frame, wrap};
//!
//! let payload = [0x76, 0x05, 0x01, 0x02, 0x03, 0x04];
//! let datagram = wrap(&payload);
//! assert_eq!(&frame(&datagram).unwrap()[..], &payload[..]);
//! ```

use crate::constants::{
    SML_BLOCK_SIZE, SML_END_MARKER, SML_ESCAPE, SML_MAX_FILL, SML_START_SEQUENCE,
};
use crate::error::FrameError;
use crate::transport::crc::crc16_x25;
use bytes::{BufMut, Bytes, BytesMut};
use nom::{
    bytes::complete::{tag, take},
    number::complete::{be_u8, le_u16},
    sequence::tuple,
    IResult,
};

/// De-framed payload, ready for TLV decoding.
pub type Payload = Bytes;

/// Strips the transport envelope from exactly one datagram.
///
/// Unlike [`parse_datagram`], bytes following the checksum are rejected, so a
/// buffer that is larger than its datagram is never silently cut short.
pub fn frame(raw: &[u8]) -> Result<Payload, FrameError> {
    let (consumed, payload) = parse_datagram(raw)?;
    if consumed != raw.len() {
        return Err(FrameError::TrailingBytes(raw.len() - consumed));
    }
    Ok(payload)
}

/// Parses the datagram at the start of `input`.
///
/// Returns the number of bytes the datagram occupies and its payload.
pub fn parse_datagram(input: &[u8]) -> Result<(usize, Payload), FrameError> {
    let mut rest = parse_start_sequence(input)?;
    let mut body = BytesMut::with_capacity(input.len());

    loop {
        let (after, block) = match take_block(rest) {
            Ok(parsed) => parsed,
            Err(_) if rest.is_empty() => return Err(FrameError::MissingEndMarker),
            Err(_) => return Err(FrameError::Truncated),
        };

        if block != SML_ESCAPE {
            body.put_slice(block);
            rest = after;
            continue;
        }

        let (after, control) = take_block(after).map_err(|_| FrameError::Truncated)?;
        if control == SML_ESCAPE {
            body.put_slice(&SML_ESCAPE);
            rest = after;
            continue;
        }

        let (fill, expected) = parse_end_control(control)?;
        let consumed = input.len() - after.len();
        let calculated = crc16_x25(&input[..consumed - 2]);
        if expected != calculated {
            return Err(FrameError::ChecksumMismatch {
                expected,
                calculated,
            });
        }

        if fill > SML_MAX_FILL || usize::from(fill) > body.len() {
            return Err(FrameError::InvalidPadding(fill));
        }
        body.truncate(body.len() - usize::from(fill));

        return Ok((consumed, body.freeze()));
    }
}

/// Wraps a payload into a transport v1 datagram.
///
/// Pads the body to the block size, doubles escape blocks and appends the
/// end sequence with a freshly computed checksum.
pub fn wrap(payload: &[u8]) -> Bytes {
    let fill = (SML_BLOCK_SIZE - payload.len() % SML_BLOCK_SIZE) % SML_BLOCK_SIZE;
    let mut padded = payload.to_vec();
    padded.resize(payload.len() + fill, 0x00);

    let mut buf = BytesMut::with_capacity(padded.len() + 2 * SML_START_SEQUENCE.len());
    buf.put_slice(&SML_START_SEQUENCE);
    for block in padded.chunks(SML_BLOCK_SIZE) {
        if block == SML_ESCAPE {
            buf.put_slice(&SML_ESCAPE);
        }
        buf.put_slice(block);
    }
    buf.put_slice(&SML_ESCAPE);
    buf.put_u8(SML_END_MARKER);
    buf.put_u8(fill as u8);

    let crc = crc16_x25(&buf);
    buf.put_u16_le(crc);
    buf.freeze()
}

/// Checks the start sequence and returns the input behind it.
fn parse_start_sequence(input: &[u8]) -> Result<&[u8], FrameError> {
    let result: IResult<&[u8], &[u8]> = tag(&SML_START_SEQUENCE[..])(input);
    match result {
        Ok((rest, _)) => Ok(rest),
        Err(_) if input.len() < SML_START_SEQUENCE.len() && SML_START_SEQUENCE.starts_with(input) => {
            Err(FrameError::Truncated)
        }
        Err(_) => Err(FrameError::MissingStartMarker),
    }
}

fn take_block(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take(SML_BLOCK_SIZE)(input)
}

/// Splits the block following an end escape into fill count and checksum.
fn parse_end_control(control: &[u8]) -> Result<(u8, u16), FrameError> {
    let parsed: IResult<&[u8], (u8, u8, u16)> = tuple((be_u8, be_u8, le_u16))(control);
    match parsed {
        Ok((_, (SML_END_MARKER, fill, crc))) => Ok((fill, crc)),
        Ok(_) => {
            let mut sequence = [0u8; 4];
            sequence.copy_from_slice(control);
            Err(FrameError::InvalidEscape(sequence))
        }
        Err(_) => Err(FrameError::Truncated),
    }
}
