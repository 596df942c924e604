//! CRC-16/X-25 as used by the SML transport envelope and the per-message
//! crc16 field.

use crc::{Crc, CRC_16_IBM_SDLC};

const X25: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_SDLC);

/// Computes the CRC-16/X-25 checksum of `data`.
pub fn crc16_x25(data: &[u8]) -> u16 {
    X25.checksum(data)
}

/// Computes the value an SML message carries in its crc16 field.
///
/// The message checksum is transmitted as a big-endian unsigned number holding
/// the byte-swapped CRC, so the bytes on the wire match the little-endian
/// transport checksum.
pub fn message_crc(data: &[u8]) -> u16 {
    crc16_x25(data).swap_bytes()
}
