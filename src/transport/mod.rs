//! The transport module contains the components responsible for the SML
//! transport v1 envelope: framing, checksums and stream resynchronization.

pub mod crc;
pub mod frame;
pub mod stream;

pub use crc::{crc16_x25, message_crc};
pub use frame::{frame, parse_datagram, wrap, Payload};
pub use stream::DatagramScanner;
