//! # Utility Modules
//!
//! Common helpers used throughout the sml-decoder crate: hex encoding and
//! decoding, and rate-limited logging for stream resynchronization.

pub mod hex;
pub mod logging;

pub use hex::{decode_hex, encode_hex, format_hex_compact, parse_hex_lenient, pretty_hex, HexError};
pub use logging::{log_frame_hex, LogThrottle};
