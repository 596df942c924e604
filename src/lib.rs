//! # sml-decoder - A Rust Crate for SML (Smart Message Language) Datagrams
//!
//! The sml-decoder crate decodes the binary SML protocol spoken by German
//! electricity meters (BSI TR-03109-1) and extracts their register readings as
//! OBIS-coded values.
//!
//! ## Features
//!
//! - Strip and verify the SML transport v1 envelope (escape sequences, CRC-16/X-25)
//! - Scan continuous byte streams for datagrams and resynchronize after corruption
//! - Decode the type-length-value payload into a generic node tree
//! - Map nodes onto typed messages (PublicOpen, PublicClose, GetList responses)
//! - Extract scaled readings with DLMS/COSEM units
//!
//! ## Usage
//!
//! ```rust
//! use sml_decoder::{extract, SmlDecoder};
//!
//! fn print_readings(datagram: &[u8]) -> Result<(), sml_decoder::SmlError> {
//!     let file = SmlDecoder::default().decode_datagram(datagram)?;
//!     for reading in extract(&file) {
//!         println!("{reading}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod capture;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod logging;
pub mod message;
pub mod obis;
pub mod payload;
pub mod reading;
pub mod transport;
pub mod units;
pub mod util;

pub use crate::config::{DecoderConfig, Framing};
pub use crate::decoder::SmlDecoder;
pub use crate::error::{DecodeError, FrameError, SmlError};
pub use crate::logging::{init_logger, log_info};
pub use crate::message::{build_file, MessageBody, MessageTag, SmlFile, SmlMessage};
pub use crate::obis::ObisCode;
pub use crate::payload::{decode_node, Cursor, DecodedNode};
pub use crate::reading::{extract, Reading, ReadingKind, Readings};
pub use crate::transport::{frame, wrap, DatagramScanner, Payload};
pub use crate::units::unit_name;
