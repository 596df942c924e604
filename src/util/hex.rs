//! # Hex Encoding/Decoding Utilities
//!
//! Hex helpers used for octet-string rendering, hex input on the command line
//! and datagram dumps in debug logs.
//!
//! ## Usage
//!
//! ```rust
//! use sml_decoder::util::hex::{encode_hex, decode_hex, pretty_hex};
//!
//! let data = [0x1b, 0x1b, 0x1b, 0x1b];
//! let hex_str = encode_hex(&data);
//! assert_eq!(hex_str, "1b1b1b1b");
//!
//! let decoded = decode_hex(&hex_str).unwrap();
//! assert_eq!(decoded, data);
//!
//! println!("{}", pretty_hex(&data, 16));
//! ```

use std::fmt::Write;

use thiserror::Error;

/// Errors raised while reading hex text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Odd number of hex digits: {0}")]
    OddLength(usize),

    #[error("No hex digits in input")]
    EmptyString,

    #[error("Invalid hex input: {0}")]
    DecodeError(String),
}

impl From<hex::FromHexError> for HexError {
    fn from(err: hex::FromHexError) -> Self {
        HexError::DecodeError(err.to_string())
    }
}

/// Lowercase hex, as octet-string values are printed.
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Decodes hex text, ignoring whitespace. Both cases are accepted.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, HexError> {
    let digits: String = text.split_whitespace().collect();
    decode_digits(&digits)
}

/// Decodes hex pasted from a dump.
///
/// `0x` prefixes are dropped and every character that is not a hex digit is
/// treated as a separator, so `1b-1b-1b-1b` and `0x1b, 0x1b` both work.
pub fn parse_hex_lenient(text: &str) -> Result<Vec<u8>, HexError> {
    let digits: String = text
        .replace("0x", " ")
        .replace("0X", " ")
        .chars()
        .filter(char::is_ascii_hexdigit)
        .collect();
    decode_digits(&digits)
}

fn decode_digits(digits: &str) -> Result<Vec<u8>, HexError> {
    if digits.is_empty() {
        return Err(HexError::EmptyString);
    }
    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength(digits.len()));
    }
    Ok(hex::decode(digits)?)
}

/// Hex dump with offsets and a printable-ASCII column, `width` bytes per line.
pub fn pretty_hex(data: &[u8], width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    for (line, chunk) in data.chunks(width).enumerate() {
        if line > 0 {
            out.push('\n');
        }
        let ascii: String = chunk
            .iter()
            .map(|&b| if b == b' ' || b.is_ascii_graphic() { b as char } else { '.' })
            .collect();
        let _ = write!(
            out,
            "{:04x}: {:<pad$} |{ascii}|",
            line * width,
            format_hex_compact(chunk),
            pad = width * 3 - 1
        );
    }
    out
}

/// Space separated lowercase hex, for log lines.
pub fn format_hex_compact(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 3);
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_lowercase() {
        assert_eq!(encode_hex(&[0xAB, 0xCD, 0xEF]), "abcdef");
    }

    #[test]
    fn test_decode_with_whitespace() {
        let hex = "1b 1b 1b 1b\n01 01 01 01";
        let expected = vec![0x1B, 0x1B, 0x1B, 0x1B, 0x01, 0x01, 0x01, 0x01];
        assert_eq!(decode_hex(hex).unwrap(), expected);
    }

    #[test]
    fn test_pretty_hex() {
        let data = vec![0x1B, 0x1B, 0x1B, 0x1B, 0x01, 0x01, 0x01, 0x01, 0x41];
        let pretty = pretty_hex(&data, 8);
        let lines: Vec<&str> = pretty.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0000: 1b 1b 1b 1b 01 01 01 01"));
        assert!(lines[1].starts_with("0008: 41"));
        assert!(lines[1].ends_with("|A|"));
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_hex_compact(&[0x1B, 0x01, 0x1A]), "1b 01 1a");
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(
            parse_hex_lenient("1b-1b:01 1a").unwrap(),
            vec![0x1B, 0x1B, 0x01, 0x1A]
        );
        assert_eq!(
            parse_hex_lenient("0x1b, 0x01").unwrap(),
            vec![0x1B, 0x01]
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(decode_hex(""), Err(HexError::EmptyString));
        assert_eq!(decode_hex("1"), Err(HexError::OddLength(1)));
        assert!(matches!(decode_hex("GG"), Err(HexError::DecodeError(_))));
        assert_eq!(parse_hex_lenient("zz"), Err(HexError::EmptyString));
    }
}
