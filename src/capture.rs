//! Capture files recorded from an optical meter head.

use std::fs;
use std::path::Path;

use crate::error::SmlError;

/// Reads a whole capture file into memory.
pub fn read_capture(path: impl AsRef<Path>) -> Result<Vec<u8>, SmlError> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    log::debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Cuts a de-framed capture into fixed-size records.
///
/// A `size` of zero keeps the capture as one record. A short last record is
/// returned as is.
pub fn split_records(data: &[u8], size: usize) -> Vec<&[u8]> {
    if size == 0 || data.is_empty() {
        return vec![data];
    }
    let records: Vec<&[u8]> = data.chunks(size).collect();
    if data.len() % size != 0 {
        log::debug!(
            "Last record is {} bytes, expected {size}",
            data.len() % size
        );
    }
    records
}
