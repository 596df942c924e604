//! # Reading Extractor
//!
//! Turns the list entries of every GetList response into flat [`Reading`]
//! values. Extraction borrows the file, so it can be run any number of times.
//!
//! ```rust
//! use sml_decoder::obis::ObisCode;
//! use sml_decoder::reading::{Reading, ReadingKind};
//!
//! let reading = Reading {
//!     obis: ObisCode::new(1, 0, 1, 8, 0, 255),
//!     kind: ReadingKind::Scaled { raw: 12345, scaler: -1, unit: Some(30) },
//! };
//! assert_eq!(reading.to_string(), "1-0:1.8.0*255#1234.5#Wh");
//! ```

use std::fmt;
use std::slice;

use serde::Serialize;

use crate::message::{ListEntry, MessageBody, SmlFile, SmlMessage, SmlValue};
use crate::obis::ObisCode;
use crate::units::unit_name;
use crate::util::hex::encode_hex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReadingKind {
    OctetString(Vec<u8>),
    Boolean(bool),
    /// Physical value `raw * 10^scaler`.
    Scaled {
        raw: i64,
        scaler: i8,
        unit: Option<u8>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reading {
    pub obis: ObisCode,
    pub kind: ReadingKind,
}

impl Reading {
    /// Builds a reading from a list entry, `None` if the entry carries no
    /// usable value.
    pub fn from_entry(entry: &ListEntry) -> Option<Self> {
        let obis = entry.obj_name;
        let kind = match entry.value.as_ref() {
            None => {
                log::warn!("Skipping {obis}: no value");
                return None;
            }
            Some(SmlValue::OctetString(bytes)) => ReadingKind::OctetString(bytes.clone()),
            Some(SmlValue::Boolean(value)) => ReadingKind::Boolean(*value),
            Some(SmlValue::Integer(raw)) => ReadingKind::Scaled {
                raw: *raw,
                scaler: entry.scaler.unwrap_or(0),
                unit: entry.unit,
            },
            Some(SmlValue::Unsigned(raw)) => match i64::try_from(*raw) {
                Ok(raw) => ReadingKind::Scaled {
                    raw,
                    scaler: entry.scaler.unwrap_or(0),
                    unit: entry.unit,
                },
                Err(_) => {
                    log::warn!("Skipping {obis}: value {raw} out of range");
                    return None;
                }
            },
        };
        Some(Reading { obis, kind })
    }

    /// The scaled value of a numeric reading.
    pub fn value(&self) -> Option<f64> {
        match self.kind {
            ReadingKind::Scaled { raw, scaler, .. } => {
                Some(raw as f64 * 10f64.powi(i32::from(scaler)))
            }
            _ => None,
        }
    }

    /// Number of decimals shown for a numeric reading.
    pub fn precision(&self) -> usize {
        match self.kind {
            ReadingKind::Scaled { scaler, .. } if scaler < 0 => usize::from(scaler.unsigned_abs()),
            _ => 0,
        }
    }

    pub fn unit_name(&self) -> Option<&'static str> {
        match self.kind {
            ReadingKind::Scaled {
                unit: Some(code), ..
            } => unit_name(code),
            _ => None,
        }
    }

    /// The value as shown in the `A-B:C.D.E*F#value#unit` line.
    pub fn formatted_value(&self) -> String {
        match &self.kind {
            ReadingKind::OctetString(bytes) => encode_hex(bytes),
            ReadingKind::Boolean(value) => value.to_string(),
            ReadingKind::Scaled { .. } => {
                let value = self.value().unwrap_or_default();
                format!("{value:.precision$}", precision = self.precision())
            }
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{}#{}",
            self.obis,
            self.formatted_value(),
            self.unit_name().unwrap_or_default()
        )
    }
}

/// Iterator over the readings of a file, in wire order.
#[derive(Debug, Clone)]
pub struct Readings<'a> {
    messages: slice::Iter<'a, SmlMessage>,
    entries: slice::Iter<'a, ListEntry>,
}

impl Iterator for Readings<'_> {
    type Item = Reading;

    fn next(&mut self) -> Option<Reading> {
        loop {
            for entry in self.entries.by_ref() {
                if let Some(reading) = Reading::from_entry(entry) {
                    return Some(reading);
                }
            }
            let message = self.messages.next()?;
            if let MessageBody::GetListResponse(response) = &message.body {
                self.entries = response.val_list.iter();
            }
        }
    }
}

/// Lazily extracts the readings of every GetList response in `file`.
pub fn extract(file: &SmlFile) -> Readings<'_> {
    Readings {
        messages: file.messages.iter(),
        entries: <&[ListEntry]>::default().iter(),
    }
}
