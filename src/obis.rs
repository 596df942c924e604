//! OBIS object identifiers.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::constants::SML_OBIS_LEN;

/// An OBIS code, the six-byte register identifier carried in a list entry's
/// object name.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObisCode {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub f: u8,
}

impl ObisCode {
    pub const fn new(a: u8, b: u8, c: u8, d: u8, e: u8, f: u8) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Builds a code from an object name; `None` unless it is exactly six bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; SML_OBIS_LEN] = bytes.try_into().ok()?;
        Some(Self::from(bytes))
    }

    pub fn to_bytes(&self) -> [u8; SML_OBIS_LEN] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}

impl From<[u8; SML_OBIS_LEN]> for ObisCode {
    fn from([a, b, c, d, e, f]: [u8; SML_OBIS_LEN]) -> Self {
        Self::new(a, b, c, d, e, f)
    }
}

impl Display for ObisCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}:{}.{}.{}*{}", self.a, self.b, self.c, self.d, self.e, self.f)
    }
}

impl Debug for ObisCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ObisCode({})", self)
    }
}

impl Serialize for ObisCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid OBIS code: {0}")]
pub struct ParseObisError(String);

impl FromStr for ObisCode {
    type Err = ParseObisError;

    /// Parses `A-B:C.D.E*F`; the `*F` group may be omitted and defaults to 255.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseObisError(s.to_string());
        let (ab, rest) = s.split_once(':').ok_or_else(err)?;
        let (a, b) = ab.split_once('-').ok_or_else(err)?;
        let (cde, f) = match rest.split_once('*') {
            Some((cde, f)) => (cde, f),
            None => (rest, "255"),
        };
        let mut groups = cde.split('.');
        let (Some(c), Some(d), Some(e), None) =
            (groups.next(), groups.next(), groups.next(), groups.next())
        else {
            return Err(err());
        };

        let mut bytes = [0u8; SML_OBIS_LEN];
        for (slot, part) in bytes.iter_mut().zip([a, b, c, d, e, f]) {
            *slot = part.trim().parse().map_err(|_| err())?;
        }
        Ok(Self::from(bytes))
    }
}
