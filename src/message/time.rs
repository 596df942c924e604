//! SML_Time values.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::Serialize;

use crate::constants::{SML_TIME_LOCAL_TIMESTAMP, SML_TIME_SEC_INDEX, SML_TIME_TIMESTAMP};
use crate::error::DecodeError;
use crate::message::schema::{expect_fields, integer, mismatch, unsigned};
use crate::payload::DecodedNode;

/// A point in time as transmitted by the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SmlTime {
    /// Seconds since an arbitrary meter-specific epoch, usually power-up.
    SecIndex(u32),
    /// Seconds since the UNIX epoch, UTC.
    Timestamp(u32),
    /// UTC timestamp plus the local and daylight-saving offsets in minutes.
    LocalTimestamp {
        timestamp: u32,
        local_offset: i16,
        season_offset: i16,
    },
}

impl SmlTime {
    pub(crate) fn from_node(node: DecodedNode) -> Result<Self, DecodeError> {
        match node {
            // some meters send a bare timestamp instead of the choice list
            DecodedNode::Unsigned(..) => Ok(SmlTime::Timestamp(unsigned(node, "SML_Time")?)),
            list @ DecodedNode::List(_) => {
                let [choice, value] = expect_fields::<2>(list, "SML_Time")?;
                match unsigned::<u8>(choice, "SML_Time choice")? {
                    SML_TIME_SEC_INDEX => Ok(SmlTime::SecIndex(unsigned(value, "secIndex")?)),
                    SML_TIME_TIMESTAMP => Ok(SmlTime::Timestamp(unsigned(value, "timestamp")?)),
                    SML_TIME_LOCAL_TIMESTAMP => {
                        let [timestamp, local, season] =
                            expect_fields::<3>(value, "SML_TimestampLocal")?;
                        Ok(SmlTime::LocalTimestamp {
                            timestamp: unsigned(timestamp, "timestamp")?,
                            local_offset: integer(local, "localOffset")?,
                            season_offset: integer(season, "seasonTimeOffset")?,
                        })
                    }
                    other => Err(DecodeError::schema(format!(
                        "SML_Time: unknown choice {other}"
                    ))),
                }
            }
            other => Err(mismatch("SML_Time", "list or unsigned", &other)),
        }
    }

    /// The UTC instant, or `None` for a seconds index.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match *self {
            SmlTime::SecIndex(_) => None,
            SmlTime::Timestamp(timestamp) | SmlTime::LocalTimestamp { timestamp, .. } => {
                Utc.timestamp_opt(i64::from(timestamp), 0).single()
            }
        }
    }

    /// The instant in the meter's local time, for local timestamps only.
    pub fn to_local_datetime(&self) -> Option<DateTime<FixedOffset>> {
        match *self {
            SmlTime::LocalTimestamp {
                local_offset,
                season_offset,
                ..
            } => {
                let minutes = i32::from(local_offset) + i32::from(season_offset);
                let offset = FixedOffset::east_opt(minutes * 60)?;
                Some(self.to_datetime()?.with_timezone(&offset))
            }
            _ => None,
        }
    }
}
