//! Fault duration, derived from handover, clearance and status.
//!
//! A restored fault with a clearance time has a closed interval. Every other
//! fault is measured up to the evaluation instant and keeps growing.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

use crate::model::FaultRecord;
use crate::timestamp::{SheetTimeZone, TimestampError};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Display text for a duration that cannot be computed.
pub const INVALID: &str = "Invalid";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultDuration {
    /// Whole elapsed minutes, never negative.
    Elapsed { minutes: i64 },
    /// A timestamp did not parse or the interval ends before it starts.
    Invalid,
}

impl FaultDuration {
    pub fn minutes(&self) -> Option<i64> {
        match self {
            FaultDuration::Elapsed { minutes } => Some(*minutes),
            FaultDuration::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, FaultDuration::Elapsed { .. })
    }
}

impl fmt::Display for FaultDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultDuration::Elapsed { minutes } => {
                let days = minutes / MINUTES_PER_DAY;
                let hours = (minutes % MINUTES_PER_DAY) / 60;
                let mins = minutes % 60;
                write!(f, "{}d {:02}:{:02}", days, hours, mins)
            }
            FaultDuration::Invalid => f.write_str(INVALID),
        }
    }
}

/// Picks the end of the interval: clearance for a restored fault that has one,
/// otherwise `now`.
fn interval_end(
    record: &FaultRecord,
    now: DateTime<Utc>,
    zone: &SheetTimeZone,
) -> Result<DateTime<Utc>, TimestampError> {
    if record.status.is_restored() {
        match zone.parse(&record.clearance) {
            Ok(end) => return Ok(end),
            Err(TimestampError::Empty) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(now)
}

/// Elapsed time of a fault at `now`, reading wall-clock cells in `zone`.
pub fn fault_duration(
    record: &FaultRecord,
    now: DateTime<Utc>,
    zone: &SheetTimeZone,
) -> FaultDuration {
    let span = zone
        .parse(&record.handover)
        .and_then(|start| interval_end(record, now, zone).map(|end| end - start));

    match span {
        Ok(span) if span >= TimeDelta::zero() => FaultDuration::Elapsed {
            minutes: span.num_minutes(),
        },
        Ok(_) => {
            log::debug!(
                "Fault {:?} ends before handover, duration is invalid",
                record.row_number
            );
            FaultDuration::Invalid
        }
        Err(e) => {
            log::debug!("Fault {:?} duration is invalid: {}", record.row_number, e);
            FaultDuration::Invalid
        }
    }
}
