//! Timestamp parsing and formatting for sheet cells.
//!
//! Cells arrive either in a machine format (RFC 3339, as written by date pickers)
//! or in the localized `dd/MM/yyyy HH:mm` form the sheet displays. Every caller
//! goes through [`SheetTimeZone::parse`], which tries [`ACCEPTED_FORMATS`] in
//! order. Values without an offset are wall-clock times in the sheet's zone, and
//! everything written back or displayed is rendered in that zone.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use thiserror::Error;

/// Format written to the sheet for the three timestamp columns.
pub const SHEET_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Placeholder shown for a blank timestamp.
pub const NOT_AVAILABLE: &str = "N/A";

/// Config value selecting the machine's own offset.
pub const LOCAL_ZONE: &str = "local";

/// A timestamp layout the parser accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFormat {
    Rfc3339,
    NaiveDateTime(&'static str),
    Date(&'static str),
}

/// Machine formats first, then the localized sheet layouts.
pub const ACCEPTED_FORMATS: &[TimestampFormat] = &[
    TimestampFormat::Rfc3339,
    TimestampFormat::NaiveDateTime("%Y-%m-%dT%H:%M:%S%.f"),
    TimestampFormat::NaiveDateTime("%Y-%m-%dT%H:%M"),
    TimestampFormat::NaiveDateTime("%Y-%m-%d %H:%M:%S"),
    TimestampFormat::Date("%Y-%m-%d"),
    TimestampFormat::NaiveDateTime("%d/%m/%Y %H:%M:%S"),
    TimestampFormat::NaiveDateTime(SHEET_FORMAT),
    TimestampFormat::Date("%d/%m/%Y"),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("Timestamp is blank")]
    Empty,

    #[error("Unrecognized timestamp '{0}'")]
    Unrecognized(String),
}

impl TimestampFormat {
    fn parse(&self, raw: &str) -> Option<TimestampValue> {
        match self {
            TimestampFormat::Rfc3339 => DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| TimestampValue::Absolute(dt.with_timezone(&Utc))),
            TimestampFormat::NaiveDateTime(fmt) => NaiveDateTime::parse_from_str(raw, fmt)
                .ok()
                .map(TimestampValue::WallClock),
            TimestampFormat::Date(fmt) => NaiveDate::parse_from_str(raw, fmt)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(TimestampValue::WallClock),
        }
    }
}

enum TimestampValue {
    Absolute(DateTime<Utc>),
    WallClock(NaiveDateTime),
}

/// Zone the sheet's wall-clock values are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetTimeZone {
    offset: FixedOffset,
}

impl SheetTimeZone {
    pub fn utc() -> Self {
        Self::from_offset(Utc.fix())
    }

    /// The machine's current offset, fixed for the lifetime of the value.
    pub fn local() -> Self {
        Self::from_offset(*Local::now().offset())
    }

    pub fn from_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Parses a sheet timestamp, trying each accepted format in order.
    pub fn parse(&self, raw: &str) -> Result<DateTime<Utc>, TimestampError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TimestampError::Empty);
        }

        match ACCEPTED_FORMATS.iter().find_map(|format| format.parse(raw)) {
            Some(TimestampValue::Absolute(dt)) => Ok(dt),
            Some(TimestampValue::WallClock(naive)) => self
                .offset
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| TimestampError::Unrecognized(raw.to_string())),
            None => Err(TimestampError::Unrecognized(raw.to_string())),
        }
    }

    fn render(&self, dt: DateTime<Utc>) -> String {
        dt.with_timezone(&self.offset).format(SHEET_FORMAT).to_string()
    }

    /// Converts a timestamp into the layout the sheet expects on write.
    ///
    /// Blank stays blank and unparseable text is passed through untouched.
    pub fn format_for_sheet(&self, raw: &str) -> String {
        match self.parse(raw) {
            Ok(dt) => self.render(dt),
            Err(TimestampError::Empty) => String::new(),
            Err(TimestampError::Unrecognized(_)) => {
                log::debug!("Sending unparseable timestamp '{}' unchanged", raw);
                raw.to_string()
            }
        }
    }

    /// Renders a timestamp for display.
    pub fn format_display(&self, raw: &str) -> String {
        match self.parse(raw) {
            Ok(dt) => self.render(dt),
            Err(TimestampError::Empty) => NOT_AVAILABLE.to_string(),
            Err(TimestampError::Unrecognized(_)) => raw.to_string(),
        }
    }
}

impl Default for SheetTimeZone {
    fn default() -> Self {
        Self::local()
    }
}

impl FromStr for SheetTimeZone {
    type Err = String;

    /// Accepts `local` or a `+HH:MM` / `-HH:MM` offset.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(LOCAL_ZONE) {
            return Ok(Self::local());
        }
        FixedOffset::from_str(s)
            .map(Self::from_offset)
            .map_err(|e| format!("invalid UTC offset '{}': {}", s, e))
    }
}
