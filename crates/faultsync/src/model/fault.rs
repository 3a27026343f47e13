//! Fault records as stored in the daily report sheet.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cell;
use super::route::RouteRecord;
use crate::duration::{fault_duration, FaultDuration};
use crate::error::ValidationError;
use crate::timestamp::SheetTimeZone;

/// Sheet column headers used as JSON keys on the wire.
pub mod columns {
    pub const DOCKET_NO: &str = "Transnet DOCKET NO";
    pub const ROUTE_ID: &str = "Route ID (Transnet ID)";
    pub const ROUTE_NAME: &str = "Route name as per Transnet (from Point A to B)";
    pub const FAULT_IN: &str = "Fault in Date & Time";
    pub const HANDOVER: &str = "Date & Time of Handover of fault";
    pub const CLEARANCE: &str = "Date & Time of fault clearance";
    pub const DURATION: &str = "Fault durration (Hrs)";
    pub const STATUS: &str = "Status of fault(carried forward/ restored)";
    pub const INITIAL_ASSESSMENT: &str = "Initial assesment (brief details of the issue)";
    pub const SERVICES_DOWN: &str = "List of service down due to fault";
    pub const REMARKS: &str = "Remark if any";
    pub const ASSIGNED_TEAM: &str = "FRT worked";
    pub const ROW_NUMBER: &str = "rowNumber";
}

/// Fields that must be non-blank for a record to be listed or submitted.
pub const REQUIRED_FIELDS: [&str; 4] = [
    columns::ROUTE_NAME,
    columns::FAULT_IN,
    columns::HANDOVER,
    columns::STATUS,
];

/// Server-assigned identity of a persisted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RowNumber(u64);

impl RowNumber {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recognised meaning of a status cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusKind {
    Open,
    CarriedForward,
    Restored,
    #[default]
    Other,
}

/// Status cell as written in the sheet, classified once at ingestion.
///
/// The raw text is what gets written back; only comparisons use the kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FaultStatus {
    kind: StatusKind,
    raw: String,
}

impl FaultStatus {
    pub fn parse(raw: &str) -> Self {
        let kind = match raw.trim().to_lowercase().as_str() {
            "carried forward" => StatusKind::CarriedForward,
            "restored" => StatusKind::Restored,
            "open" => StatusKind::Open,
            _ => StatusKind::Other,
        };
        Self {
            kind,
            raw: raw.to_string(),
        }
    }

    pub fn carried_forward() -> Self {
        Self::parse("Carried Forward")
    }

    pub fn restored() -> Self {
        Self::parse("Restored")
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    /// The cell text exactly as entered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_carried_forward(&self) -> bool {
        self.kind == StatusKind::CarriedForward
    }

    pub fn is_restored(&self) -> bool {
        self.kind == StatusKind::Restored
    }

    pub fn is_blank(&self) -> bool {
        cell::is_blank(&self.raw)
    }
}

impl fmt::Display for FaultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for FaultStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FaultStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = cell::text(deserializer)?;
        Ok(FaultStatus::parse(&raw))
    }
}

/// One route-outage event.
///
/// Duration is not a field: it is derived on every read via [`FaultRecord::duration`]
/// and the sheet's duration column is ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaultRecord {
    #[serde(rename = "Transnet DOCKET NO", default, deserialize_with = "cell::text")]
    pub docket_no: String,

    #[serde(rename = "Route ID (Transnet ID)", default, deserialize_with = "cell::text")]
    pub route_id: String,

    #[serde(
        rename = "Route name as per Transnet (from Point A to B)",
        default,
        deserialize_with = "cell::text"
    )]
    pub route_name: String,

    #[serde(rename = "Fault in Date & Time", default, deserialize_with = "cell::text")]
    pub fault_in: String,

    #[serde(
        rename = "Date & Time of Handover of fault",
        default,
        deserialize_with = "cell::text"
    )]
    pub handover: String,

    /// Blank until the fault is cleared.
    #[serde(
        rename = "Date & Time of fault clearance",
        default,
        deserialize_with = "cell::text"
    )]
    pub clearance: String,

    #[serde(rename = "Status of fault(carried forward/ restored)", default)]
    pub status: FaultStatus,

    #[serde(
        rename = "Initial assesment (brief details of the issue)",
        default,
        deserialize_with = "cell::text"
    )]
    pub initial_assessment: String,

    #[serde(
        rename = "List of service down due to fault",
        default,
        deserialize_with = "cell::text"
    )]
    pub services_down: String,

    #[serde(rename = "Remark if any", default, deserialize_with = "cell::text")]
    pub remarks: String,

    #[serde(rename = "FRT worked", default, deserialize_with = "cell::text")]
    pub assigned_team: String,

    /// Present only once the gateway has confirmed the record.
    #[serde(
        rename = "rowNumber",
        default,
        deserialize_with = "cell::row_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub row_number: Option<RowNumber>,
}

impl FaultRecord {
    /// Returns the first required column that is blank, if any.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        let values = [
            (columns::ROUTE_NAME, cell::is_blank(&self.route_name)),
            (columns::FAULT_IN, cell::is_blank(&self.fault_in)),
            (columns::HANDOVER, cell::is_blank(&self.handover)),
            (columns::STATUS, self.status.is_blank()),
        ];
        values
            .into_iter()
            .find_map(|(field, blank)| blank.then_some(field))
    }

    /// True when every required field is present and non-blank.
    pub fn is_complete(&self) -> bool {
        self.first_missing_field().is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.first_missing_field() {
            Some(field) => Err(ValidationError::MissingField { field }),
            None => Ok(()),
        }
    }

    /// True until the gateway has assigned a row number.
    pub fn is_pending(&self) -> bool {
        self.row_number.is_none()
    }

    pub fn duration(&self, now: DateTime<Utc>, zone: &SheetTimeZone) -> FaultDuration {
        fault_duration(self, now, zone)
    }

    /// Copies the route name and its dependent fields from reference data.
    pub fn apply_route(&mut self, route: &RouteRecord) {
        self.route_name = route.route_name.clone();
        self.route_id = route.route_id.clone();
        self.services_down = route.services.join(", ");
    }

    /// Sets a route name with no reference data behind it.
    pub fn set_unknown_route(&mut self, route_name: &str) {
        self.route_name = route_name.to_string();
        self.route_id.clear();
        self.services_down.clear();
    }
}
