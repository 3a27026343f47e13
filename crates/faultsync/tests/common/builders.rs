//! Builder patterns for creating test data programmatically.

#![allow(dead_code)]

use serde_json::{json, Map, Value};

use faultsync::model::columns;
use faultsync::{FaultRecord, FaultStatus, RowNumber};

/// Builder for sheet rows as the gateway returns them.
pub struct FaultRowBuilder {
    fields: Map<String, Value>,
}

impl FaultRowBuilder {
    /// A complete, carried-forward row.
    pub fn new(row_number: u64) -> Self {
        let mut fields = Map::new();
        fields.insert(columns::DOCKET_NO.into(), json!(format!("TN-{}", row_number)));
        fields.insert(columns::ROUTE_ID.into(), json!("RT-1"));
        fields.insert(columns::ROUTE_NAME.into(), json!("Pune - Satara"));
        fields.insert(columns::FAULT_IN.into(), json!("01/01/2024 00:00"));
        fields.insert(columns::HANDOVER.into(), json!("01/01/2024 00:30"));
        fields.insert(columns::CLEARANCE.into(), json!(""));
        fields.insert(columns::DURATION.into(), json!("0d 00:00"));
        fields.insert(columns::STATUS.into(), json!("Carried Forward"));
        fields.insert(columns::ROW_NUMBER.into(), json!(row_number));
        Self { fields }
    }

    pub fn field(mut self, column: &str, value: Value) -> Self {
        self.fields.insert(column.to_string(), value);
        self
    }

    pub fn without(mut self, column: &str) -> Self {
        self.fields.remove(column);
        self
    }

    pub fn status(self, status: &str) -> Self {
        self.field(columns::STATUS, json!(status))
    }

    pub fn fault_in(self, fault_in: &str) -> Self {
        self.field(columns::FAULT_IN, json!(fault_in))
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Wraps rows in the gateway's dataset envelope.
pub fn dataset(rows: Vec<Value>) -> Value {
    json!({ "data": rows })
}

pub fn route_row(route_id: &str, route_name: &str, services: &str) -> Value {
    json!({
        "Route ID": route_id,
        "Route name as per Transnet (from Point A to B)": route_name,
        "Services working": services,
    })
}

/// Builder for records submitted through the session.
pub struct FaultBuilder {
    record: FaultRecord,
}

impl FaultBuilder {
    /// A complete, pending record.
    pub fn new() -> Self {
        Self {
            record: FaultRecord {
                docket_no: "TN-NEW".to_string(),
                route_name: "Pune - Satara".to_string(),
                fault_in: "2024-01-01T00:00:00.000Z".to_string(),
                handover: "2024-01-01T00:30:00.000Z".to_string(),
                status: FaultStatus::carried_forward(),
                ..Default::default()
            },
        }
    }

    pub fn route_name(mut self, route_name: &str) -> Self {
        self.record.route_name = route_name.to_string();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.record.status = FaultStatus::parse(status);
        self
    }

    pub fn clearance(mut self, clearance: &str) -> Self {
        self.record.clearance = clearance.to_string();
        self
    }

    pub fn remarks(mut self, remarks: &str) -> Self {
        self.record.remarks = remarks.to_string();
        self
    }

    pub fn row_number(mut self, row: u64) -> Self {
        self.record.row_number = Some(RowNumber::new(row));
        self
    }

    pub fn build(self) -> FaultRecord {
        self.record
    }
}
