//! Wire payloads for create and update, and merging the gateway's reply.

use serde_json::{Map, Value};

use crate::error::{RemoteError, ValidationError};
use crate::model::cell::row_number_from_value;
use crate::model::{columns, FaultRecord, RowNumber};
use crate::timestamp::SheetTimeZone;

fn text(value: &str) -> Value {
    Value::String(value.to_string())
}

/// Validates a record and shapes it for the gateway.
///
/// Timestamps are converted to the sheet layout in `zone`, duration is never
/// included, and `rowNumber` is present only for updates.
pub fn build_payload(
    record: &FaultRecord,
    row_number: Option<RowNumber>,
    zone: &SheetTimeZone,
) -> Result<Value, ValidationError> {
    record.validate()?;

    let mut body = Map::new();
    body.insert(columns::DOCKET_NO.to_string(), text(&record.docket_no));
    body.insert(columns::ROUTE_ID.to_string(), text(&record.route_id));
    body.insert(columns::ROUTE_NAME.to_string(), text(&record.route_name));
    body.insert(
        columns::FAULT_IN.to_string(),
        text(&zone.format_for_sheet(&record.fault_in)),
    );
    body.insert(
        columns::HANDOVER.to_string(),
        text(&zone.format_for_sheet(&record.handover)),
    );
    body.insert(
        columns::CLEARANCE.to_string(),
        text(&zone.format_for_sheet(&record.clearance)),
    );
    body.insert(columns::STATUS.to_string(), text(record.status.as_str()));
    body.insert(
        columns::INITIAL_ASSESSMENT.to_string(),
        text(&record.initial_assessment),
    );
    body.insert(columns::SERVICES_DOWN.to_string(), text(&record.services_down));
    body.insert(columns::REMARKS.to_string(), text(&record.remarks));
    body.insert(columns::ASSIGNED_TEAM.to_string(), text(&record.assigned_team));

    if let Some(row) = row_number {
        body.insert(columns::ROW_NUMBER.to_string(), Value::from(row.get()));
    }

    Ok(Value::Object(body))
}

/// Row number carried by a gateway reply, if any.
pub fn returned_row_number(returned: Option<&Value>) -> Option<RowNumber> {
    returned
        .and_then(|v| v.get(columns::ROW_NUMBER))
        .and_then(row_number_from_value)
        .map(RowNumber::new)
}

/// Overlays the gateway's returned row object on the payload that was sent.
///
/// A derived duration column in the reply is discarded.
pub fn merge_returned(sent: Value, returned: Option<Value>) -> Result<FaultRecord, RemoteError> {
    let mut merged = match sent {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    match returned {
        Some(Value::Object(fields)) => merged.extend(fields),
        Some(Value::Null) | None => {}
        Some(other) => log::debug!("Ignoring non-object gateway result: {}", other),
    }
    merged.remove(columns::DURATION);

    Ok(serde_json::from_value(Value::Object(merged))?)
}
