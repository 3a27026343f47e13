//! Loading and normalising the fault and route datasets.
//!
//! Both datasets are requested concurrently. Each one degrades to an empty list
//! on its own when the request fails or the payload is malformed, so a load
//! never fails as a whole.

use log::{debug, error, warn};
use serde_json::Value;

use crate::error::RemoteError;
use crate::gateway::{Dataset, StoreGateway};
use crate::model::{FaultRecord, RouteRecord};

/// Name of the array field carrying rows in a dataset response.
pub const DATA_FIELD: &str = "data";

/// Normalised result of a load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Datasets {
    pub faults: Vec<FaultRecord>,
    pub routes: Vec<RouteRecord>,
}

/// Returns the rows inside the payload's `data` array, or `None` if the field is
/// missing or not a list.
pub fn extract_rows(payload: &Value) -> Option<&Vec<Value>> {
    payload.get(DATA_FIELD).and_then(Value::as_array)
}

fn rows_or_empty(dataset: Dataset, response: Result<Value, RemoteError>) -> Vec<Value> {
    match response {
        Ok(mut payload) => match payload.get_mut(DATA_FIELD).and_then(Value::as_array_mut) {
            Some(rows) => std::mem::take(rows),
            None => {
                warn!(
                    "{:?} response has no '{}' list, treating as empty",
                    dataset, DATA_FIELD
                );
                Vec::new()
            }
        },
        Err(e) => {
            error!("Failed to fetch {:?} dataset: {}", dataset, e);
            Vec::new()
        }
    }
}

/// Keeps only rows that decode and have every required field.
pub fn normalize_faults(rows: Vec<Value>) -> Vec<FaultRecord> {
    let total = rows.len();
    let faults: Vec<FaultRecord> = rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<FaultRecord>(row) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping undecodable fault row: {}", e);
                None
            }
        })
        .filter(FaultRecord::is_complete)
        .collect();

    if faults.len() < total {
        debug!(
            "Dropped {} incomplete fault rows of {}",
            total - faults.len(),
            total
        );
    }
    faults
}

/// Keeps only route rows that decode and carry a route name.
pub fn normalize_routes(rows: Vec<Value>) -> Vec<RouteRecord> {
    rows.into_iter()
        .filter_map(|row| serde_json::from_value::<RouteRecord>(row).ok())
        .filter(RouteRecord::is_usable)
        .collect()
}

/// Fetches both datasets concurrently and normalises them.
pub async fn load<G: StoreGateway + ?Sized>(gateway: &G) -> Datasets {
    let (faults, routes) = tokio::join!(
        gateway.fetch(Dataset::Faults),
        gateway.fetch(Dataset::Routes)
    );

    Datasets {
        faults: normalize_faults(rows_or_empty(Dataset::Faults, faults)),
        routes: normalize_routes(rows_or_empty(Dataset::Routes, routes)),
    }
}
