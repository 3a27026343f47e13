//! Display order for fault records.
//!
//! Carried-forward faults come first. Within each group the most recent
//! fault-in time wins; a missing or unparseable time sorts as the earliest.

use std::borrow::Borrow;
use std::cmp::{Ordering, Reverse};

use chrono::{DateTime, Utc};

use crate::model::FaultRecord;
use crate::timestamp::SheetTimeZone;

fn fault_in(record: &FaultRecord, zone: &SheetTimeZone) -> Option<DateTime<Utc>> {
    zone.parse(&record.fault_in).ok()
}

/// Two-tier comparator: status priority, then fault-in time descending.
///
/// Records that tie compare `Equal`, so a stable sort keeps their relative order.
pub fn compare(a: &FaultRecord, b: &FaultRecord, zone: &SheetTimeZone) -> Ordering {
    let priority = b
        .status
        .is_carried_forward()
        .cmp(&a.status.is_carried_forward());

    // `None < Some`, so comparing b to a puts unparseable times last.
    priority.then_with(|| fault_in(b, zone).cmp(&fault_in(a, zone)))
}

/// Stable sort by [`compare`], parsing each record's time once.
pub fn sort_by_priority<R: Borrow<FaultRecord>>(records: &mut [R], zone: &SheetTimeZone) {
    records.sort_by_cached_key(|r| {
        let r: &FaultRecord = <R as Borrow<FaultRecord>>::borrow(r);
        (Reverse(r.status.is_carried_forward()), Reverse(fault_in(r, zone)))
    });
}
