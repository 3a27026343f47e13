//! In-memory fault and route cache, keyed by row number.
//!
//! Position in any list is never identity: the sheet's own row positions shift
//! as rows are deleted, so every lookup goes through [`RowNumber`].

use std::collections::BTreeMap;

use log::warn;

use crate::fetch::Datasets;
use crate::model::{FaultRecord, RouteRecord, RowNumber};
use crate::ordering::sort_by_priority;
use crate::timestamp::SheetTimeZone;

#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    faults: BTreeMap<RowNumber, FaultRecord>,
    routes: Vec<RouteRecord>,
    zone: SheetTimeZone,
}

/// Counts from replacing the working set with a fresh load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceSummary {
    pub faults: usize,
    pub routes: usize,
    /// Rows dropped because the gateway sent them without a row number.
    pub unkeyed: usize,
    /// Rows that repeated an earlier row number; the later row wins.
    pub duplicates: usize,
}

impl WorkingSet {
    /// An empty set whose wall-clock times are read in `zone`.
    pub fn new(zone: SheetTimeZone) -> Self {
        Self {
            faults: BTreeMap::new(),
            routes: Vec::new(),
            zone,
        }
    }

    pub fn time_zone(&self) -> &SheetTimeZone {
        &self.zone
    }

    /// Replaces everything with freshly loaded datasets.
    pub fn replace(&mut self, datasets: Datasets) -> ReplaceSummary {
        let mut summary = ReplaceSummary::default();
        let mut faults = BTreeMap::new();

        for record in datasets.faults {
            let Some(row) = record.row_number else {
                summary.unkeyed += 1;
                continue;
            };
            if faults.insert(row, record).is_some() {
                summary.duplicates += 1;
            }
        }

        if summary.unkeyed > 0 {
            warn!("Ignored {} fault rows without a row number", summary.unkeyed);
        }
        if summary.duplicates > 0 {
            warn!("Gateway returned {} duplicate row numbers", summary.duplicates);
        }

        summary.faults = faults.len();
        summary.routes = datasets.routes.len();
        self.faults = faults;
        self.routes = datasets.routes;
        summary
    }

    /// Stores a confirmed record under `row`, returning what it replaced.
    pub fn insert(&mut self, row: RowNumber, mut record: FaultRecord) -> Option<FaultRecord> {
        record.row_number = Some(row);
        self.faults.insert(row, record)
    }

    pub fn remove(&mut self, row: RowNumber) -> Option<FaultRecord> {
        self.faults.remove(&row)
    }

    pub fn get(&self, row: RowNumber) -> Option<&FaultRecord> {
        self.faults.get(&row)
    }

    pub fn contains(&self, row: RowNumber) -> bool {
        self.faults.contains_key(&row)
    }

    pub fn len(&self) -> usize {
        self.faults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }

    /// Records in row-number order.
    pub fn iter(&self) -> impl Iterator<Item = &FaultRecord> {
        self.faults.values()
    }

    /// Records in display order: carried forward first, then most recent.
    pub fn prioritized(&self) -> Vec<&FaultRecord> {
        let mut records: Vec<&FaultRecord> = self.faults.values().collect();
        sort_by_priority(&mut records, &self.zone);
        records
    }

    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    /// Exact match on the route name, as offered in route selection.
    pub fn route_by_name(&self, route_name: &str) -> Option<&RouteRecord> {
        self.routes.iter().find(|r| r.route_name == route_name)
    }

    pub fn clear(&mut self) {
        self.faults.clear();
        self.routes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FaultStatus, StatusKind};

    fn fault(row: Option<u64>, status: &str, fault_in: &str) -> FaultRecord {
        FaultRecord {
            route_name: "A - B".to_string(),
            fault_in: fault_in.to_string(),
            handover: fault_in.to_string(),
            status: FaultStatus::parse(status),
            row_number: row.map(RowNumber::new),
            ..Default::default()
        }
    }

    fn datasets(faults: Vec<FaultRecord>) -> Datasets {
        Datasets {
            faults,
            routes: vec![RouteRecord {
                route_id: "R1".to_string(),
                route_name: "A - B".to_string(),
                services: vec!["MPLS".to_string()],
            }],
        }
    }

    #[test]
    fn test_replace_keys_by_row_number() {
        let mut set = WorkingSet::new(SheetTimeZone::utc());
        let summary = set.replace(datasets(vec![
            fault(Some(5), "restored", "2024-01-01"),
            fault(None, "restored", "2024-01-02"),
            fault(Some(3), "restored", "2024-01-03"),
            fault(Some(5), "carried forward", "2024-01-04"),
        ]));

        assert_eq!(
            summary,
            ReplaceSummary {
                faults: 2,
                routes: 1,
                unkeyed: 1,
                duplicates: 1,
            }
        );
        assert_eq!(
            set.get(RowNumber::new(5)).unwrap().status.kind(),
            StatusKind::CarriedForward
        );
        let rows: Vec<u64> = set.iter().filter_map(|r| r.row_number).map(RowNumber::get).collect();
        assert_eq!(rows, vec![3, 5]);
    }

    #[test]
    fn test_insert_replaces_by_key_not_position() {
        let mut set = WorkingSet::new(SheetTimeZone::utc());
        set.replace(datasets(vec![
            fault(Some(2), "restored", "2024-01-01"),
            fault(Some(3), "restored", "2024-01-02"),
            fault(Some(4), "restored", "2024-01-03"),
        ]));
        // A delete lands while row 4 is being edited.
        set.remove(RowNumber::new(2));

        let mut edited = fault(None, "carried forward", "2024-01-03");
        edited.remarks = "splice done".to_string();
        let previous = set.insert(RowNumber::new(4), edited);

        assert_eq!(previous.unwrap().status.kind(), StatusKind::Restored);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(RowNumber::new(4)).unwrap().remarks, "splice done");
        assert_eq!(
            set.get(RowNumber::new(4)).unwrap().row_number,
            Some(RowNumber::new(4))
        );
        assert_eq!(
            set.get(RowNumber::new(3)).unwrap().status.kind(),
            StatusKind::Restored
        );
    }

    #[test]
    fn test_prioritized_view() {
        let mut set = WorkingSet::new(SheetTimeZone::utc());
        set.replace(datasets(vec![
            fault(Some(2), "restored", "2024-05-01"),
            fault(Some(3), "carried forward", "2024-01-01"),
            fault(Some(4), "carried forward", "2024-03-01"),
        ]));
        let order: Vec<u64> = set
            .prioritized()
            .iter()
            .filter_map(|r| r.row_number)
            .map(RowNumber::get)
            .collect();
        assert_eq!(order, vec![4, 3, 2]);
    }

    #[test]
    fn test_route_lookup_and_clear() {
        let mut set = WorkingSet::new(SheetTimeZone::utc());
        set.replace(datasets(vec![fault(Some(2), "restored", "2024-05-01")]));
        assert_eq!(set.route_by_name("A - B").unwrap().route_id, "R1");
        assert!(set.route_by_name("a - b").is_none());

        set.clear();
        assert!(set.is_empty());
        assert!(set.routes().is_empty());
    }
}
