//! Client session: owns the working set, the edit draft and the busy flag, and
//! coordinates every write through the gateway.
//!
//! A record only enters the working set once the gateway has confirmed it, and
//! only leaves it once the gateway has confirmed the delete. Two writes to the
//! same row are not serialised against each other; whichever reply lands last
//! wins.

use log::{error, info, warn};
use serde_json::Value;

use crate::busy::BusyIndicator;
use crate::config::GatewayConfig;
use crate::error::{FaultSyncError, RemoteError, Result, ValidationError};
use crate::fetch;
use crate::gateway::{delete_body, HttpGateway, MutationResponse, StoreGateway};
use crate::model::{FaultRecord, RowNumber};
use crate::mutation::{build_payload, merge_returned, returned_row_number};
use crate::timestamp::SheetTimeZone;
use crate::working_set::{ReplaceSummary, WorkingSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// What the draft will do when submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    Edit(RowNumber),
}

/// The record currently being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub mode: DraftMode,
    pub record: FaultRecord,
}

pub struct FaultSession<G: StoreGateway> {
    gateway: G,
    working_set: WorkingSet,
    busy: BusyIndicator,
    draft: Option<EditDraft>,
}

impl FaultSession<HttpGateway> {
    /// Creates a session talking to the configured HTTP proxy.
    pub fn connect(config: &GatewayConfig) -> Result<Self> {
        let zone = config.sheet_time_zone()?;
        Ok(Self::new(HttpGateway::new(config)?, zone))
    }
}

impl<G: StoreGateway> FaultSession<G> {
    /// Wall-clock sheet cells are read and written in `zone`.
    pub fn new(gateway: G, zone: SheetTimeZone) -> Self {
        Self {
            gateway,
            working_set: WorkingSet::new(zone),
            busy: BusyIndicator::new(),
            draft: None,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn working_set(&self) -> &WorkingSet {
        &self.working_set
    }

    pub fn time_zone(&self) -> &SheetTimeZone {
        self.working_set.time_zone()
    }

    /// Handle for observing the loading/busy state.
    pub fn busy(&self) -> BusyIndicator {
        self.busy.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    // ─── Loading ────────────────────────────────────────────────────────────

    /// Loads both datasets and replaces the working set. Also used to refresh.
    ///
    /// Never fails: a failed or malformed dataset is treated as empty.
    #[tracing::instrument(skip_all)]
    pub async fn load(&mut self) -> ReplaceSummary {
        let _busy = self.busy.acquire();
        let datasets = fetch::load(&self.gateway).await;
        let summary = self.working_set.replace(datasets);
        info!(
            "Loaded {} faults and {} routes",
            summary.faults, summary.routes
        );
        summary
    }

    // ─── Mutations ──────────────────────────────────────────────────────────

    async fn send(&self, body: &Value) -> std::result::Result<Option<Value>, RemoteError> {
        self.gateway
            .submit(body)
            .await
            .and_then(MutationResponse::into_result)
            .inspect_err(|e| error!("Gateway mutation failed: {}", e))
    }

    /// Creates a record and stores it under the row number the gateway assigns.
    #[tracing::instrument(skip_all, fields(route = %record.route_name))]
    pub async fn create(&mut self, record: &FaultRecord) -> Result<RowNumber> {
        let body = build_payload(record, None, self.working_set.time_zone())?;
        let _busy = self.busy.acquire();

        let returned = self.send(&body).await?;
        let Some(row) = returned_row_number(returned.as_ref()) else {
            warn!("Create confirmed without a row number; reload to pick it up");
            return Err(RemoteError::MissingRowNumber.into());
        };

        let stored = merge_returned(body, returned)?;
        self.working_set.insert(row, stored);
        info!("Created fault at row {}", row);
        Ok(row)
    }

    /// Updates a persisted record, replacing the working-set entry by row number.
    #[tracing::instrument(skip_all, fields(row = ?record.row_number))]
    pub async fn update(&mut self, record: &FaultRecord) -> Result<RowNumber> {
        let row = record.row_number.ok_or(ValidationError::MissingRowNumber)?;
        let body = build_payload(record, Some(row), self.working_set.time_zone())?;
        let _busy = self.busy.acquire();

        let returned = self.send(&body).await?;
        let stored = merge_returned(body, returned)?;

        if self.working_set.insert(row, stored).is_none() {
            warn!("Updated row {} was not in the working set; added it", row);
        }
        info!("Updated fault at row {}", row);
        Ok(row)
    }

    /// Deletes a row after a human confirmation step, which sees the local copy
    /// if there is one and can abort. The local entry is removed only once the
    /// gateway confirms.
    #[tracing::instrument(skip_all, fields(row = %row))]
    pub async fn delete<F>(&mut self, row: RowNumber, confirm: F) -> Result<DeleteOutcome>
    where
        F: FnOnce(RowNumber, Option<&FaultRecord>) -> bool,
    {
        if !confirm(row, self.working_set.get(row)) {
            info!("Delete of row {} cancelled", row);
            return Ok(DeleteOutcome::Cancelled);
        }

        let _busy = self.busy.acquire();
        self.send(&delete_body(row))
            .await
            .map_err(|source| FaultSyncError::Delete { row, source })?;

        if self.working_set.remove(row).is_none() {
            warn!("Deleted row {} was not in the working set", row);
        }
        if matches!(&self.draft, Some(EditDraft { mode: DraftMode::Edit(editing), .. }) if *editing == row)
        {
            warn!("Row {} was deleted while being edited", row);
        }
        info!("Deleted fault at row {}", row);
        Ok(DeleteOutcome::Deleted)
    }

    // ─── Edit draft ─────────────────────────────────────────────────────────

    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut FaultRecord> {
        self.draft.as_mut().map(|d| &mut d.record)
    }

    /// Starts a blank draft for a new record, discarding any open draft.
    pub fn begin_create(&mut self) -> &mut FaultRecord {
        let draft = self.draft.insert(EditDraft {
            mode: DraftMode::Create,
            record: FaultRecord::default(),
        });
        &mut draft.record
    }

    /// Starts editing a copy of the stored record at `row`.
    pub fn begin_edit(&mut self, row: RowNumber) -> Option<&mut FaultRecord> {
        let record = self.working_set.get(row)?.clone();
        let draft = self.draft.insert(EditDraft {
            mode: DraftMode::Edit(row),
            record,
        });
        Some(&mut draft.record)
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Sets the draft's route, filling route id and services from reference data.
    ///
    /// Returns true if the name matched a known route.
    pub fn select_route(&mut self, route_name: &str) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };

        match self.working_set.route_by_name(route_name) {
            Some(route) => {
                draft.record.apply_route(route);
                true
            }
            None => {
                draft.record.set_unknown_route(route_name);
                false
            }
        }
    }

    /// Submits the draft as a create or an update. The draft is kept on failure.
    pub async fn submit_draft(&mut self) -> Result<RowNumber> {
        let Some(draft) = self.draft.clone() else {
            return Err(ValidationError::NoDraft.into());
        };

        let row = match draft.mode {
            DraftMode::Create => self.create(&draft.record).await?,
            DraftMode::Edit(row) => {
                let mut record = draft.record;
                record.row_number = Some(row);
                self.update(&record).await?
            }
        };

        self.draft = None;
        Ok(row)
    }
}
