//! Scripted in-memory gateway.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Barrier;

use faultsync::{BusyIndicator, Dataset, MutationResponse, RemoteError, StoreGateway};

/// What a dataset fetch returns.
#[derive(Debug, Clone)]
pub enum FetchScript {
    Payload(Value),
    Fail,
}

pub struct ScriptedGateway {
    faults: Mutex<FetchScript>,
    routes: Mutex<FetchScript>,
    responses: Mutex<VecDeque<Result<MutationResponse, RemoteError>>>,
    submissions: Mutex<Vec<Value>>,
    fetches: Mutex<Vec<Dataset>>,
    busy_watch: Mutex<Option<BusyIndicator>>,
    busy_seen: Mutex<Vec<bool>>,
    fetch_barrier: Mutex<Option<Arc<Barrier>>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            faults: Mutex::new(FetchScript::Payload(serde_json::json!({ "data": [] }))),
            routes: Mutex::new(FetchScript::Payload(serde_json::json!({ "data": [] }))),
            responses: Mutex::new(VecDeque::new()),
            submissions: Mutex::new(Vec::new()),
            fetches: Mutex::new(Vec::new()),
            busy_watch: Mutex::new(None),
            busy_seen: Mutex::new(Vec::new()),
            fetch_barrier: Mutex::new(None),
        }
    }

    pub fn with_faults(self, script: FetchScript) -> Self {
        *self.faults.lock().unwrap() = script;
        self
    }

    pub fn with_routes(self, script: FetchScript) -> Self {
        *self.routes.lock().unwrap() = script;
        self
    }

    /// Queues the reply for the next mutation.
    pub fn respond(&self, response: Result<MutationResponse, RemoteError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn set_faults(&self, script: FetchScript) {
        *self.faults.lock().unwrap() = script;
    }

    /// Makes both fetches wait for each other, so a sequential load deadlocks.
    pub fn require_concurrent_fetches(&self) {
        *self.fetch_barrier.lock().unwrap() = Some(Arc::new(Barrier::new(2)));
    }

    /// Samples `busy` every time the gateway is called.
    pub fn watch_busy(&self, busy: BusyIndicator) {
        *self.busy_watch.lock().unwrap() = Some(busy);
    }

    pub fn submissions(&self) -> Vec<Value> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> Vec<Dataset> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn busy_seen(&self) -> Vec<bool> {
        self.busy_seen.lock().unwrap().clone()
    }

    fn sample_busy(&self) {
        if let Some(busy) = self.busy_watch.lock().unwrap().as_ref() {
            self.busy_seen.lock().unwrap().push(busy.is_busy());
        }
    }
}

#[async_trait]
impl StoreGateway for ScriptedGateway {
    async fn fetch(&self, dataset: Dataset) -> Result<Value, RemoteError> {
        self.fetches.lock().unwrap().push(dataset);
        self.sample_busy();

        let barrier = self.fetch_barrier.lock().unwrap().clone();
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }

        let script = match dataset {
            Dataset::Faults => self.faults.lock().unwrap().clone(),
            Dataset::Routes => self.routes.lock().unwrap().clone(),
        };
        match script {
            FetchScript::Payload(value) => Ok(value),
            FetchScript::Fail => Err(RemoteError::Transport("connection reset by peer".into())),
        }
    }

    async fn submit(&self, body: &Value) -> Result<MutationResponse, RemoteError> {
        self.submissions.lock().unwrap().push(body.clone());
        self.sample_busy();

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteError::Transport("no scripted response".into())))
    }
}
