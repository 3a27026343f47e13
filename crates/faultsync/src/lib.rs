pub mod busy;
pub mod config;
pub mod duration;
pub mod error;
pub mod fetch;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod mutation;
pub mod ordering;
pub mod session;
pub mod timestamp;
pub mod working_set;

pub use busy::{BusyGuard, BusyIndicator};
pub use config::{load_config, Config, GatewayConfig, LoggingConfig};
pub use duration::{fault_duration, FaultDuration};
pub use error::{ConfigError, FaultSyncError, RemoteError, Result, ValidationError};
pub use fetch::{load, Datasets};
pub use gateway::{Dataset, HttpGateway, MutationResponse, StoreGateway};
pub use model::{FaultRecord, FaultStatus, RouteRecord, RowNumber, StatusKind};
pub use ordering::{compare, sort_by_priority};
pub use session::{DeleteOutcome, DraftMode, EditDraft, FaultSession};
pub use timestamp::{SheetTimeZone, TimestampError};
pub use working_set::{ReplaceSummary, WorkingSet};
