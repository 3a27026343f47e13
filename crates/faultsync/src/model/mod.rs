pub(crate) mod cell;
pub mod fault;
pub mod route;

pub use fault::{columns, FaultRecord, FaultStatus, RowNumber, StatusKind, REQUIRED_FIELDS};
pub use route::RouteRecord;
