//! Shared test utilities for faultsync integration tests.
//!
//! This module provides:
//! - `ScriptedGateway`, an in-memory `StoreGateway` with canned responses
//! - Builder patterns for fault rows and records

pub mod builders;
pub mod gateway;

pub use builders::*;
pub use gateway::{FetchScript, ScriptedGateway};
