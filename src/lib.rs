//! viewsync-rs: view-state controller for performance-monitoring dashboards.
//!
//! This crate keeps a page's time window (rolling or absolute) synchronized
//! with an address-bar style query mapping, and derives the rollup interval
//! appropriate to that window.

pub mod api;
pub mod core;
pub mod error;
pub mod query;
pub mod telemetry;

pub use api::{ViewController, ViewControllerConfig};
pub use error::{SyncError, SyncResult};
