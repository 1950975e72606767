use serde::{Deserialize, Serialize};

use crate::core::window::TimeWindow;

/// Snapshot of the page view-state owned by the controller.
///
/// This is a plain value; the synchronization loop holds the only mutable
/// copy and observers receive read-only references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub transaction_type: String,
    pub transaction_name: Option<String>,
    pub sort_order: String,
    pub window: TimeWindow,
}
