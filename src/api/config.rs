use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};

/// Default rolling window: last four hours.
pub const DEFAULT_WINDOW_MILLIS: i64 = 4 * 60 * 60 * 1000;

/// Public controller bootstrap configuration.
///
/// This type is serializable so host applications can persist/load dashboard
/// setup without inventing their own ad-hoc format. The defaults never
/// change during the controller's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewControllerConfig {
    /// Transaction type supplied by the layout context; omitted from encoded
    /// queries when the view matches it.
    pub default_transaction_type: String,
    #[serde(default = "default_sort_order")]
    pub default_sort_order: String,
    #[serde(default = "default_window_millis")]
    pub default_window_millis: i64,
}

impl ViewControllerConfig {
    /// Creates a config with the stock sort order and four-hour window.
    #[must_use]
    pub fn new(default_transaction_type: impl Into<String>) -> Self {
        Self {
            default_transaction_type: default_transaction_type.into(),
            default_sort_order: default_sort_order(),
            default_window_millis: default_window_millis(),
        }
    }

    /// Sets the sort order omitted from encoded queries.
    #[must_use]
    pub fn with_default_sort_order(mut self, sort_order: impl Into<String>) -> Self {
        self.default_sort_order = sort_order.into();
        self
    }

    /// Sets the rolling duration used when a query carries no time fields.
    #[must_use]
    pub fn with_default_window_millis(mut self, window_millis: i64) -> Self {
        self.default_window_millis = window_millis;
        self
    }

    pub(crate) fn validate(&self) -> SyncResult<()> {
        if self.default_window_millis <= 0 {
            return Err(SyncError::InvalidData(
                "default window duration must be > 0".to_owned(),
            ));
        }
        if self.default_sort_order.is_empty() {
            return Err(SyncError::InvalidData(
                "default sort order must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> SyncResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SyncError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> SyncResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| SyncError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_sort_order() -> String {
    "total-time".to_owned()
}

fn default_window_millis() -> i64 {
    DEFAULT_WINDOW_MILLIS
}
