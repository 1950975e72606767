use serde::{Deserialize, Serialize};

use crate::core::ViewState;

/// Event stream exposed to view observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewEvent {
    /// The time window was recomputed.
    WindowChanged {
        from: i64,
        to: i64,
        last_millis: i64,
    },
    /// Non-window fields (transaction type/name, sort order) changed.
    FieldsChanged,
    /// A navigation event was decoded into view-state.
    ///
    /// `external` is false when the event is the echo of the controller's
    /// own query write.
    NavigationApplied { external: bool },
    /// The controller wrote an updated query to the address bar.
    QueryWritten,
}

/// Observer hook for host code reacting to view-state changes.
///
/// Observers see events and a read-only state snapshot; they cannot mutate
/// the controller from inside a callback.
pub trait ViewObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: ViewEvent, state: &ViewState);
}
