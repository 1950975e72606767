use crate::core::{IntervalChooser, TimeWindow, ViewState, WindowProbe};
use crate::error::{SyncError, SyncResult};
use crate::query::{QueryMap, keys};

/// Query synchronizer: projects `ViewState` into the sparse query mapping
/// and back.
///
/// Fields that equal their configured defaults are omitted from the encoded
/// query; decoding fills them back in. The codec never mutates a query in
/// place and stores nothing between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCodec {
    default_transaction_type: String,
    default_sort_order: String,
    default_window_millis: i64,
}

impl QueryCodec {
    pub fn new(
        default_transaction_type: impl Into<String>,
        default_sort_order: impl Into<String>,
        default_window_millis: i64,
    ) -> SyncResult<Self> {
        if default_window_millis <= 0 {
            return Err(SyncError::InvalidData(
                "default window duration must be > 0".to_owned(),
            ));
        }
        Ok(Self {
            default_transaction_type: default_transaction_type.into(),
            default_sort_order: default_sort_order.into(),
            default_window_millis,
        })
    }

    /// Decodes a raw query into view-state.
    ///
    /// Absent or empty values fall back to the configured defaults; the time
    /// fields resolve through `TimeWindow::resolve`, which re-applies the
    /// rolling computation against `now` so rolling windows track the clock.
    pub fn decode<C>(&self, raw: &QueryMap, now: i64, chooser: &C) -> SyncResult<ViewState>
    where
        C: IntervalChooser + ?Sized,
    {
        let transaction_type = match raw.get(keys::TRANSACTION_TYPE) {
            Some(value) if !value.is_empty() => value.to_owned(),
            _ => self.default_transaction_type.clone(),
        };
        let transaction_name = raw
            .get(keys::TRANSACTION_NAME)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        let sort_order = match raw.get(keys::SORT_ORDER) {
            Some(value) if !value.is_empty() => value.to_owned(),
            _ => self.default_sort_order.clone(),
        };

        let probe = WindowProbe {
            from: raw.millis(keys::FROM),
            to: raw.millis(keys::TO),
            last: raw.millis(keys::LAST),
        };
        let window = TimeWindow::resolve(probe, self.default_window_millis, now, chooser)?;

        Ok(ViewState {
            transaction_type,
            transaction_name,
            sort_order,
            window,
        })
    }

    /// Encodes view-state onto `base`.
    ///
    /// `base` is the current raw query for address-bar writes (so foreign
    /// keys survive) or an empty map for tab links. Each owned field is
    /// written or removed according to its default-omission rule.
    #[must_use]
    pub fn encode(&self, state: &ViewState, base: QueryMap) -> QueryMap {
        let mut query = base;

        // transaction-type leads so shared links stay readable
        if state.transaction_type != self.default_transaction_type {
            query.set(keys::TRANSACTION_TYPE, state.transaction_type.clone());
        } else {
            query.remove(keys::TRANSACTION_TYPE);
        }

        query.set(
            keys::TRANSACTION_NAME,
            state.transaction_name.clone().unwrap_or_default(),
        );

        if state.window.last_millis() == 0 {
            query.set_millis(keys::FROM, state.window.from());
            query.set_millis(keys::TO, state.window.to());
            query.remove(keys::LAST);
        } else {
            query.remove(keys::FROM);
            query.remove(keys::TO);
            if state.window.last_millis() != self.default_window_millis {
                query.set_millis(keys::LAST, state.window.last_millis());
            } else {
                query.remove(keys::LAST);
            }
        }

        if state.sort_order != self.default_sort_order {
            query.set(keys::SORT_ORDER, state.sort_order.clone());
        } else {
            query.remove(keys::SORT_ORDER);
        }

        query
    }

    /// Builds the header link query for switching transaction types.
    ///
    /// Unlike `encode`, a rolling duration is always written, including the
    /// default duration, so the link pins the window the user is looking at.
    #[must_use]
    pub fn header_query(&self, state: &ViewState, transaction_type: &str) -> QueryMap {
        let mut query = QueryMap::new();
        if transaction_type != self.default_transaction_type {
            query.set(keys::TRANSACTION_TYPE, transaction_type);
        }
        if state.window.is_rolling() {
            query.set_millis(keys::LAST, state.window.last_millis());
        } else {
            query.set_millis(keys::FROM, state.window.from());
            query.set_millis(keys::TO, state.window.to());
        }
        query
    }

    #[must_use]
    pub fn default_window_millis(&self) -> i64 {
        self.default_window_millis
    }
}
