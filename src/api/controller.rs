use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{
    Clock, IntervalChooser, SystemClock, ThresholdIntervalChooser, TimeWindow, ViewState,
};
use crate::error::SyncResult;
use crate::query::{QueryCodec, QueryMap};

use super::{NavigationProvider, ViewControllerConfig, ViewEvent, ViewObserver};

/// Synchronization loop phase.
///
/// `Applying` marks the span between a programmatic query write and the
/// navigation event it produces, so the echo can never trigger another
/// write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Initial synchronous setup; navigation events are not handled yet.
    Bootstrapping,
    Idle,
    Applying,
}

/// Main orchestration facade consumed by host applications.
///
/// `ViewController` holds the only mutable `ViewState` and coordinates the
/// window normalizer, the query codec, and the navigation provider. All
/// operations complete within one event-handling turn; the controller never
/// blocks or schedules work itself.
pub struct ViewController<N, C = ThresholdIntervalChooser, K = SystemClock>
where
    N: NavigationProvider,
    C: IntervalChooser,
    K: Clock,
{
    navigation: N,
    chooser: C,
    clock: K,
    config: ViewControllerConfig,
    codec: QueryCodec,
    state: ViewState,
    phase: SyncPhase,
    observers: Vec<Box<dyn ViewObserver>>,
}

impl<N, C, K> ViewController<N, C, K>
where
    N: NavigationProvider,
    C: IntervalChooser,
    K: Clock,
{
    /// Decodes the provider's current query into the initial view-state.
    ///
    /// The controller stays in `Bootstrapping` until `attach` is called;
    /// nothing is written back during construction.
    pub fn new(
        navigation: N,
        chooser: C,
        clock: K,
        config: ViewControllerConfig,
    ) -> SyncResult<Self> {
        config.validate()?;
        let codec = QueryCodec::new(
            config.default_transaction_type.clone(),
            config.default_sort_order.clone(),
            config.default_window_millis,
        )?;

        let now = clock.now_millis();
        let state = codec.decode(&navigation.query(), now, &chooser)?;
        debug!(
            from = state.window.from(),
            to = state.window.to(),
            last_millis = state.window.last_millis(),
            "view controller bootstrapped"
        );

        Ok(Self {
            navigation,
            chooser,
            clock,
            config,
            codec,
            state,
            phase: SyncPhase::Bootstrapping,
            observers: Vec::new(),
        })
    }

    /// Completes bootstrap and starts handling navigation events.
    ///
    /// Deferred past construction so the page's own initial navigation is
    /// not handled twice; events delivered before `attach` are ignored.
    pub fn attach(&mut self) {
        if self.phase == SyncPhase::Bootstrapping {
            self.phase = SyncPhase::Idle;
            trace!("navigation listener attached");
        }
    }

    /// Handles a navigation-succeeded event from the provider.
    ///
    /// Decodes the current query into view-state and emits change events.
    /// Decoding always re-resolves the window against the current clock, so
    /// rolling windows track "now" on every navigation. The navigation is
    /// the source of truth: this path never writes the query back, which
    /// makes the write/echo cycle converge after one round trip.
    ///
    /// Returns `true` when the event was handled.
    pub fn on_navigation(&mut self) -> SyncResult<bool> {
        if self.phase == SyncPhase::Bootstrapping {
            trace!("navigation event ignored during bootstrap");
            return Ok(false);
        }
        let external = self.phase != SyncPhase::Applying;

        let now = self.clock.now_millis();
        let raw = self.navigation.query();
        let next = self.codec.decode(&raw, now, &self.chooser)?;

        let changes = diff_events(&self.state, &next);
        self.state = next;
        self.phase = SyncPhase::Idle;
        debug!(external, changed = !changes.is_empty(), "navigation applied");

        for event in changes {
            self.emit(event);
        }
        self.emit(ViewEvent::NavigationApplied { external });
        Ok(true)
    }

    /// Switches to a rolling window of `last_millis`.
    pub fn set_rolling_window(&mut self, last_millis: i64) -> SyncResult<()> {
        let now = self.clock.now_millis();
        let window = TimeWindow::rolling(last_millis, now, &self.chooser)?;
        self.replace_window(window);
        Ok(())
    }

    /// Switches to a fixed window with explicit bounds.
    pub fn set_absolute_window(&mut self, from: i64, to: i64) -> SyncResult<()> {
        let window = TimeWindow::absolute(from, to)?;
        self.replace_window(window);
        Ok(())
    }

    pub fn set_transaction_type(&mut self, transaction_type: impl Into<String>) {
        let transaction_type = transaction_type.into();
        if self.state.transaction_type == transaction_type {
            return;
        }
        self.state.transaction_type = transaction_type;
        self.emit(ViewEvent::FieldsChanged);
        self.write_query();
    }

    /// Sets or clears the transaction-name filter.
    ///
    /// An empty name normalizes to `None`, matching how decoding treats an
    /// empty query value.
    pub fn set_transaction_name(&mut self, transaction_name: Option<String>) {
        let transaction_name = transaction_name.filter(|name| !name.is_empty());
        if self.state.transaction_name == transaction_name {
            return;
        }
        self.state.transaction_name = transaction_name;
        self.emit(ViewEvent::FieldsChanged);
        self.write_query();
    }

    pub fn set_sort_order(&mut self, sort_order: impl Into<String>) {
        let sort_order = sort_order.into();
        if self.state.sort_order == sort_order {
            return;
        }
        self.state.sort_order = sort_order;
        self.emit(ViewEvent::FieldsChanged);
        self.write_query();
    }

    /// Encodes the current view-state from an empty base, for tab links.
    #[must_use]
    pub fn tab_query(&self) -> QueryMap {
        self.codec.encode(&self.state, QueryMap::new())
    }

    /// Builds the header link query for switching to `transaction_type`.
    #[must_use]
    pub fn header_query(&self, transaction_type: &str) -> QueryMap {
        self.codec.header_query(&self.state, transaction_type)
    }

    pub fn register_observer(&mut self, observer: Box<dyn ViewObserver>) {
        self.observers.push(observer);
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn window(&self) -> TimeWindow {
        self.state.window
    }

    /// Rollup interval a data fetch for the current window would use.
    #[must_use]
    pub fn effective_interval(&self) -> i64 {
        self.state.window.effective_interval(&self.chooser)
    }

    #[must_use]
    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> &ViewControllerConfig {
        &self.config
    }

    #[must_use]
    pub fn navigation(&self) -> &N {
        &self.navigation
    }

    /// Mutable access to the provider, for hosts feeding in external
    /// navigation (back button, typed URL) before calling `on_navigation`.
    #[must_use]
    pub fn navigation_mut(&mut self) -> &mut N {
        &mut self.navigation
    }

    #[must_use]
    pub fn into_navigation(self) -> N {
        self.navigation
    }

    fn replace_window(&mut self, window: TimeWindow) {
        if self.state.window == window {
            return;
        }
        self.state.window = window;
        self.emit(ViewEvent::WindowChanged {
            from: window.from(),
            to: window.to(),
            last_millis: window.last_millis(),
        });
        self.write_query();
    }

    fn write_query(&mut self) {
        let base = self.navigation.query();
        let encoded = self.codec.encode(&self.state, base);
        self.navigation.replace_query(encoded);
        self.phase = SyncPhase::Applying;
        trace!("query written to address bar");
        self.emit(ViewEvent::QueryWritten);
    }

    fn emit(&mut self, event: ViewEvent) {
        let state = &self.state;
        for observer in &mut self.observers {
            observer.on_event(event, state);
        }
    }
}

fn diff_events(previous: &ViewState, next: &ViewState) -> SmallVec<[ViewEvent; 2]> {
    let mut events = SmallVec::new();
    if previous.window != next.window {
        events.push(ViewEvent::WindowChanged {
            from: next.window.from(),
            to: next.window.to(),
            last_millis: next.window.last_millis(),
        });
    }
    if previous.transaction_type != next.transaction_type
        || previous.transaction_name != next.transaction_name
        || previous.sort_order != next.sort_order
    {
        events.push(ViewEvent::FieldsChanged);
    }
    events
}
