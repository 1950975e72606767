pub mod clock;
pub mod interval;
pub mod view_state;
pub mod window;

pub use clock::{Clock, FixedClock, SystemClock, truncate_to_second};
pub use interval::{IntervalChooser, RollupTier, ThresholdIntervalChooser};
pub use view_state::ViewState;
pub use window::{TimeWindow, WindowMode, WindowProbe};
