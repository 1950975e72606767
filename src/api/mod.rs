pub mod config;
pub mod controller;
pub mod events;
pub mod navigation;

pub use config::{DEFAULT_WINDOW_MILLIS, ViewControllerConfig};
pub use controller::{SyncPhase, ViewController};
pub use events::{ViewEvent, ViewObserver};
pub use navigation::{MemoryNavigation, NavigationProvider};
