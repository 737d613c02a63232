//! Page host for the plan synchronizer.
pub mod platform;

pub use platform::config::{ConfigError, ControllerConfig, CONFIG_FILENAME};
pub use platform::{Controller, FieldChangeNotifier, HeadlessPage, Inbound, PageSurface};
