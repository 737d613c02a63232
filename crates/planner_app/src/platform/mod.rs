mod app;
mod effects;
mod headless;
mod surface;

pub mod config;
pub mod logging;

pub use app::Controller;
pub use headless::HeadlessPage;
pub use surface::{FieldChangeNotifier, Inbound, PageSurface};
