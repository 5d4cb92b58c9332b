//! vectorstage application
//!
//! Headless shell around the core stage: builds a demo scene on Vello
//! surfaces, replays a pointer/toolbar script against it and reports the
//! resulting scene.

mod app;
mod demo;
mod error;
mod script;

pub use app::{App, AppConfig};
pub use demo::BlockGlyphs;
pub use error::{AppError, AppResult};
pub use script::{Script, Step};
