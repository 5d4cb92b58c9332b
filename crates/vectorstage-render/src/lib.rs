//! vectorstage render library
//!
//! Surface implementations for the vectorstage scene graph. The default one
//! records into a Vello scene that the host presents with its own renderer.

mod error;
mod vello_surface;

pub use error::{RenderResult, RendererError};
pub use vello_surface::VelloSurface;
