//! vectorstage core library
//!
//! Platform-agnostic scene graph for interactive 2D vector editing: geometry
//! primitives, layered objects, pointer dispatch with dragging, and the
//! transform box used to scale, mirror and rotate the selection.

pub mod config;
pub mod data_provider;
pub mod editor;
pub mod error;
pub mod events;
pub mod geometry;
pub mod layer;
pub mod objects;
pub mod snapshot;
pub mod stage;
pub mod style;
pub mod surface;
pub mod trbox;

pub use config::StageConfig;
pub use data_provider::{DataEvent, DataEventKind, DataProvider};
pub use editor::{EditAction, EditorMode, ShapeTool};
pub use error::{GeometryError, GeometryResult, StageError, StageResult};
pub use events::{EventListener, EventTarget, MouseEvent, MouseEventKind, MouseHandler, mouse_handler};
pub use geometry::{AlignBase, Geometry, Matrix, Orientation, Path, PathPoint, PointExt, Rectangle, Transformable};
pub use layer::{Layer, LayerId};
pub use objects::{Bitmap, Glyph, GlyphSource, LayerObject, ObjectId, ObjectKind, Renderable, Shaper, Text, TextAlign};
pub use snapshot::SceneSnapshot;
pub use stage::Stage;
pub use style::{Fill, Gradient, SerializableColor, Style};
pub use surface::{DrawCommand, ImageSource, Paint, RecordingSurface, Surface};
pub use trbox::{TrBox, TrBoxMut, TrBoxState};
