//! Scene objects that live on a layer.

mod bitmap;
mod shaper;
mod text;

pub use bitmap::Bitmap;
pub use shaper::Shaper;
pub use text::{DEFAULT_FONT_SIZE, Glyph, GlyphSource, Text, TextAlign};

use crate::events::MouseListeners;
use crate::geometry::{Matrix, Rectangle, Transformable};
use crate::layer::LayerId;
use crate::style::Style;
use crate::surface::Surface;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for scene objects.
pub type ObjectId = Uuid;

/// Objects a layer can draw and hit-test.
pub trait Renderable {
    /// Draw onto the owning layer's surface.
    fn draw(&self, surface: &mut dyn Surface);

    /// Whether `p` (stage coordinates) hits the object.
    fn has_point(&self, p: Point) -> bool;
}

/// Object kind, as reported in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Shaper,
    Text,
    Bitmap,
}

/// Any object that can be added to a layer.
#[derive(Debug)]
pub enum LayerObject {
    Shaper(Shaper),
    Text(Text),
    Bitmap(Bitmap),
}

impl LayerObject {
    pub fn id(&self) -> ObjectId {
        match self {
            LayerObject::Shaper(s) => s.id(),
            LayerObject::Text(s) => s.id(),
            LayerObject::Bitmap(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            LayerObject::Shaper(_) => ObjectKind::Shaper,
            LayerObject::Text(_) => ObjectKind::Text,
            LayerObject::Bitmap(_) => ObjectKind::Bitmap,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LayerObject::Shaper(s) => &s.name,
            LayerObject::Text(s) => s.name(),
            LayerObject::Bitmap(s) => &s.name,
        }
    }

    /// The layer this object is attached to, if any.
    pub fn layer(&self) -> Option<LayerId> {
        match self {
            LayerObject::Shaper(s) => s.layer(),
            LayerObject::Text(s) => s.layer(),
            LayerObject::Bitmap(s) => s.layer(),
        }
    }

    pub(crate) fn set_layer(&mut self, layer: Option<LayerId>) {
        match self {
            LayerObject::Shaper(s) => s.set_layer(layer),
            LayerObject::Text(s) => s.set_layer(layer),
            LayerObject::Bitmap(s) => s.set_layer(layer),
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            LayerObject::Shaper(s) => s.visible,
            LayerObject::Text(s) => s.visible(),
            LayerObject::Bitmap(s) => s.visible,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        match self {
            LayerObject::Shaper(s) => s.visible = visible,
            LayerObject::Text(s) => s.set_visible(visible),
            LayerObject::Bitmap(s) => s.visible = visible,
        }
    }

    pub fn style(&self) -> &Style {
        match self {
            LayerObject::Shaper(s) => &s.style,
            LayerObject::Text(s) => s.style(),
            LayerObject::Bitmap(s) => &s.style,
        }
    }

    pub fn style_mut(&mut self) -> &mut Style {
        match self {
            LayerObject::Shaper(s) => &mut s.style,
            LayerObject::Text(s) => s.style_mut(),
            LayerObject::Bitmap(s) => &mut s.style,
        }
    }

    pub fn matrix(&self) -> &Matrix {
        match self {
            LayerObject::Shaper(s) => s.matrix(),
            LayerObject::Text(s) => s.matrix(),
            LayerObject::Bitmap(s) => s.matrix(),
        }
    }

    pub fn events(&self) -> &MouseListeners {
        match self {
            LayerObject::Shaper(s) => &s.events,
            LayerObject::Text(s) => s.events(),
            LayerObject::Bitmap(s) => &s.events,
        }
    }

    pub fn events_mut(&mut self) -> &mut MouseListeners {
        match self {
            LayerObject::Shaper(s) => &mut s.events,
            LayerObject::Text(s) => s.events_mut(),
            LayerObject::Bitmap(s) => &mut s.events,
        }
    }

    /// A detached copy with a new id and no listeners.
    pub fn clone_object(&self) -> LayerObject {
        match self {
            LayerObject::Shaper(s) => LayerObject::Shaper(s.clone_object()),
            LayerObject::Text(s) => LayerObject::Text(s.clone_object()),
            LayerObject::Bitmap(s) => LayerObject::Bitmap(s.clone_object()),
        }
    }

    pub fn as_shaper(&self) -> Option<&Shaper> {
        match self {
            LayerObject::Shaper(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_shaper_mut(&mut self) -> Option<&mut Shaper> {
        match self {
            LayerObject::Shaper(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            LayerObject::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            LayerObject::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_bitmap(&self) -> Option<&Bitmap> {
        match self {
            LayerObject::Bitmap(b) => Some(b),
            _ => None,
        }
    }
}

impl Transformable for LayerObject {
    fn move_by(&mut self, dx: f64, dy: f64) {
        match self {
            LayerObject::Shaper(s) => s.move_by(dx, dy),
            LayerObject::Text(s) => s.move_by(dx, dy),
            LayerObject::Bitmap(s) => s.move_by(dx, dy),
        }
    }

    fn rotate(&mut self, angle: f64, pivot: Point) {
        match self {
            LayerObject::Shaper(s) => s.rotate(angle, pivot),
            LayerObject::Text(s) => s.rotate(angle, pivot),
            LayerObject::Bitmap(s) => s.rotate(angle, pivot),
        }
    }

    fn scale(&mut self, sx: f64, sy: f64, pivot: Point) {
        match self {
            LayerObject::Shaper(s) => s.scale(sx, sy, pivot),
            LayerObject::Text(s) => s.scale(sx, sy, pivot),
            LayerObject::Bitmap(s) => s.scale(sx, sy, pivot),
        }
    }

    fn matrix_transform(&mut self, m: &Matrix) {
        match self {
            LayerObject::Shaper(s) => s.matrix_transform(m),
            LayerObject::Text(s) => s.matrix_transform(m),
            LayerObject::Bitmap(s) => s.matrix_transform(m),
        }
    }

    fn bound_rect(&self) -> Option<Rectangle> {
        match self {
            LayerObject::Shaper(s) => s.bound_rect(),
            LayerObject::Text(s) => s.bound_rect(),
            LayerObject::Bitmap(s) => s.bound_rect(),
        }
    }
}

impl Renderable for LayerObject {
    fn draw(&self, surface: &mut dyn Surface) {
        match self {
            LayerObject::Shaper(s) => s.draw(surface),
            LayerObject::Text(s) => s.draw(surface),
            LayerObject::Bitmap(s) => s.draw(surface),
        }
    }

    fn has_point(&self, p: Point) -> bool {
        match self {
            LayerObject::Shaper(s) => s.has_point(p),
            LayerObject::Text(s) => s.has_point(p),
            LayerObject::Bitmap(s) => s.has_point(p),
        }
    }
}

impl From<Shaper> for LayerObject {
    fn from(s: Shaper) -> Self {
        LayerObject::Shaper(s)
    }
}

impl From<Text> for LayerObject {
    fn from(t: Text) -> Self {
        LayerObject::Text(t)
    }
}

impl From<Bitmap> for LayerObject {
    fn from(b: Bitmap) -> Self {
        LayerObject::Bitmap(b)
    }
}
