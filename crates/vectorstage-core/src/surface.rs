//! Immediate-mode drawing surface abstraction.
//!
//! Scene objects draw through this trait; each [`Layer`](crate::layer::Layer)
//! owns exactly one surface. Implementations can target Vello (see the
//! render crate), a software rasterizer, or simply record the calls.

use crate::geometry::{Matrix, Path, Segment};
use crate::style::{Gradient, GradientGeometry, SerializableColor};
use kurbo::{Point, Size};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Paint used to fill the current path.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(SerializableColor),
    Gradient {
        gradient: Gradient,
        geometry: GradientGeometry,
    },
}

/// Encoded image data plus its display size.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    /// Cache key, usually the source location.
    pub key: String,
    /// Encoded bytes (PNG, JPEG, WebP).
    pub data: Arc<Vec<u8>>,
    pub width: f64,
    pub height: f64,
}

impl ImageSource {
    pub fn new(key: impl Into<String>, data: Vec<u8>, width: f64, height: f64) -> Self {
        Self {
            key: key.into(),
            data: Arc::new(data),
            width,
            height,
        }
    }
}

/// A 2D drawing context.
pub trait Surface {
    /// Drawable area in surface units.
    fn size(&self) -> Size;

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Transform applied to subsequent path and image commands; `None`
    /// resets to identity.
    fn set_transform(&mut self, m: Option<&Matrix>);

    fn set_global_alpha(&mut self, alpha: f64);

    fn set_shadow(&mut self, color: Option<SerializableColor>, blur: f64);

    /// Start a new current path.
    fn begin_path(&mut self);

    fn move_to(&mut self, p: Point);

    fn line_to(&mut self, p: Point);

    fn quad_to(&mut self, c: Point, p: Point);

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point);

    fn close_path(&mut self);

    /// Stroke the current path.
    fn stroke(&mut self, color: SerializableColor, width: f64);

    /// Fill the current path (nonzero rule).
    fn fill(&mut self, paint: &Paint);

    /// Draw an image at the origin under the current transform.
    fn draw_image(&mut self, image: &ImageSource);

    /// Append a path to the current path.
    fn add_path(&mut self, path: &Path) {
        let segments = path.segments();
        for seg in &segments {
            match *seg {
                Segment::MoveTo(p) => self.move_to(p),
                Segment::LineTo(p) => self.line_to(p),
                Segment::QuadTo(c, p) => self.quad_to(c, p),
                Segment::CurveTo(a, b, p) => self.curve_to(a, b, p),
            }
        }
        if path.closed && !segments.is_empty() {
            self.close_path();
        }
    }
}

/// A recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    SetTransform(Option<Matrix>),
    SetGlobalAlpha(f64),
    SetShadow(Option<SerializableColor>, f64),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CurveTo(Point, Point, Point),
    ClosePath,
    Stroke(SerializableColor, f64),
    Fill(Paint),
    DrawImage(String),
}

/// Shared handle to the commands recorded by a [`RecordingSurface`].
pub type CommandLog = Rc<RefCell<Vec<DrawCommand>>>;

/// Surface that records every call, for headless runs and tests.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    log: CommandLog,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Handle to the command log; stays valid after the surface is boxed.
    pub fn log(&self) -> CommandLog {
        Rc::clone(&self.log)
    }

    fn record(&mut self, cmd: DrawCommand) {
        self.log.borrow_mut().push(cmd);
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.record(DrawCommand::Clear);
    }

    fn set_transform(&mut self, m: Option<&Matrix>) {
        self.record(DrawCommand::SetTransform(m.copied()));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.record(DrawCommand::SetGlobalAlpha(alpha));
    }

    fn set_shadow(&mut self, color: Option<SerializableColor>, blur: f64) {
        self.record(DrawCommand::SetShadow(color, blur));
    }

    fn begin_path(&mut self) {
        self.record(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.record(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.record(DrawCommand::LineTo(p));
    }

    fn quad_to(&mut self, c: Point, p: Point) {
        self.record(DrawCommand::QuadTo(c, p));
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.record(DrawCommand::CurveTo(c1, c2, p));
    }

    fn close_path(&mut self) {
        self.record(DrawCommand::ClosePath);
    }

    fn stroke(&mut self, color: SerializableColor, width: f64) {
        self.record(DrawCommand::Stroke(color, width));
    }

    fn fill(&mut self, paint: &Paint) {
        self.record(DrawCommand::Fill(paint.clone()));
    }

    fn draw_image(&mut self, image: &ImageSource) {
        self.record(DrawCommand::DrawImage(image.key.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_path_replays_segments() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        let log = surface.log();
        let path = Path::polygon(&[
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
        ]);
        surface.add_path(&path);
        let cmds = log.borrow();
        assert_eq!(
            *cmds,
            vec![
                DrawCommand::MoveTo(Point::new(0.0, 0.0)),
                DrawCommand::LineTo(Point::new(4.0, 0.0)),
                DrawCommand::LineTo(Point::new(4.0, 4.0)),
                DrawCommand::LineTo(Point::new(0.0, 0.0)),
                DrawCommand::ClosePath,
            ]
        );
    }

    #[test]
    fn test_empty_path_adds_nothing() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        surface.add_path(&Path::default());
        assert!(surface.log().borrow().is_empty());
    }
}
