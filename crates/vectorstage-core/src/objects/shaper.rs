//! Shaper: renders a set of paths under one transform.

use super::{ObjectId, Renderable};
use crate::events::MouseListeners;
use crate::geometry::{self, Matrix, Path, Rectangle, Transformable};
use crate::layer::LayerId;
use crate::style::{Fill, Style};
use crate::surface::{Paint, Surface};
use kurbo::Point;
use uuid::Uuid;

/// A group of paths drawn and hit-tested as one object.
///
/// `shapes` hold the geometry in object space; `cached_shapes` hold the
/// same geometry in stage space (shapes × matrix). Both are private and
/// every transform updates the matrix and the cache together.
#[derive(Debug)]
pub struct Shaper {
    id: ObjectId,
    pub name: String,
    shapes: Vec<Path>,
    cached_shapes: Vec<Path>,
    matrix: Matrix,
    /// Bounds of the untransformed shapes at the last `cache_shapes`.
    bounds: Option<Rectangle>,
    pub style: Style,
    pub visible: bool,
    layer: Option<LayerId>,
    pub events: MouseListeners,
}

impl Shaper {
    pub fn new(name: impl Into<String>, shapes: Vec<Path>, style: Style) -> Self {
        let mut shaper = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            shapes,
            cached_shapes: Vec::new(),
            matrix: Matrix::IDENTITY,
            bounds: None,
            style,
            visible: true,
            layer: None,
            events: MouseListeners::new(),
        };
        shaper.cache_shapes();
        shaper
    }

    /// Shaper holding a single path.
    pub fn from_path(name: impl Into<String>, path: Path, style: Style) -> Self {
        Self::new(name, vec![path], style)
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn shapes(&self) -> &[Path] {
        &self.shapes
    }

    pub fn cached_shapes(&self) -> &[Path] {
        &self.cached_shapes
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Object-space bounds used to lay out gradient fills.
    pub fn bounds(&self) -> Option<Rectangle> {
        self.bounds
    }

    pub fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    pub(crate) fn set_layer(&mut self, layer: Option<LayerId>) {
        self.layer = layer;
    }

    /// Rebuild the stage-space cache from the shapes and the current matrix.
    pub fn cache_shapes(&mut self) {
        self.bounds = union_bounds(&self.shapes);
        self.cached_shapes = self.shapes.clone();
        for path in &mut self.cached_shapes {
            path.matrix_transform(&self.matrix);
        }
    }

    /// Replace the shapes, keeping the current matrix.
    pub fn set_shapes(&mut self, shapes: Vec<Path>) {
        self.shapes = shapes;
        self.cache_shapes();
    }

    /// A detached copy named `copy_<name>` with its transform baked in.
    pub fn clone_object(&self) -> Shaper {
        let mut cloned = Shaper::new(
            format!("copy_{}", self.name),
            self.shapes.clone(),
            self.style.clone(),
        );
        cloned.visible = self.visible;
        cloned.matrix_transform(&self.matrix);
        cloned
    }

    /// Paths in stage space as kurbo bezier paths.
    pub fn to_bez_paths(&self) -> Vec<kurbo::BezPath> {
        self.cached_shapes.iter().map(Path::to_bez_path).collect()
    }

    fn is_drawable(&self) -> bool {
        self.layer.is_some() && self.visible && !self.shapes.is_empty()
    }
}

fn union_bounds(paths: &[Path]) -> Option<Rectangle> {
    paths
        .iter()
        .filter_map(Path::bound_rect)
        .reduce(|a, b| a.union(&b))
}

impl Transformable for Shaper {
    fn move_by(&mut self, dx: f64, dy: f64) {
        self.matrix.translate(dx, dy);
        for path in &mut self.cached_shapes {
            path.move_by(dx, dy);
        }
    }

    fn rotate(&mut self, angle: f64, pivot: Point) {
        self.matrix.rotate(angle, pivot);
        for path in &mut self.cached_shapes {
            path.rotate(angle, pivot);
        }
    }

    fn scale(&mut self, sx: f64, sy: f64, pivot: Point) {
        self.matrix.scale(sx, sy, pivot);
        for path in &mut self.cached_shapes {
            path.scale(sx, sy, pivot);
        }
    }

    fn matrix_transform(&mut self, m: &Matrix) {
        self.matrix.multiply(m);
        for path in &mut self.cached_shapes {
            path.matrix_transform(m);
        }
    }

    fn bound_rect(&self) -> Option<Rectangle> {
        union_bounds(&self.cached_shapes)
    }
}

impl Renderable for Shaper {
    fn has_point(&self, p: Point) -> bool {
        if !self.is_drawable() {
            return false;
        }
        let segments: Vec<_> = self.cached_shapes.iter().flat_map(Path::segments).collect();
        geometry::contains(&segments, p)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let style = &self.style;
        let stroke = style.effective_stroke();
        if stroke.is_none() && style.fill.is_none() {
            return;
        }
        if !self.is_drawable() {
            return;
        }

        surface.set_global_alpha(style.opacity);
        surface.set_shadow(style.shadow_color, style.shadow_blur);

        let solid = match &style.fill {
            Some(Fill::Solid(color)) => Some(*color),
            _ => None,
        };

        if stroke.is_some() || solid.is_some() {
            surface.set_transform(None);
            surface.begin_path();
            for path in &self.cached_shapes {
                surface.add_path(path);
            }
        }

        if let Some(color) = stroke {
            surface.stroke(color, style.stroke_width);
        }

        match &style.fill {
            Some(Fill::Solid(color)) => surface.fill(&Paint::Solid(*color)),
            Some(Fill::Gradient(gradient)) => {
                // Gradients are laid out in object space, so the original
                // shapes are drawn again under the live matrix.
                let Some(bounds) = self.bounds else {
                    return;
                };
                surface.set_transform(Some(&self.matrix));
                surface.begin_path();
                for path in &self.shapes {
                    surface.add_path(path);
                }
                surface.fill(&Paint::Gradient {
                    gradient: gradient.clone(),
                    geometry: gradient.geometry_for_bounds(&bounds),
                });
                surface.set_transform(None);
            }
            None => {}
        }
    }
}
