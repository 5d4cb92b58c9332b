//! Raster image object.

use super::{ObjectId, Renderable};
use crate::events::MouseListeners;
use crate::geometry::{Geometry, Matrix, Rectangle, Transformable};
use crate::layer::LayerId;
use crate::style::Style;
use crate::surface::{ImageSource, Surface};
use kurbo::Point;
use uuid::Uuid;

/// An image placed at the origin of its own space and drawn under `matrix`.
#[derive(Debug)]
pub struct Bitmap {
    id: ObjectId,
    pub name: String,
    image: ImageSource,
    matrix: Matrix,
    pub style: Style,
    pub visible: bool,
    layer: Option<LayerId>,
    pub events: MouseListeners,
}

impl Bitmap {
    pub fn new(name: impl Into<String>, image: ImageSource, style: Style) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            image,
            matrix: Matrix::IDENTITY,
            style,
            visible: true,
            layer: None,
            events: MouseListeners::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn image(&self) -> &ImageSource {
        &self.image
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    pub(crate) fn set_layer(&mut self, layer: Option<LayerId>) {
        self.layer = layer;
    }

    /// Untransformed image rectangle.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::ORIGIN, Point::new(self.image.width, self.image.height))
    }

    pub fn clone_object(&self) -> Bitmap {
        let mut cloned = Bitmap::new(format!("copy_{}", self.name), self.image.clone(), self.style.clone());
        cloned.visible = self.visible;
        cloned.matrix_transform(&self.matrix);
        cloned
    }
}

impl Transformable for Bitmap {
    fn move_by(&mut self, dx: f64, dy: f64) {
        self.matrix.translate(dx, dy);
    }

    fn rotate(&mut self, angle: f64, pivot: Point) {
        self.matrix.rotate(angle, pivot);
    }

    fn scale(&mut self, sx: f64, sy: f64, pivot: Point) {
        self.matrix.scale(sx, sy, pivot);
    }

    fn matrix_transform(&mut self, m: &Matrix) {
        self.matrix.multiply(m);
    }

    fn bound_rect(&self) -> Option<Rectangle> {
        let mut outline = self.bounds().to_path();
        outline.matrix_transform(&self.matrix);
        outline.bound_rect()
    }
}

impl Renderable for Bitmap {
    fn has_point(&self, p: Point) -> bool {
        if self.layer.is_none() || !self.visible {
            return false;
        }
        let mut outline = self.bounds().to_path();
        outline.matrix_transform(&self.matrix);
        outline.contains(p)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.layer.is_none() || !self.visible {
            return;
        }
        if self.style.shadow_color.is_some() {
            surface.set_shadow(self.style.shadow_color, self.style.shadow_blur);
        }
        surface.set_global_alpha(self.style.opacity);
        surface.set_transform(Some(&self.matrix));
        surface.draw_image(&self.image);
        surface.set_transform(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::SerializableColor;
    use crate::surface::{DrawCommand, RecordingSurface};
    use kurbo::Size;

    const EPS: f64 = 1e-9;

    fn bitmap() -> Bitmap {
        Bitmap::new("photo", ImageSource::new("photo.png", Vec::new(), 40.0, 20.0), Style::default())
    }

    #[test]
    fn test_bound_rect_follows_matrix() {
        let mut b = bitmap();
        b.scale(2.0, 2.0, Point::ORIGIN);
        b.move_by(10.0, 5.0);
        let r = b.bound_rect().unwrap();
        assert!((r.from.x - 10.0).abs() < EPS);
        assert!((r.from.y - 5.0).abs() < EPS);
        assert!((r.to.x - 90.0).abs() < EPS);
        assert!((r.to.y - 45.0).abs() < EPS);
    }

    #[test]
    fn test_has_point() {
        let mut b = bitmap();
        assert!(!b.has_point(Point::new(5.0, 5.0)));
        b.set_layer(Some(Uuid::new_v4()));
        assert!(b.has_point(Point::new(5.0, 5.0)));
        b.rotate(std::f64::consts::FRAC_PI_2, Point::ORIGIN);
        assert!(!b.has_point(Point::new(5.0, 5.0)));
        assert!(b.has_point(Point::new(-5.0, 5.0)));
    }

    #[test]
    fn test_draw_under_matrix() {
        let mut b = bitmap();
        b.style = b.style.clone().with_opacity(0.25).with_shadow(SerializableColor::gray(), 4.0);
        b.set_layer(Some(Uuid::new_v4()));
        b.move_by(3.0, 0.0);

        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        let log = surface.log();
        b.draw(&mut surface);
        assert_eq!(
            *log.borrow(),
            vec![
                DrawCommand::SetShadow(Some(SerializableColor::gray()), 4.0),
                DrawCommand::SetGlobalAlpha(0.25),
                DrawCommand::SetTransform(Some(Matrix::translation(3.0, 0.0))),
                DrawCommand::DrawImage("photo.png".to_string()),
                DrawCommand::SetTransform(None),
            ]
        );
    }

    #[test]
    fn test_clone_object() {
        let mut b = bitmap();
        b.move_by(1.0, 2.0);
        let c = b.clone_object();
        assert_eq!(c.name, "copy_photo");
        assert_eq!(c.image().key, "photo.png");
        assert!(c.matrix().approx_eq(b.matrix(), EPS));
    }
}
