//! Vello-backed drawing surface.

use crate::error::{RenderResult, RendererError};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape, Size, Stroke};
use peniko::{Color, Fill};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use vectorstage_core::style::GradientGeometry;
use vectorstage_core::{ImageSource, Matrix, Paint, SerializableColor, Surface};
use vello::Scene;

/// Records a layer's drawing into a [`vello::Scene`].
///
/// The scene is rebuilt from scratch on every layer redraw (`clear` resets
/// it); the host renders it to a texture or window.
pub struct VelloSurface {
    scene: Scene,
    size: Size,
    transform: Affine,
    alpha: f32,
    path: BezPath,
    /// Decoded images keyed by [`ImageSource::key`].
    image_cache: HashMap<String, peniko::ImageData>,
    /// Keys that failed to decode; reported once.
    broken_images: HashSet<String>,
}

impl std::fmt::Debug for VelloSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VelloSurface")
            .field("size", &self.size)
            .field("transform", &self.transform)
            .field("alpha", &self.alpha)
            .field("cached_images", &self.image_cache.len())
            .finish_non_exhaustive()
    }
}

impl VelloSurface {
    pub fn new(size: Size) -> Self {
        Self {
            scene: Scene::new(),
            size,
            transform: Affine::IDENTITY,
            alpha: 1.0,
            path: BezPath::new(),
            image_cache: HashMap::new(),
            broken_images: HashSet::new(),
        }
    }

    /// The scene built since the last clear.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take the scene, leaving an empty one behind.
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    pub fn cached_images(&self) -> usize {
        self.image_cache.len()
    }

    fn color(&self, color: SerializableColor) -> Color {
        Color::from(color).multiply_alpha(self.alpha)
    }

    fn gradient(&self, gradient: &vectorstage_core::Gradient, geometry: GradientGeometry) -> peniko::Gradient {
        let stops: Vec<(f32, Color)> = gradient
            .stops()
            .iter()
            .map(|s| (s.offset as f32, self.color(s.color)))
            .collect();
        let base = match geometry {
            GradientGeometry::Linear { start, end } => peniko::Gradient::new_linear(start, end),
            GradientGeometry::Radial { center, radius } => peniko::Gradient::new_radial(center, radius as f32),
        };
        base.with_stops(stops.as_slice())
    }

    /// Decode `image` into RGBA8, caching by key.
    pub fn decode_image(&mut self, image: &ImageSource) -> RenderResult<peniko::ImageData> {
        if let Some(cached) = self.image_cache.get(&image.key) {
            return Ok(cached.clone());
        }
        let decoded = ::image::load_from_memory(&image.data).map_err(|source| RendererError::ImageDecode {
            key: image.key.clone(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(RendererError::RenderFailed(format!("image '{}' is empty", image.key)));
        }
        let data = peniko::ImageData {
            data: peniko::Blob::new(Arc::new(rgba.into_vec())),
            format: peniko::ImageFormat::Rgba8,
            width,
            height,
            alpha_type: peniko::ImageAlphaType::Alpha,
        };
        self.image_cache.insert(image.key.clone(), data.clone());
        log::debug!("Decoded image '{}' ({}x{})", image.key, width, height);
        Ok(data)
    }

    /// Gray box with a cross, drawn where an image failed to decode.
    fn draw_placeholder(&mut self, image: &ImageSource) {
        let bounds = Rect::new(0.0, 0.0, image.width, image.height);
        let rect_path = bounds.to_path(0.1);
        let fill = self.color(SerializableColor::new(200, 200, 200, 255));
        let cross = self.color(SerializableColor::new(150, 150, 150, 255));
        self.scene
            .fill(Fill::NonZero, self.transform, fill, None, &rect_path);

        let stroke = Stroke::new(2.0);
        let mut x_path = BezPath::new();
        x_path.move_to(Point::new(bounds.x0, bounds.y0));
        x_path.line_to(Point::new(bounds.x1, bounds.y1));
        x_path.move_to(Point::new(bounds.x1, bounds.y0));
        x_path.line_to(Point::new(bounds.x0, bounds.y1));
        self.scene.stroke(&stroke, self.transform, cross, None, &x_path);
    }
}

impl Surface for VelloSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.scene.reset();
        self.path = BezPath::new();
        self.transform = Affine::IDENTITY;
        self.alpha = 1.0;
    }

    fn set_transform(&mut self, m: Option<&Matrix>) {
        self.transform = m.map_or(Affine::IDENTITY, Matrix::to_affine);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0) as f32;
    }

    fn set_shadow(&mut self, color: Option<SerializableColor>, blur: f64) {
        // Vello has no general drop shadow for arbitrary paths.
        if color.is_some() {
            log::trace!("Shadow (blur {blur}) not rendered by the Vello surface");
        }
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
    }

    fn line_to(&mut self, p: Point) {
        self.path.line_to(p);
    }

    fn quad_to(&mut self, c: Point, p: Point) {
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.path.curve_to(c1, c2, p);
    }

    fn close_path(&mut self) {
        self.path.close_path();
    }

    fn stroke(&mut self, color: SerializableColor, width: f64) {
        if self.path.elements().is_empty() {
            return;
        }
        let brush = self.color(color);
        self.scene
            .stroke(&Stroke::new(width), self.transform, brush, None, &self.path);
    }

    fn fill(&mut self, paint: &Paint) {
        if self.path.elements().is_empty() {
            return;
        }
        match paint {
            Paint::Solid(color) => {
                let brush = self.color(*color);
                self.scene
                    .fill(Fill::NonZero, self.transform, brush, None, &self.path);
            }
            Paint::Gradient { gradient, geometry } => {
                let brush = self.gradient(gradient, *geometry);
                self.scene
                    .fill(Fill::NonZero, self.transform, &brush, None, &self.path);
            }
        }
    }

    fn draw_image(&mut self, image: &ImageSource) {
        let data = match self.decode_image(image) {
            Ok(data) => data,
            Err(err) => {
                if self.broken_images.insert(image.key.clone()) {
                    log::warn!("{err}");
                }
                self.draw_placeholder(image);
                return;
            }
        };

        // Stretch the pixels over the display size.
        let sx = image.width / f64::from(data.width);
        let sy = image.height / f64::from(data.height);
        let transform = self.transform * Affine::scale_non_uniform(sx, sy);
        let brush = peniko::ImageBrush::new(data).with_alpha(self.alpha);
        self.scene.draw_image(&brush, transform);
    }
}
