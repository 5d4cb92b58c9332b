//! Rendering style: colors, fills and gradients.

use crate::geometry::{PointExt, Rectangle};
use kurbo::Point;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn gray() -> Self {
        Self::new(128, 128, 128, 255)
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Format as `#rrggbb`, appending alpha when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Gradient shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

/// A color stop at an offset in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: SerializableColor,
}

/// Resolved gradient endpoints for one draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientGeometry {
    Linear { start: Point, end: Point },
    Radial { center: Point, radius: f64 },
}

/// Linear or radial gradient with ordered color stops.
///
/// `scale` and `rotation` are applied around the midpoint of the span the
/// gradient is laid across.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub kind: GradientKind,
    stops: Vec<ColorStop>,
    pub scale: f64,
    pub rotation: f64,
}

impl Default for Gradient {
    fn default() -> Self {
        Self::new(GradientKind::Linear)
    }
}

impl Gradient {
    pub fn new(kind: GradientKind) -> Self {
        Self {
            kind,
            stops: Vec::new(),
            scale: 1.0,
            rotation: 0.0,
        }
    }

    /// Builder-style stop insertion.
    pub fn with_stop(mut self, offset: f64, color: SerializableColor) -> Self {
        self.add_color_stop(offset, color);
        self
    }

    /// Insert or replace the stop at `offset`, keeping stops ordered.
    pub fn add_color_stop(&mut self, offset: f64, color: SerializableColor) {
        match self.stops.iter().position(|s| s.offset >= offset) {
            Some(i) if self.stops[i].offset == offset => self.stops[i].color = color,
            Some(i) => self.stops.insert(i, ColorStop { offset, color }),
            None => self.stops.push(ColorStop { offset, color }),
        }
    }

    pub fn remove_color_stop(&mut self, offset: f64) -> Option<SerializableColor> {
        let i = self.stops.iter().position(|s| s.offset == offset)?;
        Some(self.stops.remove(i).color)
    }

    pub fn has_stop(&self, offset: f64) -> bool {
        self.stop_color(offset).is_some()
    }

    pub fn stop_color(&self, offset: f64) -> Option<SerializableColor> {
        self.stops.iter().find(|s| s.offset == offset).map(|s| s.color)
    }

    /// Move a stop to a new offset; no-op when there is no stop at `old`.
    pub fn set_stop_index(&mut self, old: f64, new: f64) {
        if let Some(color) = self.remove_color_stop(old) {
            self.add_color_stop(new, color);
        }
    }

    /// Offsets of all stops, or only of those with `color`.
    pub fn stop_indexes(&self, color: Option<SerializableColor>) -> Vec<f64> {
        self.stops
            .iter()
            .filter(|s| color.is_none_or(|c| s.color == c))
            .map(|s| s.offset)
            .collect()
    }

    pub fn clear_stops(&mut self) {
        self.stops.clear();
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Lay the gradient across the span `from -> to`.
    pub fn geometry(&self, mut from: Point, mut to: Point) -> GradientGeometry {
        let c = from.midpoint(to);
        match self.kind {
            GradientKind::Linear => {
                from.scale(self.scale, self.scale, c);
                to.scale(self.scale, self.scale, c);
                from.rotate(self.rotation, c);
                to.rotate(self.rotation, c);
                GradientGeometry::Linear { start: from, end: to }
            }
            GradientKind::Radial => {
                to.scale(self.scale, self.scale, c);
                GradientGeometry::Radial {
                    center: c,
                    radius: to.x - c.x,
                }
            }
        }
    }

    /// Horizontal span through the vertical center of `bounds`, the span
    /// shape fills use.
    pub fn geometry_for_bounds(&self, bounds: &Rectangle) -> GradientGeometry {
        let y = bounds.center().y;
        self.geometry(Point::new(bounds.from.x, y), Point::new(bounds.to.x, y))
    }
}

/// Fill paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    Solid(SerializableColor),
    Gradient(Gradient),
}

/// Rendering style of a scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Stroke color (None = no stroke).
    pub stroke: Option<SerializableColor>,
    /// Fill (None = no fill).
    pub fill: Option<Fill>,
    /// Stroke width; 0 disables the stroke.
    pub stroke_width: f64,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub shadow_color: Option<SerializableColor>,
    #[serde(default)]
    pub shadow_blur: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: Some(SerializableColor::black()),
            fill: Some(Fill::Solid(SerializableColor::white())),
            stroke_width: 1.0,
            opacity: 1.0,
            shadow_color: None,
            shadow_blur: 0.0,
        }
    }
}

impl Style {
    /// Style with only a solid fill.
    pub fn filled(color: SerializableColor) -> Self {
        Self {
            stroke: None,
            fill: Some(Fill::Solid(color)),
            ..Self::default()
        }
    }

    pub fn with_stroke(mut self, color: Option<SerializableColor>, width: f64) -> Self {
        self.stroke = color;
        self.stroke_width = width;
        self
    }

    pub fn with_fill(mut self, fill: Option<Fill>) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_shadow(mut self, color: SerializableColor, blur: f64) -> Self {
        self.shadow_color = Some(color);
        self.shadow_blur = blur;
        self
    }

    /// Stroke color when the stroke is actually drawn.
    pub fn effective_stroke(&self) -> Option<SerializableColor> {
        if self.stroke_width == 0.0 {
            None
        } else {
            self.stroke
        }
    }
}
