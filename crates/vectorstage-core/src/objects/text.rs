//! Text rendered from glyph outlines.

use super::{ObjectId, Renderable, Shaper};
use crate::events::MouseListeners;
use crate::geometry::{AlignBase, Geometry, Matrix, Path, Rectangle, Transformable};
use crate::layer::LayerId;
use crate::style::Style;
use crate::surface::Surface;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// One glyph outline in font units, y pointing up.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Glyph {
    /// Outline; `None` for blank glyphs such as space.
    pub path: Option<Path>,
    /// Horizontal advance.
    pub advance: f64,
}

/// Supplies glyph outlines for a font. Font file parsing lives elsewhere.
pub trait GlyphSource: fmt::Debug {
    fn glyph(&self, ch: char) -> Glyph;

    /// Height of the font's em square in font units.
    fn units_height(&self) -> f64;
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A [`Shaper`] whose shapes are laid out glyph outlines.
#[derive(Debug)]
pub struct Text {
    shaper: Shaper,
    text: String,
    font: Rc<dyn GlyphSource>,
    font_size: f64,
    align: TextAlign,
}

/// Default font size in pixels.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Paths moved as one unit during alignment.
struct PathGroup(Vec<Path>);

impl Transformable for PathGroup {
    fn move_by(&mut self, dx: f64, dy: f64) {
        self.0.iter_mut().for_each(|p| p.move_by(dx, dy));
    }

    fn rotate(&mut self, angle: f64, pivot: Point) {
        self.0.iter_mut().for_each(|p| p.rotate(angle, pivot));
    }

    fn scale(&mut self, sx: f64, sy: f64, pivot: Point) {
        self.0.iter_mut().for_each(|p| p.scale(sx, sy, pivot));
    }

    fn matrix_transform(&mut self, m: &Matrix) {
        self.0.iter_mut().for_each(|p| p.matrix_transform(m));
    }

    fn bound_rect(&self) -> Option<Rectangle> {
        self.0
            .iter()
            .filter_map(Path::bound_rect)
            .reduce(|a, b| a.union(&b))
    }
}

impl Text {
    pub fn new(name: impl Into<String>, text: &str, font: Rc<dyn GlyphSource>, style: Style) -> Self {
        let mut t = Self {
            shaper: Shaper::new(name, Vec::new(), style),
            text: String::new(),
            font,
            font_size: DEFAULT_FONT_SIZE,
            align: TextAlign::Left,
        };
        t.set_text(text);
        t
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self.relayout();
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self.relayout();
        self
    }

    pub fn id(&self) -> ObjectId {
        self.shaper.id()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn text_align(&self) -> TextAlign {
        self.align
    }

    /// The underlying shaper (read-only; glyph shapes are owned by the layout).
    pub fn shaper(&self) -> &Shaper {
        &self.shaper
    }

    pub fn name(&self) -> &str {
        &self.shaper.name
    }

    pub fn style(&self) -> &Style {
        &self.shaper.style
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.shaper.style
    }

    pub fn events(&self) -> &MouseListeners {
        &self.shaper.events
    }

    pub fn events_mut(&mut self) -> &mut MouseListeners {
        &mut self.shaper.events
    }

    pub fn visible(&self) -> bool {
        self.shaper.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.shaper.visible = visible;
    }

    pub fn layer(&self) -> Option<LayerId> {
        self.shaper.layer()
    }

    pub(crate) fn set_layer(&mut self, layer: Option<LayerId>) {
        self.shaper.set_layer(layer);
    }

    pub fn matrix(&self) -> &Matrix {
        self.shaper.matrix()
    }

    /// Lay out `text` and rebuild the shapes.
    ///
    /// Glyphs are placed left to right in font units; `\n` starts a new
    /// line `h + h/4` lower. The result is scaled to `0.75 * font_size`
    /// pixels per em with y flipped, then each line is aligned.
    pub fn set_text(&mut self, text: &str) {
        let h = self.font.units_height();
        let mut lines: Vec<PathGroup> = vec![PathGroup(Vec::new())];
        let (mut ofs_x, mut ofs_y) = (0.0, 0.0);

        for ch in text.chars() {
            if ch == '\n' {
                lines.push(PathGroup(Vec::new()));
                ofs_x = 0.0;
                ofs_y -= h + h / 4.0;
                continue;
            }
            let glyph = self.font.glyph(ch);
            if let Some(mut path) = glyph.path {
                path.move_by(ofs_x, ofs_y);
                if let Some(line) = lines.last_mut() {
                    line.0.push(path);
                }
            }
            ofs_x += glyph.advance;
        }

        if h > 0.0 {
            let sc = 0.75 * self.font_size / h;
            for line in &mut lines {
                line.scale(sc, -sc, Point::ORIGIN);
            }
        } else {
            log::warn!("Font reports zero units height; text left unscaled");
        }

        if self.align != TextAlign::Left {
            let all = lines
                .iter()
                .filter_map(PathGroup::bound_rect)
                .reduce(|a, b| a.union(&b));
            if let Some(mut r) = all {
                let k = match self.align {
                    TextAlign::Center => r.width() / 2.0,
                    _ => r.width(),
                };
                r.from.x -= k;
                r.to.x -= k;
                let base = match self.align {
                    TextAlign::Center => AlignBase::Center,
                    _ => AlignBase::Right,
                };
                for line in &mut lines {
                    line.align(base, &r);
                }
            }
        }

        self.text = text.to_string();
        self.shaper
            .set_shapes(lines.into_iter().flat_map(|l| l.0).collect());
    }

    /// Switch font and size, then lay the text out again.
    pub fn set_font(&mut self, font: Rc<dyn GlyphSource>, font_size: f64) {
        self.font = font;
        self.font_size = font_size;
        self.relayout();
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.align = align;
        self.relayout();
    }

    fn relayout(&mut self) {
        let text = std::mem::take(&mut self.text);
        self.set_text(&text);
    }

    /// A detached copy with the same name, text and transform.
    pub fn clone_object(&self) -> Text {
        let mut cloned = Text::new(
            self.shaper.name.clone(),
            "",
            Rc::clone(&self.font),
            self.shaper.style.clone(),
        );
        cloned.font_size = self.font_size;
        cloned.align = self.align;
        cloned.set_text(&self.text);
        cloned.shaper.visible = self.shaper.visible;
        cloned.matrix_transform(self.matrix());
        cloned
    }
}

impl Transformable for Text {
    fn move_by(&mut self, dx: f64, dy: f64) {
        self.shaper.move_by(dx, dy);
    }

    fn rotate(&mut self, angle: f64, pivot: Point) {
        self.shaper.rotate(angle, pivot);
    }

    fn scale(&mut self, sx: f64, sy: f64, pivot: Point) {
        self.shaper.scale(sx, sy, pivot);
    }

    fn matrix_transform(&mut self, m: &Matrix) {
        self.shaper.matrix_transform(m);
    }

    fn bound_rect(&self) -> Option<Rectangle> {
        self.shaper.bound_rect()
    }
}

impl Renderable for Text {
    /// Hit test against the layout box rather than the glyph outlines.
    fn has_point(&self, p: Point) -> bool {
        let s = &self.shaper;
        if s.layer().is_none() || !s.visible || s.shapes().is_empty() {
            return false;
        }
        let Some(bounds) = s.bounds() else {
            return false;
        };
        let mut outline = bounds.to_path();
        outline.matrix_transform(s.matrix());
        outline.contains(p)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.shaper.draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const EPS: f64 = 1e-9;

    /// Every glyph is a 600x1000 unit box; space is blank.
    #[derive(Debug)]
    struct BoxFont;

    impl GlyphSource for BoxFont {
        fn glyph(&self, ch: char) -> Glyph {
            let path = (ch != ' ').then(|| {
                Rectangle::new(Point::new(0.0, 0.0), Point::new(600.0, 1000.0)).to_path()
            });
            Glyph { path, advance: 600.0 }
        }

        fn units_height(&self) -> f64 {
            1000.0
        }
    }

    fn text(s: &str) -> Text {
        Text::new("label", s, Rc::new(BoxFont), Style::default())
    }

    #[test]
    fn test_layout_scale_and_flip() {
        // 12px -> 9 units per em, y flipped.
        let t = text("ab");
        assert_eq!(t.shaper().shapes().len(), 2);
        let r = t.bound_rect().unwrap();
        assert!((r.from.x - 0.0).abs() < EPS);
        assert!((r.to.x - 10.8).abs() < EPS);
        assert!((r.from.y + 9.0).abs() < EPS);
        assert!((r.to.y - 0.0).abs() < EPS);
    }

    #[test]
    fn test_space_advances() {
        let t = text("a b");
        let shapes = t.shaper().shapes();
        assert_eq!(shapes.len(), 2);
        let b = shapes[1].bound_rect().unwrap();
        assert!((b.from.x - 10.8).abs() < EPS);
        assert!((t.bound_rect().unwrap().to.x - 16.2).abs() < EPS);
    }

    #[test]
    fn test_newline_moves_down() {
        let t = text("a\nb");
        let shapes = t.shaper().shapes();
        let second = shapes[1].bound_rect().unwrap();
        // Line offset of -1250 units, flipped and scaled by 0.009.
        assert!((second.from.x - 0.0).abs() < EPS);
        assert!((second.to.y - 11.25).abs() < EPS);
    }

    #[test]
    fn test_right_and_center_align() {
        let t = text("ab\nc").with_align(TextAlign::Right);
        let shapes = t.shaper().shapes();
        let first = shapes[0].bound_rect().unwrap().union(&shapes[1].bound_rect().unwrap());
        let second = shapes[2].bound_rect().unwrap();
        assert!((first.to.x - 0.0).abs() < EPS);
        assert!((second.to.x - 0.0).abs() < EPS);

        let t = text("ab\nc").with_align(TextAlign::Center);
        let shapes = t.shaper().shapes();
        let second = shapes[2].bound_rect().unwrap();
        assert!((second.center().x - 0.0).abs() < EPS);
    }

    #[test]
    fn test_font_size_change_relayouts() {
        let mut t = text("a");
        t.set_font(Rc::new(BoxFont), 24.0);
        assert_eq!(t.text(), "a");
        assert!((t.height() - 18.0).abs() < EPS);
    }

    #[test]
    fn test_has_point_uses_layout_box() {
        let mut t = text("a b");
        assert!(!t.has_point(Point::new(8.0, -4.0)));
        t.set_layer(Some(Uuid::new_v4()));
        // Inside the gap left by the space glyph.
        assert!(t.has_point(Point::new(8.0, -4.0)));
        t.move_by(100.0, 0.0);
        assert!(t.has_point(Point::new(108.0, -4.0)));
        assert!(!t.has_point(Point::new(8.0, -4.0)));
    }

    #[test]
    fn test_clone_keeps_name() {
        let mut t = text("hi").with_font_size(20.0);
        t.move_by(5.0, 5.0);
        let c = t.clone_object();
        assert_eq!(c.name(), "label");
        assert_ne!(c.id(), t.id());
        assert_eq!(c.text(), "hi");
        let (a, b) = (t.bound_rect().unwrap(), c.bound_rect().unwrap());
        assert!((a.from.x - b.from.x).abs() < EPS);
        assert!((a.to.y - b.to.y).abs() < EPS);
    }
}
