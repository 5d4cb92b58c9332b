//! Demo scene and a built-in block font.

use kurbo::Point;
use std::rc::Rc;
use vectorstage_core::geometry::Geometry;
use vectorstage_core::style::GradientKind;
use vectorstage_core::{
    Fill, Glyph, GlyphSource, Gradient, LayerId, Path, Rectangle, SerializableColor, Shaper, Stage, StageResult, Style,
    Text, Transformable,
};

/// Font units per em.
const UNITS: f64 = 1000.0;

/// Font whose glyphs are plain blocks; enough to lay out and select text
/// without loading font files.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockGlyphs;

impl GlyphSource for BlockGlyphs {
    fn glyph(&self, ch: char) -> Glyph {
        let (width, height) = match ch {
            ' ' => return Glyph { path: None, advance: 300.0 },
            '.' | ',' | ':' | ';' | '!' | '\'' => (150.0, 150.0),
            c if c.is_lowercase() => (450.0, 500.0),
            _ => (500.0, 700.0),
        };
        let path = Rectangle::new(Point::ORIGIN, Point::new(width, height)).to_path();
        Glyph {
            path: Some(path),
            advance: width + 100.0,
        }
    }

    fn units_height(&self) -> f64 {
        UNITS
    }
}

/// Fill the demo scene: three editable shapes on `shapes` and a title on
/// `labels`.
pub fn populate(stage: &mut Stage, shapes: LayerId, labels: LayerId) -> StageResult<()> {
    let outline = Some(SerializableColor::black());

    let rect = Shaper::from_path(
        "rect",
        Rectangle::new(Point::new(100.0, 100.0), Point::new(260.0, 200.0)).to_path(),
        Style::filled(SerializableColor::new(120, 170, 230, 255)).with_stroke(outline, 2.0),
    );
    stage.add_editable(shapes, rect)?;

    let ellipse = Shaper::from_path(
        "ellipse",
        Path::ellipse(Point::new(420.0, 150.0), 80.0, 50.0),
        Style::filled(SerializableColor::new(240, 200, 90, 255)).with_stroke(outline, 1.0),
    );
    stage.add_editable(shapes, ellipse)?;

    let gradient = Gradient::new(GradientKind::Linear)
        .with_stop(0.0, SerializableColor::new(230, 60, 60, 255))
        .with_stop(1.0, SerializableColor::new(90, 40, 160, 255));
    let star = Shaper::from_path(
        "star",
        Path::star(Point::new(600.0, 400.0), 80.0, 35.0, 5, 0.0),
        Style::default()
            .with_fill(Some(Fill::Gradient(gradient)))
            .with_stroke(outline, 1.0),
    );
    stage.add_editable(shapes, star)?;

    let mut title = Text::new(
        "title",
        "vectorstage",
        Rc::new(BlockGlyphs),
        Style::filled(SerializableColor::black()),
    )
    .with_font_size(32.0);
    title.move_by(100.0, 520.0);
    stage.add_editable(labels, title)?;

    log::info!("Demo scene ready");
    Ok(())
}
