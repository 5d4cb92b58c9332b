//! Editor gestures: shape tools, rotating through the transform box and
//! the toolbar actions.

use crate::error::{StageError, StageResult};
use crate::events::{EventTarget, MouseEventKind, MouseHandler, mouse_handler};
use crate::geometry::{AlignBase, Geometry, Orientation, Path, PointExt, Rectangle, Transformable};
use crate::layer::LayerId;
use crate::objects::{LayerObject, ObjectId, Shaper};
use crate::stage::Stage;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Scale factor of one scale-up step; scale-down uses [`SCALE_DOWN`].
pub const SCALE_UP: f64 = 1.1;
pub const SCALE_DOWN: f64 = 0.9;
/// Rotation of one rotate step (radians).
pub const ROTATE_STEP: f64 = 0.1;
/// Offset of a copied object from its original.
pub const COPY_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// Shapes the editor can draw with a press-drag-release gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeTool {
    Rectangle,
    Arrow,
    Ellipse,
}

impl ShapeTool {
    /// Name given to shapes created with this tool.
    pub fn object_name(self) -> &'static str {
        match self {
            ShapeTool::Rectangle => "newRect",
            ShapeTool::Arrow => "newArrow",
            ShapeTool::Ellipse => "newEllipse",
        }
    }

    /// Seed geometry at `p`, resized while the gesture runs.
    pub fn path(self, p: Point) -> Path {
        match self {
            ShapeTool::Rectangle => Rectangle::new(p, Point::new(p.x + 1.0, p.y + 1.0)).to_path(),
            ShapeTool::Arrow => {
                let mut arrow = Path::polygon(&[
                    Point::new(0.0, 1.0),
                    Point::new(1.0, 1.0),
                    Point::new(1.0, 0.0),
                    Point::new(2.0, 2.0),
                    Point::new(1.0, 4.0),
                    Point::new(1.0, 3.0),
                    Point::new(0.0, 3.0),
                ]);
                arrow.move_by(p.x, p.y);
                arrow
            }
            ShapeTool::Ellipse => Path::ellipse(Point::new(p.x + 0.5, p.y + 0.5), 0.5, 0.5),
        }
    }
}

/// What the pointer is currently doing on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EditorMode {
    #[default]
    Idle,
    /// A shape tool is armed; the next press starts a shape.
    Create(ShapeTool),
    /// A new shape follows the pointer from `start`.
    Drawing { object: ObjectId, start: Point },
    /// The selection rotates with rotate handle `handle`.
    Rotating { handle: usize },
}

/// Toolbar actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditAction {
    NewShape { tool: ShapeTool },
    Clear,
    Align { base: AlignBase },
    Mirror { orientation: Orientation },
    ScaleUp,
    ScaleDown,
    RotateLeft,
    RotateRight,
    Delete,
    Copy,
}

/// Down handler of editable objects: adopt their colors for new shapes and
/// put the transform box on them.
pub(crate) fn select_on_down() -> Rc<MouseHandler> {
    mouse_handler(|stage, e| {
        let EventTarget::Object(id) = e.target else {
            return;
        };
        if stage.mode != EditorMode::Idle {
            return;
        }
        if let Some((stroke, fill)) = stage.object(id).map(|o| (o.style().stroke, o.style().fill.clone())) {
            stage.new_shape_style.stroke = stroke;
            stage.new_shape_style.fill = fill;
        }
        if let Err(err) = stage.tr_box_mut().apply(id) {
            log::warn!("Could not select {id}: {err}");
        }
    })
}

impl Stage {
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Add an object that selects on press and drags with the pointer.
    pub fn add_editable(&mut self, layer: LayerId, obj: impl Into<LayerObject>) -> StageResult<ObjectId> {
        let mut obj = obj.into();
        obj.events_mut()
            .add_event_listener(MouseEventKind::Down, Some(Rc::clone(&self.editable_handler)));
        let id = self.add_object(layer, obj)?;
        self.make_draggable(id)?;
        Ok(id)
    }

    /// Arm a shape tool. Drops the current selection.
    pub fn set_tool(&mut self, tool: ShapeTool) {
        self.tr_box_mut().unset();
        self.mode = EditorMode::Create(tool);
        log::debug!("Tool armed: {tool:?}");
    }

    pub fn perform(&mut self, action: EditAction) -> StageResult<()> {
        log::debug!("Action: {action:?}");
        let center = self.tr_box.center();
        match action {
            EditAction::NewShape { tool } => self.set_tool(tool),
            EditAction::Clear => self.clear(),
            EditAction::Align { base } => self.tr_box_mut().align(base),
            EditAction::Mirror { orientation } => self.tr_box_mut().mirror(orientation),
            EditAction::ScaleUp => self.tr_box_mut().scale(SCALE_UP, SCALE_UP, center),
            EditAction::ScaleDown => self.tr_box_mut().scale(SCALE_DOWN, SCALE_DOWN, center),
            EditAction::RotateLeft => self.rotate_selection(-ROTATE_STEP, center),
            EditAction::RotateRight => self.rotate_selection(ROTATE_STEP, center),
            EditAction::Delete => {
                if let Some(id) = self.tr_box.selected() {
                    self.remove_object(id);
                }
            }
            EditAction::Copy => self.copy_selection()?,
        }
        Ok(())
    }

    fn rotate_selection(&mut self, angle: f64, pivot: Point) {
        let mut tr = self.tr_box_mut();
        tr.rotate(angle, pivot, true);
        tr.update_rects();
    }

    fn copy_selection(&mut self) -> StageResult<()> {
        let Some(id) = self.tr_box.selected() else {
            return Ok(());
        };
        let layer = self.layer_of(id).ok_or(StageError::UnknownObject(id))?;
        let mut copy = self
            .object(id)
            .ok_or(StageError::UnknownObject(id))?
            .clone_object();
        copy.move_by(COPY_OFFSET.x, COPY_OFFSET.y);
        let copy_id = self.add_editable(layer, copy)?;
        self.tr_box_mut().apply(copy_id)
    }

    fn begin_shape(&mut self, tool: ShapeTool, pos: Point) {
        let Some(layer) = self.main_layer() else {
            log::warn!("No main layer; cannot create {tool:?}");
            return;
        };
        let shaper = Shaper::from_path(tool.object_name(), tool.path(pos), self.new_shape_style.clone());
        match self.add_editable(layer, shaper) {
            Ok(object) => self.mode = EditorMode::Drawing { object, start: pos },
            Err(err) => log::warn!("Could not create {tool:?}: {err}"),
        }
    }

    /// Editor side of pointer input; runs after objects saw the event.
    pub(crate) fn editor_pointer(&mut self, kind: MouseEventKind, pos: Point) {
        match (kind, self.mode) {
            (MouseEventKind::Down, EditorMode::Create(tool)) => self.begin_shape(tool, pos),
            (MouseEventKind::Down, EditorMode::Idle) => {
                if self.object_under_point(pos).is_none() {
                    self.tr_box_mut().unset();
                }
            }
            (MouseEventKind::Move, EditorMode::Drawing { object, start }) => {
                let target = Rectangle::new(start, pos).normalized();
                if let Some(obj) = self.object_mut(object) {
                    obj.place_into_rect(target);
                }
                self.redraw_layer_of(object);
            }
            (MouseEventKind::Move, EditorMode::Rotating { handle }) => {
                let c = self.tr_box.center();
                let Some(corner) = self.tr_box.point(handle) else {
                    return;
                };
                let angle = pos.angle_to(c) - corner.angle_to(c);
                self.tr_box_mut().rotate(angle, c, true);
            }
            (MouseEventKind::Up | MouseEventKind::Out, mode) => {
                match mode {
                    EditorMode::Drawing { object, .. } => {
                        self.mode = EditorMode::Idle;
                        if let Err(err) = self.tr_box_mut().apply(object) {
                            log::warn!("Could not select new shape: {err}");
                        }
                    }
                    EditorMode::Rotating { .. } => {
                        self.mode = EditorMode::Idle;
                        self.tr_box_mut().end_rotate();
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}
