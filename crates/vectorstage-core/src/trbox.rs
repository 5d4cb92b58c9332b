//! Transform box: interactive handles that scale, mirror and rotate the
//! selected object.
//!
//! The box tracks eight control points around the selection:
//!
//! ```text
//!  p1 ---- p5 ---- p2
//!  |                |
//!  p8      c       p6
//!  |                |
//!  p4 ---- p7 ---- p3
//! ```
//!
//! Every point carries a square scale handle (`so1..so8`); the corners also
//! carry a larger rotate handle (`ro1..ro4`) underneath. Handles are plain
//! [`Shaper`]s living on the stage's main layer while something is
//! selected.
//!
//! [`TrBox`] holds the geometry and is read through [`Stage::tr_box`].
//! Operations that touch scene objects go through [`TrBoxMut`], obtained
//! from [`Stage::tr_box_mut`].

use crate::config::StageConfig;
use crate::editor::EditorMode;
use crate::error::{StageError, StageResult};
use crate::events::{MouseEventKind, MouseHandler, mouse_handler};
use crate::geometry::{AlignBase, Geometry, Orientation, Path, PointExt, Rectangle, Transformable};
use crate::layer::LayerId;
use crate::objects::{LayerObject, ObjectId, Shaper};
use crate::stage::Stage;
use crate::style::{SerializableColor, Style};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Number of control points.
pub const POINT_COUNT: usize = 8;

/// Number of corner points carrying rotate handles.
pub const CORNER_COUNT: usize = 4;

/// Interaction state of the transform box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrBoxState {
    #[default]
    Unselected,
    Selected,
    Scaling,
    Rotating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VSide {
    Up,
    Down,
}

/// Which side of p3 the p1 corner was last seen on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sides {
    h: HSide,
    v: VSide,
}

impl Default for Sides {
    fn default() -> Self {
        Self {
            h: HSide::Left,
            v: VSide::Up,
        }
    }
}

/// Ids of the handle objects currently placed on the main layer.
#[derive(Debug, Clone, Copy)]
struct Handles {
    scale: [ObjectId; POINT_COUNT],
    rotate: [ObjectId; CORNER_COUNT],
    center: ObjectId,
}

impl Handles {
    fn all(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.rotate
            .iter()
            .chain(self.scale.iter())
            .chain(std::iter::once(&self.center))
            .copied()
    }
}

pub struct TrBox {
    points: [Point; POINT_COUNT],
    selected: Option<ObjectId>,
    state: TrBoxState,
    last_sides: Sides,
    rotate_point: Option<usize>,
    handles: Option<Handles>,
    /// Registered on the selection's `Drag` so the box follows it.
    follow_selection: Rc<MouseHandler>,
    scale_radius: f64,
    rotate_radius: f64,
    center_radius: f64,
    scale_color: SerializableColor,
    rotate_color: SerializableColor,
}

impl std::fmt::Debug for TrBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrBox")
            .field("points", &self.points)
            .field("selected", &self.selected)
            .field("state", &self.state)
            .field("rotate_point", &self.rotate_point)
            .finish_non_exhaustive()
    }
}

impl TrBox {
    pub fn new(config: &StageConfig) -> Self {
        Self {
            points: [Point::ORIGIN; POINT_COUNT],
            selected: None,
            state: TrBoxState::Unselected,
            last_sides: Sides::default(),
            rotate_point: None,
            handles: None,
            follow_selection: mouse_handler(|stage, _| stage.tr_box_mut().update_rects()),
            scale_radius: config.scale_handle_radius,
            rotate_radius: config.rotate_handle_radius,
            center_radius: config.center_marker_radius,
            scale_color: config.scale_handle_color,
            rotate_color: config.rotate_handle_color,
        }
    }

    pub fn state(&self) -> TrBoxState {
        self.state
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    pub fn points(&self) -> &[Point; POINT_COUNT] {
        &self.points
    }

    /// Control point `index` (0-based: p1 is 0).
    pub fn point(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// The corner the current rotation is driven by.
    pub fn rotate_point(&self) -> Option<Point> {
        self.rotate_point.and_then(|i| self.point(i))
    }

    /// Center of the p1-p3 diagonal.
    pub fn center(&self) -> Point {
        Rectangle::new(self.points[0], self.points[2]).center()
    }

    /// Reset the corners to `r` and recompute the midpoints.
    fn set_corners(&mut self, r: Rectangle) {
        let p = &mut self.points;
        p[0] = r.from;
        p[1] = Point::new(r.to.x, r.from.y);
        p[2] = r.to;
        p[3] = Point::new(r.from.x, r.to.y);
        self.update_centers();
    }

    fn update_centers(&mut self) {
        let p = &mut self.points;
        p[4] = p[0].midpoint(p[1]);
        p[5] = p[1].midpoint(p[2]);
        p[6] = p[2].midpoint(p[3]);
        p[7] = p[3].midpoint(p[0]);
    }

    /// Move the point under scale handle `handle` to `pos`, dragging the
    /// edges that share it.
    fn move_handle_point(&mut self, handle: usize, pos: Point) {
        let p = &mut self.points;
        match handle {
            0 => {
                p[0].x = pos.x;
                p[3].x = pos.x;
                p[0].y = pos.y;
                p[1].y = pos.y;
            }
            1 => {
                p[1].x = pos.x;
                p[2].x = pos.x;
                p[1].y = pos.y;
                p[0].y = pos.y;
            }
            2 => {
                p[2].x = pos.x;
                p[1].x = pos.x;
                p[2].y = pos.y;
                p[3].y = pos.y;
            }
            3 => {
                p[3].x = pos.x;
                p[0].x = pos.x;
                p[3].y = pos.y;
                p[2].y = pos.y;
            }
            4 => {
                p[0].y = pos.y;
                p[1].y = pos.y;
            }
            5 => {
                p[1].x = pos.x;
                p[2].x = pos.x;
            }
            6 => {
                p[2].y = pos.y;
                p[3].y = pos.y;
            }
            7 => {
                p[0].x = pos.x;
                p[3].x = pos.x;
            }
            _ => return,
        }
        self.update_centers();
    }

    /// Compare p1 against p3 and report which axes crossed since the last
    /// check. Coinciding coordinates keep the previous side.
    fn check_points_pos(&mut self) -> (bool, bool) {
        let (from, to) = (self.points[0], self.points[2]);

        let h = if from.is_left_to(to) {
            Some(HSide::Left)
        } else if from.is_right_to(to) {
            Some(HSide::Right)
        } else {
            None
        };
        let flip_h = match h {
            Some(side) if side != self.last_sides.h => {
                self.last_sides.h = side;
                true
            }
            _ => false,
        };

        let v = if from.is_up_to(to) {
            Some(VSide::Up)
        } else if from.is_down_to(to) {
            Some(VSide::Down)
        } else {
            None
        };
        let flip_v = match v {
            Some(side) if side != self.last_sides.v => {
                self.last_sides.v = side;
                true
            }
            _ => false,
        };

        (flip_h, flip_v)
    }

    /// Normalized bounds of the four corners.
    fn target_rect(&self) -> Option<Rectangle> {
        Path::polygon(&self.points[..CORNER_COUNT]).bound_rect()
    }
}

/// Mutable access to the transform box together with the stage it edits.
pub struct TrBoxMut<'a> {
    stage: &'a mut Stage,
}

impl<'a> TrBoxMut<'a> {
    pub(crate) fn new(stage: &'a mut Stage) -> Self {
        Self { stage }
    }

    pub fn state(&self) -> TrBoxState {
        self.stage.tr_box.state
    }

    /// Select `id`: unset the previous selection, follow the new one's drags
    /// and place the handles.
    pub fn apply(&mut self, id: ObjectId) -> StageResult<()> {
        if self.stage.object(id).is_none() {
            return Err(StageError::UnknownObject(id));
        }
        self.unset();

        let follow = Rc::clone(&self.stage.tr_box.follow_selection);
        if let Some(obj) = self.stage.object_mut(id) {
            obj.events_mut().add_event_listener(MouseEventKind::Drag, Some(follow));
        }
        let tr = &mut self.stage.tr_box;
        tr.selected = Some(id);
        tr.state = TrBoxState::Selected;
        log::info!("Transform box selected {id}");

        self.update_rects();
        self.place_objects();
        Ok(())
    }

    /// Clear the selection and remove the handles.
    pub fn unset(&mut self) {
        let follow = Rc::clone(&self.stage.tr_box.follow_selection);
        if let Some(id) = self.stage.tr_box.selected.take() {
            if let Some(obj) = self.stage.object_mut(id) {
                obj.events_mut()
                    .remove_event_listener(MouseEventKind::Drag, Some(&follow));
            }
            log::info!("Transform box released {id}");
        }
        let tr = &mut self.stage.tr_box;
        tr.state = TrBoxState::Unselected;
        tr.rotate_point = None;
        tr.last_sides = Sides::default();
        if matches!(self.stage.mode, EditorMode::Rotating { .. }) {
            self.stage.mode = EditorMode::Idle;
        }
        self.remove_objects();
    }

    /// Snap the box to the selection's bounding rectangle.
    pub fn update_rects(&mut self) {
        let Some(id) = self.stage.tr_box.selected else {
            return;
        };
        let Some(r) = self.stage.object(id).and_then(Transformable::bound_rect) else {
            return;
        };
        self.stage.tr_box.set_corners(r);
        self.update_rect_centers();
    }

    /// Move the handle objects onto the current points.
    pub fn update_rect_centers(&mut self) {
        let tr = &self.stage.tr_box;
        let Some(handles) = tr.handles else {
            return;
        };
        let points = tr.points;
        let center = tr.center();
        let (sr, rr, cr) = (tr.scale_radius, tr.rotate_radius, tr.center_radius);

        let placements = handles
            .scale
            .iter()
            .zip(points.iter())
            .map(|(&id, &p)| (id, p, sr))
            .chain(handles.rotate.iter().zip(points.iter()).map(|(&id, &p)| (id, p, rr)))
            .chain(std::iter::once((handles.center, center, cr)));
        for (id, p, r) in placements {
            if let Some(obj) = self.stage.object_mut(id) {
                obj.place_around_point(p, r);
            }
        }
        self.redraw_handles();
    }

    fn redraw_handles(&mut self) {
        if let Some(layer) = self.stage.main_layer().and_then(|id| self.stage.layer_mut(id)) {
            layer.redraw();
        }
    }

    fn place_objects(&mut self) {
        self.remove_objects();
        let Some(main) = self.stage.main_layer() else {
            log::warn!("No main layer; transform handles not placed");
            return;
        };

        let tr = &self.stage.tr_box;
        let points = tr.points;
        let center = tr.center();
        let scale_style = Style::filled(tr.scale_color);
        let rotate_style = Style::filled(tr.rotate_color);
        let (sr, rr, cr) = (tr.scale_radius, tr.rotate_radius, tr.center_radius);

        let square = |p: Point, r: f64| Rectangle::around_point(p, r).to_path();
        let mut scale_ids = [ObjectId::nil(); POINT_COUNT];
        let mut rotate_ids = [ObjectId::nil(); CORNER_COUNT];

        for (i, &p) in points.iter().enumerate() {
            // Rotate handles sit under the scale handle of the same corner.
            if i < CORNER_COUNT {
                let mut ro = Shaper::from_path(format!("ro{}", i + 1), square(p, rr), rotate_style.clone());
                ro.events.add_event_listener(
                    MouseEventKind::Down,
                    Some(mouse_handler(move |stage, _| stage.tr_box_mut().begin_rotate(i))),
                );
                rotate_ids[i] = self.add_handle(main, ro);
            }

            let mut so = Shaper::from_path(format!("so{}", i + 1), square(p, sr), scale_style.clone());
            so.events.add_event_listener(
                MouseEventKind::Drag,
                Some(mouse_handler(move |stage, e| stage.tr_box_mut().drag_scale_handle(i, e.pos))),
            );
            so.events.add_event_listener(
                MouseEventKind::DragEnd,
                Some(mouse_handler(|stage, _| stage.tr_box_mut().end_scale())),
            );
            scale_ids[i] = self.add_handle(main, so);
            if let Err(err) = self.stage.make_draggable(scale_ids[i]) {
                log::warn!("Scale handle not draggable: {err}");
            }
        }
        let marker = Shaper::from_path("center", Path::ellipse(center, cr, cr), scale_style);
        let center_id = self.add_handle(main, marker);

        self.stage.tr_box.handles = Some(Handles {
            scale: scale_ids,
            rotate: rotate_ids,
            center: center_id,
        });
    }

    fn add_handle(&mut self, layer: LayerId, handle: Shaper) -> ObjectId {
        let id = handle.id();
        if let Err(err) = self.stage.add_object(layer, handle) {
            log::warn!("Could not place transform handle: {err}");
        }
        id
    }

    fn remove_objects(&mut self) {
        let Some(handles) = self.stage.tr_box.handles.take() else {
            return;
        };
        for id in handles.all() {
            self.stage.remove_object(id);
        }
    }

    /// Rotate the box points about `pivot`, and the selection with them
    /// when `rotate_obj` is set.
    pub fn rotate(&mut self, angle: f64, pivot: Point, rotate_obj: bool) {
        let Some(id) = self.stage.tr_box.selected else {
            return;
        };
        for p in &mut self.stage.tr_box.points {
            p.rotate(angle, pivot);
        }
        if rotate_obj {
            if let Some(obj) = self.stage.object_mut(id) {
                obj.rotate(angle, pivot);
            }
            self.stage.redraw_layer_of(id);
        }
        self.update_rect_centers();
    }

    pub fn scale(&mut self, sx: f64, sy: f64, pivot: Point) {
        self.with_selection(|obj| obj.scale(sx, sy, pivot));
    }

    /// Align the selection within the stage rectangle.
    pub fn align(&mut self, base: AlignBase) {
        let rect = self.stage.rect();
        self.with_selection(|obj| obj.align(base, &rect));
    }

    pub fn mirror(&mut self, orientation: Orientation) {
        self.with_selection(|obj| obj.mirror(orientation));
    }

    fn with_selection(&mut self, f: impl FnOnce(&mut LayerObject)) {
        let Some(id) = self.stage.tr_box.selected else {
            return;
        };
        if let Some(obj) = self.stage.object_mut(id) {
            f(obj);
        }
        self.stage.redraw_layer_of(id);
        self.update_rects();
    }

    /// Scale handle `handle` (0-based) was dragged to `pos`.
    pub fn drag_scale_handle(&mut self, handle: usize, pos: Point) {
        let Some(id) = self.stage.tr_box.selected else {
            return;
        };
        let tr = &mut self.stage.tr_box;
        tr.state = TrBoxState::Scaling;
        tr.move_handle_point(handle, pos);
        let (flip_h, flip_v) = tr.check_points_pos();
        let target = tr.target_rect();

        if let Some(obj) = self.stage.object_mut(id) {
            if flip_h {
                log::debug!("Mirroring {id} horizontally");
                obj.mirror(Orientation::Horizontal);
            }
            if flip_v {
                log::debug!("Mirroring {id} vertically");
                obj.mirror(Orientation::Vertical);
            }
            if let Some(target) = target {
                obj.place_into_rect(target);
            }
        }
        self.stage.redraw_layer_of(id);
        self.update_rect_centers();
    }

    /// A scale handle drag finished.
    pub fn end_scale(&mut self) {
        let tr = &mut self.stage.tr_box;
        tr.last_sides = Sides::default();
        if tr.selected.is_some() {
            tr.state = TrBoxState::Selected;
        }
        self.update_rects();
    }

    /// Rotate handle `handle` (0-based corner) was pressed.
    pub fn begin_rotate(&mut self, handle: usize) {
        if self.stage.tr_box.selected.is_none() || handle >= CORNER_COUNT {
            return;
        }
        let tr = &mut self.stage.tr_box;
        tr.rotate_point = Some(handle);
        tr.state = TrBoxState::Rotating;
        self.stage.mode = EditorMode::Rotating { handle };
    }

    /// The rotating gesture finished.
    pub fn end_rotate(&mut self) {
        let tr = &mut self.stage.tr_box;
        tr.rotate_point = None;
        if tr.selected.is_some() {
            tr.state = TrBoxState::Selected;
        }
        self.update_rects();
    }
}
