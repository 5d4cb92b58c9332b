//! The stage: an ordered set of layers, pointer dispatch and dragging.
//!
//! Pointer input enters through [`Stage::dispatch`] in page coordinates.
//! The stage converts them to local coordinates, drives the active drag,
//! delivers the event to the objects under the pointer (top layer first,
//! topmost object first), runs the editor gestures and finally the
//! stage's own listeners.

use crate::config::StageConfig;
use crate::data_provider::DataProvider;
use crate::editor::{self, EditorMode};
use crate::error::{StageError, StageResult};
use crate::events::{EventTarget, MouseEvent, MouseEventKind, MouseHandler, MouseListeners, mouse_handler};
use crate::geometry::{Rectangle, Transformable};
use crate::layer::{Layer, LayerId};
use crate::objects::{LayerObject, ObjectId};
use crate::snapshot::SceneSnapshot;
use crate::style::Style;
use crate::surface::Surface;
use crate::trbox::{TrBox, TrBoxMut};
use kurbo::{Point, Vec2};
use std::rc::Rc;

#[derive(Debug, Clone, Copy)]
struct DragState {
    object: ObjectId,
    last: Point,
    /// Set once the pointer actually moved.
    dragged: bool,
}

pub struct Stage {
    layers: DataProvider<Layer>,
    main_layer: Option<LayerId>,
    origin: Point,
    drag: Option<DragState>,
    drag_handler: Rc<MouseHandler>,
    pub(crate) editable_handler: Rc<MouseHandler>,
    pub(crate) mode: EditorMode,
    pub(crate) tr_box: TrBox,
    /// Listeners for events nobody stopped on the way down.
    pub events: MouseListeners,
    pub(crate) new_shape_style: Style,
    config: StageConfig,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("layers", &self.layers.len())
            .field("main_layer", &self.main_layer)
            .field("origin", &self.origin)
            .field("mode", &self.mode)
            .field("tr_box", &self.tr_box)
            .finish_non_exhaustive()
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(StageConfig::default())
    }
}

impl Stage {
    pub fn new(config: StageConfig) -> Self {
        let drag_handler = mouse_handler(|stage, e| {
            if let EventTarget::Object(id) = e.target {
                if stage.drag_start(id, e.pos) {
                    e.stop_propagation();
                }
            }
        });
        Self {
            layers: DataProvider::new(),
            main_layer: None,
            origin: Point::ORIGIN,
            drag: None,
            drag_handler,
            editable_handler: editor::select_on_down(),
            mode: EditorMode::Idle,
            tr_box: TrBox::new(&config),
            events: MouseListeners::new(),
            new_shape_style: config.new_shape_style.clone(),
            config,
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// The stage area in local coordinates.
    pub fn rect(&self) -> Rectangle {
        Rectangle::new(Point::ORIGIN, Point::new(self.config.width, self.config.height))
    }

    /// Page position of the stage's top-left corner.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Style used by the shape tools; picks up the colors of the last
    /// selected object.
    pub fn new_shape_style(&self) -> &Style {
        &self.new_shape_style
    }

    pub fn set_new_shape_style(&mut self, style: Style) {
        self.new_shape_style = style;
    }

    // Layers

    /// Add a layer on top. The first layer becomes the main layer.
    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = layer.id();
        log::debug!("Stage: add layer {} '{}'", id, layer.name);
        self.layers.add(layer);
        self.main_layer.get_or_insert(id);
        id
    }

    /// Create a layer over `surface` using the configured frame rate.
    pub fn new_layer(&mut self, name: impl Into<String>, surface: Box<dyn Surface>) -> LayerId {
        let layer = Layer::new(name, surface).with_fps(self.config.layer_fps);
        self.add_layer(layer)
    }

    pub fn add_layer_at(&mut self, index: usize, layer: Layer) -> StageResult<LayerId> {
        let id = layer.id();
        self.layers.add_at(index, layer)?;
        self.main_layer.get_or_insert(id);
        Ok(id)
    }

    /// Remove a layer with its objects. Drops the selection and any drag
    /// that lived on it; the main layer moves to the bottom layer left.
    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        let index = self.layer_index(id)?;

        let selection_here = self.tr_box.selected().is_some_and(|s| self.layer_of(s) == Some(id));
        if selection_here || self.main_layer == Some(id) {
            self.tr_box_mut().unset();
        }
        if self.drag.is_some_and(|d| self.layer_of(d.object) == Some(id)) {
            self.drag = None;
        }

        let layer = self.layers.remove_at(index)?;
        if self.main_layer == Some(id) {
            self.main_layer = self.layers.item_at(0).map(Layer::id);
        }
        log::debug!("Stage: removed layer {id}");
        Some(layer)
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id() == id)
    }

    /// Layers bottom to top.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn layer_index(&self, id: LayerId) -> Option<usize> {
        self.layers.position(|l| l.id() == id)
    }

    pub fn set_layer_index(&mut self, id: LayerId, index: usize) -> StageResult<()> {
        let old = self.layer_index(id).ok_or(StageError::UnknownLayer(id))?;
        self.layers.set_item_index(old, index)
    }

    /// Layer new shapes and transform handles go to.
    pub fn main_layer(&self) -> Option<LayerId> {
        self.main_layer
    }

    pub fn set_main_layer(&mut self, id: LayerId) -> StageResult<()> {
        if self.layer_index(id).is_none() {
            return Err(StageError::UnknownLayer(id));
        }
        if self.main_layer != Some(id) {
            self.tr_box_mut().unset();
            self.main_layer = Some(id);
        }
        Ok(())
    }

    // Objects

    /// Add `obj` on top of `layer`, moving it off any other layer first.
    pub fn add_object(&mut self, layer: LayerId, obj: impl Into<LayerObject>) -> StageResult<ObjectId> {
        let obj = obj.into();
        let id = obj.id();
        let index = self.layer_index(layer).ok_or(StageError::UnknownLayer(layer))?;

        if let Some(current) = self.layer_of(id).filter(|&l| l != layer) {
            if let Some(other) = self.layer_mut(current) {
                other.remove_object(id);
            }
        }
        match self.layers.item_at_mut(index) {
            Some(target) => Ok(target.add_object(obj)),
            None => Err(StageError::UnknownLayer(layer)),
        }
    }

    /// Remove an object from whichever layer holds it.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<LayerObject> {
        if self.tr_box.selected() == Some(id) {
            self.tr_box_mut().unset();
        }
        if self.drag.is_some_and(|d| d.object == id) {
            self.drag = None;
        }
        let layer = self.layer_of(id)?;
        self.layer_mut(layer)?.remove_object(id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&LayerObject> {
        self.layers.iter().find_map(|l| l.object(id))
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut LayerObject> {
        self.layers.iter_mut().find_map(|l| l.object_mut(id))
    }

    /// Layer holding `id`.
    pub fn layer_of(&self, id: ObjectId) -> Option<LayerId> {
        self.layers.iter().find(|l| l.contains(id)).map(Layer::id)
    }

    pub fn redraw_layer_of(&mut self, id: ObjectId) {
        if let Some(layer) = self.layers.iter_mut().find(|l| l.contains(id)) {
            layer.redraw();
        }
    }

    /// Topmost object under `p` across all layers.
    pub fn object_under_point(&self, p: Point) -> Option<ObjectId> {
        self.layers.iter().rev().find_map(|l| l.object_under_point(p))
    }

    // Transform box

    pub fn tr_box(&self) -> &TrBox {
        &self.tr_box
    }

    pub fn tr_box_mut(&mut self) -> TrBoxMut<'_> {
        TrBoxMut::new(self)
    }

    // Dragging

    /// Let `id` be dragged by the pointer.
    pub fn make_draggable(&mut self, id: ObjectId) -> StageResult<()> {
        let handler = Rc::clone(&self.drag_handler);
        let obj = self.object_mut(id).ok_or(StageError::UnknownObject(id))?;
        obj.events_mut().add_event_listener(MouseEventKind::Down, Some(handler));
        Ok(())
    }

    pub fn stop_drag(&mut self, id: ObjectId) -> StageResult<()> {
        let handler = Rc::clone(&self.drag_handler);
        let obj = self.object_mut(id).ok_or(StageError::UnknownObject(id))?;
        obj.events_mut()
            .remove_event_listener(MouseEventKind::Down, Some(&handler));
        if self.drag.is_some_and(|d| d.object == id) {
            self.drag = None;
        }
        Ok(())
    }

    /// Object being dragged, if any.
    pub fn dragging(&self) -> Option<ObjectId> {
        self.drag.map(|d| d.object)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Returns false when another drag or an editor gesture is active.
    fn drag_start(&mut self, id: ObjectId, pos: Point) -> bool {
        if self.drag.is_some() || self.mode != EditorMode::Idle {
            return false;
        }
        self.drag = Some(DragState {
            object: id,
            last: pos,
            dragged: false,
        });
        true
    }

    fn drag_go(&mut self, pos: Point) {
        let Some(mut drag) = self.drag else {
            return;
        };
        if !drag.dragged {
            if pos == drag.last {
                return;
            }
            drag.dragged = true;
            self.drag = Some(drag);
            self.fire(drag.object, MouseEventKind::DragStart, drag.last, Vec2::ZERO);
            if self.drag.is_none_or(|d| d.object != drag.object) {
                return;
            }
        }

        let delta = pos - drag.last;
        drag.last = pos;
        self.drag = Some(drag);
        if let Some(obj) = self.object_mut(drag.object) {
            obj.move_by(delta.x, delta.y);
        }
        self.redraw_layer_of(drag.object);
        self.fire(drag.object, MouseEventKind::Drag, pos, delta);
    }

    fn drag_end(&mut self, pos: Point) {
        if let Some(drag) = self.drag.take() {
            self.fire(drag.object, MouseEventKind::DragEnd, pos, Vec2::ZERO);
        }
    }

    fn fire(&mut self, id: ObjectId, kind: MouseEventKind, pos: Point, delta: Vec2) {
        let mut event = MouseEvent::new(kind, pos, EventTarget::Object(id)).with_delta(delta);
        self.emit(id, &mut event);
    }

    /// Run every handler `id` has for the event's kind.
    fn emit(&mut self, id: ObjectId, event: &mut MouseEvent) {
        let handlers = match self.object(id) {
            Some(obj) => obj.events().handlers(event.kind),
            None => return,
        };
        for handler in handlers {
            handler(self, event);
        }
    }

    // Input

    /// Feed one pointer event at `page_pos`.
    pub fn dispatch(&mut self, kind: MouseEventKind, page_pos: Point) {
        let pos = Point::new(page_pos.x - self.origin.x, page_pos.y - self.origin.y);

        let mut limit = None;
        match kind {
            MouseEventKind::Move => {
                self.drag_go(pos);
                limit = Some(1);
            }
            MouseEventKind::Up | MouseEventKind::Out => self.drag_end(pos),
            _ => {}
        }

        let mut event = MouseEvent::new(kind, pos, EventTarget::Stage);
        let layer_ids: Vec<LayerId> = self.layers.iter().map(Layer::id).collect();
        for layer in layer_ids.into_iter().rev() {
            let hits = match self.layer(layer) {
                Some(l) => l.objects_under_point(pos, limit),
                None => continue,
            };
            for &id in &hits {
                event.target = EventTarget::Object(id);
                self.emit(id, &mut event);
                if !event.propagation {
                    break;
                }
            }
            if !event.propagation || (limit.is_some() && !hits.is_empty()) {
                break;
            }
        }

        self.editor_pointer(kind, pos);

        if event.propagation {
            event.target = EventTarget::Stage;
            for handler in self.events.handlers(kind) {
                handler(self, &mut event);
            }
        }
    }

    /// Draw every animated layer that changed since its last frame.
    pub fn tick(&mut self) {
        for layer in self.layers.iter_mut().filter(|l| l.is_animated()) {
            layer.draw();
        }
    }

    /// Remove every object, drop the selection and reset the editor.
    pub fn clear(&mut self) {
        self.mode = EditorMode::Idle;
        self.drag = None;
        self.tr_box_mut().unset();
        for layer in self.layers.iter_mut() {
            layer.clear();
        }
        log::info!("Stage cleared");
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::from(self)
    }
}

impl From<&Stage> for SceneSnapshot {
    fn from(stage: &Stage) -> Self {
        Self {
            width: stage.config.width,
            height: stage.config.height,
            layers: stage.layers().map(Into::into).collect(),
            tr_box: stage.tr_box().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use crate::objects::Shaper;
    use crate::surface::{DrawCommand, RecordingSurface};
    use kurbo::Size;
    use std::cell::RefCell;

    const EPS: f64 = 1e-9;

    fn stage_with_layers(n: usize) -> (Stage, Vec<LayerId>) {
        let mut stage = Stage::default();
        let ids = (0..n)
            .map(|i| stage.new_layer(format!("layer{i}"), Box::new(RecordingSurface::new(Size::new(800.0, 600.0)))))
            .collect();
        (stage, ids)
    }

    fn square(name: &str, x: f64, y: f64, size: f64) -> Shaper {
        Shaper::from_path(
            name,
            Rectangle::new(Point::new(x, y), Point::new(x + size, y + size)).to_path(),
            Style::default(),
        )
    }

    type Log = Rc<RefCell<Vec<String>>>;

    fn record(log: &Log, label: &'static str) -> Rc<MouseHandler> {
        let log = Rc::clone(log);
        mouse_handler(move |_, e: &mut MouseEvent| log.borrow_mut().push(format!("{label}:{:?}", e.kind)))
    }

    #[test]
    fn test_first_layer_is_main() {
        let (mut stage, ids) = stage_with_layers(2);
        assert_eq!(stage.main_layer(), Some(ids[0]));
        stage.set_main_layer(ids[1]).unwrap();
        assert_eq!(stage.main_layer(), Some(ids[1]));
        assert!(stage.set_main_layer(uuid::Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_remove_main_layer_falls_back() {
        let (mut stage, ids) = stage_with_layers(2);
        assert!(stage.remove_layer(ids[0]).is_some());
        assert_eq!(stage.main_layer(), Some(ids[1]));
        assert_eq!(stage.layer_count(), 1);
        assert!(stage.remove_layer(ids[0]).is_none());
    }

    #[test]
    fn test_add_object_unknown_layer() {
        let (mut stage, _) = stage_with_layers(1);
        let bad = uuid::Uuid::new_v4();
        assert_eq!(
            stage.add_object(bad, square("a", 0.0, 0.0, 1.0)),
            Err(StageError::UnknownLayer(bad))
        );
    }

    #[test]
    fn test_object_lookup_across_layers() {
        let (mut stage, ids) = stage_with_layers(2);
        let a = stage.add_object(ids[0], square("a", 0.0, 0.0, 10.0)).unwrap();
        let b = stage.add_object(ids[1], square("b", 0.0, 0.0, 10.0)).unwrap();
        assert_eq!(stage.layer_of(a), Some(ids[0]));
        assert_eq!(stage.layer_of(b), Some(ids[1]));
        assert_eq!(stage.object(b).unwrap().name(), "b");
        assert_eq!(stage.object_under_point(Point::new(5.0, 5.0)), Some(b));

        let removed = stage.remove_object(b).unwrap();
        assert!(removed.layer().is_none());
        assert_eq!(stage.object_under_point(Point::new(5.0, 5.0)), Some(a));
    }

    #[test]
    fn test_dispatch_top_layer_first_and_stop() {
        let (mut stage, ids) = stage_with_layers(2);
        let log: Log = Rc::default();

        let mut bottom = square("bottom", 0.0, 0.0, 10.0);
        bottom.events.add_event_listener(MouseEventKind::Down, Some(record(&log, "bottom")));
        let mut low = square("low", 0.0, 0.0, 10.0);
        low.events.add_event_listener(MouseEventKind::Down, Some(record(&log, "low")));
        let mut high = square("high", 0.0, 0.0, 10.0);
        high.events.add_event_listener(MouseEventKind::Down, Some(record(&log, "high")));

        stage.add_object(ids[0], bottom).unwrap();
        stage.add_object(ids[1], low).unwrap();
        stage.add_object(ids[1], high).unwrap();
        stage.events.add_event_listener(MouseEventKind::Down, Some(record(&log, "stage")));

        stage.dispatch(MouseEventKind::Down, Point::new(5.0, 5.0));
        assert_eq!(
            *log.borrow(),
            vec!["high:Down", "low:Down", "bottom:Down", "stage:Down"]
        );
    }

    #[test]
    fn test_stop_propagation_skips_lower_objects_and_stage() {
        let (mut stage, ids) = stage_with_layers(1);
        let log: Log = Rc::default();

        let mut low = square("low", 0.0, 0.0, 10.0);
        low.events.add_event_listener(MouseEventKind::Down, Some(record(&log, "low")));
        let mut high = square("high", 0.0, 0.0, 10.0);
        high.events.add_event_listener(
            MouseEventKind::Down,
            Some(mouse_handler(|_, e| e.stop_propagation())),
        );
        stage.add_object(ids[0], low).unwrap();
        stage.add_object(ids[0], high).unwrap();
        stage.events.add_event_listener(MouseEventKind::Down, Some(record(&log, "stage")));

        stage.dispatch(MouseEventKind::Down, Point::new(5.0, 5.0));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_move_reaches_only_topmost() {
        let (mut stage, ids) = stage_with_layers(1);
        let log: Log = Rc::default();
        let mut low = square("low", 0.0, 0.0, 10.0);
        low.events.add_event_listener(MouseEventKind::Move, Some(record(&log, "low")));
        let mut high = square("high", 0.0, 0.0, 10.0);
        high.events.add_event_listener(MouseEventKind::Move, Some(record(&log, "high")));
        stage.add_object(ids[0], low).unwrap();
        stage.add_object(ids[0], high).unwrap();

        stage.dispatch(MouseEventKind::Move, Point::new(5.0, 5.0));
        assert_eq!(*log.borrow(), vec!["high:Move"]);
    }

    #[test]
    fn test_origin_offsets_page_coordinates() {
        let (mut stage, ids) = stage_with_layers(1);
        let log: Log = Rc::default();
        let mut obj = square("a", 0.0, 0.0, 10.0);
        obj.events.add_event_listener(MouseEventKind::Click, Some(record(&log, "a")));
        stage.add_object(ids[0], obj).unwrap();
        stage.set_origin(Point::new(100.0, 100.0));

        stage.dispatch(MouseEventKind::Click, Point::new(5.0, 5.0));
        assert!(log.borrow().is_empty());
        stage.dispatch(MouseEventKind::Click, Point::new(105.0, 105.0));
        assert_eq!(*log.borrow(), vec!["a:Click"]);
    }

    #[test]
    fn test_drag_moves_object_and_emits_events() {
        let (mut stage, ids) = stage_with_layers(1);
        let log: Log = Rc::default();
        let mut obj = square("a", 0.0, 0.0, 10.0);
        for kind in [MouseEventKind::DragStart, MouseEventKind::Drag, MouseEventKind::DragEnd] {
            obj.events.add_event_listener(kind, Some(record(&log, "a")));
        }
        let id = stage.add_object(ids[0], obj).unwrap();
        stage.make_draggable(id).unwrap();

        stage.dispatch(MouseEventKind::Down, Point::new(5.0, 5.0));
        assert!(stage.is_dragging());
        stage.dispatch(MouseEventKind::Move, Point::new(15.0, 8.0));
        stage.dispatch(MouseEventKind::Move, Point::new(20.0, 8.0));
        stage.dispatch(MouseEventKind::Up, Point::new(20.0, 8.0));

        assert!(!stage.is_dragging());
        assert_eq!(*log.borrow(), vec!["a:DragStart", "a:Drag", "a:Drag", "a:DragEnd"]);
        let r = stage.object(id).unwrap().bound_rect().unwrap();
        assert!((r.from.x - 15.0).abs() < EPS);
        assert!((r.from.y - 3.0).abs() < EPS);
    }

    #[test]
    fn test_drag_reports_delta() {
        let (mut stage, ids) = stage_with_layers(1);
        let deltas: Rc<RefCell<Vec<Vec2>>> = Rc::default();
        let mut obj = square("a", 0.0, 0.0, 10.0);
        let sink = Rc::clone(&deltas);
        obj.events.add_event_listener(
            MouseEventKind::Drag,
            Some(mouse_handler(move |_, e| sink.borrow_mut().push(e.delta))),
        );
        let id = stage.add_object(ids[0], obj).unwrap();
        stage.make_draggable(id).unwrap();

        stage.dispatch(MouseEventKind::Down, Point::new(1.0, 1.0));
        stage.dispatch(MouseEventKind::Move, Point::new(4.0, 5.0));
        assert_eq!(*deltas.borrow(), vec![Vec2::new(3.0, 4.0)]);
    }

    #[test]
    fn test_stop_drag_removes_behavior() {
        let (mut stage, ids) = stage_with_layers(1);
        let id = stage.add_object(ids[0], square("a", 0.0, 0.0, 10.0)).unwrap();
        stage.make_draggable(id).unwrap();
        stage.stop_drag(id).unwrap();

        stage.dispatch(MouseEventKind::Down, Point::new(5.0, 5.0));
        assert!(!stage.is_dragging());
        assert!(stage.stop_drag(uuid::Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_second_down_while_dragging_is_ignored() {
        let (mut stage, ids) = stage_with_layers(1);
        let a = stage.add_object(ids[0], square("a", 0.0, 0.0, 10.0)).unwrap();
        let b = stage.add_object(ids[0], square("b", 50.0, 0.0, 10.0)).unwrap();
        stage.make_draggable(a).unwrap();
        stage.make_draggable(b).unwrap();

        stage.dispatch(MouseEventKind::Down, Point::new(5.0, 5.0));
        stage.dispatch(MouseEventKind::Down, Point::new(55.0, 5.0));
        assert_eq!(stage.dragging(), Some(a));

        stage.dispatch(MouseEventKind::Move, Point::new(15.0, 5.0));
        let rb = stage.object(b).unwrap().bound_rect().unwrap();
        assert!((rb.from.x - 50.0).abs() < EPS);
        let ra = stage.object(a).unwrap().bound_rect().unwrap();
        assert!((ra.from.x - 10.0).abs() < EPS);
    }

    #[test]
    fn test_layer_without_fps_draws_on_change() {
        let mut stage = Stage::default();
        let surface = RecordingSurface::new(Size::new(100.0, 100.0));
        let log = surface.log();
        let layer = stage.new_layer("main", Box::new(surface));
        stage.add_object(layer, square("a", 0.0, 0.0, 10.0)).unwrap();

        assert!(log.borrow().iter().any(|c| matches!(c, DrawCommand::Clear)));
        assert_eq!(stage.layer(layer).unwrap().frames_drawn(), 1);
    }

    #[test]
    fn test_animated_layer_draws_on_tick() {
        let mut stage = Stage::default();
        let layer = stage.add_layer(Layer::new("anim", Box::new(RecordingSurface::new(Size::new(10.0, 10.0)))).with_fps(30));
        stage.add_object(layer, square("a", 0.0, 0.0, 1.0)).unwrap();
        stage.add_object(layer, square("b", 0.0, 0.0, 1.0)).unwrap();
        assert_eq!(stage.layer(layer).unwrap().frames_drawn(), 0);

        stage.tick();
        assert_eq!(stage.layer(layer).unwrap().frames_drawn(), 1);
        stage.tick();
        assert_eq!(stage.layer(layer).unwrap().frames_drawn(), 1);
    }

    #[test]
    fn test_clear_empties_layers() {
        let (mut stage, ids) = stage_with_layers(2);
        stage.add_object(ids[0], square("a", 0.0, 0.0, 1.0)).unwrap();
        stage.add_object(ids[1], square("b", 0.0, 0.0, 1.0)).unwrap();
        stage.clear();
        assert!(stage.layers().all(Layer::is_empty));
        assert_eq!(stage.mode(), EditorMode::Idle);
    }

    #[test]
    fn test_snapshot_lists_objects() {
        let (mut stage, ids) = stage_with_layers(1);
        stage.add_object(ids[0], square("a", 0.0, 0.0, 10.0)).unwrap();
        let snap = stage.snapshot();
        assert_eq!(snap.layers.len(), 1);
        let a = snap.object_named("a").unwrap();
        assert_eq!(a.bounds, Some(Rectangle::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0))));
        assert!(snap.to_json().unwrap().contains("\"a\""));
    }
}
