//! Layers: ordered object lists drawn onto one surface.

use crate::data_provider::{DataEventKind, DataHandler, DataProvider};
use crate::error::StageResult;
use crate::geometry::Rectangle;
use crate::objects::{LayerObject, ObjectId, Renderable};
use crate::surface::Surface;
use kurbo::Point;
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

/// Unique identifier for layers.
pub type LayerId = Uuid;

/// An ordered set of objects with its own drawing surface.
///
/// Index 0 is the bottom of the z-order. Mutations mark the layer dirty;
/// with `fps == 0` the layer also redraws immediately, otherwise the owner
/// is expected to call [`Layer::draw`] once per frame.
pub struct Layer {
    id: LayerId,
    pub name: String,
    objects: DataProvider<LayerObject>,
    surface: Box<dyn Surface>,
    dirty: bool,
    fps: u32,
    frames_drawn: u64,
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("objects", &self.objects.len())
            .field("dirty", &self.dirty)
            .field("fps", &self.fps)
            .finish()
    }
}

impl Layer {
    pub fn new(name: impl Into<String>, surface: Box<dyn Surface>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            objects: DataProvider::new(),
            surface,
            dirty: false,
            fps: 0,
            frames_drawn: 0,
        }
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn Surface {
        self.surface.as_mut()
    }

    /// Listen to object list mutations.
    pub fn add_event_listener(
        &mut self,
        kind: DataEventKind,
        handler: Option<Rc<DataHandler<LayerObject>>>,
    ) -> bool {
        self.objects.add_event_listener(kind, handler)
    }

    pub fn remove_event_listener(&mut self, kind: DataEventKind, handler: Option<&Rc<DataHandler<LayerObject>>>) {
        self.objects.remove_event_listener(kind, handler);
    }

    /// Add on top. An object with the same id already on this layer is
    /// replaced.
    pub fn add_object(&mut self, obj: impl Into<LayerObject>) -> ObjectId {
        let mut obj = obj.into();
        let id = obj.id();
        if self.contains(id) {
            self.objects.remove_where(|o| o.id() == id);
        }
        obj.set_layer(Some(self.id));
        log::debug!("Layer {}: add {} '{}'", self.name, id, obj.name());
        self.objects.add(obj);
        self.redraw();
        id
    }

    /// Insert at `index` in the z-order.
    pub fn add_object_at(&mut self, index: usize, obj: impl Into<LayerObject>) -> StageResult<ObjectId> {
        let mut obj = obj.into();
        let id = obj.id();
        if self.contains(id) {
            self.objects.remove_where(|o| o.id() == id);
        }
        obj.set_layer(Some(self.id));
        self.objects.add_at(index, obj)?;
        log::debug!("Layer {}: insert {} at {}", self.name, id, index);
        self.redraw();
        Ok(id)
    }

    /// Remove by id; the returned object is detached.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<LayerObject> {
        let index = self.object_index(id)?;
        self.remove_object_at(index)
    }

    pub fn remove_object_at(&mut self, index: usize) -> Option<LayerObject> {
        let mut obj = self.objects.remove_at(index)?;
        obj.set_layer(None);
        log::debug!("Layer {}: remove {}", self.name, obj.id());
        self.redraw();
        Some(obj)
    }

    /// Remove every object, detaching each one.
    pub fn clear(&mut self) -> Vec<LayerObject> {
        let mut removed = self.objects.clear();
        for obj in &mut removed {
            obj.set_layer(None);
        }
        self.redraw();
        removed
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.object_index(id).is_some()
    }

    pub fn object(&self, id: ObjectId) -> Option<&LayerObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    /// Mutable access. Call [`Layer::redraw`] after changing anything visible.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut LayerObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    pub fn object_at(&self, index: usize) -> Option<&LayerObject> {
        self.objects.item_at(index)
    }

    pub fn object_index(&self, id: ObjectId) -> Option<usize> {
        self.objects.position(|o| o.id() == id)
    }

    /// Move an object within the z-order.
    pub fn set_object_index(&mut self, id: ObjectId, index: usize) -> StageResult<()> {
        let Some(old) = self.object_index(id) else {
            return Err(crate::error::StageError::UnknownObject(id));
        };
        self.objects.set_item_index(old, index)?;
        self.redraw();
        Ok(())
    }

    /// Objects bottom to top.
    pub fn objects(&self) -> impl Iterator<Item = &LayerObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Ids of objects hit by `p`, topmost first, at most `limit` of them.
    pub fn objects_under_point(&self, p: Point, limit: Option<usize>) -> Vec<ObjectId> {
        let mut hits = Vec::new();
        for obj in self.objects.iter().rev() {
            if limit.is_some_and(|l| hits.len() >= l) {
                break;
            }
            if obj.has_point(p) {
                hits.push(obj.id());
            }
        }
        hits
    }

    /// Topmost object hit by `p`.
    pub fn object_under_point(&self, p: Point) -> Option<ObjectId> {
        self.objects_under_point(p, Some(1)).first().copied()
    }

    /// Mark dirty; draws right away when the layer is not animated.
    pub fn redraw(&mut self) {
        self.dirty = true;
        if !self.is_animated() {
            self.draw();
        }
    }

    /// Clear the surface and draw every object, if dirty.
    pub fn draw(&mut self) {
        if !self.dirty {
            return;
        }
        self.surface.clear();
        for obj in self.objects.iter() {
            obj.draw(self.surface.as_mut());
        }
        self.dirty = false;
        self.frames_drawn += 1;
        log::trace!("Layer {}: drew {} objects", self.name, self.objects.len());
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Frames per second of the render loop; 0 means draw on every change.
    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps;
        if fps == 0 && self.dirty {
            self.draw();
        }
    }

    pub fn is_animated(&self) -> bool {
        self.fps > 0
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Surface area as a rectangle from the origin.
    pub fn rect(&self) -> Rectangle {
        let size = self.surface.size();
        Rectangle::new(Point::ORIGIN, Point::new(size.width, size.height))
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }
}
