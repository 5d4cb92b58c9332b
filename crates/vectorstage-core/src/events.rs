//! Typed event listener lists and pointer events.

use crate::objects::ObjectId;
use crate::stage::Stage;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

/// Handler lists keyed by event kind.
///
/// Handlers are called in registration order. Adding a handler that is
/// already registered for the kind is a no-op, so identity is by pointer:
/// keep the `Rc` around if you want to remove it later.
pub struct EventListener<K, H: ?Sized> {
    listeners: HashMap<K, Vec<Rc<H>>>,
}

impl<K, H: ?Sized> Default for EventListener<K, H> {
    fn default() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }
}

impl<K: fmt::Debug, H: ?Sized> fmt::Debug for EventListener<K, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.listeners.iter().map(|(k, v)| (k, v.len())))
            .finish()
    }
}

fn same_handler<H: ?Sized>(a: &Rc<H>, b: &Rc<H>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

impl<K: Copy + Eq + Hash, H: ?Sized> EventListener<K, H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`. Returns whether it was added.
    pub fn add_event_listener(&mut self, kind: K, handler: Option<Rc<H>>) -> bool {
        let Some(handler) = handler else {
            return false;
        };
        let list = self.listeners.entry(kind).or_default();
        if list.iter().any(|h| same_handler(h, &handler)) {
            return false;
        }
        list.push(handler);
        true
    }

    /// Remove one handler, or every handler for `kind` when `None`.
    pub fn remove_event_listener(&mut self, kind: K, handler: Option<&Rc<H>>) {
        match handler {
            None => {
                self.listeners.remove(&kind);
            }
            Some(handler) => {
                if let Some(list) = self.listeners.get_mut(&kind) {
                    list.retain(|h| !same_handler(h, handler));
                    if list.is_empty() {
                        self.listeners.remove(&kind);
                    }
                }
            }
        }
    }

    pub fn has_event_listener(&self, kind: K) -> bool {
        self.listeners.get(&kind).is_some_and(|l| !l.is_empty())
    }

    pub fn listener_count(&self, kind: K) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Snapshot of the handlers for `kind`, in registration order.
    ///
    /// Dispatchers iterate the snapshot so handlers may add or remove
    /// listeners while an event is being processed.
    pub fn handlers(&self, kind: K) -> Vec<Rc<H>> {
        self.listeners.get(&kind).cloned().unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

/// Pointer event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseEventKind {
    Click,
    DblClick,
    Down,
    Move,
    Up,
    Over,
    Out,
    DragStart,
    Drag,
    DragEnd,
}

/// Receiver of a dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    Stage,
    Object(ObjectId),
}

/// A pointer event in stage-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub pos: Point,
    /// Movement since the previous drag event (drag events only).
    pub delta: Vec2,
    pub target: EventTarget,
    /// Cleared by a handler to stop delivery to objects further down.
    pub propagation: bool,
}

impl MouseEvent {
    pub fn new(kind: MouseEventKind, pos: Point, target: EventTarget) -> Self {
        Self {
            kind,
            pos,
            delta: Vec2::ZERO,
            target,
            propagation: true,
        }
    }

    pub fn with_delta(mut self, delta: Vec2) -> Self {
        self.delta = delta;
        self
    }

    pub fn stop_propagation(&mut self) {
        self.propagation = false;
    }
}

/// Pointer handler signature. Handlers receive the whole stage so they can
/// act on other objects, layers or the transform box.
pub type MouseHandler = dyn Fn(&mut Stage, &mut MouseEvent);

/// Listener lists carried by every scene object and by the stage.
pub type MouseListeners = EventListener<MouseEventKind, MouseHandler>;

/// Wrap a closure as a shareable pointer handler.
pub fn mouse_handler(f: impl Fn(&mut Stage, &mut MouseEvent) + 'static) -> Rc<MouseHandler> {
    Rc::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    type Log = Rc<RefCell<Vec<&'static str>>>;
    type Handler = dyn Fn(&Log);

    fn handler(name: &'static str) -> Rc<Handler> {
        Rc::new(move |log: &Log| log.borrow_mut().push(name))
    }

    fn fire(listeners: &EventListener<u8, Handler>, kind: u8, log: &Log) {
        for h in listeners.handlers(kind) {
            h(log);
        }
    }

    #[test]
    fn test_registration_order_and_dedupe() {
        let mut l: EventListener<u8, Handler> = EventListener::new();
        let a = handler("a");
        let b = handler("b");
        assert!(l.add_event_listener(1, Some(a.clone())));
        assert!(l.add_event_listener(1, Some(b.clone())));
        assert!(!l.add_event_listener(1, Some(a.clone())));
        assert!(!l.add_event_listener(1, None));
        assert_eq!(l.listener_count(1), 2);

        let log: Log = Rc::default();
        fire(&l, 1, &log);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_one_and_all() {
        let mut l: EventListener<u8, Handler> = EventListener::new();
        let a = handler("a");
        let b = handler("b");
        l.add_event_listener(1, Some(a.clone()));
        l.add_event_listener(1, Some(b.clone()));
        l.add_event_listener(2, Some(a.clone()));

        l.remove_event_listener(1, Some(&a));
        assert_eq!(l.listener_count(1), 1);
        assert!(l.has_event_listener(2));

        l.remove_event_listener(1, None);
        assert!(!l.has_event_listener(1));
        assert!(l.has_event_listener(2));
    }

    #[test]
    fn test_equal_closures_are_distinct_handlers() {
        let mut l: EventListener<u8, Handler> = EventListener::new();
        l.add_event_listener(1, Some(handler("x")));
        l.add_event_listener(1, Some(handler("x")));
        assert_eq!(l.listener_count(1), 2);
    }

    #[test]
    fn test_stop_propagation() {
        let mut e = MouseEvent::new(MouseEventKind::Down, Point::ORIGIN, EventTarget::Stage);
        assert!(e.propagation);
        e.stop_propagation();
        assert!(!e.propagation);
    }
}
