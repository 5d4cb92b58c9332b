//! Ordered collection that reports its mutations to listeners.

use crate::error::{StageError, StageResult};
use crate::events::EventListener;
use std::rc::Rc;

/// Mutation kinds reported by a [`DataProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataEventKind {
    Add,
    Remove,
    Replace,
    Clear,
    Change,
}

/// A mutation, borrowed from the provider while listeners run.
#[derive(Debug)]
pub enum DataEvent<'a, T> {
    Add { item: &'a T, index: usize },
    Remove { item: &'a T, index: usize },
    Replace { old: &'a T, new: &'a T, index: usize },
    Clear { items: &'a [T] },
    Change { item: &'a T, old_index: usize, new_index: usize },
}

impl<T> DataEvent<'_, T> {
    pub fn kind(&self) -> DataEventKind {
        match self {
            DataEvent::Add { .. } => DataEventKind::Add,
            DataEvent::Remove { .. } => DataEventKind::Remove,
            DataEvent::Replace { .. } => DataEventKind::Replace,
            DataEvent::Clear { .. } => DataEventKind::Clear,
            DataEvent::Change { .. } => DataEventKind::Change,
        }
    }
}

/// Listener signature for data events.
pub type DataHandler<T> = dyn Fn(&DataEvent<'_, T>);

/// An ordered list emitting [`DataEvent`]s on every mutation.
pub struct DataProvider<T: 'static> {
    data: Vec<T>,
    events: EventListener<DataEventKind, DataHandler<T>>,
}

impl<T: 'static> Default for DataProvider<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            events: EventListener::new(),
        }
    }
}

impl<T: std::fmt::Debug + 'static> std::fmt::Debug for DataProvider<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataProvider")
            .field("data", &self.data)
            .field("events", &self.events)
            .finish()
    }
}

impl<T: 'static> DataProvider<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing items without emitting events.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            data,
            events: EventListener::new(),
        }
    }

    pub fn add_event_listener(&mut self, kind: DataEventKind, handler: Option<Rc<DataHandler<T>>>) -> bool {
        self.events.add_event_listener(kind, handler)
    }

    pub fn remove_event_listener(&mut self, kind: DataEventKind, handler: Option<&Rc<DataHandler<T>>>) {
        self.events.remove_event_listener(kind, handler);
    }

    fn emit(&self, event: &DataEvent<'_, T>) {
        for handler in self.events.handlers(event.kind()) {
            handler(event);
        }
    }

    /// Append; returns the new index.
    pub fn add(&mut self, item: T) -> usize {
        self.data.push(item);
        let index = self.data.len() - 1;
        self.emit(&DataEvent::Add {
            item: &self.data[index],
            index,
        });
        index
    }

    /// Insert at `index` (`index == len` appends).
    pub fn add_at(&mut self, index: usize, item: T) -> StageResult<()> {
        if index > self.data.len() {
            return Err(StageError::IndexOutOfBounds {
                index,
                len: self.data.len(),
            });
        }
        self.data.insert(index, item);
        self.emit(&DataEvent::Add {
            item: &self.data[index],
            index,
        });
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.data.len() {
            return None;
        }
        let item = self.data.remove(index);
        self.emit(&DataEvent::Remove { item: &item, index });
        Some(item)
    }

    /// Remove the first item matching `pred`.
    pub fn remove_where(&mut self, pred: impl FnMut(&T) -> bool) -> Option<T> {
        let index = self.position(pred)?;
        self.remove_at(index)
    }

    /// Replace the item at `index`, returning the old one.
    pub fn replace_at(&mut self, index: usize, item: T) -> Option<T> {
        if index >= self.data.len() {
            return None;
        }
        let old = std::mem::replace(&mut self.data[index], item);
        self.emit(&DataEvent::Replace {
            old: &old,
            new: &self.data[index],
            index,
        });
        Some(old)
    }

    /// Move an item to a new index, shifting the others.
    pub fn set_item_index(&mut self, old_index: usize, new_index: usize) -> StageResult<()> {
        let len = self.data.len();
        for index in [old_index, new_index] {
            if index >= len {
                return Err(StageError::IndexOutOfBounds { index, len });
            }
        }
        if old_index == new_index {
            return Ok(());
        }
        let item = self.data.remove(old_index);
        self.data.insert(new_index, item);
        self.emit(&DataEvent::Change {
            item: &self.data[new_index],
            old_index,
            new_index,
        });
        Ok(())
    }

    /// Remove everything, returning the removed items.
    pub fn clear(&mut self) -> Vec<T> {
        let items = std::mem::take(&mut self.data);
        self.emit(&DataEvent::Clear { items: &items });
        items
    }

    pub fn item_at(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn item_at_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    pub fn position(&self, pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.data.iter().position(pred)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn for_each(&mut self, f: impl FnMut(&mut T)) {
        self.data.iter_mut().for_each(f);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: PartialEq + 'static> DataProvider<T> {
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.position(|x| x == item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }

    /// Remove the first item equal to `item`.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        let index = self.index_of(item)?;
        self.remove_at(index)
    }

    /// Replace the first item equal to `old` with `new`.
    pub fn replace(&mut self, old: &T, new: T) -> Option<T> {
        let index = self.index_of(old)?;
        self.replace_at(index, new)
    }
}
