use uuid::Uuid;

use crate::error::{LibraryError, Result};

/// The number of slots storage grows by, and the smallest it will shrink to
pub const SIZE_INCREMENT: usize = 4;

/// Anything that can be found in a [Collection] by identity
pub trait Handle {
    fn handle(&self) -> Uuid;
}

impl Handle for Uuid {
    fn handle(&self) -> Uuid {
        *self
    }
}

/// A compacting store of items with a fixed growth increment.
///
/// Live items always sit in `slots[0..logical_size]`. Storage grows by
/// [SIZE_INCREMENT] when full and shrinks by half (never below the increment)
/// once a removal leaves it less than half occupied, so the free slots always
/// form a suffix of at most a few entries.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    slots: Vec<Option<T>>,
    logical_size: usize,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(SIZE_INCREMENT);
        slots.resize_with(SIZE_INCREMENT, || None);
        Collection {
            slots,
            logical_size: 0,
        }
    }

    /// Adds an item to the first free slot, growing storage if needed,
    /// and returns the index it landed at
    pub fn add(&mut self, item: T) -> usize {
        let index = if self.logical_size >= self.slots.len() {
            let orig_size = self.slots.len();
            self.slots.resize_with(orig_size + SIZE_INCREMENT, || None);
            orig_size
        } else {
            self.first_empty()
        };

        self.slots[index] = Some(item);
        self.logical_size += 1;
        index
    }

    // Free slots only ever make up the tail, so walking back from the end
    // stops after at most SIZE_INCREMENT steps
    fn first_empty(&self) -> usize {
        self.slots
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |last| last + 1)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Removes the item at `index`, shifting every later item one slot left
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let invalid = LibraryError::InvalidIndex {
            index,
            len: self.logical_size,
        };
        if index >= self.logical_size {
            return Err(invalid);
        }
        let item = self.slots[index].take().ok_or(invalid)?;
        self.logical_size -= 1;

        for i in index..self.slots.len() {
            if i + 1 == self.slots.len() || self.slots[i + 1].is_none() {
                break;
            }
            self.slots.swap(i, i + 1);
        }

        if self.logical_size < self.slots.len() / 2 {
            self.shrink();
        }

        Ok(item)
    }

    fn shrink(&mut self) {
        let new_size = (self.slots.len() / 2).max(SIZE_INCREMENT);
        self.slots.truncate(new_size);
        self.slots.shrink_to(new_size);
    }

    /// Number of live items
    pub fn len(&self) -> usize {
        self.logical_size
    }

    pub fn is_empty(&self) -> bool {
        self.logical_size == 0
    }

    /// Number of allocated slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots[..self.logical_size].iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots[..self.logical_size].iter_mut().flatten()
    }
}

impl<T: Handle> Collection<T> {
    /// Finds the first position holding the item with this handle
    pub fn index_of(&self, handle: &Uuid) -> Option<usize> {
        self.iter().position(|item| &item.handle() == handle)
    }
}
