// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::ops::{Index, IndexMut};

use super::indexes::BaseIndex;

/// Slot vector holding one kind of heap data.
///
/// Freed slots are remembered and handed out again before the vector grows,
/// so handles stay stable for as long as their data lives.
#[derive(Debug)]
pub(crate) struct HeapVec<T> {
    slots: Vec<Option<T>>,
    free: Vec<u32>,
}

impl<T> Default for HeapVec<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<T> HeapVec<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, data: T) -> BaseIndex<T> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            debug_assert!(slot.is_none());
            *slot = Some(data);
            BaseIndex::from_u32_index(index)
        } else {
            self.slots.push(Some(data));
            BaseIndex::from_index(self.slots.len() - 1)
        }
    }

    /// Drops the data in the slot and makes the slot available for reuse.
    pub(crate) fn release(&mut self, index: BaseIndex<T>) -> Option<T> {
        let data = self.slots.get_mut(index.into_index())?.take();
        if data.is_some() {
            self.free.push(index.into_u32_index());
        }
        data
    }

    pub(crate) fn get(&self, index: BaseIndex<T>) -> Option<&T> {
        self.slots.get(index.into_index())?.as_ref()
    }

    /// Number of slots, live or free.
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (BaseIndex<T>, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| Some((BaseIndex::from_index(index), slot.as_ref()?)))
    }
}

impl<T> Index<BaseIndex<T>> for HeapVec<T> {
    type Output = T;

    fn index(&self, index: BaseIndex<T>) -> &Self::Output {
        self.slots
            .get(index.into_index())
            .expect("Heap handle out of bounds")
            .as_ref()
            .expect("Heap slot empty")
    }
}

impl<T> IndexMut<BaseIndex<T>> for HeapVec<T> {
    fn index_mut(&mut self, index: BaseIndex<T>) -> &mut Self::Output {
        self.slots
            .get_mut(index.into_index())
            .expect("Heap handle out of bounds")
            .as_mut()
            .expect("Heap slot empty")
    }
}
