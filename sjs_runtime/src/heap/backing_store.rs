// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Array backing store allocations.
//!
//! Each store is a fixed-size run of slots owned by exactly one array. Arrays
//! address their elements relative to an offset into the store; the store
//! index itself is what keeps the allocation alive and what gets released
//! when the array grows into a new store.

use core::ops::{Index, IndexMut};

use tracing::trace;

use crate::ecmascript::types::Value;

use super::{HeapVec, indexes::BackingStoreIndex};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    /// The requested capacity does not fit an array length.
    #[error("array capacity overflow: {requested} slots requested")]
    CapacityOverflow { requested: u64 },
    /// The allocator could not provide the memory.
    #[error("out of memory allocating a backing store of {slots} slots")]
    OutOfMemory { slots: u32 },
}

#[derive(Debug, Default)]
pub struct BackingStores {
    stores: HeapVec<Box<[Value]>>,
}

impl BackingStores {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            stores: HeapVec::with_capacity(capacity),
        }
    }

    /// Allocates a store of `slots` slots, all holding `Undefined`.
    pub(crate) fn allocate(&mut self, slots: u32) -> Result<BackingStoreIndex, AllocationError> {
        let mut store = Vec::new();
        store
            .try_reserve_exact(slots as usize)
            .map_err(|_| AllocationError::OutOfMemory { slots })?;
        store.resize(slots as usize, Value::Undefined);
        let index = self.stores.push(store.into_boxed_slice());
        trace!(store = ?index, slots, "allocated backing store");
        Ok(index)
    }

    /// Releases the store, returning its contents.
    pub(crate) fn release(&mut self, index: BackingStoreIndex) -> Option<Box<[Value]>> {
        let store = self.stores.release(index);
        trace!(store = ?index, slots = store.as_ref().map(|store| store.len()), "released backing store");
        store
    }

    pub(crate) fn live_count(&self) -> usize {
        self.stores.live_count()
    }

    pub(crate) fn len(&self) -> usize {
        self.stores.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (BackingStoreIndex, &[Value])> {
        self.stores.iter().map(|(index, store)| (index, &**store))
    }

    pub(crate) fn get(&self, index: BackingStoreIndex) -> Option<&[Value]> {
        self.stores.get(index).map(|store| &**store)
    }
}

impl Index<BackingStoreIndex> for BackingStores {
    type Output = [Value];

    fn index(&self, index: BackingStoreIndex) -> &Self::Output {
        &self.stores[index]
    }
}

impl IndexMut<BackingStoreIndex> for BackingStores {
    fn index_mut(&mut self, index: BackingStoreIndex) -> &mut Self::Output {
        &mut self.stores[index]
    }
}
