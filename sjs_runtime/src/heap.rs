// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod backing_store;
mod heap_bits;
pub(crate) mod heap_gc;
mod heap_vec;
pub mod indexes;

pub use backing_store::{AllocationError, BackingStores};
pub(crate) use heap_bits::{BackingStoreWindow, HeapBits, HeapMark, WorkQueues};
pub(crate) use heap_vec::HeapVec;

use crate::ecmascript::{
    builtins::{ArrayHeapData, ArrayMethodCache},
    types::{ClosureHeapData, NumberHeapData, ObjectHeapData, StringHeapData},
};

#[derive(Debug)]
pub struct Heap {
    pub(crate) arrays: HeapVec<ArrayHeapData>,
    pub(crate) backing_stores: BackingStores,
    pub(crate) closures: HeapVec<ClosureHeapData>,
    pub(crate) numbers: HeapVec<NumberHeapData>,
    pub(crate) objects: HeapVec<ObjectHeapData>,
    pub(crate) strings: HeapVec<StringHeapData>,
    /// Array prototype and the closures generated code caches for the deque
    /// methods. Always alive.
    pub(crate) array_methods: ArrayMethodCache,
}

pub trait CreateHeapData<T, F> {
    /// Creates a [`Value`](crate::ecmascript::types::Value) or handle from
    /// the given data. Allocating the data is **not** guaranteed.
    fn create(&mut self, data: T) -> F;
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heap {
    pub fn new() -> Self {
        let mut closures = HeapVec::with_capacity(16);
        let mut objects = HeapVec::with_capacity(1024);
        let array_methods = ArrayMethodCache::new(&mut objects, &mut closures);
        Self {
            arrays: HeapVec::with_capacity(1024),
            backing_stores: BackingStores::with_capacity(1024),
            closures,
            numbers: HeapVec::with_capacity(1024),
            objects,
            strings: HeapVec::with_capacity(1024),
            array_methods,
        }
    }

    pub fn array_methods(&self) -> &ArrayMethodCache {
        &self.array_methods
    }

    /// Number of live arrays.
    pub fn array_count(&self) -> usize {
        self.arrays.live_count()
    }

    /// Number of live ordinary objects, including intrinsics.
    pub fn object_count(&self) -> usize {
        self.objects.live_count()
    }

    /// Number of live array backing stores.
    pub fn backing_store_count(&self) -> usize {
        self.backing_stores.live_count()
    }

    pub fn string_count(&self) -> usize {
        self.strings.live_count()
    }

    pub fn number_count(&self) -> usize {
        self.numbers.live_count()
    }
}
