// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The runtime agent: the heap plus the options it was started with.
//!
//! Exactly one mutator drives an agent at a time; nothing here is locked.

use crate::{
    ecmascript::types::Value,
    heap::{AllocationError, Heap, heap_gc::heap_gc},
};

/// Largest backing store capacity. Array lengths are signed 32-bit, so the
/// fast path can fold the negative-index check into one unsigned compare.
pub const MAX_CAPACITY: u32 = i32::MAX as u32;

/// Sizing rules for reactive backing store growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// Smallest number of slots added by a single growth step.
    pub min_increment: u32,
    /// Smallest number of free leading slots reserved when `unshift` has to
    /// reallocate.
    pub min_headroom: u32,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            min_increment: 8,
            min_headroom: 4,
        }
    }
}

impl GrowthPolicy {
    /// Capacity to grow to so that `required` slots fit in one step.
    ///
    /// Doubles the current capacity, but never adds less than
    /// `min_increment` slots and never returns less than `required`.
    pub fn grown_capacity(&self, capacity: u32, required: u32) -> Result<u32, AllocationError> {
        if required > MAX_CAPACITY {
            return Err(AllocationError::CapacityOverflow {
                requested: u64::from(required),
            });
        }
        let capacity = u64::from(capacity);
        let grown = (capacity * 2)
            .max(capacity + u64::from(self.min_increment))
            .max(u64::from(required))
            .min(u64::from(MAX_CAPACITY));
        Ok(grown as u32)
    }

    /// Number of leading free slots to reserve when an array of `len`
    /// elements is reallocated by `unshift`. Always at least one.
    pub fn unshift_headroom(&self, len: u32) -> u32 {
        len.max(self.min_headroom).max(1)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Options {
    pub disable_gc: bool,
    pub growth: GrowthPolicy,
}

#[derive(Debug)]
pub struct Agent {
    pub heap: Heap,
    pub options: Options,
}

impl Default for Agent {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Agent {
    pub fn new(options: Options) -> Self {
        Self {
            heap: Heap::new(),
            options,
        }
    }

    /// Runs a full collection, keeping everything reachable from `roots`
    /// alive. Does nothing if the agent was started with `disable_gc`.
    pub fn gc(&mut self, roots: &[Value]) {
        if self.options.disable_gc {
            return;
        }
        heap_gc(&mut self.heap, roots);
    }
}
