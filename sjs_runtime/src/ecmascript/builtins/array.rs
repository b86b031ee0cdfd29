// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### Arrays
//!
//! In-bounds access is the case that has to be fast, for reads and writes
//! alike. Both [`Array::get`] and [`Array::put`] bound the index against the
//! backing store capacity rather than the length: this keeps the common
//! "pre-sized array, sequential fill" pattern entirely on the fast path, and
//! writes one past the end extend the length inline instead of calling out
//! to the slow path. Slots between the length and the capacity always hold
//! `Undefined`, so reading them is indistinguishable from reading a hole.
//!
//! Arrays also behave as deques. Rather than wrapping indices around a ring
//! buffer, which would put a modulus or a start-index check on every access,
//! `shift` and `unshift` move the array's offset into its backing store.

pub(crate) mod array_prototype;
mod data;
mod deque;
mod slow_path;

use core::ops::{Index, IndexMut};

use crate::{
    ecmascript::{
        execution::{Agent, agent::MAX_CAPACITY},
        types::{TypeTag, Value},
    },
    heap::{AllocationError, CreateHeapData, Heap, indexes::ArrayIndex},
};

pub use array_prototype::{ArrayMethod, ArrayMethodCache};
pub use data::{ARRAY_MAP, ARRAY_N_FIELDS, ArrayHeapData};

use slow_path::{handle_allocation_failure, reallocate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Array(ArrayIndex);

/// Builds an array from a fixed list of values:
/// `array_literal!(agent, type_tag, a, b, c)`.
#[macro_export]
macro_rules! array_literal {
    ($agent:expr, $type_tag:expr $(, $value:expr)* $(,)?) => {
        $crate::ecmascript::builtins::Array::literal(
            $agent,
            $type_tag,
            &[$($crate::Value::from($value)),*],
        )
    };
}

impl Array {
    pub(crate) fn get_index(self) -> ArrayIndex {
        self.0
    }

    /// Creates an empty array without a backing store.
    pub fn new(agent: &mut Agent, type_tag: TypeTag) -> Self {
        let prototype = agent.heap.array_methods.prototype();
        agent
            .heap
            .create(ArrayHeapData::new(Some(prototype.into()), type_tag))
    }

    /// Creates an empty array whose backing store already has room for
    /// `capacity` elements.
    pub fn with_capacity(agent: &mut Agent, type_tag: TypeTag, capacity: u32) -> Self {
        let array = Self::new(agent, type_tag);
        if capacity > 0 {
            if let Err(error) = reallocate(&mut agent.heap, array, capacity, 0) {
                handle_allocation_failure(error);
            }
        }
        array
    }

    /// Creates an array holding `values` in order, with exactly as much
    /// capacity as it has elements.
    pub fn literal(agent: &mut Agent, type_tag: TypeTag, values: &[Value]) -> Self {
        let array = Self::new(agent, type_tag);
        if values.is_empty() {
            return array;
        }
        let len = match u32::try_from(values.len()) {
            Ok(len) if len <= MAX_CAPACITY => len,
            _ => handle_allocation_failure(AllocationError::CapacityOverflow {
                requested: values.len() as u64,
            }),
        };
        if let Err(error) = reallocate(&mut agent.heap, array, len, 0) {
            handle_allocation_failure(error);
        }
        let (data, store) = agent.heap.array_with_store_mut(array);
        store[..values.len()].copy_from_slice(values);
        data.len = len as i32;
        array
    }

    /// Creates an array of strings, one element per host string.
    pub fn from_strings(agent: &mut Agent, type_tag: TypeTag, strings: &[&str]) -> Self {
        let values: Vec<Value> = strings
            .iter()
            .map(|string| Value::from_str(agent, string))
            .collect();
        Self::literal(agent, type_tag, &values)
    }

    /// The ECMAScript `length` of the array.
    pub fn len(self, agent: &Agent) -> i32 {
        agent[self].len
    }

    pub fn is_empty(self, agent: &Agent) -> bool {
        agent[self].len == 0
    }

    /// Number of elements addressable without growing the backing store.
    pub fn capacity(self, agent: &Agent) -> u32 {
        agent[self].capacity
    }

    /// Returns the element at `index`, or `Undefined` if `index` is outside
    /// the backing store.
    #[inline]
    pub fn get(self, agent: &Agent, index: i32) -> Value {
        let (data, store) = agent.heap.array_with_store(self);
        // Negative indices wrap to values above any capacity.
        if (index as u32) < data.capacity {
            store[data.slot(index as u32)]
        } else {
            Value::Undefined
        }
    }

    /// Stores `value` at `index`, extending the length if `index` is at or
    /// past it, and returns `value`.
    ///
    /// Indices outside the backing store go through the slow path, which
    /// grows the store for non-negative indices and drops the write for
    /// negative ones.
    #[inline]
    pub fn put(self, agent: &mut Agent, index: i32, value: Value) -> Value {
        let (data, store) = agent.heap.array_with_store_mut(self);
        if (index as u32) < data.capacity {
            if index >= data.len {
                data.len = index + 1;
            }
            store[data.slot(index as u32)] = value;
            value
        } else {
            slow_path::slow_put(agent, self, index, value)
        }
    }

    /// Sets the length within the current capacity, clearing any elements
    /// cut off by a shorter length. Returns false, leaving the array
    /// unchanged, if `len` is negative or exceeds the capacity.
    pub fn set_len(self, agent: &mut Agent, len: i32) -> bool {
        let (data, store) = agent.heap.array_with_store_mut(self);
        if len < 0 || len as u32 > data.capacity {
            return false;
        }
        if len < data.len {
            store[data.slot(len as u32)..data.slot(data.len as u32)].fill(Value::Undefined);
        }
        data.len = len;
        true
    }

    /// Reverses the elements in place and returns the same array.
    pub fn reverse(self, agent: &mut Agent) -> Self {
        let (data, store) = agent.heap.array_with_store_mut(self);
        store[data.slot(0)..data.slot(data.len as u32)].reverse();
        self
    }

    /// The elements `[0, len)`.
    pub fn as_slice(self, agent: &Agent) -> &[Value] {
        let (data, store) = agent.heap.array_with_store(self);
        &store[data.slot(0)..data.slot(data.len as u32)]
    }
}

impl Heap {
    /// The array's heap data together with its whole backing store.
    pub(crate) fn array_with_store(&self, array: Array) -> (&ArrayHeapData, &[Value]) {
        let data = &self.arrays[array.0];
        let store: &[Value] = match data.allocation {
            Some(allocation) => &self.backing_stores[allocation],
            None => &[],
        };
        (data, store)
    }

    pub(crate) fn array_with_store_mut(
        &mut self,
        array: Array,
    ) -> (&mut ArrayHeapData, &mut [Value]) {
        let Heap {
            arrays,
            backing_stores,
            ..
        } = self;
        let data = &mut arrays[array.0];
        let store: &mut [Value] = match data.allocation {
            Some(allocation) => &mut backing_stores[allocation],
            None => &mut [],
        };
        (data, store)
    }
}

impl CreateHeapData<ArrayHeapData, Array> for Heap {
    fn create(&mut self, data: ArrayHeapData) -> Array {
        Array(self.arrays.push(data))
    }
}

impl Index<Array> for Heap {
    type Output = ArrayHeapData;

    fn index(&self, index: Array) -> &Self::Output {
        &self.arrays[index.0]
    }
}

impl IndexMut<Array> for Heap {
    fn index_mut(&mut self, index: Array) -> &mut Self::Output {
        &mut self.arrays[index.0]
    }
}

impl Index<Array> for Agent {
    type Output = ArrayHeapData;

    fn index(&self, index: Array) -> &Self::Output {
        &self.heap[index]
    }
}

impl IndexMut<Array> for Agent {
    fn index_mut(&mut self, index: Array) -> &mut Self::Output {
        &mut self.heap[index]
    }
}
