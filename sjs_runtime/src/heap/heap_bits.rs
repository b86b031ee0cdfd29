// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::types::Value;

use super::{
    Heap,
    indexes::{ArrayIndex, BackingStoreIndex, ClosureIndex, NumberIndex, ObjectIndex, StringIndex},
};

/// Mark bits, one per heap slot.
#[derive(Debug)]
pub(crate) struct HeapBits {
    pub arrays: Box<[bool]>,
    pub backing_stores: Box<[bool]>,
    pub closures: Box<[bool]>,
    pub numbers: Box<[bool]>,
    pub objects: Box<[bool]>,
    pub strings: Box<[bool]>,
}

/// A marked backing store together with the window of it that its array
/// can still observe.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BackingStoreWindow {
    pub store: BackingStoreIndex,
    pub offset: u32,
    pub len: u32,
}

#[derive(Debug)]
pub(crate) struct WorkQueues {
    pub arrays: Vec<ArrayIndex>,
    pub backing_stores: Vec<BackingStoreWindow>,
    pub closures: Vec<ClosureIndex>,
    pub numbers: Vec<NumberIndex>,
    pub objects: Vec<ObjectIndex>,
    pub strings: Vec<StringIndex>,
}

pub(crate) trait HeapMark {
    fn mark_values(&self, queues: &mut WorkQueues);
}

impl HeapBits {
    pub fn new(heap: &Heap) -> Self {
        Self {
            arrays: vec![false; heap.arrays.len()].into_boxed_slice(),
            backing_stores: vec![false; heap.backing_stores.len()].into_boxed_slice(),
            closures: vec![false; heap.closures.len()].into_boxed_slice(),
            numbers: vec![false; heap.numbers.len()].into_boxed_slice(),
            objects: vec![false; heap.objects.len()].into_boxed_slice(),
            strings: vec![false; heap.strings.len()].into_boxed_slice(),
        }
    }
}

impl WorkQueues {
    pub fn new(heap: &Heap) -> Self {
        Self {
            arrays: Vec::with_capacity(heap.arrays.len() / 4),
            backing_stores: Vec::with_capacity(heap.backing_stores.len() / 4),
            closures: Vec::with_capacity(heap.closures.len()),
            numbers: Vec::with_capacity(heap.numbers.len() / 4),
            objects: Vec::with_capacity(heap.objects.len() / 4),
            strings: Vec::with_capacity(heap.strings.len() / 4),
        }
    }

    pub fn push_value(&mut self, value: Value) {
        match value {
            Value::Undefined | Value::Null | Value::Boolean(_) | Value::Integer(_) => {}
            Value::Number(number) => self.numbers.push(number.0),
            Value::String(string) => self.strings.push(string.0),
            Value::Object(object) => self.objects.push(object.0),
            Value::Array(array) => self.arrays.push(array.get_index()),
            Value::Closure(closure) => self.closures.push(closure.0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
            && self.backing_stores.is_empty()
            && self.closures.is_empty()
            && self.numbers.is_empty()
            && self.objects.is_empty()
            && self.strings.is_empty()
    }
}
