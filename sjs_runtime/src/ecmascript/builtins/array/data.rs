// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::mem::offset_of;

use crate::{
    ecmascript::types::{
        InternalSlots, Object, ObjectHeader, ObjectHeapData, ObjectMap, TypeTag, Value,
    },
    heap::{BackingStoreWindow, Heap, HeapMark, WorkQueues, indexes::BackingStoreIndex},
};

use super::ArrayMethod;

/// Number of generic field slots an array exposes: `length` followed by the
/// cached `pop`, `push`, `shift` and `unshift` closures.
pub const ARRAY_N_FIELDS: usize = 5;

const ARRAY_FIELDS: &[&str] = &["length", "pop", "push", "shift", "unshift"];

/// Map shared by every array.
pub static ARRAY_MAP: ObjectMap = ObjectMap::new("Array", ARRAY_FIELDS);

/// Heap data of an array.
///
/// The elements live in the backing store `allocation`, starting `offset`
/// slots in. `shift` consumes the first element by bumping `offset`, and
/// `unshift` reuses those slots by moving it back, so neither has to move
/// the remaining elements.
///
/// Invariants:
/// - `0 <= len <= capacity`
/// - with an allocation, `offset + capacity` equals the store's length
/// - without one, `offset == capacity == 0`
#[derive(Debug)]
#[repr(C)]
pub struct ArrayHeapData {
    pub(crate) header: ObjectHeader,
    /// The ECMAScript `length`. Signed so that it compares directly against
    /// the signed indices generated code passes in.
    pub(crate) len: i32,
    /// Number of addressable slots from `offset` to the end of the store.
    pub(crate) capacity: u32,
    pub(crate) offset: u32,
    pub(crate) allocation: Option<BackingStoreIndex>,
}

// Generic object fast paths read array bookkeeping through the common
// header view, so the array-specific storage must start exactly where an
// ordinary object's field storage starts.
const _ARRAY_HEADER_IS_OBJECT_HEADER: () =
    assert!(offset_of!(ArrayHeapData, header) == offset_of!(ObjectHeapData, header));
const _ARRAY_LENGTH_IS_FIRST_FIELD: () =
    assert!(offset_of!(ArrayHeapData, len) == offset_of!(ObjectHeapData, fields));
const _ARRAY_MAP_MATCHES_FIELD_COUNT: () = assert!(ARRAY_FIELDS.len() == ARRAY_N_FIELDS);

impl ArrayHeapData {
    pub(crate) fn new(prototype: Option<Object>, type_tag: TypeTag) -> Self {
        Self {
            header: ObjectHeader::new(&ARRAY_MAP, prototype, type_tag),
            len: 0,
            capacity: 0,
            offset: 0,
            allocation: None,
        }
    }

    /// Backing store position of element `index`.
    #[inline(always)]
    pub(crate) fn slot(&self, index: u32) -> usize {
        self.offset as usize + index as usize
    }
}

impl InternalSlots for ArrayHeapData {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        &mut self.header
    }

    fn field(&self, heap: &Heap, slot: usize) -> Value {
        match slot {
            0 => Value::Integer(self.len),
            1 => heap.array_methods.get(ArrayMethod::Pop).into(),
            2 => heap.array_methods.get(ArrayMethod::Push).into(),
            3 => heap.array_methods.get(ArrayMethod::Shift).into(),
            4 => heap.array_methods.get(ArrayMethod::Unshift).into(),
            _ => Value::Undefined,
        }
    }

    fn set_field(&mut self, slot: usize, value: Value) -> bool {
        match (slot, value) {
            // Extension within the backing store only. Truncation clears the
            // dropped slots and goes through `Array::set_len`.
            (0, Value::Integer(len)) if len >= self.len && (len as u32) <= self.capacity => {
                self.len = len;
                true
            }
            _ => false,
        }
    }
}

impl HeapMark for ArrayHeapData {
    fn mark_values(&self, queues: &mut WorkQueues) {
        self.header.mark_values(queues);
        if let Some(store) = self.allocation {
            queues.backing_stores.push(BackingStoreWindow {
                store,
                offset: self.offset,
                len: self.len as u32,
            });
        }
    }
}
