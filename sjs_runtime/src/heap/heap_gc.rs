// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Non-moving mark and sweep collection.
//!
//! An array keeps its whole backing store alive through its allocation
//! index, but only the values inside the window `[offset, offset + len)` are
//! traced: slots before the offset were consumed by `shift` and slots past
//! the length are unset.

use tracing::debug;

use super::{
    BackingStoreWindow, Heap, HeapBits, HeapMark, HeapVec, WorkQueues, indexes::BaseIndex,
};
use crate::ecmascript::types::Value;

pub(crate) fn heap_gc(heap: &mut Heap, roots: &[Value]) {
    let mut bits = HeapBits::new(heap);
    let mut queues = WorkQueues::new(heap);

    roots.iter().for_each(|root| root.mark_values(&mut queues));
    heap.array_methods.mark_values(&mut queues);

    while !queues.is_empty() {
        let Heap {
            arrays,
            backing_stores,
            closures,
            numbers: _,
            objects,
            strings: _,
            array_methods: _,
        } = &*heap;

        let mut array_marks: Box<[_]> = queues.arrays.drain(..).collect();
        array_marks.sort();
        array_marks.iter().for_each(|&index| {
            if mark(&mut bits.arrays, index) {
                arrays[index].mark_values(&mut queues);
            }
        });
        let store_marks: Box<[BackingStoreWindow]> = queues.backing_stores.drain(..).collect();
        store_marks.iter().for_each(|window| {
            if mark(&mut bits.backing_stores, window.store) {
                let start = window.offset as usize;
                let end = start + window.len as usize;
                if let Some(live) = backing_stores
                    .get(window.store)
                    .and_then(|store| store.get(start..end))
                {
                    live.iter().for_each(|value| value.mark_values(&mut queues));
                }
            }
        });
        let mut closure_marks: Box<[_]> = queues.closures.drain(..).collect();
        closure_marks.sort();
        closure_marks.iter().for_each(|&index| {
            if mark(&mut bits.closures, index) {
                closures[index].mark_values(&mut queues);
            }
        });
        let mut object_marks: Box<[_]> = queues.objects.drain(..).collect();
        object_marks.sort();
        object_marks.iter().for_each(|&index| {
            if mark(&mut bits.objects, index) {
                objects[index].mark_values(&mut queues);
            }
        });
        // Numbers and strings hold no references.
        queues.numbers.drain(..).for_each(|index| {
            mark(&mut bits.numbers, index);
        });
        queues.strings.drain(..).for_each(|index| {
            mark(&mut bits.strings, index);
        });
    }

    let freed_arrays = sweep(&mut heap.arrays, &bits.arrays);
    let freed_closures = sweep(&mut heap.closures, &bits.closures);
    let freed_numbers = sweep(&mut heap.numbers, &bits.numbers);
    let freed_objects = sweep(&mut heap.objects, &bits.objects);
    let freed_strings = sweep(&mut heap.strings, &bits.strings);
    let unmarked_stores: Vec<_> = heap
        .backing_stores
        .iter()
        .filter(|(index, _)| !bits.backing_stores[index.into_index()])
        .map(|(index, _)| index)
        .collect();
    unmarked_stores.iter().for_each(|&index| {
        heap.backing_stores.release(index);
    });

    debug!(
        freed_arrays,
        freed_backing_stores = unmarked_stores.len(),
        freed_closures,
        freed_numbers,
        freed_objects,
        freed_strings,
        "garbage collection finished"
    );
}

/// Sets the mark bit, returning true if it was not already set.
fn mark<T: ?Sized>(bits: &mut [bool], index: BaseIndex<T>) -> bool {
    match bits.get_mut(index.into_index()) {
        Some(marked) if !*marked => {
            *marked = true;
            true
        }
        _ => false,
    }
}

fn sweep<T>(vec: &mut HeapVec<T>, bits: &[bool]) -> usize {
    let unmarked: Vec<_> = vec
        .iter()
        .filter(|(index, _)| !bits[index.into_index()])
        .map(|(index, _)| index)
        .collect();
    unmarked.iter().for_each(|&index| {
        vec.release(index);
    });
    unmarked.len()
}
