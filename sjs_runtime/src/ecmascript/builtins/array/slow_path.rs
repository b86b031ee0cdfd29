// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Out-of-line paths: growing and reallocating backing stores.

use tracing::{error, trace};

use crate::{
    ecmascript::{
        execution::{Agent, agent::MAX_CAPACITY},
        types::Value,
    },
    heap::{AllocationError, Heap},
};

use super::Array;

/// Store at an index outside the backing store.
///
/// Negative indices are not array elements and the write is dropped. Any
/// other index grows the store to hold it, after which the store proceeds
/// exactly as on the fast path.
#[inline(never)]
pub(super) fn slow_put(agent: &mut Agent, array: Array, index: i32, value: Value) -> Value {
    if index < 0 {
        return value;
    }
    let required = index as u32 + 1;
    if required > agent[array].capacity {
        if let Err(error) = grow(agent, array, required) {
            handle_allocation_failure(error);
        }
    }
    let (data, store) = agent.heap.array_with_store_mut(array);
    if index >= data.len {
        data.len = index + 1;
    }
    store[data.slot(index as u32)] = value;
    value
}

/// Grows the backing store to at least `required` slots following the
/// agent's growth policy.
fn grow(agent: &mut Agent, array: Array, required: u32) -> Result<(), AllocationError> {
    let capacity = agent[array].capacity;
    let new_capacity = agent.options.growth.grown_capacity(capacity, required)?;
    trace!(
        array = ?array.get_index(),
        capacity,
        new_capacity,
        "growing array backing store"
    );
    reallocate(&mut agent.heap, array, new_capacity, 0)
}

/// Makes room in front of the first element so that `unshift` can move the
/// offset back by one.
pub(super) fn reserve_headroom(agent: &mut Agent, array: Array) -> Result<(), AllocationError> {
    let data = &agent[array];
    let capacity = data.capacity;
    let headroom = agent.options.growth.unshift_headroom(data.len as u32);
    trace!(
        array = ?array.get_index(),
        capacity,
        headroom,
        "reserving array headroom"
    );
    reallocate(&mut agent.heap, array, capacity, headroom)
}

/// Moves the array into a fresh store of `headroom + capacity` slots.
///
/// The elements keep their indices and start `headroom` slots into the new
/// store. Everything else in the new store is `Undefined`, and the old store
/// is released.
pub(super) fn reallocate(
    heap: &mut Heap,
    array: Array,
    capacity: u32,
    headroom: u32,
) -> Result<(), AllocationError> {
    let slots = u64::from(headroom) + u64::from(capacity);
    if slots > u64::from(MAX_CAPACITY) {
        return Err(AllocationError::CapacityOverflow { requested: slots });
    }
    let Heap {
        arrays,
        backing_stores,
        ..
    } = heap;
    let data = &mut arrays[array.get_index()];
    debug_assert!(data.len >= 0 && data.len as u32 <= capacity);
    let allocation = backing_stores.allocate(slots as u32)?;
    if let Some(old_store) = data
        .allocation
        .and_then(|old_allocation| backing_stores.release(old_allocation))
    {
        let start = data.offset as usize;
        let len = data.len as usize;
        let dst = headroom as usize;
        backing_stores[allocation][dst..dst + len].copy_from_slice(&old_store[start..start + len]);
    }
    data.allocation = Some(allocation);
    data.offset = headroom;
    data.capacity = capacity;
    Ok(())
}

/// Running out of memory for an array is fatal to the agent.
#[cold]
#[inline(never)]
pub(super) fn handle_allocation_failure(error: AllocationError) -> ! {
    error!(%error, "array backing store allocation failed");
    panic!("{error}");
}
