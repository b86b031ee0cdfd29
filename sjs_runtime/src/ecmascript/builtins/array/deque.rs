// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{execution::Agent, types::Value};

use super::{
    Array,
    slow_path::{handle_allocation_failure, reserve_headroom},
};

impl Array {
    /// Appends `value` and returns it.
    pub fn push(self, agent: &mut Agent, value: Value) -> Value {
        let len = agent[self].len;
        self.put(agent, len, value)
    }

    /// Removes and returns the last element, or `Undefined` if the array is
    /// empty. Capacity is unchanged.
    pub fn pop(self, agent: &mut Agent) -> Value {
        let (data, store) = agent.heap.array_with_store_mut(self);
        if data.len == 0 {
            return Value::Undefined;
        }
        data.len -= 1;
        core::mem::take(&mut store[data.slot(data.len as u32)])
    }

    /// Removes and returns the first element, or `Undefined` if the array is
    /// empty.
    ///
    /// The offset moves forward past the consumed slot and the capacity
    /// shrinks by one. No element is moved.
    pub fn shift(self, agent: &mut Agent) -> Value {
        let (data, store) = agent.heap.array_with_store_mut(self);
        if data.len == 0 {
            return Value::Undefined;
        }
        let value = core::mem::take(&mut store[data.slot(0)]);
        data.offset += 1;
        data.capacity -= 1;
        data.len -= 1;
        value
    }

    /// Inserts `value` before the first element.
    ///
    /// Slots freed by earlier shifts are reused by moving the offset back.
    /// Without any, the array is first reallocated with headroom in front
    /// proportional to its length.
    pub fn unshift(self, agent: &mut Agent, value: Value) {
        if agent[self].offset == 0 {
            if let Err(error) = reserve_headroom(agent, self) {
                handle_allocation_failure(error);
            }
        }
        let (data, store) = agent.heap.array_with_store_mut(self);
        data.offset -= 1;
        data.capacity += 1;
        data.len += 1;
        store[data.slot(0)] = value;
    }
}

#[cfg(test)]
mod tests {
    use crate::{array_literal, ecmascript::types::TypeTag};

    use super::*;

    #[test]
    fn pop_clears_the_vacated_slot() {
        let mut agent = Agent::default();
        let array = array_literal!(&mut agent, TypeTag::UNTYPED, 1, 2, 3);
        assert_eq!(array.pop(&mut agent), Value::Integer(3));
        assert_eq!(array.len(&agent), 2);
        assert_eq!(array.capacity(&agent), 3);
        assert_eq!(array.get(&agent, 2), Value::Undefined);
    }

    #[test]
    fn shift_advances_the_offset() {
        let mut agent = Agent::default();
        let array = array_literal!(&mut agent, TypeTag::UNTYPED, 1, 2, 3);
        assert_eq!(array.shift(&mut agent), Value::Integer(1));
        assert_eq!(agent[array].offset, 1);
        assert_eq!(array.capacity(&agent), 2);
        assert_eq!(array.get(&agent, 0), Value::Integer(2));
    }

    #[test]
    fn unshift_after_shift_reuses_the_slot() {
        let mut agent = Agent::default();
        let array = array_literal!(&mut agent, TypeTag::UNTYPED, 1, 2, 3);
        array.shift(&mut agent);
        let allocation = agent[array].allocation;
        array.unshift(&mut agent, Value::Integer(0));
        assert_eq!(agent[array].allocation, allocation);
        assert_eq!(agent[array].offset, 0);
        assert_eq!(array.capacity(&agent), 3);
        assert_eq!(
            array.as_slice(&agent),
            &[Value::Integer(0), Value::Integer(2), Value::Integer(3)]
        );
    }

    #[test]
    fn unshift_without_headroom_reallocates() {
        let mut agent = Agent::default();
        let array = array_literal!(&mut agent, TypeTag::UNTYPED, 1, 2, 3, 4, 5);
        array.unshift(&mut agent, Value::Integer(0));
        // Headroom of max(len, 4) = 5, one slot of it taken by the new element.
        assert_eq!(agent[array].offset, 4);
        assert_eq!(array.capacity(&agent), 6);
        assert_eq!(array.len(&agent), 6);
        let expected: Vec<Value> = (0..=5).map(Value::Integer).collect();
        assert_eq!(array.as_slice(&agent), expected.as_slice());
    }

    #[test]
    fn empty_array_unshift() {
        let mut agent = Agent::default();
        let array = crate::ecmascript::builtins::Array::new(&mut agent, TypeTag::UNTYPED);
        array.unshift(&mut agent, Value::Integer(9));
        assert_eq!(array.len(&agent), 1);
        assert_eq!(array.get(&agent, 0), Value::Integer(9));
        assert_eq!(array.shift(&mut agent), Value::Integer(9));
        assert_eq!(array.shift(&mut agent), Value::Undefined);
        assert_eq!(array.pop(&mut agent), Value::Undefined);
    }
}
