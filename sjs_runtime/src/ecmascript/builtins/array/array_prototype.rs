// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Array.prototype` and the per-agent cache of array method closures.
//!
//! Generated code reads `pop`, `push`, `shift` and `unshift` through the
//! array's field slots. Those slots hold no per-array state: they resolve to
//! the closures in [`ArrayMethodCache`], which also installs every method on
//! the prototype's property bag for dynamic lookups.

use crate::{
    ecmascript::{
        execution::Agent,
        types::{
            Behaviour, Closure, ClosureHeapData, OBJECT_MAP, ObjectHeapData, OrdinaryObject, PropertyKey,
            TypeTag, Value,
        },
    },
    heap::{HeapMark, HeapVec, WorkQueues},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayMethod {
    Pop,
    Push,
    Shift,
    Unshift,
    Reverse,
}

impl ArrayMethod {
    pub const ALL: [ArrayMethod; 5] = [
        ArrayMethod::Pop,
        ArrayMethod::Push,
        ArrayMethod::Shift,
        ArrayMethod::Unshift,
        ArrayMethod::Reverse,
    ];

    /// Property name the method is installed under.
    pub const fn name(self) -> &'static str {
        match self {
            ArrayMethod::Pop => "pop",
            ArrayMethod::Push => "push",
            ArrayMethod::Shift => "shift",
            ArrayMethod::Unshift => "unshift",
            ArrayMethod::Reverse => "reverse",
        }
    }

    fn behaviour(self) -> Behaviour {
        match self {
            ArrayMethod::Pop => array_pop,
            ArrayMethod::Push => array_push,
            ArrayMethod::Shift => array_shift,
            ArrayMethod::Unshift => array_unshift,
            ArrayMethod::Reverse => array_reverse,
        }
    }
}

#[derive(Debug)]
pub struct ArrayMethodCache {
    prototype: OrdinaryObject,
    methods: [Closure; 5],
}

impl ArrayMethodCache {
    pub(crate) fn new(
        objects: &mut HeapVec<ObjectHeapData>,
        closures: &mut HeapVec<ClosureHeapData>,
    ) -> Self {
        let methods = ArrayMethod::ALL.map(|method| {
            Closure(closures.push(ClosureHeapData::new(
                Value::Undefined,
                method.behaviour(),
            )))
        });
        let mut prototype = ObjectHeapData::new(&OBJECT_MAP, None, TypeTag::UNTYPED);
        ArrayMethod::ALL
            .iter()
            .zip(methods)
            .for_each(|(method, closure)| {
                prototype
                    .header
                    .bag_insert(PropertyKey::new(method.name()), closure.into());
            });
        Self {
            prototype: OrdinaryObject(objects.push(prototype)),
            methods,
        }
    }

    /// The object every array created by this agent inherits from.
    pub fn prototype(&self) -> OrdinaryObject {
        self.prototype
    }

    pub fn get(&self, method: ArrayMethod) -> Closure {
        self.methods[method as usize]
    }
}

impl HeapMark for ArrayMethodCache {
    fn mark_values(&self, queues: &mut WorkQueues) {
        queues.objects.push(self.prototype.0);
        self.methods
            .iter()
            .for_each(|closure| closure.mark_values(queues));
    }
}

// Method bodies. A receiver that is not an array gets `Undefined` back.

fn array_pop(agent: &mut Agent, _env: Value, this: Value, _argument: Value) -> Value {
    match this {
        Value::Array(array) => array.pop(agent),
        _ => Value::Undefined,
    }
}

fn array_push(agent: &mut Agent, _env: Value, this: Value, argument: Value) -> Value {
    match this {
        Value::Array(array) => array.push(agent, argument),
        _ => Value::Undefined,
    }
}

fn array_shift(agent: &mut Agent, _env: Value, this: Value, _argument: Value) -> Value {
    match this {
        Value::Array(array) => array.shift(agent),
        _ => Value::Undefined,
    }
}

fn array_unshift(agent: &mut Agent, _env: Value, this: Value, argument: Value) -> Value {
    if let Value::Array(array) = this {
        array.unshift(agent, argument);
    }
    Value::Undefined
}

fn array_reverse(agent: &mut Agent, _env: Value, this: Value, _argument: Value) -> Value {
    match this {
        Value::Array(array) => array.reverse(agent).into(),
        _ => Value::Undefined,
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        array_literal,
        ecmascript::{
            builtins::ARRAY_N_FIELDS,
            types::{Object, PropertyKey},
        },
    };

    use super::*;

    #[test]
    fn method_slots_resolve_to_cached_closures() {
        let mut agent = Agent::default();
        let first = array_literal!(&mut agent, TypeTag::UNTYPED, 1);
        let second = array_literal!(&mut agent, TypeTag::UNTYPED, 2);
        for (slot, method) in (1..ARRAY_N_FIELDS).zip(ArrayMethod::ALL) {
            let cached: Value = agent.heap.array_methods().get(method).into();
            assert_eq!(Object::from(first).get_field(&agent, slot), cached);
            assert_eq!(Object::from(second).get_field(&agent, slot), cached);
        }
    }

    #[test]
    fn reverse_is_found_on_the_prototype() {
        let mut agent = Agent::default();
        let array = array_literal!(&mut agent, TypeTag::UNTYPED, 1, 2, 3);
        let Value::Closure(reverse) = Object::from(array).get(&agent, &PropertyKey::new("reverse"))
        else {
            panic!("reverse should be inherited");
        };
        assert_eq!(reverse.call(&mut agent, array.into(), Value::Undefined), array.into());
        assert_eq!(array.get(&agent, 0), Value::Integer(3));
    }

    #[test]
    fn deque_closures_operate_on_the_receiver() {
        let mut agent = Agent::default();
        let array = array_literal!(&mut agent, TypeTag::UNTYPED, 1, 2);
        let cache = agent.heap.array_methods();
        let (push, pop, shift, unshift) = (
            cache.get(ArrayMethod::Push),
            cache.get(ArrayMethod::Pop),
            cache.get(ArrayMethod::Shift),
            cache.get(ArrayMethod::Unshift),
        );
        let this = Value::from(array);
        assert_eq!(push.call(&mut agent, this, Value::Integer(3)), Value::Integer(3));
        assert_eq!(pop.call(&mut agent, this, Value::Undefined), Value::Integer(3));
        assert_eq!(shift.call(&mut agent, this, Value::Undefined), Value::Integer(1));
        assert_eq!(unshift.call(&mut agent, this, Value::Integer(0)), Value::Undefined);
        assert_eq!(array.as_slice(&agent), &[Value::Integer(0), Value::Integer(2)]);
    }

    #[test]
    fn non_array_receiver_yields_undefined() {
        let mut agent = Agent::default();
        let pop = agent.heap.array_methods().get(ArrayMethod::Pop);
        assert_eq!(pop.call(&mut agent, Value::Null, Value::Undefined), Value::Undefined);
    }
}
