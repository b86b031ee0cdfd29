// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::mem::size_of;

use crate::{
    ecmascript::{builtins::Array, execution::Agent},
    heap::{CreateHeapData, HeapMark, WorkQueues},
};

use super::{Closure, HeapNumber, HeapString, Object, OrdinaryObject};

/// A tagged runtime value as passed between generated code and the runtime.
///
/// `Undefined` doubles as the "no value" result: out-of-bounds reads, unset
/// array slots and popping or shifting an empty array all produce it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(u8)]
pub enum Value {
    #[default]
    Undefined = 1,
    Null,
    Boolean(bool),
    /// Numbers that are exactly representable as a 32-bit signed integer.
    Integer(i32),
    /// All other numbers, boxed on the heap.
    Number(HeapNumber),
    String(HeapString),
    Object(OrdinaryObject),
    Array(Array),
    Closure(Closure),
}

/// Values are passed in a single register. This assert must never be broken.
const _VALUE_SIZE_IS_WORD: () = assert!(size_of::<Value>() == size_of::<u64>());
const _OPTIONAL_VALUE_SIZE_IS_WORD: () = assert!(size_of::<Option<Value>>() == size_of::<u64>());

impl Value {
    pub fn from_f64(agent: &mut Agent, value: f64) -> Self {
        agent.heap.create(value)
    }

    pub fn from_str(agent: &mut Agent, value: &str) -> Self {
        Value::String(agent.heap.create(value))
    }

    pub fn is_undefined(self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Numeric payload of the value, if it is a number.
    pub fn to_f64(self, agent: &Agent) -> Option<f64> {
        match self {
            Value::Integer(value) => Some(f64::from(value)),
            Value::Number(number) => Some(number.get(agent)),
            _ => None,
        }
    }

    pub fn as_array(self) -> Option<Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(self) -> Option<Object> {
        Object::try_from(self).ok()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<OrdinaryObject> for Value {
    fn from(value: OrdinaryObject) -> Self {
        Value::Object(value)
    }
}

impl From<Closure> for Value {
    fn from(value: Closure) -> Self {
        Value::Closure(value)
    }
}

impl From<HeapString> for Value {
    fn from(value: HeapString) -> Self {
        Value::String(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        match value {
            Object::Object(object) => Value::Object(object),
            Object::Array(array) => Value::Array(array),
        }
    }
}

impl HeapMark for Value {
    fn mark_values(&self, queues: &mut WorkQueues) {
        queues.push_value(*self);
    }
}
