// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::ops::Index;

use crate::{
    ecmascript::execution::Agent,
    heap::{CreateHeapData, Heap, indexes::NumberIndex},
};

use super::Value;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberHeapData {
    pub(crate) data: f64,
}

/// A number that does not fit in [`Value::Integer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapNumber(pub(crate) NumberIndex);

impl HeapNumber {
    pub fn get(self, agent: &Agent) -> f64 {
        agent.heap.numbers[self.0].data
    }
}

impl Index<HeapNumber> for Agent {
    type Output = f64;

    fn index(&self, index: HeapNumber) -> &Self::Output {
        &self.heap.numbers[index.0].data
    }
}

impl CreateHeapData<f64, Value> for Heap {
    fn create(&mut self, data: f64) -> Value {
        let as_integer = data as i32;
        // -0.0 compares equal to 0 but must keep its sign.
        if f64::from(as_integer) == data && !(data == 0.0 && data.is_sign_negative()) {
            Value::Integer(as_integer)
        } else {
            Value::Number(HeapNumber(self.numbers.push(NumberHeapData { data })))
        }
    }
}
