// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{
    ecmascript::execution::Agent,
    heap::{CreateHeapData, Heap, HeapMark, WorkQueues, indexes::ClosureIndex},
};

use super::Value;

/// Native entry point of a closure: `(agent, env, this, argument)`.
pub type Behaviour = fn(&mut Agent, Value, Value, Value) -> Value;

/// An environment paired with a two-argument function. Generated code treats
/// closures as opaque call targets.
#[derive(Debug, Clone, Copy)]
pub struct ClosureHeapData {
    pub(crate) env: Value,
    pub(crate) behaviour: Behaviour,
}

impl ClosureHeapData {
    pub fn new(env: Value, behaviour: Behaviour) -> Self {
        Self { env, behaviour }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Closure(pub(crate) ClosureIndex);

impl Closure {
    pub fn call(self, agent: &mut Agent, this: Value, argument: Value) -> Value {
        let ClosureHeapData { env, behaviour } = agent.heap.closures[self.0];
        behaviour(agent, env, this, argument)
    }
}

impl CreateHeapData<ClosureHeapData, Closure> for Heap {
    fn create(&mut self, data: ClosureHeapData) -> Closure {
        Closure(self.closures.push(data))
    }
}

impl HeapMark for Closure {
    fn mark_values(&self, queues: &mut WorkQueues) {
        queues.closures.push(self.0);
    }
}

impl HeapMark for ClosureHeapData {
    fn mark_values(&self, queues: &mut WorkQueues) {
        self.env.mark_values(queues);
    }
}
