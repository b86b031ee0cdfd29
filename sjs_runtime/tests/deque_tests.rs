// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::VecDeque;

use sjs_runtime::{
    Agent, Value, array_literal,
    ecmascript::{builtins::Array, types::TypeTag},
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

#[test]
fn unshift_then_shift_restores_length() {
    init_tracing();
    let mut agent = Agent::default();
    let array = array_literal!(&mut agent, TypeTag::UNTYPED, 1, 2, 3);
    array.unshift(&mut agent, Value::Integer(0));
    assert_eq!(array.len(&agent), 4);
    assert_eq!(array.get(&agent, 0), Value::Integer(0));
    assert_eq!(array.get(&agent, 3), Value::Integer(3));
    assert_eq!(array.shift(&mut agent), Value::Integer(0));
    assert_eq!(array.len(&agent), 3);
    assert_eq!(array.get(&agent, 0), Value::Integer(1));
}

#[test]
fn shift_on_empty_array() {
    init_tracing();
    let mut agent = Agent::default();
    let array = Array::new(&mut agent, TypeTag::UNTYPED);
    assert_eq!(array.shift(&mut agent), Value::Undefined);
    assert_eq!(array.len(&agent), 0);
    assert_eq!(array.capacity(&agent), 0);
}

#[test]
fn shift_reduces_capacity_without_moving_elements() {
    init_tracing();
    let mut agent = Agent::default();
    let array = array_literal!(&mut agent, TypeTag::UNTYPED, 1, 2, 3, 4);
    assert_eq!(array.shift(&mut agent), Value::Integer(1));
    assert_eq!(array.shift(&mut agent), Value::Integer(2));
    assert_eq!(array.capacity(&agent), 2);
    assert_eq!(array.as_slice(&agent), &[Value::Integer(3), Value::Integer(4)]);
    // The consumed slots are gone from the addressable range.
    assert_eq!(array.get(&agent, 2), Value::Undefined);
    assert_eq!(agent.heap.backing_store_count(), 1);
}

#[test]
fn repeated_unshift_builds_reversed_array() {
    init_tracing();
    const N: i32 = 10_000;
    let mut agent = Agent::default();
    let array = Array::new(&mut agent, TypeTag::UNTYPED);
    for value in 0..N {
        array.unshift(&mut agent, Value::Integer(value));
        // Every unshift adds exactly one addressable slot.
        assert_eq!(array.capacity(&agent), value as u32 + 1);
    }
    assert_eq!(array.len(&agent), N);
    assert_eq!(agent.heap.backing_store_count(), 1);
    assert_eq!(array.get(&agent, 0), Value::Integer(N - 1));
    assert_eq!(array.get(&agent, N - 1), Value::Integer(0));
}

#[test]
fn queue_usage_keeps_one_backing_store() {
    init_tracing();
    let mut agent = Agent::default();
    let array = Array::new(&mut agent, TypeTag::UNTYPED);
    for value in 0..1000 {
        array.push(&mut agent, Value::Integer(value));
        if value % 2 == 1 {
            assert_eq!(array.shift(&mut agent), Value::Integer(value / 2));
        }
    }
    assert_eq!(array.len(&agent), 500);
    assert_eq!(array.get(&agent, 0), Value::Integer(500));
    assert_eq!(array.get(&agent, 499), Value::Integer(999));
    assert_eq!(agent.heap.backing_store_count(), 1);
}

#[test]
fn mixed_operations_match_vec_deque() {
    init_tracing();
    let mut agent = Agent::default();
    let array = Array::new(&mut agent, TypeTag::UNTYPED);
    let mut model: VecDeque<i32> = VecDeque::new();
    for step in 0..5000 {
        match step % 7 {
            0 | 3 | 5 => {
                array.push(&mut agent, Value::Integer(step));
                model.push_back(step);
            }
            1 | 4 => {
                array.unshift(&mut agent, Value::Integer(step));
                model.push_front(step);
            }
            2 => {
                let expected = model.pop_back().map_or(Value::Undefined, Value::Integer);
                assert_eq!(array.pop(&mut agent), expected);
            }
            _ => {
                let expected = model.pop_front().map_or(Value::Undefined, Value::Integer);
                assert_eq!(array.shift(&mut agent), expected);
            }
        }
        assert_eq!(array.len(&agent), model.len() as i32);
    }
    let expected: Vec<Value> = model.iter().copied().map(Value::Integer).collect();
    assert_eq!(array.as_slice(&agent), expected.as_slice());
    assert_eq!(array.get(&agent, model.len() as i32), Value::Undefined);
}
