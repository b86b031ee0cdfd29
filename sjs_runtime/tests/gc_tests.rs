// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use sjs_runtime::{
    Agent, Options, Value, array_literal,
    ecmascript::{
        builtins::Array,
        types::{OBJECT_MAP, Object, OrdinaryObject, TypeTag},
    },
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

#[test]
fn unreachable_arrays_are_collected() {
    init_tracing();
    let mut agent = Agent::default();
    let baseline_objects = agent.heap.object_count();
    let kept = array_literal!(&mut agent, TypeTag::UNTYPED, 1, 2);
    array_literal!(&mut agent, TypeTag::UNTYPED, 3, 4);
    assert_eq!(agent.heap.array_count(), 2);
    assert_eq!(agent.heap.backing_store_count(), 2);

    agent.gc(&[kept.into()]);
    assert_eq!(agent.heap.array_count(), 1);
    assert_eq!(agent.heap.backing_store_count(), 1);
    // Array.prototype is always alive.
    assert_eq!(agent.heap.object_count(), baseline_objects);
    assert_eq!(kept.as_slice(&agent), &[Value::Integer(1), Value::Integer(2)]);
}

#[test]
fn elements_keep_their_values_alive() {
    init_tracing();
    let mut agent = Agent::default();
    let inner = Array::from_strings(&mut agent, TypeTag::UNTYPED, &["a", "b"]);
    let number = Value::from_f64(&mut agent, 1.5);
    let outer = Array::literal(&mut agent, TypeTag::UNTYPED, &[inner.into(), number]);

    agent.gc(&[outer.into()]);
    assert_eq!(agent.heap.array_count(), 2);
    assert_eq!(agent.heap.string_count(), 2);
    assert_eq!(agent.heap.number_count(), 1);
    assert_eq!(outer.get(&agent, 1).to_f64(&agent), Some(1.5));
    let Value::String(first) = inner.get(&agent, 0) else {
        panic!("expected a string");
    };
    assert_eq!(first.as_str(&agent), Some("a"));
}

#[test]
fn popped_and_shifted_values_are_released() {
    init_tracing();
    let mut agent = Agent::default();
    let array = Array::from_strings(&mut agent, TypeTag::UNTYPED, &["head", "middle", "tail"]);
    array.shift(&mut agent);
    array.pop(&mut agent);
    agent.gc(&[array.into()]);
    assert_eq!(agent.heap.string_count(), 1);
    let Value::String(middle) = array.get(&agent, 0) else {
        panic!("expected a string");
    };
    assert_eq!(middle.as_str(&agent), Some("middle"));
}

#[test]
fn shifted_array_keeps_its_whole_allocation() {
    init_tracing();
    let mut agent = Agent::default();
    let array = array_literal!(&mut agent, TypeTag::UNTYPED, 1, 2, 3, 4);
    for _ in 0..4 {
        array.shift(&mut agent);
    }
    agent.gc(&[array.into()]);
    assert_eq!(agent.heap.backing_store_count(), 1);
    array.unshift(&mut agent, Value::Integer(0));
    assert_eq!(array.as_slice(&agent), &[Value::Integer(0)]);
}

#[test]
fn property_bags_and_prototypes_are_traced() {
    init_tracing();
    let mut agent = Agent::default();
    let baseline_objects = agent.heap.object_count();
    let prototype = OrdinaryObject::create(&mut agent, &OBJECT_MAP, None, TypeTag::UNTYPED);
    let array = array_literal!(&mut agent, TypeTag::UNTYPED, 1);
    let label = Value::from_str(&mut agent, "label");
    Object::from(array).set(&mut agent, "label".into(), label);
    assert!(Object::from(array).set_prototype(&mut agent, Some(prototype.into())));

    agent.gc(&[array.into()]);
    assert_eq!(agent.heap.object_count(), baseline_objects + 1);
    assert_eq!(agent.heap.string_count(), 1);
    assert_eq!(Object::from(array).get(&agent, &"label".into()), label);
}

#[test]
fn cyclic_arrays_are_collected() {
    init_tracing();
    let mut agent = Agent::default();
    let first = Array::new(&mut agent, TypeTag::UNTYPED);
    let second = array_literal!(&mut agent, TypeTag::UNTYPED, first);
    first.push(&mut agent, second.into());
    agent.gc(&[]);
    assert_eq!(agent.heap.array_count(), 0);
    assert_eq!(agent.heap.backing_store_count(), 0);
}

#[test]
fn freed_slots_are_reused() {
    init_tracing();
    let mut agent = Agent::default();
    let dropped = Array::new(&mut agent, TypeTag::UNTYPED);
    agent.gc(&[]);
    let reused = Array::new(&mut agent, TypeTag::UNTYPED);
    assert_eq!(reused, dropped);
    assert_eq!(agent.heap.array_count(), 1);
}

#[test]
fn disabled_gc_frees_nothing() {
    init_tracing();
    let mut agent = Agent::new(Options {
        disable_gc: true,
        ..Default::default()
    });
    array_literal!(&mut agent, TypeTag::UNTYPED, 1);
    agent.gc(&[]);
    assert_eq!(agent.heap.array_count(), 1);
}

#[test]
fn method_closures_survive_collection() {
    init_tracing();
    let mut agent = Agent::default();
    agent.gc(&[]);
    let array = Array::new(&mut agent, TypeTag::UNTYPED);
    let Value::Closure(push) = Object::from(array).get(&agent, &"push".into()) else {
        panic!("push should resolve to a closure");
    };
    push.call(&mut agent, array.into(), Value::Integer(5));
    assert_eq!(array.get(&agent, 0), Value::Integer(5));
}
