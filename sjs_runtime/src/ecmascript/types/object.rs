// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### Objects
//!
//! Every heap object starts with the same [`ObjectHeader`]: the object map
//! (the dispatch table naming the object's field slots), the prototype, a
//! lazily created property bag and the compiler-assigned type tag. The
//! header is followed by the object kind's own storage. For ordinary objects
//! that is a run of field slots; arrays put their length and cached method
//! slots there instead, and expose them through the same slot numbers via
//! [`InternalSlots`].

use core::ops::{Index, IndexMut};

use ahash::AHashMap;
use wtf8::{Wtf8, Wtf8Buf};

use crate::{
    ecmascript::{builtins::Array, execution::Agent},
    heap::{CreateHeapData, Heap, HeapMark, WorkQueues, indexes::ObjectIndex},
};

use super::Value;

/// Compiler-assigned type descriptor of an object. Opaque to the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TypeTag(u32);

impl TypeTag {
    pub const UNTYPED: Self = Self(0);

    pub const fn new(tag: u32) -> Self {
        Self(tag)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Dispatch table shared by all objects of one physical layout.
#[derive(Debug, PartialEq, Eq)]
pub struct ObjectMap {
    pub name: &'static str,
    /// Property names stored inline, in slot order.
    pub fields: &'static [&'static str],
}

impl ObjectMap {
    pub const fn new(name: &'static str, fields: &'static [&'static str]) -> Self {
        Self { name, fields }
    }

    pub fn slot_of(&self, key: &PropertyKey) -> Option<usize> {
        self.fields
            .iter()
            .position(|field| Wtf8::from_str(field) == key.as_wtf8())
    }
}

/// Map of objects without inline fields.
pub static OBJECT_MAP: ObjectMap = ObjectMap::new("Object", &[]);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyKey(Wtf8Buf);

impl PropertyKey {
    pub fn new(key: &str) -> Self {
        Self(Wtf8Buf::from_str(key))
    }

    pub fn as_wtf8(&self) -> &Wtf8 {
        &self.0
    }
}

impl From<&str> for PropertyKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

pub type PropertyBag = AHashMap<PropertyKey, Value>;

#[derive(Debug)]
#[repr(C)]
pub struct ObjectHeader {
    pub(crate) map: &'static ObjectMap,
    pub(crate) prototype: Option<Object>,
    pub(crate) property_bag: Option<Box<PropertyBag>>,
    pub(crate) type_tag: TypeTag,
}

impl ObjectHeader {
    pub fn new(map: &'static ObjectMap, prototype: Option<Object>, type_tag: TypeTag) -> Self {
        Self {
            map,
            prototype,
            property_bag: None,
            type_tag,
        }
    }

    pub fn map(&self) -> &'static ObjectMap {
        self.map
    }

    pub fn prototype(&self) -> Option<Object> {
        self.prototype
    }

    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    pub(crate) fn bag_get(&self, key: &PropertyKey) -> Option<Value> {
        self.property_bag.as_ref()?.get(key).copied()
    }

    pub(crate) fn bag_insert(&mut self, key: PropertyKey, value: Value) {
        self.property_bag
            .get_or_insert_with(Default::default)
            .insert(key, value);
    }
}

impl HeapMark for ObjectHeader {
    fn mark_values(&self, queues: &mut WorkQueues) {
        if let Some(prototype) = self.prototype {
            queues.push_value(prototype.into());
        }
        if let Some(bag) = &self.property_bag {
            bag.values().for_each(|value| value.mark_values(queues));
        }
    }
}

/// Uniform access to the header and field slots of any object kind.
///
/// Generic object fast paths go through this trait, so array bookkeeping is
/// reachable from code that was compiled against "any object".
pub trait InternalSlots {
    fn header(&self) -> &ObjectHeader;

    fn header_mut(&mut self) -> &mut ObjectHeader;

    /// Reads field slot `slot`. Slots past the layout's last field read as
    /// `Undefined`.
    fn field(&self, heap: &Heap, slot: usize) -> Value;

    /// Writes field slot `slot`, returning false if the slot does not exist
    /// or does not accept the value.
    fn set_field(&mut self, slot: usize, value: Value) -> bool;
}

#[derive(Debug)]
#[repr(C)]
pub struct ObjectHeapData {
    pub(crate) header: ObjectHeader,
    pub(crate) fields: Box<[Value]>,
}

impl ObjectHeapData {
    pub fn new(map: &'static ObjectMap, prototype: Option<Object>, type_tag: TypeTag) -> Self {
        Self {
            header: ObjectHeader::new(map, prototype, type_tag),
            fields: vec![Value::Undefined; map.fields.len()].into_boxed_slice(),
        }
    }
}

impl InternalSlots for ObjectHeapData {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        &mut self.header
    }

    fn field(&self, _heap: &Heap, slot: usize) -> Value {
        self.fields.get(slot).copied().unwrap_or_default()
    }

    fn set_field(&mut self, slot: usize, value: Value) -> bool {
        match self.fields.get_mut(slot) {
            Some(field) => {
                *field = value;
                true
            }
            None => false,
        }
    }
}

impl HeapMark for ObjectHeapData {
    fn mark_values(&self, queues: &mut WorkQueues) {
        self.header.mark_values(queues);
        self.fields.iter().for_each(|value| value.mark_values(queues));
    }
}

/// Handle to an object with the ordinary field-slot layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrdinaryObject(pub(crate) ObjectIndex);

impl OrdinaryObject {
    pub fn create(
        agent: &mut Agent,
        map: &'static ObjectMap,
        prototype: Option<Object>,
        type_tag: TypeTag,
    ) -> Self {
        agent
            .heap
            .create(ObjectHeapData::new(map, prototype, type_tag))
    }
}

impl CreateHeapData<ObjectHeapData, OrdinaryObject> for Heap {
    fn create(&mut self, data: ObjectHeapData) -> OrdinaryObject {
        OrdinaryObject(self.objects.push(data))
    }
}

impl Index<OrdinaryObject> for Heap {
    type Output = ObjectHeapData;

    fn index(&self, index: OrdinaryObject) -> &Self::Output {
        &self.objects[index.0]
    }
}

impl IndexMut<OrdinaryObject> for Heap {
    fn index_mut(&mut self, index: OrdinaryObject) -> &mut Self::Output {
        &mut self.objects[index.0]
    }
}

impl Index<OrdinaryObject> for Agent {
    type Output = ObjectHeapData;

    fn index(&self, index: OrdinaryObject) -> &Self::Output {
        &self.heap[index]
    }
}

impl IndexMut<OrdinaryObject> for Agent {
    fn index_mut(&mut self, index: OrdinaryObject) -> &mut Self::Output {
        &mut self.heap[index]
    }
}

/// Any heap object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Object {
    Object(OrdinaryObject),
    Array(Array),
}

impl From<OrdinaryObject> for Object {
    fn from(value: OrdinaryObject) -> Self {
        Object::Object(value)
    }
}

impl From<Array> for Object {
    fn from(value: Array) -> Self {
        Object::Array(value)
    }
}

impl TryFrom<Value> for Object {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(object) => Ok(Object::Object(object)),
            Value::Array(array) => Ok(Object::Array(array)),
            _ => Err(()),
        }
    }
}

impl Object {
    fn slots(self, heap: &Heap) -> &dyn InternalSlots {
        match self {
            Object::Object(object) => &heap[object],
            Object::Array(array) => &heap[array],
        }
    }

    fn slots_mut(self, heap: &mut Heap) -> &mut dyn InternalSlots {
        match self {
            Object::Object(object) => &mut heap[object],
            Object::Array(array) => &mut heap[array],
        }
    }

    pub fn get_field(self, agent: &Agent, slot: usize) -> Value {
        self.slots(&agent.heap).field(&agent.heap, slot)
    }

    pub fn set_field(self, agent: &mut Agent, slot: usize, value: Value) -> bool {
        self.slots_mut(&mut agent.heap).set_field(slot, value)
    }

    pub fn map(self, agent: &Agent) -> &'static ObjectMap {
        self.slots(&agent.heap).header().map()
    }

    pub fn type_tag(self, agent: &Agent) -> TypeTag {
        self.slots(&agent.heap).header().type_tag()
    }

    pub fn prototype(self, agent: &Agent) -> Option<Object> {
        self.slots(&agent.heap).header().prototype()
    }

    /// Replaces the prototype. Returns false, leaving the object unchanged,
    /// if the new prototype chain would pass through this object.
    pub fn set_prototype(self, agent: &mut Agent, prototype: Option<Object>) -> bool {
        let mut next = prototype;
        while let Some(candidate) = next {
            if candidate == self {
                return false;
            }
            next = candidate.prototype(agent);
        }
        self.slots_mut(&mut agent.heap).header_mut().prototype = prototype;
        true
    }

    /// Looks `key` up in the field slots, then the property bag, then along
    /// the prototype chain. Missing properties read as `Undefined`.
    pub fn get(self, agent: &Agent, key: &PropertyKey) -> Value {
        let mut current = Some(self);
        while let Some(object) = current {
            let slots = object.slots(&agent.heap);
            let header = slots.header();
            if let Some(slot) = header.map.slot_of(key) {
                return slots.field(&agent.heap, slot);
            }
            if let Some(value) = header.bag_get(key) {
                return value;
            }
            current = header.prototype;
        }
        Value::Undefined
    }

    /// Writes an own property: a field slot if the map has one for `key`,
    /// otherwise the property bag.
    pub fn set(self, agent: &mut Agent, key: PropertyKey, value: Value) -> bool {
        let slots = self.slots_mut(&mut agent.heap);
        match slots.header().map.slot_of(&key) {
            Some(slot) => slots.set_field(slot, value),
            None => {
                slots.header_mut().bag_insert(key, value);
                true
            }
        }
    }
}
