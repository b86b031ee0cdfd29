// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod closure;
mod number;
mod object;
mod string;
mod value;

pub use closure::{Behaviour, Closure, ClosureHeapData};
pub use number::{HeapNumber, NumberHeapData};
pub use object::{
    InternalSlots, OBJECT_MAP, Object, ObjectHeader, ObjectHeapData, ObjectMap, OrdinaryObject,
    PropertyBag, PropertyKey, TypeTag,
};
pub use string::{HeapString, StringHeapData};
pub use value::Value;
