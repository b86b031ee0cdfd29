// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Exotic objects backed by runtime-specific heap data.
//!
//! Arrays are the only exotic object kind this runtime layer knows about. An
//! array shares its [`ObjectHeader`](crate::ecmascript::types::ObjectHeader)
//! with ordinary objects, so code that only knows it holds "some object" can
//! still reach the array's length and cached method slots.

pub mod array;

pub use array::{Array, ArrayHeapData, ArrayMethod, ArrayMethodCache, ARRAY_MAP, ARRAY_N_FIELDS};
