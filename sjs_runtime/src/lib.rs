// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Object and array runtime layer for natively compiled SJS programs.
//!
//! Generated code calls into this crate for every array allocation, element
//! access and deque-style mutation. In-bounds element access is a single
//! bounds check against the backing store capacity followed by one load or
//! store; everything else falls through to the slow paths in
//! [`ecmascript::builtins::array`].

pub mod ecmascript;
pub mod heap;

pub use ecmascript::execution::{Agent, GrowthPolicy, Options};
pub use ecmascript::types::Value;
