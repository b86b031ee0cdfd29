// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use wtf8::{Wtf8, Wtf8Buf};

use crate::{
    ecmascript::execution::Agent,
    heap::{CreateHeapData, Heap, indexes::StringIndex},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringHeapData {
    pub(crate) data: Wtf8Buf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapString(pub(crate) StringIndex);

impl HeapString {
    pub fn as_wtf8(self, agent: &Agent) -> &Wtf8 {
        &agent.heap.strings[self.0].data
    }

    /// Returns the string contents if they are valid UTF-8.
    pub fn as_str(self, agent: &Agent) -> Option<&str> {
        self.as_wtf8(agent).as_str()
    }
}

impl CreateHeapData<&str, HeapString> for Heap {
    fn create(&mut self, data: &str) -> HeapString {
        HeapString(self.strings.push(StringHeapData {
            data: Wtf8Buf::from_str(data),
        }))
    }
}
