// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::{
    fmt::Debug,
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem::size_of,
    num::NonZeroU32,
};

use crate::ecmascript::{
    builtins::ArrayHeapData,
    types::{ClosureHeapData, NumberHeapData, ObjectHeapData, StringHeapData, Value},
};

/// A struct containing a non-zero index into an array or
/// vector of `T`s. Due to the non-zero value, the offset
/// in the vector is offset by one.
///
/// This index implies a tracing reference count from this
/// struct to T at the given index.
pub struct BaseIndex<T: ?Sized>(NonZeroU32, PhantomData<T>);

const _INDEX_SIZE_IS_U32: () = assert!(size_of::<BaseIndex<()>>() == size_of::<u32>());
const _OPTION_INDEX_SIZE_IS_U32: () =
    assert!(size_of::<Option<BaseIndex<()>>>() == size_of::<u32>());

impl<T: ?Sized> Debug for BaseIndex<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        (self.0.get() - 1).fmt(f)
    }
}

impl<T: ?Sized> Clone for BaseIndex<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for BaseIndex<T> {}

impl<T: ?Sized> PartialEq for BaseIndex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: ?Sized> Eq for BaseIndex<T> {}

impl<T: ?Sized> PartialOrd for BaseIndex<T> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: ?Sized> Ord for BaseIndex<T> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T: ?Sized> Hash for BaseIndex<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T: ?Sized> BaseIndex<T> {
    pub const fn into_index(self) -> usize {
        self.0.get() as usize - 1
    }

    pub const fn into_u32_index(self) -> u32 {
        self.0.get() - 1
    }

    pub const fn from_index(value: usize) -> Self {
        assert!(value < u32::MAX as usize);
        let value = value as u32;
        match NonZeroU32::new(value + 1) {
            Some(value) => Self(value, PhantomData),
            None => unreachable!(),
        }
    }

    pub const fn from_u32_index(value: u32) -> Self {
        assert!(value != u32::MAX);
        match NonZeroU32::new(value + 1) {
            Some(value) => Self(value, PhantomData),
            None => unreachable!(),
        }
    }
}

pub type ArrayIndex = BaseIndex<ArrayHeapData>;
/// Index of an array backing store allocation.
pub type BackingStoreIndex = BaseIndex<Box<[Value]>>;
pub type ClosureIndex = BaseIndex<ClosureHeapData>;
pub type NumberIndex = BaseIndex<NumberHeapData>;
pub type ObjectIndex = BaseIndex<ObjectHeapData>;
pub type StringIndex = BaseIndex<StringHeapData>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_non_zero_storage() {
        let index = ObjectIndex::from_index(0);
        assert_eq!(index.into_index(), 0);
        assert_eq!(index.into_u32_index(), 0);
        let index = ObjectIndex::from_u32_index(41);
        assert_eq!(index.into_index(), 41);
        assert_eq!(format!("{index:?}"), "41");
    }

    #[test]
    #[should_panic]
    fn index_rejects_u32_max() {
        let _ = ArrayIndex::from_u32_index(u32::MAX);
    }
}
