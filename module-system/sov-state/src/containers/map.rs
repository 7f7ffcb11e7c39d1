use std::marker::PhantomData;

use crate::codec::BorshCodec;
use crate::{Prefix, Storage, WorkingSet};

/// A container that maps borsh-encoded keys to borsh-encoded values.
///
/// Every entry is stored under `prefix ++ encode(key)`, so two maps with
/// distinct prefixes never see each other's entries.
#[derive(Debug, Clone, PartialEq)]
pub struct StateMap<K, V> {
    _phantom: (PhantomData<K>, PhantomData<V>),
    prefix: Prefix,
}

impl<K, V> StateMap<K, V> {
    /// Creates a new [`StateMap`] stored under `prefix`.
    pub fn new(prefix: Prefix) -> Self {
        Self {
            _phantom: (PhantomData, PhantomData),
            prefix,
        }
    }

    /// Returns the prefix used when this [`StateMap`] was created.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }
}

impl<K, V> StateMap<K, V>
where
    K: borsh::BorshSerialize,
    V: borsh::BorshSerialize + borsh::BorshDeserialize,
{
    /// Inserts a key-value pair into the map, replacing any previous value.
    pub fn set<S: Storage>(&self, key: &K, value: &V, working_set: &mut WorkingSet<S>) {
        working_set.set_value(self.prefix(), key, value, &BorshCodec)
    }

    /// Returns the value corresponding to the key, or [`None`] if the map
    /// doesn't contain the key.
    pub fn get<S: Storage>(&self, key: &K, working_set: &mut WorkingSet<S>) -> Option<V> {
        working_set.get_value(self.prefix(), key, &BorshCodec)
    }
}
