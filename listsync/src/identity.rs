use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::key::{IdentityKey, IdentityMap};

/// Gives an arbitrary payload an identity so it can live in a diffed snapshot.
///
/// Equality, ordering and hashing only look at `key`. Two `Keyed` values with the same key are
/// the same logical row even when their payloads differ; the payload difference shows up as a
/// reload rather than a delete + insert.
#[derive(Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyed<K, T> {
    pub key: K,
    pub value: T,
}

impl<K, T> Keyed<K, T> {
    pub fn new(key: K, value: T) -> Self {
        Self { key, value }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<K: PartialEq, T> PartialEq for Keyed<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, T> Eq for Keyed<K, T> {}

impl<K: Hash, T> Hash for Keyed<K, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<K: PartialOrd, T> PartialOrd for Keyed<K, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.key.partial_cmp(&other.key)
    }
}

impl<K: Ord, T> Ord for Keyed<K, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K: fmt::Debug, T> fmt::Debug for Keyed<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyed")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Which snapshot of a diff a diagnostic refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapshotSide {
    Old,
    New,
}

impl fmt::Display for SnapshotSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Old => f.write_str("old"),
            Self::New => f.write_str("new"),
        }
    }
}

/// A repeated identity inside one snapshot.
///
/// Duplicates are a caller bug but never abort an update: the first occurrence keeps its
/// identity and every later occurrence is treated as an unrelated row.
///
/// Only positions are recorded and logged, since identities need not be `Debug`. Index the
/// snapshot named by `side` with `index` or `first_index` to get the repeated identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("duplicate identity in {side} snapshot at index {index} (first seen at {first_index})")]
pub struct DuplicateIdentity {
    pub side: SnapshotSide,
    pub index: usize,
    pub first_index: usize,
}

/// Maps every identity to its first position and collects later repeats.
pub(crate) fn first_positions<'a, T, K: IdentityKey>(
    snapshot: &'a [T],
    side: SnapshotSide,
    key: &mut impl FnMut(&'a T) -> K,
    duplicates: &mut Vec<DuplicateIdentity>,
) -> (IdentityMap<K, usize>, Vec<bool>) {
    let mut first = IdentityMap::<K, usize>::new();
    let mut is_first = Vec::with_capacity(snapshot.len());
    for (index, item) in snapshot.iter().enumerate() {
        let id = key(item);
        if let Some(&first_index) = first.get(&id) {
            lwarn!(%side, index, first_index, "found duplicated identity");
            duplicates.push(DuplicateIdentity {
                side,
                index,
                first_index,
            });
            is_first.push(false);
        } else {
            first.insert(id, index);
            is_first.push(true);
        }
    }
    (first, is_first)
}

/// Reports every repeated identity in `snapshot`, in index order.
///
/// An empty result means set size equals sequence length.
pub fn find_duplicates<'a, K: IdentityKey>(
    snapshot: &'a [K],
    side: SnapshotSide,
) -> Vec<DuplicateIdentity> {
    let mut duplicates = Vec::new();
    let mut by_ref = |k: &'a K| -> &'a K { k };
    let _ = first_positions(snapshot, side, &mut by_ref, &mut duplicates);
    duplicates
}
