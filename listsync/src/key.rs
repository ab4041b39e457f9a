#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

/// Identity-keyed map used for position lookups.
#[cfg(feature = "std")]
pub type IdentityMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub type IdentityMap<K, V> = BTreeMap<K, V>;

/// Identity-keyed set used for membership checks and deduplication.
#[cfg(feature = "std")]
pub type IdentitySet<K> = HashSet<K>;
#[cfg(not(feature = "std"))]
pub type IdentitySet<K> = BTreeSet<K>;

/// The capability an item identity must have to take part in diffing.
///
/// With `feature = "std"` identities are hashed; without it they are ordered. Either way the
/// bound is resolved at compile time for each list instantiation.
#[cfg(feature = "std")]
pub trait IdentityKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> IdentityKey for K {}

#[cfg(not(feature = "std"))]
pub trait IdentityKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> IdentityKey for K {}
