//! A headless list diffing and incremental reload engine.
//!
//! For cursor-based pagination and pull-to-refresh, see the `listsync-paging` crate.
//!
//! This crate computes the insertions, deletions and moves between two ordered snapshots of
//! identities and drives a list surface through a single batch update, falling back to a full
//! reload whenever an animation would be pointless or unsafe.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - a [`ListSurface`] implementation wrapping its table/collection widget
//! - visibility changes of that widget
//! - a notification when an animated batch finishes
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod diff;
mod gate;
mod identity;
mod key;
mod options;
mod reload;
mod surface;
mod types;

#[cfg(test)]
mod tests;

pub use controller::ListController;
pub use diff::{Deletion, EditScript, Insertion, Move, diff, diff_by_key};
pub use gate::{GateState, Visibility, VisibilityGate};
pub use identity::{DuplicateIdentity, Keyed, SnapshotSide, find_duplicates};
pub use key::{IdentityKey, IdentityMap, IdentitySet};
pub use options::{EmptyStatePredicate, HostActiveCallback, ReloadOptions};
pub use reload::{can_animate, reload};
pub use surface::ListSurface;
pub use types::{Layer, Reload, ReloadKind, Update};
