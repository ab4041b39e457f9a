//! Cursor-based pagination for the `listsync` crate.
//!
//! The `listsync` crate diffs snapshots and drives list surfaces. This crate adds the
//! framework-neutral pieces an infinite list needs on top:
//!
//! - Loading the first page (pull-to-refresh) and following pages ("load more")
//! - A trailing loading indicator with stop/loading/failed states and manual retry
//! - Automatic "load more" when the indicator scrolls into view
//! - Deduplicated accumulation of fetched items and an optional first-page cache
//!
//! Everything runs on the caller's thread. Loads are asynchronous only in the sense that the
//! loader reports back later through [`Pager::complete`].
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod footer;
mod host;
mod loader;
mod options;
mod pager;
mod refresh;


pub use error::LoadError;
pub use footer::{FooterState, ScrollMetrics, Span};
pub use host::PagingHost;
pub use loader::{LoadRequest, LoadResult, OperationToken, Page, PageCache, PageLoader};
pub use options::{OnRefreshCallback, PagerOptions, ShouldLoadMoreCallback};
pub use pager::{OperationKind, Pager};
pub use refresh::RefreshState;
