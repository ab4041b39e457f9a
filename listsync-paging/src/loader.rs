use alloc::vec::Vec;

use crate::LoadError;

/// Identifies one load issued by a [`crate::Pager`].
///
/// Tokens increase monotonically per pager. Only the most recent token is authoritative; a
/// completion carrying any other token is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperationToken(u64);

impl OperationToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A request handed to a [`PageLoader`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadRequest<C> {
    pub token: OperationToken,
    /// `None` asks for the first page.
    pub cursor: Option<C>,
}

impl<C> LoadRequest<C> {
    pub fn is_first_page(&self) -> bool {
        self.cursor.is_none()
    }
}

/// One page of results.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page<K, C> {
    pub items: Vec<K>,
    /// Continuation for the next page. `None` means there is nothing more to load.
    pub next_cursor: Option<C>,
}

impl<K, C> Page<K, C> {
    pub fn new(items: Vec<K>, next_cursor: Option<C>) -> Self {
        Self { items, next_cursor }
    }

    /// A page with no continuation.
    pub fn last(items: Vec<K>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }
}

/// What a loader delivers back through [`crate::Pager::complete`].
pub type LoadResult<K, C, E> = Result<Page<K, C>, LoadError<E>>;

/// Issues page loads on behalf of a pager.
///
/// `load` must not block: it starts the work and returns. The adapter later calls
/// [`crate::Pager::complete`] exactly once with the request's token. Timeouts are the
/// loader's business.
pub trait PageLoader<C> {
    type Error;

    fn load(&mut self, request: LoadRequest<C>);

    /// Asks an outstanding load to stop. Its completion, if it still arrives, is ignored.
    fn cancel(&mut self, _token: OperationToken) {}
}

/// Optional persistence for the first page, consulted when a pager is created.
///
/// The storage format is up to the implementation.
pub trait PageCache<K> {
    fn save_first_page(&mut self, items: &[K]);
    fn load_first_page(&self) -> Vec<K>;
}

pub(crate) fn next_token(counter: &mut u64) -> OperationToken {
    *counter = counter.wrapping_add(1);
    OperationToken(*counter)
}
