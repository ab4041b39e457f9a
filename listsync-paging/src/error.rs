/// Why a page load did not produce a page.
///
/// Loaders report failures through this type instead of panicking or unwinding across the
/// completion boundary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadError<E> {
    /// The request was superseded or aborted. Benign: no UI is surfaced and prior state is kept.
    #[error("load cancelled")]
    Cancelled,
    /// The loader failed; the pager exposes a manual retry.
    #[error("load failed: {0}")]
    Failed(E),
}

impl<E> LoadError<E> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
