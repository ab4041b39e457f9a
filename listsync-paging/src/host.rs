use crate::FooterState;

/// The UI side of a [`crate::Pager`].
///
/// Only `reload_view` and `set_footer_visible` are required; everything else defaults to a
/// no-op so simple hosts stay small.
pub trait PagingHost<K, E> {
    /// Re-render the list from `items`. Typically forwards to a
    /// `listsync::ListController::set_items`.
    fn reload_view(&mut self, items: &[K], animated: bool);

    /// Attach or detach the trailing loading indicator.
    fn set_footer_visible(&mut self, visible: bool);

    fn footer_state_changed(&mut self, _state: FooterState) {}

    /// Current scroll offset. Read before and restored after appending a page, so the list
    /// does not jump while it grows.
    fn scroll_offset(&self) -> u64 {
        0
    }

    fn set_scroll_offset(&mut self, _offset: u64) {}

    /// Show the pull-to-refresh control spinning (and scroll it into view).
    fn begin_refreshing(&mut self) {}

    fn end_refreshing(&mut self) {}

    /// A refresh started from the pull-to-refresh control failed.
    fn refresh_failed(&mut self, _error: &E) {}
}
