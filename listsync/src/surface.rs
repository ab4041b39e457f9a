use alloc::vec::Vec;

use crate::Layer;

/// The list-rendering primitives the reload engine drives.
///
/// Implementations wrap a concrete table/collection widget. Indexes passed to
/// `delete_items` follow the old indexing, indexes passed to `insert_items` follow the new
/// one, as in any batch-update API.
pub trait ListSurface {
    /// Whether the surface is attached to a live window.
    fn is_in_window(&self) -> bool;

    /// Replaces the entire visible content without animation.
    fn reload_data(&mut self);

    fn begin_updates(&mut self);
    fn delete_items(&mut self, indexes: &[usize]);
    fn insert_items(&mut self, indexes: &[usize]);
    fn move_item(&mut self, from: usize, to: usize);
    /// Commits the batch. The adapter reports the end of the animation through
    /// [`crate::ListController::finish_update`].
    fn end_updates(&mut self);

    /// Collects the indexes of currently visible rows into `out` (clears `out` first).
    fn visible_indexes(&self, out: &mut Vec<usize>);

    /// Total content size along the scroll axis.
    fn content_extent(&self) -> u64;
    /// Visible viewport size along the scroll axis.
    fn viewport_extent(&self) -> u32;
    fn scroll_to_top(&mut self);

    fn set_layer(&mut self, _index: usize, _layer: Layer) {}

    /// Re-binds the row at `index` to its current data without a reload animation.
    fn refresh_item(&mut self, _index: usize) {}

    fn set_empty_state_visible(&mut self, _visible: bool) {}
}
