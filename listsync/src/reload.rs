use alloc::vec::Vec;

use crate::diff::{EditScript, diff};
use crate::key::{IdentityKey, IdentitySet};
use crate::{Layer, ListSurface, Reload, ReloadKind, ReloadOptions};

/// Whether a transition from a snapshot of `old_len` rows may be animated.
///
/// Animation requires all of: the caller asked for it, there was something on screen, the
/// surface is in a window, and the host is active. Anything else is a full reload.
pub fn can_animate<S: ListSurface + ?Sized>(
    surface: &S,
    old_len: usize,
    animated: bool,
    options: &ReloadOptions,
) -> bool {
    animated && old_len > 0 && surface.is_in_window() && options.is_host_active()
}

/// Moves `surface` from `old` to `new`.
///
/// `update_objects` receives `new` exactly once and must install it as the backing snapshot.
/// For an animated transition it runs inside the batch, right after `begin_updates`, so the
/// surface's row count and the backing snapshot agree for the whole transaction.
///
/// For [`ReloadKind::Animated`] the batch stays in flight until the adapter observes the end of
/// the animation.
pub fn reload<K, S>(
    surface: &mut S,
    old: &[K],
    new: Vec<K>,
    animated: bool,
    options: &ReloadOptions,
    update_objects: impl FnOnce(Vec<K>),
) -> Reload
where
    K: IdentityKey + Clone,
    S: ListSurface + ?Sized,
{
    if !can_animate(surface, old.len(), animated, options) {
        ldebug!(
            old_len = old.len(),
            new_len = new.len(),
            animated,
            "reload: full"
        );
        update_objects(new);
        surface.reload_data();
        return Reload::full();
    }

    let script = diff(old, &new);
    if script.is_empty() {
        ltrace!(len = new.len(), "reload: unchanged");
        update_objects(new);
        return Reload {
            kind: ReloadKind::Unchanged,
            reloads: script.reloads,
        };
    }

    let new_len = new.len();
    debug_assert_eq!(
        script.expected_len(old.len()),
        Some(new_len),
        "edit script violates the batch count check"
    );

    surface.begin_updates();
    update_objects(new);
    apply_script(surface, &script, options);
    surface.end_updates();

    if options.scroll_to_top_when_underfilled
        && new_len > 0
        && surface.content_extent() < u64::from(surface.viewport_extent())
    {
        surface.scroll_to_top();
    }

    ldebug!(
        deletions = script.deletions.len(),
        insertions = script.insertions.len(),
        moves = script.moves.len(),
        "reload: animated"
    );

    Reload {
        kind: ReloadKind::Animated,
        reloads: script.reloads,
    }
}

fn apply_script<K, S>(surface: &mut S, script: &EditScript<K>, options: &ReloadOptions)
where
    S: ListSurface + ?Sized,
{
    if !script.deletions.is_empty() {
        surface.delete_items(&script.deletion_indexes());
    }
    let inserted = script.insertion_indexes();
    if !inserted.is_empty() {
        surface.insert_items(&inserted);
    }
    for m in &script.moves {
        surface.move_item(m.from, m.to);
    }

    if !options.layer_inserts_behind {
        return;
    }
    let mut visible = Vec::new();
    surface.visible_indexes(&mut visible);
    if visible.is_empty() {
        return;
    }
    let inserted: IdentitySet<usize> = inserted.into_iter().collect();
    for index in visible {
        let layer = if inserted.contains(&index) {
            Layer::Back
        } else {
            Layer::Front
        };
        surface.set_layer(index, layer);
    }
}
