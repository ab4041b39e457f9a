use alloc::vec::Vec;

use crate::gate::{GateState, Visibility, VisibilityGate};
use crate::key::{IdentityKey, IdentitySet};
use crate::{ListSurface, Reload, ReloadKind, ReloadOptions, Update, reload};

/// Owns the backing snapshot of one list surface and serializes updates to it.
///
/// This type does not hold any UI objects. Adapters pass their surface into each call and
/// report the end of an animated batch via [`ListController::finish_update`].
///
/// Guarantees:
/// - the backing snapshot changes only inside a reload transaction or while hidden;
/// - at most one animated batch is in flight; requests arriving meanwhile are coalesced and
///   only the latest is applied;
/// - nothing is animated while the surface is hidden, and revealing it applies the latest
///   snapshot exactly once.
#[derive(Clone, Debug)]
pub struct ListController<K> {
    options: ReloadOptions,
    items: Vec<K>,
    gate: VisibilityGate,
    in_flight: bool,
    queued: Option<Vec<K>>,
}

impl<K: IdentityKey + Clone> ListController<K> {
    pub fn new(options: ReloadOptions) -> Self {
        Self::with_items(options, Vec::new())
    }

    /// Creates a controller whose surface already shows `items`.
    pub fn with_items(options: ReloadOptions, items: Vec<K>) -> Self {
        Self {
            options,
            items,
            gate: VisibilityGate::default(),
            in_flight: false,
            queued: None,
        }
    }

    pub fn options(&self) -> &ReloadOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ReloadOptions) {
        self.options = options;
    }

    /// The backing snapshot. While hidden this is already the latest requested snapshot.
    pub fn items(&self) -> &[K] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&K> {
        self.items.get(index)
    }

    pub fn index_of(&self, id: &K) -> Option<usize> {
        self.items.iter().position(|k| k == id)
    }

    pub fn is_visible(&self) -> bool {
        self.gate.is_visible()
    }

    /// Whether an animated batch is waiting for [`Self::finish_update`].
    pub fn is_updating(&self) -> bool {
        self.in_flight
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn restore_gate_state(&mut self, state: GateState) {
        self.gate = VisibilityGate::from_state(state);
    }

    /// Requests that the surface show `items`.
    pub fn set_items<S: ListSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        items: Vec<K>,
        animated: bool,
    ) -> Update {
        if !self.gate.is_visible() {
            ltrace!(len = items.len(), "set_items: deferred while hidden");
            self.items = items;
            self.queued = None;
            self.gate.defer();
            return Update::Deferred;
        }

        if self.in_flight {
            ltrace!(len = items.len(), "set_items: queued behind running batch");
            self.queued = Some(items);
            return Update::Queued;
        }

        if self.gate.take_deferred() {
            self.items = items;
            surface.reload_data();
            self.sync_empty_state(surface);
            return Update::Applied(Reload::full());
        }

        let old = core::mem::take(&mut self.items);
        let backing = &mut self.items;
        let result = reload(surface, &old, items, animated, &self.options, |new| {
            *backing = new;
        });

        match result.kind {
            ReloadKind::Animated => {
                self.in_flight = true;
                refresh_visible_reloads(surface, &result.reloads);
            }
            // Same identities in the same order; payloads may still have changed.
            ReloadKind::Unchanged => refresh_visible_reloads(surface, &result.reloads),
            ReloadKind::Full => {}
        }
        self.sync_empty_state(surface);
        Update::Applied(result)
    }

    /// Reports that the running animated batch finished.
    ///
    /// If requests were coalesced meanwhile, the latest one is applied without animation and
    /// its outcome is returned.
    pub fn finish_update<S: ListSurface + ?Sized>(&mut self, surface: &mut S) -> Option<Update> {
        if !self.in_flight {
            return None;
        }
        self.in_flight = false;
        let queued = self.queued.take()?;
        Some(self.set_items(surface, queued, false))
    }

    /// Shows or hides the surface. Revealing a surface that missed updates reloads it once with
    /// the latest snapshot.
    pub fn set_visible<S: ListSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        visible: bool,
    ) -> Option<Reload> {
        let visibility = if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if !self.gate.set_visibility(visibility) {
            return None;
        }
        ldebug!(len = self.items.len(), "set_visible: flushing deferred update");
        surface.reload_data();
        self.sync_empty_state(surface);
        Some(Reload::full())
    }

    /// Re-binds every visible row to its current data.
    pub fn refresh_visible<S: ListSurface + ?Sized>(&self, surface: &mut S) {
        let mut visible = Vec::new();
        surface.visible_indexes(&mut visible);
        for index in visible {
            if index < self.items.len() {
                surface.refresh_item(index);
            }
        }
    }

    fn sync_empty_state<S: ListSurface + ?Sized>(&self, surface: &mut S) {
        surface.set_empty_state_visible(self.options.should_show_empty_state(self.items.len()));
    }
}

fn refresh_visible_reloads<S: ListSurface + ?Sized>(surface: &mut S, reloads: &[usize]) {
    if reloads.is_empty() {
        return;
    }
    let mut visible = Vec::new();
    surface.visible_indexes(&mut visible);
    let visible: IdentitySet<usize> = visible.into_iter().collect();
    for &index in reloads {
        if visible.contains(&index) {
            surface.refresh_item(index);
        }
    }
}
