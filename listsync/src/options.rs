use alloc::sync::Arc;

/// Reports whether the host application is active (in the foreground).
pub type HostActiveCallback = Arc<dyn Fn() -> bool + Send + Sync>;

/// Decides whether the empty-state view should be shown for a snapshot of `len` rows.
pub type EmptyStatePredicate = Arc<dyn Fn(usize) -> bool + Send + Sync>;

/// Configuration for [`crate::reload`] and [`crate::ListController`].
///
/// Cheap to clone: callbacks are stored in `Arc`s. Every field has a documented fallback, so a
/// default-constructed value is a complete policy.
pub struct ReloadOptions {
    /// Host activity probe. `None` means the host is always considered active.
    pub host_active: Option<HostActiveCallback>,

    /// Put visible inserted rows behind retained rows during an animated batch.
    pub layer_inserts_behind: bool,

    /// Scroll to the top after an animated batch when the content no longer fills the
    /// viewport.
    pub scroll_to_top_when_underfilled: bool,

    /// Empty-state policy. `None` shows the empty state exactly when the snapshot is empty.
    pub show_empty_state: Option<EmptyStatePredicate>,
}

impl Default for ReloadOptions {
    fn default() -> Self {
        Self {
            host_active: None,
            layer_inserts_behind: true,
            scroll_to_top_when_underfilled: true,
            show_empty_state: None,
        }
    }
}

impl Clone for ReloadOptions {
    fn clone(&self) -> Self {
        Self {
            host_active: self.host_active.clone(),
            layer_inserts_behind: self.layer_inserts_behind,
            scroll_to_top_when_underfilled: self.scroll_to_top_when_underfilled,
            show_empty_state: self.show_empty_state.clone(),
        }
    }
}

impl ReloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host_active(mut self, host_active: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.host_active = Some(Arc::new(host_active));
        self
    }

    pub fn with_layer_inserts_behind(mut self, layer_inserts_behind: bool) -> Self {
        self.layer_inserts_behind = layer_inserts_behind;
        self
    }

    pub fn with_scroll_to_top_when_underfilled(mut self, enabled: bool) -> Self {
        self.scroll_to_top_when_underfilled = enabled;
        self
    }

    pub fn with_show_empty_state(
        mut self,
        show_empty_state: Option<impl Fn(usize) -> bool + Send + Sync + 'static>,
    ) -> Self {
        self.show_empty_state = show_empty_state.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn is_host_active(&self) -> bool {
        self.host_active.as_ref().is_none_or(|f| f())
    }

    pub(crate) fn should_show_empty_state(&self, len: usize) -> bool {
        match &self.show_empty_state {
            Some(f) => f(len),
            None => len == 0,
        }
    }
}

impl core::fmt::Debug for ReloadOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReloadOptions")
            .field("host_active", &self.host_active.as_ref().map(|_| ".."))
            .field("layer_inserts_behind", &self.layer_inserts_behind)
            .field(
                "scroll_to_top_when_underfilled",
                &self.scroll_to_top_when_underfilled,
            )
            .finish_non_exhaustive()
    }
}
