use alloc::sync::Arc;

/// Decides whether automatic "load more" is allowed right now.
pub type ShouldLoadMoreCallback = Arc<dyn Fn() -> bool + Send + Sync>;

/// Runs right before every refresh from the beginning.
pub type OnRefreshCallback = Arc<dyn Fn() + Send + Sync>;

/// Configuration for [`crate::Pager`].
///
/// Resolved once at construction; unset hooks fall back to the documented defaults.
pub struct PagerOptions {
    /// Whether the list has a pull-to-refresh control. While it does, automatic "load more"
    /// waits until the first page has arrived.
    pub has_refresh_control: bool,

    /// How far ahead of the trailing indicator automatic loading kicks in.
    pub footer_inset: u32,

    /// `None` always allows automatic loading.
    pub should_load_more: Option<ShouldLoadMoreCallback>,

    pub on_refresh: Option<OnRefreshCallback>,
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self {
            has_refresh_control: true,
            footer_inset: 0,
            should_load_more: None,
            on_refresh: None,
        }
    }
}

impl Clone for PagerOptions {
    fn clone(&self) -> Self {
        Self {
            has_refresh_control: self.has_refresh_control,
            footer_inset: self.footer_inset,
            should_load_more: self.should_load_more.clone(),
            on_refresh: self.on_refresh.clone(),
        }
    }
}

impl PagerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_refresh_control(mut self, has_refresh_control: bool) -> Self {
        self.has_refresh_control = has_refresh_control;
        self
    }

    pub fn with_footer_inset(mut self, footer_inset: u32) -> Self {
        self.footer_inset = footer_inset;
        self
    }

    pub fn with_should_load_more(
        mut self,
        should_load_more: Option<impl Fn() -> bool + Send + Sync + 'static>,
    ) -> Self {
        self.should_load_more = should_load_more.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_refresh(mut self, on_refresh: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.on_refresh = on_refresh.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn allows_load_more(&self) -> bool {
        self.should_load_more.as_ref().is_none_or(|f| f())
    }
}

impl core::fmt::Debug for PagerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PagerOptions")
            .field("has_refresh_control", &self.has_refresh_control)
            .field("footer_inset", &self.footer_inset)
            .finish_non_exhaustive()
    }
}
