use alloc::boxed::Box;
use alloc::vec::Vec;

use listsync::{IdentityKey, IdentitySet};

use crate::footer::Footer;
use crate::loader::next_token;
use crate::{
    FooterState, LoadError, LoadRequest, LoadResult, OperationToken, Page, PageCache,
    PageLoader, PagerOptions, PagingHost, RefreshState, ScrollMetrics,
};

/// What an outstanding load was issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperationKind {
    /// First page; `with_control` when the pull-to-refresh control is spinning for it.
    Refresh { with_control: bool },
    LoadMore,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Operation {
    token: OperationToken,
    kind: OperationKind,
}

/// Drives cursor-based incremental loading for one list.
///
/// This type does not hold any UI objects. The adapter drives it by calling:
/// - `refresh_from_beginning` / `pull_to_refresh` to (re)load the first page
/// - `on_scroll` on every scroll offset change, and `end_scrolling` when scrolling stops
/// - `complete(token, result)` when the loader finishes a request
///
/// Only the most recently issued load is authoritative. Issuing a new one cancels the previous
/// one through [`PageLoader::cancel`], and completions with a stale token are dropped.
pub struct Pager<K, C, L, H> {
    options: PagerOptions,
    loader: L,
    host: H,
    cache: Option<Box<dyn PageCache<K>>>,

    items: Vec<K>,
    cursor: Option<C>,
    footer: Footer,

    current: Option<Operation>,
    token_counter: u64,
    // Set by every load-more attempt, cleared when scrolling stops or a page makes progress.
    attempted: bool,
    refresh: RefreshState,
    metrics: ScrollMetrics,
}

impl<K, C, L, H> Pager<K, C, L, H>
where
    K: IdentityKey + Clone,
    C: Clone,
    L: PageLoader<C>,
    H: PagingHost<K, L::Error>,
{
    /// Creates a pager. When a cache is given, its first page seeds the fetched items.
    pub fn new(
        options: PagerOptions,
        loader: L,
        host: H,
        cache: Option<Box<dyn PageCache<K>>>,
    ) -> Self {
        let items = cache
            .as_ref()
            .map(|cache| cache.load_first_page())
            .unwrap_or_default();
        pdebug!(
            cached = items.len(),
            has_refresh_control = options.has_refresh_control,
            "Pager::new"
        );
        Self {
            options,
            loader,
            host,
            cache,
            items,
            cursor: None,
            footer: Footer::default(),
            current: None,
            token_counter: 0,
            attempted: false,
            refresh: RefreshState::default(),
            metrics: ScrollMetrics::default(),
        }
    }

    pub fn options(&self) -> &PagerOptions {
        &self.options
    }

    /// Everything fetched so far, deduplicated, in arrival order.
    pub fn items(&self) -> &[K] {
        &self.items
    }

    pub fn cursor(&self) -> Option<&C> {
        self.cursor.as_ref()
    }

    pub fn footer_state(&self) -> FooterState {
        self.footer.state
    }

    /// Whether the trailing indicator is attached to the list.
    pub fn is_footer_attached(&self) -> bool {
        self.footer.attached
    }

    pub fn is_loading(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_operation(&self) -> Option<(OperationToken, OperationKind)> {
        self.current.map(|op| (op.token, op.kind))
    }

    pub fn refresh_state(&self) -> RefreshState {
        self.refresh
    }

    pub fn scroll_metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Replaces the fetched items and cursor, e.g. when restoring a list.
    pub fn set_fetched_items(&mut self, items: Vec<K>, cursor: Option<C>) {
        self.items = items;
        self.cursor = cursor;
        let more = self.cursor.is_some();
        self.set_footer_visible(more);
    }

    /// Keeps only the fetched items for which `keep` returns `true`.
    pub fn validate_fetched_items(&mut self, keep: impl FnMut(&K) -> bool) {
        self.items.retain(keep);
    }

    /// Reloads from the first page.
    ///
    /// With `show_refresh` (and a refresh control) the control spins while loading; otherwise
    /// the trailing indicator shows progress when nothing has been fetched yet.
    pub fn refresh_from_beginning(&mut self, show_refresh: bool) -> OperationToken {
        let with_control = self.options.has_refresh_control && show_refresh;
        self.refresh(with_control)
    }

    /// The user pulled the refresh control. Refreshes now, or once the drag ends.
    pub fn pull_to_refresh(&mut self) -> Option<OperationToken> {
        if !self.options.has_refresh_control {
            return None;
        }
        self.refresh.refreshing = true;
        if self.metrics.is_scrolling() {
            self.refresh.pending_begin = true;
            return None;
        }
        Some(self.refresh(true))
    }

    /// Loads the page after the current cursor.
    pub fn load_more(&mut self) -> OperationToken {
        let token = self.issue(OperationKind::LoadMore);
        self.attempted = true;
        self.set_footer_state(FooterState::Loading);
        pdebug!(token = token.get(), "load_more");
        self.loader.load(LoadRequest {
            token,
            cursor: self.cursor.clone(),
        });
        token
    }

    /// Manual retry from a failed trailing indicator.
    pub fn retry(&mut self) -> OperationToken {
        pdebug!(state = ?self.footer.state, "retry");
        self.load_more()
    }

    /// Delivers the result of the load identified by `token`.
    ///
    /// Returns `false` when the token is stale and the result was dropped.
    pub fn complete(&mut self, token: OperationToken, result: LoadResult<K, C, L::Error>) -> bool {
        let Some(op) = self.current.filter(|op| op.token == token) else {
            ptrace!(token = token.get(), "complete: stale token dropped");
            return false;
        };
        self.current = None;
        match op.kind {
            OperationKind::LoadMore => self.finish_load_more(result),
            OperationKind::Refresh { with_control } => self.finish_refresh(with_control, result),
        }
        true
    }

    /// Appends `items` that are not fetched yet, in arrival order, and re-renders while keeping
    /// the scroll offset.
    pub fn append(&mut self, items: Vec<K>, animated: bool) {
        let mut seen: IdentitySet<K> = self.items.iter().cloned().collect();
        for item in items {
            if seen.insert(item.clone()) {
                self.items.push(item);
            }
        }

        let offset = self.host.scroll_offset();
        self.host.reload_view(&self.items, animated);
        self.host.set_scroll_offset(offset);
    }

    /// Call on every scroll offset change.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) {
        self.metrics = metrics;
        self.load_more_if_needed();
    }

    /// Call when scrolling stops: a drag ended without deceleration, or deceleration ended.
    pub fn end_scrolling(&mut self) {
        self.attempted = false;
        self.metrics.is_dragging = false;
        self.metrics.is_decelerating = false;

        if self.refresh.pending_end {
            self.refresh.pending_end = false;
            self.stop_refresh_control();
        }
        if self.refresh.pending_begin {
            self.refresh.pending_begin = false;
            self.refresh(true);
        }
    }

    fn refresh(&mut self, with_control: bool) -> OperationToken {
        if let Some(on_refresh) = &self.options.on_refresh {
            on_refresh();
        }

        let token = self.issue(OperationKind::Refresh { with_control });
        self.set_footer_visible(true);
        if self.footer.state != FooterState::Failed {
            self.set_footer_state(FooterState::Stop);
            if !with_control && self.items.is_empty() {
                self.set_footer_state(FooterState::Loading);
            }
        }
        if with_control && !self.refresh.refreshing {
            self.refresh.refreshing = true;
            self.host.begin_refreshing();
        }

        pdebug!(token = token.get(), with_control, "refresh");
        self.loader.load(LoadRequest {
            token,
            cursor: None,
        });
        token
    }

    /// Cancels the outstanding load, if any, and makes a new one current.
    ///
    /// The superseded load finishes right here as cancelled; its late completion is stale.
    fn issue(&mut self, kind: OperationKind) -> OperationToken {
        if let Some(prev) = self.current.take() {
            pdebug!(token = prev.token.get(), "cancelling superseded load");
            self.loader.cancel(prev.token);
            self.abandon(prev.kind, kind);
        }
        let token = next_token(&mut self.token_counter);
        self.current = Some(Operation { token, kind });
        token
    }

    fn abandon(&mut self, prev: OperationKind, next: OperationKind) {
        match (prev, next) {
            (OperationKind::LoadMore, _) => self.finish_load_more(Err(LoadError::Cancelled)),
            // The control keeps spinning for the replacement refresh.
            (
                OperationKind::Refresh { with_control: true },
                OperationKind::Refresh { with_control: true },
            ) => {}
            (OperationKind::Refresh { with_control: true }, _) => {
                self.finish_refresh(true, Err(LoadError::Cancelled));
            }
            (OperationKind::Refresh { with_control: false }, _) => {
                if self.footer.state != FooterState::Failed {
                    self.set_footer_state(FooterState::Stop);
                }
            }
        }
    }

    fn finish_load_more(&mut self, result: LoadResult<K, C, L::Error>) {
        match result {
            Err(LoadError::Cancelled) => {
                ptrace!("load_more cancelled");
                self.set_footer_state(FooterState::Stop);
            }
            Err(LoadError::Failed(_)) => {
                pwarn!("load_more failed");
                self.set_footer_state(FooterState::Failed);
            }
            Ok(Page { items, next_cursor }) => {
                if !items.is_empty() && next_cursor.is_some() {
                    self.attempted = false;
                }
                self.cursor = next_cursor;
                self.append(items, false);
                if self.cursor.is_none() {
                    self.set_footer_visible(false);
                }
                self.set_footer_state(FooterState::Stop);
                if self.cursor.is_some() {
                    self.load_more_if_needed();
                }
            }
        }
    }

    fn finish_refresh(&mut self, with_control: bool, result: LoadResult<K, C, L::Error>) {
        match result {
            Err(LoadError::Cancelled) => {
                ptrace!("refresh cancelled");
                if self.footer.state != FooterState::Failed {
                    self.set_footer_state(FooterState::Stop);
                }
            }
            Err(LoadError::Failed(error)) => {
                pwarn!("refresh failed");
                self.set_footer_state(FooterState::Failed);
                if with_control {
                    self.host.refresh_failed(&error);
                }
                self.host.reload_view(&self.items, false);
            }
            Ok(Page { items, next_cursor }) => {
                self.cursor = next_cursor;
                if self.cursor.is_none() {
                    self.set_footer_visible(false);
                }
                let animated = !self.items.is_empty();
                self.items.clear();
                if let Some(cache) = self.cache.as_mut() {
                    cache.save_first_page(&items);
                }
                self.append(items, animated);
                self.set_footer_state(FooterState::Stop);
                if self.cursor.is_some() {
                    self.load_more_if_needed();
                }
            }
        }
        self.end_refreshing();
    }

    fn load_more_if_needed(&mut self) {
        if !self.options.allows_load_more() {
            return;
        }
        let state = self.footer.state;
        if state == FooterState::Failed || state == FooterState::Loading {
            return;
        }
        if self.attempted || self.current.is_some() {
            return;
        }
        if self.options.has_refresh_control && self.items.is_empty() {
            return;
        }
        if !self.is_footer_on_screen() {
            return;
        }
        ptrace!(offset = self.metrics.offset, "footer on screen, loading more");
        self.load_more();
    }

    fn is_footer_on_screen(&self) -> bool {
        self.footer.attached
            && self
                .metrics
                .footer_intersects_viewport(self.options.footer_inset)
    }

    fn end_refreshing(&mut self) {
        if !self.options.has_refresh_control {
            return;
        }
        if self.metrics.is_scrolling() {
            self.refresh.pending_end = true;
            return;
        }
        self.stop_refresh_control();
    }

    fn stop_refresh_control(&mut self) {
        if self.refresh.refreshing {
            self.refresh.refreshing = false;
            self.host.end_refreshing();
        }
    }

    fn set_footer_state(&mut self, state: FooterState) {
        if self.footer.set_state(state) {
            self.host.footer_state_changed(state);
        }
    }

    fn set_footer_visible(&mut self, visible: bool) {
        self.footer.attached = visible;
        self.host.set_footer_visible(visible);
    }
}
