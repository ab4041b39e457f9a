/// State of the trailing loading indicator.
///
/// Lifecycle: `Undefined -> Stop -> Loading -> {Stop | Failed} -> ...`. `Failed` is left only
/// through an explicit retry or a successful refresh from the beginning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FooterState {
    #[default]
    Undefined,
    Stop,
    Loading,
    Failed,
}

/// A segment along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: u64,
    pub extent: u32,
}

impl Span {
    pub fn new(start: u64, extent: u32) -> Self {
        Self { start, extent }
    }

    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.extent as u64)
    }
}

/// Scroll geometry reported by the adapter on every offset change.
///
/// All values are along the scroll axis, in the same units as the host's layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics {
    pub offset: u64,
    pub viewport: u32,
    /// Total content size.
    pub content: u64,
    /// Where the trailing indicator currently sits.
    pub footer: Span,
    pub is_dragging: bool,
    pub is_decelerating: bool,
}

impl ScrollMetrics {
    pub fn is_scrolling(&self) -> bool {
        self.is_dragging || self.is_decelerating
    }

    /// Whether the footer, grown towards the content by `inset`, intersects the viewport.
    pub fn footer_intersects_viewport(&self, inset: u32) -> bool {
        if self.content == 0 {
            return false;
        }
        let footer_start = self.footer.start.saturating_sub(inset as u64);
        let footer_end = self.footer.end();
        let view_end = self.offset.saturating_add(self.viewport as u64);
        footer_start < footer_end && footer_start < view_end && footer_end > self.offset
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Footer {
    pub(crate) state: FooterState,
    pub(crate) attached: bool,
}

impl Footer {
    /// Returns `true` when the state actually changed.
    pub(crate) fn set_state(&mut self, state: FooterState) -> bool {
        if self.state == state {
            return false;
        }
        self.state = state;
        true
    }
}
