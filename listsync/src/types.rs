use alloc::vec::Vec;

/// Stacking hint for rows that are visible during an animated batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layer {
    /// Freshly inserted rows slide in underneath existing content.
    Back,
    Front,
}

/// How a snapshot transition reached the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReloadKind {
    /// The whole surface was reloaded without animation; no edit script was computed.
    Full,
    /// An animated batch update is in flight until the adapter reports completion.
    Animated,
    /// The edit script was empty; the surface was not touched.
    Unchanged,
}

/// Result of [`crate::reload`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reload {
    pub kind: ReloadKind,
    /// New indexes of rows that stayed on screen and may want an in-place refresh.
    pub reloads: Vec<usize>,
}

impl Reload {
    pub fn full() -> Self {
        Self {
            kind: ReloadKind::Full,
            reloads: Vec::new(),
        }
    }

    pub fn is_animated(&self) -> bool {
        self.kind == ReloadKind::Animated
    }
}

/// What [`crate::ListController::set_items`] did with a request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Update {
    Applied(Reload),
    /// The surface is hidden; the snapshot is stored and applied on the next reveal.
    Deferred,
    /// An animated batch is still running; the snapshot will be applied when it finishes.
    Queued,
}
