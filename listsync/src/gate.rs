/// Whether the list surface is currently on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// A lightweight, serializable snapshot of a [`VisibilityGate`].
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GateState {
    pub visibility: Visibility,
    pub deferred: bool,
}

/// Holds back surface mutations while the surface is hidden.
///
/// Requests made while hidden only mark the gate as deferred; the owner keeps the latest
/// snapshot. Revealing a deferred gate yields exactly one flush.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibilityGate {
    state: GateState,
}

impl VisibilityGate {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            state: GateState {
                visibility,
                deferred: false,
            },
        }
    }

    pub fn from_state(state: GateState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn visibility(&self) -> Visibility {
        self.state.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.state.visibility == Visibility::Visible
    }

    pub fn is_deferred(&self) -> bool {
        self.state.deferred
    }

    /// Records that a snapshot arrived while hidden.
    pub fn defer(&mut self) {
        debug_assert!(!self.is_visible(), "deferring on a visible surface");
        self.state.deferred = true;
    }

    /// Switches visibility. Returns `true` exactly when a `Hidden -> Visible` transition has a
    /// deferred update that the caller must now flush; the deferred flag is cleared.
    pub fn set_visibility(&mut self, visibility: Visibility) -> bool {
        let revealed = visibility == Visibility::Visible && !self.is_visible();
        self.state.visibility = visibility;
        if revealed {
            return self.take_deferred();
        }
        false
    }

    /// Clears and returns the deferred flag.
    pub fn take_deferred(&mut self) -> bool {
        core::mem::replace(&mut self.state.deferred, false)
    }
}
