/// Bookkeeping for the pull-to-refresh control.
///
/// The control never starts or stops mid-drag: both edges are parked here until scrolling
/// stops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefreshState {
    /// The control is spinning.
    pub refreshing: bool,
    /// A user pull arrived mid-drag; refresh once scrolling stops.
    pub pending_begin: bool,
    /// The refresh finished mid-drag; stop the control once scrolling stops.
    pub pending_end: bool,
}
