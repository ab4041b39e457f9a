#[cfg(feature = "tracing")]
macro_rules! ptrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "listsync_paging", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! ptrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! pdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "listsync_paging", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! pdebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! pwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "listsync_paging", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! pwarn {
    ($($tt:tt)*) => {};
}
