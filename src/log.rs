//! Debug logging shim.
//!
//! Grading runs inside an interactive tool, so logging is off by default:
//! with the `tracing` feature enabled `debug!` is `tracing::debug!`,
//! otherwise it expands to nothing.

#[cfg(feature = "tracing")]
pub use tracing::debug;

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::debug;
