#![forbid(unsafe_code)]

//! Feature-gated logging shims.
//!
//! With the `tracing` feature enabled these are the real `tracing` macros;
//! without it they expand to nothing. Call sites import from this module
//! unconditionally, so the rest of the crate carries no `#[cfg]` noise.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use {debug, trace};
