#![forbid(unsafe_code)]

//! Herald: weak-reference observer registries.
//!
//! # Role
//! A subject owns a registry of observer handles and broadcasts an action to
//! every still-alive, registered observer in registration order. Handles are
//! non-owning (`Weak`), so the registry never keeps an observer alive and an
//! observer dropped elsewhere is silently skipped on the next broadcast.
//!
//! # Primary types
//! - [`Registry`]: the ordered weak-handle sequence with `add` / `remove` /
//!   `notify_all` and explicit lazy pruning. Plain value, `&mut` mutation.
//! - [`Observers`]: a shared, clonable handle to a registry
//!   (`Rc<RefCell<..>>`). Broadcasts snapshot the handle list before invoking
//!   callbacks, so re-registering or de-registering mid-broadcast through a
//!   clone is legal and invisible to the in-flight broadcast.
//! - [`Subject`]: a trait for types that own an [`Observers`] collection,
//!   with provided registration and broadcast methods.
//!
//! # Scope
//! Single-threaded and synchronous (`Rc`/`RefCell`; neither `Send` nor
//! `Sync`). There is no delivery, ordering, or retry guarantee beyond
//! "notify currently-registered, still-alive observers in registration
//! order", and no error taxonomy: every operation either succeeds or is a
//! documented no-op.

pub mod logging;
pub mod observers;
pub mod registry;
pub mod subject;

pub use observers::Observers;
pub use registry::Registry;
pub use subject::Subject;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace};
