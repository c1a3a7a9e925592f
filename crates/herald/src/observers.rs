#![forbid(unsafe_code)]

//! Shared, clonable observer collection.
//!
//! # Design
//!
//! [`Observers<T>`] wraps a [`Registry<T>`](crate::Registry) in
//! `Rc<RefCell<..>>` so a subject can hand out registration access without
//! giving up ownership: cloning an `Observers` creates a second handle to
//! the **same** underlying registry. All operations take `&self`.
//!
//! # Broadcast snapshot
//!
//! `notify_all` copies the handle sequence and releases the interior borrow
//! **before** invoking any action. Two consequences:
//!
//! 1. An action may call `add`, `remove`, `prune`, or `clear` on a clone of
//!    the same collection without panicking.
//! 2. Such mutations are invisible to the in-flight broadcast: the set of
//!    observers notified is fixed when `notify_all` is entered. An observer
//!    added mid-broadcast is first notified by the *next* broadcast; one
//!    removed mid-broadcast is still notified by this one if it is alive.
//!
//! # Failure Modes
//!
//! - **Expired handles**: skipped silently, exactly as in `Registry`.
//! - **Mid-broadcast drop**: if an action drops the last strong reference
//!   to a not-yet-notified observer, that observer's handle expires and is
//!   skipped later in the same pass. Liveness is checked per handle at
//!   invocation time, never cached.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::logging::debug;
use crate::registry::Registry;

/// A shared handle to an ordered observer registry.
pub struct Observers<T: ?Sized> {
    inner: Rc<RefCell<Registry<T>>>,
}

// Manual Clone: shares the same Rc.
impl<T: ?Sized> Clone for Observers<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.inner.borrow();
        f.debug_struct("Observers")
            .field("handles", &registry.len())
            .field("live", &registry.live_count())
            .finish()
    }
}

impl<T: ?Sized> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Observers<T> {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry::new())),
        }
    }

    /// Register an observer. See [`Registry::add`].
    pub fn add(&self, observer: &Rc<T>) {
        self.inner.borrow_mut().add(observer);
    }

    /// De-register an observer by identity. See [`Registry::remove`].
    pub fn remove(&self, observer: &Rc<T>) {
        self.inner.borrow_mut().remove(observer);
    }

    /// Broadcast an action to every live observer, in registration order.
    ///
    /// The interior borrow is released before the first action runs, so the
    /// action may freely mutate this collection through a clone; see the
    /// module docs for how such mutations interact with the running pass.
    pub fn notify_all(&self, mut action: impl FnMut(&T)) {
        let snapshot = self.inner.borrow().snapshot();

        let mut notified = 0usize;
        for handle in &snapshot {
            if let Some(observer) = handle.upgrade() {
                action(&observer);
                notified += 1;
            }
        }
        debug!(
            notified,
            skipped = snapshot.len() - notified,
            "broadcast complete"
        );
    }

    /// Physically remove expired handles. See [`Registry::prune`].
    pub fn prune(&self) -> usize {
        self.inner.borrow_mut().prune()
    }

    /// Remove every handle, live or expired.
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Number of registered handles, including expired ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// True when no handles are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Number of handles whose referent is still alive.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.inner.borrow().live_count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
