#![forbid(unsafe_code)]

//! The subject side of the observer relationship.
//!
//! A subject is the object being observed: it owns an [`Observers`]
//! collection and triggers broadcasts. Implementing [`Subject`] takes one
//! method (expose the collection) and buys the registration and broadcast
//! surface as provided methods.
//!
//! ```
//! use std::rc::Rc;
//! use herald::{Observers, Subject};
//!
//! trait Bell {
//!     fn ring(&self);
//! }
//!
//! struct Tower {
//!     bells: Observers<dyn Bell>,
//! }
//!
//! impl Subject for Tower {
//!     type Observer = dyn Bell;
//!
//!     fn observers(&self) -> &Observers<dyn Bell> {
//!         &self.bells
//!     }
//! }
//!
//! struct Quiet;
//! impl Bell for Quiet {
//!     fn ring(&self) {}
//! }
//!
//! let tower = Tower { bells: Observers::new() };
//! let bell: Rc<dyn Bell> = Rc::new(Quiet);
//! tower.add_observer(&bell);
//! tower.notify_observers(|b| b.ring());
//! ```

use std::rc::Rc;

use crate::observers::Observers;

/// A type that owns an observer collection and broadcasts to it.
///
/// `Observer` is the notification capability observers must expose,
/// typically a single-method trait object (`dyn Listener`). The provided
/// methods delegate to [`Observers`]; the generic `notify_observers` makes
/// this trait unusable as `dyn Subject`, which is intentional — subjects
/// are concrete types.
pub trait Subject {
    /// The observer capability this subject notifies.
    type Observer: ?Sized;

    /// The subject's observer collection.
    fn observers(&self) -> &Observers<Self::Observer>;

    /// Register an observer with this subject.
    fn add_observer(&self, observer: &Rc<Self::Observer>) {
        self.observers().add(observer);
    }

    /// De-register an observer by identity. No-op if never registered.
    fn remove_observer(&self, observer: &Rc<Self::Observer>) {
        self.observers().remove(observer);
    }

    /// Broadcast an action to every live observer, in registration order.
    fn notify_observers(&self, action: impl FnMut(&Self::Observer)) {
        self.observers().notify_all(action);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
