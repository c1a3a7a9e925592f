#![forbid(unsafe_code)]

//! Ordered registry of weak observer handles.
//!
//! # Design
//!
//! [`Registry<T>`] holds a `Vec<Weak<T>>` in registration order. `T` is
//! usually unsized (a trait object such as `dyn Listener`), so the registry
//! works with whatever single-method notification capability the caller
//! defines. The registry never owns an observer: handles are created by
//! downgrading the caller's `Rc`, and an observer whose last strong
//! reference is dropped simply stops being notified.
//!
//! # Performance
//!
//! | Operation      | Complexity                         |
//! |----------------|------------------------------------|
//! | `add()`        | O(1) amortized                     |
//! | `remove()`     | O(N) scan for the identity match   |
//! | `notify_all()` | O(N) plus one action per live handle |
//! | `prune()`      | O(N)                               |
//!
//! # Invariants
//!
//! 1. Handles are stored and broadcast in registration order.
//! 2. No deduplication: the same observer added twice is notified twice.
//! 3. Expired handles are pruned lazily. `notify_all` skips them without
//!    removing them; only [`Registry::prune`], [`Registry::remove`], and
//!    [`Registry::clear`] shrink the sequence.
//! 4. An expired handle is never an error anywhere in this API.

use std::fmt;
use std::rc::{Rc, Weak};

use crate::logging::trace;

/// An ordered sequence of non-owning observer handles.
///
/// The registry is a plain value, owned by the subject it serves and living
/// exactly as long as it. Mutation goes through `&mut self`; for a shared,
/// clonable collection with interior mutability see
/// [`Observers`](crate::Observers).
pub struct Registry<T: ?Sized> {
    handles: Vec<Weak<T>>,
}

impl<T: ?Sized> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("handles", &self.handles.len())
            .field("live", &self.live_count())
            .finish()
    }
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Registry<T> {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// Register an observer.
    ///
    /// The handle is appended to the end of the sequence, so broadcast order
    /// is registration order. No uniqueness constraint is enforced: adding
    /// the same observer twice yields two independent notifications per
    /// broadcast. The registry stores a `Weak` and never extends the
    /// observer's lifetime.
    pub fn add(&mut self, observer: &Rc<T>) {
        self.handles.push(Rc::downgrade(observer));
        trace!(handles = self.handles.len(), "observer registered");
    }

    /// De-register an observer.
    ///
    /// Removes the **first** handle whose referent is identical to
    /// `observer` — identity means the same allocation, never value
    /// equality. Removing an observer that was never added (or whose every
    /// matching handle already expired) is a no-op, not an error.
    ///
    /// Handles for observers that have already been dropped cannot be
    /// matched here (there is no live `Rc` to name them by); they linger
    /// until [`Registry::prune`].
    pub fn remove(&mut self, observer: &Rc<T>) {
        // Compare data addresses only. `Weak::ptr_eq` also compares vtable
        // pointers, which are not unique per type across codegen units.
        let target = Rc::as_ptr(observer);
        if let Some(index) = self
            .handles
            .iter()
            .position(|h| h.strong_count() > 0 && std::ptr::addr_eq(h.as_ptr(), target))
        {
            self.handles.remove(index);
            trace!(handles = self.handles.len(), "observer de-registered");
        }
    }

    /// Broadcast an action to every live observer, in registration order.
    ///
    /// The handle sequence is snapshotted before iterating, so the set of
    /// observers notified by this call is fixed at entry. Expired handles
    /// are silently skipped and are **not** removed by this call; use
    /// [`Registry::prune`] to drop them.
    ///
    /// Broadcasting with no registered observers is a no-op.
    pub fn notify_all(&self, mut action: impl FnMut(&T)) {
        for handle in self.snapshot() {
            if let Some(observer) = handle.upgrade() {
                action(&observer);
            }
        }
    }

    /// Physically remove expired handles, preserving the relative order of
    /// live ones. Returns the number of handles removed.
    pub fn prune(&mut self) -> usize {
        let before = self.handles.len();
        self.handles.retain(|h| h.strong_count() > 0);
        let removed = before - self.handles.len();
        if removed > 0 {
            trace!(removed, handles = self.handles.len(), "pruned expired handles");
        }
        removed
    }

    /// Remove every handle, live or expired.
    pub fn clear(&mut self) {
        self.handles.clear();
    }

    /// Number of registered handles, including expired ones not yet pruned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True when no handles are registered (live or expired).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Number of handles whose referent is still alive.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.handles.iter().filter(|h| h.strong_count() > 0).count()
    }

    /// Stable copy of the handle sequence for broadcast iteration.
    pub(crate) fn snapshot(&self) -> Vec<Weak<T>> {
        self.handles.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// The single-method notification capability used by trait-object tests.
    trait Listener {
        fn name(&self) -> &'static str;
    }

    struct Named(&'static str);

    impl Listener for Named {
        fn name(&self) -> &'static str {
            self.0
        }
    }

    fn broadcast_order(registry: &Registry<String>) -> Vec<String> {
        let seen = RefCell::new(Vec::new());
        registry.notify_all(|o| seen.borrow_mut().push(o.clone()));
        seen.into_inner()
    }

    #[test]
    fn notifies_in_registration_order() {
        let (a, b, c) = (
            Rc::new("a".to_string()),
            Rc::new("b".to_string()),
            Rc::new("c".to_string()),
        );
        let mut registry = Registry::new();
        registry.add(&a);
        registry.add(&b);
        registry.add(&c);

        assert_eq!(broadcast_order(&registry), ["a", "b", "c"]);
    }

    #[test]
    fn duplicate_add_notifies_twice() {
        let a = Rc::new("a".to_string());
        let mut registry = Registry::new();
        registry.add(&a);
        registry.add(&a);

        assert_eq!(broadcast_order(&registry), ["a", "a"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn remove_is_by_identity_not_value() {
        // Two distinct allocations with equal contents.
        let first = Rc::new("same".to_string());
        let second = Rc::new("same".to_string());
        let mut registry = Registry::new();
        registry.add(&first);
        registry.add(&second);

        registry.remove(&second);
        assert_eq!(registry.len(), 1);

        // The surviving handle is `first`, provable by dropping `second`.
        drop(second);
        assert_eq!(registry.live_count(), 1);
        assert_eq!(broadcast_order(&registry), ["same"]);
    }

    #[test]
    fn remove_drops_first_matching_handle_only() {
        let a = Rc::new("a".to_string());
        let b = Rc::new("b".to_string());
        let mut registry = Registry::new();
        registry.add(&a);
        registry.add(&b);
        registry.add(&a);

        registry.remove(&a);
        assert_eq!(broadcast_order(&registry), ["b", "a"]);
    }

    #[test]
    fn remove_of_non_member_is_noop() {
        let a = Rc::new("a".to_string());
        let stranger = Rc::new("stranger".to_string());
        let mut registry = Registry::new();
        registry.add(&a);

        registry.remove(&stranger);
        assert_eq!(registry.len(), 1);
        assert_eq!(broadcast_order(&registry), ["a"]);
    }

    #[test]
    fn remove_preserves_order_of_remaining() {
        let (a, b, c) = (
            Rc::new("a".to_string()),
            Rc::new("b".to_string()),
            Rc::new("c".to_string()),
        );
        let mut registry = Registry::new();
        registry.add(&a);
        registry.add(&b);
        registry.add(&c);

        registry.remove(&b);
        assert_eq!(broadcast_order(&registry), ["a", "c"]);
    }

    #[test]
    fn dropped_observer_is_skipped_silently() {
        let a = Rc::new("a".to_string());
        let b = Rc::new("b".to_string());
        let mut registry = Registry::new();
        registry.add(&a);
        registry.add(&b);

        drop(b);
        // Handle stays (lazy pruning) but the broadcast skips it.
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.live_count(), 1);
        assert_eq!(broadcast_order(&registry), ["a"]);
    }

    #[test]
    fn spec_sequence_add_remove_drop() {
        let (o1, o2, o3) = (
            Rc::new("o1".to_string()),
            Rc::new("o2".to_string()),
            Rc::new("o3".to_string()),
        );
        let mut registry = Registry::new();
        registry.add(&o1);
        registry.add(&o2);
        registry.add(&o3);
        assert_eq!(broadcast_order(&registry), ["o1", "o2", "o3"]);

        registry.remove(&o2);
        assert_eq!(broadcast_order(&registry), ["o1", "o3"]);

        drop(o3);
        assert_eq!(broadcast_order(&registry), ["o1"]);
    }

    #[test]
    fn notify_all_does_not_prune() {
        let a = Rc::new("a".to_string());
        let mut registry = Registry::new();
        registry.add(&a);
        drop(a);

        registry.notify_all(|_| unreachable!("no live observers"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn prune_removes_expired_and_keeps_live_order() {
        let (a, b, c) = (
            Rc::new("a".to_string()),
            Rc::new("b".to_string()),
            Rc::new("c".to_string()),
        );
        let mut registry = Registry::new();
        registry.add(&a);
        registry.add(&b);
        registry.add(&c);

        drop(b);
        assert_eq!(registry.prune(), 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(broadcast_order(&registry), ["a", "c"]);

        // Nothing left to prune.
        assert_eq!(registry.prune(), 0);
    }

    #[test]
    fn remove_cannot_match_expired_handle() {
        let a = Rc::new("a".to_string());
        let mut registry = Registry::new();
        registry.add(&a);
        drop(a);

        // A fresh allocation must not be mistaken for the expired one even
        // if the allocator reuses the address.
        let reused = Rc::new("a".to_string());
        registry.remove(&reused);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn clear_empties_the_registry() {
        let a = Rc::new("a".to_string());
        let mut registry = Registry::new();
        registry.add(&a);
        registry.add(&a);

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(broadcast_order(&registry), Vec::<String>::new());
    }

    #[test]
    fn works_with_trait_objects() {
        let one: Rc<dyn Listener> = Rc::new(Named("one"));
        let two: Rc<dyn Listener> = Rc::new(Named("two"));
        let mut registry: Registry<dyn Listener> = Registry::new();
        registry.add(&one);
        registry.add(&two);

        let seen = RefCell::new(Vec::new());
        registry.notify_all(|l| seen.borrow_mut().push(l.name()));
        assert_eq!(seen.into_inner(), ["one", "two"]);

        registry.remove(&one);
        let seen = RefCell::new(Vec::new());
        registry.notify_all(|l| seen.borrow_mut().push(l.name()));
        assert_eq!(seen.into_inner(), ["two"]);
    }

    #[test]
    fn empty_broadcast_is_noop() {
        let registry: Registry<String> = Registry::new();
        registry.notify_all(|_| unreachable!("registry is empty"));
        assert!(registry.is_empty());
        assert_eq!(registry.live_count(), 0);
    }
}
