//! Subscription collections scoped to a logical owner.
//!
//! A [`WatchSet`] holds the [`Subscription`]s installed for one owner —
//! in Weft, the binding engine parks every reactive watch it installs in
//! one. Dropping or clearing the set releases every subscription, which
//! cleanly disconnects all of the owner's reactive updates.
//!
//! # Invariants
//!
//! 1. After `drop` or [`clear`](WatchSet::clear), no callback held by
//!    this set will fire again.
//! 2. `clear` leaves the set empty but reusable.

use crate::observable::{Observable, Subscription};
use std::fmt;

/// Collects subscriptions and releases them together.
pub struct WatchSet {
    subscriptions: Vec<Subscription>,
}

impl WatchSet {
    /// Create an empty watch set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
        }
    }

    /// Park an already-created subscription in this set.
    pub fn hold(&mut self, sub: Subscription) {
        self.subscriptions.push(sub);
    }

    /// Subscribe to an observable, parking the subscription here.
    pub fn watch<T: Clone + PartialEq + 'static>(
        &mut self,
        source: &Observable<T>,
        callback: impl Fn(&T) + 'static,
    ) {
        self.subscriptions.push(source.subscribe(callback));
    }

    /// Number of held subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether the set holds no subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Release every held subscription immediately.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

impl Default for WatchSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WatchSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchSet")
            .field("len", &self.subscriptions.len())
            .finish()
    }
}
