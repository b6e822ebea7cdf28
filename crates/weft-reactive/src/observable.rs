//! Shared, version-tracked value cells with change notification.
//!
//! [`Observable<T>`] is the storage unit the binding engine watches: model
//! fields hold their current value in one, and every reactive bind
//! subscribes to the cells its expression touched.
//!
//! # Invariants
//!
//! 1. `set` with a value equal to the current one is a no-op: no version
//!    bump, no notifications.
//! 2. Subscribers fire in registration order, with the value already
//!    stored (a callback that calls `get()` sees the new value).
//! 3. Dead subscribers (dropped [`Subscription`]s) never fire; slots are
//!    pruned lazily during notification.
//! 4. Callbacks receive a snapshot of the value, so a callback may freely
//!    read or even mutate the observable it was notified by.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = dyn Fn(&T);

struct Subscriber<T> {
    token: u64,
    callback: Weak<Callback<T>>,
}

struct Inner<T> {
    value: RefCell<T>,
    version: Cell<u64>,
    subscribers: RefCell<Vec<Subscriber<T>>>,
    next_token: Cell<u64>,
}

/// A shared value cell that notifies subscribers when its value changes.
///
/// Cloning an `Observable` clones the *handle*: both clones read and
/// write the same storage, and a subscriber registered through one clone
/// fires for mutations made through another.
pub struct Observable<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.inner.value.borrow())
            .field("version", &self.inner.version.get())
            .finish()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Observable<T> {
    /// Create a new observable holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                version: Cell::new(0),
                subscribers: RefCell::new(Vec::new()),
                next_token: Cell::new(0),
            }),
        }
    }

    /// Read the value through a closure without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Number of times the stored value has actually changed.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    /// Whether two handles refer to the same underlying cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live subscribers (dead slots are not counted).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .borrow()
            .iter()
            .filter(|s| s.callback.strong_count() > 0)
            .count()
    }
}

impl<T: Clone> Observable<T> {
    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Store `value`, notifying subscribers if it differs from the
    /// current value. Equal values are a complete no-op.
    pub fn set(&self, value: T) {
        let changed = {
            let mut slot = self.inner.value.borrow_mut();
            if *slot == value {
                false
            } else {
                *slot = value;
                true
            }
        };
        if changed {
            self.inner.version.set(self.inner.version.get() + 1);
            self.notify();
        }
    }

    /// Mutate the value in place. Subscribers are notified only if the
    /// closure actually changed it.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let changed = {
            let mut slot = self.inner.value.borrow_mut();
            let before = slot.clone();
            f(&mut slot);
            *slot != before
        };
        if changed {
            self.inner.version.set(self.inner.version.get() + 1);
            self.notify();
        }
    }

    /// Register a change callback. The callback fires after every
    /// value-changing mutation until the returned [`Subscription`] is
    /// dropped.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<Callback<T>> = Rc::new(callback);
        let token = self.inner.next_token.get();
        self.inner.next_token.set(token + 1);
        self.inner.subscribers.borrow_mut().push(Subscriber {
            token,
            callback: Rc::downgrade(&callback),
        });

        let weak_inner = Rc::downgrade(&self.inner);
        Subscription {
            keeper: Box::new(callback),
            remove: Some(Box::new(move || {
                if let Some(inner) = weak_inner.upgrade() {
                    inner.subscribers.borrow_mut().retain(|s| s.token != token);
                }
            })),
        }
    }

    fn notify(&self) {
        // Snapshot the live callbacks first so a callback may subscribe,
        // unsubscribe, or set the value without hitting a borrow conflict.
        let callbacks: Vec<Rc<Callback<T>>> = {
            let mut subs = self.inner.subscribers.borrow_mut();
            subs.retain(|s| s.callback.strong_count() > 0);
            subs.iter().filter_map(|s| s.callback.upgrade()).collect()
        };
        let snapshot = self.get();
        for callback in callbacks {
            callback(&snapshot);
        }
    }
}

/// RAII guard for a single subscriber registration.
///
/// Dropping the guard removes the callback from its observable; the
/// callback is guaranteed not to fire afterwards. The guard is
/// type-erased so heterogeneous subscriptions can live in one
/// collection (see [`WatchSet`](crate::WatchSet)).
pub struct Subscription {
    // Owns the callback; the observable only holds a Weak to it.
    #[allow(dead_code)]
    keeper: Box<dyn Any>,
    remove: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish()
    }
}
