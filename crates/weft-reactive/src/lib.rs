#![forbid(unsafe_code)]

//! Change-tracking primitives for reactive data binding.
//!
//! This crate provides the cells the rest of Weft watches:
//!
//! - [`Observable`]: A shared, version-tracked value wrapper with change
//!   notification via subscriber callbacks.
//! - [`Subscription`]: RAII guard that automatically unsubscribes on drop.
//! - [`WatchSet`]: Collects subscriptions for a logical scope (a bind pass,
//!   an engine) and releases them all on drop or [`WatchSet::clear`].
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Subscribers are stored as `Weak` callbacks and cleaned up
//! lazily during notification. Nothing here is `Send`; the whole binding
//! engine runs on one cooperative execution context and these types
//! enforce that at the type level.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op (no version
//!    bump, no notifications).
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.

pub mod observable;
pub mod watch_set;

pub use observable::{Observable, Subscription};
pub use watch_set::WatchSet;
