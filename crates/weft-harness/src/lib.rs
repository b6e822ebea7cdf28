#![forbid(unsafe_code)]

//! Test harness and reference fixtures for Weft.
//!
//! Everything a binding test needs without a real DOM:
//!
//! - [`TestElement`]: an in-memory element tree implementing
//!   [`Element`](weft_bind::Element), with attribute-order
//!   preservation, child splicing for custom-tag unwrapping, and a
//!   detached flag for `exists()`.
//! - [`TraceLog`]: a shared, ordered event log; binders and tag
//!   fixtures record into it so tests can assert execution order.
//! - [`RecordingBinder`]: a [`DomBinder`](weft_bind::DomBinder) that
//!   records every `bind`/`update` and can replay user input for
//!   two-way tests.
//! - [`TagLibrary`] and [`TestTag`]: a name-keyed
//!   [`TagProvider`](weft_bind::TagProvider) with closure-driven model
//!   factories and content templates.
//! - Ready-made todo-style models in [`models`].

pub mod binders;
pub mod element;
pub mod models;
pub mod tags;
pub mod trace;

pub use binders::RecordingBinder;
pub use element::TestElement;
pub use tags::{TagLibrary, TestTag};
pub use trace::TraceLog;
