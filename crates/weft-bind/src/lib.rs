#![forbid(unsafe_code)]

//! The Weft binding engine.
//!
//! Given an element tree whose attributes carry bind-expressions, the
//! engine parses each expression ([`weft_expr`]), resolves it against a
//! layered [`Scope`] of model fields, model methods, and helper
//! functions, applies the result through a named [`DomBinder`], and
//! subscribes to every model field the expression touched so the element
//! stays in sync as the model mutates.
//!
//! # The two phases
//!
//! A bind pass first *prepares*: it walks the element and its immediate
//! children (recursing for deeper levels), classifies every bind
//! attribute, and collects two ordered task lists without executing
//! anything. It then executes **all bind tasks before any custom-tag
//! task**. Bind tasks only touch elements; custom-tag tasks replace
//! them. Running the binds first means no bind ever operates on an
//! element that a sibling's tag expansion already detached.
//!
//! # Execution model
//!
//! Everything runs on one cooperative execution context. Scopes are
//! cloned per element, never shared mutably between siblings; the only
//! shared mutable resource is model field storage
//! ([`weft_reactive::Observable`]), and the `Rc`-based types here are
//! deliberately `!Send` so no other discipline is needed.

pub mod binder;
pub mod element;
pub mod engine;
pub mod error;
pub mod eval;
mod helpers;
pub mod model;
pub mod scope;
pub mod tags;
pub mod value;

pub use binder::{BinderRegistry, DomBind, DomBinder, WatchCallback};
pub use element::{ElemRef, Element, for_each_descendant};
pub use engine::{
    BIND_PREFIX, BindEngine, BindTask, BindTaskKind, CustomTagTask, RESERVED_BIND_PREFIX,
    prevent_all_binding, prevent_binding, prevent_tree_binding,
};
pub use error::BindError;
pub use eval::{Evaluated, evaluate, evaluate_bind_string, watch_expression};
pub use model::{DynModel, Entry, Method, Model, assign_field};
pub use scope::{FieldSymbol, HelperTable, ModelTable, Scope, Symbol, SymbolTable};
pub use tags::{CustomTag, TagProvider};
pub use value::{Value, ValueKind};
