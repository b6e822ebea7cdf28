#![forbid(unsafe_code)]

//! Weft — a declarative, reactive data-binding engine.
//!
//! Annotate an element tree with bind-expressions, hand the engine a
//! model, and it keeps the two in sync:
//!
//! - `bind-text="entry.text"` selects the `text` binder and applies the
//!   evaluated value to the element, re-applying whenever any model
//!   field the expression touched changes.
//! - `bind="done: eq(state, 'completed')"` binds a custom tag's model
//!   fields before the tag expands into its contents.
//!
//! This crate re-exports the public API of the workspace:
//! [`weft_bind`] (the engine), [`weft_expr`] (the expression
//! language), and [`weft_reactive`] (observable cells).
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use weft::{BindEngine, BinderRegistry, DynModel, ElemRef, Model, Value};
//! use weft_harness::{RecordingBinder, TagLibrary, TestElement, TraceLog};
//!
//! let log = TraceLog::new();
//! let text = RecordingBinder::new("text", log.clone());
//! let mut registry = BinderRegistry::new();
//! registry.register("text", Box::new(text.clone()));
//!
//! let engine = BindEngine::new(Rc::new(TagLibrary::new()), registry);
//!
//! let model = Rc::new(DynModel::new("Greeter").with_field("name", Value::from("world")));
//! let name = model.field("name").unwrap();
//!
//! let root = TestElement::new("div");
//! root.append(TestElement::with_attrs("span", &[("bind-text", "name")]));
//! let handle: ElemRef = root.clone();
//!
//! engine.bind(&handle, Some(model as Rc<dyn Model>), false, true).unwrap();
//! assert_eq!(text.last_value(), Some(Value::from("world")));
//!
//! name.set(Value::from("weft"));
//! assert_eq!(text.last_value(), Some(Value::from("weft")));
//! ```

pub use weft_bind::{
    BIND_PREFIX, BindEngine, BindError, BindTask, BindTaskKind, BinderRegistry, CustomTag,
    CustomTagTask, DomBind, DomBinder, DynModel, ElemRef, Element, Entry, Evaluated, FieldSymbol,
    HelperTable, Method, Model, ModelTable, RESERVED_BIND_PREFIX, Scope, Symbol, SymbolTable,
    TagProvider, Value, ValueKind, WatchCallback, assign_field, evaluate, evaluate_bind_string,
    for_each_descendant, prevent_all_binding, prevent_binding, prevent_tree_binding,
    watch_expression,
};
pub use weft_expr::{Expr, ExprKind, Literal, ParseError, parse};
pub use weft_reactive::{Observable, Subscription, WatchSet};
