//! The DOM binder contract and registry.
//!
//! A binder is a named behavior that knows how to apply a bound value
//! to a concrete element (`text`, `visible`, `class`, `click`, ...).
//! Binders are selected by the `bind-<name>[-<arg>...]` attribute
//! convention and are *stateless templates*: the registry holds one
//! prototype per name and hands out a fresh instance per element, so
//! per-element state never leaks across elements.

use std::fmt;

use ahash::AHashMap;

use crate::element::ElemRef;
use crate::scope::Scope;
use crate::value::Value;

/// Callback a binder invokes with a user-driven value for write-back.
pub type WatchCallback = Box<dyn Fn(Value)>;

/// One element's resolved binding instance, created per apply.
pub struct DomBind {
    /// The element being bound.
    pub elem: ElemRef,
    /// The current evaluated value.
    pub value: Value,
    /// Positional arguments from the binder selector
    /// (`bind-class-done` → `["done"]`).
    pub args: Vec<String>,
    /// Output variable names from the `-> out1, out2` suffix.
    pub outputs: Vec<String>,
    /// The scope the expression was evaluated in.
    pub scope: Scope,
    /// `attr = "bindstring"`, for error messages.
    pub metadata: String,
}

impl fmt::Debug for DomBind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomBind")
            .field("value", &self.value)
            .field("args", &self.args)
            .field("outputs", &self.outputs)
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// A named element-binding behavior.
pub trait DomBinder {
    /// A fresh instance for binding one element. Registry prototypes
    /// are never bound directly.
    fn bind_instance(&self) -> Box<dyn DomBinder>;

    /// One-time setup on first application (attach event wiring, ...).
    fn bind(&mut self, bind: &DomBind);

    /// Apply the current value to the element. Called once immediately
    /// after [`bind`](DomBinder::bind), then on every reactive update.
    fn update(&mut self, bind: &DomBind);

    /// Observe user-driven changes and push them back through
    /// `callback`. Return `false` (the default) if this binder has no
    /// input to watch. Only wired when the bound expression has exactly
    /// one watchable dependency.
    fn watch(&mut self, elem: &ElemRef, callback: WatchCallback) -> bool {
        let _ = (elem, callback);
        false
    }
}

/// Name-keyed registry of binder prototypes.
#[derive(Default)]
pub struct BinderRegistry {
    binders: AHashMap<String, Box<dyn DomBinder>>,
}

impl BinderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binder prototype under `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered — binders are installed
    /// once at setup.
    pub fn register(&mut self, name: impl Into<String>, prototype: Box<dyn DomBinder>) {
        let name = name.into();
        assert!(
            !self.binders.contains_key(&name),
            "dom binder `{name}` already registered"
        );
        self.binders.insert(name, prototype);
    }

    /// A fresh instance of the binder registered under `name`.
    #[must_use]
    pub fn instance(&self, name: &str) -> Option<Box<dyn DomBinder>> {
        self.binders.get(name).map(|proto| proto.bind_instance())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.binders.contains_key(name)
    }
}

impl fmt::Debug for BinderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinderRegistry")
            .field("binders", &self.binders.len())
            .finish()
    }
}
