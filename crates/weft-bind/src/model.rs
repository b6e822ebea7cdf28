//! The capability-based model accessor contract.
//!
//! A model is anything the scope can ask for a named capability: a
//! readable/writable *field* backed by an [`Observable<Value>`], or a
//! callable *method*. Lookup is live — a model is inspected at
//! resolution time, never pre-enumerated — so models whose shape
//! changes (or map-backed models like [`DynModel`]) behave naturally.
//!
//! # Invariants
//!
//! 1. `lookup` is a pure read; it must not mutate the model.
//! 2. A field entry hands out the *same* underlying cell every time, so
//!    watching and write-back always target the live storage.
//! 3. Methods observe at most one return value (the `Value` in their
//!    `Result`).

use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;
use weft_reactive::Observable;

use crate::error::BindError;
use crate::value::Value;

/// Native function signature for helpers and model methods.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, BindError>;

/// A named callable with a declared arity.
///
/// The declared arity is enforced at call time; a mismatch is a
/// resolution-class error naming the callable.
pub struct Method {
    name: String,
    arity: usize,
    func: Rc<NativeFn>,
}

impl Method {
    /// Create a method. `arity` is the exact number of arguments the
    /// function accepts.
    pub fn new(
        name: impl Into<String>,
        arity: usize,
        func: impl Fn(&[Value]) -> Result<Value, BindError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            func: Rc::new(func),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke with the evaluated arguments. Arity mismatches and
    /// failures reported by the function itself are decorated with the
    /// method name.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, BindError> {
        if args.len() != self.arity {
            return Err(BindError::Arity {
                name: self.name.clone(),
                expected: self.arity,
                got: args.len(),
            });
        }
        (self.func)(args).map_err(|err| match err {
            already @ (BindError::Arity { .. } | BindError::Invocation { .. }) => already,
            other => BindError::Invocation {
                name: self.name.clone(),
                message: other.to_string(),
            },
        })
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// A capability exposed by a model under a name.
#[derive(Clone)]
pub enum Entry {
    /// A readable, writable, watchable field.
    Field(Observable<Value>),
    /// A callable method.
    Method(Rc<Method>),
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(cell) => f.debug_tuple("Field").field(cell).finish(),
            Self::Method(m) => f.debug_tuple("Method").field(&m.name()).finish(),
        }
    }
}

/// The model contract: resolve a name to a capability.
///
/// Implement by hand for a concrete model type, or use [`DynModel`]
/// for a map-backed model assembled at runtime.
pub trait Model {
    /// Resolve `name` to a field or method, or `None` if the model has
    /// no such member.
    fn lookup(&self, name: &str) -> Option<Entry>;

    /// Human-readable model name, used in diagnostics.
    fn model_name(&self) -> &str {
        "model"
    }
}

/// Store `value` into `field`, enforcing kind compatibility.
///
/// This is the single write-back path used by attribute binds and
/// two-way dom binds; the error reports both type descriptions.
pub fn assign_field(field: &Observable<Value>, value: Value) -> Result<(), BindError> {
    let current = field.get();
    if !value.assignable_to(&current) {
        return Err(BindError::Incompatible {
            value: value.kind(),
            target: current.kind(),
        });
    }
    field.set(value);
    Ok(())
}

/// A map-backed model assembled at runtime.
///
/// Fields are [`Observable<Value>`] cells; methods are [`Method`]s.
/// Methods typically capture clones of the field cells they mutate:
///
/// ```
/// use weft_bind::{DynModel, Model, Value};
/// use weft_reactive::Observable;
///
/// let done = Observable::new(Value::Bool(false));
/// let cell = done.clone();
/// let model = DynModel::new("Todo")
///     .with_field_cell("done", done)
///     .with_method("toggle", 0, move |_| {
///         let next = !cell.get().as_bool().unwrap_or(false);
///         cell.set(Value::Bool(next));
///         Ok(Value::Bool(next))
///     });
/// assert!(model.lookup("done").is_some());
/// ```
pub struct DynModel {
    name: String,
    fields: AHashMap<String, Observable<Value>>,
    methods: AHashMap<String, Rc<Method>>,
}

impl DynModel {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: AHashMap::new(),
            methods: AHashMap::new(),
        }
    }

    /// Add a field initialized to `value`.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), Observable::new(value));
        self
    }

    /// Add a field backed by an existing cell (so the caller keeps a
    /// handle for external mutation).
    #[must_use]
    pub fn with_field_cell(mut self, name: impl Into<String>, cell: Observable<Value>) -> Self {
        self.fields.insert(name.into(), cell);
        self
    }

    /// Add a method.
    #[must_use]
    pub fn with_method(
        mut self,
        name: impl Into<String>,
        arity: usize,
        func: impl Fn(&[Value]) -> Result<Value, BindError> + 'static,
    ) -> Self {
        let name = name.into();
        self.methods
            .insert(name.clone(), Rc::new(Method::new(name, arity, func)));
        self
    }

    /// Direct handle to a field's cell, for external mutation in
    /// application code and tests.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<Observable<Value>> {
        self.fields.get(name).cloned()
    }
}

impl Model for DynModel {
    fn lookup(&self, name: &str) -> Option<Entry> {
        if let Some(cell) = self.fields.get(name) {
            return Some(Entry::Field(cell.clone()));
        }
        self.methods
            .get(name)
            .map(|m| Entry::Method(Rc::clone(m)))
    }

    fn model_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for DynModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynModel")
            .field("name", &self.name)
            .field("fields", &self.fields.len())
            .field("methods", &self.methods.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    #[test]
    fn lookup_finds_fields_and_methods() {
        let model = DynModel::new("M")
            .with_field("x", Value::Int(1))
            .with_method("f", 0, |_| Ok(Value::Null));

        assert!(matches!(model.lookup("x"), Some(Entry::Field(_))));
        assert!(matches!(model.lookup("f"), Some(Entry::Method(_))));
        assert!(model.lookup("missing").is_none());
    }

    #[test]
    fn field_lookup_returns_live_cell() {
        let model = DynModel::new("M").with_field("x", Value::Int(1));
        let Some(Entry::Field(a)) = model.lookup("x") else {
            panic!("expected field");
        };
        let Some(Entry::Field(b)) = model.lookup("x") else {
            panic!("expected field");
        };
        assert!(a.ptr_eq(&b), "lookup must hand out the same cell");
    }

    #[test]
    fn method_invoke_checks_arity() {
        let m = Method::new("f", 2, |args| Ok(args[0].clone()));
        let err = m.invoke(&[Value::Int(1)]).unwrap_err();
        match err {
            BindError::Arity {
                name,
                expected,
                got,
            } => {
                assert_eq!(name, "f");
                assert_eq!(expected, 2);
                assert_eq!(got, 1);
            }
            other => panic!("expected Arity, got {other:?}"),
        }
    }

    #[test]
    fn method_failure_is_decorated_with_name() {
        let m = Method::new("boom", 0, |_| {
            Err(BindError::UnknownSymbol { name: "z".into() })
        });
        let err = m.invoke(&[]).unwrap_err();
        assert!(err.to_string().starts_with("`boom`:"));
    }

    #[test]
    fn assign_field_rejects_kind_mismatch() {
        let field = Observable::new(Value::Bool(true));
        let err = assign_field(&field, Value::Str("no".into())).unwrap_err();
        match err {
            BindError::Incompatible { value, target } => {
                assert_eq!(value, ValueKind::Str);
                assert_eq!(target, ValueKind::Bool);
            }
            other => panic!("expected Incompatible, got {other:?}"),
        }
        assert_eq!(field.get(), Value::Bool(true), "field must be untouched");
    }

    #[test]
    fn assign_field_allows_null_initialization() {
        let field = Observable::new(Value::Null);
        assign_field(&field, Value::Int(5)).unwrap();
        assert_eq!(field.get(), Value::Int(5));
        assign_field(&field, Value::Null).unwrap();
        assert_eq!(field.get(), Value::Null);
    }
}
