//! The dynamic value type flowing between models, expressions, and
//! binders.
//!
//! Bind-expressions are untyped at the language level; every evaluated
//! result and every model field is a [`Value`]. Functions are
//! first-class: value-reading a callable symbol yields a
//! [`Value::Func`], which is how event binders receive the handler
//! named in `bind-click="destroy"`.
//!
//! Assignability between a value and a target field is judged by
//! [`ValueKind`]: identical kinds are assignable, and `Null` is
//! compatible in both directions (uninitialized-field semantics).

use std::fmt;
use std::rc::Rc;

use weft_expr::Literal;

use crate::model::Method;

/// Coarse type of a [`Value`], used in assignability diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Func,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Str => write!(f, "string"),
            Self::Func => write!(f, "func"),
        }
    }
}

/// A dynamically-typed binding value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A callable captured as a value (an event handler, typically).
    Func(Rc<Method>),
}

impl Value {
    /// The coarse type of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Str(_) => ValueKind::Str,
            Self::Func(_) => ValueKind::Func,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_func(&self) -> Option<&Rc<Method>> {
        match self {
            Self::Func(m) => Some(m),
            _ => None,
        }
    }

    /// Whether this value may be stored over `target` without a type
    /// error. Kinds must match; `Null` is compatible with everything.
    #[must_use]
    pub fn assignable_to(&self, target: &Value) -> bool {
        self.is_null() || target.is_null() || self.kind() == target.kind()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Func(a), Self::Func(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Func(m) => write!(f, "<func {}>", m.name()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Literal> for Value {
    fn from(lit: Literal) -> Self {
        match lit {
            Literal::Int(n) => Self::Int(n),
            Literal::Float(x) => Self::Float(x),
            Literal::Bool(b) => Self::Bool(b),
            Literal::Str(s) => Self::Str(s),
        }
    }
}

impl From<&Literal> for Value {
    fn from(lit: &Literal) -> Self {
        lit.clone().into()
    }
}
