//! The binding error taxonomy.
//!
//! Four classes of failure, all fatal to the operation that raised
//! them: parse errors (malformed bind-string), resolution errors
//! (unknown symbol, wrong symbol kind), type errors (unassignable
//! value), and configuration errors (misused attributes, unregistered
//! binders). Tag-content preparation failures are *not* represented
//! here — they are reported against the offending element and binding
//! continues.
//!
//! Errors that originate inside a bind-string are wrapped with
//! [`BindError::in_bind_string`] so every report carries the full
//! original attribute value.

use thiserror::Error;

use crate::value::ValueKind;
use weft_expr::ParseError;

/// Why a bind operation failed.
#[derive(Debug, Error)]
pub enum BindError {
    /// The bind-string fragment did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A name resolved against no symbol table in the scope.
    #[error("unable to find symbol `{name}` in the scope")]
    UnknownSymbol { name: String },

    /// A call expression resolved to a symbol that is not a method
    /// (and does not currently hold a function value).
    #[error("cannot call `{name}`: it is not a method")]
    NotCallable { name: String },

    /// A callable was invoked with the wrong number of arguments.
    #[error("`{name}` expects {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },

    /// A helper or model method reported a failure.
    #[error("`{name}`: {message}")]
    Invocation { name: String, message: String },

    /// A value could not be stored into a field of another type.
    #[error("unassignable, incompatible types: {value} value against {target} field")]
    Incompatible { value: ValueKind, target: ValueKind },

    /// A `bind-<name>` attribute named a binder nobody registered.
    #[error("dom binder `{name}` does not exist")]
    UnknownBinder { name: String },

    /// A `bind-` attribute with no binder name after the prefix.
    #[error("illegal bind attribute `{attr}`")]
    MalformedBindAttr { attr: String },

    /// A `bind` attribute on an element that is not a custom tag.
    #[error("element `{tag}` has not been registered as a custom tag")]
    NotCustomTag { tag: String },

    /// A `bind-*` attribute on a custom tag element. Custom tags are
    /// never rendered; bind their attributes with `bind=` instead.
    #[error(
        "dom binding `{attr}` is not allowed on custom tag `{tag}`; use attribute binding instead"
    )]
    BinderOnCustomTag { attr: String, tag: String },

    /// An attribute-bind pair without exactly one `:` separator.
    #[error("there should be one `:` in each attribute bind, got `{pair}`")]
    MalformedFieldBind { pair: String },

    /// An attribute bind targeted a field the model does not expose.
    #[error("no field `{field}` on model `{model}` to bind to")]
    NoSuchField { field: String, model: String },

    /// Context wrapper: the failure occurred while processing a
    /// bind-string, quoted in full.
    #[error("{source}, while processing bind string `{bind_string}`")]
    InBindString {
        #[source]
        source: Box<BindError>,
        bind_string: String,
    },
}

impl BindError {
    /// Wrap this error with the full bind-string it came from. Already
    /// wrapped errors are returned unchanged so the innermost context
    /// (the original attribute value) wins.
    #[must_use]
    pub fn in_bind_string(self, bind_string: impl Into<String>) -> Self {
        match self {
            err @ Self::InBindString { .. } => err,
            err => Self::InBindString {
                source: Box::new(err),
                bind_string: bind_string.into(),
            },
        }
    }
}
