//! Expression AST for bind-strings.
//!
//! A parsed expression is a tree of [`Expr`] nodes. Each node is a
//! literal, a value reference (bare identifier), or a call; only calls
//! have arguments. Nodes are immutable once parsed.

use std::fmt;

/// A literal payload, typed at parse time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
        }
    }
}

/// What kind of node an [`Expr`] is.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    /// A literal value; contributes no bindables and resolves nothing.
    Literal(Literal),
    /// A bare identifier read from the scope.
    Value,
    /// An invocation of a named callable with the node's arguments.
    Call,
}

/// One node of a parsed bind-string expression.
///
/// `name` holds the identifier for `Value` and `Call` nodes and the
/// literal's source text for `Literal` nodes (kept for diagnostics).
/// `args` is empty except for `Call` nodes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub name: String,
    pub args: Vec<Expr>,
}

impl Expr {
    /// A literal node. The source text is retained as `name`.
    #[must_use]
    pub fn literal(text: impl Into<String>, value: Literal) -> Self {
        Self {
            kind: ExprKind::Literal(value),
            name: text.into(),
            args: Vec::new(),
        }
    }

    /// A bare value-reference node.
    #[must_use]
    pub fn value(name: impl Into<String>) -> Self {
        Self {
            kind: ExprKind::Value,
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A call node with its ordered arguments.
    #[must_use]
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            kind: ExprKind::Call,
            name: name.into(),
            args,
        }
    }

    /// Whether this node is a literal.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self.kind, ExprKind::Literal(_))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ExprKind::Literal(ref lit) => write!(f, "{lit}"),
            ExprKind::Value => write!(f, "{}", self.name),
            ExprKind::Call => {
                write!(f, "{}(", self.name)?;
                for (i, arg) in self.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}
