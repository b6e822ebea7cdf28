#![forbid(unsafe_code)]

//! The bind-string expression language.
//!
//! Bind attributes carry one small expression each: a literal, a bare
//! identifier naming a model field or helper, or a call with arguments
//! that are themselves expressions.
//!
//! ```text
//! done
//! toggle()
//! concat("hello ", name)
//! not(is_empty(entries))
//! 42            3.5            'quoted'            true
//! ```
//!
//! There is deliberately no operator syntax, no conditionals, and no
//! loops — control flow lives in dedicated binders, not in expressions.
//!
//! [`parse`] turns a fragment into an immutable [`Expr`] tree or a
//! [`ParseError`] naming the offending character or fragment together
//! with the string being parsed. Expressions are re-parsed each time a
//! bind-string is bound; nothing here is cached.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{Expr, ExprKind, Literal};
pub use error::ParseError;
pub use parser::{is_ident_char, parse, validate_ident};
