//! The expression evaluator and reactive watch installation.
//!
//! Evaluation walks a parsed [`Expr`] against a [`Scope`] and returns
//! the computed [`Value`] together with the expression's *bindables*:
//! the flattened, deduplication-free list of every model field touched
//! along the way. That list is the dependency set driving reactivity —
//! [`watch_expression`] installs one subscription per bindable, and
//! each subscription re-runs the whole evaluation (never just the
//! changed sub-term) before invoking the caller's update callback.
//!
//! # Invariants
//!
//! 1. Literals contribute no bindables.
//! 2. Arguments evaluate left to right; the first failure aborts the
//!    whole evaluation with no partial application.
//! 3. A bindable appears in the list once per *occurrence* in the
//!    expression, after the bindables of its own arguments.
//! 4. A transient re-evaluation failure inside a watch is logged and
//!    skipped; it never tears the watch down.

use std::rc::Rc;

use weft_expr::{Expr, ExprKind};
use weft_reactive::WatchSet;

use crate::error::BindError;
use crate::scope::{FieldSymbol, Scope};
use crate::value::Value;

/// Evaluate `expr` against `scope`.
///
/// Returns the value and the bindables list described in the module
/// docs. Errors name the failing symbol; callers binding a full
/// bind-string wrap them with [`BindError::in_bind_string`].
pub fn evaluate(expr: &Expr, scope: &Scope) -> Result<(Value, Vec<FieldSymbol>), BindError> {
    let mut bindables = Vec::new();
    let value = evaluate_rec(expr, scope, &mut bindables)?;
    Ok((value, bindables))
}

fn evaluate_rec(
    expr: &Expr,
    scope: &Scope,
    bindables: &mut Vec<FieldSymbol>,
) -> Result<Value, BindError> {
    if let ExprKind::Literal(lit) = &expr.kind {
        return Ok(Value::from(lit));
    }

    let mut args = Vec::with_capacity(expr.args.len());
    for arg in &expr.args {
        args.push(evaluate_rec(arg, scope, bindables)?);
    }

    let symbol = scope.lookup(&expr.name)?;
    let value = match expr.kind {
        ExprKind::Value => symbol.value()?,
        ExprKind::Call => symbol.call(&args)?,
        ExprKind::Literal(_) => unreachable!("literals return early"),
    };

    if let Some(field) = symbol.bindable() {
        bindables.push(field);
    }
    Ok(value)
}

/// A fully evaluated bind-string: the parsed root expression, the
/// computed value, and the dependency set.
#[derive(Debug)]
pub struct Evaluated {
    pub root: Rc<Expr>,
    pub value: Value,
    pub bindables: Vec<FieldSymbol>,
}

/// Parse and evaluate one bind-string expression fragment.
///
/// Parse and resolution failures come back undecorated; the tree
/// binder wraps them with the full original attribute value.
pub fn evaluate_bind_string(fragment: &str, scope: &Scope) -> Result<Evaluated, BindError> {
    let root = Rc::new(weft_expr::parse(fragment)?);
    let (value, bindables) = evaluate(&root, scope)?;
    Ok(Evaluated {
        root,
        value,
        bindables,
    })
}

/// Install one watch per bindable: any mutation of a dependent field
/// re-evaluates `root` against `scope` and feeds the fresh value to
/// `on_update`. Subscriptions are parked in `watches`.
pub fn watch_expression(
    root: &Rc<Expr>,
    scope: &Scope,
    bindables: &[FieldSymbol],
    watches: &mut WatchSet,
    on_update: impl Fn(Value) + 'static,
) {
    let on_update = Rc::new(on_update);
    for bindable in bindables {
        let root = Rc::clone(root);
        let scope = scope.clone();
        let on_update = Rc::clone(&on_update);
        let field_name = bindable.name.clone();
        watches.watch(&bindable.field, move |_| {
            match evaluate(&root, &scope) {
                Ok((value, _)) => on_update(value),
                Err(err) => {
                    // Transient failure: skip this update, keep the watch.
                    tracing::warn!(
                        field = %field_name,
                        error = %err,
                        "re-evaluation failed, skipping update"
                    );
                }
            }
        });
    }
}
