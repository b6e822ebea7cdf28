//! Default helper functions registered on every engine.

use crate::error::BindError;
use crate::model::Method;
use crate::scope::HelperTable;
use crate::value::Value;

pub(crate) fn default_helpers() -> HelperTable {
    let table = HelperTable::new();
    table.register(Method::new("to_string", 1, |args| {
        Ok(Value::Str(args[0].to_string()))
    }));
    table.register(Method::new("not", 1, |args| match args[0].as_bool() {
        Some(b) => Ok(Value::Bool(!b)),
        None => Err(BindError::Invocation {
            name: "not".into(),
            message: format!("expected bool, got {}", args[0].kind()),
        }),
    }));
    table.register(Method::new("eq", 2, |args| {
        Ok(Value::Bool(args[0] == args[1]))
    }));
    table.register(Method::new("len", 1, |args| match args[0].as_str() {
        Some(s) => Ok(Value::Int(s.chars().count() as i64)),
        None => Err(BindError::Invocation {
            name: "len".into(),
            message: format!("expected string, got {}", args[0].kind()),
        }),
    }));
    table
}
