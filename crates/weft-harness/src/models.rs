//! Ready-made models for binding tests, in the shape of a todo app.

use std::rc::Rc;

use weft_bind::{DynModel, Value};
use weft_reactive::Observable;

/// A todo entry: `text`, `done`, `state` fields and a `toggle` method
/// that flips `done` and keeps `state` in sync (`""`/`"completed"`).
#[must_use]
pub fn todo_entry(text: &str, done: bool) -> Rc<DynModel> {
    let done_cell = Observable::new(Value::Bool(done));
    let state_cell = Observable::new(Value::Str(
        if done { "completed" } else { "" }.to_string(),
    ));

    let d = done_cell.clone();
    let s = state_cell.clone();
    Rc::new(
        DynModel::new("TodoEntry")
            .with_field("text", Value::from(text))
            .with_field_cell("done", done_cell)
            .with_field_cell("state", state_cell)
            .with_method("toggle", 0, move |_| {
                let next = !d.get().as_bool().unwrap_or(false);
                d.set(Value::Bool(next));
                s.set(Value::Str(
                    if next { "completed" } else { "" }.to_string(),
                ));
                Ok(Value::Bool(next))
            }),
    )
}

/// A counter with an `n` field and an `incr` method.
#[must_use]
pub fn counter(start: i64) -> Rc<DynModel> {
    let n = Observable::new(Value::Int(start));
    let cell = n.clone();
    Rc::new(
        DynModel::new("Counter")
            .with_field_cell("n", n)
            .with_method("incr", 0, move |_| {
                let next = cell.get().as_int().unwrap_or(0) + 1;
                cell.set(Value::Int(next));
                Ok(Value::Int(next))
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_bind::{Entry, Model};

    #[test]
    fn toggle_flips_done_and_state() {
        let entry = todo_entry("buy milk", false);
        let Some(Entry::Method(toggle)) = entry.lookup("toggle") else {
            panic!("toggle must be a method");
        };

        toggle.invoke(&[]).unwrap();
        assert_eq!(entry.field("done").unwrap().get(), Value::Bool(true));
        assert_eq!(
            entry.field("state").unwrap().get(),
            Value::from("completed")
        );

        toggle.invoke(&[]).unwrap();
        assert_eq!(entry.field("done").unwrap().get(), Value::Bool(false));
        assert_eq!(entry.field("state").unwrap().get(), Value::from(""));
    }

    #[test]
    fn counter_increments() {
        let c = counter(41);
        let Some(Entry::Method(incr)) = c.lookup("incr") else {
            panic!("incr must be a method");
        };
        assert_eq!(incr.invoke(&[]).unwrap(), Value::Int(42));
        assert_eq!(c.field("n").unwrap().get(), Value::Int(42));
    }
}
