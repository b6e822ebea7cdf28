//! Recording binders for binding tests.

use std::cell::RefCell;
use std::rc::Rc;

use weft_bind::{DomBind, DomBinder, ElemRef, Value, WatchCallback};

use crate::trace::TraceLog;

/// A binder that records everything the engine does to it.
///
/// All instances handed out by [`bind_instance`](DomBinder::bind_instance)
/// share the same recording sinks, so a test keeps one prototype handle
/// and reads the combined history:
///
/// - `bind:<metadata>` and `update:<name>=<value>` events go to the
///   [`TraceLog`].
/// - Every update value is appended to [`values`](Self::values).
/// - With [`watchable`](Self::watchable), the engine's two-way
///   write-back callbacks are captured and can be driven with
///   [`push_input`](Self::push_input) to simulate user input.
pub struct RecordingBinder {
    name: String,
    log: TraceLog,
    values: Rc<RefCell<Vec<Value>>>,
    inputs: Rc<RefCell<Vec<WatchCallback>>>,
    last_args: Rc<RefCell<Vec<String>>>,
    last_outputs: Rc<RefCell<Vec<String>>>,
    watchable: bool,
}

impl Clone for RecordingBinder {
    /// Clones share all recording sinks with the original.
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            log: self.log.clone(),
            values: Rc::clone(&self.values),
            inputs: Rc::clone(&self.inputs),
            last_args: Rc::clone(&self.last_args),
            last_outputs: Rc::clone(&self.last_outputs),
            watchable: self.watchable,
        }
    }
}

impl RecordingBinder {
    #[must_use]
    pub fn new(name: &str, log: TraceLog) -> Self {
        Self {
            name: name.to_string(),
            log,
            values: Rc::new(RefCell::new(Vec::new())),
            inputs: Rc::new(RefCell::new(Vec::new())),
            last_args: Rc::new(RefCell::new(Vec::new())),
            last_outputs: Rc::new(RefCell::new(Vec::new())),
            watchable: false,
        }
    }

    /// Make instances accept `watch` wiring (an input-style binder).
    #[must_use]
    pub fn watchable(mut self) -> Self {
        self.watchable = true;
        self
    }

    /// Every value passed to `update`, in order, across all instances.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.values.borrow().clone()
    }

    /// The most recent update value.
    #[must_use]
    pub fn last_value(&self) -> Option<Value> {
        self.values.borrow().last().cloned()
    }

    /// Number of watch callbacks the engine installed.
    #[must_use]
    pub fn watch_count(&self) -> usize {
        self.inputs.borrow().len()
    }

    /// Simulate user input: feed `value` to every captured watch
    /// callback (two-way write-back into the bound field).
    pub fn push_input(&self, value: Value) {
        for callback in self.inputs.borrow().iter() {
            callback(value.clone());
        }
    }

    /// Selector arguments of the most recent `bind`
    /// (`bind-class-done` → `["done"]`).
    #[must_use]
    pub fn last_args(&self) -> Vec<String> {
        self.last_args.borrow().clone()
    }

    /// Output names of the most recent `bind` (`expr -> a, b`).
    #[must_use]
    pub fn last_outputs(&self) -> Vec<String> {
        self.last_outputs.borrow().clone()
    }
}

impl DomBinder for RecordingBinder {
    fn bind_instance(&self) -> Box<dyn DomBinder> {
        Box::new(self.clone())
    }

    fn bind(&mut self, bind: &DomBind) {
        self.log.record(format!("bind:{}", bind.metadata));
        *self.last_args.borrow_mut() = bind.args.clone();
        *self.last_outputs.borrow_mut() = bind.outputs.clone();
    }

    fn update(&mut self, bind: &DomBind) {
        self.log
            .record(format!("update:{}={}", self.name, bind.value));
        self.values.borrow_mut().push(bind.value.clone());
    }

    fn watch(&mut self, _elem: &ElemRef, callback: WatchCallback) -> bool {
        if !self.watchable {
            return false;
        }
        self.log.record(format!("watch:{}", self.name));
        self.inputs.borrow_mut().push(callback);
        true
    }
}
