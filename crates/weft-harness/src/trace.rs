//! A shared, ordered event log for execution-order assertions.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Clonable handle to one ordered list of events.
///
/// Binders record `bind:`/`update:` events, tag fixtures record
/// `prepare:` events, and tests assert on the resulting order — the
/// observable trace of the engine's two-phase execution.
#[derive(Clone, Default)]
pub struct TraceLog {
    events: Rc<RefCell<Vec<String>>>,
}

impl TraceLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event.
    pub fn record(&self, event: impl Into<String>) {
        self.events.borrow_mut().push(event.into());
    }

    /// Snapshot of all events, in recording order.
    #[must_use]
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    /// Index of the first event with the given prefix.
    #[must_use]
    pub fn first_index_of(&self, prefix: &str) -> Option<usize> {
        self.events
            .borrow()
            .iter()
            .position(|e| e.starts_with(prefix))
    }

    /// Index of the last event with the given prefix.
    #[must_use]
    pub fn last_index_of(&self, prefix: &str) -> Option<usize> {
        self.events
            .borrow()
            .iter()
            .rposition(|e| e.starts_with(prefix))
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl fmt::Debug for TraceLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.events.borrow().iter()).finish()
    }
}
