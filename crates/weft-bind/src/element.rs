//! The element handle contract.
//!
//! The engine never assumes a concrete DOM. Anything that can answer
//! these questions — a browser element behind FFI, a server-side node
//! tree, the in-memory tree in `weft-harness` — can be bound.
//!
//! # Invariants
//!
//! 1. `attributes` returns a snapshot in document order; later
//!    attribute writes do not retroactively change an earlier snapshot.
//! 2. An element may be detached (`exists() == false`) by an earlier
//!    task in the same pass; every consumer must tolerate that and
//!    skip, not crash.
//! 3. `unwrap_children` splices the element's children into its parent
//!    at the element's position and detaches the element itself.

use std::any::Any;
use std::rc::Rc;

/// Shared handle to one element.
pub type ElemRef = Rc<dyn Element>;

/// The element operations the binding engine needs.
pub trait Element {
    /// The concrete element behind this handle. Collaborators that own
    /// the tree implementation (tag providers materializing contents,
    /// binders wiring events) downcast through this to reach it.
    fn as_any(&self) -> &dyn Any;

    /// Lower-case tag name (`"div"`, `"t-todo"`).
    fn tag_name(&self) -> String;

    /// Read one attribute.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Write (or overwrite) one attribute.
    fn set_attribute(&self, name: &str, value: &str);

    /// Snapshot of all attributes in document order.
    fn attributes(&self) -> Vec<(String, String)>;

    /// Immediate children, in order.
    fn children(&self) -> Vec<ElemRef>;

    /// Whether the element is still attached to its tree.
    fn exists(&self) -> bool;

    /// Replace this element with its children (custom-tag expansion).
    fn unwrap_children(&self);

    /// Surface an error against this element (e.g. an inline marker).
    fn report_error(&self, message: &str);
}

/// Depth-first visit of every descendant of `elem` (excluding `elem`).
pub fn for_each_descendant(elem: &ElemRef, f: &mut dyn FnMut(&ElemRef)) {
    for child in elem.children() {
        f(&child);
        for_each_descendant(&child, f);
    }
}
