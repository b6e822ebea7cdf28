//! An in-memory element tree implementing the engine's element contract.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use weft_bind::{ElemRef, Element};

/// A fake element for binding tests.
///
/// Attributes keep document order. Children are owned `Rc`s with weak
/// parent back-links, so [`unwrap_children`](Element::unwrap_children)
/// can splice a custom tag's contents into its parent at the tag's
/// position and mark the tag detached.
pub struct TestElement {
    tag: String,
    this: RefCell<Weak<TestElement>>,
    attrs: RefCell<Vec<(String, String)>>,
    children: RefCell<Vec<Rc<TestElement>>>,
    parent: RefCell<Weak<TestElement>>,
    detached: Cell<bool>,
    errors: RefCell<Vec<String>>,
}

impl TestElement {
    /// Create a detached element with the given tag name.
    #[must_use]
    pub fn new(tag: &str) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            tag: tag.to_string(),
            this: RefCell::new(this.clone()),
            attrs: RefCell::new(Vec::new()),
            children: RefCell::new(Vec::new()),
            parent: RefCell::new(Weak::new()),
            detached: Cell::new(false),
            errors: RefCell::new(Vec::new()),
        })
    }

    /// Create an element with attributes, builder-style.
    #[must_use]
    pub fn with_attrs(tag: &str, attrs: &[(&str, &str)]) -> Rc<Self> {
        let elem = Self::new(tag);
        for (name, value) in attrs {
            elem.set_attribute(name, value);
        }
        elem
    }

    /// The strong handle for this element.
    ///
    /// # Panics
    ///
    /// Panics if the element has already been dropped (impossible while
    /// a caller holds any `Rc` to it).
    #[must_use]
    pub fn strong(&self) -> Rc<TestElement> {
        self.this
            .borrow()
            .upgrade()
            .expect("element is alive while borrowed")
    }

    /// Recover a `TestElement` from an engine handle.
    #[must_use]
    pub fn from_ref(elem: &ElemRef) -> Option<Rc<TestElement>> {
        elem.as_any()
            .downcast_ref::<TestElement>()
            .map(TestElement::strong)
    }

    /// Append `child` as the last child of `self`.
    pub fn append(&self, child: Rc<TestElement>) {
        *child.parent.borrow_mut() = self.this.borrow().clone();
        child.detached.set(false);
        self.children.borrow_mut().push(child);
    }

    /// Errors reported against this element via `report_error`.
    #[must_use]
    pub fn reported_errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    /// Depth-first search for the first descendant with `tag`,
    /// including `self`.
    #[must_use]
    pub fn find_by_tag(self: &Rc<Self>, tag: &str) -> Option<Rc<TestElement>> {
        if self.tag == tag {
            return Some(Rc::clone(self));
        }
        self.children
            .borrow()
            .iter()
            .find_map(|child| child.find_by_tag(tag))
    }

    /// Render the subtree as compact markup, for assertions.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.render(&mut out);
        out
    }

    fn render(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in self.attrs.borrow().iter() {
            if name.starts_with(weft_bind::RESERVED_BIND_PREFIX) {
                continue;
            }
            out.push_str(&format!(" {name}=\"{value}\""));
        }
        let children = self.children.borrow();
        if children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in children.iter() {
            child.render(out);
        }
        out.push_str(&format!("</{}>", self.tag));
    }
}

impl Element for TestElement {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn tag_name(&self) -> String {
        self.tag.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attrs
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut attrs = self.attrs.borrow_mut();
        if let Some(slot) = attrs.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value.to_string();
        } else {
            attrs.push((name.to_string(), value.to_string()));
        }
    }

    fn attributes(&self) -> Vec<(String, String)> {
        self.attrs.borrow().clone()
    }

    fn children(&self) -> Vec<ElemRef> {
        self.children
            .borrow()
            .iter()
            .map(|child| Rc::clone(child) as ElemRef)
            .collect()
    }

    fn exists(&self) -> bool {
        !self.detached.get()
    }

    fn unwrap_children(&self) {
        let contents: Vec<Rc<TestElement>> = self.children.borrow_mut().drain(..).collect();
        let parent = self.parent.borrow().upgrade();
        match parent {
            Some(parent) => {
                for content in &contents {
                    *content.parent.borrow_mut() = Rc::downgrade(&parent);
                }
                let mut siblings = parent.children.borrow_mut();
                let position = siblings
                    .iter()
                    .position(|child| std::ptr::eq::<TestElement>(&**child, self));
                match position {
                    Some(i) => {
                        siblings.splice(i..=i, contents);
                    }
                    None => siblings.extend(contents),
                }
            }
            None => {
                // No parent to splice into; the contents become roots.
                for content in &contents {
                    *content.parent.borrow_mut() = Weak::new();
                }
            }
        }
        self.detached.set(true);
    }

    fn report_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}

impl fmt::Debug for TestElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TestElement(<{}>)", self.tag)
    }
}
