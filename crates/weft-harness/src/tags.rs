//! Custom-tag fixtures: a name-keyed provider and a closure-driven tag.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use weft_bind::{CustomTag, ElemRef, Model, TagProvider};

use crate::element::TestElement;
use crate::trace::TraceLog;

type ModelFactory = dyn Fn(&ElemRef) -> Rc<dyn Model>;
type ContentTemplate = dyn Fn(&Rc<TestElement>, &Rc<dyn Model>) -> Result<(), String>;

/// A custom tag whose model factory and content template are closures.
pub struct TestTag {
    log: Option<(TraceLog, String)>,
    model_factory: Box<ModelFactory>,
    content: Box<ContentTemplate>,
}

impl TestTag {
    /// A tag producing models from `factory`, with empty contents.
    pub fn new(factory: impl Fn(&ElemRef) -> Rc<dyn Model> + 'static) -> Self {
        Self {
            log: None,
            model_factory: Box::new(factory),
            content: Box::new(|_, _| Ok(())),
        }
    }

    /// Set the content template. It receives the concrete tag element
    /// and appends the tag's rendered contents to it.
    #[must_use]
    pub fn with_content(
        mut self,
        content: impl Fn(&Rc<TestElement>, &Rc<dyn Model>) -> Result<(), String> + 'static,
    ) -> Self {
        self.content = Box::new(content);
        self
    }

    /// Record `prepare:<name>` into `log` whenever contents are
    /// materialized.
    #[must_use]
    pub fn logged(mut self, log: TraceLog, name: &str) -> Self {
        self.log = Some((log, name.to_string()));
        self
    }
}

impl CustomTag for TestTag {
    fn new_model(&self, elem: &ElemRef) -> Rc<dyn Model> {
        (self.model_factory)(elem)
    }

    fn prepare_contents(&self, elem: &ElemRef, model: &Rc<dyn Model>) -> Result<(), String> {
        if let Some((log, name)) = &self.log {
            log.record(format!("prepare:{name}"));
        }
        let concrete = TestElement::from_ref(elem)
            .ok_or_else(|| "element is not a TestElement".to_string())?;
        (self.content)(&concrete, model)
    }
}

/// A name-keyed tag provider.
#[derive(Default)]
pub struct TagLibrary {
    tags: RefCell<HashMap<String, Rc<dyn CustomTag>>>,
}

impl TagLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `tag` under the element name `tag_name` (`"t-todo"`).
    pub fn register(&self, tag_name: &str, tag: Rc<dyn CustomTag>) {
        self.tags.borrow_mut().insert(tag_name.to_string(), tag);
    }
}

impl TagProvider for TagLibrary {
    fn custom_tag(&self, elem: &ElemRef) -> Option<Rc<dyn CustomTag>> {
        self.tags.borrow().get(&elem.tag_name()).cloned()
    }
}
