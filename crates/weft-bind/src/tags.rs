//! The custom-tag provider contract.
//!
//! Custom tags are application-defined element types (`<t-todo>`) that
//! never render directly: the engine asks the provider for a model,
//! binds the tag's attributes against it, materializes the tag's inner
//! content, binds that content against the same model, and finally
//! replaces the tag element with its expanded contents.

use std::rc::Rc;

use crate::element::ElemRef;
use crate::model::Model;

/// One registered custom tag type.
pub trait CustomTag {
    /// Create the model instance for one occurrence of this tag.
    /// Called exactly once per element encountered.
    fn new_model(&self, elem: &ElemRef) -> Rc<dyn Model>;

    /// Materialize the tag's rendered contents under `elem` before the
    /// engine binds them. An `Err` is reported against the element and
    /// does not abort binding of the rest of the tree.
    fn prepare_contents(&self, elem: &ElemRef, model: &Rc<dyn Model>) -> Result<(), String>;
}

/// The registry the engine consults to classify elements.
pub trait TagProvider {
    /// The custom tag registered for this element, if any.
    fn custom_tag(&self, elem: &ElemRef) -> Option<Rc<dyn CustomTag>>;
}
