//! The two-phase tree binder.
//!
//! [`BindEngine::bind`] walks an element and its descendants, resolves
//! every bind attribute, and expands custom tags — while the tree
//! itself may be rewritten underneath it as tags expand. Correctness
//! rests on two rules:
//!
//! 1. **Prepare, then execute.** [`BindEngine::bind_prepare`] collects
//!    every task across the subtree without executing any of them, and
//!    execution runs **all bind tasks before any custom-tag task**.
//!    Bind tasks only touch elements; custom-tag tasks replace them.
//!    Running the binds first means no bind task ever operates on an
//!    element that a sibling's expansion already detached.
//! 2. **Prevention markers.** Every bind task checks a reserved
//!    `weft-rsvd-<attr>` attribute before running and stamps it after,
//!    so revisiting the same subtree within one logical bind operation
//!    (a parent's tag expansion re-binding its contents) applies each
//!    attribute exactly once.
//!
//! Per element, conceptually: `unbound → tasks-scheduled → bound`,
//! with an absorbing `expanded` state for custom tags once their
//! contents replace them. A bound element never becomes unbound again
//! except by being removed from the tree and re-created.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use weft_reactive::WatchSet;

use crate::binder::{BinderRegistry, DomBind};
use crate::element::{ElemRef, for_each_descendant};
use crate::error::BindError;
use crate::eval::{Evaluated, evaluate_bind_string, watch_expression};
use crate::helpers::default_helpers;
use crate::model::{Entry, Method, Model, assign_field};
use crate::scope::{HelperTable, Scope, SymbolTable};
use crate::tags::{CustomTag, TagProvider};
use crate::value::Value;

/// Attribute prefix selecting a dom binder: `bind-text`, `bind-class-done`.
pub const BIND_PREFIX: &str = "bind-";

/// Prefix of the reserved prevention-marker attributes.
pub const RESERVED_BIND_PREFIX: &str = "weft-rsvd";

/// Stamp `elem` so `bind_attr` will not be applied to it again.
pub fn prevent_binding(elem: &ElemRef, bind_attr: &str) {
    elem.set_attribute(&format!("{RESERVED_BIND_PREFIX}-{bind_attr}"), "t");
}

/// Stamp `elem` and every descendant against `bind_attr`.
pub fn prevent_tree_binding(elem: &ElemRef, bind_attr: &str) {
    prevent_binding(elem, bind_attr);
    for_each_descendant(elem, &mut |child| prevent_binding(child, bind_attr));
}

/// Fence off `elem` and every descendant from all binding.
pub fn prevent_all_binding(elem: &ElemRef) {
    prevent_binding(elem, "all");
    for_each_descendant(elem, &mut |child| prevent_binding(child, "all"));
}

fn binding_prevented(elem: &ElemRef, bind_attr: &str) -> bool {
    let all = format!("{RESERVED_BIND_PREFIX}-all");
    let this = format!("{RESERVED_BIND_PREFIX}-{bind_attr}");
    elem.attribute(&all).as_deref() == Some("t") || elem.attribute(&this).as_deref() == Some("t")
}

/// How a scheduled bind task applies its bind-string.
#[derive(Clone)]
pub enum BindTaskKind {
    /// `bind-<binder>` against a dom binder.
    Dom,
    /// `bind="field: expr; ..."` against a custom tag's model.
    Attr { model: Rc<dyn Model> },
}

/// One scheduled bind attribute, not yet executed.
pub struct BindTask {
    pub elem: ElemRef,
    pub attr: String,
    pub bind_string: String,
    pub scope: Scope,
    pub kind: BindTaskKind,
}

impl fmt::Debug for BindTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BindTask({}=\"{}\")", self.attr, self.bind_string)
    }
}

/// One scheduled custom-tag expansion, not yet executed.
pub struct CustomTagTask {
    pub elem: ElemRef,
    pub tag: Rc<dyn CustomTag>,
    pub model: Rc<dyn Model>,
}

impl fmt::Debug for CustomTagTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomTagTask(<{}>)", self.elem.tag_name())
    }
}

/// The binding engine: tag provider, binder registry, helper scope,
/// and the watch set owning every reactive subscription it installs.
pub struct BindEngine {
    tags: Rc<dyn TagProvider>,
    binders: BinderRegistry,
    helpers: Rc<HelperTable>,
    base_scope: Scope,
    watches: RefCell<WatchSet>,
}

impl BindEngine {
    /// Create an engine with the default helpers registered.
    #[must_use]
    pub fn new(tags: Rc<dyn TagProvider>, binders: BinderRegistry) -> Self {
        let helpers = Rc::new(default_helpers());
        let mut base_scope = Scope::new();
        base_scope.push_table(Rc::clone(&helpers) as Rc<dyn SymbolTable>);
        Self {
            tags,
            binders,
            helpers,
            base_scope,
            watches: RefCell::new(WatchSet::new()),
        }
    }

    /// Register a global helper function.
    ///
    /// # Panics
    ///
    /// Panics if a helper with this name already exists. Helpers are
    /// installed once at setup; replacing one at runtime is a
    /// configuration bug.
    pub fn register_helper(
        &self,
        name: impl Into<String>,
        arity: usize,
        func: impl Fn(&[Value]) -> Result<Value, BindError> + 'static,
    ) {
        self.helpers.register(Method::new(name, arity, func));
    }

    /// The engine's helper table, for registering named constants.
    #[must_use]
    pub fn helpers(&self) -> &HelperTable {
        &self.helpers
    }

    /// Number of live reactive subscriptions installed by past passes.
    #[must_use]
    pub fn watch_count(&self) -> usize {
        self.watches.borrow().len()
    }

    /// Tear down every reactive subscription this engine installed.
    /// Call when the bound models are being replaced wholesale.
    pub fn release_watches(&self) {
        self.watches.borrow_mut().clear();
    }

    /// Bind `model` to `elem` and its descendants.
    ///
    /// The model's scope is merged with the engine's helper scope.
    /// With `once` the pass is evaluate-and-apply only: no reactive
    /// watches are installed. `include_root` controls whether `elem`
    /// itself is bound or only its subtree.
    pub fn bind(
        &self,
        elem: &ElemRef,
        model: Option<Rc<dyn Model>>,
        once: bool,
        include_root: bool,
    ) -> Result<(), BindError> {
        let mut scope = Scope::for_model(model);
        scope.merge(&self.base_scope);
        self.bind_with_scope(elem, once, include_root, scope)
    }

    /// Bind several models at once; earlier models shadow later ones.
    pub fn bind_models(
        &self,
        elem: &ElemRef,
        models: &[Rc<dyn Model>],
        once: bool,
        include_root: bool,
    ) -> Result<(), BindError> {
        let mut scope = Scope::for_models(models);
        scope.merge(&self.base_scope);
        self.bind_with_scope(elem, once, include_root, scope)
    }

    /// Run one full bind pass with an explicit scope.
    pub fn bind_with_scope(
        &self,
        elem: &ElemRef,
        once: bool,
        include_root: bool,
        scope: Scope,
    ) -> Result<(), BindError> {
        let _span = tracing::debug_span!(
            "bind_pass",
            tag = %elem.tag_name(),
            once,
            include_root
        )
        .entered();

        // Two steps, so that nothing is missed when tag expansion
        // replaces elements mid-pass.
        let (bind_tasks, custom_tasks) = self.bind_prepare(elem, &scope, include_root)?;
        tracing::trace!(
            bind_tasks = bind_tasks.len(),
            custom_tasks = custom_tasks.len(),
            "pass prepared"
        );

        for task in &bind_tasks {
            self.run_bind_task(task, once)?;
        }
        for task in &custom_tasks {
            self.run_custom_tag_task(task, once)?;
        }
        Ok(())
    }

    /// Collect, without executing, every bind task and custom-tag task
    /// for `root` (if `include_root`) and its descendants.
    ///
    /// Only the root's immediate children are scanned at this level;
    /// deeper levels are gathered by recursion so custom-tag
    /// boundaries are never crossed prematurely. Each element gets its
    /// own clone of the incoming scope.
    pub fn bind_prepare(
        &self,
        root: &ElemRef,
        scope: &Scope,
        include_root: bool,
    ) -> Result<(Vec<BindTask>, Vec<CustomTagTask>), BindError> {
        let mut bind_tasks = Vec::new();
        let mut custom_tasks = Vec::new();

        let mut elems: Vec<ElemRef> = Vec::new();
        if include_root {
            elems.push(Rc::clone(root));
        }
        elems.extend(root.children());

        for (idx, elem) in elems.iter().enumerate() {
            let custom = self.tags.custom_tag(elem);
            let elem_scope = scope.clone();
            let attrs = elem.attributes();
            let tag_model = custom.as_ref().map(|tag| tag.new_model(elem));

            for (name, bstr) in &attrs {
                if name == "bind" {
                    // Attribute binding requires a custom tag's model.
                    let Some(model) = tag_model.clone() else {
                        return Err(BindError::NotCustomTag {
                            tag: elem.tag_name(),
                        }
                        .in_bind_string(format!("{name}=\"{bstr}\"")));
                    };
                    bind_tasks.push(BindTask {
                        elem: Rc::clone(elem),
                        attr: name.clone(),
                        bind_string: bstr.clone(),
                        scope: elem_scope.clone(),
                        kind: BindTaskKind::Attr { model },
                    });
                } else if name.starts_with(BIND_PREFIX) && elem.exists() {
                    if custom.is_some() {
                        return Err(BindError::BinderOnCustomTag {
                            attr: name.clone(),
                            tag: elem.tag_name(),
                        }
                        .in_bind_string(format!("{name}=\"{bstr}\"")));
                    }
                    bind_tasks.push(BindTask {
                        elem: Rc::clone(elem),
                        attr: name.clone(),
                        bind_string: bstr.clone(),
                        scope: elem_scope.clone(),
                        kind: BindTaskKind::Dom,
                    });
                }
            }

            // The included root itself is never expanded or recursed
            // into here — its own pass already covers it.
            if !include_root || idx > 0 {
                match (custom, tag_model) {
                    (Some(tag), Some(model)) => custom_tasks.push(CustomTagTask {
                        elem: Rc::clone(elem),
                        tag,
                        model,
                    }),
                    _ => {
                        let (bt, ct) = self.bind_prepare(elem, scope, false)?;
                        bind_tasks.extend(bt);
                        custom_tasks.extend(ct);
                    }
                }
            }
        }

        Ok((bind_tasks, custom_tasks))
    }

    fn run_bind_task(&self, task: &BindTask, once: bool) -> Result<(), BindError> {
        if !task.elem.exists() {
            tracing::trace!(attr = %task.attr, "element detached, skipping bind task");
            return Ok(());
        }
        if binding_prevented(&task.elem, &task.attr) {
            return Ok(());
        }

        match &task.kind {
            BindTaskKind::Dom => self.process_dom_bind(task, once)?,
            BindTaskKind::Attr { model } => self.process_attr_bind(task, model, once)?,
        }

        prevent_binding(&task.elem, &task.attr);
        Ok(())
    }

    fn process_dom_bind(&self, task: &BindTask, once: bool) -> Result<(), BindError> {
        let bstr = &task.bind_string;
        let context = format!("{}=\"{}\"", task.attr, bstr);

        let selector = task.attr.strip_prefix(BIND_PREFIX).unwrap_or_default();
        let mut segments = selector.split('-');
        let binder_name = segments.next().unwrap_or_default();
        if binder_name.is_empty() {
            return Err(BindError::MalformedBindAttr {
                attr: task.attr.clone(),
            });
        }
        let args: Vec<String> = segments.map(str::to_string).collect();

        let mut binder =
            self.binders
                .instance(binder_name)
                .ok_or_else(|| BindError::UnknownBinder {
                    name: binder_name.to_string(),
                })?;

        let (expr_str, outputs) = match bstr.split_once("->") {
            None => (bstr.trim(), Vec::new()),
            Some((expr, outs)) => {
                let outputs: Vec<String> = outs.split(',').map(|o| o.trim().to_string()).collect();
                for output in &outputs {
                    weft_expr::validate_ident(output, bstr)
                        .map_err(|err| BindError::from(err).in_bind_string(context.clone()))?;
                }
                (expr.trim(), outputs)
            }
        };

        let Evaluated {
            root,
            value,
            bindables,
        } = evaluate_bind_string(expr_str, &task.scope)
            .map_err(|err| err.in_bind_string(context.clone()))?;

        // Two-way write-back is only unambiguous with exactly one
        // watchable dependency.
        if bindables.len() == 1 {
            let field = bindables[0].clone();
            binder.watch(
                &task.elem,
                Box::new(move |new_value| {
                    if let Err(err) = assign_field(&field.field, new_value) {
                        tracing::warn!(field = %field.name, error = %err, "write-back rejected");
                    }
                }),
            );
        }

        let dom_bind = DomBind {
            elem: Rc::clone(&task.elem),
            value,
            args,
            outputs,
            scope: task.scope.clone(),
            metadata: context,
        };
        binder.bind(&dom_bind);
        binder.update(&dom_bind);

        if !once {
            let binder = Rc::new(RefCell::new(binder));
            let dom_bind = Rc::new(RefCell::new(dom_bind));
            let mut watches = self.watches.borrow_mut();
            watch_expression(&root, &task.scope, &bindables, &mut watches, move |value| {
                let mut bind = dom_bind.borrow_mut();
                bind.value = value;
                binder.borrow_mut().update(&bind);
            });
        }
        Ok(())
    }

    fn process_attr_bind(
        &self,
        task: &BindTask,
        model: &Rc<dyn Model>,
        once: bool,
    ) -> Result<(), BindError> {
        let bstr = &task.bind_string;
        let pairs: Vec<&str> = bstr.split(';').collect();

        for (i, pair) in pairs.iter().enumerate() {
            // Tolerate one trailing `;`.
            if i == pairs.len() - 1 && pair.is_empty() {
                continue;
            }

            let halves: Vec<&str> = pair.split(':').collect();
            if halves.len() != 2 {
                return Err(BindError::MalformedFieldBind {
                    pair: (*pair).to_string(),
                }
                .in_bind_string(bstr.clone()));
            }
            let field_name = halves[0].trim();
            let expr_str = halves[1].trim();
            weft_expr::validate_ident(field_name, bstr)
                .map_err(|err| BindError::from(err).in_bind_string(bstr.clone()))?;

            let Evaluated {
                root,
                value,
                bindables,
            } = evaluate_bind_string(expr_str, &task.scope)
                .map_err(|err| err.in_bind_string(bstr.clone()))?;

            let target = match model.lookup(field_name) {
                Some(Entry::Field(cell)) => cell,
                _ => {
                    return Err(BindError::NoSuchField {
                        field: field_name.to_string(),
                        model: model.model_name().to_string(),
                    }
                    .in_bind_string(bstr.clone()));
                }
            };

            assign_field(&target, value).map_err(|err| err.in_bind_string(bstr.clone()))?;

            if !once {
                let target = target.clone();
                let field = field_name.to_string();
                let mut watches = self.watches.borrow_mut();
                watch_expression(&root, &task.scope, &bindables, &mut watches, move |value| {
                    if let Err(err) = assign_field(&target, value) {
                        tracing::warn!(field = %field, error = %err, "reactive assignment rejected");
                    }
                });
            }
        }
        Ok(())
    }

    fn run_custom_tag_task(&self, task: &CustomTagTask, once: bool) -> Result<(), BindError> {
        if !task.elem.exists() {
            tracing::trace!(tag = %task.elem.tag_name(), "element detached, skipping tag task");
            return Ok(());
        }

        if let Err(message) = task.tag.prepare_contents(&task.elem, &task.model) {
            // The one recoverable failure: report against the element,
            // keep binding the rest of the tree.
            tracing::warn!(tag = %task.elem.tag_name(), error = %message, "tag preparation failed");
            task.elem.report_error(&message);
        }

        self.bind(&task.elem, Some(Rc::clone(&task.model)), once, false)?;
        task.elem.unwrap_children();
        Ok(())
    }
}

impl fmt::Debug for BindEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindEngine")
            .field("watches", &self.watches.borrow().len())
            .finish()
    }
}
