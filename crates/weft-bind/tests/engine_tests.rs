#![forbid(unsafe_code)]

//! Integration tests: full bind passes over an in-memory element tree.

use std::cell::RefCell;
use std::rc::Rc;

use weft_bind::{
    BindEngine, BindError, BinderRegistry, DomBind, DomBinder, DynModel, ElemRef, Element, Entry,
    Method, Model, TagProvider, Value, WatchCallback, prevent_all_binding,
};
use weft_harness::models::{counter, todo_entry};
use weft_harness::{RecordingBinder, TagLibrary, TestElement, TestTag, TraceLog};

/// A registry with a recording `text` binder and a watchable recording
/// `value` binder; returns handles to both.
fn recording_registry(log: &TraceLog) -> (BinderRegistry, RecordingBinder, RecordingBinder) {
    let text = RecordingBinder::new("text", log.clone());
    let value = RecordingBinder::new("value", log.clone()).watchable();
    let mut registry = BinderRegistry::new();
    registry.register("text", Box::new(text.clone()));
    registry.register("value", Box::new(value.clone()));
    (registry, text, value)
}

fn engine(log: &TraceLog) -> (BindEngine, RecordingBinder, RecordingBinder, Rc<TagLibrary>) {
    let (registry, text, value) = recording_registry(log);
    let tags = Rc::new(TagLibrary::new());
    let engine = BindEngine::new(Rc::clone(&tags) as Rc<dyn TagProvider>, registry);
    (engine, text, value, tags)
}

// ============================================================================
// Dom binds
// ============================================================================

#[test]
fn dom_bind_applies_value_then_tracks_mutations() {
    let log = TraceLog::new();
    let (engine, text, _, _) = engine(&log);

    let entry = todo_entry("buy milk", true);
    let done = entry.field("done").unwrap();

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("span", &[("bind-text", "done")]));
    let handle: ElemRef = root.clone();

    engine
        .bind(&handle, Some(entry as Rc<dyn Model>), false, true)
        .unwrap();
    assert_eq!(text.values(), vec![Value::Bool(true)]);

    done.set(Value::Bool(false));
    assert_eq!(text.values(), vec![Value::Bool(true), Value::Bool(false)]);
}

#[test]
fn helper_calls_compose_with_model_fields() {
    let log = TraceLog::new();
    let (engine, text, _, _) = engine(&log);

    let entry = todo_entry("x", false);
    let done = entry.field("done").unwrap();

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("span", &[("bind-text", "not(done)")]));
    let handle: ElemRef = root.clone();

    engine
        .bind(&handle, Some(entry as Rc<dyn Model>), false, true)
        .unwrap();
    assert_eq!(text.last_value(), Some(Value::Bool(true)));

    done.set(Value::Bool(true));
    assert_eq!(text.last_value(), Some(Value::Bool(false)));
}

#[test]
fn null_model_still_resolves_helpers() {
    let log = TraceLog::new();
    let (engine, text, _, _) = engine(&log);

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs(
        "span",
        &[("bind-text", "to_string(42)")],
    ));
    let handle: ElemRef = root.clone();

    engine.bind(&handle, None, false, true).unwrap();
    assert_eq!(text.last_value(), Some(Value::from("42")));
}

#[test]
fn binder_selector_args_and_outputs_reach_the_binder() {
    let log = TraceLog::new();
    let (engine, text, _, _) = engine(&log);

    let model = Rc::new(DynModel::new("M").with_field("done", Value::Bool(true)));
    let root = TestElement::new("div");
    root.append(TestElement::with_attrs(
        "li",
        &[("bind-text-completed-editing", "done -> current, previous")],
    ));
    let handle: ElemRef = root.clone();

    engine
        .bind(&handle, Some(model as Rc<dyn Model>), false, true)
        .unwrap();
    assert_eq!(text.last_args(), vec!["completed", "editing"]);
    assert_eq!(text.last_outputs(), vec!["current", "previous"]);
}

#[test]
fn registered_helper_is_usable_in_expressions() {
    let log = TraceLog::new();
    let (engine, text, _, _) = engine(&log);
    engine.register_helper("shout", 1, |args| {
        Ok(Value::Str(format!("{}!", args[0])))
    });

    let model = Rc::new(DynModel::new("M").with_field("word", Value::from("go")));
    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("span", &[("bind-text", "shout(word)")]));
    let handle: ElemRef = root.clone();

    engine
        .bind(&handle, Some(model as Rc<dyn Model>), false, true)
        .unwrap();
    assert_eq!(text.last_value(), Some(Value::from("go!")));
}

#[test]
#[should_panic(expected = "already exists")]
fn re_registering_a_default_helper_panics() {
    let log = TraceLog::new();
    let (engine, _, _, _) = engine(&log);
    engine.register_helper("eq", 2, |_| Ok(Value::Null));
}

// ============================================================================
// Once binds
// ============================================================================

#[test]
fn once_bind_evaluates_a_single_time_and_never_watches() {
    let log = TraceLog::new();
    let (engine, text, _, _) = engine(&log);

    let entry = todo_entry("x", true);
    let done = entry.field("done").unwrap();

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("span", &[("bind-text", "done")]));
    let handle: ElemRef = root.clone();

    engine
        .bind(&handle, Some(entry as Rc<dyn Model>), true, true)
        .unwrap();
    assert_eq!(text.values(), vec![Value::Bool(true)]);
    assert_eq!(engine.watch_count(), 0);

    done.set(Value::Bool(false));
    assert_eq!(text.values(), vec![Value::Bool(true)], "no reactive update");
}

// ============================================================================
// Two-way binds
// ============================================================================

#[test]
fn single_dependency_expression_gets_two_way_write_back() {
    let log = TraceLog::new();
    let (engine, _, value, _) = engine(&log);

    let model = Rc::new(DynModel::new("M").with_field("text", Value::from("a")));
    let field = model.field("text").unwrap();

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("input", &[("bind-value", "text")]));
    let handle: ElemRef = root.clone();

    engine
        .bind(&handle, Some(model as Rc<dyn Model>), false, true)
        .unwrap();
    assert_eq!(value.watch_count(), 1);

    // User types: write-back mutates the field, which re-triggers the
    // reactive update with the new value.
    value.push_input(Value::from("ab"));
    assert_eq!(field.get(), Value::from("ab"));
    assert_eq!(value.values(), vec![Value::from("a"), Value::from("ab")]);
}

#[test]
fn incompatible_write_back_is_rejected_without_crashing() {
    let log = TraceLog::new();
    let (engine, _, value, _) = engine(&log);

    let model = Rc::new(DynModel::new("M").with_field("text", Value::from("a")));
    let field = model.field("text").unwrap();

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("input", &[("bind-value", "text")]));
    let handle: ElemRef = root.clone();

    engine
        .bind(&handle, Some(model as Rc<dyn Model>), false, true)
        .unwrap();

    value.push_input(Value::Int(7));
    assert_eq!(field.get(), Value::from("a"), "mismatched kind is rejected");
}

#[test]
fn multi_dependency_expression_is_not_two_way() {
    let log = TraceLog::new();
    let (engine, _, value, _) = engine(&log);

    let model = Rc::new(
        DynModel::new("M")
            .with_field("a", Value::from("x"))
            .with_field("b", Value::from("y")),
    );
    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("input", &[("bind-value", "eq(a, b)")]));
    let handle: ElemRef = root.clone();

    engine
        .bind(&handle, Some(model as Rc<dyn Model>), false, true)
        .unwrap();
    assert_eq!(
        value.watch_count(),
        0,
        "ambiguous dependencies must not be wired for write-back"
    );
}

// ============================================================================
// Custom tags
// ============================================================================

/// A `t-label` tag: model with a `label` field, contents are one span
/// bound to it. Returns the provider plus the created models.
fn label_tag(log: &TraceLog, tags: &TagLibrary) -> Rc<RefCell<Vec<Rc<DynModel>>>> {
    let created: Rc<RefCell<Vec<Rc<DynModel>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&created);
    tags.register(
        "t-label",
        Rc::new(
            TestTag::new(move |_| {
                let model = Rc::new(DynModel::new("Label").with_field("label", Value::Null));
                sink.borrow_mut().push(Rc::clone(&model));
                model as Rc<dyn Model>
            })
            .logged(log.clone(), "t-label")
            .with_content(|elem, _| {
                elem.append(TestElement::with_attrs("span", &[("bind-text", "label")]));
                Ok(())
            }),
        ),
    );
    created
}

#[test]
fn all_bind_tasks_run_before_any_custom_tag_task() {
    let log = TraceLog::new();
    let (engine, _, _, tags) = engine(&log);
    label_tag(&log, &tags);

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("span", &[("bind-text", "'before'")]));
    root.append(TestElement::with_attrs("t-label", &[("bind", "label: 'hi'")]));
    root.append(TestElement::with_attrs("span", &[("bind-text", "'after'")]));
    let handle: ElemRef = root.clone();

    engine
        .bind(&handle, Some(Rc::new(DynModel::new("Page")) as Rc<dyn Model>), false, true)
        .unwrap();

    let first_prepare = log.first_index_of("prepare:").expect("tag must prepare");
    let before = log.first_index_of("update:text=before").unwrap();
    let after = log.first_index_of("update:text=after").unwrap();
    assert!(
        before < first_prepare && after < first_prepare,
        "every outer bind task must precede tag expansion: {:?}",
        log.events()
    );

    // The tag's own contents bind after its preparation.
    let inner = log.first_index_of("update:text=hi").unwrap();
    assert!(inner > first_prepare);
}

#[test]
fn custom_tag_expands_in_place_and_unwraps() {
    let log = TraceLog::new();
    let (engine, _, _, tags) = engine(&log);
    let created = label_tag(&log, &tags);

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("p", &[]));
    root.append(TestElement::with_attrs("t-label", &[("bind", "label: 'hi'")]));
    root.append(TestElement::with_attrs("q", &[]));
    let handle: ElemRef = root.clone();

    engine
        .bind(&handle, Some(Rc::new(DynModel::new("Page")) as Rc<dyn Model>), false, true)
        .unwrap();

    assert_eq!(
        root.to_markup(),
        "<div><p/><span bind-text=\"label\"/><q/></div>",
        "tag contents must be spliced at the tag's position"
    );
    assert!(root.find_by_tag("t-label").is_none());
    assert_eq!(created.borrow().len(), 1, "one model per tag occurrence");
    assert_eq!(
        created.borrow()[0].field("label").unwrap().get(),
        Value::from("hi")
    );
}

#[test]
fn reactive_chain_flows_through_attribute_binds() {
    let log = TraceLog::new();
    let (engine, text, _, tags) = engine(&log);
    label_tag(&log, &tags);

    let page = Rc::new(DynModel::new("Page").with_field("title", Value::from("hello")));
    let title = page.field("title").unwrap();

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("t-label", &[("bind", "label: title")]));
    let handle: ElemRef = root.clone();

    engine
        .bind(&handle, Some(page as Rc<dyn Model>), false, true)
        .unwrap();
    assert_eq!(text.last_value(), Some(Value::from("hello")));

    // Outer field → attr-bind watch → tag field → dom-bind watch → binder.
    title.set(Value::from("world"));
    assert_eq!(text.last_value(), Some(Value::from("world")));
}

#[test]
fn tag_preparation_error_is_reported_and_binding_continues() {
    let log = TraceLog::new();
    let (engine, text, _, tags) = engine(&log);
    tags.register(
        "t-broken",
        Rc::new(
            TestTag::new(|_| Rc::new(DynModel::new("B")) as Rc<dyn Model>)
                .with_content(|_, _| Err("template exploded".into())),
        ),
    );

    let root = TestElement::new("div");
    let broken = TestElement::new("t-broken");
    root.append(Rc::clone(&broken));
    root.append(TestElement::with_attrs("span", &[("bind-text", "'still here'")]));
    let handle: ElemRef = root.clone();

    engine.bind(&handle, None, false, true).unwrap();

    assert_eq!(broken.reported_errors(), vec!["template exploded"]);
    assert_eq!(
        text.last_value(),
        Some(Value::from("still here")),
        "the rest of the tree must still bind"
    );
}

// ============================================================================
// Idempotence and prevention
// ============================================================================

#[test]
fn rebinding_the_same_attribute_applies_once() {
    let log = TraceLog::new();
    let (engine, text, _, _) = engine(&log);

    let model = Rc::new(DynModel::new("M").with_field("x", Value::from("v")));
    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("span", &[("bind-text", "x")]));
    let handle: ElemRef = root.clone();

    let model: Rc<dyn Model> = model;
    engine.bind(&handle, Some(Rc::clone(&model)), false, true).unwrap();
    engine.bind(&handle, Some(model), false, true).unwrap();

    assert_eq!(
        text.values(),
        vec![Value::from("v")],
        "the prevention marker must stop the second application"
    );
}

#[test]
fn prevent_all_binding_fences_off_a_subtree() {
    let log = TraceLog::new();
    let (engine, text, _, _) = engine(&log);

    let root = TestElement::new("div");
    let fenced = TestElement::with_attrs("span", &[("bind-text", "'nope'")]);
    root.append(Rc::clone(&fenced));
    let handle: ElemRef = root.clone();

    prevent_all_binding(&(fenced as ElemRef));
    engine.bind(&handle, None, false, true).unwrap();

    assert!(text.values().is_empty());
}

// ============================================================================
// Detached elements
// ============================================================================

/// A binder whose update detaches another element, simulating a task
/// that rewrites the tree while later tasks are still queued.
struct DetachingBinder {
    target: Rc<TestElement>,
}

impl DomBinder for DetachingBinder {
    fn bind_instance(&self) -> Box<dyn DomBinder> {
        Box::new(DetachingBinder {
            target: Rc::clone(&self.target),
        })
    }
    fn bind(&mut self, _: &DomBind) {}
    fn update(&mut self, _: &DomBind) {
        self.target.unwrap_children();
    }
}

#[test]
fn tasks_on_detached_elements_are_skipped_not_crashed() {
    let log = TraceLog::new();
    let text = RecordingBinder::new("text", log.clone());
    let victim = TestElement::with_attrs("span", &[("bind-text", "'gone'")]);

    let mut registry = BinderRegistry::new();
    registry.register("text", Box::new(text.clone()));
    registry.register(
        "zap",
        Box::new(DetachingBinder {
            target: Rc::clone(&victim),
        }),
    );
    let engine = BindEngine::new(Rc::new(TagLibrary::new()), registry);

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("a", &[("bind-zap", "1")]));
    root.append(victim);
    let handle: ElemRef = root.clone();

    engine.bind(&handle, None, false, true).unwrap();
    assert!(text.values().is_empty(), "the detached bind must be skipped");
}

// ============================================================================
// Event binders
// ============================================================================

/// A click-style binder: captures the bound handler and fires it on a
/// simulated click.
struct ClickBinder {
    handler: Rc<RefCell<Option<Rc<Method>>>>,
}

impl ClickBinder {
    fn new() -> (Self, Rc<RefCell<Option<Rc<Method>>>>) {
        let handler = Rc::new(RefCell::new(None));
        (
            Self {
                handler: Rc::clone(&handler),
            },
            handler,
        )
    }
}

impl DomBinder for ClickBinder {
    fn bind_instance(&self) -> Box<dyn DomBinder> {
        Box::new(ClickBinder {
            handler: Rc::clone(&self.handler),
        })
    }
    fn bind(&mut self, bind: &DomBind) {
        *self.handler.borrow_mut() = bind.value.as_func().cloned();
    }
    fn update(&mut self, _: &DomBind) {}
    fn watch(&mut self, _: &ElemRef, _: WatchCallback) -> bool {
        false
    }
}

#[test]
fn bare_method_name_binds_an_invokable_handler() {
    let (click, handler) = ClickBinder::new();
    let mut registry = BinderRegistry::new();
    registry.register("click", Box::new(click));
    let engine = BindEngine::new(Rc::new(TagLibrary::new()), registry);

    let model = counter(0);
    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("button", &[("bind-click", "incr")]));
    let handle: ElemRef = root.clone();

    engine
        .bind(&handle, Some(Rc::clone(&model) as Rc<dyn Model>), false, true)
        .unwrap();

    let installed = handler.borrow().clone().expect("handler must be captured");
    installed.invoke(&[]).unwrap(); // simulated click
    installed.invoke(&[]).unwrap();
    assert_eq!(model.field("n").unwrap().get(), Value::Int(2));
}

#[test]
fn missing_handler_fails_at_evaluation_not_parse() {
    let log = TraceLog::new();
    let (engine, _, _, _) = engine(&log);

    // `destroy` parses fine; the model simply lacks it.
    let entry = todo_entry("x", false);
    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("button", &[("bind-text", "destroy")]));
    let handle: ElemRef = root.clone();

    let err = engine
        .bind(&handle, Some(entry as Rc<dyn Model>), false, true)
        .unwrap_err();
    match err {
        BindError::InBindString { source, .. } => {
            assert!(
                matches!(*source, BindError::UnknownSymbol { ref name } if name == "destroy"),
                "expected UnknownSymbol, got {source:?}"
            );
        }
        other => panic!("expected wrapped resolution error, got {other:?}"),
    }
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn bind_attribute_on_plain_element_is_rejected() {
    let log = TraceLog::new();
    let (engine, _, _, _) = engine(&log);

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("section", &[("bind", "x: 1")]));
    let handle: ElemRef = root.clone();

    let err = engine.bind(&handle, None, false, true).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("section"));
    assert!(text.contains("bind=\"x: 1\""));
}

#[test]
fn dom_bind_on_custom_tag_is_rejected() {
    let log = TraceLog::new();
    let (engine, _, _, tags) = engine(&log);
    label_tag(&log, &tags);

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("t-label", &[("bind-text", "'x'")]));
    let handle: ElemRef = root.clone();

    let err = engine.bind(&handle, None, false, true).unwrap_err();
    assert!(err.to_string().contains("not allowed on custom tag"));
}

#[test]
fn unknown_binder_name_is_rejected() {
    let log = TraceLog::new();
    let (engine, _, _, _) = engine(&log);

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("span", &[("bind-blink", "'x'")]));
    let handle: ElemRef = root.clone();

    let err = engine.bind(&handle, None, false, true).unwrap_err();
    assert!(matches!(err, BindError::UnknownBinder { name } if name == "blink"));
}

#[test]
fn attr_bind_parse_error_quotes_the_full_bind_string() {
    let log = TraceLog::new();
    let (engine, _, _, tags) = engine(&log);
    label_tag(&log, &tags);

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs(
        "t-label",
        &[("bind", "label: \"hello \" + name")],
    ));
    let handle: ElemRef = root.clone();

    let err = engine.bind(&handle, None, false, true).unwrap_err();
    let text = err.to_string();
    assert!(text.contains('+'), "the offending character is named");
    assert!(
        text.contains("label: \"hello \" + name"),
        "the full bind string is quoted: {text}"
    );
}

#[test]
fn attr_bind_to_missing_field_names_field_and_model() {
    let log = TraceLog::new();
    let (engine, _, _, tags) = engine(&log);
    label_tag(&log, &tags);

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("t-label", &[("bind", "nope: 'x'")]));
    let handle: ElemRef = root.clone();

    let err = engine.bind(&handle, None, false, true).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("nope"));
    assert!(text.contains("Label"));
}

#[test]
fn attr_bind_type_mismatch_reports_both_kinds() {
    let log = TraceLog::new();
    let (engine, _, _, tags) = engine(&log);

    tags.register(
        "t-flag",
        Rc::new(TestTag::new(|_| {
            Rc::new(DynModel::new("Flag").with_field("on", Value::Bool(false))) as Rc<dyn Model>
        })),
    );

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("t-flag", &[("bind", "on: 'yes'")]));
    let handle: ElemRef = root.clone();

    let err = engine.bind(&handle, None, false, true).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("string"));
    assert!(text.contains("bool"));
}

#[test]
fn invalid_output_name_is_rejected_with_the_character() {
    let log = TraceLog::new();
    let (engine, _, _, _) = engine(&log);

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("span", &[("bind-text", "x -> a+b")]));
    let handle: ElemRef = root.clone();

    let err = engine.bind(&handle, None, false, true).unwrap_err();
    assert!(err.to_string().contains('+'));
}

#[test]
fn malformed_attr_bind_pair_is_rejected() {
    let log = TraceLog::new();
    let (engine, _, _, tags) = engine(&log);
    label_tag(&log, &tags);

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("t-label", &[("bind", "label")]));
    let handle: ElemRef = root.clone();

    let err = engine.bind(&handle, None, false, true).unwrap_err();
    assert!(err.to_string().contains(':'));
}

// ============================================================================
// Multi-model scopes
// ============================================================================

#[test]
fn bind_models_resolves_in_model_order() {
    let log = TraceLog::new();
    let (engine, text, _, _) = engine(&log);

    let first = Rc::new(DynModel::new("First").with_field("name", Value::from("one")));
    let second = Rc::new(DynModel::new("Second").with_field("name", Value::from("two")));

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("span", &[("bind-text", "name")]));
    let handle: ElemRef = root.clone();

    engine
        .bind_models(
            &handle,
            &[first as Rc<dyn Model>, second as Rc<dyn Model>],
            false,
            true,
        )
        .unwrap();
    assert_eq!(text.last_value(), Some(Value::from("one")));
}

// ============================================================================
// bind_prepare contract
// ============================================================================

#[test]
fn bind_prepare_collects_without_executing() {
    let log = TraceLog::new();
    let (engine, text, _, tags) = engine(&log);
    label_tag(&log, &tags);

    let root = TestElement::new("div");
    let wrapper = TestElement::new("section");
    wrapper.append(TestElement::with_attrs("span", &[("bind-text", "'deep'")]));
    root.append(wrapper);
    root.append(TestElement::with_attrs("t-label", &[("bind", "label: 'x'")]));
    let handle: ElemRef = root.clone();

    let scope = weft_bind::Scope::new();
    let (bind_tasks, custom_tasks) = engine.bind_prepare(&handle, &scope, true).unwrap();

    // Deep non-custom descendants are flattened into this level's
    // lists; the custom tag contributes its attr bind and an expansion
    // task, but its future contents are invisible until it expands.
    assert_eq!(bind_tasks.len(), 2);
    assert_eq!(custom_tasks.len(), 1);
    assert!(text.values().is_empty(), "prepare must not execute anything");
    assert!(log.first_index_of("prepare:").is_none());
}

#[test]
fn release_watches_disconnects_reactive_updates() {
    let log = TraceLog::new();
    let (engine, text, _, _) = engine(&log);

    let entry = todo_entry("x", true);
    let done = entry.field("done").unwrap();

    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("span", &[("bind-text", "done")]));
    let handle: ElemRef = root.clone();

    engine
        .bind(&handle, Some(entry as Rc<dyn Model>), false, true)
        .unwrap();
    assert!(engine.watch_count() > 0);

    engine.release_watches();
    done.set(Value::Bool(false));
    assert_eq!(text.values(), vec![Value::Bool(true)]);
    assert_eq!(engine.watch_count(), 0);
}

// ============================================================================
// Models behave like the sample application's
// ============================================================================

#[test]
fn toggling_through_a_model_method_updates_bound_elements() {
    let log = TraceLog::new();
    let (engine, text, _, _) = engine(&log);

    let entry = todo_entry("write tests", false);
    let root = TestElement::new("div");
    root.append(TestElement::with_attrs("li", &[("bind-text", "state")]));
    let handle: ElemRef = root.clone();

    engine
        .bind(&handle, Some(Rc::clone(&entry) as Rc<dyn Model>), false, true)
        .unwrap();
    assert_eq!(text.last_value(), Some(Value::from("")));

    let Some(Entry::Method(toggle)) = entry.lookup("toggle") else {
        panic!("toggle must be a method");
    };
    toggle.invoke(&[]).unwrap();
    assert_eq!(text.last_value(), Some(Value::from("completed")));
}
