//! Scopes, symbol tables, and resolved symbols.
//!
//! A [`Scope`] is an ordered chain of symbol tables searched
//! first-match-wins. Scopes are cheap to clone (shallow copy of the
//! table list) and are cloned per binding context so sibling elements
//! never share a mutable scope instance; [`Scope::merge`] appends
//! another scope's tables to compose a model scope with the engine's
//! helper scope. No table is ever mutated by a lookup.
//!
//! A successful lookup yields a [`Symbol`]: a plain value, a callable,
//! or a model field. Model-field symbols carry the field's live
//! [`Observable<Value>`] cell — the unit of reactive observation and of
//! two-way write-back.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;
use weft_reactive::Observable;

use crate::error::BindError;
use crate::model::{Entry, Method, Model};
use crate::value::Value;

/// A model field resolved by name: the watchable unit.
///
/// Carries the owning model's name for diagnostics, the field name, and
/// the live cell. The cell stays assignable for as long as any watch on
/// it lives; watches are torn down by dropping or clearing the
/// [`WatchSet`](weft_reactive::WatchSet) that holds them.
#[derive(Clone)]
pub struct FieldSymbol {
    pub owner: String,
    pub name: String,
    pub field: Observable<Value>,
}

impl fmt::Debug for FieldSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldSymbol({}.{})", self.owner, self.name)
    }
}

/// A name resolved in a scope.
#[derive(Clone)]
pub enum Symbol {
    /// A plain readable value (a registered constant).
    Value { name: String, value: Value },
    /// A helper function or model method.
    Callable(Rc<Method>),
    /// A model field: readable, assignable, watchable.
    Field(FieldSymbol),
}

impl Symbol {
    /// Read the symbol as a value. A callable reads as a
    /// [`Value::Func`] — that is how event binders receive the handler
    /// a bare method name refers to.
    pub fn value(&self) -> Result<Value, BindError> {
        match self {
            Self::Value { value, .. } => Ok(value.clone()),
            Self::Field(fs) => Ok(fs.field.get()),
            Self::Callable(m) => Ok(Value::Func(Rc::clone(m))),
        }
    }

    /// Invoke the symbol. Callables invoke directly; a field may be
    /// invoked only if it currently holds a function value.
    pub fn call(&self, args: &[Value]) -> Result<Value, BindError> {
        match self {
            Self::Callable(m) => m.invoke(args),
            Self::Value { name, value } => match value.as_func() {
                Some(m) => m.invoke(args),
                None => Err(BindError::NotCallable { name: name.clone() }),
            },
            Self::Field(fs) => match fs.field.get().as_func() {
                Some(m) => m.invoke(args),
                None => Err(BindError::NotCallable {
                    name: fs.name.clone(),
                }),
            },
        }
    }

    /// The watchable field behind this symbol, if it has one.
    #[must_use]
    pub fn bindable(&self) -> Option<FieldSymbol> {
        match self {
            Self::Field(fs) => Some(fs.clone()),
            _ => None,
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value { name, .. } => write!(f, "Value({name})"),
            Self::Callable(m) => write!(f, "Callable({})", m.name()),
            Self::Field(fs) => write!(f, "{fs:?}"),
        }
    }
}

/// A source of symbols, searched by the scope in chain order.
pub trait SymbolTable {
    fn lookup(&self, name: &str) -> Option<Symbol>;
}

/// A static name → symbol map for helper functions and constants.
///
/// Registration happens during engine setup; re-registering a name is a
/// configuration bug and panics.
#[derive(Default)]
pub struct HelperTable {
    entries: RefCell<AHashMap<String, Symbol>>,
}

impl HelperTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a helper function.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered — helpers are installed
    /// once at setup, never replaced at runtime.
    pub fn register(&self, method: Method) {
        let name = method.name().to_string();
        let mut entries = self.entries.borrow_mut();
        assert!(
            !entries.contains_key(&name),
            "helper with name `{name}` already exists"
        );
        entries.insert(name, Symbol::Callable(Rc::new(method)));
    }

    /// Register a named constant value.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered.
    pub fn register_value(&self, name: impl Into<String>, value: Value) {
        let name = name.into();
        let mut entries = self.entries.borrow_mut();
        assert!(
            !entries.contains_key(&name),
            "helper with name `{name}` already exists"
        );
        entries.insert(name.clone(), Symbol::Value { name, value });
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.borrow().contains_key(name)
    }
}

impl SymbolTable for HelperTable {
    fn lookup(&self, name: &str) -> Option<Symbol> {
        self.entries.borrow().get(name).cloned()
    }
}

/// A symbol table backed by a live model.
///
/// Resolution inspects the model at lookup time. An absent model is a
/// clean miss — "no model" reads as "symbol not found", never a crash —
/// so binding against a null model is legal and resolves only what the
/// rest of the chain provides.
pub struct ModelTable {
    model: Option<Rc<dyn Model>>,
}

impl ModelTable {
    #[must_use]
    pub fn new(model: Option<Rc<dyn Model>>) -> Self {
        Self { model }
    }
}

impl SymbolTable for ModelTable {
    fn lookup(&self, name: &str) -> Option<Symbol> {
        let model = self.model.as_ref()?;
        match model.lookup(name)? {
            Entry::Field(field) => Some(Symbol::Field(FieldSymbol {
                owner: model.model_name().to_string(),
                name: name.to_string(),
                field,
            })),
            Entry::Method(method) => Some(Symbol::Callable(method)),
        }
    }
}

/// An ordered chain of symbol tables.
#[derive(Clone, Default)]
pub struct Scope {
    tables: Vec<Rc<dyn SymbolTable>>,
}

impl Scope {
    #[must_use]
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// A scope resolving against one model. `None` yields an empty
    /// scope — a null model binds legally and resolves nothing.
    #[must_use]
    pub fn for_model(model: Option<Rc<dyn Model>>) -> Self {
        let mut scope = Self::new();
        if model.is_some() {
            scope.push_table(Rc::new(ModelTable::new(model)));
        }
        scope
    }

    /// A scope resolving against several models, searched in order.
    #[must_use]
    pub fn for_models(models: &[Rc<dyn Model>]) -> Self {
        let mut scope = Self::new();
        for model in models {
            scope.push_table(Rc::new(ModelTable::new(Some(Rc::clone(model)))));
        }
        scope
    }

    /// Append a table to the end of the chain.
    pub fn push_table(&mut self, table: Rc<dyn SymbolTable>) {
        self.tables.push(table);
    }

    /// Append all of `other`'s tables to this scope.
    pub fn merge(&mut self, other: &Scope) {
        self.tables.extend(other.tables.iter().cloned());
    }

    /// Resolve `name`, first match wins.
    pub fn lookup(&self, name: &str) -> Result<Symbol, BindError> {
        self.tables
            .iter()
            .find_map(|t| t.lookup(name))
            .ok_or_else(|| BindError::UnknownSymbol {
                name: name.to_string(),
            })
    }

    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("tables", &self.tables.len())
            .finish()
    }
}
