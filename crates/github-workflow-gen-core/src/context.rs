//! Render context: the values a template can reference by name.
//!
//! A [`Context`] maps names to a closed set of [`Value`] variants. Templates
//! never see the typed workflow options directly; each workflow kind flattens
//! its options into a context first (see [`crate::options`]).
//!
//! Bindings are kept sorted by name, not in the order they were inserted.
//! That is also the key order of the context JSON logged at trace level.
//! Order inside a value is preserved: list items and records render in the
//! order they were given.

use std::collections::BTreeMap;

use serde::Serialize;

/// A flat record of named string fields, e.g. `{ Artifact, Package }`.
pub type Record = BTreeMap<String, String>;

/// A value bound to a name in the render context.
///
/// Serializes untagged, so a context logs as a plain JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Bool(bool),
    List(Vec<String>),
    Records(Vec<Record>),
}

impl Value {
    /// Mustache truthiness: unbound, `false`, `""` and empty lists are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Str(s) => !s.is_empty(),
            Self::Bool(b) => *b,
            Self::List(items) => !items.is_empty(),
            Self::Records(records) => !records.is_empty(),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<Record>> for Value {
    fn from(records: Vec<Record>) -> Self {
        Self::Records(records)
    }
}

/// Name → value bindings for a single render.
///
/// Names are unique and held in sorted order. Rendering only ever looks
/// names up, so the order has no effect on output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Context {
    values: BTreeMap<String, Value>,
}

impl Context {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any earlier binding.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// The value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no names are bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One level of the lookup chain used while rendering.
///
/// The root scope is the context itself; every iteration of a list section
/// pushes an item scope on top of it.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Scope<'a> {
    Root(&'a Context),
    Item(Item<'a>),
}

/// The current element of a list section.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Item<'a> {
    Str(&'a str),
    Record(&'a Record),
}

/// A borrowed view of whatever a name resolved to.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Resolved<'a> {
    Str(&'a str),
    Bool(bool),
    List(&'a [String]),
    Records(&'a [Record]),
    Record(&'a Record),
}

impl<'a> Resolved<'a> {
    fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Str(s) => Self::Str(s),
            Value::Bool(b) => Self::Bool(*b),
            Value::List(items) => Self::List(items),
            Value::Records(records) => Self::Records(records),
        }
    }

    pub(crate) fn is_truthy(&self) -> bool {
        match self {
            Self::Str(s) => !s.is_empty(),
            Self::Bool(b) => *b,
            Self::List(items) => !items.is_empty(),
            Self::Records(records) => !records.is_empty(),
            Self::Record(_) => true,
        }
    }
}

/// Resolve `name` against the scope chain, innermost scope first.
///
/// `.` names the innermost item; record fields shadow context names.
pub(crate) fn lookup<'a>(scopes: &[Scope<'a>], name: &str) -> Option<Resolved<'a>> {
    for scope in scopes.iter().rev() {
        match *scope {
            Scope::Item(Item::Str(s)) => {
                if name == "." {
                    return Some(Resolved::Str(s));
                }
            }
            Scope::Item(Item::Record(record)) => {
                if name == "." {
                    return Some(Resolved::Record(record));
                }
                if let Some(field) = record.get(name) {
                    return Some(Resolved::Str(field));
                }
            }
            Scope::Root(context) => {
                if let Some(value) = context.get(name) {
                    return Some(Resolved::from_value(value));
                }
            }
        }
    }
    None
}
