//! Typed value tree behind the catalog text format.
//!
//! A [`Value`] is a node that is either void, an integer, a float, a string or an
//! ordered array of child values. Every node may carry a name; an empty name means
//! the node is unnamed.
//!
//! ```
//! use i18n_catalog_updater::value::Value;
//!
//! let mut entry = Value::new();
//! entry.set_array();
//!
//! let mut original = Value::named("o");
//! original.set_string("Hello");
//! entry.push(&original);
//!
//! assert_eq!(entry.element("o").and_then(Value::as_str), Some("Hello"));
//! ```

/// Catalog text parser
pub mod parser;
/// Catalog text pretty printer
pub mod serializer;

use std::fmt;

pub use parser::{
    Diagnostic,
    DiagnosticKind,
    ParseError,
    ParseOutcome,
};

/// Payload of a [`Value`]. Switching kind discards the previous payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ValueKind {
    #[default]
    Void,
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<Value>),
}

/// A possibly named node of the value tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Value {
    name: String,
    kind: ValueKind,
}

impl Value {
    /// Creates an unnamed void value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a void value with the given name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: ValueKind::Void }
    }

    /// Parses catalog text into a value tree.
    ///
    /// Parsing is lenient: the outcome always holds a best-effort value, plus the
    /// diagnostics for anything that had to be skipped or repaired.
    #[must_use]
    pub fn parse(text: &str) -> ParseOutcome {
        parser::parse(text)
    }

    /// Renders the value as catalog text, starting at nesting level zero.
    #[must_use]
    pub fn to_text(&self) -> String {
        serializer::to_text(self, 0)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub const fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn set_void(&mut self) {
        self.kind = ValueKind::Void;
    }

    pub fn set_int(&mut self, value: i64) {
        self.kind = ValueKind::Int(value);
    }

    pub fn set_float(&mut self, value: f64) {
        self.kind = ValueKind::Float(value);
    }

    /// Stores a string payload.
    ///
    /// Raw line breaks are rewritten to the two characters `\n` so that a string
    /// always serializes on a single line. The rewrite is not undone by accessors.
    pub fn set_string(&mut self, value: &str) {
        self.kind = ValueKind::Str(value.replace('\n', "\\n"));
    }

    /// Turns the value into an empty array.
    pub fn set_array(&mut self) {
        self.kind = ValueKind::Array(Vec::new());
    }

    /// Appends an independent copy of `child`.
    ///
    /// A value that is not yet an array becomes an empty array first.
    pub fn push(&mut self, child: &Self) {
        self.push_owned(child.clone());
    }

    /// Appends `child` without copying it, for callers that already own it.
    pub(crate) fn push_owned(&mut self, child: Self) {
        if let ValueKind::Array(elements) = &mut self.kind {
            elements.push(child);
        } else {
            self.kind = ValueKind::Array(vec![child]);
        }
    }

    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self.kind, ValueKind::Void)
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self.kind, ValueKind::Array(_))
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self.kind {
            ValueKind::Int(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self.kind {
            ValueKind::Float(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Children of an array value; empty for every other kind.
    #[must_use]
    pub fn elements(&self) -> &[Self] {
        match &self.kind {
            ValueKind::Array(elements) => elements,
            _ => &[],
        }
    }

    /// Returns the first child with the given name.
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&Self> {
        self.elements().iter().find(|child| child.name == name)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
