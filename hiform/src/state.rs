//! Field and form state, plus the shared store handlers mutate.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use formdom::InputType;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::validation::is_form_valid;

/// Current value of a field.
///
/// Checkboxes hold a boolean, every other control holds text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl FieldValue {
    /// Borrow the text, `None` for boolean values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Text(_) => None,
            Self::Bool(value) => Some(*value),
        }
    }

    /// Empty text and `false` are "empty"; `required` rejects them.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Bool(value) => !value,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// State of one logical field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldState {
    pub value: FieldValue,
    /// Mirrors the native checked flag; only present for checkboxes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    pub is_valid: bool,
    pub is_touched: bool,
    pub is_focused: bool,
    pub is_dirty: bool,
    pub errors: Vec<String>,
    /// Native input type, `None` for textareas and selects.
    #[serde(serialize_with = "serialize_input_kind")]
    pub input_kind: Option<InputType>,
}

fn serialize_input_kind<S: Serializer>(
    kind: &Option<InputType>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match kind {
        Some(kind) => serializer.serialize_str(kind.as_str()),
        None => serializer.serialize_none(),
    }
}

/// All fields of a form keyed by name, in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FormData {
    fields: IndexMap<String, FieldState>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FieldState> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldState> {
        self.fields.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Insert or replace a field. Replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, field: FieldState) {
        self.fields.insert(name.into(), field);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldState)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Shared, interior-mutable handle to a session's [`FormData`].
///
/// Every listener of a session holds a clone; cloning is cheap and all
/// clones see the same data. Locks are only held for the duration of a
/// single read or update, never across validator or subscriber calls.
#[derive(Debug, Clone, Default)]
pub struct FormStore {
    inner: Arc<RwLock<FormData>>,
}

impl FormStore {
    pub fn new(data: FormData) -> Self {
        Self {
            inner: Arc::new(RwLock::new(data)),
        }
    }

    /// Run a closure against the current data.
    pub fn with<R>(&self, f: impl FnOnce(&FormData) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Get a clone of the current data.
    pub fn snapshot(&self) -> FormData {
        self.with(FormData::clone)
    }

    pub fn field(&self, name: &str) -> Option<FieldState> {
        self.with(|data| data.get(name).cloned())
    }

    /// Update one field in place. Returns `None` if the field is unknown.
    pub fn update_field<R>(&self, name: &str, f: impl FnOnce(&mut FieldState) -> R) -> Option<R> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.get_mut(name).map(f)
    }

    pub fn field_names(&self) -> Vec<String> {
        self.with(|data| data.names().map(str::to_string).collect())
    }

    /// Form-level validity: every field is valid.
    pub fn is_valid(&self) -> bool {
        self.with(is_form_valid)
    }

    pub fn len(&self) -> usize {
        self.with(FormData::len)
    }

    pub fn is_empty(&self) -> bool {
        self.with(FormData::is_empty)
    }
}
