//! Field configuration and the global/field merge.
//!
//! Options come in two layers: global options apply to every field and
//! field options apply to one field by name. [`resolve`] merges both into a
//! [`ResolvedFieldOptions`] once per field at session start:
//!
//! - scalars (`validate_on`, `validate_dirty_only`, initial flags): field wins,
//!   then global, then the engine default;
//! - `validators`: global first, field appended;
//! - `emit_on`: global first, field appended; an empty result means "emit on
//!   every event".

use std::collections::HashMap;
use std::sync::Arc;

use formdom::EventKind;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::validation::Validator;

/// Event that synchronizes the value and triggers validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidateOn {
    /// Validate when the value is committed (default).
    #[default]
    Change,
    /// Validate on every keystroke.
    Input,
}

impl ValidateOn {
    /// The host event the change handler listens to.
    pub fn event(self) -> EventKind {
        match self {
            ValidateOn::Change => EventKind::Change,
            ValidateOn::Input => EventKind::Input,
        }
    }
}

/// Which events a field publishes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EmitFilter {
    /// Publish every event.
    #[default]
    Any,
    /// Publish only the listed events.
    Only(Vec<EventKind>),
}

impl EmitFilter {
    /// Whether `kind` may be published. Submission is never filtered.
    pub fn allows(&self, kind: EventKind) -> bool {
        match self {
            EmitFilter::Any => true,
            EmitFilter::Only(kinds) => kind == EventKind::Submit || kinds.contains(&kind),
        }
    }
}

/// Options for one field, or for every field when used globally.
///
/// Every setting is optional so layers can be merged; unset values fall
/// through to the next layer. The declarative settings deserialize from the
/// camelCase keys `validateOn`, `validateDirtyOnly`, `emitOn`,
/// `isInitiallyValid`, `isInitiallyTouched` and `isInitiallyDirty`.
/// Validators are code only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FieldOptions {
    /// Run in order on every validation pass.
    #[serde(skip)]
    pub validators: Vec<Validator>,

    /// Event that triggers value sync and validation. `change` is
    /// recommended; `input` validates on every keystroke.
    pub validate_on: Option<ValidateOn>,

    /// When true (the default), the first blur of a field that never
    /// changed does not validate it.
    pub validate_dirty_only: Option<bool>,

    /// Events to publish. Submission is always published.
    #[serde(deserialize_with = "deserialize_emit_on")]
    pub emit_on: Option<Vec<EventKind>>,

    pub is_initially_valid: Option<bool>,
    pub is_initially_touched: Option<bool>,
    pub is_initially_dirty: Option<bool>,
}

impl FieldOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator.
    pub fn validator(mut self, validator: impl Into<Validator>) -> Self {
        self.validators.push(validator.into());
        self
    }

    /// Append several validators, keeping their order.
    pub fn validators(mut self, validators: impl IntoIterator<Item = Validator>) -> Self {
        self.validators.extend(validators);
        self
    }

    pub fn validate_on(mut self, validate_on: ValidateOn) -> Self {
        self.validate_on = Some(validate_on);
        self
    }

    pub fn validate_dirty_only(mut self, dirty_only: bool) -> Self {
        self.validate_dirty_only = Some(dirty_only);
        self
    }

    pub fn emit_on(mut self, events: impl IntoIterator<Item = EventKind>) -> Self {
        self.emit_on = Some(events.into_iter().collect());
        self
    }

    pub fn initially_valid(mut self, valid: bool) -> Self {
        self.is_initially_valid = Some(valid);
        self
    }

    pub fn initially_touched(mut self, touched: bool) -> Self {
        self.is_initially_touched = Some(touched);
        self
    }

    pub fn initially_dirty(mut self, dirty: bool) -> Self {
        self.is_initially_dirty = Some(dirty);
        self
    }
}

fn deserialize_emit_on<'de, D>(deserializer: D) -> Result<Option<Vec<EventKind>>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Option::<Vec<String>>::deserialize(deserializer)?;
    names
        .map(|names| {
            names
                .iter()
                .map(|name| name.parse::<EventKind>().map_err(serde::de::Error::custom))
                .collect()
        })
        .transpose()
}

/// Per-field options keyed by field name.
pub type FieldOptionsMap = HashMap<String, FieldOptions>;

/// Fully merged options for one field. Immutable for the session.
#[derive(Debug, Clone)]
pub struct ResolvedFieldOptions {
    pub validators: Vec<Validator>,
    pub validate_on: ValidateOn,
    pub validate_dirty_only: bool,
    pub emit_on: EmitFilter,
    pub is_initially_valid: bool,
    pub is_initially_touched: bool,
    pub is_initially_dirty: bool,
}

impl ResolvedFieldOptions {
    /// The host event bound to the change handler.
    pub fn change_event(&self) -> EventKind {
        self.validate_on.event()
    }

    pub fn emits(&self, kind: EventKind) -> bool {
        self.emit_on.allows(kind)
    }
}

/// Resolved options per field name, in enumeration order.
pub type ResolvedTable = IndexMap<String, Arc<ResolvedFieldOptions>>;

/// Merge global and field options.
pub fn resolve(
    global: Option<&FieldOptions>,
    field: Option<&FieldOptions>,
) -> ResolvedFieldOptions {
    fn pick<T: Copy>(
        global: Option<&FieldOptions>,
        field: Option<&FieldOptions>,
        get: impl Fn(&FieldOptions) -> Option<T>,
    ) -> Option<T> {
        field.and_then(&get).or_else(|| global.and_then(&get))
    }

    let validators = global
        .into_iter()
        .chain(field)
        .flat_map(|options| options.validators.iter().cloned())
        .collect();

    let emit_on: Vec<EventKind> = global
        .into_iter()
        .chain(field)
        .filter_map(|options| options.emit_on.as_ref())
        .flatten()
        .copied()
        .collect();

    ResolvedFieldOptions {
        validators,
        validate_on: pick(global, field, |o| o.validate_on).unwrap_or_default(),
        validate_dirty_only: pick(global, field, |o| o.validate_dirty_only).unwrap_or(true),
        emit_on: if emit_on.is_empty() {
            EmitFilter::Any
        } else {
            EmitFilter::Only(emit_on)
        },
        is_initially_valid: pick(global, field, |o| o.is_initially_valid).unwrap_or(false),
        is_initially_touched: pick(global, field, |o| o.is_initially_touched).unwrap_or(false),
        is_initially_dirty: pick(global, field, |o| o.is_initially_dirty).unwrap_or(false),
    }
}

/// Resolve options for every named field, once per name.
pub fn resolve_fields<'a>(
    names: impl IntoIterator<Item = &'a str>,
    global: Option<&FieldOptions>,
    fields: &FieldOptionsMap,
) -> ResolvedTable {
    let mut table = ResolvedTable::new();
    for name in names {
        if !table.contains_key(name) {
            let resolved = resolve(global, fields.get(name));
            table.insert(name.to_string(), Arc::new(resolved));
        }
    }
    table
}
