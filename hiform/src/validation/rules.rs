//! Built-in validators.
//!
//! Every rule has a default message naming the field; override it with
//! [`Rule::message`]. Except for [`required`], rules accept empty values so
//! they compose with `required` instead of duplicating its error.

use std::sync::Arc;

use regex::Regex;

use super::validator::{Validator, Verdict};
use crate::error::{HiFormError, HiFormResult};
use crate::state::FieldValue;

type TestFn = dyn Fn(&FieldValue) -> bool + Send + Sync;
type MessageFn = dyn Fn(&str) -> String + Send + Sync;

/// A built-in validation rule with an optional custom message.
#[derive(Clone)]
pub struct Rule {
    test: Arc<TestFn>,
    default_message: Arc<MessageFn>,
    message: Option<String>,
}

impl Rule {
    fn new(
        test: impl Fn(&FieldValue) -> bool + Send + Sync + 'static,
        default_message: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            test: Arc::new(test),
            default_message: Arc::new(default_message),
            message: None,
        }
    }

    /// Replace the default error message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn check(&self, value: &FieldValue, field: &str) -> Verdict {
        if (self.test)(value) {
            return Verdict::Pass;
        }
        let message = match &self.message {
            Some(message) => message.clone(),
            None => (self.default_message)(field),
        };
        Verdict::Message(message)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl From<Rule> for Validator {
    fn from(rule: Rule) -> Self {
        Validator::new(move |value: &FieldValue, field: &str| rule.check(value, field))
    }
}

/// Text must be non-empty; a checkbox must be checked.
pub fn required() -> Rule {
    Rule::new(
        |value| !value.is_empty(),
        |field| format!("{field} field is required."),
    )
}

/// Text must be at least `min` characters long.
pub fn min_length(min: usize) -> Rule {
    Rule::new(
        move |value| match value.as_text() {
            Some(text) => text.is_empty() || text.chars().count() >= min,
            None => true,
        },
        move |field| format!("{field} field needs to contain at least {min} characters."),
    )
}

/// Text must be at most `max` characters long.
pub fn max_length(max: usize) -> Rule {
    Rule::new(
        move |value| value.as_text().is_none_or(|text| text.chars().count() <= max),
        move |field| format!("{field} field cannot contain more than {max} characters."),
    )
}

/// Text must match `regex`.
pub fn pattern(regex: Regex) -> Rule {
    Rule::new(
        move |value| match value.as_text() {
            Some(text) => text.is_empty() || regex.is_match(text),
            None => true,
        },
        |field| format!("{field} field does not match the expected format."),
    )
}

/// Text must match the regex `source`, compiled up front.
pub fn try_pattern(source: &str) -> HiFormResult<Rule> {
    let regex = Regex::new(source).map_err(|e| HiFormError::invalid_pattern(source, e))?;
    Ok(pattern(regex))
}

/// Text must be a valid email address.
pub fn email() -> Rule {
    Rule::new(
        |value| match value.as_text() {
            Some(text) => text.is_empty() || email_address::EmailAddress::is_valid(text),
            None => true,
        },
        |field| format!("{field} field must be a valid email address."),
    )
}
