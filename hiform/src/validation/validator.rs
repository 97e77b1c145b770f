use std::fmt;
use std::sync::Arc;

use crate::state::FieldValue;

/// Outcome of a single validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The value is acceptable.
    Pass,
    /// The value is rejected without a message.
    Fail,
    /// The value is rejected; the message is added to the field's errors.
    Message(String),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// The error message, if the verdict carries one.
    pub fn into_message(self) -> Option<String> {
        match self {
            Self::Message(message) => Some(message),
            Self::Pass | Self::Fail => None,
        }
    }
}

impl From<bool> for Verdict {
    fn from(passed: bool) -> Self {
        if passed { Self::Pass } else { Self::Fail }
    }
}

impl From<String> for Verdict {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for Verdict {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<Result<(), String>> for Verdict {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::Pass,
            Err(message) => Self::Message(message),
        }
    }
}

type CheckFn = dyn Fn(&FieldValue, &str) -> Verdict + Send + Sync;

/// A validation function over a field's value and name.
///
/// Cheap to clone; the same validator can be shared by several fields,
/// which is how global validators reach every field.
#[derive(Clone)]
pub struct Validator {
    check: Arc<CheckFn>,
}

impl Validator {
    /// Wrap a closure returning anything convertible into a [`Verdict`]:
    /// `bool`, `String`, `&str` or `Result<(), String>`.
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn(&FieldValue, &str) -> R + Send + Sync + 'static,
        R: Into<Verdict>,
    {
        let check: Arc<CheckFn> =
            Arc::new(move |value: &FieldValue, field: &str| f(value, field).into());
        Self { check }
    }

    /// Run the validator. Panics inside the closure are not caught.
    pub fn check(&self, value: &FieldValue, field: &str) -> Verdict {
        (self.check)(value, field)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}
