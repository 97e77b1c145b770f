//! Error types.
//!
//! Validation failures are not errors: they are recorded as data on the
//! field (`is_valid`, `errors`). The variants here are construction and
//! contract failures that the caller must handle.

use thiserror::Error;

/// Errors raised by the form engine.
#[derive(Debug, Clone, Error)]
pub enum HiFormError {
    /// No container was supplied when building a session.
    #[error("Please provide a valid <form> element.")]
    InvalidContainer,

    /// A pattern validator was built from a string that is not a valid regex.
    #[error("Invalid validation pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern source.
        pattern: String,
        /// The regex compilation error.
        source: regex::Error,
    },

    /// Listeners were detached for a control that was never attached.
    #[error("No listeners recorded for field '{field}'; attach and detach must use the same controls")]
    ListenerContract {
        /// Name of the field whose control has no listener entry.
        field: String,
    },
}

impl HiFormError {
    /// Creates a new invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Creates a new listener contract error.
    pub fn listener_contract(field: impl Into<String>) -> Self {
        Self::ListenerContract {
            field: field.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type HiFormResult<T> = Result<T, HiFormError>;
