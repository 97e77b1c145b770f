//! Validation engine.
//!
//! A field's validators run in order against its current value. Each one
//! returns a [`Verdict`]: pass, fail silently, or fail with a message. The
//! field is valid only when every validator passes, and its `errors` hold
//! the messages of the failing ones in validator order.
//!
//! # Example
//!
//! ```ignore
//! use hiform::validation::{min_length, required, Validator};
//!
//! let options = FieldOptions::new()
//!     .validator(required())
//!     .validator(min_length(5).message("Too short"))
//!     .validator(Validator::new(|value, _field| value.as_text() != Some("admin")));
//! ```

mod engine;
mod result;
mod rules;
mod validator;

pub use engine::{apply_field_validation, is_form_valid, run_validators, ARIA_INVALID};
pub use result::{FieldError, FieldValidation, ValidationResult};
pub use rules::{email, max_length, min_length, pattern, required, try_pattern, Rule};
pub use validator::{Validator, Verdict};
