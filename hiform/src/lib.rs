//! Reactive form state for host control trees.
//!
//! A [`HiForm`] session binds to a form element, keeps a normalized state
//! per field (value, focus, touched, dirty, validity, errors) in sync with
//! user events, runs configurable validators and publishes every change on
//! a replaying [`channel::Channel`].
//!
//! ```ignore
//! use hiform::prelude::*;
//!
//! let mut session = HiForm::new(
//!     HiFormParams::new(form).field("email", FieldOptions::new().validator(required())),
//! )?;
//! session.subscribe(|event| println!("{}: valid={}", event.event, event.form_state.is_valid));
//! ```

pub mod channel;
pub mod data;
pub mod error;
pub mod event;
pub mod fields;
pub mod listeners;
pub mod options;
pub mod session;
pub mod state;
pub mod validation;

pub use error::{HiFormError, HiFormResult};
pub use session::{HiForm, HiFormParams};

pub mod prelude {
    pub use crate::channel::{Hub, SubscriptionId};
    pub use crate::error::{HiFormError, HiFormResult};
    pub use crate::event::{FormEvent, FormStatus};
    pub use crate::options::{EmitFilter, FieldOptions, FieldOptionsMap, ValidateOn};
    pub use crate::session::{HiForm, HiFormParams};
    pub use crate::state::{FieldState, FieldValue, FormData, FormStore};
    pub use crate::validation::{
        email, max_length, min_length, pattern, required, try_pattern, ValidationResult,
        Validator, Verdict,
    };

    pub use formdom::{EventKind, InputType, Node};
}
