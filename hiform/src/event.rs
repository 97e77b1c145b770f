use formdom::EventKind;
use serde::{Serialize, Serializer};

use crate::state::{FormData, FormStore};
use crate::validation::is_form_valid;

/// Form-level status published alongside the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStatus {
    /// True when every field is valid.
    pub is_valid: bool,
}

/// Payload of every publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormEvent {
    /// Host event that caused the publication: `change` or `input`, `focus`,
    /// `blur` or `submit`.
    #[serde(serialize_with = "serialize_event_kind")]
    pub event: EventKind,
    pub form_data: FormData,
    pub form_state: FormStatus,
}

impl FormEvent {
    /// Capture a snapshot of `store` tagged with `event`.
    ///
    /// Validity is computed from the same snapshot, so `form_state` always
    /// agrees with `form_data`.
    pub fn capture(event: EventKind, store: &FormStore) -> Self {
        let form_data = store.snapshot();
        let form_state = FormStatus {
            is_valid: is_form_valid(&form_data),
        };
        Self {
            event,
            form_data,
            form_state,
        }
    }
}

fn serialize_event_kind<S: Serializer>(kind: &EventKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(kind.as_str())
}
