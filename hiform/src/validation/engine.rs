use formdom::Node;
use log::{trace, warn};

use super::result::FieldValidation;
use super::validator::{Validator, Verdict};
use crate::options::ResolvedFieldOptions;
use crate::state::{FieldValue, FormData, FormStore};

/// Accessibility attribute mirrored from the field's validity.
pub const ARIA_INVALID: &str = "aria-invalid";

/// Run `validators` in order against `value`.
///
/// Every validator runs even after one fails, so `errors` lists all
/// messages. An empty chain is valid.
pub fn run_validators(value: &FieldValue, field: &str, validators: &[Validator]) -> FieldValidation {
    let mut result = FieldValidation::valid();
    for validator in validators {
        match validator.check(value, field) {
            Verdict::Pass => {}
            Verdict::Fail => result.is_valid = false,
            Verdict::Message(message) => {
                result.is_valid = false;
                result.errors.push(message);
            }
        }
    }
    result
}

/// Validate one field from its stored value and write the outcome back.
///
/// Updates `is_valid` and `errors` together and mirrors validity onto the
/// control's `aria-invalid` attribute. The store lock is released while the
/// validators run. Returns the field's new validity.
pub fn apply_field_validation(
    control: &Node,
    field: &str,
    store: &FormStore,
    options: &ResolvedFieldOptions,
) -> bool {
    let Some(state) = store.field(field) else {
        warn!("Validation requested for unknown field '{field}'");
        return false;
    };

    let FieldValidation { is_valid, errors } =
        run_validators(&state.value, field, &options.validators);
    trace!("Validated '{field}': valid={is_valid}, errors={}", errors.len());

    store.update_field(field, |state| {
        state.is_valid = is_valid;
        state.errors = errors;
    });
    control.set_attribute(ARIA_INVALID, if is_valid { "false" } else { "true" });
    is_valid
}

/// Form-level validity: true when every field is valid.
pub fn is_form_valid(data: &FormData) -> bool {
    data.iter().all(|(_, field)| field.is_valid)
}
