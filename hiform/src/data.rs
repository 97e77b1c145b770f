//! Initial form data built from live controls.

use formdom::{InputType, Node, Tag};

use crate::options::{ResolvedFieldOptions, ResolvedTable};
use crate::state::{FieldState, FieldValue, FormData};

/// Build the initial [`FormData`] for `controls`, in order.
///
/// Radios sharing a name collapse into one field whose value is the
/// checked radio's value. Controls are processed strictly in order, so an
/// unchecked radio carries forward whatever value earlier radios of the
/// same name produced (empty text if none was checked yet).
///
/// Initial flags come from the field's resolved options; a control whose
/// name is missing from `resolved` starts with every flag false.
pub fn create_form_data(controls: &[Node], resolved: &ResolvedTable) -> FormData {
    let mut data = FormData::new();

    for control in controls {
        let name = control.get_name();
        let input_kind = input_kind(control);
        let previous = data.get(&name).map(|field| field.value.clone());

        let (value, checked) = match input_kind {
            Some(InputType::Checkbox) => {
                let checked = control.is_checked();
                (FieldValue::Bool(checked), Some(checked))
            }
            Some(InputType::Radio) if control.is_checked() => {
                (FieldValue::Text(control.get_value()), None)
            }
            Some(InputType::Radio) => (previous.unwrap_or_default(), None),
            _ => (FieldValue::Text(control.get_value()), None),
        };

        let mut field = FieldState {
            value,
            checked,
            input_kind,
            ..Default::default()
        };
        if let Some(options) = resolved.get(&name) {
            apply_initial_flags(&mut field, options);
        }
        data.insert(name, field);
    }

    data
}

/// Native input type of an `<input>`; textareas and selects have none.
fn input_kind(control: &Node) -> Option<InputType> {
    match control.tag() {
        Tag::Input => control.input_type(),
        _ => None,
    }
}

fn apply_initial_flags(field: &mut FieldState, options: &ResolvedFieldOptions) {
    field.is_valid = options.is_initially_valid;
    field.is_touched = options.is_initially_touched;
    field.is_dirty = options.is_initially_dirty;
}
