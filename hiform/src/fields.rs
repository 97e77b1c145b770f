//! Field enumeration.

use formdom::{collect_controls, Node};

use crate::error::{HiFormError, HiFormResult};

/// Every editable control under `container`, in document order.
///
/// Returns text-like inputs, checkboxes, radios, textareas and selects.
/// Submit, button, reset and image inputs carry no data and are skipped.
pub fn enumerate(container: Option<&Node>) -> HiFormResult<Vec<Node>> {
    let container = container.ok_or(HiFormError::InvalidContainer)?;
    Ok(collect_controls(container))
}
