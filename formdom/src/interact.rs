//! Simulated user interactions.
//!
//! Each helper mutates the control the way a user would and then dispatches
//! the events a browser fires for that action, in the same order.

use crate::element::{find_by_name, InputType, Node};
use crate::event::EventKind;

/// Type into a text-like control: sets the value and fires `input`.
pub fn type_text(node: &Node, text: impl Into<String>) {
    node.set_value(text);
    node.dispatch(EventKind::Input);
}

/// Edit and commit a value: fires `input` followed by `change`.
pub fn commit(node: &Node, value: impl Into<String>) {
    node.set_value(value);
    node.dispatch(EventKind::Input);
    node.dispatch(EventKind::Change);
}

/// Flip a checkbox and fire `input` then `change`.
pub fn toggle(node: &Node) {
    node.set_checked(!node.is_checked());
    node.dispatch(EventKind::Input);
    node.dispatch(EventKind::Change);
}

/// Check a radio button, unchecking every other radio of the same name
/// under `root`. Choosing an already checked radio fires nothing.
pub fn choose(root: &Node, radio: &Node) {
    if radio.is_checked() {
        return;
    }
    for other in find_by_name(root, &radio.get_name()) {
        if other.input_type() == Some(InputType::Radio) && !other.same_node(radio) {
            other.set_checked(false);
        }
    }
    radio.set_checked(true);
    radio.dispatch(EventKind::Input);
    radio.dispatch(EventKind::Change);
}

/// Request submission of a form. Returns true if no listener prevented the
/// native submission.
pub fn submit(form: &Node) -> bool {
    form.dispatch(EventKind::Submit)
}
