use crate::element::{Node, Tag};

/// Whether a node is an editable form control: a data-carrying `<input>`,
/// a `<textarea>` or a `<select>`.
pub fn is_control(node: &Node) -> bool {
    match node.tag() {
        Tag::Input => node.input_type().is_some_and(|kind| kind.holds_data()),
        Tag::TextArea | Tag::Select => true,
        Tag::Form | Tag::Button | Tag::Group => false,
    }
}

/// Collect all editable controls under `root` (inclusive) in document order.
pub fn collect_controls(root: &Node) -> Vec<Node> {
    let mut result = Vec::new();
    collect_controls_recursive(root, &mut result);
    result
}

fn collect_controls_recursive(node: &Node, result: &mut Vec<Node>) {
    if is_control(node) {
        result.push(node.clone());
    }
    for child in node.child_nodes() {
        collect_controls_recursive(&child, result);
    }
}
