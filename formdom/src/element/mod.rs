mod kind;
mod node;

pub use kind::{InputType, Tag};
pub use node::Node;

/// Find an element by ID in the tree.
pub fn find_by_id(root: &Node, id: &str) -> Option<Node> {
    if root.get_id() == id {
        return Some(root.clone());
    }

    for child in root.child_nodes() {
        if let Some(found) = find_by_id(&child, id) {
            return Some(found);
        }
    }

    None
}

/// Collect every element carrying `name`, in document order.
pub fn find_by_name(root: &Node, name: &str) -> Vec<Node> {
    let mut result = Vec::new();
    find_by_name_recursive(root, name, &mut result);
    result
}

fn find_by_name_recursive(node: &Node, name: &str, result: &mut Vec<Node>) {
    if node.get_name() == name {
        result.push(node.clone());
    }
    for child in node.child_nodes() {
        find_by_name_recursive(&child, name, result);
    }
}
