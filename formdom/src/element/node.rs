use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{InputType, Tag};
use crate::event::{same_listener, Event, EventKind, Listener};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

struct NodeData {
    // Identity
    id: String,
    tag: Tag,
    input_type: Option<InputType>,
    name: String,

    // Live control state
    value: String,
    checked: bool,

    attributes: HashMap<String, String>,
    children: Vec<Node>,
    listeners: HashMap<EventKind, Vec<Listener>>,
}

impl NodeData {
    fn new(prefix: &str, tag: Tag) -> Self {
        Self {
            id: generate_id(prefix),
            tag,
            input_type: None,
            name: String::new(),
            value: String::new(),
            checked: false,
            attributes: HashMap::new(),
            children: Vec::new(),
            listeners: HashMap::new(),
        }
    }
}

/// Shared handle to an element in the host tree.
///
/// Cloning a `Node` clones the reference, not the element: every clone sees
/// the same value, attributes and listeners.
#[derive(Clone)]
pub struct Node {
    inner: Arc<RwLock<NodeData>>,
}

impl Node {
    fn from_data(data: NodeData) -> Self {
        Self {
            inner: Arc::new(RwLock::new(data)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, NodeData> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, NodeData> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn form() -> Self {
        Self::from_data(NodeData::new("form", Tag::Form))
    }

    pub fn group() -> Self {
        Self::from_data(NodeData::new("group", Tag::Group))
    }

    pub fn input(input_type: InputType) -> Self {
        let mut data = NodeData::new("input", Tag::Input);
        data.input_type = Some(input_type);
        Self::from_data(data)
    }

    pub fn text_input() -> Self {
        Self::input(InputType::Text)
    }

    pub fn checkbox() -> Self {
        Self::input(InputType::Checkbox)
    }

    pub fn radio() -> Self {
        Self::input(InputType::Radio)
    }

    pub fn submit_input() -> Self {
        Self::input(InputType::Submit)
    }

    pub fn textarea() -> Self {
        Self::from_data(NodeData::new("textarea", Tag::TextArea))
    }

    pub fn select() -> Self {
        Self::from_data(NodeData::new("select", Tag::Select))
    }

    pub fn button() -> Self {
        Self::from_data(NodeData::new("button", Tag::Button))
    }

    // Builders

    pub fn id(self, id: impl Into<String>) -> Self {
        self.write().id = id.into();
        self
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.write().name = name.into();
        self
    }

    pub fn value(self, value: impl Into<String>) -> Self {
        self.write().value = value.into();
        self
    }

    pub fn checked(self, checked: bool) -> Self {
        self.write().checked = checked;
        self
    }

    pub fn attr(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.write().attributes.insert(key.into(), value.into());
        self
    }

    pub fn child(self, child: Node) -> Self {
        self.write().children.push(child);
        self
    }

    pub fn children(self, new_children: impl IntoIterator<Item = Node>) -> Self {
        self.write().children.extend(new_children);
        self
    }

    // Accessors

    pub fn get_id(&self) -> String {
        self.read().id.clone()
    }

    pub fn tag(&self) -> Tag {
        self.read().tag
    }

    /// Input type, `None` for anything that is not an `<input>`.
    pub fn input_type(&self) -> Option<InputType> {
        self.read().input_type
    }

    pub fn get_name(&self) -> String {
        self.read().name.clone()
    }

    pub fn get_value(&self) -> String {
        self.read().value.clone()
    }

    pub fn is_checked(&self) -> bool {
        self.read().checked
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.write().value = value.into();
    }

    pub fn set_checked(&self, checked: bool) {
        self.write().checked = checked;
    }

    pub fn attribute(&self, key: &str) -> Option<String> {
        self.read().attributes.get(key).cloned()
    }

    pub fn set_attribute(&self, key: impl Into<String>, value: impl Into<String>) {
        self.write().attributes.insert(key.into(), value.into());
    }

    pub fn remove_attribute(&self, key: &str) -> Option<String> {
        self.write().attributes.remove(key)
    }

    pub fn child_nodes(&self) -> Vec<Node> {
        self.read().children.clone()
    }

    pub fn append_child(&self, child: Node) {
        self.write().children.push(child);
    }

    /// Whether both handles point to the same element.
    pub fn same_node(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // Listeners

    /// Register a listener. Returns false if this exact listener was
    /// already registered for `kind`.
    pub fn add_event_listener(&self, kind: EventKind, listener: Listener) -> bool {
        let mut data = self.write();
        let registered = data.listeners.entry(kind).or_default();
        if registered.iter().any(|l| same_listener(l, &listener)) {
            return false;
        }
        registered.push(listener);
        true
    }

    /// Remove a listener. Removing one that is not registered is a no-op
    /// and returns false.
    pub fn remove_event_listener(&self, kind: EventKind, listener: &Listener) -> bool {
        let mut data = self.write();
        let Some(registered) = data.listeners.get_mut(&kind) else {
            return false;
        };
        let before = registered.len();
        registered.retain(|l| !same_listener(l, listener));
        let removed = registered.len() != before;
        if registered.is_empty() {
            data.listeners.remove(&kind);
        }
        removed
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.read().listeners.get(&kind).map_or(0, Vec::len)
    }

    pub fn total_listener_count(&self) -> usize {
        self.read().listeners.values().map(Vec::len).sum()
    }

    /// Dispatch an event of `kind` with this node as target.
    ///
    /// Listeners run in registration order, outside the node lock, so they
    /// may read and mutate the node. Returns false if a listener prevented
    /// the default action.
    pub fn dispatch(&self, kind: EventKind) -> bool {
        let listeners = self
            .read()
            .listeners
            .get(&kind)
            .cloned()
            .unwrap_or_default();
        log::trace!(
            "dispatch {} on {} ({} listeners)",
            kind,
            self.get_id(),
            listeners.len()
        );

        let event = Event::new(kind, self.clone());
        for listener in &listeners {
            listener(&event);
        }
        !event.default_prevented()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.read();
        f.debug_struct("Node")
            .field("id", &data.id)
            .field("tag", &data.tag)
            .field("input_type", &data.input_type)
            .field("name", &data.name)
            .field("value", &data.value)
            .field("checked", &data.checked)
            .field("children", &data.children.len())
            .finish()
    }
}
