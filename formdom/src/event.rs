use std::cell::Cell;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::element::Node;
use crate::error::DomError;

/// Event types a node can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Value committed (text inputs commit on blur, toggles immediately).
    Change,
    /// Value edited, fired on every keystroke.
    Input,
    /// Element gained focus
    Focus,
    /// Element lost focus
    Blur,
    /// Form submission requested
    Submit,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Change => "change",
            EventKind::Input => "input",
            EventKind::Focus => "focus",
            EventKind::Blur => "blur",
            EventKind::Submit => "submit",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "change" => Ok(EventKind::Change),
            "input" => Ok(EventKind::Input),
            "focus" => Ok(EventKind::Focus),
            "blur" => Ok(EventKind::Blur),
            "submit" => Ok(EventKind::Submit),
            other => Err(DomError::UnknownEvent(other.to_string())),
        }
    }
}

/// A dispatched event, handed to every listener of its kind on the target.
pub struct Event {
    kind: EventKind,
    target: Node,
    default_prevented: Cell<bool>,
}

impl Event {
    pub fn new(kind: EventKind, target: Node) -> Self {
        Self {
            kind,
            target,
            default_prevented: Cell::new(false),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The node the event was dispatched on.
    pub fn target(&self) -> &Node {
        &self.target
    }

    /// Cancel the host's default action (e.g. native form submission).
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("target", &self.target.get_id())
            .field("default_prevented", &self.default_prevented.get())
            .finish()
    }
}

/// Event listener. Identity is the allocation: registering the same `Arc`
/// twice for one event kind is a no-op, and removal matches by pointer.
pub type Listener = Arc<dyn Fn(&Event) + Send + Sync>;

/// Whether two listeners are the same registration.
pub fn same_listener(a: &Listener, b: &Listener) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}
