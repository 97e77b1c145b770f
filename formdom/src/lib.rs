//! A small host control tree for form engines.
//!
//! `formdom` models the parts of a document a form library touches: element
//! nodes carrying a name, value, checked flag and attributes, per-node event
//! listeners with a preventable default, focus tracking, and a handful of
//! simulated user interactions for driving realistic event sequences.

pub mod collect;
pub mod element;
pub mod error;
pub mod event;
pub mod focus;
pub mod interact;

pub use collect::{collect_controls, is_control};
pub use element::{find_by_id, find_by_name, InputType, Node, Tag};
pub use error::DomError;
pub use event::{Event, EventKind, Listener};
pub use focus::FocusState;
