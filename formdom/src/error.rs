//! Error types for host tree parsing.

use thiserror::Error;

/// Errors raised while interpreting host-provided strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The `type` attribute of an input is not a known input type.
    #[error("Unknown input type '{0}'")]
    UnknownInputType(String),

    /// The event name does not correspond to a supported event.
    #[error("Unknown event '{0}'")]
    UnknownEvent(String),
}
