use crate::clients::ServiceError;
use crate::transition::TransitionError;
use thiserror::Error;

/// Errors surfaced by a [`ConsoleClient`](super::ConsoleClient).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The latest reload failed; the previous view stays in place.
    #[error("Reload failed: {0}")]
    Load(#[from] ServiceError),

    #[error("Console coordinator closed")]
    CoordinatorClosed,
}
