use crate::clients::ServiceError;
use crate::model::{OrderItemId, OrderStatus};
use thiserror::Error;

/// Why a status change was not applied. The item is unchanged in every case.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Cannot move an order item from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order item is already {status}")]
    TerminalState { status: OrderStatus },

    #[error("Cancelling an order item needs confirmation")]
    ConfirmationRequired,

    #[error("Order service did not store the change: {0}")]
    PersistenceFailed(String),

    #[error("Order service unreachable: {0}")]
    NetworkError(String),

    #[error("Order item not found: {0}")]
    NotFound(OrderItemId),

    #[error("Order item {id} changed since it was loaded")]
    Conflict { id: OrderItemId },
}

impl TransitionError {
    /// Decided locally, before anything was sent to the service.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TransitionError::InvalidTransition { .. }
                | TransitionError::TerminalState { .. }
                | TransitionError::ConfirmationRequired
        )
    }
}

impl From<ServiceError> for TransitionError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Network(msg) => TransitionError::NetworkError(msg),
            ServiceError::Rejected(msg) => TransitionError::PersistenceFailed(msg),
            ServiceError::Conflict { id } => TransitionError::Conflict { id },
            ServiceError::NotFound(id) => TransitionError::NotFound(id),
        }
    }
}
