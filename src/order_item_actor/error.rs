//! Error types for the order-item actor.

use crate::model::{OrderItemId, OrderStatus};
use thiserror::Error;

/// Errors that can occur during order-item operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderItemError {
    /// Someone else wrote the item since the writer last read it.
    #[error("Order item {id} changed concurrently: expected version {expected}, found {actual}")]
    Conflict {
        id: OrderItemId,
        expected: u64,
        actual: u64,
    },

    /// The service refuses writes that break the status graph.
    #[error("Order item {id} cannot move from {from} to {to}")]
    Rejected {
        id: OrderItemId,
        from: OrderStatus,
        to: OrderStatus,
    },
}
