//! Custom actions for the order-item actor.

use crate::model::OrderStatus;

/// Operations on a stored [`OrderItem`](crate::model::OrderItem) beyond creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderItemAction {
    /// Overwrite the status.
    ///
    /// With `expected_version` set, the write only lands if the stored item is
    /// still at that revision.
    SetStatus {
        status: OrderStatus,
        expected_version: Option<u64>,
    },
}
