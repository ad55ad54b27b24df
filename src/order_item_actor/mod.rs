//! The in-memory order-status service: order items held by a generic
//! [`ResourceActor`](crate::framework::ResourceActor).
//!
//! It plays the external service's part for the demo binary and the tests. Status
//! writes arrive as [`OrderItemAction::SetStatus`] and carry the revision the
//! writer last saw.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::OrderItem;

/// Creates a new order-item actor and its generic client.
///
/// Wrap the client in [`OrderItemClient`](crate::clients::OrderItemClient) to use it
/// as an [`OrderService`](crate::clients::OrderService).
pub fn new(mailbox_capacity: usize) -> (ResourceActor<OrderItem>, ResourceClient<OrderItem>) {
    ResourceActor::new(mailbox_capacity)
}
