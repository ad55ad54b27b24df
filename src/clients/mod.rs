//! The order-status service seam and its in-memory implementation.

pub mod order_item_client;
pub mod service;

pub use order_item_client::*;
pub use service::*;
