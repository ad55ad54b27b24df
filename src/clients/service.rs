//! The external order-status service as seen from the console.
//!
//! Anything that can list a day's orders and persist a status write implements
//! [`OrderService`]: an HTTP client, the in-memory
//! [`OrderItemClient`](super::OrderItemClient), or a test double.

use crate::api::{OrdersResponse, StatusUpdateBody};
use crate::model::{OrderItemId, OrderStatus, RestaurantId};
use crate::query::RestaurantScope;
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

/// Which orders a load fetches: one day, all restaurants or one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadScope {
    pub restaurant: RestaurantScope,
    pub date: NaiveDate,
}

impl LoadScope {
    pub fn day(date: NaiveDate) -> Self {
        Self {
            restaurant: RestaurantScope::All,
            date,
        }
    }

    pub fn restaurant(mut self, id: RestaurantId) -> Self {
        self.restaurant = RestaurantScope::Only(id);
        self
    }

    /// Query string of `GET /orders`; `restaurant_id` is empty for all restaurants.
    pub fn query_string(&self) -> String {
        let restaurant = match self.restaurant {
            RestaurantScope::All => String::new(),
            RestaurantScope::Only(id) => id.0.to_string(),
        };
        format!("restaurant_id={}&date={}", restaurant, self.date)
    }
}

/// A status write as sent to `PUT /orders/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub id: OrderItemId,
    pub status: OrderStatus,
    pub expected_version: Option<u64>,
}

impl StatusUpdate {
    pub fn body(&self) -> StatusUpdateBody {
        StatusUpdateBody {
            status: self.status,
            version: self.expected_version,
        }
    }
}

/// Failures reported by (or on the way to) the service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The request never got an answer.
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered and refused the write.
    #[error("Rejected by order service: {0}")]
    Rejected(String),

    /// The item changed since the writer last read it.
    #[error("Order item {id} was modified concurrently")]
    Conflict { id: OrderItemId },

    #[error("Order item not found: {0}")]
    NotFound(OrderItemId),
}

#[async_trait]
pub trait OrderService: Send + Sync {
    /// `GET /orders` for `scope`.
    async fn fetch_orders(&self, scope: &LoadScope) -> Result<OrdersResponse, ServiceError>;

    /// `PUT /orders/{id}/status`.
    async fn update_status(&self, update: StatusUpdate) -> Result<(), ServiceError>;
}
