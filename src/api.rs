//! Wire shapes of the order endpoints.
//!
//! - `GET /orders?restaurant_id=&date=` answers with [`OrdersResponse`].
//! - `PUT /orders/{id}/status` takes a [`StatusUpdateBody`].
//!
//! Statuses travel as lowercase strings, dates as ISO-8601.

use crate::aggregate::{aggregate, StatusGroups};
use crate::model::{OrderItem, OrderStatus, RestaurantId, StatusCounts};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `stats` block of the orders payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusStats {
    pub total: usize,
    #[serde(flatten)]
    pub counts: StatusCounts,
}

/// Body of `GET /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub grouped: BTreeMap<RestaurantId, StatusGroups>,
    pub stats: StatusStats,
    #[serde(default)]
    pub date_label: String,
}

impl OrdersResponse {
    /// Assembles the payload the way the service does: grouping and stats are
    /// derived from `items`.
    pub fn from_items(items: Vec<OrderItem>, date: NaiveDate) -> Self {
        let snapshot = aggregate(&items);
        Self {
            grouped: snapshot.grouped,
            stats: StatusStats {
                total: snapshot.total,
                counts: snapshot.count_by_status,
            },
            date_label: date_label(date),
            items,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Body of `PUT /orders/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdateBody {
    pub status: OrderStatus,
    /// Revision the writer last saw; omitted for unconditional writes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

/// Heading shown above the day's orders, e.g. `Monday, 19 October 2026`.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}
