//! # Aggregator
//!
//! Reduces an order-item collection into the dashboard's counters and groupings.
//!
//! [`aggregate`] is a pure function of its input. It keeps no state between
//! calls and uses ordered maps only, so the same input always gives an equal
//! snapshot. Items whose restaurant, meal or user lookup is unresolved are still
//! counted, but they go to the `unresolved` bucket instead of the named groups.

use crate::model::{OrderItem, OrderStatus, RestaurantId, StatusCounts};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Items of one restaurant, split by status. Every status has an entry.
pub type StatusGroups = BTreeMap<OrderStatus, Vec<OrderItem>>;

/// Derived view over one collection. Rebuilt on every refresh, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    pub total: usize,
    pub count_by_status: StatusCounts,
    /// `grouped[restaurant][status]`, items in input order.
    pub grouped: BTreeMap<RestaurantId, StatusGroups>,
    /// Items with at least one unresolved lookup, in input order.
    pub unresolved: Vec<OrderItem>,
    /// Status counts per delivery day, all items included.
    pub by_day: BTreeMap<NaiveDate, StatusCounts>,
}

impl AggregateSnapshot {
    pub fn count(&self, status: OrderStatus) -> usize {
        self.count_by_status.get(status)
    }

    /// Items of `restaurant` in `status`; empty when there are none.
    pub fn group(&self, restaurant: RestaurantId, status: OrderStatus) -> &[OrderItem] {
        self.grouped
            .get(&restaurant)
            .and_then(|groups| groups.get(&status))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Per-status counts for one restaurant's resolved items.
    pub fn restaurant_counts(&self, restaurant: RestaurantId) -> StatusCounts {
        let mut counts = StatusCounts::default();
        if let Some(groups) = self.grouped.get(&restaurant) {
            for (status, items) in groups {
                for _ in items {
                    counts.increment(*status);
                }
            }
        }
        counts
    }
}

fn empty_groups() -> StatusGroups {
    OrderStatus::ALL
        .into_iter()
        .map(|status| (status, Vec::new()))
        .collect()
}

/// Builds the snapshot for `items`.
pub fn aggregate(items: &[OrderItem]) -> AggregateSnapshot {
    let mut snapshot = AggregateSnapshot {
        total: items.len(),
        ..AggregateSnapshot::default()
    };

    for item in items {
        snapshot.count_by_status.increment(item.status);
        snapshot
            .by_day
            .entry(item.delivery_date)
            .or_default()
            .increment(item.status);

        if !item.is_resolved() {
            snapshot.unresolved.push(item.clone());
            continue;
        }

        snapshot
            .grouped
            .entry(item.restaurant_id)
            .or_insert_with(empty_groups)
            .entry(item.status)
            .or_default()
            .push(item.clone());
    }

    snapshot
}
