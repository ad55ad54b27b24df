//! Fulfillment status of an order item and the transition table between statuses.
//!
//! ```text
//! pending ──► preparing ──► delivered
//!    │            │
//!    └────────────┴──► cancelled
//! ```
//!
//! `delivered` and `cancelled` are terminal.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Where a delivery item is in its fulfillment.
///
/// The declaration order is the pipeline order and is what `Ord` compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Delivered,
    Cancelled,
}

/// Every legal `(from, to)` pair. Nothing else is a transition.
const TRANSITIONS: [(OrderStatus, OrderStatus); 4] = [
    (OrderStatus::Pending, OrderStatus::Preparing),
    (OrderStatus::Preparing, OrderStatus::Delivered),
    (OrderStatus::Pending, OrderStatus::Cancelled),
    (OrderStatus::Preparing, OrderStatus::Cancelled),
];

impl OrderStatus {
    /// The fixed status set, in pipeline order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// No transition leaves a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether `target` is a direct successor of `self`.
    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        TRANSITIONS.contains(&(self, target))
    }

    /// Direct successors, for renderers deciding which buttons to offer.
    pub fn successors(self) -> Vec<OrderStatus> {
        TRANSITIONS
            .iter()
            .filter(|(from, _)| *from == self)
            .map(|(_, to)| *to)
            .collect()
    }

    /// Moving to this status needs an explicit confirmation from the caller.
    pub fn requires_confirmation(self) -> bool {
        self == OrderStatus::Cancelled
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status string that is not one of the four known statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// One counter per status. All four are always present, zero when absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub preparing: usize,
    pub delivered: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn from_statuses(statuses: impl IntoIterator<Item = OrderStatus>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            counts.increment(status);
        }
        counts
    }

    pub fn get(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Pending => self.pending,
            OrderStatus::Preparing => self.preparing,
            OrderStatus::Delivered => self.delivered,
            OrderStatus::Cancelled => self.cancelled,
        }
    }

    pub fn increment(&mut self, status: OrderStatus) {
        let slot = match status {
            OrderStatus::Pending => &mut self.pending,
            OrderStatus::Preparing => &mut self.preparing,
            OrderStatus::Delivered => &mut self.delivered,
            OrderStatus::Cancelled => &mut self.cancelled,
        };
        *slot += 1;
    }

    /// Sum over all statuses.
    pub fn sum(&self) -> usize {
        self.pending + self.preparing + self.delivered + self.cancelled
    }

    pub fn iter(&self) -> impl Iterator<Item = (OrderStatus, usize)> + '_ {
        OrderStatus::ALL.into_iter().map(|status| (status, self.get(status)))
    }
}
