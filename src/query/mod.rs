//! # Query/Filter Engine
//!
//! Derives the displayed page from an order-item collection. The steps always run
//! in this order:
//!
//! 1. scope by restaurant
//! 2. filter by status
//! 3. search customer name and meal names (case-insensitive substring)
//! 4. stable sort; direction flips the comparator, never the tie-break
//! 5. paginate (1-based; past the end gives an empty page)

pub mod criteria;

pub use criteria::*;

use crate::model::OrderItem;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One page of a query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    /// Items that passed steps 1-3, before slicing.
    pub total_matched: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Runs the pipeline over `items`.
pub fn query(items: &[OrderItem], criteria: &FilterCriteria) -> Page<OrderItem> {
    let needle = criteria.search_text.trim().to_lowercase();

    let mut matched: Vec<&OrderItem> = items
        .iter()
        .filter(|item| criteria.restaurant.matches(item.restaurant_id))
        .filter(|item| criteria.status.matches(item.status))
        .filter(|item| needle.is_empty() || matches_search(item, &needle))
        .collect();

    // `sort_by` is stable, and a reversed `Equal` is still `Equal`.
    matched.sort_by(|a, b| {
        let ordering = compare(a, b, criteria.sort.field);
        match criteria.sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    let (page, page_size) = criteria.effective_paging();
    let total_matched = matched.len();
    let total_pages = total_matched.div_ceil(page_size);
    let start = (page - 1).saturating_mul(page_size);

    let items = matched
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    Page {
        items,
        page,
        page_size,
        total_matched,
        total_pages,
    }
}

/// `needle` is already trimmed and lowercased.
fn matches_search(item: &OrderItem, needle: &str) -> bool {
    let customer = item
        .customer_name()
        .is_some_and(|name| name.to_lowercase().contains(needle));
    customer
        || item
            .meal_names()
            .any(|name| name.to_lowercase().contains(needle))
}

fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.unwrap_or_default().to_lowercase();
    let b = b.unwrap_or_default().to_lowercase();
    a.cmp(&b)
}

fn compare(a: &OrderItem, b: &OrderItem, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::CustomerName => compare_text(a.customer_name(), b.customer_name()),
        SortField::MealName => compare_text(a.meal_name(), b.meal_name()),
        SortField::RestaurantName => compare_text(a.restaurant_name(), b.restaurant_name()),
        SortField::DeliveryDate => a.delivery_date.cmp(&b.delivery_date),
        // `None` sorts before any time.
        SortField::DeliveryTime => a.delivery_time.cmp(&b.delivery_time),
        SortField::Status => a.status.cmp(&b.status),
    }
}
