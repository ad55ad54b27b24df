//! Filter criteria: a pure value describing which page of which items to show.

use crate::model::{OrderStatus, RestaurantId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// `all` or one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

/// `all` restaurants or one restaurant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestaurantScope {
    #[default]
    All,
    Only(RestaurantId),
}

impl RestaurantScope {
    pub fn matches(self, restaurant: RestaurantId) -> bool {
        match self {
            RestaurantScope::All => true,
            RestaurantScope::Only(wanted) => wanted == restaurant,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    CustomerName,
    MealName,
    RestaurantName,
    DeliveryDate,
    DeliveryTime,
    Status,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort field plus direction, e.g. `delivery_time:asc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortKey {
    fn default() -> Self {
        Self {
            field: SortField::DeliveryTime,
            direction: SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid sort key: {0}")]
pub struct InvalidSortKey(pub String);

impl FromStr for SortField {
    type Err = InvalidSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(SortField::Id),
            "customer" | "customer_name" => Ok(SortField::CustomerName),
            "meal" | "meal_name" => Ok(SortField::MealName),
            "restaurant" | "restaurant_name" => Ok(SortField::RestaurantName),
            "delivery_date" | "date" => Ok(SortField::DeliveryDate),
            "delivery_time" | "time" => Ok(SortField::DeliveryTime),
            "status" => Ok(SortField::Status),
            other => Err(InvalidSortKey(other.to_string())),
        }
    }
}

impl FromStr for SortKey {
    type Err = InvalidSortKey;

    /// `field` or `field:asc|desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, direction)) => (field, Some(direction)),
            None => (s, None),
        };
        let direction = match direction.map(str::trim) {
            None | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(_) => return Err(InvalidSortKey(s.to_string())),
        };
        let field = field
            .parse::<SortField>()
            .map_err(|_| InvalidSortKey(s.to_string()))?;
        Ok(Self { field, direction })
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field = match self.field {
            SortField::Id => "id",
            SortField::CustomerName => "customer_name",
            SortField::MealName => "meal_name",
            SortField::RestaurantName => "restaurant_name",
            SortField::DeliveryDate => "delivery_date",
            SortField::DeliveryTime => "delivery_time",
            SortField::Status => "status",
        };
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{field}:{direction}")
    }
}

/// Which items to show and how. Never touches the items themselves.
///
/// `search_text` is the settled (debounced) value from the input box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub restaurant: RestaurantScope,
    pub search_text: String,
    pub sort: SortKey,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            restaurant: RestaurantScope::All,
            search_text: String::new(),
            sort: SortKey::default(),
            page: 1,
            page_size: 10,
        }
    }
}

impl FilterCriteria {
    pub fn new(page_size: usize, sort: SortKey) -> Self {
        Self {
            page_size,
            sort,
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_restaurant(mut self, restaurant: RestaurantScope) -> Self {
        self.restaurant = restaurant;
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn sorted_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort = SortKey { field, direction };
        self
    }

    pub fn on_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Page and page size, each at least 1.
    pub fn effective_paging(&self) -> (usize, usize) {
        (self.page.max(1), self.page_size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_key() {
        assert_eq!(
            "customer:desc".parse::<SortKey>(),
            Ok(SortKey {
                field: SortField::CustomerName,
                direction: SortDirection::Desc
            })
        );
        assert_eq!(
            "status".parse::<SortKey>().map(|k| k.direction),
            Ok(SortDirection::Asc)
        );
        assert!("status:sideways".parse::<SortKey>().is_err());
        assert!("price".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_display_round_trips() {
        let key = SortKey {
            field: SortField::MealName,
            direction: SortDirection::Desc,
        };
        assert_eq!(key.to_string().parse::<SortKey>(), Ok(key));
    }

    #[test]
    fn test_zero_paging_is_normalised() {
        let criteria = FilterCriteria::default().on_page(0).with_page_size(0);
        assert_eq!(criteria.effective_paging(), (1, 1));
    }
}
