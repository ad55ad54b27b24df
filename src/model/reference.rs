//! Read-only reference data the order items point into.
//!
//! Restaurants, meals and users are maintained elsewhere. Items arrive either
//! with these already resolved or with only the raw ids; a [`ReferenceTable`]
//! fills the gaps.

use super::{MealId, OrderItem, RestaurantId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantRef {
    pub id: RestaurantId,
    pub name: String,
}

/// A meal, named in both menu languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealRef {
    pub id: MealId,
    pub name_en: String,
    #[serde(default)]
    pub name_ar: String,
}

/// The subscriber an item is delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
}

impl RestaurantRef {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: RestaurantId(id),
            name: name.into(),
        }
    }
}

impl MealRef {
    pub fn new(id: u32, name_en: impl Into<String>, name_ar: impl Into<String>) -> Self {
        Self {
            id: MealId(id),
            name_en: name_en.into(),
            name_ar: name_ar.into(),
        }
    }
}

impl UserRef {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            name: name.into(),
        }
    }
}

/// Static id → name lookup, refreshed independently of the order items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    restaurants: BTreeMap<RestaurantId, RestaurantRef>,
    meals: BTreeMap<MealId, MealRef>,
    users: BTreeMap<UserId, UserRef>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_restaurant(mut self, restaurant: RestaurantRef) -> Self {
        self.restaurants.insert(restaurant.id, restaurant);
        self
    }

    pub fn with_meal(mut self, meal: MealRef) -> Self {
        self.meals.insert(meal.id, meal);
        self
    }

    pub fn with_user(mut self, user: UserRef) -> Self {
        self.users.insert(user.id, user);
        self
    }

    pub fn restaurant(&self, id: RestaurantId) -> Option<&RestaurantRef> {
        self.restaurants.get(&id)
    }

    pub fn meal(&self, id: MealId) -> Option<&MealRef> {
        self.meals.get(&id)
    }

    pub fn user(&self, id: UserId) -> Option<&UserRef> {
        self.users.get(&id)
    }

    /// Copy of `item` with missing references filled from the table.
    ///
    /// References the item already carries are kept as they are; an id the
    /// table does not know stays unresolved.
    pub fn resolve(&self, item: &OrderItem) -> OrderItem {
        let mut resolved = item.clone();
        if resolved.restaurant.is_none() {
            resolved.restaurant = self.restaurant(item.restaurant_id).cloned();
        }
        if resolved.meal.is_none() {
            resolved.meal = self.meal(item.meal_id).cloned();
        }
        if resolved.user.is_none() {
            resolved.user = self.user(item.user_id).cloned();
        }
        resolved
    }

    pub fn resolve_all(&self, items: &[OrderItem]) -> Vec<OrderItem> {
        items.iter().map(|item| self.resolve(item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderItemId;
    use chrono::NaiveDate;

    #[test]
    fn test_resolve_fills_only_missing_references() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let item = OrderItem::builder(OrderItemId(1), date)
            .restaurant(RestaurantRef::new(1, "Green Bowl"))
            .meal_id(7)
            .user_id(3)
            .unresolved()
            .build();

        let table = ReferenceTable::new()
            .with_restaurant(RestaurantRef::new(1, "Renamed"))
            .with_meal(MealRef::new(7, "Falafel Wrap", "لفافة فلافل"));

        let resolved = table.resolve(&item);
        assert_eq!(resolved.restaurant.as_ref().map(|r| r.name.as_str()), Some("Green Bowl"));
        assert_eq!(resolved.meal.as_ref().map(|m| m.name_en.as_str()), Some("Falafel Wrap"));
        assert!(resolved.user.is_none(), "unknown user stays unresolved");
        assert!(!resolved.is_resolved());
    }
}
