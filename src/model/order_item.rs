use super::{
    MealId, MealRef, OrderItemId, OrderStatus, RestaurantId, RestaurantRef, SubscriptionId,
    UserId, UserRef,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One meal, for one subscriber, on one day: the unit the fulfillment engine works on.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// so the in-memory order-status service can keep items in a
/// [`ResourceActor`](crate::framework::ResourceActor).
/// See [`crate::order_item_actor`] for the creation payload and the `SetStatus` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub subscription_id: SubscriptionId,
    pub restaurant_id: RestaurantId,
    pub meal_id: MealId,
    pub user_id: UserId,
    /// Resolved lookups; `None` while the reference data is unknown.
    #[serde(default)]
    pub restaurant: Option<RestaurantRef>,
    #[serde(default)]
    pub meal: Option<MealRef>,
    #[serde(default)]
    pub user: Option<UserRef>,
    pub delivery_date: NaiveDate,
    /// Display and sort hint only.
    #[serde(default)]
    pub delivery_time: Option<NaiveTime>,
    pub status: OrderStatus,
    /// Bumped by the service on every accepted status write.
    #[serde(default)]
    pub version: u64,
}

/// Payload for creating a new order item. Items always start out `pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub subscription_id: SubscriptionId,
    pub restaurant: RestaurantRef,
    pub meal: MealRef,
    pub user: UserRef,
    pub delivery_date: NaiveDate,
    pub delivery_time: Option<NaiveTime>,
}

impl OrderItem {
    pub fn from_new(id: OrderItemId, new: NewOrderItem) -> Self {
        Self {
            id,
            subscription_id: new.subscription_id,
            restaurant_id: new.restaurant.id,
            meal_id: new.meal.id,
            user_id: new.user.id,
            restaurant: Some(new.restaurant),
            meal: Some(new.meal),
            user: Some(new.user),
            delivery_date: new.delivery_date,
            delivery_time: new.delivery_time,
            status: OrderStatus::Pending,
            version: 0,
        }
    }

    /// Starts a builder with every reference resolved and status `pending`.
    pub fn builder(id: OrderItemId, delivery_date: NaiveDate) -> OrderItemBuilder {
        OrderItemBuilder::new(id, delivery_date)
    }

    /// All three lookups (restaurant, meal, user) are known.
    pub fn is_resolved(&self) -> bool {
        self.restaurant.is_some() && self.meal.is_some() && self.user.is_some()
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }

    pub fn restaurant_name(&self) -> Option<&str> {
        self.restaurant.as_ref().map(|r| r.name.as_str())
    }

    /// Meal name in the primary menu language.
    pub fn meal_name(&self) -> Option<&str> {
        self.meal.as_ref().map(|m| m.name_en.as_str())
    }

    /// Meal names in every language the item carries.
    pub fn meal_names(&self) -> impl Iterator<Item = &str> {
        self.meal
            .iter()
            .flat_map(|m| [m.name_en.as_str(), m.name_ar.as_str()])
    }

    /// The item as it reads after the service accepted a write of `status`.
    pub fn with_status(&self, status: OrderStatus) -> Self {
        Self {
            status,
            version: self.version + 1,
            ..self.clone()
        }
    }
}

/// Test and demo helper for assembling items field by field.
#[derive(Debug, Clone)]
pub struct OrderItemBuilder {
    id: OrderItemId,
    subscription_id: SubscriptionId,
    restaurant_id: RestaurantId,
    meal_id: MealId,
    user_id: UserId,
    restaurant: Option<RestaurantRef>,
    meal: Option<MealRef>,
    user: Option<UserRef>,
    fill_defaults: bool,
    delivery_date: NaiveDate,
    delivery_time: Option<NaiveTime>,
    status: OrderStatus,
    version: u64,
}

impl OrderItemBuilder {
    fn new(id: OrderItemId, delivery_date: NaiveDate) -> Self {
        Self {
            id,
            subscription_id: SubscriptionId(1),
            restaurant_id: RestaurantId(1),
            meal_id: MealId(1),
            user_id: UserId(1),
            restaurant: None,
            meal: None,
            user: None,
            fill_defaults: true,
            delivery_date,
            delivery_time: None,
            status: OrderStatus::Pending,
            version: 0,
        }
    }

    pub fn subscription(mut self, id: u32) -> Self {
        self.subscription_id = SubscriptionId(id);
        self
    }

    pub fn restaurant(mut self, restaurant: RestaurantRef) -> Self {
        self.restaurant_id = restaurant.id;
        self.restaurant = Some(restaurant);
        self
    }

    pub fn restaurant_id(mut self, id: u32) -> Self {
        self.restaurant_id = RestaurantId(id);
        self.restaurant = None;
        self
    }

    pub fn meal(mut self, meal: MealRef) -> Self {
        self.meal_id = meal.id;
        self.meal = Some(meal);
        self
    }

    pub fn meal_id(mut self, id: u32) -> Self {
        self.meal_id = MealId(id);
        self.meal = None;
        self
    }

    pub fn user(mut self, user: UserRef) -> Self {
        self.user_id = user.id;
        self.user = Some(user);
        self
    }

    pub fn user_id(mut self, id: u32) -> Self {
        self.user_id = UserId(id);
        self.user = None;
        self
    }

    /// Leave references that were not set explicitly unresolved instead of
    /// generating placeholder names for them.
    pub fn unresolved(mut self) -> Self {
        self.fill_defaults = false;
        self
    }

    pub fn time(mut self, time: NaiveTime) -> Self {
        self.delivery_time = Some(time);
        self
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn build(self) -> OrderItem {
        let (restaurant, meal, user) = if self.fill_defaults {
            (
                self.restaurant.or_else(|| {
                    Some(RestaurantRef {
                        id: self.restaurant_id,
                        name: format!("Restaurant {}", self.restaurant_id.0),
                    })
                }),
                self.meal.or_else(|| {
                    Some(MealRef {
                        id: self.meal_id,
                        name_en: format!("Meal {}", self.meal_id.0),
                        name_ar: String::new(),
                    })
                }),
                self.user.or_else(|| {
                    Some(UserRef {
                        id: self.user_id,
                        name: format!("Customer {}", self.user_id.0),
                    })
                }),
            )
        } else {
            (self.restaurant, self.meal, self.user)
        };

        OrderItem {
            id: self.id,
            subscription_id: self.subscription_id,
            restaurant_id: self.restaurant_id,
            meal_id: self.meal_id,
            user_id: self.user_id,
            restaurant,
            meal,
            user,
            delivery_date: self.delivery_date,
            delivery_time: self.delivery_time,
            status: self.status,
            version: self.version,
        }
    }
}
