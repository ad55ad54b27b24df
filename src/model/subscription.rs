//! Subscriptions own the order items created together for one user, restaurant
//! and plan. The core only reads membership; creating a subscription expands it
//! into one item per meal per day.

use super::{
    MealRef, NewOrderItem, OrderItem, OrderItemId, PlanId, RestaurantId, RestaurantRef,
    SubscriptionId, UserId, UserRef,
};
use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    pub plan_id: PlanId,
    /// Items in creation order.
    pub item_ids: Vec<OrderItemId>,
}

impl Subscription {
    /// The subscription's items found in `items`, in the order they appear there.
    pub fn items<'a>(&self, items: &'a [OrderItem]) -> Vec<&'a OrderItem> {
        items
            .iter()
            .filter(|item| item.subscription_id == self.id)
            .collect()
    }
}

/// Request to schedule a subscription's deliveries.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub id: SubscriptionId,
    pub plan_id: PlanId,
    pub user: UserRef,
    pub restaurant: RestaurantRef,
    /// Meals delivered each day.
    pub meals: Vec<MealRef>,
    pub start_date: NaiveDate,
    pub days: u32,
    pub delivery_time: Option<NaiveTime>,
}

impl NewSubscription {
    /// One item per meal per day, day by day, meals in the given order.
    ///
    /// Days past the end of the calendar are skipped.
    pub fn expand(&self) -> Vec<NewOrderItem> {
        (0..self.days)
            .filter_map(|offset| {
                self.start_date
                    .checked_add_days(Days::new(u64::from(offset)))
            })
            .flat_map(|delivery_date| {
                self.meals.iter().map(move |meal| NewOrderItem {
                    subscription_id: self.id,
                    restaurant: self.restaurant.clone(),
                    meal: meal.clone(),
                    user: self.user.clone(),
                    delivery_date,
                    delivery_time: self.delivery_time,
                })
            })
            .collect()
    }
}
