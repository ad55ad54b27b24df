//! Pure data: order items, their fulfillment status, subscriptions and the
//! reference-data lookups they point into.

pub mod order_item;
pub mod reference;
pub mod status;
pub mod subscription;

pub use order_item::*;
pub use reference::*;
pub use status::*;
pub use subscription::*;

use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of one delivery item.
    OrderItemId,
    "item"
);
id_type!(
    /// Identifier of the subscription that owns a set of items.
    SubscriptionId,
    "subscription"
);
id_type!(RestaurantId, "restaurant");
id_type!(MealId, "meal");
id_type!(UserId, "user");
id_type!(
    /// Subscription plan (subscription type) the items were created under.
    PlanId,
    "plan"
);
