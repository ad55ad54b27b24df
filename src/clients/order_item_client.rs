//! # Order Item Client
//!
//! Wraps a `ResourceClient<OrderItem>` so the in-memory actor can serve as the
//! console's [`OrderService`].
use super::service::{LoadScope, OrderService, ServiceError, StatusUpdate};
use crate::api::OrdersResponse;
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{NewOrderItem, NewSubscription, OrderItem, OrderItemId, Subscription};
use crate::order_item_actor::{OrderItemAction, OrderItemError};
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

/// Client for the in-memory order-item actor.
#[derive(Clone)]
pub struct OrderItemClient {
    inner: ResourceClient<OrderItem>,
}

impl OrderItemClient {
    pub fn new(inner: ResourceClient<OrderItem>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_item(&self, params: NewOrderItem) -> Result<OrderItemId, ServiceError> {
        debug!("create_item called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Creates one item per meal per day of the subscription.
    #[instrument(skip(self, params), fields(subscription = %params.id, days = params.days))]
    pub async fn create_subscription(
        &self,
        params: NewSubscription,
    ) -> Result<Subscription, ServiceError> {
        let mut item_ids = Vec::new();
        for item in params.expand() {
            item_ids.push(self.create_item(item).await?);
        }
        info!(items = item_ids.len(), "Subscription scheduled");

        Ok(Subscription {
            id: params.id,
            user_id: params.user.id,
            restaurant_id: params.restaurant.id,
            plan_id: params.plan_id,
            item_ids,
        })
    }
}

#[async_trait]
impl ActorClient<OrderItem> for OrderItemClient {
    type Error = ServiceError;

    fn inner(&self) -> &ResourceClient<OrderItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.entity_error::<OrderItemError>() {
            Some(OrderItemError::Conflict { id, .. }) => return ServiceError::Conflict { id: *id },
            Some(rejected) => return ServiceError::Rejected(rejected.to_string()),
            None => {}
        }
        match e {
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                ServiceError::Network(e.to_string())
            }
            other => ServiceError::Rejected(other.to_string()),
        }
    }
}

#[async_trait]
impl OrderService for OrderItemClient {
    #[instrument(skip(self))]
    async fn fetch_orders(&self, scope: &LoadScope) -> Result<OrdersResponse, ServiceError> {
        let items: Vec<OrderItem> = self
            .list()
            .await?
            .into_iter()
            .filter(|item| item.delivery_date == scope.date)
            .filter(|item| scope.restaurant.matches(item.restaurant_id))
            .collect();
        debug!(count = items.len(), "Orders fetched");
        Ok(OrdersResponse::from_items(items, scope.date))
    }

    #[instrument(skip(self))]
    async fn update_status(&self, update: StatusUpdate) -> Result<(), ServiceError> {
        let action = OrderItemAction::SetStatus {
            status: update.status,
            expected_version: update.expected_version,
        };
        match self.inner.perform_action(update.id, action).await {
            Ok(item) => {
                debug!(version = item.version, "Status stored");
                Ok(())
            }
            Err(FrameworkError::NotFound(_)) => Err(ServiceError::NotFound(update.id)),
            Err(e) => {
                let err = Self::map_error(e);
                warn!(error = %err, "Status write refused");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;
    use crate::model::{
        MealRef, OrderStatus, PlanId, RestaurantId, RestaurantRef, SubscriptionId, UserRef,
    };
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_orders_scopes_by_day_and_restaurant() {
        let mut mock = MockClient::<OrderItem>::new();
        mock.expect_list().return_ok(vec![
            OrderItem::builder(OrderItemId(1), date(19)).restaurant_id(1).build(),
            OrderItem::builder(OrderItemId(2), date(19)).restaurant_id(2).build(),
            OrderItem::builder(OrderItemId(3), date(20)).restaurant_id(1).build(),
        ]);
        let client = OrderItemClient::new(mock.client());

        let scope = LoadScope::day(date(19)).restaurant(RestaurantId(1));
        let response = client.fetch_orders(&scope).await.unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].id, OrderItemId(1));
        assert_eq!(response.stats.total, 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_update_status_maps_entity_errors() {
        let mut mock = MockClient::<OrderItem>::new();
        mock.expect_action(OrderItemId(5))
            .return_err(FrameworkError::EntityError(Box::new(OrderItemError::Conflict {
                id: OrderItemId(5),
                expected: 1,
                actual: 2,
            })));
        mock.expect_action(OrderItemId(6))
            .return_err(FrameworkError::NotFound("item_6".to_string()));
        mock.expect_action(OrderItemId(7)).return_err(FrameworkError::ActorClosed);
        let client = OrderItemClient::new(mock.client());

        let update = |id: u32| StatusUpdate {
            id: OrderItemId(id),
            status: OrderStatus::Preparing,
            expected_version: Some(1),
        };
        assert_eq!(
            client.update_status(update(5)).await,
            Err(ServiceError::Conflict { id: OrderItemId(5) })
        );
        assert_eq!(
            client.update_status(update(6)).await,
            Err(ServiceError::NotFound(OrderItemId(6)))
        );
        assert!(matches!(
            client.update_status(update(7)).await,
            Err(ServiceError::Network(_))
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_create_subscription_collects_item_ids() {
        let subscription = NewSubscription {
            id: SubscriptionId(9),
            plan_id: PlanId(2),
            user: UserRef::new(5, "Mona"),
            restaurant: RestaurantRef::new(3, "Green Bowl"),
            meals: vec![
                MealRef::new(1, "Oats", "شوفان"),
                MealRef::new(2, "Salad", "سلطة"),
            ],
            start_date: date(19),
            days: 2,
            delivery_time: None,
        };

        let mut mock = MockClient::<OrderItem>::new();
        for id in 10..14 {
            mock.expect_create().return_ok(OrderItemId(id));
        }
        let client = OrderItemClient::new(mock.client());

        let created = client.create_subscription(subscription.clone()).await.unwrap();
        assert_eq!(created.id, SubscriptionId(9));
        assert_eq!(created.restaurant_id, RestaurantId(3));
        assert_eq!(
            created.item_ids,
            vec![OrderItemId(10), OrderItemId(11), OrderItemId(12), OrderItemId(13)]
        );
        mock.verify();

        // A refused create stops the subscription there.
        mock.expect_create().return_ok(OrderItemId(20));
        mock.expect_create().return_err(FrameworkError::ActorClosed);
        assert!(matches!(
            client.create_subscription(subscription).await,
            Err(ServiceError::Network(_))
        ));
        mock.verify();
    }
}
