//! [`ActorEntity`] implementation for [`OrderItem`].
//!
//! The service side of a status write: it checks the expected revision, refuses
//! anything the status graph does not allow, and bumps the version on success.

use super::{OrderItemAction, OrderItemError};
use crate::framework::ActorEntity;
use crate::model::{NewOrderItem, OrderItem, OrderItemId};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for OrderItem {
    type Id = OrderItemId;
    type Create = NewOrderItem;
    type Action = OrderItemAction;
    type ActionResult = OrderItem;
    type Context = ();
    type Error = OrderItemError;

    fn from_create_params(id: OrderItemId, params: NewOrderItem) -> Result<Self, Self::Error> {
        Ok(OrderItem::from_new(id, params))
    }

    async fn handle_action(
        &mut self,
        action: OrderItemAction,
        _ctx: &Self::Context,
    ) -> Result<OrderItem, Self::Error> {
        match action {
            OrderItemAction::SetStatus {
                status,
                expected_version,
            } => {
                if let Some(expected) = expected_version {
                    if expected != self.version {
                        return Err(OrderItemError::Conflict {
                            id: self.id,
                            expected,
                            actual: self.version,
                        });
                    }
                }
                if !self.status.can_transition_to(status) {
                    return Err(OrderItemError::Rejected {
                        id: self.id,
                        from: self.status,
                        to: status,
                    });
                }
                *self = self.with_status(status);
                Ok(self.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::ResourceActor;
    use crate::model::{MealRef, OrderStatus, RestaurantRef, SubscriptionId, UserRef};
    use chrono::NaiveDate;

    fn new_item() -> NewOrderItem {
        NewOrderItem {
            subscription_id: SubscriptionId(1),
            restaurant: RestaurantRef::new(1, "Green Bowl"),
            meal: MealRef::new(1, "Oats", "شوفان"),
            user: UserRef::new(1, "Mona"),
            delivery_date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            delivery_time: None,
        }
    }

    fn set(status: OrderStatus, expected_version: Option<u64>) -> OrderItemAction {
        OrderItemAction::SetStatus {
            status,
            expected_version,
        }
    }

    #[tokio::test]
    async fn test_set_status_bumps_version() {
        let (actor, client) = ResourceActor::<OrderItem>::new(10);
        tokio::spawn(actor.run(()));

        let id = client.create(new_item()).await.unwrap();
        assert_eq!(id, OrderItemId(1));

        let updated = client
            .perform_action(id, set(OrderStatus::Preparing, Some(0)))
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Preparing);
        assert_eq!(updated.version, 1);

        let stored = client.get(id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_stale_version_is_a_conflict_and_changes_nothing() {
        let (actor, client) = ResourceActor::<OrderItem>::new(10);
        tokio::spawn(actor.run(()));
        let id = client.create(new_item()).await.unwrap();

        client
            .perform_action(id, set(OrderStatus::Preparing, Some(0)))
            .await
            .unwrap();

        // A second writer still holding version 0.
        let err = client
            .perform_action(id, set(OrderStatus::Cancelled, Some(0)))
            .await
            .unwrap_err();
        assert_eq!(
            err.entity_error::<OrderItemError>(),
            Some(&OrderItemError::Conflict {
                id,
                expected: 0,
                actual: 1
            })
        );

        let stored = client.get(id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Preparing);
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn test_terminal_item_rejects_writes() {
        let (actor, client) = ResourceActor::<OrderItem>::new(10);
        tokio::spawn(actor.run(()));
        let id = client.create(new_item()).await.unwrap();

        client
            .perform_action(id, set(OrderStatus::Cancelled, None))
            .await
            .unwrap();
        let err = client
            .perform_action(id, set(OrderStatus::Pending, None))
            .await
            .unwrap_err();
        assert!(matches!(
            err.entity_error::<OrderItemError>(),
            Some(OrderItemError::Rejected { .. })
        ));
    }
}
