//! # Status Transition Engine
//!
//! The only writer of an order item's status. A request is validated against the
//! transition table locally, then the order service is asked to store it.
//!
//! Checks run in a fixed order:
//!
//! 1. a terminal item refuses everything (`TerminalState`)
//! 2. the target must be a direct successor (`InvalidTransition`)
//! 3. cancelling needs `confirmed` (`ConfirmationRequired`)
//!
//! The input item is only borrowed. On success a new value is returned; on any
//! failure the caller still holds the unchanged original.

mod error;

pub use error::*;

use crate::clients::{OrderService, StatusUpdate};
use crate::model::{OrderItem, OrderStatus};
use tracing::{debug, info, instrument, warn};

/// Validation step of [`apply_transition`], without touching the service.
pub fn validate_transition(
    item: &OrderItem,
    target: OrderStatus,
    confirmed: bool,
) -> Result<(), TransitionError> {
    if item.status.is_terminal() {
        return Err(TransitionError::TerminalState {
            status: item.status,
        });
    }
    if !item.status.can_transition_to(target) {
        return Err(TransitionError::InvalidTransition {
            from: item.status,
            to: target,
        });
    }
    if target.requires_confirmation() && !confirmed {
        return Err(TransitionError::ConfirmationRequired);
    }
    Ok(())
}

/// Validates the request and persists it through `service`.
///
/// The write carries `item.version` so the service can refuse it if someone else
/// changed the item first.
#[instrument(skip(service, item), fields(id = %item.id, from = %item.status, to = %target))]
pub async fn apply_transition<S: OrderService + ?Sized>(
    service: &S,
    item: &OrderItem,
    target: OrderStatus,
    confirmed: bool,
) -> Result<OrderItem, TransitionError> {
    if let Err(e) = validate_transition(item, target, confirmed) {
        debug!(error = %e, "Transition refused");
        return Err(e);
    }

    let update = StatusUpdate {
        id: item.id,
        status: target,
        expected_version: Some(item.version),
    };
    if let Err(e) = service.update_status(update).await {
        let err = TransitionError::from(e);
        warn!(error = %err, "Transition not stored");
        return Err(err);
    }

    info!("Transition stored");
    Ok(item.with_status(target))
}
