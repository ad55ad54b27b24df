use super::{ConsoleError, ConsoleView, ReloadOutcome, TransitionOutcome};
use crate::api::OrdersResponse;
use crate::clients::{LoadScope, ServiceError};
use crate::model::{OrderItemId, OrderStatus, ReferenceTable};
use crate::query::FilterCriteria;
use std::sync::Arc;
use tokio::sync::oneshot;

pub(crate) type Reply<T> = oneshot::Sender<Result<T, ConsoleError>>;

/// Mailbox of the refresh coordinator.
#[derive(Debug)]
pub(crate) enum ConsoleRequest {
    Reload {
        scope: Option<LoadScope>,
        respond_to: Reply<ReloadOutcome>,
    },
    /// Sent back by a fetch task when the service answers.
    Loaded {
        generation: u64,
        scope: LoadScope,
        result: Result<OrdersResponse, ServiceError>,
        respond_to: Reply<ReloadOutcome>,
    },
    Transition {
        id: OrderItemId,
        target: OrderStatus,
        confirmed: bool,
        respond_to: Reply<TransitionOutcome>,
    },
    SetCriteria {
        criteria: FilterCriteria,
        respond_to: Reply<Arc<ConsoleView>>,
    },
    SetReferences {
        references: ReferenceTable,
        respond_to: Reply<Arc<ConsoleView>>,
    },
}
