//! The console session: reload, derive, transition, reload again.
//!
//! [`RefreshCoordinator`] is an actor owning the current [`ConsoleView`];
//! [`ConsoleClient`] is its handle. Views are replaced wholesale and published
//! on a `watch` channel.

mod client;
mod coordinator;
mod error;
mod message;
mod view;

pub use client::ConsoleClient;
pub use coordinator::RefreshCoordinator;
pub use error::ConsoleError;
pub use view::{ConsoleView, ReloadOutcome, TransitionOutcome};

use crate::clients::{LoadScope, OrderService};
use crate::query::FilterCriteria;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Creates a coordinator over `service` and spawns its run loop.
pub fn spawn(
    service: Arc<dyn OrderService>,
    scope: LoadScope,
    criteria: FilterCriteria,
    mailbox_capacity: usize,
) -> (ConsoleClient, JoinHandle<()>) {
    let (coordinator, client) =
        RefreshCoordinator::new(service, scope, criteria, mailbox_capacity);
    (client, tokio::spawn(coordinator.run()))
}
