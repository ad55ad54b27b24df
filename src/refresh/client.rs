//! # Console Client
//!
//! The handle the UI layer holds. Cheap to clone; dropping the last clone stops
//! the coordinator.

use super::message::{ConsoleRequest, Reply};
use super::{ConsoleError, ConsoleView, ReloadOutcome, TransitionOutcome};
use crate::clients::LoadScope;
use crate::model::{OrderItemId, OrderStatus, ReferenceTable};
use crate::query::FilterCriteria;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ConsoleClient {
    sender: mpsc::Sender<ConsoleRequest>,
    views: watch::Receiver<Arc<ConsoleView>>,
}

impl ConsoleClient {
    pub(crate) fn new(
        sender: mpsc::Sender<ConsoleRequest>,
        views: watch::Receiver<Arc<ConsoleView>>,
    ) -> Self {
        Self { sender, views }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Reply<R>) -> ConsoleRequest,
    ) -> Result<R, ConsoleError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ConsoleError::CoordinatorClosed)?;
        response.await.map_err(|_| ConsoleError::CoordinatorClosed)?
    }

    /// Reloads `scope`, or the current scope when `None`.
    ///
    /// Resolves once this reload's response has arrived, with either the applied
    /// view or the news that a newer reload made it obsolete.
    #[instrument(skip(self))]
    pub async fn reload(&self, scope: Option<LoadScope>) -> Result<ReloadOutcome, ConsoleError> {
        debug!("Sending request");
        self.request(|respond_to| ConsoleRequest::Reload { scope, respond_to })
            .await
    }

    /// Moves one item of the current collection to `target`, then reloads.
    ///
    /// `confirmed` must be set to cancel.
    #[instrument(skip(self))]
    pub async fn transition(
        &self,
        id: OrderItemId,
        target: OrderStatus,
        confirmed: bool,
    ) -> Result<TransitionOutcome, ConsoleError> {
        debug!("Sending request");
        self.request(|respond_to| ConsoleRequest::Transition {
            id,
            target,
            confirmed,
            respond_to,
        })
        .await
    }

    /// Replaces the filter criteria. The collection is not reloaded.
    #[instrument(skip(self))]
    pub async fn set_criteria(
        &self,
        criteria: FilterCriteria,
    ) -> Result<Arc<ConsoleView>, ConsoleError> {
        self.request(|respond_to| ConsoleRequest::SetCriteria {
            criteria,
            respond_to,
        })
        .await
    }

    /// Swaps the lookup table and re-resolves the current collection.
    #[instrument(skip(self, references))]
    pub async fn set_references(
        &self,
        references: ReferenceTable,
    ) -> Result<Arc<ConsoleView>, ConsoleError> {
        self.request(|respond_to| ConsoleRequest::SetReferences {
            references,
            respond_to,
        })
        .await
    }

    /// The most recently published view.
    pub fn view(&self) -> Arc<ConsoleView> {
        self.views.borrow().clone()
    }

    /// Receiver that sees every view the coordinator publishes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ConsoleView>> {
        self.views.clone()
    }
}
