//! # Refresh Coordinator
//!
//! The console session's actor. It owns the loaded collection and the view
//! derived from it, and is the only place either is replaced.
//!
//! Every reload gets a generation number when it is issued. A fetch runs in its
//! own task and reports back through the mailbox; its result is applied only if
//! no newer reload was issued in the meantime. Otherwise it is dropped and the
//! caller learns it was superseded.

use super::message::{ConsoleRequest, Reply};
use super::{ConsoleClient, ConsoleError, ConsoleView, ReloadOutcome, TransitionOutcome};
use crate::api::OrdersResponse;
use crate::clients::{LoadScope, OrderService, ServiceError};
use crate::model::{OrderItem, OrderItemId, OrderStatus, ReferenceTable};
use crate::query::FilterCriteria;
use crate::transition::{apply_transition, TransitionError};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, info_span, warn, Instrument};

pub struct RefreshCoordinator {
    service: Arc<dyn OrderService>,
    receiver: mpsc::Receiver<ConsoleRequest>,
    /// Handed to fetch tasks; does not keep the mailbox open.
    mailbox: mpsc::WeakSender<ConsoleRequest>,
    references: ReferenceTable,
    /// Last generation issued. The view's generation trails it while a fetch is out.
    issued: u64,
    /// Collection as the service returned it, before reference resolution.
    loaded: Vec<OrderItem>,
    view: Arc<ConsoleView>,
    publisher: watch::Sender<Arc<ConsoleView>>,
}

impl RefreshCoordinator {
    /// Creates the coordinator and its client. Nothing is loaded until the
    /// first `reload`.
    pub fn new(
        service: Arc<dyn OrderService>,
        scope: LoadScope,
        criteria: FilterCriteria,
        mailbox_capacity: usize,
    ) -> (Self, ConsoleClient) {
        let (sender, receiver) = mpsc::channel(mailbox_capacity);
        let view = Arc::new(ConsoleView::empty(scope, criteria));
        let (publisher, views) = watch::channel(view.clone());

        let coordinator = Self {
            service,
            receiver,
            mailbox: sender.downgrade(),
            references: ReferenceTable::default(),
            issued: 0,
            loaded: Vec::new(),
            view,
            publisher,
        };
        (coordinator, ConsoleClient::new(sender, views))
    }

    /// Runs until every [`ConsoleClient`] has been dropped.
    pub async fn run(mut self) {
        info!(date = %self.view.scope.date, "Coordinator started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ConsoleRequest::Reload { scope, respond_to } => {
                    // A scope only sticks once a reload for it is applied.
                    let scope = scope.unwrap_or(self.view.scope);
                    let generation = self.issue();
                    debug!(generation, date = %scope.date, "Reload issued");
                    self.spawn_fetch(generation, scope, respond_to);
                }
                ConsoleRequest::Loaded {
                    generation,
                    scope,
                    result,
                    respond_to,
                } => {
                    let outcome = self.on_loaded(generation, scope, result);
                    let _ = respond_to.send(outcome);
                }
                ConsoleRequest::Transition {
                    id,
                    target,
                    confirmed,
                    respond_to,
                } => {
                    let outcome = self.on_transition(id, target, confirmed).await;
                    let _ = respond_to.send(outcome);
                }
                ConsoleRequest::SetCriteria {
                    criteria,
                    respond_to,
                } => {
                    debug!(?criteria, "Criteria changed");
                    let view = self.view.with_criteria(criteria);
                    let _ = respond_to.send(Ok(self.publish(view)));
                }
                ConsoleRequest::SetReferences {
                    references,
                    respond_to,
                } => {
                    self.references = references;
                    let rebuilt = self.rebuild(
                        self.view.generation,
                        self.view.scope,
                        self.view.date_label.clone(),
                    );
                    let view = ConsoleView {
                        stale: self.view.stale,
                        ..rebuilt
                    };
                    info!(generation = view.generation, "References replaced");
                    let _ = respond_to.send(Ok(self.publish(view)));
                }
            }
        }

        info!(generation = self.view.generation, "Coordinator shutdown");
    }

    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    fn spawn_fetch(&self, generation: u64, scope: LoadScope, respond_to: Reply<ReloadOutcome>) {
        let service = self.service.clone();
        let mailbox = self.mailbox.clone();
        tokio::spawn(
            async move {
                let result = service.fetch_orders(&scope).await;
                // Every client is gone: nobody is waiting for this.
                let Some(sender) = mailbox.upgrade() else {
                    return;
                };
                let _ = sender
                    .send(ConsoleRequest::Loaded {
                        generation,
                        scope,
                        result,
                        respond_to,
                    })
                    .await;
            }
            .instrument(info_span!("fetch", generation)),
        );
    }

    fn on_loaded(
        &mut self,
        generation: u64,
        scope: LoadScope,
        result: Result<OrdersResponse, ServiceError>,
    ) -> Result<ReloadOutcome, ConsoleError> {
        if generation != self.issued {
            debug!(generation, latest = self.issued, "Stale response discarded");
            return Ok(ReloadOutcome::Superseded {
                generation,
                latest: self.issued,
            });
        }
        match result {
            Ok(response) => Ok(ReloadOutcome::Applied(self.apply(generation, scope, response))),
            Err(e) => {
                warn!(generation, error = %e, "Reload failed");
                Err(ConsoleError::Load(e))
            }
        }
    }

    async fn on_transition(
        &mut self,
        id: OrderItemId,
        target: OrderStatus,
        confirmed: bool,
    ) -> Result<TransitionOutcome, ConsoleError> {
        let item = self
            .view
            .item(id)
            .cloned()
            .ok_or(TransitionError::NotFound(id))?;

        let updated = apply_transition(self.service.as_ref(), &item, target, confirmed).await?;

        // Stored, but the collection still shows the old status until the reload lands.
        let stale = self.view.marked_stale();
        self.publish(stale);

        // Reload the collection the item came from.
        let scope = self.view.scope;
        let generation = self.issue();
        debug!(generation, "Reload after transition");
        let refreshed = match self.service.fetch_orders(&scope).await {
            Ok(response) => Ok(self.apply(generation, scope, response)),
            Err(e) => {
                warn!(generation, error = %e, "Reload after transition failed");
                Err(e)
            }
        };

        Ok(TransitionOutcome {
            item: updated,
            refreshed,
        })
    }

    fn apply(
        &mut self,
        generation: u64,
        scope: LoadScope,
        response: OrdersResponse,
    ) -> Arc<ConsoleView> {
        let OrdersResponse {
            items,
            stats,
            date_label,
            ..
        } = response;
        self.loaded = items;

        let date_label = if date_label.is_empty() {
            crate::api::date_label(scope.date)
        } else {
            date_label
        };
        let view = self.rebuild(generation, scope, date_label);

        let local = &view.snapshot;
        if stats.total != local.total || stats.counts != local.count_by_status {
            warn!(
                generation,
                service_total = stats.total,
                local_total = local.total,
                "Service stats disagree with loaded items"
            );
        }

        info!(generation, total = view.snapshot.total, "Reload applied");
        self.publish(view)
    }

    fn rebuild(&self, generation: u64, scope: LoadScope, date_label: String) -> ConsoleView {
        let items = self.references.resolve_all(&self.loaded);
        ConsoleView::build(generation, scope, date_label, items, self.view.criteria.clone())
    }

    fn publish(&mut self, view: ConsoleView) -> Arc<ConsoleView> {
        let view = Arc::new(view);
        self.view = view.clone();
        self.publisher.send_replace(view.clone());
        view
    }
}
