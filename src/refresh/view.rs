//! What the console shows: the loaded collection plus everything derived from it.

use crate::aggregate::{aggregate, AggregateSnapshot};
use crate::api::date_label;
use crate::clients::{LoadScope, ServiceError};
use crate::model::{OrderItem, OrderItemId};
use crate::query::{query, FilterCriteria, Page};
use std::sync::Arc;

/// One applied state of the console. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleView {
    /// Reload generation this view came from; 0 before the first load.
    pub generation: u64,
    pub scope: LoadScope,
    pub date_label: String,
    pub items: Arc<Vec<OrderItem>>,
    pub snapshot: Arc<AggregateSnapshot>,
    pub criteria: FilterCriteria,
    pub page: Page<OrderItem>,
    /// A transition was stored but its reload has not been applied yet.
    pub stale: bool,
}

impl ConsoleView {
    /// Nothing loaded yet for `scope`.
    pub fn empty(scope: LoadScope, criteria: FilterCriteria) -> Self {
        Self::build(0, scope, date_label(scope.date), Vec::new(), criteria)
    }

    pub(crate) fn build(
        generation: u64,
        scope: LoadScope,
        date_label: String,
        items: Vec<OrderItem>,
        criteria: FilterCriteria,
    ) -> Self {
        let snapshot = aggregate(&items);
        let page = query(&items, &criteria);
        Self {
            generation,
            scope,
            date_label,
            items: Arc::new(items),
            snapshot: Arc::new(snapshot),
            criteria,
            page,
            stale: false,
        }
    }

    /// Same collection under new criteria. Only the page is recomputed.
    pub(crate) fn with_criteria(&self, criteria: FilterCriteria) -> Self {
        Self {
            page: query(&self.items, &criteria),
            criteria,
            ..self.clone()
        }
    }

    pub(crate) fn marked_stale(&self) -> Self {
        Self {
            stale: true,
            ..self.clone()
        }
    }

    pub fn item(&self, id: OrderItemId) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Result of a reload request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// This reload was the latest issued when its response arrived.
    Applied(Arc<ConsoleView>),
    /// A newer reload was issued meanwhile; the response was discarded.
    Superseded { generation: u64, latest: u64 },
}

impl ReloadOutcome {
    pub fn view(&self) -> Option<&Arc<ConsoleView>> {
        match self {
            ReloadOutcome::Applied(view) => Some(view),
            ReloadOutcome::Superseded { .. } => None,
        }
    }
}

/// A stored transition and the reload that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub item: OrderItem,
    pub refreshed: Result<Arc<ConsoleView>, ServiceError>,
}
