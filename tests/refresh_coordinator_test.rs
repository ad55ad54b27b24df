use async_trait::async_trait;
use chrono::NaiveDate;
use meal_ops::api::OrdersResponse;
use meal_ops::clients::{LoadScope, OrderService, ServiceError, StatusUpdate};
use meal_ops::model::{
    MealRef, OrderItem, OrderItemId, OrderStatus, ReferenceTable, RestaurantId, RestaurantRef,
    UserRef,
};
use meal_ops::query::FilterCriteria;
use meal_ops::refresh::{self, ConsoleError, ReloadOutcome};
use meal_ops::transition::TransitionError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

/// Order service double whose fetches can be held back per date.
///
/// Every fetch is reported on `calls` before it waits, so a test knows a
/// request is in flight and can decide the order in which answers arrive.
struct GatedService {
    items: Mutex<HashMap<NaiveDate, Vec<OrderItem>>>,
    gates: Mutex<HashMap<NaiveDate, oneshot::Receiver<()>>>,
    calls: mpsc::UnboundedSender<NaiveDate>,
    fetch_error: Mutex<Option<ServiceError>>,
    day_errors: Mutex<HashMap<NaiveDate, ServiceError>>,
    write_error: Mutex<Option<ServiceError>>,
    writes: Mutex<Vec<StatusUpdate>>,
}

impl GatedService {
    fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<NaiveDate>) {
        let (calls, observed) = mpsc::unbounded_channel();
        let service = Arc::new(Self {
            items: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            calls,
            fetch_error: Mutex::new(None),
            day_errors: Mutex::new(HashMap::new()),
            write_error: Mutex::new(None),
            writes: Mutex::new(Vec::new()),
        });
        (service, observed)
    }

    fn serve(&self, date: NaiveDate, items: Vec<OrderItem>) {
        self.items.lock().unwrap().insert(date, items);
    }

    /// The next fetch for `date` waits until the returned sender fires.
    fn gate(&self, date: NaiveDate) -> oneshot::Sender<()> {
        let (open, gate) = oneshot::channel();
        self.gates.lock().unwrap().insert(date, gate);
        open
    }

    fn fail_fetches(&self, error: Option<ServiceError>) {
        *self.fetch_error.lock().unwrap() = error;
    }

    /// Fetches for `date` fail; other dates are still served.
    fn fail_day(&self, date: NaiveDate, error: ServiceError) {
        self.day_errors.lock().unwrap().insert(date, error);
    }

    fn fail_writes(&self, error: ServiceError) {
        *self.write_error.lock().unwrap() = Some(error);
    }

    fn writes(&self) -> Vec<StatusUpdate> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderService for GatedService {
    async fn fetch_orders(&self, scope: &LoadScope) -> Result<OrdersResponse, ServiceError> {
        let gate = self.gates.lock().unwrap().remove(&scope.date);
        let _ = self.calls.send(scope.date);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(e) = self.fetch_error.lock().unwrap().clone() {
            return Err(e);
        }
        if let Some(e) = self.day_errors.lock().unwrap().get(&scope.date).cloned() {
            return Err(e);
        }
        let items = self
            .items
            .lock()
            .unwrap()
            .get(&scope.date)
            .cloned()
            .unwrap_or_default();
        Ok(OrdersResponse::from_items(items, scope.date))
    }

    async fn update_status(&self, update: StatusUpdate) -> Result<(), ServiceError> {
        self.writes.lock().unwrap().push(update);
        if let Some(e) = self.write_error.lock().unwrap().clone() {
            return Err(e);
        }
        // Persist like a real service would, so the follow-up reload sees it.
        let mut items = self.items.lock().unwrap();
        for list in items.values_mut() {
            for item in list.iter_mut().filter(|item| item.id == update.id) {
                *item = item.with_status(update.status);
            }
        }
        Ok(())
    }
}

fn items_for(date: NaiveDate, ids: &[u32]) -> Vec<OrderItem> {
    ids.iter()
        .map(|&id| OrderItem::builder(OrderItemId(id), date).build())
        .collect()
}

/// Reload A is issued, then reload B. B's answer arrives first and is applied;
/// A's answer arrives later and is discarded. The displayed state is B's.
#[tokio::test]
async fn test_stale_reload_is_discarded() {
    let (service, mut observed) = GatedService::new();
    service.serve(day(19), items_for(day(19), &[1, 2, 3]));
    service.serve(day(20), items_for(day(20), &[4, 5]));
    let open_a = service.gate(day(19));
    let open_b = service.gate(day(20));

    let (console, handle) = refresh::spawn(
        service.clone(),
        LoadScope::day(day(19)),
        FilterCriteria::default(),
        8,
    );
    let mut views = console.subscribe();

    let reload_a = tokio::spawn({
        let console = console.clone();
        async move { console.reload(Some(LoadScope::day(day(19)))).await }
    });
    assert_eq!(observed.recv().await, Some(day(19)));

    let reload_b = tokio::spawn({
        let console = console.clone();
        async move { console.reload(Some(LoadScope::day(day(20)))).await }
    });
    assert_eq!(observed.recv().await, Some(day(20)));

    open_b.send(()).unwrap();
    let applied = reload_b.await.unwrap().unwrap();
    let ReloadOutcome::Applied(view_b) = applied else {
        panic!("reload B should apply, got {applied:?}");
    };
    assert_eq!(view_b.generation, 2);
    assert_eq!(view_b.scope.date, day(20));
    assert_eq!(view_b.snapshot.total, 2);

    open_a.send(()).unwrap();
    assert_eq!(
        reload_a.await.unwrap(),
        Ok(ReloadOutcome::Superseded {
            generation: 1,
            latest: 2
        })
    );

    let current = console.view();
    assert_eq!(current, view_b);
    views.changed().await.unwrap();
    assert_eq!(views.borrow().generation, 2);

    drop(views);
    drop(console);
    handle.await.unwrap();
}

/// A failed reload reports the error and leaves the last good view in place.
#[tokio::test]
async fn test_failed_reload_keeps_previous_view() {
    let (service, _observed) = GatedService::new();
    service.serve(day(19), items_for(day(19), &[1, 2]));
    let (console, _handle) =
        refresh::spawn(service.clone(), LoadScope::day(day(19)), FilterCriteria::default(), 8);

    let first = console.reload(None).await.unwrap();
    let good = first.view().cloned().unwrap();

    service.fail_fetches(Some(ServiceError::Network("connection reset".into())));
    assert_eq!(
        console.reload(None).await,
        Err(ConsoleError::Load(ServiceError::Network(
            "connection reset".into()
        )))
    );
    assert_eq!(console.view(), good);
}

/// A transition reloads afterwards; the reload is what shows the new status.
#[tokio::test]
async fn test_transition_then_reload() {
    let (service, _observed) = GatedService::new();
    service.serve(day(19), items_for(day(19), &[1, 2]));
    let (console, _handle) =
        refresh::spawn(service.clone(), LoadScope::day(day(19)), FilterCriteria::default(), 8);
    console.reload(None).await.unwrap();

    let outcome = console
        .transition(OrderItemId(1), OrderStatus::Preparing, false)
        .await
        .unwrap();
    assert_eq!(outcome.item.status, OrderStatus::Preparing);

    let refreshed = outcome.refreshed.unwrap();
    assert_eq!(refreshed.generation, 2);
    assert!(!refreshed.stale);
    assert_eq!(refreshed.snapshot.count(OrderStatus::Preparing), 1);
    assert_eq!(refreshed.snapshot.count(OrderStatus::Pending), 1);
    assert_eq!(
        service.writes(),
        vec![StatusUpdate {
            id: OrderItemId(1),
            status: OrderStatus::Preparing,
            expected_version: Some(0),
        }]
    );

    // Cancelling needs confirmation; nothing is written without it.
    assert_eq!(
        console
            .transition(OrderItemId(2), OrderStatus::Cancelled, false)
            .await
            .unwrap_err(),
        ConsoleError::Transition(TransitionError::ConfirmationRequired)
    );
    assert_eq!(service.writes().len(), 1);
}

/// Only items of the current collection can be transitioned.
#[tokio::test]
async fn test_transition_unknown_item() {
    let (service, _observed) = GatedService::new();
    let (console, _handle) =
        refresh::spawn(service.clone(), LoadScope::day(day(19)), FilterCriteria::default(), 8);

    assert_eq!(
        console
            .transition(OrderItemId(42), OrderStatus::Preparing, false)
            .await
            .unwrap_err(),
        ConsoleError::Transition(TransitionError::NotFound(OrderItemId(42)))
    );
    assert!(service.writes().is_empty());
}

/// When the service refuses the write the view is untouched and no reload runs.
#[tokio::test]
async fn test_persistence_failure_leaves_view() {
    let (service, mut observed) = GatedService::new();
    service.serve(day(19), items_for(day(19), &[1]));
    let (console, _handle) =
        refresh::spawn(service.clone(), LoadScope::day(day(19)), FilterCriteria::default(), 8);
    let before = console.reload(None).await.unwrap().view().cloned().unwrap();
    assert_eq!(observed.recv().await, Some(day(19)));

    service.fail_writes(ServiceError::Rejected("read only".into()));
    let err = console
        .transition(OrderItemId(1), OrderStatus::Preparing, false)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ConsoleError::Transition(TransitionError::PersistenceFailed("read only".into()))
    );
    assert_eq!(console.view(), before);
    assert!(observed.try_recv().is_err());
}

/// A stored transition whose reload fails leaves the view marked stale.
#[tokio::test]
async fn test_failed_follow_up_reload_marks_view_stale() {
    let (service, _observed) = GatedService::new();
    service.serve(day(19), items_for(day(19), &[1]));
    let (console, _handle) =
        refresh::spawn(service.clone(), LoadScope::day(day(19)), FilterCriteria::default(), 8);
    console.reload(None).await.unwrap();

    service.fail_fetches(Some(ServiceError::Network("timeout".into())));
    let outcome = console
        .transition(OrderItemId(1), OrderStatus::Preparing, false)
        .await
        .unwrap();

    assert_eq!(outcome.item.status, OrderStatus::Preparing);
    assert!(outcome.refreshed.is_err());
    let view = console.view();
    assert!(view.stale);
    // The collection is never patched locally.
    assert_eq!(view.item(OrderItemId(1)).unwrap().status, OrderStatus::Pending);

    service.fail_fetches(None);
    let view = console.reload(None).await.unwrap().view().cloned().unwrap();
    assert!(!view.stale);
    assert_eq!(view.item(OrderItemId(1)).unwrap().status, OrderStatus::Preparing);
}

/// A reload for another day that fails does not move the console: the next
/// transition and the next plain reload still refresh the displayed day.
#[tokio::test]
async fn test_failed_scope_change_keeps_displayed_scope() {
    let (service, _observed) = GatedService::new();
    service.serve(day(19), items_for(day(19), &[1, 2]));
    service.serve(day(20), items_for(day(20), &[3]));
    let (console, _handle) =
        refresh::spawn(service.clone(), LoadScope::day(day(19)), FilterCriteria::default(), 8);
    console.reload(None).await.unwrap();

    service.fail_day(day(20), ServiceError::Network("down".into()));
    assert_eq!(
        console.reload(Some(LoadScope::day(day(20)))).await,
        Err(ConsoleError::Load(ServiceError::Network("down".into())))
    );
    assert_eq!(console.view().scope.date, day(19));

    let outcome = console
        .transition(OrderItemId(1), OrderStatus::Preparing, false)
        .await
        .unwrap();
    let refreshed = outcome.refreshed.unwrap();
    assert_eq!(refreshed.scope.date, day(19));
    assert!(!refreshed.stale);
    assert_eq!(
        refreshed.item(OrderItemId(1)).unwrap().status,
        OrderStatus::Preparing
    );
    assert_eq!(console.view(), refreshed);

    let view = console.reload(None).await.unwrap().view().cloned().unwrap();
    assert_eq!(view.scope.date, day(19));
    assert_eq!(view.snapshot.total, 2);
}

/// A user reload still waiting on the service when a transition lands is
/// superseded by the transition's own reload.
#[tokio::test]
async fn test_transition_supersedes_reload_in_flight() {
    let (service, mut observed) = GatedService::new();
    service.serve(day(19), items_for(day(19), &[1, 2]));
    let (console, _handle) =
        refresh::spawn(service.clone(), LoadScope::day(day(19)), FilterCriteria::default(), 8);
    console.reload(None).await.unwrap();
    assert_eq!(observed.recv().await, Some(day(19)));

    // Only the user reload is held; the gate is spent once it is taken.
    let open = service.gate(day(19));
    let held = tokio::spawn({
        let console = console.clone();
        async move { console.reload(None).await }
    });
    assert_eq!(observed.recv().await, Some(day(19)));

    let outcome = console
        .transition(OrderItemId(1), OrderStatus::Preparing, false)
        .await
        .unwrap();
    let refreshed = outcome.refreshed.unwrap();
    assert_eq!(refreshed.generation, 3);
    assert_eq!(refreshed.snapshot.count(OrderStatus::Preparing), 1);

    open.send(()).unwrap();
    assert_eq!(
        held.await.unwrap(),
        Ok(ReloadOutcome::Superseded {
            generation: 2,
            latest: 3
        })
    );
    assert_eq!(console.view(), refreshed);
}

/// New reference data resolves items that arrived without names.
#[tokio::test]
async fn test_set_references_resolves_loaded_items() {
    let (service, _observed) = GatedService::new();
    let unresolved = OrderItem::builder(OrderItemId(1), day(19))
        .restaurant_id(3)
        .meal_id(4)
        .user_id(5)
        .unresolved()
        .build();
    service.serve(day(19), vec![unresolved]);
    let (console, _handle) =
        refresh::spawn(service.clone(), LoadScope::day(day(19)), FilterCriteria::default(), 8);

    let loaded = console.reload(None).await.unwrap().view().cloned().unwrap();
    assert_eq!(loaded.snapshot.unresolved.len(), 1);
    assert!(loaded.snapshot.grouped.is_empty());

    let table = ReferenceTable::new()
        .with_restaurant(RestaurantRef::new(3, "Green Bowl"))
        .with_meal(MealRef::new(4, "Oats", "شوفان"))
        .with_user(UserRef::new(5, "Mona"));
    let view = console.set_references(table).await.unwrap();

    assert_eq!(view.generation, loaded.generation);
    assert!(view.snapshot.unresolved.is_empty());
    assert_eq!(
        view.snapshot.group(RestaurantId(3), OrderStatus::Pending).len(),
        1
    );
    assert_eq!(view.items[0].customer_name(), Some("Mona"));
}

/// Dropping every client stops the coordinator even while a fetch is held.
#[tokio::test]
async fn test_shutdown_with_fetch_in_flight() {
    let (service, mut observed) = GatedService::new();
    let _held = service.gate(day(19));
    let (console, handle) =
        refresh::spawn(service.clone(), LoadScope::day(day(19)), FilterCriteria::default(), 8);

    let pending = tokio::spawn({
        let console = console.clone();
        async move { console.reload(None).await }
    });
    assert_eq!(observed.recv().await, Some(day(19)));
    pending.abort();
    drop(console);

    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("coordinator should stop")
        .unwrap();
}
