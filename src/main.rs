//! Demo console session against the in-memory order service.
//!
//! Seeds one subscription for today, loads the dashboard, walks items through
//! their statuses and shows the refusals the engine produces.

use chrono::{Local, NaiveTime};
use meal_ops::clients::LoadScope;
use meal_ops::lifecycle::{setup_tracing_with, ConsoleConfig, ConsoleSystem};
use meal_ops::model::{
    MealRef, NewSubscription, OrderStatus, PlanId, RestaurantRef, SubscriptionId, UserRef,
};
use meal_ops::query::{SortDirection, SortField, StatusFilter};
use meal_ops::refresh::ConsoleError;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = ConsoleConfig::from_env().map_err(|e| e.to_string())?;
    setup_tracing_with(&config.log_filter);

    let today = Local::now().date_naive();
    info!(%today, "Starting console");

    let system = ConsoleSystem::new(&config, LoadScope::day(today));

    let plan = NewSubscription {
        id: SubscriptionId(1),
        plan_id: PlanId(1),
        user: UserRef::new(1, "Mona Haddad"),
        restaurant: RestaurantRef::new(1, "Green Bowl"),
        meals: vec![
            MealRef::new(1, "Oats with Dates", "شوفان بالتمر"),
            MealRef::new(2, "Chicken Kabsa", "كبسة دجاج"),
            MealRef::new(3, "Lentil Soup", "شوربة عدس"),
        ],
        start_date: today,
        days: 3,
        delivery_time: NaiveTime::from_hms_opt(12, 30, 0),
    };

    let span = tracing::info_span!("seeding");
    let subscription = async {
        info!("Scheduling subscription");
        system
            .orders
            .create_subscription(plan)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;
    info!(items = subscription.item_ids.len(), "Subscription scheduled");

    let view = system
        .console
        .reload(None)
        .await
        .map_err(|e| e.to_string())?
        .view()
        .cloned()
        .ok_or("first reload was superseded")?;
    info!(
        label = %view.date_label,
        total = view.snapshot.total,
        pending = view.snapshot.count(OrderStatus::Pending),
        "Dashboard loaded"
    );

    let [first, second, ..] = view.items.as_slice() else {
        return Err("expected at least two items today".to_string());
    };
    let (first, second) = (first.id, second.id);
    let steps = [
        (first, OrderStatus::Preparing, false),
        (first, OrderStatus::Delivered, false),
        (second, OrderStatus::Delivered, false),
        (second, OrderStatus::Cancelled, false),
        (second, OrderStatus::Cancelled, true),
        (first, OrderStatus::Pending, false),
    ];

    let span = tracing::info_span!("transitions");
    async {
        for (id, target, confirmed) in steps {
            match system.console.transition(id, target, confirmed).await {
                Ok(outcome) => info!(
                    %id,
                    status = %outcome.item.status,
                    refreshed = outcome.refreshed.is_ok(),
                    "Transition applied"
                ),
                Err(ConsoleError::Transition(e)) if e.is_validation() => {
                    warn!(%id, %target, error = %e, "Transition refused")
                }
                Err(e) => error!(%id, %target, error = %e, "Transition failed"),
            }
        }
    }
    .instrument(span)
    .await;

    let criteria = config
        .criteria()
        .with_status(StatusFilter::Only(OrderStatus::Pending))
        .with_search("soup")
        .sorted_by(SortField::MealName, SortDirection::Asc);
    let view = system
        .console
        .set_criteria(criteria)
        .await
        .map_err(|e| e.to_string())?;
    info!(
        matched = view.page.total_matched,
        delivered = view.snapshot.count(OrderStatus::Delivered),
        cancelled = view.snapshot.count(OrderStatus::Cancelled),
        "Pending soups"
    );

    system.shutdown().await?;

    info!("Console demo completed");
    Ok(())
}
