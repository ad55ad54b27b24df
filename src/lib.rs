//! # meal-ops
//!
//! Core of a meal-subscription operations console: the fulfillment state machine
//! of a delivery item and the live dashboard derived from a day's items.
//!
//! ## Data flow
//!
//! ```text
//! OrderService ──fetch──► RefreshCoordinator ──► aggregate() ──► AggregateSnapshot
//!      ▲                        │           └──► query() ──────► Page<OrderItem>
//!      └──── apply_transition ◄─┘ (then reload)
//! ```
//!
//! A reload fetches the items for a [`LoadScope`](clients::LoadScope) (one day,
//! all restaurants or one). The coordinator resolves reference names, builds the
//! snapshot and the current page, and publishes a [`ConsoleView`](refresh::ConsoleView).
//! A transition is validated locally, stored by the service and followed by a
//! fresh reload. The cached collection is never patched.
//!
//! ## Module tour
//!
//! ### Pure core
//! - [`model`]: order items, statuses and their transition table, subscriptions,
//!   reference lookups.
//! - [`aggregate`]: counts and groupings for the dashboard.
//! - [`query`]: restaurant scope, status filter, search, stable sort, pagination.
//! - [`api`]: serde shapes of the order endpoints.
//!
//! ### Behaviour
//! - [`transition`]: validates a status change and asks the service to store it.
//! - [`refresh`]: the console session actor; only the latest reload is applied.
//!
//! ### Plumbing
//! - [`framework`]: the generic `ResourceActor<T>` and its clients and mocks.
//! - [`order_item_actor`] + [`clients`]: an in-memory order service built on it.
//! - [`lifecycle`]: configuration, tracing, startup and graceful shutdown.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod aggregate;
pub mod api;
pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_item_actor;
pub mod query;
pub mod refresh;
pub mod transition;
