//! # Lifecycle
//!
//! Starting, configuring and stopping a console session.
//!
//! - [`ConsoleSystem`] spawns the order-item actor and the refresh coordinator
//!   and wires the coordinator to the actor through an
//!   [`OrderItemClient`](crate::clients::OrderItemClient).
//! - [`ConsoleConfig`] carries page size, mailbox capacity, default sort and the
//!   fallback log filter.
//! - [`setup_tracing_with`] installs the subscriber.
//!
//! ## Shutdown
//!
//! Dropping every client closes an actor's mailbox; its run loop drains what is
//! queued and returns. The coordinator holds a client of the order-item actor,
//! so it has to stop first. Its fetch tasks only hold a weak sender and never
//! keep it alive.

pub mod config;
pub mod console_system;
pub mod tracing;

pub use config::*;
pub use console_system::*;
pub use self::tracing::*;
