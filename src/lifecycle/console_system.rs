use crate::clients::{LoadScope, OrderItemClient};
use crate::lifecycle::ConsoleConfig;
use crate::refresh::{self, ConsoleClient};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Runs a console session against the in-memory order service.
///
/// Two actors are spawned:
/// - the order-item actor, holding the orders ([`OrderItemClient`]);
/// - the refresh coordinator, reading and writing through that client
///   ([`ConsoleClient`]).
///
/// # Example
///
/// ```ignore
/// let system = ConsoleSystem::new(&ConsoleConfig::default(), LoadScope::day(date));
/// system.orders.create_subscription(plan).await?;
/// system.console.reload(None).await?;
/// system.shutdown().await?;
/// ```
pub struct ConsoleSystem {
    pub console: ConsoleClient,
    pub orders: OrderItemClient,
    handles: Vec<JoinHandle<()>>,
}

impl ConsoleSystem {
    pub fn new(config: &ConsoleConfig, scope: LoadScope) -> Self {
        let (order_actor, order_client) = crate::order_item_actor::new(config.mailbox_capacity);
        let order_handle = tokio::spawn(order_actor.run(()));
        let orders = OrderItemClient::new(order_client);

        let (console, console_handle) = refresh::spawn(
            Arc::new(orders.clone()),
            scope,
            config.criteria(),
            config.mailbox_capacity,
        );

        Self {
            console,
            orders,
            // Coordinator first: it holds a client of the order actor.
            handles: vec![console_handle, order_handle],
        }
    }

    /// Drops both clients, then waits for the actors to drain and stop.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down console...");

        drop(self.console);
        drop(self.orders);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Console shutdown complete.");
        Ok(())
    }
}
