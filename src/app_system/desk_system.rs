use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::actor_framework::{Entity, ResourceActor, ResourceClient};
use crate::config::AppConfig;
use crate::domain::{Client, Order, Product};
use crate::storage::{Records, Snapshot};
use crate::stores::{ClientStore, OrderStore, ProductStore};

use super::SystemError;

/// The running application: one actor per table plus the store handles over them.
pub struct DeskSystem {
    pub client_store: ClientStore,
    pub product_store: ProductStore,
    pub order_store: OrderStore,
    handles: Vec<JoinHandle<()>>,
}

impl DeskSystem {
    /// Starts the actors and imports `seed`, if any.
    ///
    /// Each id counter starts one past the highest imported id.
    #[instrument(skip_all, fields(buffer = config.channel_buffer, seeded = seed.is_some()))]
    pub async fn start(config: &AppConfig, seed: Option<Snapshot>) -> Result<Self, SystemError> {
        let records = match seed {
            Some(snapshot) => snapshot.into_records()?,
            None => Records::default(),
        };
        let buffer = config.channel_buffer;

        // 1. Client table
        let (client_actor, client_resource) = spawn_table::<Client, _>(buffer, &records.clients, |c| c.id.0);
        let client_store = ClientStore::new(client_resource);
        let client_handle = tokio::spawn(client_actor.run());

        // 2. Product table
        let (product_actor, product_resource) = spawn_table::<Product, _>(buffer, &records.products, |p| p.id.0);
        let product_store = ProductStore::new(product_resource);
        let product_handle = tokio::spawn(product_actor.run());

        // 3. Order table, which checks references against the other two
        let (order_actor, order_resource) = spawn_table::<Order, _>(buffer, &records.orders, |o| o.id.0);
        let order_store = OrderStore::new(order_resource, client_store.clone(), product_store.clone());
        let order_handle = tokio::spawn(order_actor.run());

        let system = Self {
            client_store,
            product_store,
            order_store,
            handles: vec![client_handle, product_handle, order_handle],
        };

        let clients = system.client_store.import_clients(records.clients).await?;
        let products = system.product_store.import_products(records.products).await?;
        let orders = system.order_store.import_orders(records.orders).await?;
        info!(clients, products, orders, "System started");
        Ok(system)
    }

    /// Dumps every table as storage rows.
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<Snapshot, SystemError> {
        let clients = self.client_store.list_clients().await?;
        let products = self.product_store.list_products().await?;
        let orders = self.order_store.list_orders().await?;
        Ok(Snapshot::from_records(&clients, &products, &orders))
    }

    /// Drops every handle so the actors see their channels close, then waits for them.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        drop(self.order_store);
        drop(self.product_store);
        drop(self.client_store);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::ActorTask(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

fn spawn_table<T, F>(buffer: usize, existing: &[T], raw_id: F) -> (ResourceActor<T>, ResourceClient<T>)
where
    T: Entity,
    T::Id: From<u64>,
    F: Fn(&T) -> u64,
{
    let first = existing.iter().map(raw_id).max().unwrap_or(0) + 1;
    let counter = Arc::new(AtomicU64::new(first));
    let next_id = move || T::Id::from(counter.fetch_add(1, Ordering::SeqCst));
    ResourceActor::<T>::new(buffer, next_id)
}
