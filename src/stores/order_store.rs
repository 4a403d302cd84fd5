use std::collections::{BTreeSet, HashMap};

use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::{Order, OrderDetail, OrderDraft, OrderId, OrderItemDraft, OrderStatus, ProductId};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::stores::{ClientStore, ProductStore};

/// Handle to the order table.
///
/// Checks that the referenced client and products exist before any write,
/// and joins the client back in on reads.
///
/// The reference checks are best-effort: they and the write are separate round-trips,
/// so a client or product deleted in between still ends up referenced.
#[derive(Clone)]
pub struct OrderStore {
    inner: ResourceClient<Order>,
    client_store: ClientStore,
    product_store: ProductStore,
}

impl OrderStore {
    pub fn new(inner: ResourceClient<Order>, client_store: ClientStore, product_store: ProductStore) -> Self {
        Self {
            inner,
            client_store,
            product_store,
        }
    }

    /// Inserts header and items in a single write, then reads the order back joined with its client.
    #[instrument(skip(self, draft), fields(client_id = %draft.client_id, items = draft.items.len()))]
    pub async fn create_order(&self, draft: OrderDraft) -> Result<OrderDetail, OrderError> {
        info!("Processing create_order request");
        self.validate_references(&draft).await?;

        let order = self.inner.create(draft).await?;
        info!(order_id = %order.id, total = %order.total, "Order created");
        self.read_back(order.id).await
    }

    /// Replaces the header and the whole item set in a single write.
    #[instrument(skip(self, draft), fields(client_id = %draft.client_id, items = draft.items.len()))]
    pub async fn update_order(&self, id: OrderId, draft: OrderDraft) -> Result<OrderDetail, OrderError> {
        info!("Processing update_order request");
        self.validate_references(&draft).await?;

        let order = self.inner.update(id, draft).await?;
        info!(total = %order.total, "Order updated");
        self.read_back(order.id).await
    }

    #[instrument(skip(self))]
    pub async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<OrderStatus, OrderError> {
        debug!("Sending request");
        match self.inner.perform_action(id, OrderAction::SetStatus(status)).await? {
            OrderActionResult::SetStatus(status) => {
                info!(status = status.label(), "Order status changed");
                Ok(status)
            }
            other => Err(unexpected(other)),
        }
    }

    pub async fn close_order(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        self.update_status(id, OrderStatus::Closed).await
    }

    /// Appends lines to an open order.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn insert_items(&self, id: OrderId, items: Vec<OrderItemDraft>) -> Result<usize, OrderError> {
        debug!("Sending request");
        for product_id in items.iter().map(|i| i.product_id).collect::<BTreeSet<_>>() {
            self.ensure_product(product_id).await?;
        }
        match self.inner.perform_action(id, OrderAction::InsertItems(items)).await? {
            OrderActionResult::InsertItems(count) => Ok(count),
            other => Err(unexpected(other)),
        }
    }

    /// Removes every line of an open order.
    #[instrument(skip(self))]
    pub async fn delete_items(&self, id: OrderId) -> Result<usize, OrderError> {
        debug!("Sending request");
        match self.inner.perform_action(id, OrderAction::DeleteItems).await? {
            OrderActionResult::DeleteItems(count) => Ok(count),
            other => Err(unexpected(other)),
        }
    }

    /// Order with its client summary; `None` if the order does not exist.
    #[instrument(skip(self))]
    pub async fn get_detailed(&self, id: OrderId) -> Result<Option<OrderDetail>, OrderError> {
        debug!("Sending request");
        let Some(order) = self.inner.get(id).await? else {
            return Ok(None);
        };
        let client = self
            .client_store
            .get_client(order.client_id)
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?
            .map(|c| c.summary());
        Ok(Some(OrderDetail { order, client }))
    }

    /// Every order, most recent first, joined with its client.
    #[instrument(skip(self))]
    pub async fn list_detailed(&self) -> Result<Vec<OrderDetail>, OrderError> {
        debug!("Sending request");
        let orders = self.inner.list().await?;
        let clients: HashMap<_, _> = self
            .client_store
            .list_clients()
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?
            .into_iter()
            .map(|c| (c.id, c.summary()))
            .collect();

        let details: Vec<OrderDetail> = orders
            .into_iter()
            .map(|order| {
                let client = clients.get(&order.client_id).cloned();
                if client.is_none() {
                    warn!(order_id = %order.id, client_id = %order.client_id, "Order references a missing client");
                }
                OrderDetail { order, client }
            })
            .collect();
        info!(count = details.len(), "Listed orders");
        Ok(details)
    }

    async fn read_back(&self, id: OrderId) -> Result<OrderDetail, OrderError> {
        self.get_detailed(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    async fn validate_references(&self, draft: &OrderDraft) -> Result<(), OrderError> {
        // Step 1: Validate client
        match self.client_store.get_client(draft.client_id).await {
            Ok(Some(client)) => info!(client_name = %client.name, "Client validation successful"),
            Ok(None) => {
                error!("Client not found");
                return Err(OrderError::InvalidClient(draft.client_id.to_string()));
            }
            Err(e) => {
                error!(error = %e, "Client validation failed");
                return Err(OrderError::InvalidClient(format!("Client validation failed: {}", e)));
            }
        }

        // Step 2: Validate products
        if draft.items.is_empty() {
            return Err(OrderError::ValidationError("an order needs at least one item".to_string()));
        }
        for product_id in draft.items.iter().map(|i| i.product_id).collect::<BTreeSet<_>>() {
            self.ensure_product(product_id).await?;
        }
        Ok(())
    }

    async fn ensure_product(&self, product_id: ProductId) -> Result<(), OrderError> {
        match self.product_store.get_product(product_id).await {
            Ok(Some(product)) => {
                debug!(product = %product.description, "Product validation successful");
                Ok(())
            }
            Ok(None) => {
                error!(product_id = %product_id, "Product not found");
                Err(OrderError::InvalidProduct(product_id.to_string()))
            }
            Err(e) => {
                error!(error = %e, "Product validation failed");
                Err(OrderError::InvalidProduct(format!("Product validation failed: {}", e)))
            }
        }
    }
}

fn unexpected(result: OrderActionResult) -> OrderError {
    OrderError::ActorCommunicationError(format!("Unexpected result: {:?}", result))
}

impl_store_methods!(OrderStore, Order, OrderError, order, orders);
