use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::domain::{Client, Order, OrderDetail, OrderId, OrderStatus, Product};
use crate::forms::{available_products, FormMode, OrderForm};
use crate::notify::Notifier;
use crate::stores::{ClientStore, OrderStore, ProductStore};
use crate::views::OrderView;

use super::SubmitOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Closed,
}

impl StatusFilter {
    pub fn accepts(self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Open => status == OrderStatus::Open,
            StatusFilter::Closed => status == OrderStatus::Closed,
        }
    }
}

/// Which row buttons an order gets. Closed orders are view-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRowActions {
    pub view: bool,
    pub edit: bool,
    pub delete: bool,
    pub close: bool,
}

impl OrderRowActions {
    pub fn for_order(order: &Order) -> Self {
        let open = order.is_open();
        Self {
            view: true,
            edit: open,
            delete: open,
            close: open,
        }
    }
}

/// A destructive action waiting for the user to confirm it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConfirmation {
    Delete(OrderId),
    Close(OrderId),
}

pub struct OrdersPage {
    order_store: OrderStore,
    client_store: ClientStore,
    product_store: ProductStore,
    notifier: Notifier,
    orders: Vec<OrderDetail>,
    clients: Vec<Client>,
    products: Vec<Product>,
    loading: bool,
    search: String,
    status_filter: StatusFilter,
    form: Option<OrderForm>,
    selected: Option<OrderId>,
    pending: Option<PendingConfirmation>,
}

impl OrdersPage {
    pub fn new(
        order_store: OrderStore,
        client_store: ClientStore,
        product_store: ProductStore,
        notifier: Notifier,
    ) -> Self {
        Self {
            order_store,
            client_store,
            product_store,
            notifier,
            orders: Vec::new(),
            clients: Vec::new(),
            products: Vec::new(),
            loading: false,
            search: String::new(),
            status_filter: StatusFilter::All,
            form: None,
            selected: None,
            pending: None,
        }
    }

    /// Re-fetches orders with their clients, plus the client and product
    /// lists the order form chooses from.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.order_store.list_detailed().await {
            Ok(orders) => {
                debug!(count = orders.len(), "Orders fetched");
                self.orders = orders;
            }
            Err(e) => self.notifier.failure("Failed to load orders", &e),
        }
        match self.client_store.list_clients().await {
            Ok(clients) => self.clients = clients,
            Err(e) => self.notifier.failure("Failed to load clients", &e),
        }
        match self.product_store.list_products().await {
            Ok(products) => self.products = products,
            Err(e) => self.notifier.failure("Failed to load products", &e),
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Most recent first.
    pub fn orders(&self) -> &[OrderDetail] {
        &self.orders
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Products offered on new lines.
    pub fn available_products(&self) -> Vec<&Product> {
        available_products(&self.products)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    pub fn filtered(&self) -> Vec<&OrderDetail> {
        let needle = self.search.to_lowercase();
        self.orders
            .iter()
            .filter(|d| d.client_name().to_lowercase().contains(&needle))
            .filter(|d| self.status_filter.accepts(d.order.status))
            .collect()
    }

    pub fn row_actions(&self, id: OrderId) -> Option<OrderRowActions> {
        self.find(id).map(|d| OrderRowActions::for_order(&d.order))
    }

    pub fn open_create(&mut self, today: NaiveDate) {
        self.form = Some(OrderForm::new(today));
    }

    /// Only open orders can be edited.
    pub fn open_edit(&mut self, id: OrderId) -> bool {
        match self.find(id) {
            Some(detail) if detail.order.is_open() => {
                self.form = Some(OrderForm::from_detail(&detail.order, &self.products));
                true
            }
            _ => false,
        }
    }

    pub fn form(&self) -> Option<&OrderForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut OrderForm> {
        self.form.as_mut()
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Saves header and items in one write.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        let Some(form) = &self.form else {
            return SubmitOutcome::Idle;
        };
        let mode = form.mode;
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        let (saved, title, action) = match mode {
            FormMode::Create => (
                self.order_store.create_order(draft).await,
                "Order created",
                "Failed to create order",
            ),
            FormMode::Edit(id) => (
                self.order_store.update_order(id, draft).await,
                "Order updated",
                "Failed to update order",
            ),
        };
        match saved {
            Ok(detail) => {
                self.notifier
                    .success(title, format!("Order #{} for {} was saved", detail.order.id, detail.client_name()));
                self.form = None;
                self.refresh().await;
                SubmitOutcome::Saved
            }
            Err(e) => {
                self.notifier.failure(action, &e);
                SubmitOutcome::Failed
            }
        }
    }

    pub fn select(&mut self, id: OrderId) -> bool {
        let known = self.find(id).is_some();
        if known {
            self.selected = Some(id);
        }
        known
    }

    pub fn selected(&self) -> Option<OrderView> {
        self.selected.and_then(|id| self.view(id))
    }

    pub fn view(&self, id: OrderId) -> Option<OrderView> {
        self.find(id).map(|d| OrderView::new(d, &self.products))
    }

    pub fn request_delete(&mut self, id: OrderId) -> bool {
        self.request(id, PendingConfirmation::Delete(id), |a| a.delete)
    }

    pub fn request_close(&mut self, id: OrderId) -> bool {
        self.request(id, PendingConfirmation::Close(id), |a| a.close)
    }

    pub fn pending(&self) -> Option<PendingConfirmation> {
        self.pending
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Runs the pending action. `false` when nothing was pending or the store refused.
    #[instrument(skip(self))]
    pub async fn confirm(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        let done = match pending {
            PendingConfirmation::Delete(id) => match self.order_store.delete_order(id).await {
                Ok(()) => {
                    self.notifier.success("Order removed", format!("Order #{id} was removed"));
                    if self.selected == Some(id) {
                        self.selected = None;
                    }
                    true
                }
                Err(e) => {
                    self.notifier.failure("Failed to remove order", &e);
                    false
                }
            },
            PendingConfirmation::Close(id) => match self.order_store.close_order(id).await {
                Ok(_) => {
                    self.notifier.success("Order closed", format!("Order #{id} was closed"));
                    true
                }
                Err(e) => {
                    self.notifier.failure("Failed to update status", &e);
                    false
                }
            },
        };
        if done {
            self.refresh().await;
        }
        done
    }

    fn request(
        &mut self,
        id: OrderId,
        pending: PendingConfirmation,
        allowed: impl Fn(OrderRowActions) -> bool,
    ) -> bool {
        let offered = self.row_actions(id).is_some_and(allowed);
        if offered {
            self.pending = Some(pending);
        }
        offered
    }

    fn find(&self, id: OrderId) -> Option<&OrderDetail> {
        self.orders.iter().find(|d| d.order.id == id)
    }
}
