use chrono::NaiveDateTime;
use tracing::{debug, instrument};

use crate::domain::{OrderDetail, OrderId, Product};
use crate::notify::Notifier;
use crate::stores::{ClientStore, OrderStore, ProductStore};
use crate::views::OrderView;

use super::{compute_kpis, Kpis, Period};

pub struct Dashboard {
    order_store: OrderStore,
    client_store: ClientStore,
    product_store: ProductStore,
    notifier: Notifier,
    orders: Vec<OrderDetail>,
    products: Vec<Product>,
    client_count: usize,
    period: Period,
    loading: bool,
    pending_close: Option<OrderId>,
}

impl Dashboard {
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
            products: Vec::new(),
            client_count: 0,
            period: Period::default(),
            loading: false,
            pending_close: None,
        }
    }

    #[instrument(skip(self))]
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.order_store.list_detailed().await {
            Ok(orders) => self.orders = orders,
            Err(e) => self.notifier.failure("Failed to load orders", &e),
        }
        match self.product_store.list_products().await {
            Ok(products) => self.products = products,
            Err(e) => self.notifier.failure("Failed to load products", &e),
        }
        match self.client_store.count_clients().await {
            Ok(count) => self.client_count = count,
            Err(e) => self.notifier.failure("Failed to load clients", &e),
        }
        debug!(orders = self.orders.len(), products = self.products.len(), "Dashboard refreshed");
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn set_period(&mut self, period: Period) {
        self.period = period;
    }

    pub fn client_count(&self) -> usize {
        self.client_count
    }

    pub fn kpis(&self, now: NaiveDateTime) -> Kpis {
        let orders = self.orders.iter().map(|d| &d.order);
        compute_kpis(orders, self.products.len(), self.period, now)
    }

    /// Open orders only, most recent first.
    pub fn open_orders(&self) -> Vec<&OrderDetail> {
        self.orders.iter().filter(|d| d.order.is_open()).collect()
    }

    pub fn detail(&self, id: OrderId) -> Option<OrderView> {
        self.find(id).map(|d| OrderView::new(d, &self.products))
    }

    /// Only open orders can be closed.
    pub fn request_close(&mut self, id: OrderId) -> bool {
        let open = self.find(id).is_some_and(|d| d.order.is_open());
        if open {
            self.pending_close = Some(id);
        }
        open
    }

    pub fn pending_close(&self) -> Option<OrderId> {
        self.pending_close
    }

    pub fn cancel_close(&mut self) {
        self.pending_close = None;
    }

    #[instrument(skip(self))]
    pub async fn confirm_close(&mut self) -> bool {
        let Some(id) = self.pending_close.take() else {
            return false;
        };
        match self.order_store.close_order(id).await {
            Ok(_) => {
                self.notifier.success("Order closed", format!("Order #{id} was closed"));
                self.refresh().await;
                true
            }
            Err(e) => {
                self.notifier.failure("Failed to close order", &e);
                false
            }
        }
    }

    fn find(&self, id: OrderId) -> Option<&OrderDetail> {
        self.orders.iter().find(|d| d.order.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_system::DeskSystem;
    use crate::config::AppConfig;
    use crate::domain::{ClientDraft, ClientKind, OrderDraft, OrderItemDraft, ProductDraft, ProductStatus, Unit};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn closing_an_order_moves_it_into_the_kpis() {
        let system = DeskSystem::start(&AppConfig::default(), None).await.unwrap();
        let client = system
            .client_store
            .create_client(ClientDraft {
                name: "Ana".to_string(),
                kind: ClientKind::Individual,
                document: None,
                phone: "11999991234".to_string(),
                email: None,
                fantasy_name: None,
                state_registration: None,
                address: Default::default(),
                observations: None,
            })
            .await
            .unwrap();
        let product = system
            .product_store
            .create_product(ProductDraft {
                description: "Cabo".to_string(),
                unit: Unit::Meter,
                unit_price: dec!(2.5),
                status: ProductStatus::Active,
            })
            .await
            .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        let detail = system
            .order_store
            .create_order(OrderDraft {
                client_id: client.id,
                date: today,
                with_invoice: true,
                items: vec![OrderItemDraft {
                    product_id: product.id,
                    quantity: dec!(10),
                    unit_price: dec!(2.5),
                }],
            })
            .await
            .unwrap();

        let (notifier, mut feed) = Notifier::channel();
        let mut board = Dashboard::new(
            system.order_store.clone(),
            system.client_store.clone(),
            system.product_store.clone(),
            notifier,
        );
        board.refresh().await;
        let now = today.and_hms_opt(18, 0, 0).unwrap();

        assert_eq!(board.client_count(), 1);
        assert_eq!(board.open_orders().len(), 1);
        let before = board.kpis(now);
        assert_eq!(before.orders, 0);
        assert_eq!(before.active_customers, 1);
        assert_eq!(before.total_products, 1);
        assert_eq!(board.detail(detail.order.id).unwrap().invoice, "With invoice");
        assert_eq!(board.detail(OrderId(99)), None);

        assert!(board.request_close(detail.order.id));
        assert!(board.confirm_close().await);
        assert!(board.open_orders().is_empty());
        let after = board.kpis(now);
        assert_eq!(after.orders, 1);
        assert_eq!(after.revenue, dec!(25));
        assert_eq!(after.products_sold, dec!(10));
        assert!(!board.request_close(detail.order.id));

        board.set_period(Period::LastWeek);
        assert_eq!(board.kpis(now).orders, 0);
        assert_eq!(feed.drain().pop().unwrap().title, "Order closed");
        system.shutdown().await.unwrap();
    }
}
