#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    use crate::domain::{
        Address, Client, ClientId, ClientKind, Order, OrderDraft, OrderId, OrderItemDraft, OrderStatus, Product,
        ProductId, ProductStatus, Unit,
    };
    use crate::mock_framework::{
        create_mock_client, expect_action, expect_create, expect_get, expect_list, expect_update, MockReceiver,
    };
    use crate::actor_framework::FrameworkError;
    use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
    use crate::stores::{ClientStore, OrderStore, ProductStore};

    fn client(id: u64, name: &str) -> Client {
        let now = Utc::now();
        Client {
            id: ClientId(id),
            name: name.to_string(),
            kind: ClientKind::Individual,
            document: None,
            phone: Some("11999991234".to_string()),
            email: Some("ana@email.com".to_string()),
            fantasy_name: None,
            state_registration: None,
            address: Address::default(),
            observations: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn product(id: u64) -> Product {
        let now = Utc::now();
        Product {
            id: ProductId(id),
            description: format!("Product {id}"),
            unit: Unit::Each,
            unit_price: dec!(20),
            status: ProductStatus::Active,
            stock_quantity: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn draft(client_id: u64, product_ids: &[u64]) -> OrderDraft {
        OrderDraft {
            client_id: ClientId(client_id),
            date: NaiveDate::from_ymd_opt(2024, 1, 25).unwrap(),
            with_invoice: true,
            items: product_ids
                .iter()
                .map(|&id| OrderItemDraft {
                    product_id: ProductId(id),
                    quantity: dec!(5),
                    unit_price: dec!(20),
                })
                .collect(),
        }
    }

    fn mocked_store() -> (OrderStore, MockReceiver<Client>, MockReceiver<Product>, MockReceiver<Order>) {
        let (client_inner, client_rx) = create_mock_client::<Client>(10);
        let (product_inner, product_rx) = create_mock_client::<Product>(10);
        let (order_inner, order_rx) = create_mock_client::<Order>(10);

        let client_store = ClientStore::new(client_inner);
        let product_store = ProductStore::new(product_inner);
        let order_store = OrderStore::new(order_inner, client_store, product_store);
        (order_store, client_rx, product_rx, order_rx)
    }

    #[tokio::test]
    async fn test_order_creation_flow() {
        // 1. Setup Mocks
        let (order_store, mut client_rx, mut product_rx, mut order_rx) = mocked_store();

        // 2. Execute Order Creation in background
        let order_task = tokio::spawn(async move { order_store.create_order(draft(1, &[2, 1, 2])).await });

        // 3. Verify Interactions

        // Expect Client Get
        let (client_id, responder) = expect_get(&mut client_rx).await.expect("Expected Client Get");
        assert_eq!(client_id, ClientId(1));
        responder.send(Ok(Some(client(1, "Ana")))).unwrap();

        // Expect one Product Get per distinct product, lowest id first
        for expected in [1, 2] {
            let (product_id, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
            assert_eq!(product_id, ProductId(expected));
            responder.send(Ok(Some(product(expected)))).unwrap();
        }

        // Expect a single Order Create carrying header and every item
        let (payload, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(payload.client_id, ClientId(1));
        assert_eq!(payload.items.len(), 3);
        let order = <Order as crate::actor_framework::Entity>::from_create(OrderId(7), payload).unwrap();
        assert_eq!(order.status, OrderStatus::Open);
        responder.send(Ok(order.clone())).unwrap();

        // Expect the read-back: order, then its client
        let (order_id, responder) = expect_get(&mut order_rx).await.expect("Expected Order Get");
        assert_eq!(order_id, OrderId(7));
        responder.send(Ok(Some(order))).unwrap();
        let (_, responder) = expect_get(&mut client_rx).await.expect("Expected Client Get");
        responder.send(Ok(Some(client(1, "Ana")))).unwrap();

        // 4. Verify Result
        let detail = order_task.await.unwrap().unwrap();
        assert_eq!(detail.order.id, OrderId(7));
        assert_eq!(detail.order.total, dec!(300));
        assert_eq!(detail.client_name(), "Ana");
        assert_eq!(detail.client.unwrap().email.as_deref(), Some("ana@email.com"));
    }

    #[tokio::test]
    async fn unknown_client_stops_before_any_order_write() {
        let (order_store, mut client_rx, mut product_rx, mut order_rx) = mocked_store();
        let order_task = tokio::spawn(async move { order_store.create_order(draft(9, &[1])).await });

        let (_, responder) = expect_get(&mut client_rx).await.expect("Expected Client Get");
        responder.send(Ok(None)).unwrap();

        let result = order_task.await.unwrap();
        assert_eq!(result, Err(OrderError::InvalidClient("9".to_string())));
        assert!(product_rx.try_recv().is_err());
        assert!(order_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unknown_product_stops_before_any_order_write() {
        let (order_store, mut client_rx, mut product_rx, mut order_rx) = mocked_store();
        let order_task = tokio::spawn(async move { order_store.create_order(draft(1, &[4])).await });

        let (_, responder) = expect_get(&mut client_rx).await.expect("Expected Client Get");
        responder.send(Ok(Some(client(1, "Ana")))).unwrap();
        let (_, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
        responder.send(Ok(None)).unwrap();

        let result = order_task.await.unwrap();
        assert_eq!(result, Err(OrderError::InvalidProduct("4".to_string())));
        assert!(order_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn closing_sends_a_status_action() {
        let (order_store, _client_rx, _product_rx, mut order_rx) = mocked_store();
        let task = tokio::spawn(async move { order_store.close_order(OrderId(3)).await });

        let (order_id, action, responder) = expect_action(&mut order_rx).await.expect("Expected Order Action");
        assert_eq!(order_id, OrderId(3));
        match action {
            OrderAction::SetStatus(status) => assert_eq!(status, OrderStatus::Closed),
            other => panic!("Unexpected action: {:?}", other),
        }
        responder.send(Ok(OrderActionResult::SetStatus(OrderStatus::Closed))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(OrderStatus::Closed));
    }

    #[tokio::test]
    async fn listing_joins_clients_and_tolerates_missing_ones() {
        let (order_store, mut client_rx, _product_rx, mut order_rx) = mocked_store();
        let task = tokio::spawn(async move { order_store.list_detailed().await });

        let mut kept = <Order as crate::actor_framework::Entity>::from_create(OrderId(1), draft(1, &[1])).unwrap();
        kept.status = OrderStatus::Closed;
        let orphan = <Order as crate::actor_framework::Entity>::from_create(OrderId(2), draft(5, &[1])).unwrap();

        let responder = expect_list(&mut order_rx).await.expect("Expected Order List");
        responder.send(Ok(vec![orphan, kept])).unwrap();
        let responder = expect_list(&mut client_rx).await.expect("Expected Client List");
        responder.send(Ok(vec![client(1, "Ana")])).unwrap();

        let details = task.await.unwrap().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].client, None);
        assert_eq!(details[0].client_name(), "");
        assert_eq!(details[1].client_name(), "Ana");
    }

    #[tokio::test]
    async fn rejected_update_surfaces_the_entity_error() {
        let (order_store, mut client_rx, mut product_rx, mut order_rx) = mocked_store();
        let task = tokio::spawn(async move { order_store.update_order(OrderId(8), draft(1, &[1])).await });

        let (_, responder) = expect_get(&mut client_rx).await.expect("Expected Client Get");
        responder.send(Ok(Some(client(1, "Ana")))).unwrap();
        let (_, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
        responder.send(Ok(Some(product(1)))).unwrap();

        let (order_id, patch, responder) = expect_update(&mut order_rx).await.expect("Expected Order Update");
        assert_eq!(order_id, OrderId(8));
        assert_eq!(patch.items.len(), 1);
        responder
            .send(Err(FrameworkError::Entity(OrderError::ReadOnly(OrderId(8)))))
            .unwrap();

        assert_eq!(task.await.unwrap(), Err(OrderError::ReadOnly(OrderId(8))));
    }
}
