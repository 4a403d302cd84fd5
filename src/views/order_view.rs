use std::collections::HashMap;

use crate::domain::{ClientSummary, OrderDetail, Product, ProductId};
use crate::format::{format_currency, format_date, format_quantity};

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineView {
    pub product: String,
    pub quantity: String,
    pub unit_price: String,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub number: String,
    pub date: String,
    pub client: Option<ClientSummary>,
    pub status: &'static str,
    pub invoice: &'static str,
    pub lines: Vec<OrderLineView>,
    pub total: String,
}

impl OrderView {
    /// Product names are looked up in `catalog`; a deleted product shows as its id.
    pub fn new(detail: &OrderDetail, catalog: &[Product]) -> Self {
        let names: HashMap<ProductId, &str> = catalog.iter().map(|p| (p.id, p.description.as_str())).collect();
        let order = &detail.order;
        Self {
            number: format!("#{}", order.id),
            date: format_date(order.date),
            client: detail.client.clone(),
            status: order.status.label(),
            invoice: if order.with_invoice {
                "With invoice"
            } else {
                "Without invoice"
            },
            lines: order
                .items
                .iter()
                .map(|item| OrderLineView {
                    product: names
                        .get(&item.product_id)
                        .map(|name| name.to_string())
                        .unwrap_or_else(|| format!("Product #{}", item.product_id)),
                    quantity: format_quantity(item.quantity),
                    unit_price: format_currency(item.unit_price),
                    total: format_currency(item.total),
                })
                .collect(),
            total: format_currency(order.total),
        }
    }
}
