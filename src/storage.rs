//! Table row shapes and the JSON snapshot used to seed and dump the stores.
//!
//! Column names match the relational schema (`cpf_cnpj`, `zip_code`,
//! `client_id`, `order_date`, `with_invoice`, `total_amount`, `product_id`,
//! `unit_price`, `total_price`). Rows written before `client_type`, `status`
//! and `line_number` existed still load; see [`ClientRow`] for the migration.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{
    Address, Client, ClientId, ClientKind, Order, OrderId, OrderItem, OrderStatus, Product, ProductId,
    ProductStatus, Unit,
};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("snapshot I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("order item references unknown order {0}")]
    OrphanItem(OrderId),
    #[error("order {0} has amounts too large to total")]
    Overflow(OrderId),
}

/// `clients` table row.
///
/// `client_type` is absent in legacy rows; the kind is then inferred from the
/// length of `cpf_cnpj` and defaults to individual when that fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRow {
    pub id: ClientId,
    pub name: String,
    #[serde(default)]
    pub client_type: Option<ClientKind>,
    pub cpf_cnpj: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    #[serde(default)]
    pub fantasy_name: Option<String>,
    #[serde(default)]
    pub state_registration: Option<String>,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// `products` table row. `name` and `description` both hold the description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// `orders` table row. `order_date` is a date-only ISO string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRow {
    pub id: OrderId,
    pub client_id: ClientId,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
    pub with_invoice: bool,
    pub total_amount: Decimal,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// `order_items` table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemRow {
    pub order_id: OrderId,
    #[serde(default)]
    pub line_number: Option<u32>,
    pub product_id: ProductId,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

impl From<&Client> for ClientRow {
    fn from(client: &Client) -> Self {
        let address = client.address.clone();
        Self {
            id: client.id,
            name: client.name.clone(),
            client_type: Some(client.kind),
            cpf_cnpj: client.document.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            street: address.street,
            number: address.number,
            complement: address.complement,
            neighborhood: address.neighborhood,
            city: address.city,
            state: address.state,
            zip_code: address.zip_code,
            fantasy_name: client.fantasy_name.clone(),
            state_registration: client.state_registration.clone(),
            observations: client.observations.clone(),
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        let kind = row.client_type.unwrap_or_else(|| {
            let document = row.cpf_cnpj.as_deref().unwrap_or("");
            ClientKind::infer(document).unwrap_or_else(|| {
                warn!(client_id = %row.id, "Cannot classify legacy client from its document, assuming individual");
                ClientKind::Individual
            })
        });
        Self {
            id: row.id,
            name: row.name,
            kind,
            document: row.cpf_cnpj,
            phone: row.phone,
            email: row.email,
            fantasy_name: row.fantasy_name,
            state_registration: row.state_registration,
            address: Address {
                street: row.street,
                number: row.number,
                complement: row.complement,
                neighborhood: row.neighborhood,
                city: row.city,
                state: row.state,
                zip_code: row.zip_code,
            },
            observations: row.observations,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.description.clone(),
            description: Some(product.description.clone()),
            price: product.unit_price,
            unit: product.unit,
            status: product.status,
            stock_quantity: product.stock_quantity,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            description: row.description.filter(|d| !d.is_empty()).unwrap_or(row.name),
            unit: row.unit,
            unit_price: row.price,
            status: row.status,
            stock_quantity: row.stock_quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            client_id: order.client_id,
            order_date: order.date,
            status: order.status,
            with_invoice: order.with_invoice,
            total_amount: order.total,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl OrderItemRow {
    pub fn from_item(order_id: OrderId, item: &OrderItem) -> Self {
        Self {
            order_id,
            line_number: Some(item.line),
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total,
        }
    }
}

/// Every table, as rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub clients: Vec<ClientRow>,
    #[serde(default)]
    pub products: Vec<ProductRow>,
    #[serde(default)]
    pub orders: Vec<OrderRow>,
    #[serde(default)]
    pub order_items: Vec<OrderItemRow>,
}

/// Domain records rebuilt from a snapshot.
#[derive(Debug, Clone, Default)]
pub struct Records {
    pub clients: Vec<Client>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

impl Snapshot {
    pub fn from_records(clients: &[Client], products: &[Product], orders: &[Order]) -> Self {
        Self {
            clients: clients.iter().map(ClientRow::from).collect(),
            products: products.iter().map(ProductRow::from).collect(),
            orders: orders.iter().map(OrderRow::from).collect(),
            order_items: orders
                .iter()
                .flat_map(|order| order.items.iter().map(|item| OrderItemRow::from_item(order.id, item)))
                .collect(),
        }
    }

    /// Groups items under their orders and recomputes every total.
    ///
    /// A stored `total_amount` that disagrees with its items is replaced by the
    /// recomputed value and logged.
    pub fn into_records(self) -> Result<Records, StorageError> {
        let mut items_by_order: BTreeMap<OrderId, Vec<OrderItemRow>> = BTreeMap::new();
        for row in self.order_items {
            items_by_order.entry(row.order_id).or_default().push(row);
        }

        let mut orders = Vec::with_capacity(self.orders.len());
        for row in self.orders {
            let mut rows = items_by_order.remove(&row.id).unwrap_or_default();
            // Stable: legacy rows without a line number keep file order.
            rows.sort_by_key(|r| r.line_number.unwrap_or(u32::MAX));
            let mut order = Order {
                id: row.id,
                client_id: row.client_id,
                date: row.order_date,
                status: row.status,
                with_invoice: row.with_invoice,
                total: row.total_amount,
                items: rows
                    .into_iter()
                    .map(|r| OrderItem {
                        line: 0,
                        product_id: r.product_id,
                        quantity: r.quantity,
                        unit_price: r.unit_price,
                        total: r.total_price,
                    })
                    .collect(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            };
            let stored_total = order.total;
            order.recompute().map_err(|_| StorageError::Overflow(order.id))?;
            if order.total != stored_total {
                warn!(order_id = %order.id, stored = %stored_total, computed = %order.total, "Stored order total did not match its items");
            }
            orders.push(order);
        }

        if let Some((order_id, _)) = items_by_order.into_iter().next() {
            return Err(StorageError::OrphanItem(order_id));
        }

        Ok(Records {
            clients: self.clients.into_iter().map(Client::from).collect(),
            products: self.products.into_iter().map(Product::from).collect(),
            orders,
        })
    }

    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let raw = fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        info!(
            path = %path.display(),
            clients = snapshot.clients.len(),
            products = snapshot.products.len(),
            orders = snapshot.orders.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw).map_err(|source| StorageError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "Snapshot written");
        Ok(())
    }
}
