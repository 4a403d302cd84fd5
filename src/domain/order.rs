use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ClientId, ClientSummary, OrderId, ProductId};

/// Order lifecycle. `Open → Closed` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Aberto", alias = "Open")]
    Open,
    #[serde(rename = "Fechado", alias = "Closed")]
    Closed,
}

impl OrderStatus {
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!((self, next), (OrderStatus::Open, OrderStatus::Closed))
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Open => "Open",
            OrderStatus::Closed => "Closed",
        }
    }
}

/// A line total or order total that does not fit in a `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount is too large")]
pub struct AmountOverflow;

/// `quantity × unit_price`, or `None` when the product overflows.
pub fn line_total(quantity: Decimal, unit_price: Decimal) -> Option<Decimal> {
    quantity.checked_mul(unit_price)
}

/// Sum that fails instead of panicking on overflow.
pub fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
}

/// One line of an order. Prices are a snapshot taken when the line was written.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    /// 1-based position within the order.
    pub line: u32,
    pub product_id: ProductId,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total: Decimal,
}

impl OrderItem {
    pub fn from_draft(line: u32, draft: &OrderItemDraft) -> Result<Self, AmountOverflow> {
        Ok(Self {
            line,
            product_id: draft.product_id,
            quantity: draft.quantity,
            unit_price: draft.unit_price,
            total: line_total(draft.quantity, draft.unit_price).ok_or(AmountOverflow)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub client_id: ClientId,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub with_invoice: bool,
    /// Always the sum of `items[].total`.
    pub total: Decimal,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }

    /// Renumbers lines and recomputes every total from quantity × unit price.
    ///
    /// On overflow the order is left partially updated; callers work on a copy.
    pub fn recompute(&mut self) -> Result<(), AmountOverflow> {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.line = index as u32 + 1;
            item.total = line_total(item.quantity, item.unit_price).ok_or(AmountOverflow)?;
        }
        self.total = checked_sum(self.items.iter().map(|item| item.total)).ok_or(AmountOverflow)?;
        Ok(())
    }

    /// Saturates instead of overflowing; only used for reporting.
    pub fn items_quantity(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.quantity))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemDraft {
    pub product_id: ProductId,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

/// Header plus the complete item set. Saving a draft replaces every item.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub client_id: ClientId,
    pub date: NaiveDate,
    pub with_invoice: bool,
    pub items: Vec<OrderItemDraft>,
}

/// An order read back together with its client.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetail {
    pub order: Order,
    /// `None` when the client row no longer exists.
    pub client: Option<ClientSummary>,
}

impl OrderDetail {
    pub fn client_name(&self) -> &str {
        self.client.as_ref().map(|c| c.name.as_str()).unwrap_or("")
    }
}
