use std::cmp::Ordering;

use chrono::Utc;
use rust_decimal::Decimal;

use super::{OrderAction, OrderActionResult, OrderError};
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderDraft, OrderId, OrderItem, OrderItemDraft, OrderStatus};

impl Entity for Order {
    type Id = OrderId;
    type CreatePayload = OrderDraft;
    type Patch = OrderDraft;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Error = OrderError;

    const KIND: &'static str = "order";

    fn id(&self) -> &OrderId {
        &self.id
    }

    /// Creates an Open order with its complete item set.
    fn from_create(id: OrderId, draft: OrderDraft) -> Result<Self, OrderError> {
        check_items(&draft.items, true)?;
        let now = Utc::now();
        let mut order = Self {
            id,
            client_id: draft.client_id,
            date: draft.date,
            status: OrderStatus::Open,
            with_invoice: draft.with_invoice,
            total: Decimal::ZERO,
            items: build_items(&draft.items)?,
            created_at: now,
            updated_at: now,
        };
        recompute(&mut order)?;
        Ok(order)
    }

    /// Replaces header and items in one step. Closed orders are read-only.
    fn on_update(&mut self, draft: OrderDraft) -> Result<(), OrderError> {
        self.ensure_open()?;
        check_items(&draft.items, true)?;
        self.client_id = draft.client_id;
        self.date = draft.date;
        self.with_invoice = draft.with_invoice;
        self.items = build_items(&draft.items)?;
        recompute(self)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn on_delete(&self) -> Result<(), OrderError> {
        self.ensure_open()
    }

    /// # Actions
    /// - `SetStatus(status)`: `Open → Closed` only
    /// - `InsertItems(items)`: appends lines to an open order
    /// - `DeleteItems`: clears every line of an open order
    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        let result = match action {
            OrderAction::SetStatus(next) => {
                if !self.status.can_transition_to(next) {
                    return Err(match (self.status, next) {
                        (OrderStatus::Closed, OrderStatus::Closed) => OrderError::AlreadyClosed(self.id),
                        (from, to) => OrderError::InvalidTransition { from, to },
                    });
                }
                self.status = next;
                OrderActionResult::SetStatus(next)
            }
            OrderAction::InsertItems(drafts) => {
                self.ensure_open()?;
                check_items(&drafts, false)?;
                self.items.extend(build_items(&drafts)?);
                OrderActionResult::InsertItems(drafts.len())
            }
            OrderAction::DeleteItems => {
                self.ensure_open()?;
                let removed = self.items.len();
                self.items.clear();
                OrderActionResult::DeleteItems(removed)
            }
        };
        recompute(self)?;
        self.updated_at = Utc::now();
        Ok(result)
    }

    /// Most recent order date first.
    fn list_order(&self, other: &Self) -> Ordering {
        other.date.cmp(&self.date).then(other.id.cmp(&self.id))
    }
}

impl Order {
    fn ensure_open(&self) -> Result<(), OrderError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(OrderError::ReadOnly(self.id))
        }
    }
}

fn build_items(drafts: &[OrderItemDraft]) -> Result<Vec<OrderItem>, OrderError> {
    drafts
        .iter()
        .enumerate()
        .map(|(index, draft)| {
            OrderItem::from_draft(index as u32 + 1, draft).map_err(|e| {
                OrderError::ValidationError(format!("item {}: {}", index + 1, e))
            })
        })
        .collect()
}

fn recompute(order: &mut Order) -> Result<(), OrderError> {
    order
        .recompute()
        .map_err(|e| OrderError::ValidationError(format!("order total: {}", e)))
}

fn check_items(items: &[OrderItemDraft], require_one: bool) -> Result<(), OrderError> {
    if require_one && items.is_empty() {
        return Err(OrderError::ValidationError("an order needs at least one item".to_string()));
    }
    for (index, item) in items.iter().enumerate() {
        if item.quantity <= Decimal::ZERO {
            return Err(OrderError::ValidationError(format!(
                "item {} has a non-positive quantity",
                index + 1
            )));
        }
        if item.unit_price <= Decimal::ZERO {
            return Err(OrderError::ValidationError(format!(
                "item {} has a non-positive unit price",
                index + 1
            )));
        }
    }
    Ok(())
}
