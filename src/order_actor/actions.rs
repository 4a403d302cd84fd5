use crate::domain::{OrderItemDraft, OrderStatus};

/// Order operations beyond full create/replace.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order to a new status.
    ///
    /// # Errors
    /// Fails unless the move is `Open → Closed`.
    SetStatus(OrderStatus),
    /// Appends lines after the existing ones.
    InsertItems(Vec<OrderItemDraft>),
    /// Removes every line of the order.
    DeleteItems,
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    SetStatus(OrderStatus),
    /// Number of lines inserted
    InsertItems(usize),
    /// Number of lines removed
    DeleteItems(usize),
}
