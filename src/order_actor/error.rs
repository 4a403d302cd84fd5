use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::{OrderId, OrderStatus};

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Invalid client: {0}")]
    InvalidClient(String),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Order {0} is closed and cannot be changed")]
    ReadOnly(OrderId),
    #[error("Order {0} is already closed")]
    AlreadyClosed(OrderId),
    #[error("Cannot move order from {} to {}", .from.label(), .to.label())]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<OrderError>> for OrderError {
    fn from(err: FrameworkError<OrderError>) -> Self {
        match err {
            FrameworkError::Entity(inner) => inner,
            FrameworkError::NotFound { id, .. } => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
