use thiserror::Error;

use crate::client_actor::ClientError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::storage::StorageError;

/// Failures while starting, seeding, dumping or stopping the system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error("actor task failed: {0}")]
    ActorTask(String),
}
