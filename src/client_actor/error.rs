use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during client operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    #[error("Client not found: {0}")]
    NotFound(String),
    #[error("Client validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<ClientError>> for ClientError {
    fn from(err: FrameworkError<ClientError>) -> Self {
        match err {
            FrameworkError::Entity(inner) => inner,
            FrameworkError::NotFound { id, .. } => ClientError::NotFound(id),
            other => ClientError::ActorCommunicationError(other.to_string()),
        }
    }
}
