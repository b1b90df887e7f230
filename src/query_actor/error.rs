use thiserror::Error;

use crate::actor_framework::StoreError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    #[error("Query not found: {0}")]
    NotFound(String),
    #[error("Query already answered: {0}")]
    AlreadyAnswered(String),
    #[error("Query validation error: {0}")]
    Validation(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<StoreError<QueryError>> for QueryError {
    fn from(err: StoreError<QueryError>) -> Self {
        match err {
            StoreError::NotFound(id) => QueryError::NotFound(id),
            StoreError::Rejected(e) => e,
            other => QueryError::ActorCommunicationError(other.to_string()),
        }
    }
}
