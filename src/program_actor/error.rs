use thiserror::Error;

use crate::actor_framework::StoreError;

/// Errors that can occur during training program operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProgramError {
    #[error("Training program not found: {0}")]
    NotFound(String),
    #[error("Training program validation error: {0}")]
    Validation(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<StoreError<ProgramError>> for ProgramError {
    fn from(err: StoreError<ProgramError>) -> Self {
        match err {
            StoreError::NotFound(id) => ProgramError::NotFound(id),
            StoreError::Rejected(e) => e,
            other => ProgramError::ActorCommunicationError(other.to_string()),
        }
    }
}
