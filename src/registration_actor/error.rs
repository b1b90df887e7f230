use thiserror::Error;

use crate::actor_framework::StoreError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistrationError {
    #[error("Registration not found: {0}")]
    NotFound(String),
    #[error("Training program not found: {0}")]
    ProgramNotFound(String),
    #[error("Registration validation error: {0}")]
    Validation(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<StoreError<RegistrationError>> for RegistrationError {
    fn from(err: StoreError<RegistrationError>) -> Self {
        match err {
            StoreError::NotFound(id) => RegistrationError::NotFound(id),
            StoreError::Rejected(e) => e,
            other => RegistrationError::ActorCommunicationError(other.to_string()),
        }
    }
}
