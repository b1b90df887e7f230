use thiserror::Error;

use crate::actor_framework::StoreError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnnouncementError {
    #[error("Announcement not found: {0}")]
    NotFound(String),
    #[error("Announcement validation error: {0}")]
    Validation(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<StoreError<AnnouncementError>> for AnnouncementError {
    fn from(err: StoreError<AnnouncementError>) -> Self {
        match err {
            StoreError::NotFound(id) => AnnouncementError::NotFound(id),
            StoreError::Rejected(e) => e,
            other => AnnouncementError::ActorCommunicationError(other.to_string()),
        }
    }
}
