use thiserror::Error;

use crate::actor_framework::StoreError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart not found for user: {0}")]
    NotFound(String),
    #[error("Item not found in cart: {0}")]
    ItemNotFound(String),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Product unavailable: {0}")]
    ProductUnavailable(String),
    #[error("Carts are cleared, not deleted: {0}")]
    NotDeletable(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<StoreError<CartError>> for CartError {
    fn from(err: StoreError<CartError>) -> Self {
        match err {
            StoreError::NotFound(user_id) => CartError::NotFound(user_id),
            StoreError::Rejected(e) => e,
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}
