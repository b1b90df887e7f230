use thiserror::Error;

use crate::actor_framework::StoreError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Product validation error: {0}")]
    Validation(String),
    #[error("Product {product_id} is not owned by supplier {supplier_id}")]
    NotOwner {
        product_id: String,
        supplier_id: String,
    },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<StoreError<ProductError>> for ProductError {
    fn from(err: StoreError<ProductError>) -> Self {
        match err {
            StoreError::NotFound(id) => ProductError::NotFound(id),
            StoreError::Rejected(e) => e,
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}
