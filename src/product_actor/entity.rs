use chrono::Utc;

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Product from validated creation parameters.
    ///
    /// # Errors
    /// Rejects an empty name or supplier and any price that is not strictly positive.
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        params.check()?;
        let now = Utc::now();
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            available_quantity: params.available_quantity,
            supplier_id: params.supplier_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies the fields present in `patch` and bumps `updated_at`.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        patch.check()?;
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.available_quantity {
            self.available_quantity = quantity;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::StockLevel(self.available_quantity)),
        }
    }
}
