use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::validation::not_blank;
use crate::domain::ProductSnapshot;
use crate::product_actor::ProductError;

/// A product listed by a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub available_quantity: u32,
    pub supplier_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The display fields a cart keeps a copy of.
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            name: self.name.clone(),
            price: self.price,
            description: self.description.clone(),
        }
    }
}

/// Payload for listing a new product.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(custom = "not_blank")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub available_quantity: u32,
    #[validate(length(min = 1, message = "supplier is required"))]
    pub supplier_id: String,
}

impl ProductCreate {
    pub fn check(&self) -> Result<(), ProductError> {
        self.validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;
        check_price(self.price)
    }
}

/// Partial update of a product. Only `name`, `price` and `description` are copied into carts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub available_quantity: Option<u32>,
}

impl ProductPatch {
    pub fn check(&self) -> Result<(), ProductError> {
        if let Some(name) = &self.name {
            not_blank(name).map_err(|_| ProductError::Validation("name is required".to_string()))?;
        }
        match self.price {
            Some(price) => check_price(price),
            None => Ok(()),
        }
    }

    pub fn snapshot_changes(&self) -> crate::domain::SnapshotPatch {
        crate::domain::SnapshotPatch {
            name: self.name.clone(),
            price: self.price,
            description: self.description.clone(),
        }
    }
}

/// Raw supplier form input. Numbers arrive as text and are coerced on submit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    pub quantity: String,
}

impl ProductForm {
    pub fn into_create(self, supplier_id: impl Into<String>) -> Result<ProductCreate, ProductError> {
        let price = coerce_number(&self.price, "price")?;
        let quantity = coerce_number(&self.quantity, "quantity")?;
        if quantity < 0.0 || quantity.fract() != 0.0 || quantity > f64::from(u32::MAX) {
            return Err(ProductError::Validation(format!(
                "quantity: expected a whole number of units, got {}",
                self.quantity.trim()
            )));
        }

        let create = ProductCreate {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            available_quantity: quantity as u32,
            supplier_id: supplier_id.into(),
        };
        create.check()?;
        Ok(create)
    }
}

fn coerce_number(raw: &str, field: &str) -> Result<f64, ProductError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ProductError::Validation(format!(
            "{}: expected a number, got {:?}",
            field,
            raw.trim()
        ))),
    }
}

fn check_price(price: f64) -> Result<(), ProductError> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(ProductError::Validation(format!(
            "price: must be greater than zero, got {}",
            price
        )))
    }
}
