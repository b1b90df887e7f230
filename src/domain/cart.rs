use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart_actor::CartError;
use crate::domain::Product;

/// Copy of a product's display fields taken when it was added to a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub name: String,
    pub price: f64,
    pub description: String,
}

/// Changed display fields of a product; `None` leaves the copy alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

impl SnapshotPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.description.is_none()
    }
}

impl ProductSnapshot {
    /// Returns whether anything actually changed, so reapplying a patch is a no-op.
    pub fn merge(&mut self, patch: &SnapshotPatch) -> bool {
        let mut changed = false;
        if let Some(name) = &patch.name {
            changed |= self.name != *name;
            self.name = name.clone();
        }
        if let Some(price) = patch.price {
            changed |= self.price != price;
            self.price = price;
        }
        if let Some(description) = &patch.description {
            changed |= self.description != *description;
            self.description = description.clone();
        }
        changed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
    pub snapshot: ProductSnapshot,
}

/// One cart per user, keyed by the user's id. An empty `items` list is an empty cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CartCreate {
    pub user_id: String,
}

impl Cart {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            items: Vec::new(),
            last_updated: Utc::now(),
        }
    }

    pub fn item(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Adds a line, or overwrites quantity and snapshot when the product is already in the cart.
    pub fn add_item(
        &mut self,
        product_id: &str,
        quantity: u32,
        snapshot: ProductSnapshot,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        match self.items.iter_mut().find(|item| item.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                item.snapshot = snapshot;
            }
            None => self.items.push(CartItem {
                product_id: product_id.to_string(),
                quantity,
                snapshot,
            }),
        }
        self.touch();
        Ok(())
    }

    /// Zero removes the line.
    pub fn update_item_quantity(&mut self, product_id: &str, quantity: u32) -> Result<(), CartError> {
        let position = self
            .items
            .iter()
            .position(|item| item.product_id == product_id)
            .ok_or_else(|| CartError::ItemNotFound(product_id.to_string()))?;

        if quantity == 0 {
            self.items.remove(position);
        } else {
            self.items[position].quantity = quantity;
        }
        self.touch();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    pub fn apply_product_change(&mut self, product_id: &str, patch: &SnapshotPatch) -> bool {
        let mut changed = false;
        for item in self.items.iter_mut().filter(|item| item.product_id == product_id) {
            changed |= item.snapshot.merge(patch);
        }
        if changed {
            self.touch();
        }
        changed
    }

    pub fn drop_product(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        let shrank = self.items.len() != before;
        if shrank {
            self.touch();
        }
        shrank
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

/// A cart line with live product fields joined in at read time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub line_total: f64,
    /// `None` when the product no longer exists and the line shows its snapshot.
    pub available_quantity: Option<u32>,
    pub exceeds_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
    pub user_id: String,
    pub lines: Vec<CartLine>,
    pub total: f64,
    pub last_updated: Option<DateTime<Utc>>,
}

impl CartView {
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            lines: Vec::new(),
            total: 0.0,
            last_updated: None,
        }
    }

    pub fn join(cart: &Cart, products: &HashMap<String, Product>) -> Self {
        let lines: Vec<CartLine> = cart
            .items
            .iter()
            .map(|item| match products.get(&item.product_id) {
                Some(product) => CartLine {
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                    name: product.name.clone(),
                    price: product.price,
                    description: product.description.clone(),
                    line_total: product.price * f64::from(item.quantity),
                    available_quantity: Some(product.available_quantity),
                    exceeds_stock: item.quantity > product.available_quantity,
                },
                None => CartLine {
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                    name: item.snapshot.name.clone(),
                    price: item.snapshot.price,
                    description: item.snapshot.description.clone(),
                    line_total: item.snapshot.price * f64::from(item.quantity),
                    available_quantity: None,
                    exceeds_stock: false,
                },
            })
            .collect();

        Self {
            user_id: cart.user_id.clone(),
            total: lines.iter().map(|line| line.line_total).sum(),
            lines,
            last_updated: Some(cart.last_updated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(name: &str, price: f64) -> ProductSnapshot {
        ProductSnapshot {
            name: name.into(),
            price,
            description: format!("{} description", name),
        }
    }

    #[test]
    fn test_add_same_product_overwrites_quantity() {
        let mut cart = Cart::new("farmer_1");
        cart.add_item("p", 2, snap("Seed", 10.0)).unwrap();
        cart.add_item("p", 5, snap("Seed", 10.0)).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.item("p").unwrap().quantity, 5);
    }

    #[test]
    fn test_add_zero_quantity_is_rejected() {
        let mut cart = Cart::new("farmer_1");
        assert_eq!(
            cart.add_item("p", 0, snap("Seed", 10.0)),
            Err(CartError::InvalidQuantity(0))
        );
        assert!(cart.items.is_empty());
    }

    #[test]
    fn test_update_quantity_zero_removes_and_missing_is_not_found() {
        let mut cart = Cart::new("farmer_1");
        cart.add_item("p", 2, snap("Seed", 10.0)).unwrap();
        cart.add_item("q", 1, snap("Hoe", 4.0)).unwrap();

        cart.update_item_quantity("q", 7).unwrap();
        assert_eq!(cart.item("q").unwrap().quantity, 7);

        cart.update_item_quantity("p", 0).unwrap();
        assert!(cart.item("p").is_none());
        assert_eq!(
            cart.update_item_quantity("p", 0),
            Err(CartError::ItemNotFound("p".into()))
        );
    }

    #[test]
    fn test_product_change_merges_only_given_fields() {
        let mut cart = Cart::new("farmer_1");
        cart.add_item("p", 1, snap("Seed", 10.0)).unwrap();

        let patch = SnapshotPatch {
            price: Some(15.0),
            ..Default::default()
        };
        assert!(cart.apply_product_change("p", &patch));
        // Same patch again changes nothing.
        assert!(!cart.apply_product_change("p", &patch));
        assert!(!cart.apply_product_change("other", &patch));

        let item = cart.item("p").unwrap();
        assert_eq!(item.snapshot.price, 15.0);
        assert_eq!(item.snapshot.name, "Seed");
        assert_eq!(item.snapshot.description, "Seed description");
    }

    #[test]
    fn test_drop_product_keeps_other_lines() {
        let mut cart = Cart::new("farmer_1");
        cart.add_item("p", 1, snap("Seed", 10.0)).unwrap();
        cart.add_item("q", 3, snap("Hoe", 4.0)).unwrap();

        assert!(cart.drop_product("p"));
        assert!(!cart.drop_product("p"));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product_id, "q");
    }

    #[test]
    fn test_view_prefers_live_product_fields() {
        let mut cart = Cart::new("farmer_1");
        cart.add_item("p", 4, snap("Seed", 10.0)).unwrap();
        cart.add_item("gone", 2, snap("Old tool", 3.0)).unwrap();

        let now = Utc::now();
        let live = Product {
            id: "p".into(),
            name: "Seed (new)".into(),
            description: "fresh".into(),
            price: 12.5,
            available_quantity: 3,
            supplier_id: "supplier_1".into(),
            created_at: now,
            updated_at: now,
        };
        let products = HashMap::from([(live.id.clone(), live)]);

        let view = CartView::join(&cart, &products);
        assert_eq!(view.lines[0].name, "Seed (new)");
        assert_eq!(view.lines[0].line_total, 50.0);
        assert!(view.lines[0].exceeds_stock);
        assert_eq!(view.lines[1].available_quantity, None);
        assert_eq!(view.lines[1].price, 3.0);
        assert_eq!(view.total, 56.0);
    }
}
