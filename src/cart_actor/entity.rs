use super::actions::CartAction;
use super::error::CartError;
use crate::actor_framework::Entity;
use crate::domain::{Cart, CartCreate};

impl Entity for Cart {
    type Id = String;
    type CreateParams = CartCreate;
    type Patch = ();
    type Action = CartAction;
    type ActionResult = Cart;
    type Error = CartError;

    fn id(&self) -> &String {
        &self.user_id
    }

    fn assigned_id(params: &CartCreate) -> Option<String> {
        Some(params.user_id.clone())
    }

    fn from_create_params(_id: String, params: CartCreate) -> Result<Self, CartError> {
        Ok(Cart::new(params.user_id))
    }

    /// Carts change only through actions.
    fn on_update(&mut self, _patch: ()) -> Result<(), CartError> {
        Ok(())
    }

    /// Never deleted outright; an empty cart is represented by an empty item list.
    fn on_delete(&self) -> Result<(), CartError> {
        Err(CartError::NotDeletable(self.user_id.clone()))
    }

    fn handle_action(&mut self, action: CartAction) -> Result<Cart, CartError> {
        match action {
            CartAction::AddItem {
                product_id,
                quantity,
                snapshot,
            } => self.add_item(&product_id, quantity, snapshot)?,
            CartAction::SetQuantity { product_id, quantity } => {
                self.update_item_quantity(&product_id, quantity)?
            }
            CartAction::Clear => self.clear(),
        }
        Ok(self.clone())
    }
}
