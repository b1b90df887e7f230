use tracing::{debug, instrument};

use crate::actor_framework::{ResourceClient, StoreError};
use crate::cart_actor::{CartAction, CartError};
use crate::domain::{Cart, CartCreate, ProductSnapshot, SnapshotPatch};

/// Client for the cart store.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl_basic_client!(CartClient, Cart, CartError, cart);

impl CartClient {
    /// Creates the cart on first use. Adding a product already in the cart overwrites
    /// its quantity and snapshot instead of adding a second line.
    #[instrument(skip(self))]
    pub async fn add_item_to_cart(
        &self,
        user_id: String,
        product_id: String,
        quantity: u32,
        snapshot: ProductSnapshot,
    ) -> Result<Cart, CartError> {
        debug!("Sending request");
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let action = CartAction::AddItem {
            product_id,
            quantity,
            snapshot,
        };
        match self.inner.perform_action(user_id.clone(), action.clone()).await {
            Err(StoreError::NotFound(_)) => {
                debug!("No cart yet, creating one");
                match self.inner.create(CartCreate { user_id: user_id.clone() }).await {
                    // Another tab may have created it in the meantime.
                    Ok(_) | Err(StoreError::Conflict { .. }) => {}
                    Err(e) => return Err(e.into()),
                }
                self.inner
                    .perform_action(user_id, action)
                    .await
                    .map_err(CartError::from)
            }
            result => result.map_err(CartError::from),
        }
    }

    /// Zero removes the line. A product that is not in the cart is `ItemNotFound`.
    #[instrument(skip(self))]
    pub async fn update_item_quantity(
        &self,
        user_id: String,
        product_id: String,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner
            .perform_action(user_id, CartAction::SetQuantity { product_id, quantity })
            .await
            .map_err(CartError::from)
    }

    pub async fn remove_item_from_cart(&self, user_id: String, product_id: String) -> Result<Cart, CartError> {
        self.update_item_quantity(user_id, product_id, 0).await
    }

    /// Empties the item list; the cart document itself stays.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self, user_id: String) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner
            .perform_action(user_id, CartAction::Clear)
            .await
            .map_err(CartError::from)
    }

    /// Merges changed product fields into every cart copy of that product.
    /// Returns the ids of the carts that changed.
    #[instrument(skip(self))]
    pub async fn apply_product_change(
        &self,
        product_id: String,
        patch: SnapshotPatch,
    ) -> Result<Vec<String>, CartError> {
        debug!("Sending request");
        self.inner
            .batch_update(move |cart: &mut Cart| cart.apply_product_change(&product_id, &patch))
            .await
            .map_err(CartError::from)
    }

    /// Drops the product from every cart. Returns the ids of the carts that shrank.
    #[instrument(skip(self))]
    pub async fn remove_product_everywhere(&self, product_id: String) -> Result<Vec<String>, CartError> {
        debug!("Sending request");
        self.inner
            .batch_update(move |cart: &mut Cart| cart.drop_product(&product_id))
            .await
            .map_err(CartError::from)
    }
}
