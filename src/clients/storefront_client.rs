use tracing::{error, info, instrument, warn};

use crate::cart_actor::CartError;
use crate::clients::{CartClient, ProductClient};
use crate::domain::{Cart, CartView};
use crate::product_actor::ProductError;

/// Farmer-facing shopping flow.
///
/// This client coordinates the product and cart stores: it looks products up before
/// adding them and joins live product fields into the cart when it is read.
#[derive(Clone)]
pub struct StorefrontClient {
    cart_client: CartClient,
    product_client: ProductClient,
}

impl StorefrontClient {
    pub fn new(cart_client: CartClient, product_client: ProductClient) -> Self {
        Self {
            cart_client,
            product_client,
        }
    }

    /// Adds a product using its current display fields. Asking for more than is in
    /// stock is allowed but logged.
    #[instrument(skip(self))]
    pub async fn add_product_to_cart(
        &self,
        user_id: String,
        product_id: String,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        info!("Processing add_product_to_cart request");

        let product = match self.product_client.get_product(product_id.clone()).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                error!("Product not found");
                return Err(CartError::ProductUnavailable(product_id));
            }
            Err(e) => {
                error!(error = %e, "Product lookup failed");
                return Err(CartError::ActorCommunicationError(e.to_string()));
            }
        };

        if quantity > product.available_quantity {
            warn!(
                requested = quantity,
                available = product.available_quantity,
                "Cart quantity exceeds current stock"
            );
        }

        self.cart_client
            .add_item_to_cart(user_id, product_id, quantity, product.snapshot())
            .await
    }

    /// Sets a line's quantity, logging when it exceeds current stock. Zero removes the line.
    #[instrument(skip(self))]
    pub async fn change_quantity(
        &self,
        user_id: String,
        product_id: String,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        if quantity > 0 {
            match self.product_client.check_stock(product_id.clone()).await {
                Ok(available) if quantity > available => {
                    warn!(requested = quantity, available, "Cart quantity exceeds current stock")
                }
                Ok(_) => {}
                // The line can still be edited from its snapshot.
                Err(ProductError::NotFound(_)) => warn!("Product no longer listed"),
                Err(e) => return Err(CartError::ActorCommunicationError(e.to_string())),
            }
        }
        self.cart_client
            .update_item_quantity(user_id, product_id, quantity)
            .await
    }

    /// The user's cart with live product fields; lines whose product is gone show their snapshot.
    #[instrument(skip(self))]
    pub async fn view_cart(&self, user_id: String) -> Result<CartView, CartError> {
        let cart = match self.cart_client.get_cart(user_id.clone()).await? {
            Some(cart) => cart,
            None => return Ok(CartView::empty(user_id)),
        };

        let ids = cart.items.iter().map(|item| item.product_id.clone()).collect();
        let products = self
            .product_client
            .products_by_id(ids)
            .await
            .map_err(|e| CartError::ActorCommunicationError(e.to_string()))?;

        let view = CartView::join(&cart, &products);
        info!(lines = view.lines.len(), total = view.total, "Cart assembled");
        Ok(view)
    }
}
