use std::collections::HashMap;

use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::clients::CartClient;
use crate::domain::{Product, ProductCreate, ProductPatch, SnapshotPatch};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};

/// Client for interacting with the Product store.
///
/// Updates and deletes are followed by a fan-out into the cart store so cart copies of
/// the product's display fields catch up. The fan-out is not transactional with the
/// product write: if it fails the product change stands and the failure is logged.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
    cart_client: CartClient,
}

impl_client_methods!(ProductClient, Product, ProductError, product);

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>, cart_client: CartClient) -> Self {
        Self { inner, cart_client }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<String, ProductError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        info!(product_id = %id, "Product listed");
        Ok(id)
    }

    /// All products, newest first.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let mut products = self.inner.list(|_: &Product| true).await?;
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn list_supplier_products(&self, supplier_id: String) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let mut products = self
            .inner
            .list(move |product: &Product| product.supplier_id == supplier_id)
            .await?;
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    /// Products keyed by id, for joining cart lines at read time.
    #[instrument(skip(self))]
    pub async fn products_by_id(&self, ids: Vec<String>) -> Result<HashMap<String, Product>, ProductError> {
        debug!("Sending request");
        let products = self
            .inner
            .list(move |product: &Product| ids.contains(&product.id))
            .await?;
        Ok(products.into_iter().map(|p| (p.id.clone(), p)).collect())
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await? {
            ProductActionResult::StockLevel(level) => Ok(level),
        }
    }

    /// Only the owning supplier may edit a product.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        supplier_id: String,
        product_id: String,
        patch: ProductPatch,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.owned_product(&supplier_id, &product_id).await?;

        let snapshot_changes = patch.snapshot_changes();
        let product = self.inner.update(product_id.clone(), patch).await?;
        info!(product_id = %product_id, "Product updated");

        if !snapshot_changes.is_empty() {
            self.propagate_update(product_id, snapshot_changes).await;
        }
        Ok(product)
    }

    /// Only the owning supplier may delete a product. Carts holding it lose that line.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, supplier_id: String, product_id: String) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.owned_product(&supplier_id, &product_id).await?;

        let product = self.inner.delete(product_id.clone()).await?;
        info!(product_id = %product_id, "Product deleted");

        match self.cart_client.remove_product_everywhere(product_id).await {
            Ok(carts) => info!(carts = carts.len(), "Deleted product removed from carts"),
            Err(e) => warn!(error = %e, "Cart cleanup failed, carts keep the deleted product"),
        }
        Ok(product)
    }

    async fn propagate_update(&self, product_id: String, patch: SnapshotPatch) {
        match self.cart_client.apply_product_change(product_id, patch).await {
            Ok(carts) => info!(carts = carts.len(), "Product change copied into carts"),
            Err(e) => warn!(error = %e, "Cart fan-out failed, cart copies stay stale until the next change"),
        }
    }

    async fn owned_product(&self, supplier_id: &str, product_id: &str) -> Result<Product, ProductError> {
        let product = self
            .inner
            .get(product_id.to_string())
            .await?
            .ok_or_else(|| ProductError::NotFound(product_id.to_string()))?;
        if product.supplier_id != supplier_id {
            warn!(product_id, supplier_id, "Supplier does not own product");
            return Err(ProductError::NotOwner {
                product_id: product_id.to_string(),
                supplier_id: supplier_id.to_string(),
            });
        }
        Ok(product)
    }
}
