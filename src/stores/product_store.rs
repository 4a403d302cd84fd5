use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Product, ProductDraft, ProductId};
use crate::product_actor::ProductError;

/// Handle to the product table.
#[derive(Clone)]
pub struct ProductStore {
    inner: ResourceClient<Product>,
}

impl_basic_store!(ProductStore, Product, ProductError, product, products);

impl ProductStore {
    #[instrument(skip(self, draft), fields(description = %draft.description))]
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, ProductError> {
        debug!("Sending request");
        let product = self.inner.create(draft).await?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self, draft))]
    pub async fn update_product(&self, id: ProductId, draft: ProductDraft) -> Result<Product, ProductError> {
        debug!("Sending request");
        let product = self.inner.update(id, draft).await?;
        info!("Product updated");
        Ok(product)
    }

    /// Products that may be added to new order lines.
    #[instrument(skip(self))]
    pub async fn list_orderable_products(&self) -> Result<Vec<Product>, ProductError> {
        let mut products = self.list_products().await?;
        products.retain(Product::is_orderable);
        Ok(products)
    }
}
