use std::sync::Arc;

use shopstyle_catalog::{CatalogError, Fetch, SsData};
use shopstyle_core::Product;

/// Side-by-side view of the products the user chose while browsing.
pub struct CompareView<F> {
    data: Arc<SsData<F>>,
    chosen: Vec<Arc<Product>>,
}

impl<F: Fetch> CompareView<F> {
    /// Makes sure retailer and brand names can be shown, then snapshots the
    /// compare list.
    ///
    /// # Errors
    ///
    /// Returns the error of whichever reference load failed.
    pub async fn load(data: Arc<SsData<F>>) -> Result<Self, CatalogError> {
        data.require_retailers().await?;
        data.require_brands().await?;
        let chosen = data.chosen();
        tracing::debug!(count = chosen.len(), "compare view loaded");
        Ok(Self { data, chosen })
    }

    #[must_use]
    pub fn chosen(&self) -> &[Arc<Product>] {
        &self.chosen
    }

    /// Name of the product's retailer, or an empty string when unknown.
    #[must_use]
    pub fn retailer_name(&self, product: &Product) -> String {
        product
            .retailer_id
            .as_deref()
            .and_then(|id| self.data.retailer_by_id(id))
            .map(|r| r.name.clone())
            .unwrap_or_default()
    }

    /// Name of the product's brand, or an empty string when unknown.
    #[must_use]
    pub fn brand_name(&self, product: &Product) -> String {
        product
            .brand_id
            .as_deref()
            .and_then(|id| self.data.brand_by_id(id))
            .map(|b| b.name.clone())
            .unwrap_or_default()
    }
}
