//! Per-session catalog state shared by every view.
//!
//! Build one [`SsData`] when the session starts and hand out clones of an
//! `Arc<SsData<_>>`; nothing in this crate keeps a global instance. All
//! caches live as long as the session and are never invalidated.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shopstyle_core::{Brand, Category, Color, Product, ProductId, Retailer, SortOrder};

use crate::error::CatalogError;
use crate::fetch::Fetch;
use crate::products::ProductCache;
use crate::reference::ReferenceCache;
use crate::selection::SelectionSet;

/// Reference data, product index and compare list for one browsing session.
pub struct SsData<F> {
    fetch: F,
    retailers: ReferenceCache<Retailer>,
    brands: ReferenceCache<Brand>,
    colors: ReferenceCache<Color>,
    categories: ReferenceCache<Category>,
    products: ProductCache,
    chosen: Mutex<SelectionSet>,
}

impl<F: Fetch> SsData<F> {
    #[must_use]
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            retailers: ReferenceCache::new(),
            brands: ReferenceCache::new(),
            colors: ReferenceCache::new(),
            categories: ReferenceCache::new(),
            products: ProductCache::new(),
            chosen: Mutex::new(SelectionSet::new()),
        }
    }

    pub fn fetch(&self) -> &F {
        &self.fetch
    }

    pub fn retailers(&self) -> &ReferenceCache<Retailer> {
        &self.retailers
    }

    pub fn brands(&self) -> &ReferenceCache<Brand> {
        &self.brands
    }

    pub fn colors(&self) -> &ReferenceCache<Color> {
        &self.colors
    }

    pub fn categories(&self) -> &ReferenceCache<Category> {
        &self.categories
    }

    pub fn products(&self) -> &ProductCache {
        &self.products
    }

    /// # Errors
    ///
    /// See [`ReferenceCache::require`].
    pub async fn require_retailers(&self) -> Result<Arc<[Arc<Retailer>]>, CatalogError> {
        self.retailers.require(&self.fetch).await
    }

    /// # Errors
    ///
    /// See [`ReferenceCache::require`].
    pub async fn require_brands(&self) -> Result<Arc<[Arc<Brand>]>, CatalogError> {
        self.brands.require(&self.fetch).await
    }

    /// # Errors
    ///
    /// See [`ReferenceCache::require`].
    pub async fn require_colors(&self) -> Result<Arc<[Arc<Color>]>, CatalogError> {
        self.colors.require(&self.fetch).await
    }

    /// # Errors
    ///
    /// See [`ReferenceCache::require`].
    pub async fn require_categories(&self) -> Result<Arc<[Arc<Category>]>, CatalogError> {
        self.categories.require(&self.fetch).await
    }

    /// Runs a product listing query against the shared product index.
    ///
    /// # Errors
    ///
    /// See [`ProductCache::query`].
    pub async fn query_products(
        &self,
        category: &str,
        filter: Option<&str>,
        sort: SortOrder,
    ) -> Result<Vec<Arc<Product>>, CatalogError> {
        self.products.query(&self.fetch, category, filter, sort).await
    }

    #[must_use]
    pub fn retailer_by_id(&self, id: &str) -> Option<Arc<Retailer>> {
        self.retailers.get_by_id(id)
    }

    #[must_use]
    pub fn brand_by_id(&self, id: &str) -> Option<Arc<Brand>> {
        self.brands.get_by_id(id)
    }

    #[must_use]
    pub fn color_by_id(&self, id: &str) -> Option<Arc<Color>> {
        self.colors.get_by_id(id)
    }

    #[must_use]
    pub fn category_by_id(&self, id: &str) -> Option<Arc<Category>> {
        self.categories.get_by_id(id)
    }

    #[must_use]
    pub fn product_by_id(&self, id: ProductId) -> Option<Arc<Product>> {
        self.products.get_by_id(id)
    }

    /// Starts loading all reference data at once so later views find it ready.
    ///
    /// Failures are logged and left for the next `require_*` call to retry.
    pub async fn prefetch(&self) {
        let (retailers, brands, colors, categories) = tokio::join!(
            self.require_retailers(),
            self.require_brands(),
            self.require_colors(),
            self.require_categories(),
        );
        let outcomes = [
            ("retailers", retailers.err()),
            ("brands", brands.err()),
            ("colors", colors.err()),
            ("categories", categories.err()),
        ];
        for (kind, error) in outcomes {
            if let Some(error) = error {
                tracing::warn!(kind, error = %error, "reference prefetch failed");
            }
        }
    }

    fn chosen_set(&self) -> MutexGuard<'_, SelectionSet> {
        self.chosen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds the indexed product `id` to the compare list.
    ///
    /// Returns `false` when the product is unknown or already chosen.
    pub fn choose(&self, id: ProductId) -> bool {
        match self.product_by_id(id) {
            Some(product) => self.chosen_set().add(product),
            None => {
                tracing::debug!(id, "ignoring selection of unknown product");
                false
            }
        }
    }

    /// Removes the indexed product `id` from the compare list.
    pub fn unchoose(&self, id: ProductId) -> bool {
        self.product_by_id(id)
            .is_some_and(|product| self.chosen_set().remove(&product))
    }

    #[must_use]
    pub fn is_chosen(&self, product: &Arc<Product>) -> bool {
        self.chosen_set().contains(product)
    }

    /// Snapshot of the compare list in the order products were chosen.
    #[must_use]
    pub fn chosen(&self) -> Vec<Arc<Product>> {
        self.chosen_set().to_vec()
    }
}
