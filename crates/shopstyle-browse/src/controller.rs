//! Browse view controller.
//!
//! Keeps the filter, the route URL and the product list in step. User edits
//! go filter → URL → query; navigation goes URL → filter → query. Nothing is
//! queried (and the URL is never rewritten) until the reference data the
//! view depends on has loaded.

use std::sync::Arc;

use shopstyle_catalog::{CatalogError, Fetch, SsData};
use shopstyle_core::{AppConfig, Brand, Category, Color, Product, ProductId, SortOrder};

use crate::filter::{breadcrumb, BrowseFilter, Facet, INITIAL_BREADCRUMB};
use crate::location::{Location, LocationSearch};

/// Category written to the URL when the user changes a filter with no category set.
pub const DEFAULT_FALLBACK_CATEGORY: &str = "dresses";

/// Number of brands offered by the brand picker.
pub const DEFAULT_BRAND_LIST_SIZE: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseOptions {
    pub fallback_category: String,
    pub brand_list_size: usize,
}

impl Default for BrowseOptions {
    fn default() -> Self {
        Self {
            fallback_category: DEFAULT_FALLBACK_CATEGORY.to_owned(),
            brand_list_size: DEFAULT_BRAND_LIST_SIZE,
        }
    }
}

impl From<&AppConfig> for BrowseOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            fallback_category: config.fallback_category.clone(),
            brand_list_size: config.brand_list_size,
        }
    }
}

pub struct BrowseController<F> {
    data: Arc<SsData<F>>,
    options: BrowseOptions,
    location: Location,
    filter: BrowseFilter,
    breadcrumb: String,
    /// `None` until the first search resolves.
    products: Option<Vec<Arc<Product>>>,
    brands: Vec<Arc<Brand>>,
    colors: Vec<Arc<Color>>,
    categories: Vec<Arc<Category>>,
    large_image_url: Option<String>,
    can_query: bool,
    /// Color, brand or category was changed before `can_query`.
    recorded_change: bool,
}

impl<F: Fetch> BrowseController<F> {
    #[must_use]
    pub fn new(data: Arc<SsData<F>>, location: Location, options: BrowseOptions) -> Self {
        Self {
            data,
            options,
            location,
            filter: BrowseFilter::default(),
            breadcrumb: INITIAL_BREADCRUMB.to_owned(),
            products: None,
            brands: Vec::new(),
            colors: Vec::new(),
            categories: Vec::new(),
            large_image_url: None,
            can_query: false,
            recorded_change: false,
        }
    }

    /// Loads brands, colors and categories in that order, then runs the
    /// search described by the current location.
    ///
    /// Color, brand or category changes recorded while loading are kept
    /// unless the location names that parameter itself; the merged filter is
    /// then written to the location before searching.
    ///
    /// # Errors
    ///
    /// Returns the first reference-data failure, in which case the
    /// controller stays unable to query, or the error of the initial search.
    pub async fn initialize(&mut self) -> Result<(), CatalogError> {
        self.data.require_brands().await?;
        self.brands = self.data.brands().first_n(self.options.brand_list_size);

        self.colors = self.data.require_colors().await?.to_vec();
        self.categories = self.data.require_categories().await?.to_vec();

        self.can_query = true;
        tracing::debug!(
            brands = self.brands.len(),
            colors = self.colors.len(),
            categories = self.categories.len(),
            "browse view ready"
        );
        if !self.recorded_change {
            return self.run_search(self.location.search()).await;
        }

        self.recorded_change = false;
        let search = self.location.search();
        if search.category.is_some() {
            self.filter.category = search.category;
        }
        if search.color.is_some() {
            self.filter.color = Facet::from_param(search.color.as_deref());
        }
        if search.brand.is_some() {
            self.filter.brand = Facet::from_param(search.brand.as_deref());
        }
        self.filter_changed().await
    }

    /// Handles an address change that did not come from this controller
    /// (back/forward, a pasted link).
    ///
    /// # Errors
    ///
    /// Propagates a failed product query; the previous products stay.
    pub async fn on_location_change(&mut self, url: impl Into<String>) -> Result<(), CatalogError> {
        self.location = Location::new(url);
        if !self.can_query {
            return Ok(());
        }
        self.run_search(self.location.search()).await
    }

    /// # Errors
    ///
    /// Propagates a failed product query; the previous products stay.
    pub async fn set_color(&mut self, color: Facet) -> Result<(), CatalogError> {
        if self.filter.color == color {
            return Ok(());
        }
        self.filter.color = color;
        self.recorded_change |= !self.can_query;
        self.filter_changed().await
    }

    /// # Errors
    ///
    /// Propagates a failed product query; the previous products stay.
    pub async fn set_brand(&mut self, brand: Facet) -> Result<(), CatalogError> {
        if self.filter.brand == brand {
            return Ok(());
        }
        self.filter.brand = brand;
        self.recorded_change |= !self.can_query;
        self.filter_changed().await
    }

    /// # Errors
    ///
    /// Propagates a failed product query; the previous products stay.
    pub async fn set_category(&mut self, category: Option<String>) -> Result<(), CatalogError> {
        let category = category.filter(|c| !c.is_empty());
        if self.filter.category == category {
            return Ok(());
        }
        self.filter.category = category;
        self.recorded_change |= !self.can_query;
        self.filter_changed().await
    }

    /// # Errors
    ///
    /// Propagates a failed product query; the previous products stay.
    pub async fn set_sort_order(&mut self, sort_order: SortOrder) -> Result<(), CatalogError> {
        if self.filter.sort_order == sort_order {
            return Ok(());
        }
        self.filter.sort_order = sort_order;
        self.filter_changed().await
    }

    /// Writes the filter into the URL and searches for it.
    ///
    /// The search runs directly rather than waiting for a navigation event,
    /// because a sort change leaves the URL as it was.
    async fn filter_changed(&mut self) -> Result<(), CatalogError> {
        if !self.can_query {
            tracing::debug!("filter changed before reference data loaded, not querying");
            return Ok(());
        }
        self.location
            .set_search(self.filter.location_params(&self.options.fallback_category));
        self.run_search(self.location.search()).await
    }

    async fn run_search(&mut self, search: LocationSearch) -> Result<(), CatalogError> {
        self.filter.category.clone_from(&search.category);
        self.filter.color = Facet::from_param(search.color.as_deref());
        self.filter.brand = Facet::from_param(search.brand.as_deref());

        let color_name = self
            .filter
            .color
            .as_id()
            .and_then(|id| self.data.color_by_id(id))
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let brand_name = self
            .filter
            .brand
            .as_id()
            .and_then(|id| self.data.brand_by_id(id))
            .map(|b| b.name.clone())
            .unwrap_or_default();
        let category_name = search
            .category
            .as_deref()
            .and_then(|id| self.data.category_by_id(id))
            .map(|c| c.name.clone())
            .unwrap_or_default();

        let category = search.category.as_deref().unwrap_or("");
        let filter = self.filter.filter_expression();
        let result = self
            .data
            .query_products(category, filter.as_deref(), self.filter.sort_order)
            .await;
        match result {
            Ok(products) => {
                self.breadcrumb = breadcrumb(&color_name, &brand_name, &category_name);
                self.products = Some(products);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(category, error = %error, "product query failed, keeping previous results");
                Err(error)
            }
        }
    }

    /// Adds product `id` to the compare list. See [`SsData::choose`].
    pub fn add_to_selection(&self, id: ProductId) -> bool {
        self.data.choose(id)
    }

    pub fn remove_from_selection(&self, id: ProductId) -> bool {
        self.data.unchoose(id)
    }

    #[must_use]
    pub fn is_selected(&self, product: &Arc<Product>) -> bool {
        self.data.is_chosen(product)
    }

    /// Products shown in the thumbnail strip, in the order they were chosen.
    #[must_use]
    pub fn thumb_products(&self) -> Vec<Arc<Product>> {
        self.data.chosen()
    }

    /// Opens the large image of product `id`. Returns `false` for an unknown product.
    pub fn expand(&mut self, id: ProductId) -> bool {
        match self.data.product_by_id(id) {
            Some(product) => {
                self.large_image_url.clone_from(&product.large_url);
                true
            }
            None => false,
        }
    }

    pub fn close_large(&mut self) {
        self.large_image_url = None;
    }

    /// Choices for the sort picker, labelled as shown to the user.
    #[must_use]
    pub fn sort_order_options() -> [(&'static str, SortOrder); 3] {
        SortOrder::ALL.map(|order| (order.label(), order))
    }

    #[must_use]
    pub fn data(&self) -> &Arc<SsData<F>> {
        &self.data
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub fn filter(&self) -> &BrowseFilter {
        &self.filter
    }

    #[must_use]
    pub fn breadcrumb(&self) -> &str {
        &self.breadcrumb
    }

    #[must_use]
    pub fn products(&self) -> Option<&[Arc<Product>]> {
        self.products.as_deref()
    }

    #[must_use]
    pub fn brands(&self) -> &[Arc<Brand>] {
        &self.brands
    }

    #[must_use]
    pub fn colors(&self) -> &[Arc<Color>] {
        &self.colors
    }

    #[must_use]
    pub fn categories(&self) -> &[Arc<Category>] {
        &self.categories
    }

    #[must_use]
    pub fn large_image_url(&self) -> Option<&str> {
        self.large_image_url.as_deref()
    }

    #[must_use]
    pub fn can_query(&self) -> bool {
        self.can_query
    }
}
