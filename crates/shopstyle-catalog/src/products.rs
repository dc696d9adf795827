//! Product listings with identity-preserving de-duplication.
//!
//! Every product ever returned goes into a session-wide index keyed by id.
//! When a later listing contains an id that is already indexed, the stored
//! `Arc` is handed out instead of the fresh payload, so anything holding a
//! product (the compare list, for one) keeps pointing at the same instance.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use shopstyle_core::query_string::build_url;
use shopstyle_core::{Product, ProductId, SortOrder};

use crate::envelope::{decode_list, ApiEnvelope};
use crate::error::CatalogError;
use crate::fetch::Fetch;

const PRODUCTS_ENDPOINT: &str = "/ss/products";

/// Builds the listing path for `category`, with `filter` appended verbatim.
#[must_use]
pub fn products_path(category: &str, filter: Option<&str>) -> String {
    let mut path = build_url(PRODUCTS_ENDPOINT, [("category", category)], false);
    if let Some(filter) = filter.filter(|f| !f.is_empty()) {
        path.push('&');
        path.push_str(filter);
    }
    path
}

#[derive(Debug, Default)]
pub struct ProductCache {
    /// Every product seen this session. Only grows.
    index: Mutex<HashMap<ProductId, Arc<Product>>>,
    /// Result list of the most recently resolved query.
    last_results: Mutex<Option<Vec<Arc<Product>>>>,
}

impl ProductCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the listing for `category`/`filter` and returns it in
    /// `sort` order.
    ///
    /// Always goes to the network. Products already in the index are
    /// replaced by their stored instance; new ones are added. The index merge
    /// and the sort both happen after the response arrives and before this
    /// returns. A non-success envelope yields an empty list.
    ///
    /// # Errors
    ///
    /// Propagates the [`CatalogError`] from `fetch`, or
    /// [`CatalogError::Deserialize`] when a success payload is not a list.
    pub async fn query<F: Fetch>(
        &self,
        fetch: &F,
        category: &str,
        filter: Option<&str>,
        sort: SortOrder,
    ) -> Result<Vec<Arc<Product>>, CatalogError> {
        let path = products_path(category, filter);
        let body = fetch.get_json(&path).await?;

        let incoming: Vec<Product> = match ApiEnvelope::from_json(body) {
            ApiEnvelope::Success(payload) => decode_list(payload, &path)?,
            ApiEnvelope::Failure { action, .. } => {
                tracing::warn!(
                    category,
                    action = action.as_deref().unwrap_or("<missing>"),
                    "catalog reported failure for product query"
                );
                Vec::new()
            }
        };

        let (mut results, reused) = self.merge(incoming);
        sort.apply(&mut results);

        tracing::debug!(
            category,
            filter = filter.unwrap_or(""),
            sort = %sort,
            count = results.len(),
            reused,
            "product query resolved"
        );

        *self
            .last_results
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(results.clone());
        Ok(results)
    }

    /// Merges `incoming` into the index under one lock and returns the
    /// canonical instances in input order, plus how many were already known.
    fn merge(&self, incoming: Vec<Product>) -> (Vec<Arc<Product>>, usize) {
        let mut index = self.index.lock().unwrap_or_else(PoisonError::into_inner);
        let mut reused = 0;
        let results = incoming
            .into_iter()
            .map(|product| match index.get(&product.id) {
                Some(existing) => {
                    reused += 1;
                    Arc::clone(existing)
                }
                None => {
                    let product = Arc::new(product);
                    index.insert(product.id, Arc::clone(&product));
                    product
                }
            })
            .collect();
        (results, reused)
    }

    /// Looks a product up in the session index, whichever query brought it in.
    #[must_use]
    pub fn get_by_id(&self, id: ProductId) -> Option<Arc<Product>> {
        self.index
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Number of distinct products seen this session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Results of the most recently resolved query, if any.
    #[must_use]
    pub fn last_results(&self) -> Option<Vec<Arc<Product>>> {
        self.last_results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
