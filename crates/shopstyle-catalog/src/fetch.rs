use std::future::Future;

use crate::error::CatalogError;

/// Source of raw catalog responses.
///
/// `path_and_query` is relative to the catalog host, e.g.
/// `/ss/products?category=dresses&fl=c7`. Each call resolves exactly once;
/// timeouts and any retry policy belong to the implementation.
pub trait Fetch: Send + Sync {
    fn get_json(
        &self,
        path_and_query: &str,
    ) -> impl Future<Output = Result<serde_json::Value, CatalogError>> + Send;
}

impl<F: Fetch> Fetch for std::sync::Arc<F> {
    fn get_json(
        &self,
        path_and_query: &str,
    ) -> impl Future<Output = Result<serde_json::Value, CatalogError>> + Send {
        (**self).get_json(path_and_query)
    }
}
