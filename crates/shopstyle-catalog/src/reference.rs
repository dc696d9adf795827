//! Write-once caches for reference entities (retailers, brands, colors,
//! categories).
//!
//! Each cache is loaded by a single request to the kind's endpoint and then
//! kept for the life of the session. The list and the id index are built
//! together and published in one step, so readers see either nothing or a
//! complete table.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use shopstyle_core::Entity;

use crate::envelope::{decode_list, ApiEnvelope};
use crate::error::CatalogError;
use crate::fetch::Fetch;

/// A loaded list of entities plus its id index.
///
/// Invariant: `index[e.id()]` is the same `Arc` as `e` for every `e` in `list`.
#[derive(Debug)]
struct EntityTable<T> {
    list: Arc<[Arc<T>]>,
    index: HashMap<String, Arc<T>>,
}

impl<T: Entity> EntityTable<T> {
    fn build(entities: Vec<T>) -> Self {
        let kind = T::KIND;
        let mut index = HashMap::with_capacity(entities.len());
        let mut list = Vec::with_capacity(entities.len());
        for entity in entities {
            if index.contains_key(entity.id()) {
                tracing::warn!(
                    kind = %kind,
                    id = entity.id(),
                    "duplicate id in reference data, keeping first"
                );
                continue;
            }
            let entity = Arc::new(entity);
            index.insert(entity.id().to_owned(), Arc::clone(&entity));
            list.push(entity);
        }
        Self {
            list: list.into(),
            index,
        }
    }
}

/// Lazily loaded, memoized collection of one entity kind.
#[derive(Debug)]
pub struct ReferenceCache<T> {
    table: RwLock<Option<Arc<EntityTable<T>>>>,
    /// Held for the duration of the first load so concurrent callers wait
    /// for that request instead of issuing their own.
    in_flight: tokio::sync::Mutex<()>,
}

impl<T> Default for ReferenceCache<T> {
    fn default() -> Self {
        Self {
            table: RwLock::new(None),
            in_flight: tokio::sync::Mutex::new(()),
        }
    }
}

impl<T: Entity> ReferenceCache<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> Option<Arc<EntityTable<T>>> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the full list, fetching it on first use.
    ///
    /// Only one request is ever made per successful load: callers that arrive
    /// while it is in flight wait for it. A non-success envelope populates the
    /// cache with an empty list. A failed request leaves the cache empty so a
    /// later call tries again.
    ///
    /// # Errors
    ///
    /// Propagates the [`CatalogError`] from `fetch`, or
    /// [`CatalogError::Deserialize`] when a success payload is not a list.
    pub async fn require<F: Fetch>(&self, fetch: &F) -> Result<Arc<[Arc<T>]>, CatalogError> {
        let kind = T::KIND;
        if let Some(table) = self.table() {
            return Ok(Arc::clone(&table.list));
        }

        let _guard = self.in_flight.lock().await;
        if let Some(table) = self.table() {
            tracing::debug!(kind = %kind, "reference data loaded by concurrent caller");
            return Ok(Arc::clone(&table.list));
        }

        let endpoint = kind.endpoint();
        tracing::debug!(kind = %kind, endpoint, "fetching reference data");
        let body = fetch.get_json(endpoint).await?;

        let entities = match ApiEnvelope::from_json(body) {
            ApiEnvelope::Success(payload) => decode_list::<T>(payload, endpoint)?,
            ApiEnvelope::Failure { action, .. } => {
                tracing::warn!(
                    kind = %kind,
                    action = action.as_deref().unwrap_or("<missing>"),
                    "catalog reported failure, caching empty list"
                );
                Vec::new()
            }
        };

        let table = Arc::new(EntityTable::build(entities));
        let list = Arc::clone(&table.list);
        *self.table.write().unwrap_or_else(PoisonError::into_inner) = Some(table);
        tracing::info!(kind = %kind, count = list.len(), "reference data loaded");
        Ok(list)
    }

    /// The loaded list, or `None` before the first successful [`require`](Self::require).
    #[must_use]
    pub fn list(&self) -> Option<Arc<[Arc<T>]>> {
        self.table().map(|t| Arc::clone(&t.list))
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.table().is_some()
    }

    /// Looks an entity up by id. Never touches the network.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<Arc<T>> {
        self.table().and_then(|t| t.index.get(id).cloned())
    }

    /// The first `n` entities in server order (all of them when fewer are
    /// loaded); empty before the cache is loaded.
    #[must_use]
    pub fn first_n(&self, n: usize) -> Vec<Arc<T>> {
        self.table()
            .map(|t| t.list.iter().take(n).cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use serde_json::{json, Value};
    use shopstyle_core::{Brand, Color};

    use super::*;

    /// Serves one canned body and counts requests.
    struct CannedFetch {
        body: Value,
        calls: AtomicU32,
    }

    impl CannedFetch {
        fn new(body: Value) -> Self {
            Self {
                body,
                calls: AtomicU32::new(0),
            }
        }
    }

    impl Fetch for CannedFetch {
        async fn get_json(&self, _path_and_query: &str) -> Result<Value, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    fn colors_body() -> Value {
        json!({
            "action": "success",
            "message": [
                {"id": "1", "name": "Red"},
                {"id": "2", "name": "Blue"},
                {"id": "3", "name": "Green"}
            ]
        })
    }

    #[tokio::test]
    async fn require_fetches_once_and_memoizes() {
        let fetch = CannedFetch::new(colors_body());
        let cache = ReferenceCache::<Color>::new();

        let first = cache.require(&fetch).await.unwrap();
        let second = cache.require(&fetch).await.unwrap();

        assert_eq!(first.len(), 3);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetch.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn index_shares_list_instances() {
        let fetch = CannedFetch::new(colors_body());
        let cache = ReferenceCache::<Color>::new();
        let list = cache.require(&fetch).await.unwrap();

        for color in list.iter() {
            let indexed = cache.get_by_id(&color.id).expect("indexed");
            assert!(Arc::ptr_eq(color, &indexed));
        }
    }

    #[tokio::test]
    async fn get_by_id_before_load_is_none() {
        let cache = ReferenceCache::<Color>::new();
        assert!(cache.get_by_id("1").is_none());
        assert!(!cache.is_loaded());
        assert!(cache.list().is_none());
        assert!(cache.first_n(2).is_empty());
    }

    #[tokio::test]
    async fn failure_envelope_caches_empty_list() {
        let fetch = CannedFetch::new(json!({"action": "error", "message": "down"}));
        let cache = ReferenceCache::<Brand>::new();

        let list = cache.require(&fetch).await.unwrap();
        assert!(list.is_empty());
        assert!(cache.is_loaded());

        cache.require(&fetch).await.unwrap();
        assert_eq!(fetch.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn duplicate_ids_keep_first_entry() {
        let fetch = CannedFetch::new(json!({
            "action": "success",
            "message": [
                {"id": "1", "name": "Red"},
                {"id": "1", "name": "Crimson"}
            ]
        }));
        let cache = ReferenceCache::<Color>::new();
        let list = cache.require(&fetch).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(cache.get_by_id("1").unwrap().name, "Red");
    }

    #[tokio::test]
    async fn first_n_takes_prefix_in_server_order() {
        let fetch = CannedFetch::new(colors_body());
        let cache = ReferenceCache::<Color>::new();
        cache.require(&fetch).await.unwrap();

        let names: Vec<String> = cache.first_n(2).iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["Red", "Blue"]);
        assert_eq!(cache.first_n(10).len(), 3);
    }
}
