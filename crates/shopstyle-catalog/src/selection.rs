use std::sync::Arc;

use shopstyle_core::Product;

/// Products the user picked for side-by-side comparison.
///
/// Membership is by instance (`Arc::ptr_eq`), not by value; this relies on
/// [`ProductCache`](crate::ProductCache) handing out one `Arc` per product id.
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    items: Vec<Arc<Product>>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `product` unless it is already selected. Returns whether it was added.
    pub fn add(&mut self, product: Arc<Product>) -> bool {
        if self.contains(&product) {
            return false;
        }
        self.items.push(product);
        true
    }

    /// Removes `product` if selected. Returns whether anything was removed.
    pub fn remove(&mut self, product: &Arc<Product>) -> bool {
        match self.items.iter().position(|p| Arc::ptr_eq(p, product)) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, product: &Arc<Product>) -> bool {
        self.items.iter().any(|p| Arc::ptr_eq(p, product))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Product>> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Arc<Product>> {
        self.items.clone()
    }
}
