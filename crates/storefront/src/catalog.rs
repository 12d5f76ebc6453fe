//! The in-memory catalog store.
//!
//! Holds the product list and category list, populated once at startup from
//! the product repository and read-only afterwards. A failed load leaves the
//! store empty - the catalog page then renders a transient notice instead of
//! erroring.

use std::sync::{PoisonError, RwLock};

use loomwear_core::{Product, ProductId};

use crate::db::{ProductRepository, RepositoryError};

/// Name of the synthetic category entry that matches every product.
pub const ALL_CATEGORY: &str = "All";

#[derive(Debug, Default)]
struct CatalogData {
    products: Vec<Product>,
    categories: Vec<String>,
    loaded: bool,
}

/// The catalog store.
///
/// Interior mutability is only exercised by the one-shot startup load; all
/// request handlers take read locks.
#[derive(Debug, Default)]
pub struct Catalog {
    inner: RwLock<CatalogData>,
}

impl Catalog {
    /// Create an empty, not-yet-loaded catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the catalog from the product repository.
    ///
    /// Returns the number of products loaded. On failure the existing state
    /// is left unchanged, per the degrade-gracefully contract.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if either fetch fails.
    pub async fn load(&self, repo: &ProductRepository<'_>) -> Result<usize, RepositoryError> {
        let products = repo.list_all().await?;
        let mut categories = vec![ALL_CATEGORY.to_string()];
        categories.extend(repo.list_categories().await?);

        let count = products.len();
        let mut data = self.write();
        data.products = products;
        data.categories = categories;
        data.loaded = true;
        Ok(count)
    }

    /// Whether the startup load succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.read().loaded
    }

    /// The full product list, newest first.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.read().products.clone()
    }

    /// Look up a single product by ID.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.read().products.iter().find(|p| p.id == id).cloned()
    }

    /// The category list shown in the filter bar, `"All"` first.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let data = self.read();
        if data.categories.is_empty() {
            vec![ALL_CATEGORY.to_string()]
        } else {
            data.categories.clone()
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, CatalogData> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CatalogData> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog_defaults() {
        let catalog = Catalog::new();
        assert!(!catalog.is_loaded());
        assert!(catalog.products().is_empty());
        assert_eq!(catalog.categories(), vec![ALL_CATEGORY.to_string()]);
        assert!(catalog.product(ProductId::new(1)).is_none());
    }
}
