//! The catalog filter/sort engine.
//!
//! [`derive`] is the single entry point: given the full product list and the
//! visitor's current criteria it produces the display list. It is a pure
//! function - deterministic for fixed inputs, no side effects - so the
//! storefront can recompute it on every request without ceremony.

use crate::types::{CategoryFilter, Product};

/// Sort order for the catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Most recently created first. The default.
    #[default]
    Newest,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
}

impl SortOption {
    /// Parse a sort option from its query-parameter value.
    ///
    /// Unrecognised values fall back to `Newest`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            _ => Self::Newest,
        }
    }

    /// The query-parameter value for this sort option.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }
}

/// The visitor's current catalog view criteria.
///
/// Transient: parsed from query parameters per request, never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub category: CategoryFilter,
    pub search: String,
    pub sort: SortOption,
}

/// Derive the display list from the full product list and the criteria.
///
/// Filters by category (exact match), then by search query (case-insensitive
/// substring match against name or description), then sorts. The sort is
/// stable: products with equal keys keep their relative input order, which
/// matters because price ties are common in the catalog.
///
/// An empty input or a criteria set nothing matches yields an empty list,
/// never an error.
#[must_use]
pub fn derive(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let mut result: Vec<Product> = products
        .iter()
        .filter(|product| criteria.category.matches(product.category))
        .filter(|product| matches_search(product, &criteria.search))
        .cloned()
        .collect();

    match criteria.sort {
        SortOption::PriceAsc => result.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOption::PriceDesc => result.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOption::Newest => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }

    result
}

/// Case-insensitive substring match against product name or description.
/// An empty query matches everything.
fn matches_search(product: &Product, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    product.name.to_lowercase().contains(&query)
        || product.description.to_lowercase().contains(&query)
}
