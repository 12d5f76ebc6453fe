//! Catalog page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use loomwear_core::catalog::{self, FilterCriteria, SortOption};
use loomwear_core::{CategoryFilter, Product};

use crate::filters;
use crate::state::AppState;

/// Catalog view query parameters.
///
/// All optional; absent or unrecognised values fall back to the default
/// view (all categories, no search, newest first).
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub sort: String,
}

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub price: Decimal,
    pub in_stock: bool,
    pub sizes: Vec<String>,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            category: product.category.to_string(),
            price: product.price,
            in_stock: product.in_stock,
            sizes: product.sizes.clone(),
        }
    }
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
    pub categories: Vec<String>,
    pub selected_category: String,
    pub search_query: String,
    pub sort: String,
    /// False when the startup catalog load failed; the page then shows a
    /// transient notice instead of products.
    pub catalog_ready: bool,
}

/// Display the catalog page.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let criteria = FilterCriteria {
        category: CategoryFilter::parse(&query.category),
        search: query.q.clone(),
        sort: SortOption::parse(&query.sort),
    };

    let display = catalog::derive(&state.catalog().products(), &criteria);

    HomeTemplate {
        products: display.iter().map(ProductCardView::from).collect(),
        categories: state.catalog().categories(),
        selected_category: criteria.category.as_str().to_string(),
        search_query: query.q,
        sort: criteria.sort.as_str().to_string(),
        catalog_ready: state.catalog().is_loaded(),
    }
}
