//! Product-listing JSON API.
//!
//! Responses use the `{ "success": bool, "data": ... }` envelope the
//! storefront's consumers expect. Reads go straight to the repository so a
//! fresh `lw-cli seed` is visible here without a restart.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use loomwear_core::{Product, ProductId};

use crate::catalog::ALL_CATEGORY;
use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Response envelope for the product API.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// List all products, newest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Product>>>> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(ApiResponse::ok(products))
}

/// List category names, with the synthetic `"All"` entry first.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<String>>>> {
    let mut categories = vec![ALL_CATEGORY.to_string()];
    categories.extend(ProductRepository::new(state.pool()).list_categories().await?);
    Ok(ApiResponse::ok(categories))
}

/// Fetch a single product by ID.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Product>>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    Ok(ApiResponse::ok(product))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let Json(response) = ApiResponse::ok(vec!["All".to_string(), "Men".to_string()]);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], serde_json::Value::Bool(true));
        assert_eq!(json["data"][0], "All");
    }
}
