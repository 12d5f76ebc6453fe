//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The whole cart state lives in the visitor's session under the `"cart"`
//! key and is written back in full after every mutation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use loomwear_core::ProductId;
use loomwear_core::cart::{Cart, CartLineItem};

use crate::filters;
use crate::state::AppState;

/// Session key holding the serialized cart (`{ "items": [...] }`).
pub const CART_KEY: &str = "cart";

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub selected_size: String,
    pub category: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl From<&CartLineItem> for CartItemView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            product_id: item.product_id.as_i32(),
            name: item.name.clone(),
            selected_size: item.selected_size.clone(),
            category: item.category.to_string(),
            image: item.image.clone(),
            quantity: item.quantity,
            unit_price: item.price,
            line_total: item.line_total(),
        }
    }
}

/// Order summary display data.
#[derive(Clone)]
pub struct CartSummaryView {
    pub count: u32,
    pub subtotal: Decimal,
    pub gst_amount: Decimal,
    /// Display-only CGST half of the GST amount (9%).
    pub cgst: Decimal,
    /// Display-only SGST half of the GST amount (9%).
    pub sgst: Decimal,
    pub total: Decimal,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub summary: CartSummaryView,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let gst_amount = cart.gst_amount();
        let half = gst_amount / Decimal::TWO;
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            summary: CartSummaryView {
                count: cart.count(),
                subtotal: cart.subtotal(),
                gst_amount,
                cgst: half,
                sgst: half,
                total: cart.total(),
            },
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session.
///
/// A missing or unparseable record yields the empty cart - storage
/// corruption never propagates as an error.
async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(CART_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the full cart state to the session.
///
/// Save failures are logged, not surfaced: the in-memory cart for this
/// request is still correct, only durability suffers.
async fn save_cart(session: &Session, cart: &Cart) {
    if let Err(e) = session.insert(CART_KEY, cart).await {
        tracing::error!("Failed to persist cart to session: {e}");
    }
}

// =============================================================================
// Forms and Templates
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    #[serde(default)]
    pub size: String,
}

/// Update cart form data.
///
/// The quantity is signed on the wire so an out-of-range value clamps
/// instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i32,
    pub size: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
    pub size: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartShowTemplate {
        cart: CartView::from(&cart),
    }
}

/// Add one unit of a product/size to the cart (HTMX).
///
/// Returns the cart count badge plus an HTMX trigger so other fragments
/// refresh themselves.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let Some(product) = state.catalog().product(ProductId::new(form.product_id)) else {
        tracing::warn!(product_id = form.product_id, "Add to cart for unknown product");
        return (
            StatusCode::NOT_FOUND,
            Html("<span class=\"text-red-500\">Product not found</span>"),
        )
            .into_response();
    };

    // Blank size falls back to the product's first size, as the catalog
    // card preselects it.
    let size = if form.size.is_empty() {
        product
            .sizes
            .first()
            .cloned()
            .unwrap_or_else(|| "M".to_string())
    } else {
        form.size
    };

    let mut cart = load_cart(&session).await;
    cart.add(&product, &size);
    save_cart(&session, &cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.count(),
        },
    )
        .into_response()
}

/// Update a cart line's quantity (HTMX).
///
/// Quantities clamp to a minimum of 1; removing a line is an explicit
/// `/cart/remove` call.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Response {
    let quantity = u32::try_from(form.quantity.clamp(1, i64::from(u32::MAX))).unwrap_or(1);

    let mut cart = load_cart(&session).await;
    cart.update_quantity(ProductId::new(form.product_id), &form.size, quantity);
    save_cart(&session, &cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response()
}

/// Remove a line from the cart (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Response {
    let mut cart = load_cart(&session).await;
    cart.remove(ProductId::new(form.product_id), &form.size);
    save_cart(&session, &cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response()
}

/// Remove all lines from the cart (HTMX).
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Response {
    let mut cart = load_cart(&session).await;
    cart.clear();
    save_cart(&session, &cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response()
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartCountTemplate {
        count: cart.count(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use loomwear_core::{Category, Product};

    use super::*;

    fn product(id: i32, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::new(price, 0),
            description: "Soft and breathable.".to_string(),
            image: format!("https://example.com/{id}.jpg"),
            category: Category::Men,
            subcategory: "Innerwear".to_string(),
            in_stock: true,
            sizes: vec!["M".to_string()],
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_cart_view_totals_and_gst_split() {
        let mut cart = Cart::new();
        let briefs = product(1, 299);
        let boxers = product(2, 449);
        cart.add(&briefs, "M");
        cart.add(&briefs, "M");
        cart.add(&boxers, "M");

        let view = CartView::from(&cart);

        assert_eq!(view.summary.count, 3);
        assert_eq!(view.summary.subtotal, Decimal::new(1047, 0));
        assert_eq!(view.summary.gst_amount, Decimal::new(18846, 2));
        assert_eq!(view.summary.cgst, Decimal::new(9423, 2));
        assert_eq!(view.summary.sgst, Decimal::new(9423, 2));
        assert_eq!(
            view.summary.cgst + view.summary.sgst,
            view.summary.gst_amount
        );
        assert_eq!(view.summary.total, Decimal::new(123_546, 2));
    }

    #[test]
    fn test_cart_item_view_carries_the_snapshot() {
        let mut cart = Cart::new();
        cart.add(&product(5, 599), "M");

        let view = CartView::from(&cart);
        assert_eq!(view.items.len(), 1);
        let item = &view.items[0];
        assert_eq!(item.product_id, 5);
        assert_eq!(item.name, "Product 5");
        assert_eq!(item.category, "Men");
        assert_eq!(item.unit_price, Decimal::new(599, 0));
        assert_eq!(item.line_total, Decimal::new(599, 0));
    }
}
