//! Cart route handlers.
//!
//! The cart itself lives in the visitor's session and is reached through
//! the [`CartSession`] extractor. Mutations redirect back to a page
//! (POST/redirect/GET) so a refresh never repeats them.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use daily_harvest_core::{Cart, LineItem, OrderSnapshot, ProductId};
use serde::Deserialize;
use tracing::instrument;

use super::Layout;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{CartSession, OptionalAdmin};
use crate::models::session_keys;
use crate::state::AppState;

/// Form naming a single product.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: String,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    /// Zero or negative removes the item.
    pub quantity: i64,
}

/// Query parameters for the cart page.
#[derive(Debug, Default, Deserialize)]
pub struct CartQuery {
    /// Open the checkout confirmation modal.
    #[serde(default)]
    pub checkout: bool,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: Layout,
    pub cart: Cart,
    /// Show the checkout confirmation modal.
    pub checkout: bool,
}

/// Order summary template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/order.html")]
pub struct OrderTemplate {
    pub layout: Layout,
    pub order: OrderSnapshot,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Display the cart page.
///
/// The checkout modal is only offered for a non-empty cart.
#[instrument(skip(cart, admin))]
pub async fn show(
    cart: CartSession,
    OptionalAdmin(admin): OptionalAdmin,
    Query(query): Query<CartQuery>,
) -> impl IntoResponse {
    let cart = cart.cart().clone();
    CartShowTemplate {
        layout: Layout::new(&cart, admin.is_some()),
        checkout: query.checkout && !cart.is_empty(),
        cart,
    }
}

/// Add one unit of a product to the cart.
///
/// Unknown products are 404; out-of-stock products are 400.
#[instrument(skip(state, cart))]
pub async fn add(
    State(state): State<AppState>,
    mut cart: CartSession,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::ProductNotFound(id.clone()))?;

    if !product.in_stock {
        return Err(AppError::OutOfStock(id));
    }

    cart.update(|cart| cart.add(product)).await?;

    add_breadcrumb("cart", "Added product", Some(&[("product_id", id.as_str())]));
    tracing::info!(product_id = %id, "Added to cart");

    Ok(Redirect::to("/products"))
}

/// Set the quantity of a cart item.
#[instrument(skip(cart))]
pub async fn update(
    mut cart: CartSession,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    let id = ProductId::new(form.product_id);
    cart.update(|cart| cart.update_quantity(&id, form.quantity))
        .await?;

    add_breadcrumb("cart", "Updated quantity", Some(&[("product_id", id.as_str())]));

    Ok(Redirect::to("/cart"))
}

/// Remove an item from the cart.
#[instrument(skip(cart))]
pub async fn remove(
    mut cart: CartSession,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let id = ProductId::new(form.product_id);
    cart.update(|cart| cart.remove(&id)).await?;

    add_breadcrumb("cart", "Removed product", Some(&[("product_id", id.as_str())]));

    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
#[instrument(skip(cart))]
pub async fn clear(mut cart: CartSession) -> Result<Redirect> {
    cart.update(Cart::clear).await?;

    add_breadcrumb("cart", "Cleared cart", None);

    Ok(Redirect::to("/cart"))
}

/// Confirm checkout.
///
/// Snapshots the cart as the visitor's last order and empties it. An empty
/// cart places no order.
#[instrument(skip(cart))]
pub async fn checkout(mut cart: CartSession) -> Result<Redirect> {
    let Some(order) = cart
        .update(|cart| cart.confirm_checkout(chrono::Utc::now()))
        .await?
    else {
        return Ok(Redirect::to("/cart"));
    };

    cart.session()
        .insert(session_keys::LAST_ORDER, &order)
        .await?;

    let item_count = order.items.len().to_string();
    add_breadcrumb(
        "checkout",
        "Order processed",
        Some(&[("items", item_count.as_str())]),
    );
    tracing::info!(items = order.items.len(), total = %order.total(), "Order processed");

    Ok(Redirect::to("/cart/order"))
}

/// Display the last confirmed order.
#[instrument(skip(cart, admin))]
pub async fn order(
    cart: CartSession,
    OptionalAdmin(admin): OptionalAdmin,
) -> Result<Response> {
    let Some(order) = cart
        .session()
        .get::<OrderSnapshot>(session_keys::LAST_ORDER)
        .await?
    else {
        return Ok(Redirect::to("/cart").into_response());
    };

    Ok(OrderTemplate {
        layout: Layout::new(cart.cart(), admin.is_some()),
        order,
    }
    .into_response())
}

/// Get the cart count badge.
#[instrument(skip(cart))]
pub async fn count(cart: CartSession) -> impl IntoResponse {
    CartCountTemplate {
        count: cart.cart().item_count(),
    }
}
