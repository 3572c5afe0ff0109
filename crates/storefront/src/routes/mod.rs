//! HTTP route handlers for the storefront.
//!
//! Pages are server-rendered; every mutating form posts and then redirects
//! (POST/redirect/GET) unless it has validation errors to show inline.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//!
//! # Products
//! GET  /products               - Product listing (?review=<id> opens reviews)
//! POST /products/{id}/reviews  - Add a review
//!
//! # Cart
//! GET  /cart                   - Cart page (?checkout=true opens the modal)
//! POST /cart/add               - Add one of a product
//! POST /cart/update            - Set a quantity (<= 0 removes)
//! POST /cart/remove            - Remove an item
//! POST /cart/clear             - Empty the cart
//! POST /cart/checkout          - Confirm checkout
//! GET  /cart/order             - Last confirmed order
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Contact
//! GET  /contact                - Contact form
//! POST /contact                - Submit the contact form
//! GET  /contact/continue       - Dismiss the thank-you message
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action (rate limited)
//! POST /logout                 - Logout action
//!
//! # Admin (requires login)
//! GET  /admin                  - Sale control
//! POST /admin/sale             - Set the sale percent
//! POST /admin/sale/end         - End the sale
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod contact;
pub mod home;
pub mod products;

use axum::{
    Router,
    handler::Handler,
    routing::{get, post},
};
use daily_harvest_core::Cart;

use crate::middleware::login_rate_limiter;
use crate::state::AppState;

/// Data every page needs for the shared header.
#[derive(Debug, Clone, Copy, Default)]
pub struct Layout {
    /// Number of units in the visitor's cart.
    pub cart_count: u64,
    /// Whether the visitor is logged in as admin.
    pub admin: bool,
}

impl Layout {
    #[must_use]
    pub fn new(cart: &Cart, admin: bool) -> Self {
        Self {
            cart_count: cart.item_count(),
            admin,
        }
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}/reviews", post(products::add_review))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
        .route("/order", get(cart::order))
        .route("/count", get(cart::count))
}

/// Create the contact routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::show).post(contact::submit))
        .route("/continue", get(contact::continue_form))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::show))
        .route("/sale", post(admin::set_sale))
        .route("/sale/end", post(admin::end_sale))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Contact form
        .nest("/contact", contact_routes())
        // Auth routes; only the login attempt is rate limited
        .route(
            "/login",
            get(auth::login_page).post(auth::login.layer(login_rate_limiter())),
        )
        .route("/logout", post(auth::logout))
        // Admin routes
        .nest("/admin", admin_routes())
}
