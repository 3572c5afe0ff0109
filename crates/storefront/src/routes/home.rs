//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use super::Layout;
use crate::filters;
use crate::middleware::{CartSession, OptionalAdmin};

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
}

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(cart: CartSession, OptionalAdmin(admin): OptionalAdmin) -> impl IntoResponse {
    HomeTemplate {
        layout: Layout::new(cart.cart(), admin.is_some()),
    }
}
