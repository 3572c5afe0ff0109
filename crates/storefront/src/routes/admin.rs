//! Admin sale control.
//!
//! The sale percent is a message shown to shoppers; it never changes a
//! price. It is process-wide, so every visitor sees the same sale.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use daily_harvest_core::SalePercent;
use serde::Deserialize;
use tracing::instrument;

use super::Layout;
use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::{CartSession, RequireAdmin};
use crate::state::AppState;

/// Sale form data.
#[derive(Debug, Deserialize)]
pub struct SaleForm {
    #[serde(default)]
    pub percent: String,
}

/// Admin page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub layout: Layout,
    pub username: String,
    pub sale: SalePercent,
    /// Value shown in the percent field.
    pub input: String,
    pub error: Option<&'static str>,
}

impl AdminTemplate {
    fn new(cart: &CartSession, username: String, sale: SalePercent) -> Self {
        Self {
            layout: Layout::new(cart.cart(), true),
            username,
            sale,
            input: sale.to_string(),
            error: None,
        }
    }
}

/// Display the sale control.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    cart: CartSession,
) -> AdminTemplate {
    AdminTemplate::new(&cart, admin.username, state.sale())
}

/// Set the sale percent.
///
/// Input that is not a number from 0 to 100 leaves the sale unchanged and
/// shows "Invalid input". Zero ends the sale.
#[instrument(skip(state, admin, cart))]
pub async fn set_sale(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    cart: CartSession,
    Form(form): Form<SaleForm>,
) -> Response {
    match SalePercent::parse(&form.percent) {
        Ok(percent) => {
            state.set_sale(percent);

            let value = percent.to_string();
            add_breadcrumb("admin", "Sale updated", Some(&[("percent", value.as_str())]));
            tracing::info!(percent = %percent, admin = %admin.username, "Sale updated");

            Redirect::to("/admin").into_response()
        }
        Err(e) => {
            tracing::debug!(input = %form.percent, error = %e, "Rejected sale percent");

            AdminTemplate {
                input: form.percent,
                error: Some("Invalid input"),
                ..AdminTemplate::new(&cart, admin.username, state.sale())
            }
            .into_response()
        }
    }
}

/// End the sale.
#[instrument(skip_all)]
pub async fn end_sale(State(state): State<AppState>, RequireAdmin(admin): RequireAdmin) -> Redirect {
    state.end_sale();

    add_breadcrumb("admin", "Sale ended", None);
    tracing::info!(admin = %admin.username, "Sale ended");

    Redirect::to("/admin")
}
