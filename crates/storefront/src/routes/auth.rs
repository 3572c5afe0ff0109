//! Login and logout handlers.
//!
//! One configured credential pair grants the admin view. Failed attempts
//! re-render the form; `POST /login` is rate limited per client IP.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::Layout;
use crate::config::AdminCredentials;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{CartSession, OptionalAdmin, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub error: Option<&'static str>,
    pub username: String,
}

/// Constant-time byte comparison, so response timing does not reveal how
/// much of a guess was right.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Check a username and password against the configured admin pair.
#[must_use]
pub fn credentials_match(admin: &AdminCredentials, username: &str, password: &str) -> bool {
    let username_ok = constant_time_eq(admin.username.as_bytes(), username.as_bytes());
    let password_ok = constant_time_eq(admin.password.expose_secret().as_bytes(), password.as_bytes());
    username_ok & password_ok
}

/// Display the login page.
#[instrument(skip_all)]
pub async fn login_page(cart: CartSession, OptionalAdmin(admin): OptionalAdmin) -> LoginTemplate {
    LoginTemplate {
        layout: Layout::new(cart.cart(), admin.is_some()),
        error: None,
        username: String::new(),
    }
}

/// Handle a login attempt.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    cart: CartSession,
    OptionalAdmin(admin): OptionalAdmin,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if credentials_match(&state.config().admin, &form.username, &form.password) {
        set_current_admin(cart.session(), &CurrentAdmin::new(&form.username)).await?;

        add_breadcrumb("auth", "Admin logged in", None);
        tracing::info!(username = %form.username, "Admin logged in");

        return Ok(Redirect::to("/admin").into_response());
    }

    tracing::warn!(username = %form.username, "Failed admin login");

    Ok(LoginTemplate {
        layout: Layout::new(cart.cart(), admin.is_some()),
        error: Some("Invalid credentials"),
        username: form.username,
    }
    .into_response())
}

/// Log out and return to the home page.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_admin(&session).await?;

    add_breadcrumb("auth", "Admin logged out", None);

    Ok(Redirect::to("/"))
}
