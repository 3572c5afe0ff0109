//! Cart extractor.
//!
//! [`CartSession`] is the only writer of the cart session key. Handlers that
//! show or change the cart take it as an argument; it loads the visitor's
//! cart and persists changes made through [`CartSession::update`].

use axum::{extract::FromRequestParts, http::request::Parts};
use daily_harvest_core::Cart;
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::session_keys;

/// The visitor's cart, bound to their session.
pub struct CartSession {
    session: Session,
    cart: Cart,
}

impl CartSession {
    /// The current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The underlying session, for handlers that also touch other keys.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Apply `change` to the cart and save the result in the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    pub async fn update<R>(&mut self, change: impl FnOnce(&mut Cart) -> R) -> Result<R, AppError> {
        let result = change(&mut self.cart);
        self.session.insert(session_keys::CART, &self.cart).await?;
        Ok(result)
    }
}

impl<S> FromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A cart route mounted outside the session layer is a wiring bug:
        // fail loudly instead of serving an empty cart.
        let Some(session) = parts.extensions.get::<Session>().cloned() else {
            tracing::error!(path = %parts.uri.path(), "Cart requested without a session layer");
            return Err(AppError::Internal(
                "cart requested without a session layer".to_string(),
            ));
        };

        let cart = session
            .get::<Cart>(session_keys::CART)
            .await?
            .unwrap_or_default();

        Ok(Self { session, cart })
    }
}
