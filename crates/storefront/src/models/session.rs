//! Session-related types.
//!
//! Types stored in the session for admin login state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session-stored admin identity.
///
/// Present only after a successful login with the configured credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// The username that logged in.
    pub username: String,
    /// When the login happened.
    pub logged_in_at: DateTime<Utc>,
}

impl CurrentAdmin {
    /// Create a new admin identity stamped with the current time.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            logged_in_at: Utc::now(),
        }
    }
}

/// Session keys.
///
/// Each key has exactly one writer:
/// - `CART` - the cart handlers, through `CartSession`
/// - `REVIEWS` - the review handler
/// - `LAST_ORDER` - checkout confirmation
/// - `CURRENT_ADMIN` - login and logout
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";

    /// Key for reviews the visitor has written.
    pub const REVIEWS: &str = "reviews";

    /// Key for the snapshot of the last confirmed checkout.
    pub const LAST_ORDER: &str = "last_order";

    /// Key for the logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
