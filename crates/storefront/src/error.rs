//! Unified error handling with Sentry integration.
//!
//! Form validation problems are not errors: they are rendered inline by the
//! page that owns the form. `AppError` covers the rest, capturing server-side
//! failures to Sentry before responding.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use daily_harvest_core::ProductId;
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading or writing the visitor session failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// No product with this ID in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The product exists but cannot be added to a cart.
    #[error("Product out of stock: {0}")]
    OutOfStock(ProductId),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ProductNotFound(_) => StatusCode::NOT_FOUND,
            Self::OutOfStock(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to show the visitor.
    fn public_message(&self) -> String {
        match self {
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::ProductNotFound(_) => "That product does not exist.".to_string(),
            Self::OutOfStock(id) => format!("Sorry, {id} is out of stock."),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (status, self.public_message()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for a shopper or admin action.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added product", Some(&[("product_id", "apple")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        breadcrumb.data.extend(pairs.iter().map(|(key, value)| {
            ((*key).to_string(), serde_json::Value::from(*value))
        }));
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::ProductNotFound(ProductId::new("kiwi"));
        assert_eq!(err.to_string(), "Product not found: kiwi");

        let err = AppError::OutOfStock(ProductId::new("grapes"));
        assert_eq!(err.to_string(), "Product out of stock: grapes");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::ProductNotFound(ProductId::new("kiwi"))
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::OutOfStock(ProductId::new("grapes"))
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal("boom".to_string()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_details_are_not_exposed() {
        let response = AppError::Internal("secret detail".to_string()).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Internal server error");
    }
}
