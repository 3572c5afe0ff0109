//! Session-stored models for the storefront.

pub mod reviews;
pub mod session;

pub use reviews::{VisitorReviews, strip_tags};
pub use session::{CurrentAdmin, keys as session_keys};
