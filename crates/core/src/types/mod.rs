//! Core types for The Daily Harvest.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod sale;

pub use email::{Email, EmailError, validate_email};
pub use id::ProductId;
pub use price::{LineItem, Price, calculate_total, format_price};
pub use product::{Product, Review, ReviewError};
pub use sale::{SaleError, SalePercent};
