//! The Daily Harvest Core - Shared types and cart logic.
//!
//! This crate provides the domain types used by the storefront binary:
//! products and reviews, prices and their formatting, email validation, the
//! admin sale percent, and the cart store itself.
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no sessions,
//! no HTTP. Every cart operation is a total function over the current list,
//! which keeps it trivially testable and usable from any handler.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, emails and sale percents
//! - [`cart`] - The cart store and checkout snapshots

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartItem, OrderSnapshot};
pub use types::*;
