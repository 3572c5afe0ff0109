//! Application state shared across handlers.

use std::sync::{Arc, PoisonError, RwLock};

use daily_harvest_core::SalePercent;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Per-visitor state (cart,
/// reviews, last order, admin login) lives in the session instead.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    /// Written only by the admin sale handlers.
    sale: RwLock<SalePercent>,
}

impl AppState {
    /// Create a new application state with no sale active.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                sale: RwLock::new(SalePercent::NONE),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The current sale percent (`SalePercent::NONE` when no sale runs).
    #[must_use]
    pub fn sale(&self) -> SalePercent {
        *self
            .inner
            .sale
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the current sale percent.
    pub fn set_sale(&self, percent: SalePercent) {
        *self
            .inner
            .sale
            .write()
            .unwrap_or_else(PoisonError::into_inner) = percent;
    }

    /// End any running sale.
    pub fn end_sale(&self) {
        self.set_sale(SalePercent::NONE);
    }
}
