//! Admin-controlled sale percent.
//!
//! The sale percent is announced to shoppers but never applied to prices.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`SalePercent`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SaleError {
    /// The input is not a number.
    #[error("sale percent must be a number")]
    NotNumeric,
    /// The input is a number outside 0-100.
    #[error("sale percent must be between 0 and 100")]
    OutOfRange,
}

/// A sale percentage between 0 and 100. Zero means no sale is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SalePercent(Decimal);

impl SalePercent {
    /// No sale.
    pub const NONE: Self = Self(Decimal::ZERO);

    /// Largest accepted percentage.
    pub const MAX: Decimal = Decimal::ONE_HUNDRED;

    /// Parse form input such as `"15"` or `"12.5"`.
    ///
    /// # Errors
    ///
    /// Returns [`SaleError::NotNumeric`] for anything that is not a decimal
    /// number and [`SaleError::OutOfRange`] for numbers outside 0-100.
    pub fn parse(s: &str) -> Result<Self, SaleError> {
        let value = Decimal::from_str(s.trim()).map_err(|_| SaleError::NotNumeric)?;
        if value < Decimal::ZERO || value > Self::MAX {
            return Err(SaleError::OutOfRange);
        }
        Ok(Self(value.normalize()))
    }

    /// Whether a sale is currently running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.0.is_zero()
    }

    /// The percentage value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for SalePercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for SalePercent {
    type Err = SaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(SalePercent::parse("15").unwrap().to_string(), "15");
        assert_eq!(SalePercent::parse(" 12.50 ").unwrap().to_string(), "12.5");
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(SalePercent::parse("abc"), Err(SaleError::NotNumeric));
        assert_eq!(SalePercent::parse(""), Err(SaleError::NotNumeric));
        assert_eq!(SalePercent::parse("15%"), Err(SaleError::NotNumeric));
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(SalePercent::parse("-5"), Err(SaleError::OutOfRange));
        assert_eq!(SalePercent::parse("100.5"), Err(SaleError::OutOfRange));
        assert!(SalePercent::parse("100").is_ok());
    }

    #[test]
    fn test_zero_is_not_active() {
        assert!(!SalePercent::parse("0").unwrap().is_active());
        assert!(!SalePercent::NONE.is_active());
        assert!(SalePercent::parse("1").unwrap().is_active());
        assert_eq!(SalePercent::NONE.to_string(), "0");
    }
}
