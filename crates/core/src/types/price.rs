//! Type-safe price representation using decimal arithmetic.
//!
//! All prices in the store are US dollars. Amounts are kept as
//! [`Decimal`] so that cart totals are exact: `10 * 2 + 1.25 * 4` is
//! `25`, not `24.999999999999996`.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price in US dollars.
///
/// Descriptor files carry prices as plain JSON numbers (`"price": 1.25`).
/// Each number is read back from its shortest decimal form, so `1.25` is
/// exactly one dollar twenty-five. Serialized prices are strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a dollar amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The dollar amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_price(self.0))
    }
}

/// Anything with a unit price and a quantity.
pub trait LineItem {
    /// Price of a single unit.
    fn unit_price(&self) -> Price;
    /// Number of units.
    fn quantity(&self) -> u32;

    /// `unit_price * quantity`.
    fn line_total(&self) -> Price {
        self.unit_price().times(self.quantity())
    }
}

impl LineItem for (Price, u32) {
    fn unit_price(&self) -> Price {
        self.0
    }

    fn quantity(&self) -> u32 {
        self.1
    }
}

/// Sum of `price * quantity` over `items`. An empty list sums to zero.
#[must_use]
pub fn calculate_total<T: LineItem>(items: &[T]) -> Price {
    Price(items.iter().map(|item| item.line_total().0).sum())
}

/// Format an amount as US currency: `$` prefix, thousands separators,
/// exactly two decimal places.
///
/// Rounds half away from zero. Negative amounts render as `-$1.00`.
///
/// ```rust
/// # use daily_harvest_core::format_price;
/// # use rust_decimal::Decimal;
/// assert_eq!(format_price(Decimal::new(123_456, 2)), "$1,234.56");
/// assert_eq!(format_price(Decimal::ZERO), "$0.00");
/// ```
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Insert a comma between every group of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
