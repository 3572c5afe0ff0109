//! Products and customer reviews.
//!
//! A [`Product`] is deserialized from a per-product JSON descriptor. Field
//! names follow the descriptor files (`inStock`, not `in_stock`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ProductId, Price};

/// A product as described by its descriptor file.
///
/// Immutable once loaded. Reviews listed in the descriptor are the
/// product's published reviews; reviews a visitor adds are kept alongside
/// it, never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image file name under the product image directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub in_stock: bool,
}

/// Errors that can occur when composing a [`Review`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("review author cannot be empty")]
    EmptyAuthor,
    #[error("review comment cannot be empty")]
    EmptyComment,
}

/// A customer review. Appended only; never edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub comment: String,
    /// Read from any ISO-8601 date or date-time; written back as RFC 3339.
    #[serde(deserialize_with = "review_date::deserialize")]
    pub date: DateTime<Utc>,
}

/// Lenient ISO-8601 parsing for review dates.
///
/// Descriptors are hand-written, so a date without a time or a time without
/// an offset is read as UTC rather than rejecting the whole product.
mod review_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, de::Error};

    const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid ISO-8601 date: {raw}")))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();

        if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
            return Some(date.with_timezone(&Utc));
        }
        if let Some(date) = LOCAL_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        {
            return Some(date.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|date| date.and_utc())
    }
}

impl Review {
    /// Build a review from form input, trimming both fields.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError`] if the author or comment is blank.
    pub fn compose(author: &str, comment: &str, date: DateTime<Utc>) -> Result<Self, ReviewError> {
        let author = author.trim();
        let comment = comment.trim();

        if author.is_empty() {
            return Err(ReviewError::EmptyAuthor);
        }
        if comment.is_empty() {
            return Err(ReviewError::EmptyComment);
        }

        Ok(Self {
            author: author.to_owned(),
            comment: comment.to_owned(),
            date,
        })
    }
}
