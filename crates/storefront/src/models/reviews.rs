//! Reviews written during a visit.

use std::collections::HashMap;
use std::sync::LazyLock;

use daily_harvest_core::{Product, ProductId, Review};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Regex matching HTML tags in a review comment.
#[allow(clippy::expect_used)]
static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Remove HTML tags so a comment is shown as plain text.
///
/// Applied to published reviews when a descriptor is loaded and to
/// submitted reviews before they are stored.
#[must_use]
pub fn strip_tags(comment: &str) -> String {
    HTML_TAG_RE.replace_all(comment, "").into_owned()
}

/// Reviews the visitor has added, per product.
///
/// Append-only. They are shown after the product's published reviews and
/// live only as long as the visitor's session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitorReviews(HashMap<ProductId, Vec<Review>>);

impl VisitorReviews {
    /// Append a review for a product.
    pub fn append(&mut self, id: ProductId, review: Review) {
        self.0.entry(id).or_default().push(review);
    }

    /// Reviews added for one product, oldest first.
    #[must_use]
    pub fn for_product(&self, id: &ProductId) -> &[Review] {
        self.0.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Published reviews followed by the visitor's own.
    #[must_use]
    pub fn merged(&self, product: &Product) -> Vec<Review> {
        product
            .reviews
            .iter()
            .chain(self.for_product(&product.id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use daily_harvest_core::Price;

    use super::*;

    fn review(author: &str) -> Review {
        Review::compose(author, "Nice", Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
            .unwrap()
    }

    #[test]
    fn test_merged_keeps_published_first() {
        let product = Product {
            id: ProductId::new("apple"),
            name: "Apple".to_string(),
            price: Price::from_cents(125),
            description: None,
            image: None,
            reviews: vec![review("Sam")],
            in_stock: true,
        };

        let mut reviews = VisitorReviews::default();
        reviews.append(product.id.clone(), review("Taylor"));
        reviews.append(ProductId::new("pear"), review("Jamie"));
        reviews.append(product.id.clone(), review("Alex"));

        let authors: Vec<String> = reviews
            .merged(&product)
            .into_iter()
            .map(|r| r.author)
            .collect();
        assert_eq!(authors, ["Sam", "Taylor", "Alex"]);
        assert!(reviews.for_product(&ProductId::new("kiwi")).is_empty());
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<b>Great</b>"), "Great");
        assert_eq!(strip_tags("so <i>very</i> fresh"), "so very fresh");
        assert_eq!(strip_tags("<script>alert(1)</script>"), "alert(1)");
        assert_eq!(strip_tags("3 < 4"), "3 < 4");
        assert_eq!(strip_tags("<br>"), "");
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut reviews = VisitorReviews::default();
        reviews.append(ProductId::new("apple"), review("Taylor"));

        let json = serde_json::to_value(&reviews).unwrap();
        assert!(json.get("apple").is_some());
        let restored: VisitorReviews = serde_json::from_value(json).unwrap();
        assert_eq!(restored, reviews);
    }
}
