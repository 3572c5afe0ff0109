//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// URL prefix product image file names are served under.
pub const PRODUCT_IMAGE_PREFIX: &str = "/static/products/productImages/";

/// Returns the current year, for the footer.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the URL of a product image given its descriptor file name.
///
/// Usage in templates: `{{ image|product_image }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn product_image(file_name: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(product_image_url(&file_name.to_string()))
}

/// Build the image URL for a descriptor's `image` field.
///
/// Only the last path segment of the file name is used, so a descriptor
/// cannot point outside the image directory.
#[must_use]
pub fn product_image_url(file_name: &str) -> String {
    let name = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
    format!("{PRODUCT_IMAGE_PREFIX}{name}")
}

/// Returns the content hash for main.css.
///
/// The hash is computed at build time from the CSS file content.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}
