//! Product listing and review handlers.
//!
//! The review modal is part of the listing page: `?review=<id>` renders the
//! page with that product's reviews and the review form open.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use daily_harvest_core::{Product, ProductId, Review, ReviewError, SalePercent};
use serde::Deserialize;
use tracing::instrument;

use super::Layout;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{CartSession, OptionalAdmin};
use crate::models::{VisitorReviews, session_keys, strip_tags};
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    /// Product whose reviews to show.
    pub review: Option<String>,
}

/// Review form data.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub comment: String,
}

/// Review modal display data.
pub struct ReviewModal {
    pub product: Product,
    pub reviews: Vec<Review>,
    pub error: Option<&'static str>,
    /// Form values to show again after a rejected submission.
    pub author: String,
    pub comment: String,
}

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsTemplate {
    pub layout: Layout,
    pub products: Vec<Product>,
    pub sale: SalePercent,
    pub modal: Option<ReviewModal>,
}

const fn review_error_message(error: &ReviewError) -> &'static str {
    match error {
        ReviewError::EmptyAuthor => "Please enter your name.",
        ReviewError::EmptyComment => "Please enter your review.",
    }
}

async fn visitor_reviews(cart: &CartSession) -> Result<VisitorReviews> {
    Ok(cart
        .session()
        .get::<VisitorReviews>(session_keys::REVIEWS)
        .await?
        .unwrap_or_default())
}

/// Display the product listing.
///
/// An unknown `review` id is ignored and the page renders without a modal.
#[instrument(skip(state, cart, admin))]
pub async fn index(
    State(state): State<AppState>,
    cart: CartSession,
    OptionalAdmin(admin): OptionalAdmin,
    Query(query): Query<ProductsQuery>,
) -> Result<ProductsTemplate> {
    let modal = match query.review {
        Some(id) => match state.catalog().get(&ProductId::new(id)) {
            Some(product) => {
                let reviews = visitor_reviews(&cart).await?.merged(product);
                Some(ReviewModal {
                    product: product.clone(),
                    reviews,
                    error: None,
                    author: String::new(),
                    comment: String::new(),
                })
            }
            None => None,
        },
        None => None,
    };

    Ok(ProductsTemplate {
        layout: Layout::new(cart.cart(), admin.is_some()),
        products: state.catalog().products().to_vec(),
        sale: state.sale(),
        modal,
    })
}

/// Add a review to a product.
///
/// On success redirects back to the listing with the modal open. A blank
/// name or comment re-renders the modal with an inline error.
#[instrument(skip(state, cart, admin, form))]
pub async fn add_review(
    State(state): State<AppState>,
    cart: CartSession,
    OptionalAdmin(admin): OptionalAdmin,
    Path(id): Path<String>,
    Form(form): Form<ReviewForm>,
) -> Result<Response> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::ProductNotFound(id.clone()))?;

    let comment = strip_tags(&form.comment);
    let mut reviews = visitor_reviews(&cart).await?;

    match Review::compose(&form.author, &comment, chrono::Utc::now()) {
        Ok(review) => {
            reviews.append(id.clone(), review);
            cart.session()
                .insert(session_keys::REVIEWS, &reviews)
                .await?;

            add_breadcrumb("reviews", "Added review", Some(&[("product_id", id.as_str())]));
            tracing::info!(product_id = %id, "Review added");

            let query: String = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("review", id.as_str())
                .finish();
            Ok(Redirect::to(&format!("/products?{query}")).into_response())
        }
        Err(e) => {
            tracing::debug!(product_id = %id, error = %e, "Rejected review");
            Ok(ProductsTemplate {
                layout: Layout::new(cart.cart(), admin.is_some()),
                products: state.catalog().products().to_vec(),
                sale: state.sale(),
                modal: Some(ReviewModal {
                    product: product.clone(),
                    reviews: reviews.merged(product),
                    error: Some(review_error_message(&e)),
                    author: form.author,
                    comment: form.comment,
                }),
            }
            .into_response())
        }
    }
}
