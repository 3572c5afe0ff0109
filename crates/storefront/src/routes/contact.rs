//! Contact form handlers.
//!
//! Messages are acknowledged but not stored or sent anywhere.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::Redirect};
use daily_harvest_core::validate_email;
use serde::Deserialize;
use tracing::instrument;

use super::Layout;
use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::{CartSession, OptionalAdmin};

/// Contact form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub request: String,
}

/// Inline validation messages, one per field.
#[derive(Debug, Clone, Default)]
pub struct ContactErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub request: Option<&'static str>,
}

impl ContactErrors {
    /// Whether the form passed validation.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.request.is_none()
    }
}

impl ContactForm {
    /// Check every field.
    #[must_use]
    pub fn validate(&self) -> ContactErrors {
        ContactErrors {
            name: self
                .name
                .trim()
                .is_empty()
                .then_some("Please enter your name."),
            email: (!validate_email(self.email.trim()))
                .then_some("Please enter a valid email address."),
            request: self
                .request
                .trim()
                .is_empty()
                .then_some("Please enter your request."),
        }
    }
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub layout: Layout,
    pub form: ContactForm,
    pub errors: ContactErrors,
    /// Show the thank-you modal.
    pub thank_you: bool,
}

/// Display an empty contact form.
#[instrument(skip_all)]
pub async fn show(cart: CartSession, OptionalAdmin(admin): OptionalAdmin) -> ContactTemplate {
    ContactTemplate {
        layout: Layout::new(cart.cart(), admin.is_some()),
        form: ContactForm::default(),
        errors: ContactErrors::default(),
        thank_you: false,
    }
}

/// Handle a contact form submission.
///
/// Invalid input re-renders the form with the entered values and inline
/// messages. A valid submission shows the thank-you modal.
#[instrument(skip_all)]
pub async fn submit(
    cart: CartSession,
    OptionalAdmin(admin): OptionalAdmin,
    Form(form): Form<ContactForm>,
) -> ContactTemplate {
    let errors = form.validate();
    let thank_you = errors.is_empty();

    if thank_you {
        add_breadcrumb("contact", "Message received", None);
        tracing::info!("Contact message received");
    }

    ContactTemplate {
        layout: Layout::new(cart.cart(), admin.is_some()),
        form,
        errors,
        thank_you,
    }
}

/// Dismiss the thank-you modal and start over with an empty form.
pub async fn continue_form() -> Redirect {
    Redirect::to("/contact")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, request: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            request: request.to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(form("John Doe", "john@example.com", "I have a question")
            .validate()
            .is_empty());
    }

    #[test]
    fn test_each_field_is_checked() {
        let errors = form(" ", "john@example", "").validate();
        assert!(errors.name.is_some());
        assert!(errors.email.is_some());
        assert!(errors.request.is_some());

        let errors = form("John", "john doe@example.com", "Hi").validate();
        assert!(errors.name.is_none());
        assert!(errors.email.is_some());
        assert!(errors.request.is_none());
    }
}
