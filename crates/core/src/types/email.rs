//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a space, tab or other whitespace.
    #[error("email cannot contain whitespace")]
    ContainsWhitespace,
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// The domain has no dot, so there is no top-level domain.
    #[error("email domain must include a top-level domain")]
    MissingTld,
    /// A domain label is empty, has invalid characters, or starts or ends with a hyphen.
    #[error("email domain is malformed")]
    InvalidDomain,
    /// The top-level domain is shorter than two letters or not alphabetic.
    #[error("email top-level domain is invalid")]
    InvalidTld,
}

/// An email address.
///
/// ## Constraints
///
/// - Length: 1-254 characters (RFC 5321 limit)
/// - No whitespace anywhere
/// - Local part (before the first @) must not be empty
/// - Domain part must have at least two dot-separated labels
/// - Domain labels are ASCII letters, digits and hyphens, and do not start or
///   end with a hyphen
/// - The last label (TLD) is at least two ASCII letters
///
/// ## Examples
///
/// ```
/// use daily_harvest_core::Email;
///
/// // Valid emails
/// assert!(Email::parse("a@b.com").is_ok());
/// assert!(Email::parse("user.name+tag@sub.domain.com").is_ok());
///
/// // Invalid emails
/// assert!(Email::parse("").is_err());            // empty
/// assert!(Email::parse("not-an-email").is_err()); // missing @
/// assert!(Email::parse("a@b").is_err());          // missing TLD
/// assert!(Email::parse("a@b.").is_err());         // empty TLD
/// assert!(Email::parse("a@ b.com").is_err());     // whitespace
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Minimum length of the top-level domain.
    pub const MIN_TLD_LENGTH: usize = 2;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an [`EmailError`] describing the first constraint the input
    /// violates.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::ContainsWhitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;

        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }

        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        validate_domain(domain)?;

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the local part of the email (before the @).
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map_or("", |(local, _)| local)
    }

    /// Returns the domain part of the email (after the @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

fn validate_domain(domain: &str) -> Result<(), EmailError> {
    let Some((_, tld)) = domain.rsplit_once('.') else {
        return Err(EmailError::MissingTld);
    };

    for label in domain.split('.') {
        let well_formed = !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !well_formed {
            // `a@b.` ends in an empty label: report that as a bad TLD
            return Err(if label.is_empty() && tld.is_empty() {
                EmailError::InvalidTld
            } else {
                EmailError::InvalidDomain
            });
        }
    }

    if tld.len() < Email::MIN_TLD_LENGTH || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(EmailError::InvalidTld);
    }

    Ok(())
}

/// Check whether `s` is an acceptable email address.
///
/// Shorthand for `Email::parse(s).is_ok()` for form validation.
#[must_use]
pub fn validate_email(s: &str) -> bool {
    Email::parse(s).is_ok()
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("a@b.com").is_ok());
        assert!(Email::parse("user@example.com").is_ok());
        assert!(Email::parse("user.name+tag@sub.domain.com").is_ok());
        assert!(Email::parse("user@example.co.uk").is_ok());
        assert!(Email::parse("user@my-shop.io").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_missing_at() {
        assert_eq!(
            Email::parse("not-an-email"),
            Err(EmailError::MissingAtSymbol)
        );
    }

    #[test]
    fn test_parse_whitespace() {
        assert_eq!(
            Email::parse("a@ b.com"),
            Err(EmailError::ContainsWhitespace)
        );
        assert_eq!(
            Email::parse("a b@c.com"),
            Err(EmailError::ContainsWhitespace)
        );
        assert_eq!(
            Email::parse(" a@b.com"),
            Err(EmailError::ContainsWhitespace)
        );
        assert_eq!(
            Email::parse("a@b.com\t"),
            Err(EmailError::ContainsWhitespace)
        );
    }

    #[test]
    fn test_parse_empty_local_part() {
        assert_eq!(
            Email::parse("@domain.com"),
            Err(EmailError::EmptyLocalPart)
        );
    }

    #[test]
    fn test_parse_empty_domain() {
        assert_eq!(Email::parse("user@"), Err(EmailError::EmptyDomain));
    }

    #[test]
    fn test_parse_missing_tld() {
        assert_eq!(Email::parse("a@b"), Err(EmailError::MissingTld));
    }

    #[test]
    fn test_parse_empty_tld() {
        assert_eq!(Email::parse("a@b."), Err(EmailError::InvalidTld));
    }

    #[test]
    fn test_parse_malformed_domains() {
        assert_eq!(Email::parse("a@.com"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("a@b..com"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("a@-b.com"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("a@b-.com"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("a@b@c.com"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("a@b.c"), Err(EmailError::InvalidTld));
        assert_eq!(Email::parse("a@b.c0m"), Err(EmailError::InvalidTld));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com"));
        assert!(!validate_email("a@b"));
        assert!(!validate_email("a@b."));
        assert!(!validate_email("a@ b.com"));
    }

    #[test]
    fn test_local_part_and_domain() {
        let email = Email::parse("user@example.com").unwrap();
        assert_eq!(email.local_part(), "user");
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn test_from_str_and_display() {
        let email: Email = "user@example.com".parse().unwrap();
        assert_eq!(format!("{email}"), "user@example.com");
    }
}
