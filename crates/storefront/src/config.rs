//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: `http://localhost:3000`)
//! - `STOREFRONT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `STOREFRONT_PRODUCTS_DIR` - Directory holding product descriptors
//!   (default: crates/storefront/static/products)
//! - `STOREFRONT_PRODUCTS_URL` - Base URL to fetch product descriptors from;
//!   takes precedence over `STOREFRONT_PRODUCTS_DIR`
//! - `STOREFRONT_PRODUCT_FILES` - Comma-separated descriptor file names
//! - `STOREFRONT_ADMIN_USERNAME` - Admin login name (default: admin)
//! - `STOREFRONT_ADMIN_PASSWORD` - Admin login password (default: admin)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Descriptor files loaded when `STOREFRONT_PRODUCT_FILES` is not set.
pub const DEFAULT_PRODUCT_FILES: &[&str] = &[
    "apple.json",
    "banana.json",
    "grapes.json",
    "orange.json",
    "pear.json",
    "strawberry.json",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Where product descriptors come from
    pub catalog: CatalogConfig,
    /// The single accepted admin credential pair
    pub admin: AdminCredentials,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Product catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Local descriptor directory
    pub products_dir: PathBuf,
    /// Remote descriptor base URL, preferred over `products_dir` when set
    pub products_url: Option<Url>,
    /// Descriptor file names, in display order
    pub product_files: Vec<String>,
}

/// Admin login credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: SecretString::from("admin"),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        let static_dir = PathBuf::from(get_env_or_default(
            "STOREFRONT_STATIC_DIR",
            "crates/storefront/static",
        ));

        let catalog = CatalogConfig::from_env()?;
        let admin = AdminCredentials {
            username: get_env_or_default("STOREFRONT_ADMIN_USERNAME", "admin"),
            password: SecretString::from(get_env_or_default("STOREFRONT_ADMIN_PASSWORD", "admin")),
        };

        Ok(Self {
            host,
            port,
            base_url,
            static_dir,
            catalog,
            admin,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (enables secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            static_dir: PathBuf::from("crates/storefront/static"),
            catalog: CatalogConfig::default(),
            admin: AdminCredentials::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let products_url = get_optional_env("STOREFRONT_PRODUCTS_URL")
            .map(|raw| parse_base_url(&raw))
            .transpose()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PRODUCTS_URL".to_string(), e.to_string())
            })?;

        let product_files = get_optional_env("STOREFRONT_PRODUCT_FILES")
            .map_or_else(default_product_files, |raw| parse_file_list(&raw));

        Ok(Self {
            products_dir: PathBuf::from(get_env_or_default(
                "STOREFRONT_PRODUCTS_DIR",
                "crates/storefront/static/products",
            )),
            products_url,
            product_files,
        })
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            products_dir: PathBuf::from("crates/storefront/static/products"),
            products_url: None,
            product_files: default_product_files(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

fn default_product_files() -> Vec<String> {
    DEFAULT_PRODUCT_FILES.iter().map(ToString::to_string).collect()
}

/// Split a comma-separated list, dropping blanks.
fn parse_file_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Parse a base URL, making sure it ends with `/` so that joining a file
/// name appends to the path instead of replacing its last segment.
fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    if raw.ends_with('/') {
        Url::parse(raw)
    } else {
        Url::parse(&format!("{raw}/"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_list() {
        assert_eq!(
            parse_file_list(" apple.json, ,pear.json,"),
            vec!["apple.json".to_string(), "pear.json".to_string()]
        );
        assert!(parse_file_list("").is_empty());
    }

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("https://cdn.example.com/products").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/products/");
        assert_eq!(
            url.join("apple.json").unwrap().as_str(),
            "https://cdn.example.com/products/apple.json"
        );
    }

    #[test]
    fn test_parse_base_url_invalid() {
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_default_product_files() {
        let config = CatalogConfig::default();
        assert_eq!(config.product_files.len(), DEFAULT_PRODUCT_FILES.len());
        assert!(config.product_files.contains(&"apple.json".to_string()));
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            port: 3100,
            ..StorefrontConfig::default()
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3100);
    }

    #[test]
    fn test_is_secure() {
        let mut config = StorefrontConfig::default();
        assert!(!config.is_secure());
        config.base_url = "https://harvest.example.com".to_string();
        assert!(config.is_secure());
    }

    #[test]
    fn test_admin_credentials_debug_redacts_password() {
        let admin = AdminCredentials {
            username: "manager".to_string(),
            password: SecretString::from("super_secret_admin_password"),
        };

        let debug_output = format!("{admin:?}");

        assert!(debug_output.contains("manager"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_admin_password"));
    }
}
