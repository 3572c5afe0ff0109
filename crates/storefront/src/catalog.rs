//! Product catalog loaded from per-product JSON descriptors.
//!
//! Descriptors are fetched once at startup, one request per file, all
//! concurrently. A descriptor that fails to load (missing file, HTTP error,
//! malformed JSON) is logged and left out of the catalog; it never stops the
//! others from loading.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use daily_harvest_core::{Product, ProductId};
use tokio::task::JoinSet;
use url::Url;

use crate::config::CatalogConfig;
use crate::models::strip_tags;

/// Errors loading a single product descriptor.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid descriptor file name: {0}")]
    InvalidFileName(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid descriptor URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed descriptor: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where product descriptors are fetched from.
#[derive(Debug, Clone)]
pub enum ProductSource {
    /// Read `<dir>/<file>` from disk.
    Directory(PathBuf),
    /// GET `<base><file>` over HTTP.
    Http { client: reqwest::Client, base: Url },
}

impl ProductSource {
    /// Pick the source described by the configuration. A products URL wins
    /// over the products directory.
    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        config.products_url.as_ref().map_or_else(
            || Self::Directory(config.products_dir.clone()),
            |base| Self::Http {
                client: reqwest::Client::new(),
                base: base.clone(),
            },
        )
    }

    /// Fetch and parse one descriptor. Published review comments are
    /// reduced to plain text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file name is not a plain file name,
    /// the descriptor cannot be read or fetched, or it is not a valid product.
    pub async fn fetch(&self, file: &str) -> Result<Product, CatalogError> {
        if !is_plain_file_name(file) {
            return Err(CatalogError::InvalidFileName(file.to_string()));
        }

        let bytes = match self {
            Self::Directory(dir) => {
                let path = dir.join(file);
                tokio::fs::read(&path)
                    .await
                    .map_err(|source| CatalogError::Io { path, source })?
            }
            Self::Http { client, base } => {
                let url = base.join(file)?;
                client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .bytes()
                    .await?
                    .to_vec()
            }
        };

        let mut product: Product = serde_json::from_slice(&bytes)?;
        for review in &mut product.reviews {
            review.comment = strip_tags(&review.comment);
        }
        Ok(product)
    }
}

/// Reject anything that could escape the descriptor directory or base URL.
fn is_plain_file_name(file: &str) -> bool {
    !file.is_empty()
        && !file.contains(['/', '\\'])
        && file != "."
        && file != ".."
        && Path::new(file).file_name().is_some()
}

/// The loaded product catalog.
///
/// Cheaply cloneable; the product list is shared.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    /// Build a catalog from already-loaded products.
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(products),
        }
    }

    /// Load every descriptor in `files` from `source`.
    ///
    /// Products keep the order of `files`. Failed descriptors are logged and
    /// skipped. If two descriptors share a product ID, the first one wins.
    pub async fn load(source: &ProductSource, files: &[String]) -> Self {
        let mut tasks = JoinSet::new();
        for (index, file) in files.iter().enumerate() {
            let source = source.clone();
            let file = file.clone();
            tasks.spawn(async move {
                let result = source.fetch(&file).await;
                (index, file, result)
            });
        }

        let mut loaded = Vec::with_capacity(files.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, file, Ok(product))) => {
                    tracing::debug!(file = %file, product_id = %product.id, "Loaded product");
                    loaded.push((index, product));
                }
                Ok((_, file, Err(e))) => {
                    tracing::error!(file = %file, error = %e, "Failed to load product descriptor");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Product descriptor task failed");
                }
            }
        }
        loaded.sort_by_key(|(index, _)| *index);

        let mut seen = HashSet::new();
        let products: Vec<Product> = loaded
            .into_iter()
            .map(|(_, product)| product)
            .filter(|product| {
                let first = seen.insert(product.id.clone());
                if !first {
                    tracing::warn!(product_id = %product.id, "Duplicate product ID, keeping the first");
                }
                first
            })
            .collect();

        tracing::info!(
            loaded = products.len(),
            requested = files.len(),
            "Product catalog loaded"
        );

        Self::from_products(products)
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Whether no product loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of loaded products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, extract::Path as AxumPath, http::StatusCode, routing::get};

    use super::*;

    const APPLE: &str = r#"{"id":"apple","name":"Apple","price":1.25,"description":"Crisp and sweet","image":"apple.png","reviews":[],"inStock":true}"#;
    const GRAPES: &str = r#"{"id":"grapes","name":"Grapes","price":3,"image":"grapes.png","reviews":[],"inStock":false}"#;
    const PEAR: &str = r#"{"id":"pear","name":"Pear","price":2.5,"reviews":[],"inStock":true}"#;

    fn write_descriptors(dir: &Path, files: &[(&str, &str)]) {
        for (name, body) in files {
            std::fs::write(dir.join(name), body).unwrap();
        }
    }

    fn names(files: &[&str]) -> Vec<String> {
        files.iter().map(ToString::to_string).collect()
    }

    fn ids(catalog: &Catalog) -> Vec<&str> {
        catalog.products().iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_load_from_directory_keeps_file_order() {
        let dir = tempfile::tempdir().unwrap();
        write_descriptors(
            dir.path(),
            &[("apple.json", APPLE), ("grapes.json", GRAPES), ("pear.json", PEAR)],
        );

        let source = ProductSource::Directory(dir.path().to_path_buf());
        let catalog =
            Catalog::load(&source, &names(&["pear.json", "apple.json", "grapes.json"])).await;

        assert_eq!(ids(&catalog), ["pear", "apple", "grapes"]);
        assert!(!catalog.get(&ProductId::new("grapes")).unwrap().in_stock);
    }

    #[tokio::test]
    async fn test_load_skips_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        write_descriptors(
            dir.path(),
            &[("apple.json", APPLE), ("orange.json", "{ not json"), ("pear.json", PEAR)],
        );

        let source = ProductSource::Directory(dir.path().to_path_buf());
        let catalog = Catalog::load(
            &source,
            &names(&["apple.json", "orange.json", "kiwi.json", "pear.json"]),
        )
        .await;

        assert_eq!(ids(&catalog), ["apple", "pear"]);
    }

    #[tokio::test]
    async fn test_load_keeps_first_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let other_apple = APPLE.replace("Apple", "Green Apple");
        write_descriptors(
            dir.path(),
            &[("apple.json", APPLE), ("apple2.json", other_apple.as_str())],
        );

        let source = ProductSource::Directory(dir.path().to_path_buf());
        let catalog = Catalog::load(&source, &names(&["apple.json", "apple2.json"])).await;

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products()[0].name, "Apple");
    }

    #[tokio::test]
    async fn test_load_accepts_date_only_review() {
        let dir = tempfile::tempdir().unwrap();
        let apple = APPLE.replace(
            r#""reviews":[]"#,
            r#""reviews":[{"author":"Sam","comment":"Great","date":"2025-01-01"}]"#,
        );
        write_descriptors(dir.path(), &[("apple.json", apple.as_str())]);

        let source = ProductSource::Directory(dir.path().to_path_buf());
        let catalog = Catalog::load(&source, &names(&["apple.json"])).await;

        assert_eq!(ids(&catalog), ["apple"]);
        let review = &catalog.products()[0].reviews[0];
        assert_eq!(review.date.format("%Y-%m-%d").to_string(), "2025-01-01");
    }

    #[tokio::test]
    async fn test_fetch_strips_tags_from_published_reviews() {
        let dir = tempfile::tempdir().unwrap();
        let apple = APPLE.replace(
            r#""reviews":[]"#,
            r#""reviews":[{"author":"Sam","comment":"<b>Great</b>","date":"2025-01-01T00:00:00.000Z"}]"#,
        );
        write_descriptors(dir.path(), &[("apple.json", apple.as_str())]);

        let source = ProductSource::Directory(dir.path().to_path_buf());
        let product = source.fetch("apple.json").await.unwrap();

        assert_eq!(product.reviews[0].comment, "Great");
    }

    #[tokio::test]
    async fn test_fetch_rejects_path_traversal() {
        let source = ProductSource::Directory(PathBuf::from("."));
        let err = source.fetch("../secrets.json").await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFileName(_)));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name(""));
        assert!(is_plain_file_name("apple.json"));
    }

    #[tokio::test]
    async fn test_load_over_http() {
        async fn descriptor(AxumPath(file): AxumPath<String>) -> Result<&'static str, StatusCode> {
            match file.as_str() {
                "apple.json" => Ok(APPLE),
                "pear.json" => Ok(PEAR),
                "orange.json" => Err(StatusCode::INTERNAL_SERVER_ERROR),
                _ => Err(StatusCode::NOT_FOUND),
            }
        }

        let app = Router::new().route("/products/{file}", get(descriptor));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let source = ProductSource::Http {
            client: reqwest::Client::new(),
            base: Url::parse(&format!("http://{addr}/products/")).unwrap(),
        };
        let catalog = Catalog::load(
            &source,
            &names(&["apple.json", "orange.json", "grapes.json", "pear.json"]),
        )
        .await;

        assert_eq!(ids(&catalog), ["apple", "pear"]);
    }

    #[test]
    fn test_from_config_prefers_url() {
        let mut config = CatalogConfig::default();
        assert!(matches!(
            ProductSource::from_config(&config),
            ProductSource::Directory(_)
        ));

        config.products_url = Some(Url::parse("https://cdn.example.com/products/").unwrap());
        assert!(matches!(
            ProductSource::from_config(&config),
            ProductSource::Http { .. }
        ));
    }
}
