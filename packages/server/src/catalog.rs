use std::time::Duration;

use async_trait::async_trait;
use common::Confidentiality;
use reqwest::header;

use crate::config::CatalogConfig;

/// Errors from the document-type catalog lookup.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("request to type catalog failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("type catalog returned status {0}")]
    Status(u16),
    #[error("malformed type resource: {0}")]
    Malformed(String),
}

/// Read-only client for the external document-type catalog.
///
/// Used once per create request to default a document's confidentiality
/// from its type. Results are never cached across requests: types can be
/// reclassified, and a stale default is worse than an extra lookup.
#[async_trait]
pub trait DocumentTypeCatalog: Send + Sync {
    /// Fetch the confidentiality level registered on a document type.
    async fn confidentiality(&self, type_url: &str) -> Result<Confidentiality, CatalogError>;
}

/// HTTP implementation backed by the catalog's REST API.
pub struct HttpDocumentTypeCatalog {
    http: reqwest::Client,
    token: Option<String>,
}

impl HttpDocumentTypeCatalog {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            token: config.token.clone(),
        })
    }
}

#[async_trait]
impl DocumentTypeCatalog for HttpDocumentTypeCatalog {
    async fn confidentiality(&self, type_url: &str) -> Result<Confidentiality, CatalogError> {
        let mut request = self
            .http
            .get(type_url)
            .header(header::ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status().as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        let raw = body
            .get("confidentiality")
            .and_then(|v| v.as_str())
            .ok_or_else(|| CatalogError::Malformed("missing 'confidentiality' field".into()))?;

        raw.parse()
            .map_err(|_| CatalogError::Malformed(format!("unknown confidentiality '{raw}'")))
    }
}
