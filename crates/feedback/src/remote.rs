//! HTTP implementation of the remote document store.
//!
//! [`HttpDocumentStore`] writes JSON documents to a collection endpoint
//! (`POST {base_url}/collections/{collection}/documents`). The server
//! assigns each document's creation timestamp. There is deliberately no
//! retry or offline queueing here: a failed write surfaces immediately
//! and the widget keeps the draft.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::FeedbackError;
use crate::ports::DocumentStore;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Remote store configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct RemoteStoreConfig {
    /// Base URL of the document store (default: `http://localhost:8080`).
    pub base_url: String,
    /// Optional bearer token sent with every request.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds (default: `10`).
    pub timeout_secs: u64,
}

impl RemoteStoreConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                 |
    /// |--------------------------------|-------------------------|
    /// | `CAMPUSREEL_STORE_URL`         | `http://localhost:8080` |
    /// | `CAMPUSREEL_STORE_API_KEY`     | unset                   |
    /// | `CAMPUSREEL_STORE_TIMEOUT_SECS`| `10`                    |
    pub fn from_env() -> Self {
        let base_url = std::env::var("CAMPUSREEL_STORE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".into());

        let api_key = std::env::var("CAMPUSREEL_STORE_API_KEY").ok();

        let timeout_secs: u64 = std::env::var("CAMPUSREEL_STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("CAMPUSREEL_STORE_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_key,
            timeout_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// HttpDocumentStore
// ---------------------------------------------------------------------------

/// Response body of a successful document creation.
#[derive(Debug, Deserialize)]
struct CreatedDocument {
    id: String,
}

/// Document store backed by an HTTP collection API.
pub struct HttpDocumentStore {
    client: reqwest::Client,
    config: RemoteStoreConfig,
}

impl HttpDocumentStore {
    /// Create a store with a pre-configured HTTP client.
    pub fn new(config: RemoteStoreConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    fn document_url(&self, collection: &str) -> String {
        format!(
            "{}/collections/{}/documents",
            self.config.base_url.trim_end_matches('/'),
            collection
        )
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn create_document(
        &self,
        collection: &str,
        document: serde_json::Value,
    ) -> Result<String, FeedbackError> {
        let url = self.document_url(collection);

        let mut request = self.client.post(&url).json(&document);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FeedbackError::Store(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedbackError::Store(format!(
                "Store returned HTTP {}",
                status.as_u16()
            )));
        }

        let created: CreatedDocument = response
            .json()
            .await
            .map_err(|e| FeedbackError::Store(format!("Malformed store response: {e}")))?;

        tracing::debug!(collection, document_id = %created.id, "Document created");
        Ok(created.id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> RemoteStoreConfig {
        RemoteStoreConfig {
            base_url: base_url.into(),
            api_key: None,
            timeout_secs: 10,
        }
    }

    #[test]
    fn new_does_not_panic() {
        let _store = HttpDocumentStore::new(config("http://localhost:8080"));
    }

    #[test]
    fn document_url_joins_collection_path() {
        let store = HttpDocumentStore::new(config("https://store.example.edu"));
        assert_eq!(
            store.document_url("feedback_reports"),
            "https://store.example.edu/collections/feedback_reports/documents"
        );
    }

    #[test]
    fn document_url_tolerates_trailing_slash() {
        let store = HttpDocumentStore::new(config("https://store.example.edu/"));
        assert_eq!(
            store.document_url("feedback_reports"),
            "https://store.example.edu/collections/feedback_reports/documents"
        );
    }
}
