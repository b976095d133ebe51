//! HTTP file store speaking to the object-storage public endpoint.

use async_trait::async_trait;
use reqwest::StatusCode;

use super::FileStore;
use crate::error::CoreError;

/// File store backed by an HTTP object-storage endpoint
pub struct HttpFileStore {
    /// Base URL of the public bucket, without trailing slash
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpFileStore {
    /// Create a store over the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl FileStore for HttpFileStore {
    async fn download(&self, path: &str) -> Result<Vec<u8>, CoreError> {
        let url = self.object_url(path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CoreError::StoreUnavailable(format!("GET {url}: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CoreError::NotFound(path.to_string()));
        }
        if !response.status().is_success() {
            return Err(CoreError::StoreUnavailable(format!(
                "GET {url}: {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CoreError::StoreUnavailable(format!("GET {url}: {e}")))?;

        Ok(bytes.to_vec())
    }

    async fn public_url(&self, path: &str) -> Result<String, CoreError> {
        Ok(self.object_url(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_object_url_joins_cleanly() {
        let store = HttpFileStore::new("https://files.example.org/bucket/");

        assert_eq!(
            store.public_url("docs/guide.pdf").await.unwrap(),
            "https://files.example.org/bucket/docs/guide.pdf"
        );
        assert_eq!(
            store.public_url("/docs/guide.pdf").await.unwrap(),
            "https://files.example.org/bucket/docs/guide.pdf"
        );
    }
}
