use super::ObjectStore;
use crate::{DossierError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

/// Google Cloud Storage backend using the JSON API media download.
///
/// Requests are unauthenticated; point `endpoint` at an emulator or use public
/// buckets. The `reqwest` client is shared across concurrent fetches.
#[derive(Debug, Clone)]
pub struct GcsObjectStore {
    client: Client,
    endpoint: Url,
}

impl GcsObjectStore {
    pub fn new(endpoint: &str, user_agent: Option<&str>) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| DossierError::validation_with_source(format!("invalid GCS endpoint '{}'", endpoint), e))?;

        if endpoint.cannot_be_a_base() {
            return Err(DossierError::validation(format!(
                "GCS endpoint '{}' cannot be used as a base URL",
                endpoint
            )));
        }

        let user_agent = user_agent.unwrap_or(concat!("dossier/", env!("CARGO_PKG_VERSION")));
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| DossierError::validation_with_source("failed to build HTTP client", e))?;

        Ok(Self { client, endpoint })
    }

    /// Media download URL for an object. Each name is sent as a single
    /// percent-encoded path segment, so `/` inside the object path becomes `%2F`.
    pub fn object_url(&self, bucket: &str, path: &str) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["storage", "v1", "b", bucket, "o", path]);
        }
        url.query_pairs_mut().append_pair("alt", "media");
        url
    }
}

#[async_trait]
impl ObjectStore for GcsObjectStore {
    fn name(&self) -> &str {
        "gcs"
    }

    async fn fetch(&self, bucket: &str, path: &str) -> Result<Vec<u8>> {
        let url = self.object_url(bucket, path);
        tracing::debug!(%url, "fetching object");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DossierError::transport_with_source(format!("request for {}/{} failed", bucket, path), e))?;

        match response.status() {
            status if status.is_success() => {
                let body = response.bytes().await.map_err(|e| {
                    DossierError::transport_with_source(format!("reading body of {}/{} failed", bucket, path), e)
                })?;
                Ok(body.to_vec())
            }
            StatusCode::NOT_FOUND => Err(DossierError::not_found(bucket, path)),
            status => Err(DossierError::transport(format!(
                "storage returned {} for {}/{}",
                status, bucket, path
            ))),
        }
    }
}
