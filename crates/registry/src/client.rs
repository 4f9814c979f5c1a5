//! The outbound registry client.
//!
//! One upstream request per call, body relayed as untouched JSON. Timeouts are whatever the
//! underlying client defaults to; none are configured here.

use crate::{query, RegistryError, RegistryResult};
use nct_id::NctId;

/// Client for the registry's search and detail endpoints.
///
/// Cheap to clone; the inner `reqwest::Client` is a shared handle. Holds no request state,
/// so one instance serves every inbound request.
#[derive(Clone, Debug)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    /// Create a client against a registry base URL (e.g. `https://clinicaltrials.gov/api/v2`).
    ///
    /// A trailing slash on the base URL is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Search for studies, translating the loose inbound pairs into the registry grammar.
    ///
    /// Returns the upstream JSON body unchanged in shape.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Upstream`] for a non-2xx response, carrying the upstream payload
    /// - [`RegistryError::Network`] when no response was received
    /// - [`RegistryError::Body`] when a 2xx body cannot be read as JSON
    pub async fn search(&self, inbound: &[(String, String)]) -> RegistryResult<serde_json::Value> {
        let params = query::translate(inbound);
        let url = format!("{}/studies", self.base_url);

        tracing::debug!(url = %url, params = params.len(), "registry search");

        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(RegistryError::Network)?;

        Self::relay(response).await
    }

    /// Fetch a single study record by its registry identifier. No parameter translation.
    pub async fn study_detail(&self, nct_id: &NctId) -> RegistryResult<serde_json::Value> {
        let url = format!("{}/studies/{}", self.base_url, nct_id);

        tracing::debug!(url = %url, "registry detail");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(RegistryError::Network)?;

        Self::relay(response).await
    }

    /// Fold the upstream response into the relay contract: 2xx bodies pass through as JSON,
    /// everything else becomes [`RegistryError::Upstream`] carrying the payload.
    async fn relay(response: reqwest::Response) -> RegistryResult<serde_json::Value> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(RegistryError::Body);
        }

        let details = match response.text().await {
            Ok(text) => serde_json::from_str(&text)
                .unwrap_or_else(|_| serde_json::Value::String(text)),
            Err(_) => serde_json::Value::Null,
        };

        Err(RegistryError::Upstream {
            status: status.as_u16(),
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let client = RegistryClient::new("https://example.org/api/v2//");
        assert_eq!(client.base_url, "https://example.org/api/v2");
    }

    #[test]
    fn base_url_is_kept_verbatim_otherwise() {
        let client = RegistryClient::new("http://localhost:9000/api/v2");
        assert_eq!(client.base_url, "http://localhost:9000/api/v2");
    }
}
