//! HTTP client for the proxy backend.

use crate::{ViewError, ViewResult};
use trials_core::{StudiesPage, Study};

/// Client for the proxy's `/api/clinical-trials` surface.
///
/// Cheap to clone; every view can hold its own handle without sharing state.
#[derive(Clone, Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client against the proxy base URL (e.g. `http://localhost:5000`).
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

    /// Issue a search with the given loose query pairs and parse the relayed page.
    pub async fn search(&self, pairs: &[(String, String)]) -> ViewResult<StudiesPage> {
        let url = format!("{}/api/clinical-trials", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(pairs)
            .send()
            .await
            .map_err(ViewError::Fetch)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ViewError::Upstream(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await.map_err(ViewError::Fetch)?;
        Ok(StudiesPage::from_value(body)?)
    }

    /// Fetch a single study record through the proxy's detail route.
    pub async fn study_detail(&self, nct_id: &str) -> ViewResult<Study> {
        let url = format!("{}/api/clinical-trials/{}", self.base_url, nct_id);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ViewError::Fetch)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ViewError::Upstream(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await.map_err(ViewError::Fetch)?;
        Ok(Study::from_value(body)?)
    }
}
