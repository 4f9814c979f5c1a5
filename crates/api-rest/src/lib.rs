//! # API REST
//!
//! The inbound proxy surface: an axum router over the registry client.
//!
//! Every inbound request maps 1:1 to one outbound registry request; the upstream JSON body
//! is relayed unchanged in shape. Failures never escape as panics: each one is folded into
//! the fixed `{error, details}` envelope with a server-error status. The handlers hold no
//! state between requests.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use nct_id::NctId;
use registry::{RegistryClient, RegistryError};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Short error message for failed search relays.
const SEARCH_FAILED: &str = "Failed to fetch data from ClinicalTrials.gov";

/// Short error message for failed detail relays.
const DETAIL_FAILED: &str = "Failed to fetch study details from ClinicalTrials.gov";

/// Application state shared across REST API handlers.
///
/// Holds the outbound registry client; cloning is cheap and per-request.
#[derive(Clone)]
pub struct AppState {
    pub registry: RegistryClient,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, search_trials, study_detail),
    components(schemas(HealthRes, ErrorEnvelope))
)]
pub struct ApiDoc;

/// Health check response body.
#[derive(Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// The fixed error envelope every proxy failure is folded into.
#[derive(Serialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Short, fixed message naming the failed operation.
    pub error: String,
    /// Upstream payload when a response was received, otherwise the low-level failure
    /// message.
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
}

/// A handler failure, carrying everything needed to render the envelope.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("invalid NCT number")]
    BadId { details: String },

    #[error("{message}")]
    Relay {
        message: &'static str,
        #[source]
        source: RegistryError,
    },
}

impl ProxyError {
    fn relay(message: &'static str, source: RegistryError) -> Self {
        Self::Relay { message, source }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, envelope) = match self {
            ProxyError::BadId { details } => (
                StatusCode::BAD_REQUEST,
                ErrorEnvelope {
                    error: "Invalid NCT number".to_string(),
                    details: serde_json::Value::String(details),
                },
            ),
            ProxyError::Relay { message, source } => {
                let details = match source {
                    RegistryError::Upstream { details, .. } => details,
                    other => serde_json::Value::String(other.to_string()),
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorEnvelope {
                        error: message.to_string(),
                        details,
                    },
                )
            }
        };

        (status, Json(envelope)).into_response()
    }
}

/// Build the proxy router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/clinical-trials", get(search_trials))
        .route("/api/clinical-trials/:nct_id", get(study_detail))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the proxy
///
/// Used for monitoring and load balancer health checks; does not touch the registry.
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "trialscope is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/api/clinical-trials",
    responses(
        (status = 200, description = "Upstream search response, relayed verbatim"),
        (status = 500, description = "Upstream or network failure", body = ErrorEnvelope)
    )
)]
/// Search clinical trials through the registry
///
/// Accepts the dashboard's loose filter parameters (`cond`, `status`/`status[]`, `lat`,
/// `lon`, `radius`, `pageToken`, `pageSize`, `countTotal`), translates them into the
/// registry's query grammar, and relays the upstream JSON body unchanged.
async fn search_trials(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<serde_json::Value>, ProxyError> {
    match state.registry.search(&pairs).await {
        Ok(body) => Ok(Json(body)),
        Err(err) => {
            tracing::error!("clinical-trials search relay failed: {err}");
            Err(ProxyError::relay(SEARCH_FAILED, err))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/clinical-trials/{nct_id}",
    params(
        ("nct_id" = String, Path, description = "Registry trial identifier (NCT number)")
    ),
    responses(
        (status = 200, description = "Upstream study record, relayed verbatim"),
        (status = 400, description = "Malformed NCT number", body = ErrorEnvelope),
        (status = 500, description = "Upstream or network failure", body = ErrorEnvelope)
    )
)]
/// Fetch a single study record by NCT number
///
/// The path parameter is validated before any upstream URL is built from it; a malformed
/// identifier is rejected locally with a 400 rather than forwarded.
async fn study_detail(
    State(state): State<AppState>,
    Path(nct_id): Path<String>,
) -> Result<Json<serde_json::Value>, ProxyError> {
    let nct_id = NctId::parse(&nct_id).map_err(|err| {
        tracing::warn!("rejected study detail request: {err}");
        ProxyError::BadId {
            details: err.to_string(),
        }
    })?;

    match state.registry.study_detail(&nct_id).await {
        Ok(body) => Ok(Json(body)),
        Err(err) => {
            tracing::error!("study detail relay failed: {err}");
            Err(ProxyError::relay(DETAIL_FAILED, err))
        }
    }
}
