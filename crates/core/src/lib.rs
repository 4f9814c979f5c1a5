//! # Trials Core
//!
//! Domain types and pure data operations for the Trialscope dashboard.
//!
//! This crate contains everything that can be computed without touching the network:
//! - Wire models for the slice of the registry response the views consume, with translation
//!   to flat display summaries
//! - The overall-status enumeration and its wire mapping
//! - The PTCL subtype catalogue used by the condition filter and the subtype chart
//! - Chart reductions (year histogram, country histogram, residual buckets)
//! - Location formatting and the per-trial resolve-once cache
//!
//! **No transport concerns**: HTTP clients, routers, or view fetch cycles belong in
//! `registry`, `geocode`, `api-rest`, or `dashboard`.

pub mod aggregate;
pub mod locations;
pub mod status;
pub mod subtype;
pub mod wire;

pub use aggregate::{country_histogram, other_bucket, year_histogram, NamedCount, YearCount};
pub use locations::{format_location, LocationCache, LOCATION_FETCH_FAILED};
pub use status::{TrialStatus, ALL_STATUSES, DASHBOARD_STATUSES};
pub use subtype::{ChartSubtype, CHART_SUBTYPES, SUBTYPE_FILTERS};
pub use wire::{StudiesPage, Study, StudyLocation, TrialSummary};

/// Errors returned by the `trials-core` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum TrialsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`TrialsError`].
pub type TrialsResult<T> = Result<T, TrialsError>;
