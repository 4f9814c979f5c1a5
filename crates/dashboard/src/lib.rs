//! # Dashboard
//!
//! Headless view controllers for the PTCL trials dashboard.
//!
//! Each view owns its state and its fetch lifecycle; none share mutable state. All
//! coordination happens over the proxy's wire format, reached through [`BackendClient`],
//! the same coupling the browser app has to the backend. Rendering (markup, charts, layout)
//! is a consumer concern; these controllers expose the data each panel displays.
//!
//! State transitions are plain methods, separated from the fetch paths, so every documented
//! behaviour is testable without a network:
//! - [`trial_list::TrialListView`]: filterable, paginated list with resolve-once locations
//! - [`geocode_panel::GeocodePanel`]: explicit ZIP resolution with sanitised radius input
//! - [`charts::load_all`]: four independent aggregates plus headline counts
//! - [`chat_gateway`]: reachability probe for the external chat tool

pub mod backend;
pub mod charts;
pub mod chat_gateway;
pub mod geocode_panel;
pub mod trial_list;

pub use backend::BackendClient;
pub use charts::{load_all, DashboardData, HeadlineCounts};
pub use chat_gateway::ChatGateway;
pub use geocode_panel::GeocodePanel;
pub use trial_list::{ListPhase, SearchFilter, TrialListView};

/// Errors surfaced by view fetch cycles.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The proxy could not be reached.
    #[error("backend request failed: {0}")]
    Fetch(#[source] reqwest::Error),

    /// The proxy answered with a non-2xx status (its own error envelope).
    #[error("backend responded with status {0}")]
    Upstream(u16),

    /// The relayed body did not match the expected wire shape.
    #[error("backend response malformed: {0}")]
    Decode(#[from] trials_core::TrialsError),
}

/// Result type for view fetch cycles.
pub type ViewResult<T> = Result<T, ViewError>;
