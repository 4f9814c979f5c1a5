//! # Registry
//!
//! Query translation and the outbound client for the public clinical-trials registry.
//!
//! The registry's query grammar, field paths, status values, and pagination tokens are an
//! externally-owned contract. This crate owns the one non-trivial piece of the proxy: mapping
//! a loosely-typed inbound query onto that grammar, deterministically.
//!
//! - [`query::translate`] is a pure function from inbound pairs to outbound pairs; every
//!   mapping rule is tested without a network in sight.
//! - [`RegistryClient`] issues the single upstream request per inbound request and relays the
//!   JSON body unchanged in shape. No retries, no caching, no state between calls.

pub mod client;
pub mod query;

pub use client::RegistryClient;
pub use query::translate;

/// Errors returned by registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The registry answered with a non-2xx status.
    #[error("registry responded with status {status}")]
    Upstream {
        status: u16,
        /// Upstream response body: parsed JSON when possible, otherwise the raw text.
        details: serde_json::Value,
    },

    /// No response was received at all.
    #[error("registry request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// A 2xx response arrived but its body could not be read or parsed as JSON.
    #[error("registry response body unreadable: {0}")]
    Body(#[source] reqwest::Error),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
