//! NCT number utilities.
//!
//! The clinical-trials registry identifies every trial record by an NCT number.
//!
//! To keep upstream URL construction deterministic and safe, Trialscope uses a *canonical*
//! representation for these identifiers: the literal prefix **`NCT` followed by exactly eight
//! ASCII digits**.
//!
//! This crate provides a small wrapper type ([`NctId`]) that *guarantees* the canonical format
//! once constructed.
//!
//! ## Canonical form
//! - Length: 11
//! - Prefix: `NCT` (uppercase)
//! - Suffix: eight characters, `0-9` only
//! - Example: `NCT04984837`
//!
//! Notes:
//! - Canonical form is *required* for externally supplied identifiers (API path parameters,
//!   view-layer lookups). Use [`NctId::parse`] to validate an input string.
//! - A lowercase `nct` prefix is normalised to uppercase; everything else about the input must
//!   already be canonical.
//! - The canonical value is embedded verbatim into the upstream request path, so the character
//!   set is deliberately conservative.

mod id;

pub use id::NctId;

/// Error type for NCT number operations.
#[derive(Debug, thiserror::Error)]
pub enum NctIdError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for NCT number operations.
pub type NctIdResult<T> = Result<T, NctIdError>;
