//! Internal implementation of the canonical NCT number wrapper.

use crate::{NctIdError, NctIdResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

const NCT_PREFIX: &str = "NCT";
const NCT_DIGITS: usize = 8;

/// The registry's canonical trial identifier (`NCT` followed by eight digits).
///
/// This wrapper type guarantees that once constructed, the contained identifier is in canonical
/// form. It provides type safety for identifier operations and ensures the value is safe to embed
/// in an upstream request path.
///
/// # When to use this type
/// Use this wrapper whenever you are:
/// - Accepting a trial identifier from *outside* the core (API path parameter, view input), or
/// - Building the upstream detail URL for a trial record.
///
/// # Construction
/// [`NctId::parse`] validates an externally supplied identifier. A lowercase `nct` prefix is
/// accepted and normalised; any other deviation from canonical form is rejected.
///
/// # Display format
/// When displayed or converted to string, `NctId` always produces the canonical uppercase form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NctId(String);

impl NctId {
    /// Validates and parses an NCT number, normalising a lowercase prefix.
    ///
    /// This does **not** attempt to repair other malformed inputs (wrong length, non-digit
    /// suffix, embedded whitespace). Callers must provide the canonical representation.
    ///
    /// # Arguments
    ///
    /// * `input` - Identifier string to validate and wrap.
    ///
    /// # Errors
    ///
    /// Returns [`NctIdError::InvalidInput`] if `input` is not in canonical form.
    pub fn parse(input: &str) -> NctIdResult<Self> {
        let candidate = if input.starts_with("nct") {
            let mut upper = String::with_capacity(input.len());
            upper.push_str(NCT_PREFIX);
            upper.push_str(&input[3..]);
            upper
        } else {
            input.to_string()
        };

        if Self::is_canonical(&candidate) {
            return Ok(Self(candidate));
        }
        Err(NctIdError::InvalidInput(format!(
            "NCT number must be 'NCT' followed by {} digits, got: '{}'",
            NCT_DIGITS, input
        )))
    }

    /// Returns true if `input` is in canonical NCT form.
    ///
    /// This is a purely syntactic check that validates:
    /// - The uppercase `NCT` prefix
    /// - Exactly eight trailing characters, all ASCII digits
    pub fn is_canonical(input: &str) -> bool {
        input.len() == NCT_PREFIX.len() + NCT_DIGITS
            && input.starts_with(NCT_PREFIX)
            && input[NCT_PREFIX.len()..]
                .bytes()
                .all(|b| b.is_ascii_digit())
    }

    /// Returns the canonical identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NctId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NctId {
    type Err = NctIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NctId::parse(s)
    }
}

impl TryFrom<String> for NctId {
    type Error = NctIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NctId::parse(&value)
    }
}

impl From<NctId> for String {
    fn from(id: NctId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_canonical_id() {
        let id = NctId::parse("NCT04984837").expect("canonical id should parse");
        assert_eq!(id.as_str(), "NCT04984837");
    }

    #[test]
    fn parse_normalises_lowercase_prefix() {
        let id = NctId::parse("nct04984837").expect("lowercase prefix should parse");
        assert_eq!(id.to_string(), "NCT04984837");
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        let result = NctId::parse("04984837");
        match result {
            Err(NctIdError::InvalidInput(msg)) => {
                assert!(msg.contains("NCT"));
            }
            Ok(id) => panic!("expected rejection, parsed '{id}'"),
        }
    }

    #[test]
    fn parse_rejects_short_suffix() {
        assert!(NctId::parse("NCT0498483").is_err());
    }

    #[test]
    fn parse_rejects_long_suffix() {
        assert!(NctId::parse("NCT049848370").is_err());
    }

    #[test]
    fn parse_rejects_non_digit_suffix() {
        assert!(NctId::parse("NCT0498483a").is_err());
        assert!(NctId::parse("NCT0498-837").is_err());
    }

    #[test]
    fn parse_rejects_mixed_case_prefix() {
        assert!(NctId::parse("Nct04984837").is_err());
        assert!(NctId::parse("nCT04984837").is_err());
    }

    #[test]
    fn parse_rejects_empty_string() {
        assert!(NctId::parse("").is_err());
    }

    #[test]
    fn is_canonical_valid() {
        assert!(NctId::is_canonical("NCT00000000"));
        assert!(NctId::is_canonical("NCT99999999"));
    }

    #[test]
    fn is_canonical_invalid() {
        // Lowercase prefix is parseable but not canonical
        assert!(!NctId::is_canonical("nct04984837"));
        assert!(!NctId::is_canonical("NCT0498483"));
        assert!(!NctId::is_canonical("NCT049848370"));
        assert!(!NctId::is_canonical(""));
    }

    #[test]
    fn from_str_round_trip() {
        let id: NctId = "NCT01234567".parse().expect("parse via FromStr");
        let reparsed = NctId::parse(&id.to_string()).expect("reparse display output");
        assert_eq!(id, reparsed);
    }

    #[test]
    fn serde_round_trip() {
        let id = NctId::parse("NCT04984837").expect("parse");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"NCT04984837\"");
        let back: NctId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, back);
    }

    #[test]
    fn serde_rejects_malformed() {
        let result: Result<NctId, _> = serde_json::from_str("\"not-an-id\"");
        assert!(result.is_err());
    }
}
