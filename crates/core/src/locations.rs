//! Location formatting and the per-trial resolve-once cache.

use crate::wire::StudyLocation;
use std::collections::HashMap;

/// Sentinel recorded when a trial's location lookup failed; a recorded failure is displayed,
/// never retried.
pub const LOCATION_FETCH_FAILED: &str = "Failed to fetch locations";

/// Format one site location as `"facility, city, state, country"`, skipping absent parts.
pub fn format_location(location: &StudyLocation) -> String {
    let parts: Vec<&str> = [
        location.facility.as_deref(),
        location.city.as_deref(),
        location.state.as_deref(),
        location.country.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect();

    parts.join(", ")
}

/// Append-only map from NCT id to resolved location strings.
///
/// The list view resolves locations lazily, one detail request per trial, the first time a
/// trial is displayed. The "has attempted" guard lives here rather than in the fetch path:
/// an id is recorded exactly once, whether the lookup succeeded or failed, and
/// [`LocationCache::needs_fetch`] is the only gate the view consults.
#[derive(Debug, Default)]
pub struct LocationCache {
    resolved: HashMap<String, Vec<String>>,
}

impl LocationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no resolution has been attempted for this id yet.
    pub fn needs_fetch(&self, nct_id: &str) -> bool {
        !self.resolved.contains_key(nct_id)
    }

    /// Record a successful resolution. A later call for the same id is ignored; the first
    /// recorded value wins.
    pub fn record_resolved(&mut self, nct_id: &str, locations: Vec<String>) {
        self.resolved
            .entry(nct_id.to_string())
            .or_insert(locations);
    }

    /// Record a failed resolution with the failure sentinel.
    pub fn record_failed(&mut self, nct_id: &str) {
        self.resolved
            .entry(nct_id.to_string())
            .or_insert_with(|| vec![LOCATION_FETCH_FAILED.to_string()]);
    }

    /// The recorded locations for an id, if any attempt has been made.
    pub fn get(&self, nct_id: &str) -> Option<&[String]> {
        self.resolved.get(nct_id).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(
        facility: Option<&str>,
        city: Option<&str>,
        state: Option<&str>,
        country: Option<&str>,
    ) -> StudyLocation {
        StudyLocation {
            facility: facility.map(String::from),
            city: city.map(String::from),
            state: state.map(String::from),
            country: country.map(String::from),
        }
    }

    #[test]
    fn formats_all_parts() {
        let loc = location(
            Some("City Hospital"),
            Some("Boston"),
            Some("Massachusetts"),
            Some("United States"),
        );
        assert_eq!(
            format_location(&loc),
            "City Hospital, Boston, Massachusetts, United States"
        );
    }

    #[test]
    fn skips_absent_and_empty_parts() {
        let loc = location(None, Some("Lyon"), Some(""), Some("France"));
        assert_eq!(format_location(&loc), "Lyon, France");
    }

    #[test]
    fn empty_location_formats_to_empty_string() {
        assert_eq!(format_location(&StudyLocation::default()), "");
    }

    #[test]
    fn needs_fetch_until_recorded() {
        let mut cache = LocationCache::new();
        assert!(cache.needs_fetch("NCT00000001"));

        cache.record_resolved("NCT00000001", vec!["Somewhere".to_string()]);
        assert!(!cache.needs_fetch("NCT00000001"));
        assert_eq!(cache.get("NCT00000001"), Some(&["Somewhere".to_string()][..]));
    }

    #[test]
    fn failure_is_recorded_and_not_retried() {
        let mut cache = LocationCache::new();
        cache.record_failed("NCT00000002");

        assert!(!cache.needs_fetch("NCT00000002"));
        assert_eq!(
            cache.get("NCT00000002"),
            Some(&[LOCATION_FETCH_FAILED.to_string()][..])
        );
    }

    #[test]
    fn first_recorded_value_wins() {
        let mut cache = LocationCache::new();
        cache.record_resolved("NCT00000003", vec!["First".to_string()]);
        cache.record_resolved("NCT00000003", vec!["Second".to_string()]);
        cache.record_failed("NCT00000003");

        assert_eq!(cache.get("NCT00000003"), Some(&["First".to_string()][..]));
        assert_eq!(cache.len(), 1);
    }
}
