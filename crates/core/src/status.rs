//! The registry's overall-status enumeration.

use crate::{TrialsError, TrialsResult};
use std::fmt;

/// Overall recruitment status of a trial, as enumerated by the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrialStatus {
    ActiveNotRecruiting,
    Completed,
    EnrollingByInvitation,
    NotYetRecruiting,
    Recruiting,
    Suspended,
    Terminated,
    Withdrawn,
    Available,
    NoLongerAvailable,
    TemporarilyNotAvailable,
    ApprovedForMarketing,
    Withheld,
    Unknown,
}

/// The five statuses charted by the status-distribution panel, in display order.
pub const DASHBOARD_STATUSES: [TrialStatus; 5] = [
    TrialStatus::Recruiting,
    TrialStatus::ActiveNotRecruiting,
    TrialStatus::Completed,
    TrialStatus::Terminated,
    TrialStatus::NotYetRecruiting,
];

/// Every status value the registry can return, in the order the filter control lists them.
pub const ALL_STATUSES: [TrialStatus; 14] = [
    TrialStatus::ActiveNotRecruiting,
    TrialStatus::Completed,
    TrialStatus::EnrollingByInvitation,
    TrialStatus::NotYetRecruiting,
    TrialStatus::Recruiting,
    TrialStatus::Suspended,
    TrialStatus::Terminated,
    TrialStatus::Withdrawn,
    TrialStatus::Available,
    TrialStatus::NoLongerAvailable,
    TrialStatus::TemporarilyNotAvailable,
    TrialStatus::ApprovedForMarketing,
    TrialStatus::Withheld,
    TrialStatus::Unknown,
];

impl TrialStatus {
    /// Convert to the registry wire format string.
    pub fn to_wire(self) -> &'static str {
        match self {
            TrialStatus::ActiveNotRecruiting => "ACTIVE_NOT_RECRUITING",
            TrialStatus::Completed => "COMPLETED",
            TrialStatus::EnrollingByInvitation => "ENROLLING_BY_INVITATION",
            TrialStatus::NotYetRecruiting => "NOT_YET_RECRUITING",
            TrialStatus::Recruiting => "RECRUITING",
            TrialStatus::Suspended => "SUSPENDED",
            TrialStatus::Terminated => "TERMINATED",
            TrialStatus::Withdrawn => "WITHDRAWN",
            TrialStatus::Available => "AVAILABLE",
            TrialStatus::NoLongerAvailable => "NO_LONGER_AVAILABLE",
            TrialStatus::TemporarilyNotAvailable => "TEMPORARILY_NOT_AVAILABLE",
            TrialStatus::ApprovedForMarketing => "APPROVED_FOR_MARKETING",
            TrialStatus::Withheld => "WITHHELD",
            TrialStatus::Unknown => "UNKNOWN",
        }
    }

    /// Parse from the registry wire format string.
    pub fn from_wire(s: &str) -> TrialsResult<Self> {
        match s {
            "ACTIVE_NOT_RECRUITING" => Ok(TrialStatus::ActiveNotRecruiting),
            "COMPLETED" => Ok(TrialStatus::Completed),
            "ENROLLING_BY_INVITATION" => Ok(TrialStatus::EnrollingByInvitation),
            "NOT_YET_RECRUITING" => Ok(TrialStatus::NotYetRecruiting),
            "RECRUITING" => Ok(TrialStatus::Recruiting),
            "SUSPENDED" => Ok(TrialStatus::Suspended),
            "TERMINATED" => Ok(TrialStatus::Terminated),
            "WITHDRAWN" => Ok(TrialStatus::Withdrawn),
            "AVAILABLE" => Ok(TrialStatus::Available),
            "NO_LONGER_AVAILABLE" => Ok(TrialStatus::NoLongerAvailable),
            "TEMPORARILY_NOT_AVAILABLE" => Ok(TrialStatus::TemporarilyNotAvailable),
            "APPROVED_FOR_MARKETING" => Ok(TrialStatus::ApprovedForMarketing),
            "WITHHELD" => Ok(TrialStatus::Withheld),
            "UNKNOWN" => Ok(TrialStatus::Unknown),
            other => Err(TrialsError::InvalidInput(format!(
                "unrecognised overall status: '{other}'"
            ))),
        }
    }

    /// Human-readable label for chart legends and filter controls.
    pub fn label(self) -> &'static str {
        match self {
            TrialStatus::ActiveNotRecruiting => "Active, not recruiting",
            TrialStatus::Completed => "Completed",
            TrialStatus::EnrollingByInvitation => "Enrolling by invitation",
            TrialStatus::NotYetRecruiting => "Not yet recruiting",
            TrialStatus::Recruiting => "Recruiting",
            TrialStatus::Suspended => "Suspended",
            TrialStatus::Terminated => "Terminated",
            TrialStatus::Withdrawn => "Withdrawn",
            TrialStatus::Available => "Available",
            TrialStatus::NoLongerAvailable => "No longer available",
            TrialStatus::TemporarilyNotAvailable => "Temporarily not available",
            TrialStatus::ApprovedForMarketing => "Approved for marketing",
            TrialStatus::Withheld => "Withheld",
            TrialStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TrialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip_for_every_status() {
        for status in ALL_STATUSES {
            let wire = status.to_wire();
            let parsed = TrialStatus::from_wire(wire).expect("wire value should parse back");
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn from_wire_rejects_unknown_values() {
        let err = TrialStatus::from_wire("recruiting").expect_err("lowercase is not wire form");
        match err {
            TrialsError::InvalidInput(msg) => assert!(msg.contains("recruiting")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn dashboard_statuses_are_a_subset() {
        for status in DASHBOARD_STATUSES {
            assert!(ALL_STATUSES.contains(&status));
        }
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(
            TrialStatus::ActiveNotRecruiting.to_string(),
            "ACTIVE_NOT_RECRUITING"
        );
    }
}
