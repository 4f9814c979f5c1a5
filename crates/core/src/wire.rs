//! Registry wire models and translation helpers.
//!
//! The registry's response schema is externally owned: it is stable but not under our control,
//! and carries far more fields than the dashboard consumes. The wire structs here therefore
//! model only the consumed slice, leave every field optional, and ignore unknown keys rather
//! than rejecting them.
//!
//! Responsibilities:
//! - Define the wire model for a page of study records
//! - Parse JSON through `serde_path_to_error` so a schema mismatch names the failing field
//! - Translate a wire `Study` into the flat [`TrialSummary`] the list view displays
//!
//! Notes:
//! - The proxy relays registry bodies verbatim as `serde_json::Value`; only the view layer
//!   parses them into these structs.

use crate::{TrialsError, TrialsResult};
use serde::Deserialize;

/// One page of study records as returned by the registry search endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudiesPage {
    /// Study records on this page.
    #[serde(default)]
    pub studies: Vec<Study>,

    /// Opaque cursor for the next page, when one exists.
    #[serde(default)]
    pub next_page_token: Option<String>,

    /// Total matching records; present only on count-enabled requests.
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// A single study record (consumed slice only).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Study {
    #[serde(default)]
    pub protocol_section: Option<ProtocolSection>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolSection {
    #[serde(default)]
    pub identification_module: Option<IdentificationModule>,
    #[serde(default)]
    pub description_module: Option<DescriptionModule>,
    #[serde(default)]
    pub status_module: Option<StatusModule>,
    #[serde(default)]
    pub contacts_locations_module: Option<ContactsLocationsModule>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationModule {
    #[serde(default)]
    pub nct_id: Option<String>,
    #[serde(default)]
    pub brief_title: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionModule {
    #[serde(default)]
    pub brief_summary: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusModule {
    #[serde(default)]
    pub overall_status: Option<String>,
    #[serde(default)]
    pub start_date_struct: Option<PartialDate>,
}

/// Registry dates arrive as `YYYY`, `YYYY-MM`, or `YYYY-MM-DD` strings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialDate {
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsLocationsModule {
    #[serde(default)]
    pub locations: Vec<StudyLocation>,
}

/// A single site location attached to a study.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyLocation {
    #[serde(default)]
    pub facility: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Flat display model for one trial in the list view.
///
/// Missing wire fields are replaced by fixed display fallbacks rather than surfaced as
/// options; the list renders every row the same way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrialSummary {
    pub nct_id: String,
    pub brief_title: String,
    pub brief_summary: String,
    pub overall_status: String,
}

impl StudiesPage {
    /// Parse a page of studies from a relayed JSON body.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g.
    /// `studies.3.protocolSection`) to the failing field when the body does not match the
    /// wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`TrialsError::Translation`] naming the failing path if the body has an
    /// unexpected shape.
    pub fn from_value(body: serde_json::Value) -> TrialsResult<Self> {
        match serde_path_to_error::deserialize::<_, StudiesPage>(body) {
            Ok(page) => Ok(page),
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                Err(TrialsError::Translation(format!(
                    "studies page schema mismatch at {path}: {source}"
                )))
            }
        }
    }

    /// Parse a page of studies from JSON text.
    pub fn parse(body: &str) -> TrialsResult<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }
}

impl Study {
    /// Parse a single study record from a relayed JSON body.
    pub fn from_value(body: serde_json::Value) -> TrialsResult<Self> {
        match serde_path_to_error::deserialize::<_, Study>(body) {
            Ok(study) => Ok(study),
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                Err(TrialsError::Translation(format!(
                    "study schema mismatch at {path}: {source}"
                )))
            }
        }
    }

    /// Flatten this study into the list view's display model.
    pub fn summarise(&self) -> TrialSummary {
        let protocol = self.protocol_section.as_ref();
        let identification = protocol.and_then(|p| p.identification_module.as_ref());
        let description = protocol.and_then(|p| p.description_module.as_ref());
        let status = protocol.and_then(|p| p.status_module.as_ref());

        TrialSummary {
            nct_id: identification
                .and_then(|m| m.nct_id.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            brief_title: identification
                .and_then(|m| m.brief_title.clone())
                .unwrap_or_else(|| "No Title".to_string()),
            brief_summary: description
                .and_then(|m| m.brief_summary.clone())
                .unwrap_or_else(|| "No Summary".to_string()),
            overall_status: status
                .and_then(|m| m.overall_status.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }

    /// The study's start date string, when present.
    pub fn start_date(&self) -> Option<&str> {
        self.protocol_section
            .as_ref()?
            .status_module
            .as_ref()?
            .start_date_struct
            .as_ref()?
            .date
            .as_deref()
    }

    /// The study's site locations; empty when the module is absent.
    pub fn locations(&self) -> &[StudyLocation] {
        self.protocol_section
            .as_ref()
            .and_then(|p| p.contacts_locations_module.as_ref())
            .map(|m| m.locations.as_slice())
            .unwrap_or(&[])
    }
}
