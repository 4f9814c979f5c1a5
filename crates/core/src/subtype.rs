//! The PTCL subtype catalogue.
//!
//! Two views consume subtypes in different shapes: the list view offers the full
//! classification as a free-text condition filter, while the subtype chart queries a short
//! list of named subtypes and buckets everything else.

/// Sentinel meaning "no subtype narrowing" in the condition filter.
pub const ALL_SUBTYPES: &str = "All";

/// The condition filter options offered by the trial list view, headed by the sentinel.
pub const SUBTYPE_FILTERS: [&str; 21] = [
    ALL_SUBTYPES,
    "Peripheral T-cell lymphoma, not otherwise specified (PTCL-NOS)",
    "Angioimmunoblastic T-cell lymphoma (AITL)",
    "Follicular T-cell lymphoma (FTCL)",
    "Nodal PTCL with T follicular helper (TFH) phenotype",
    "Anaplastic large cell lymphoma (ALCL), ALK-positive",
    "Anaplastic large cell lymphoma (ALCL), ALK-negative",
    "Primary cutaneous ALCL",
    "Breast implant-associated ALCL",
    "T-cell prolymphocytic leukemia (T-PLL)",
    "Adult T-cell leukemia/lymphoma (ATL)",
    "Sézary syndrome",
    "Extranodal NK/T-cell lymphoma, nasal type (ENKTL)",
    "Enteropathy-associated T-cell lymphoma (EATL)",
    "Monomorphic epitheliotropic intestinal T-cell lymphoma (MEITL)",
    "Hepatosplenic T-cell lymphoma (HSTCL)",
    "Subcutaneous panniculitis-like T-cell lymphoma (SPTCL)",
    "Indolent T-cell lymphoproliferative disorder of the gastrointestinal tract",
    "Primary cutaneous acral CD8+ T-cell lymphoma",
    "Primary central nervous system T-cell lymphoma",
    "Primary testicular T-cell lymphoma",
];

/// A named subtype charted individually by the subtype panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartSubtype {
    /// Short label for the chart axis.
    pub label: &'static str,
    /// Condition term sent to the registry.
    pub condition: &'static str,
}

/// The named subtypes the chart queries; every other subtype lands in the residual bucket.
pub const CHART_SUBTYPES: [ChartSubtype; 4] = [
    ChartSubtype {
        label: "PTCL-NOS",
        condition: "Peripheral T-cell lymphoma, not otherwise specified",
    },
    ChartSubtype {
        label: "ALCL",
        condition: "Anaplastic large cell lymphoma",
    },
    ChartSubtype {
        label: "AITL",
        condition: "Angioimmunoblastic T-cell lymphoma",
    },
    ChartSubtype {
        label: "ENKTL",
        condition: "Extranodal NK/T-cell lymphoma, nasal type",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_list_starts_with_the_sentinel() {
        assert_eq!(SUBTYPE_FILTERS[0], ALL_SUBTYPES);
    }

    #[test]
    fn filter_entries_are_distinct() {
        for (i, a) in SUBTYPE_FILTERS.iter().enumerate() {
            for b in &SUBTYPE_FILTERS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn chart_subtypes_have_labels_and_conditions() {
        for subtype in CHART_SUBTYPES {
            assert!(!subtype.label.is_empty());
            assert!(!subtype.condition.is_empty());
        }
    }
}
