//! The filterable, paginated trial list view.
//!
//! Lifecycle: `Idle → Loading → {Ready | Error}`, and `Ready → LoadingMore → Ready` when a
//! further page is appended. Filter mutators only mutate; the caller then invokes
//! [`TrialListView::refresh`], one explicit, named reconciliation step per filter change,
//! rather than refetching implicitly whenever some dependency looks different. A refresh
//! replaces the list; a load-more appends to it. In-flight responses are not cancelled on a
//! filter change: the last response to arrive wins.

use crate::backend::BackendClient;
use crate::ViewResult;
use geocode::Coordinate;
use trials_core::subtype::ALL_SUBTYPES;
use trials_core::{format_location, LocationCache, StudiesPage, TrialStatus, TrialSummary};

/// Fixed message shown when a list fetch fails.
pub const FETCH_FAILED: &str = "Failed to fetch clinical trials data";

/// Where the list view is in its fetch lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Ready,
    LoadingMore,
    Error,
}

/// The user's current filter selection. Transient: reconstructed on every change, never
/// persisted.
#[derive(Clone, Debug)]
pub struct SearchFilter {
    /// Selected subtype; the `All` sentinel means no narrowing.
    pub subtype: String,
    /// Selected status values, in selection order.
    pub statuses: Vec<TrialStatus>,
    /// Resolved centre of the geo filter, when one has been applied.
    pub geo: Option<Coordinate>,
    /// Radius in miles, as entered (digits only).
    pub radius: Option<String>,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            subtype: ALL_SUBTYPES.to_string(),
            statuses: Vec::new(),
            geo: None,
            radius: None,
        }
    }
}

impl SearchFilter {
    /// Serialise the filter as the proxy's loose query pairs.
    ///
    /// `cond` is sent only when the subtype narrows; each selected status becomes its own
    /// repeated `status` pair; the geo triple is sent only when both a resolved coordinate
    /// and a radius are present.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = Vec::new();

        if self.subtype != ALL_SUBTYPES {
            pairs.push(("cond".to_string(), self.subtype.clone()));
        }

        for status in &self.statuses {
            pairs.push(("status".to_string(), status.to_wire().to_string()));
        }

        if let (Some(geo), Some(radius)) = (&self.geo, self.radius.as_deref()) {
            if !radius.is_empty() {
                pairs.push(("lat".to_string(), geo.lat.to_string()));
                pairs.push(("lon".to_string(), geo.lon.to_string()));
                pairs.push(("radius".to_string(), radius.to_string()));
            }
        }

        pairs
    }
}

/// State owner for the trial list panel.
pub struct TrialListView {
    backend: BackendClient,
    filter: SearchFilter,
    phase: ListPhase,
    trials: Vec<TrialSummary>,
    next_page_token: Option<String>,
    locations: LocationCache,
    error: Option<String>,
}

impl TrialListView {
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            filter: SearchFilter::default(),
            phase: ListPhase::Idle,
            trials: Vec::new(),
            next_page_token: None,
            locations: LocationCache::new(),
            error: None,
        }
    }

    // Filter mutators. None of these fetch; call `refresh` afterwards.

    pub fn set_subtype(&mut self, subtype: impl Into<String>) {
        self.filter.subtype = subtype.into();
    }

    pub fn set_statuses(&mut self, statuses: Vec<TrialStatus>) {
        self.filter.statuses = statuses;
    }

    pub fn set_geo(&mut self, geo: Coordinate, radius: impl Into<String>) {
        self.filter.geo = Some(geo);
        self.filter.radius = Some(radius.into());
    }

    pub fn clear_geo(&mut self) {
        self.filter.geo = None;
        self.filter.radius = None;
    }

    /// Reconcile the list with the current filter: one fresh first-page fetch, replacing
    /// whatever is displayed.
    pub async fn refresh(&mut self) {
        self.begin_refresh();
        let pairs = self.filter.to_query_pairs();
        let result = self.backend.search(&pairs).await;
        self.finish_fetch(result, false);
    }

    /// Fetch the next page through the held token and append its results.
    ///
    /// A no-op unless the view is `Ready` with a page token in hand.
    pub async fn load_more(&mut self) {
        if self.phase != ListPhase::Ready {
            return;
        }
        let Some(token) = self.next_page_token.clone() else {
            return;
        };

        self.phase = ListPhase::LoadingMore;
        let mut pairs = self.filter.to_query_pairs();
        pairs.push(("pageToken".to_string(), token));
        let result = self.backend.search(&pairs).await;
        self.finish_fetch(result, true);
    }

    /// Resolve site locations for every listed trial that has not been attempted yet.
    ///
    /// One detail request per distinct NCT id per view lifetime; a failed lookup is recorded
    /// with the failure sentinel and never retried.
    pub async fn resolve_locations(&mut self) {
        for nct_id in self.pending_location_ids() {
            match self.backend.study_detail(&nct_id).await {
                Ok(study) => {
                    let formatted = study.locations().iter().map(format_location).collect();
                    self.locations.record_resolved(&nct_id, formatted);
                }
                Err(err) => {
                    tracing::warn!("location lookup failed for {nct_id}: {err}");
                    self.locations.record_failed(&nct_id);
                }
            }
        }
    }

    /// Distinct listed ids with no resolution attempt recorded, in list order.
    fn pending_location_ids(&self) -> Vec<String> {
        let mut pending: Vec<String> = Vec::new();
        for trial in &self.trials {
            if self.locations.needs_fetch(&trial.nct_id) && !pending.contains(&trial.nct_id) {
                pending.push(trial.nct_id.clone());
            }
        }
        pending
    }

    // State transitions, kept apart from the fetch paths.

    fn begin_refresh(&mut self) {
        self.phase = ListPhase::Loading;
        self.error = None;
    }

    fn finish_fetch(&mut self, result: ViewResult<StudiesPage>, append: bool) {
        match result {
            Ok(page) => self.apply_page(page, append),
            Err(err) => {
                tracing::warn!("trial list fetch failed: {err}");
                self.apply_failure();
            }
        }
    }

    fn apply_page(&mut self, page: StudiesPage, append: bool) {
        let summaries = page.studies.iter().map(|study| study.summarise());
        if append {
            self.trials.extend(summaries);
        } else {
            self.trials = summaries.collect();
        }
        self.next_page_token = page.next_page_token;
        self.phase = ListPhase::Ready;
        self.error = None;
    }

    fn apply_failure(&mut self) {
        self.phase = ListPhase::Error;
        self.error = Some(FETCH_FAILED.to_string());
    }

    // Accessors for the rendering layer.

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn trials(&self) -> &[TrialSummary] {
        &self.trials
    }

    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filter(&self) -> &SearchFilter {
        &self.filter
    }

    pub fn locations(&self) -> &LocationCache {
        &self.locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> TrialListView {
        TrialListView::new(BackendClient::new("http://localhost:5000"))
    }

    fn page(ids: &[&str], next: Option<&str>) -> StudiesPage {
        let studies: Vec<serde_json::Value> = ids
            .iter()
            .map(|id| {
                serde_json::json!({
                    "protocolSection": { "identificationModule": { "nctId": id } }
                })
            })
            .collect();
        let body = serde_json::json!({
            "studies": studies,
            "nextPageToken": next,
        });
        StudiesPage::from_value(body).expect("build page")
    }

    #[test]
    fn default_filter_sends_no_pairs() {
        assert!(SearchFilter::default().to_query_pairs().is_empty());
    }

    #[test]
    fn narrowed_subtype_becomes_cond() {
        let filter = SearchFilter {
            subtype: "Primary cutaneous ALCL".to_string(),
            ..SearchFilter::default()
        };
        assert_eq!(
            filter.to_query_pairs(),
            vec![("cond".to_string(), "Primary cutaneous ALCL".to_string())]
        );
    }

    #[test]
    fn statuses_serialise_as_repeated_pairs() {
        let filter = SearchFilter {
            statuses: vec![TrialStatus::Recruiting, TrialStatus::Completed],
            ..SearchFilter::default()
        };
        assert_eq!(
            filter.to_query_pairs(),
            vec![
                ("status".to_string(), "RECRUITING".to_string()),
                ("status".to_string(), "COMPLETED".to_string()),
            ]
        );
    }

    #[test]
    fn geo_pairs_require_coordinate_and_radius() {
        let mut filter = SearchFilter {
            geo: Some(Coordinate {
                lat: 42.0,
                lon: -71.0,
            }),
            radius: None,
            ..SearchFilter::default()
        };
        assert!(filter.to_query_pairs().is_empty());

        filter.radius = Some(String::new());
        assert!(filter.to_query_pairs().is_empty());

        filter.radius = Some("50".to_string());
        assert_eq!(
            filter.to_query_pairs(),
            vec![
                ("lat".to_string(), "42".to_string()),
                ("lon".to_string(), "-71".to_string()),
                ("radius".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn refresh_replaces_and_load_more_appends() {
        let mut view = view();

        view.begin_refresh();
        assert_eq!(view.phase(), ListPhase::Loading);

        view.apply_page(page(&["NCT00000001", "NCT00000002"], Some("T1")), false);
        assert_eq!(view.phase(), ListPhase::Ready);
        assert_eq!(view.trials().len(), 2);
        assert_eq!(view.next_page_token(), Some("T1"));

        // Follow-up page arrives with the token: results append.
        view.apply_page(page(&["NCT00000003"], None), true);
        assert_eq!(view.trials().len(), 3);
        assert_eq!(view.next_page_token(), None);

        // A tokenless refresh replaces the accumulated list.
        view.apply_page(page(&["NCT00000009"], None), false);
        assert_eq!(view.trials().len(), 1);
        assert_eq!(view.trials()[0].nct_id, "NCT00000009");
    }

    #[test]
    fn failure_sets_the_fixed_message_and_error_phase() {
        let mut view = view();
        view.begin_refresh();
        view.apply_failure();

        assert_eq!(view.phase(), ListPhase::Error);
        assert_eq!(view.error(), Some(FETCH_FAILED));

        // A later successful refresh clears the error.
        view.apply_page(page(&["NCT00000001"], None), false);
        assert_eq!(view.phase(), ListPhase::Ready);
        assert_eq!(view.error(), None);
    }

    #[test]
    fn pending_location_ids_dedupes_and_respects_the_cache() {
        let mut view = view();
        view.apply_page(page(&["NCT00000001", "NCT00000002", "NCT00000001"], None), false);

        assert_eq!(
            view.pending_location_ids(),
            vec!["NCT00000001".to_string(), "NCT00000002".to_string()]
        );

        view.locations.record_resolved("NCT00000001", vec!["Site A".to_string()]);
        assert_eq!(view.pending_location_ids(), vec!["NCT00000002".to_string()]);

        view.locations.record_failed("NCT00000002");
        assert!(view.pending_location_ids().is_empty());

        // The same id arriving on a later page is still not re-fetched.
        view.apply_page(page(&["NCT00000001", "NCT00000003"], None), true);
        assert_eq!(view.pending_location_ids(), vec!["NCT00000003".to_string()]);
    }

    #[test]
    fn mutators_do_not_fetch_or_change_phase() {
        let mut view = view();
        view.set_subtype("Sézary syndrome");
        view.set_statuses(vec![TrialStatus::Recruiting]);
        view.set_geo(
            Coordinate {
                lat: 1.0,
                lon: 2.0,
            },
            "25",
        );
        assert_eq!(view.phase(), ListPhase::Idle);

        view.clear_geo();
        assert!(view.filter().geo.is_none());
        assert!(view.filter().radius.is_none());
    }
}
