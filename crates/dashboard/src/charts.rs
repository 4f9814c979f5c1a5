//! The aggregate dashboard panels.
//!
//! Four chart aggregates plus the headline counters, each fetched independently: one panel
//! failing leaves the others intact, so every slot in [`DashboardData`] carries its own
//! `Result`. Count queries lean on the proxy's defaults; omitting `cond` selects the
//! overall disease term.

use crate::backend::BackendClient;
use crate::ViewResult;
use trials_core::{
    country_histogram, other_bucket, year_histogram, NamedCount, TrialStatus, YearCount,
    CHART_SUBTYPES, DASHBOARD_STATUSES,
};

/// Label of the residual subtype bucket.
pub const OTHER_SUBTYPES: &str = "Other subtypes";

/// Page size for the bulk fetches backing the year and country histograms.
const BULK_PAGE_SIZE: &str = "1000";

/// Headline counters shown above the charts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeadlineCounts {
    pub total: u64,
    pub recruiting: u64,
    pub completed: u64,
}

/// Everything the dashboard renders, one independent `Result` per panel.
#[derive(Debug)]
pub struct DashboardData {
    pub headline: ViewResult<HeadlineCounts>,
    pub status_distribution: ViewResult<Vec<NamedCount>>,
    pub subtype_distribution: ViewResult<Vec<NamedCount>>,
    pub trials_by_year: ViewResult<Vec<YearCount>>,
    pub trials_by_country: ViewResult<Vec<NamedCount>>,
}

/// Fetch every dashboard aggregate. Panels are independent; a failed aggregate is logged
/// and reported in its own slot.
pub async fn load_all(backend: &BackendClient) -> DashboardData {
    let (headline, status_distribution, subtype_distribution, trials_by_year, trials_by_country) = tokio::join!(
        headline_counts(backend),
        status_distribution(backend),
        subtype_distribution(backend),
        trials_by_year(backend),
        trials_by_country(backend),
    );

    for err in [
        headline.as_ref().err(),
        status_distribution.as_ref().err(),
        subtype_distribution.as_ref().err(),
        trials_by_year.as_ref().err(),
        trials_by_country.as_ref().err(),
    ]
    .into_iter()
    .flatten()
    {
        tracing::warn!("dashboard aggregate failed: {err}");
    }

    DashboardData {
        headline,
        status_distribution,
        subtype_distribution,
        trials_by_year,
        trials_by_country,
    }
}

/// Total / recruiting / completed counters.
pub async fn headline_counts(backend: &BackendClient) -> ViewResult<HeadlineCounts> {
    Ok(HeadlineCounts {
        total: count(backend, None, None).await?,
        recruiting: count(backend, None, Some(TrialStatus::Recruiting)).await?,
        completed: count(backend, None, Some(TrialStatus::Completed)).await?,
    })
}

/// One count-only request per charted status.
pub async fn status_distribution(backend: &BackendClient) -> ViewResult<Vec<NamedCount>> {
    let mut distribution = Vec::with_capacity(DASHBOARD_STATUSES.len());
    for status in DASHBOARD_STATUSES {
        let value = count(backend, None, Some(status)).await?;
        distribution.push(NamedCount {
            name: status.label().to_string(),
            value,
        });
    }
    Ok(distribution)
}

/// One count-only request per named subtype plus the overall total; the residual lands in
/// the `"Other subtypes"` bucket, floored at zero.
pub async fn subtype_distribution(backend: &BackendClient) -> ViewResult<Vec<NamedCount>> {
    let mut named = Vec::with_capacity(CHART_SUBTYPES.len());
    for subtype in CHART_SUBTYPES {
        let value = count(backend, Some(subtype.condition), None).await?;
        named.push((subtype.label, value));
    }
    let total = count(backend, None, None).await?;
    Ok(assemble_subtype_chart(&named, total))
}

/// Year histogram over one bulk page of studies.
pub async fn trials_by_year(backend: &BackendClient) -> ViewResult<Vec<YearCount>> {
    let page = backend.search(&bulk_pairs()).await?;
    Ok(year_histogram(&page.studies))
}

/// Country histogram over one bulk page of studies.
pub async fn trials_by_country(backend: &BackendClient) -> ViewResult<Vec<NamedCount>> {
    let page = backend.search(&bulk_pairs()).await?;
    Ok(country_histogram(&page.studies))
}

/// Issue a count-only request and read the total. A missing `totalCount` counts as zero.
async fn count(
    backend: &BackendClient,
    condition: Option<&str>,
    status: Option<TrialStatus>,
) -> ViewResult<u64> {
    let mut pairs = vec![
        ("countTotal".to_string(), "true".to_string()),
        ("pageSize".to_string(), "1".to_string()),
    ];
    if let Some(condition) = condition {
        pairs.push(("cond".to_string(), condition.to_string()));
    }
    if let Some(status) = status {
        pairs.push(("status".to_string(), status.to_wire().to_string()));
    }

    let page = backend.search(&pairs).await?;
    Ok(page.total_count.unwrap_or(0))
}

fn bulk_pairs() -> Vec<(String, String)> {
    vec![("pageSize".to_string(), BULK_PAGE_SIZE.to_string())]
}

/// Build the subtype chart from named counts and the overall total.
fn assemble_subtype_chart(named: &[(&str, u64)], total: u64) -> Vec<NamedCount> {
    let named_sum: u64 = named.iter().map(|(_, value)| value).sum();
    let mut chart: Vec<NamedCount> = named
        .iter()
        .map(|(name, value)| NamedCount {
            name: name.to_string(),
            value: *value,
        })
        .collect();
    chart.push(NamedCount {
        name: OTHER_SUBTYPES.to_string(),
        value: other_bucket(total, named_sum),
    });
    chart
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtype_chart_appends_residual_bucket() {
        let named = [("PTCL-NOS", 30), ("ALCL", 25), ("AITL", 15), ("ENKTL", 10)];
        let chart = assemble_subtype_chart(&named, 100);

        assert_eq!(chart.len(), 5);
        assert_eq!(chart[0].name, "PTCL-NOS");
        assert_eq!(chart[4].name, OTHER_SUBTYPES);
        assert_eq!(chart[4].value, 20);
    }

    #[test]
    fn residual_bucket_floors_at_zero_on_overlap() {
        // Overlapping condition matches can push the named sum past the total.
        let named = [("PTCL-NOS", 60), ("ALCL", 60)];
        let chart = assemble_subtype_chart(&named, 100);
        assert_eq!(chart[2].value, 0);
    }

    #[test]
    fn empty_named_list_yields_total_as_other() {
        let chart = assemble_subtype_chart(&[], 42);
        assert_eq!(chart.len(), 1);
        assert_eq!(chart[0].name, OTHER_SUBTYPES);
        assert_eq!(chart[0].value, 42);
    }
}
