//! Chart reductions over fetched study pages.
//!
//! These are pure functions: the dashboard view fetches pages and hands the studies here.
//! Bad records (missing dates, empty countries) are skipped, not errors; the registry data
//! is uneven and a chart over most of it beats no chart at all.

use crate::wire::Study;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// A labelled chart bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedCount {
    pub name: String,
    pub value: u64,
}

/// One year's worth of trial starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub value: u64,
}

/// Number of countries kept as named entries before bucketing into "Other".
const TOP_COUNTRIES: usize = 4;

/// Label for the residual country bucket.
const OTHER_COUNTRIES: &str = "Other";

/// Residual bucket for the subtype chart: whatever the named subtypes do not account for,
/// floored at zero. Overlapping condition matches can push the named sum past the total.
pub fn other_bucket(total: u64, named_sum: u64) -> u64 {
    total.saturating_sub(named_sum)
}

/// Count trial starts per year, ascending by year.
///
/// The year is the leading `YYYY` of the registry's partial date string; studies without a
/// parseable start date are skipped.
pub fn year_histogram(studies: &[Study]) -> Vec<YearCount> {
    let mut counts: HashMap<i32, u64> = HashMap::new();
    for study in studies {
        if let Some(year) = study.start_date().and_then(parse_year) {
            *counts.entry(year).or_insert(0) += 1;
        }
    }

    let mut years: Vec<YearCount> = counts
        .into_iter()
        .map(|(year, value)| YearCount { year, value })
        .collect();
    years.sort_by_key(|entry| entry.year);
    years
}

/// Count studies per country, keeping the top four as named entries.
///
/// A study contributes at most once per distinct country across its site locations. The
/// remainder is summed into an `"Other"` entry only when it is greater than zero. Countries
/// with equal counts are ordered by name so the result is deterministic.
pub fn country_histogram(studies: &[Study]) -> Vec<NamedCount> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for study in studies {
        let mut seen: Vec<&str> = Vec::new();
        for location in study.locations() {
            let Some(country) = location.country.as_deref().filter(|c| !c.is_empty()) else {
                continue;
            };
            if !seen.contains(&country) {
                seen.push(country);
                *counts.entry(country.to_string()).or_insert(0) += 1;
            }
        }
    }

    let mut sorted: Vec<(String, u64)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut histogram: Vec<NamedCount> = sorted
        .iter()
        .take(TOP_COUNTRIES)
        .map(|(name, value)| NamedCount {
            name: name.clone(),
            value: *value,
        })
        .collect();

    let remainder: u64 = sorted.iter().skip(TOP_COUNTRIES).map(|(_, v)| v).sum();
    if remainder > 0 {
        histogram.push(NamedCount {
            name: OTHER_COUNTRIES.to_string(),
            value: remainder,
        });
    }
    histogram
}

/// Extract the start year from a registry partial date (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`).
fn parse_year(date: &str) -> Option<i32> {
    if let Ok(full) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(full.year());
    }

    let (leading, rest) = (date.get(..4)?, &date[4..]);
    if !rest.is_empty() && !rest.starts_with('-') {
        return None;
    }
    leading.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::StudiesPage;

    fn study_with_date(date: &str) -> Study {
        let body = serde_json::json!({
            "protocolSection": { "statusModule": { "startDateStruct": { "date": date } } }
        });
        Study::from_value(body).expect("build study")
    }

    fn study_with_countries(countries: &[&str]) -> Study {
        let locations: Vec<serde_json::Value> = countries
            .iter()
            .map(|c| serde_json::json!({ "country": c }))
            .collect();
        let body = serde_json::json!({
            "protocolSection": { "contactsLocationsModule": { "locations": locations } }
        });
        Study::from_value(body).expect("build study")
    }

    #[test]
    fn other_bucket_subtracts_named_sum() {
        assert_eq!(other_bucket(100, 80), 20);
    }

    #[test]
    fn other_bucket_floors_at_zero() {
        assert_eq!(other_bucket(100, 120), 0);
    }

    #[test]
    fn year_histogram_counts_and_sorts() {
        let studies = vec![
            study_with_date("2021-07-01"),
            study_with_date("2019-03"),
            study_with_date("2021"),
        ];
        let histogram = year_histogram(&studies);
        assert_eq!(
            histogram,
            vec![
                YearCount {
                    year: 2019,
                    value: 1
                },
                YearCount {
                    year: 2021,
                    value: 2
                },
            ]
        );
    }

    #[test]
    fn year_histogram_skips_unparseable_dates() {
        let studies = vec![
            study_with_date("not a date"),
            study_with_date("20210701"),
            Study::default(),
            study_with_date("2020-01-01"),
        ];
        let histogram = year_histogram(&studies);
        assert_eq!(
            histogram,
            vec![YearCount {
                year: 2020,
                value: 1
            }]
        );
    }

    #[test]
    fn country_histogram_counts_each_study_once_per_country() {
        // Two sites in the same country count the study once.
        let studies = vec![
            study_with_countries(&["United States", "United States", "France"]),
            study_with_countries(&["United States"]),
        ];
        let histogram = country_histogram(&studies);
        assert_eq!(
            histogram,
            vec![
                NamedCount {
                    name: "United States".to_string(),
                    value: 2
                },
                NamedCount {
                    name: "France".to_string(),
                    value: 1
                },
            ]
        );
    }

    #[test]
    fn country_histogram_buckets_beyond_top_four() {
        let studies = vec![
            study_with_countries(&["A", "B", "C", "D", "E", "F"]),
            study_with_countries(&["A", "B", "C", "D"]),
            study_with_countries(&["A"]),
        ];
        let histogram = country_histogram(&studies);
        assert_eq!(histogram.len(), 5);
        assert_eq!(histogram[0].name, "A");
        assert_eq!(histogram[0].value, 3);
        // E and F each appear once; both land in Other.
        assert_eq!(histogram[4].name, "Other");
        assert_eq!(histogram[4].value, 2);
    }

    #[test]
    fn country_histogram_omits_empty_other_bucket() {
        let studies = vec![study_with_countries(&["A", "B"])];
        let histogram = country_histogram(&studies);
        assert_eq!(histogram.len(), 2);
        assert!(histogram.iter().all(|entry| entry.name != "Other"));
    }

    #[test]
    fn country_histogram_breaks_ties_by_name() {
        let studies = vec![study_with_countries(&["B", "A"])];
        let histogram = country_histogram(&studies);
        assert_eq!(histogram[0].name, "A");
        assert_eq!(histogram[1].name, "B");
    }

    #[test]
    fn country_histogram_skips_missing_countries() {
        let body = serde_json::json!({
            "protocolSection": { "contactsLocationsModule": { "locations": [
                { "city": "Boston" },
                { "country": "" }
            ] } }
        });
        let study = Study::from_value(body).expect("build study");
        assert!(country_histogram(&[study]).is_empty());
    }

    #[test]
    fn reductions_over_a_parsed_page() {
        let body = r#"{
            "studies": [
                { "protocolSection": {
                    "statusModule": { "startDateStruct": { "date": "2022-05" } },
                    "contactsLocationsModule": { "locations": [ { "country": "Japan" } ] }
                } }
            ]
        }"#;
        let page = StudiesPage::parse(body).expect("parse page");
        assert_eq!(year_histogram(&page.studies).len(), 1);
        assert_eq!(country_histogram(&page.studies).len(), 1);
    }
}
