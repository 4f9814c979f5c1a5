//! Translation from the proxy's loose inbound query to the registry grammar.
//!
//! The inbound surface is whatever a browser serialised: singular or repeated keys, string
//! booleans, numeric strings. Translation is a pure function over the raw key/value pairs so
//! the whole contract is testable without a server.

/// Condition term used when the caller supplies none (or the sentinel).
pub const DEFAULT_CONDITION: &str = "peripheral T cell lymphoma";

/// Inbound sentinel meaning "no subtype narrowing"; folds to [`DEFAULT_CONDITION`].
pub const ALL_SENTINEL: &str = "All";

/// Page size applied when the caller supplies none.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// The response fields requested on every search, superseding any caller-supplied list.
///
/// This is the union of what the list view and the chart reductions consume; the registry
/// returns nothing else.
pub const STUDY_FIELDS: [&str; 6] = [
    "protocolSection.identificationModule.nctId",
    "protocolSection.identificationModule.briefTitle",
    "protocolSection.descriptionModule.briefSummary",
    "protocolSection.statusModule.overallStatus",
    "protocolSection.statusModule.startDateStruct",
    "protocolSection.contactsLocationsModule.locations",
];

/// Registry-side parameter keys.
const OUT_CONDITION: &str = "query.cond";
const OUT_FIELDS: &str = "fields";
const OUT_PAGE_SIZE: &str = "pageSize";
const OUT_PAGE_TOKEN: &str = "pageToken";
const OUT_STATUS: &str = "filter.overallStatus";
const OUT_GEO: &str = "filter.geo";
const OUT_COUNT_TOTAL: &str = "countTotal";

/// Map inbound query pairs onto the registry's expected parameters.
///
/// Rules, in precedence order:
/// 1. `cond` maps to the registry's condition term; absent, blank, or the `All` sentinel
///    fold to [`DEFAULT_CONDITION`].
/// 2. Every `status` / `status[]` value joins (in arrival order) into one comma-separated
///    `filter.overallStatus`; neither inbound key survives.
/// 3. `lat` + `lon` + `radius` synthesise `filter.geo=distance(lat,lon,radiusmi)`; if any of
///    the three is missing the geo filter is omitted entirely.
/// 4. `fields` is always [`STUDY_FIELDS`], regardless of the caller's value.
/// 5. `pageSize` defaults to [`DEFAULT_PAGE_SIZE`] when absent or non-numeric; `pageToken`
///    passes through unchanged.
/// 6. `countTotal` forwards as `true` when the inbound value is truthy.
///
/// The outbound order is fixed, so equal inputs produce byte-equal query strings.
pub fn translate(pairs: &[(String, String)]) -> Vec<(String, String)> {
    let mut condition: Option<&str> = None;
    let mut statuses: Vec<&str> = Vec::new();
    let mut lat: Option<&str> = None;
    let mut lon: Option<&str> = None;
    let mut radius: Option<&str> = None;
    let mut page_token: Option<&str> = None;
    let mut page_size: Option<&str> = None;
    let mut count_total = false;

    for (key, value) in pairs {
        match key.as_str() {
            "cond" => condition = Some(value.as_str()),
            "status" | "status[]" => statuses.push(value.as_str()),
            "lat" => lat = Some(value.as_str()),
            "lon" => lon = Some(value.as_str()),
            "radius" => radius = Some(value.as_str()),
            "pageToken" => page_token = Some(value.as_str()),
            "pageSize" => page_size = Some(value.as_str()),
            "countTotal" => count_total = matches!(value.as_str(), "true" | "1"),
            // Caller-supplied `fields` (and anything unrecognised) is dropped; the fixed
            // field list below supersedes it.
            _ => {}
        }
    }

    let condition = match condition.map(str::trim) {
        None | Some("") => DEFAULT_CONDITION,
        Some(ALL_SENTINEL) => DEFAULT_CONDITION,
        Some(other) => other,
    };

    let page_size = page_size
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let mut out: Vec<(String, String)> = vec![
        (OUT_CONDITION.to_string(), condition.to_string()),
        (OUT_FIELDS.to_string(), STUDY_FIELDS.join(",")),
        (OUT_PAGE_SIZE.to_string(), page_size.to_string()),
    ];

    if let Some(token) = page_token {
        out.push((OUT_PAGE_TOKEN.to_string(), token.to_string()));
    }

    if !statuses.is_empty() {
        out.push((OUT_STATUS.to_string(), statuses.join(",")));
    }

    if let (Some(lat), Some(lon), Some(radius)) = (lat, lon, radius) {
        out.push((OUT_GEO.to_string(), format!("distance({lat},{lon},{radius}mi)")));
    }

    if count_total {
        out.push((OUT_COUNT_TOTAL.to_string(), "true".to_string()));
    }

    out
}
