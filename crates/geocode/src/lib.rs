//! # Geocode
//!
//! ZIP-to-coordinate lookup against a Nominatim-style geocoding service.
//!
//! The geocoder returns a list of candidate matches; the first candidate wins. An empty
//! candidate list is a *distinct* outcome ([`GeocodeError::NoMatch`], the ZIP code simply
//! did not resolve) and must not be conflated with a transport failure, because the two are
//! surfaced to the user differently.

use serde::Deserialize;

/// Errors returned by geocoding operations.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The geocoder answered, but with zero candidates for the ZIP code.
    #[error("no geocoding match for the given ZIP code")]
    NoMatch,

    /// The geocoder answered with a non-2xx status.
    #[error("geocoder responded with status {0}")]
    Upstream(u16),

    /// No response was received at all.
    #[error("geocoder request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// A candidate arrived but its coordinates could not be parsed.
    #[error("geocoder returned a malformed candidate: {0}")]
    Malformed(String),
}

/// Result type for geocoding operations.
pub type GeocodeResult<T> = Result<T, GeocodeError>;

/// A resolved latitude/longitude pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// One candidate match on the wire. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct Candidate {
    lat: String,
    lon: String,
}

/// Client for the geocoding service.
#[derive(Clone, Debug)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeocodeClient {
    /// Create a client against a geocoder base URL
    /// (e.g. `https://nominatim.openstreetmap.org`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Resolve a US ZIP code to a coordinate pair.
    ///
    /// Issues one lookup with `limit=1`; the first candidate wins.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::NoMatch`] when the ZIP code resolves to zero candidates
    /// - [`GeocodeError::Upstream`] / [`GeocodeError::Network`] for HTTP-level and
    ///   transport-level failures
    /// - [`GeocodeError::Malformed`] when the winning candidate's coordinates are not numeric
    pub async fn lookup_zip(&self, zipcode: &str) -> GeocodeResult<Coordinate> {
        let url = format!("{}/search", self.base_url);
        let params = [
            ("postalcode", zipcode),
            ("country", "us"),
            ("format", "json"),
            ("limit", "1"),
        ];

        tracing::debug!(url = %url, zipcode = %zipcode, "geocode lookup");

        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(GeocodeError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Upstream(status.as_u16()));
        }

        let candidates: Vec<Candidate> = response.json().await.map_err(GeocodeError::Network)?;
        first_match(candidates)
    }
}

/// Pick the winning candidate and parse its coordinates.
fn first_match(candidates: Vec<Candidate>) -> GeocodeResult<Coordinate> {
    let Some(first) = candidates.into_iter().next() else {
        return Err(GeocodeError::NoMatch);
    };

    let lat: f64 = first
        .lat
        .parse()
        .map_err(|_| GeocodeError::Malformed(format!("lat: '{}'", first.lat)))?;
    let lon: f64 = first
        .lon
        .parse()
        .map_err(|_| GeocodeError::Malformed(format!("lon: '{}'", first.lon)))?;

    Ok(Coordinate { lat, lon })
}
