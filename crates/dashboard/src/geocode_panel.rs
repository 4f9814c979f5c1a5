//! The ZIP-code location filter panel.
//!
//! Resolution runs only on explicit user action, never per keystroke. A lookup in flight
//! disables re-triggering; a lookup with zero matches clears any previously resolved
//! coordinate and surfaces its own message, distinct from a transport failure. Editing
//! either input invalidates the held coordinate.

use geocode::{Coordinate, GeocodeClient, GeocodeError, GeocodeResult};

/// Message for a ZIP code the geocoder could not resolve.
pub const GEOCODE_NOT_FOUND: &str = "Could not find location for that ZIP code.";

/// Message for a lookup that failed outright.
pub const GEOCODE_FAILED: &str = "Failed to geocode ZIP code.";

const MAX_ZIP_LEN: usize = 10;
const MAX_RADIUS_LEN: usize = 4;

/// State owner for the geocode filter panel.
#[derive(Debug, Default)]
pub struct GeocodePanel {
    zipcode: String,
    radius: String,
    coordinate: Option<Coordinate>,
    busy: bool,
    error: Option<String>,
}

impl GeocodePanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the ZIP input (bounded length) and invalidate any resolved coordinate.
    pub fn set_zipcode(&mut self, input: &str) {
        self.zipcode = input.chars().take(MAX_ZIP_LEN).collect();
        self.coordinate = None;
    }

    /// Update the radius input and invalidate any resolved coordinate.
    ///
    /// Malformed input is sanitised, not rejected: non-digit characters are stripped and the
    /// remainder bounded to four digits.
    pub fn set_radius(&mut self, input: &str) {
        self.radius = input
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(MAX_RADIUS_LEN)
            .collect();
        self.coordinate = None;
    }

    /// True when a lookup may be triggered: both inputs present and none in flight.
    pub fn can_apply(&self) -> bool {
        !self.busy && !self.zipcode.is_empty() && !self.radius.is_empty()
    }

    /// Resolve the entered ZIP code. No-op unless [`GeocodePanel::can_apply`].
    pub async fn apply(&mut self, client: &GeocodeClient) {
        if !self.can_apply() {
            return;
        }

        self.busy = true;
        self.error = None;
        let result = client.lookup_zip(&self.zipcode).await;
        self.apply_result(result);
        self.busy = false;
    }

    /// Fold a lookup outcome into panel state.
    fn apply_result(&mut self, result: GeocodeResult<Coordinate>) {
        match result {
            Ok(coordinate) => {
                self.coordinate = Some(coordinate);
                self.error = None;
            }
            Err(GeocodeError::NoMatch) => {
                self.coordinate = None;
                self.error = Some(GEOCODE_NOT_FOUND.to_string());
            }
            Err(err) => {
                tracing::warn!("geocode lookup failed: {err}");
                self.coordinate = None;
                self.error = Some(GEOCODE_FAILED.to_string());
            }
        }
    }

    pub fn zipcode(&self) -> &str {
        &self.zipcode
    }

    pub fn radius(&self) -> &str {
        &self.radius
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
