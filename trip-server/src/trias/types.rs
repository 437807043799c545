//! Request parameters and normalized trip summaries.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Default number of itineraries requested per fetch.
pub const DEFAULT_NUMBER_OF_RESULTS: u32 = 3;

/// Parameters for one TRIAS `TripRequest`.
///
/// Stop point references are opaque identifiers supplied by the caller and
/// echoed by the server; they are never interpreted locally.
#[derive(Debug, Clone)]
pub struct TripRequestParams {
    /// Boarding stop identifier (e.g. `de:08111:6118`)
    pub origin_stop_point_ref: String,

    /// Alighting stop identifier
    pub destination_stop_point_ref: String,

    /// Earliest departure from the origin, with timezone offset
    pub departure_time: DateTime<FixedOffset>,

    /// How many itineraries to ask for
    pub number_of_results: u32,

    /// Client identity string required by the upstream service
    pub requestor_ref: String,

    /// Carried for configuration compatibility; the request always asks for
    /// the fixed detail level (see the four constant flags in the builder)
    pub include_intermediate_stops: bool,
}

impl TripRequestParams {
    /// Create params for a trip between two stops departing at the given time.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_time: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            origin_stop_point_ref: origin.into(),
            destination_stop_point_ref: destination.into(),
            departure_time,
            number_of_results: DEFAULT_NUMBER_OF_RESULTS,
            requestor_ref: String::new(),
            include_intermediate_stops: true,
        }
    }

    /// Set the number of itineraries to request.
    pub fn with_number_of_results(mut self, n: u32) -> Self {
        self.number_of_results = n;
        self
    }

    /// Set the requestor reference.
    pub fn with_requestor_ref(mut self, requestor_ref: impl Into<String>) -> Self {
        self.requestor_ref = requestor_ref.into();
        self
    }
}

/// One normalized itinerary, covering the first timed leg of a trip.
///
/// Timestamps are the response's ISO 8601 strings passed through verbatim;
/// the estimated fields are absent when the server has no realtime data.
/// Serializes with the camelCase field names the JSON API exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    /// Boarding stop name
    pub start: String,

    /// Scheduled departure from the boarding stop
    pub start_timetabled_time: Option<String>,

    /// Realtime departure estimate, when available
    pub start_estimated_time: Option<String>,

    /// Alighting stop name
    pub end: String,

    /// Scheduled arrival at the alighting stop
    pub end_timetabled_time: Option<String>,

    /// Realtime arrival estimate, when available
    pub end_estimated_time: Option<String>,

    /// Total trip duration in minutes; absent when the server sent no
    /// duration or one outside the `PT[n]H[n]M` subset
    pub duration_minutes: Option<u32>,
}
