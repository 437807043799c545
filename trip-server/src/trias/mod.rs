//! TRIAS protocol adapter.
//!
//! Builds `TripRequest` documents for a TRIAS (Transport Real-time
//! Information and Advice System) journey-planning endpoint and normalizes
//! the deeply nested `TripResponse` XML into flat trip summaries.
//!
//! Key characteristics of TRIAS:
//! - `TripResult` elements sit at a server-dependent envelope depth, so
//!   discovery walks the whole parsed tree instead of a fixed path
//! - element names are namespace-qualified (`trias:` on response fields,
//!   the requestor reference in the `siri` namespace)
//! - fare variants of the same physical trip come back as separate
//!   `TripResult` entries and are collapsed structurally
//! - trip durations are ISO 8601 durations restricted to `PT[n]H[n]M`

mod client;
mod error;
mod extract;
mod mock;
mod request;
mod types;
mod xml;

pub use client::{TriasClient, TriasConfig};
pub use error::TriasError;
pub use extract::{duration_minutes, extract_trips};
pub use mock::MockTriasClient;
pub use request::build_trip_request;
pub use types::{DEFAULT_NUMBER_OF_RESULTS, TripRequestParams, TripSummary};
pub use xml::XmlValue;
