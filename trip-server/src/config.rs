//! Application configuration, read from the environment at startup.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};

use crate::trias::{DEFAULT_NUMBER_OF_RESULTS, TriasError, TripRequestParams};

/// Runtime configuration for the trip board.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TRIAS endpoint the TripRequest is posted to
    pub endpoint: String,

    /// Boarding stop reference
    pub origin_stop_point_ref: String,

    /// Alighting stop reference
    pub destination_stop_point_ref: String,

    /// Client identity sent as `siri:RequestorRef`
    pub requestor_ref: String,

    /// Itineraries requested per fetch
    pub number_of_results: u32,

    /// Carried through to the request parameters; see the builder's fixed
    /// detail flags
    pub include_intermediate_stops: bool,

    /// Seconds between fetch cycles (also the page refresh interval)
    pub update_interval_secs: u64,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,

    /// When set, serve this canned response file instead of going upstream
    pub static_data: Option<PathBuf>,

    /// Board heading
    pub title: String,

    /// Listen port
    pub port: u16,

    /// Directory served under `/static`
    pub static_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.efa-bw.de/trias".to_string(),
            origin_stop_point_ref: String::new(),
            destination_stop_point_ref: String::new(),
            requestor_ref: String::new(),
            number_of_results: DEFAULT_NUMBER_OF_RESULTS,
            include_intermediate_stops: true,
            update_interval_secs: 60,
            timeout_secs: 30,
            static_data: None,
            title: "VVS Trips".to_string(),
            port: 3000,
            static_dir: "static".to_string(),
        }
    }
}

impl AppConfig {
    /// Read the configuration from environment variables, falling back to
    /// the defaults above for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: env_or("TRIAS_ENDPOINT", defaults.endpoint),
            origin_stop_point_ref: env_or("TRIAS_ORIGIN_REF", defaults.origin_stop_point_ref),
            destination_stop_point_ref: env_or(
                "TRIAS_DESTINATION_REF",
                defaults.destination_stop_point_ref,
            ),
            requestor_ref: env_or("TRIAS_REQUESTOR_REF", defaults.requestor_ref),
            number_of_results: env_parsed("TRIAS_NUMBER_OF_RESULTS", defaults.number_of_results),
            include_intermediate_stops: env_parsed(
                "TRIAS_INCLUDE_INTERMEDIATE_STOPS",
                defaults.include_intermediate_stops,
            ),
            update_interval_secs: env_parsed(
                "TRIAS_UPDATE_INTERVAL_SECS",
                defaults.update_interval_secs,
            ),
            timeout_secs: env_parsed("TRIAS_TIMEOUT_SECS", defaults.timeout_secs),
            static_data: env::var("TRIAS_STATIC_DATA").ok().map(PathBuf::from),
            title: env_or("BOARD_TITLE", defaults.title),
            port: env_parsed("PORT", defaults.port),
            static_dir: env_or("STATIC_DIR", defaults.static_dir),
        }
    }

    /// Presence check for the fields a fetch cannot run without.
    ///
    /// Runs before each fetch attempt; everything else is trusted as given.
    pub fn validate(&self) -> Result<(), TriasError> {
        if self.endpoint.is_empty() {
            return Err(TriasError::Validation("endpoint"));
        }
        if self.origin_stop_point_ref.is_empty() {
            return Err(TriasError::Validation("originStopPointRef"));
        }
        if self.destination_stop_point_ref.is_empty() {
            return Err(TriasError::Validation("destinationStopPointRef"));
        }
        Ok(())
    }

    /// Request parameters for one fetch cycle departing at `departure_time`.
    pub fn trip_params(&self, departure_time: DateTime<FixedOffset>) -> TripRequestParams {
        TripRequestParams {
            origin_stop_point_ref: self.origin_stop_point_ref.clone(),
            destination_stop_point_ref: self.destination_stop_point_ref.clone(),
            departure_time,
            number_of_results: self.number_of_results,
            requestor_ref: self.requestor_ref.clone(),
            include_intermediate_stops: self.include_intermediate_stops,
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
}

fn env_parsed<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
