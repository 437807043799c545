//! Mock TRIAS client for running without a live endpoint.
//!
//! Serves a canned `TripResponse` document from a file through the same
//! interface as the real client. Useful for development against recorded
//! responses and for tests.

use std::path::{Path, PathBuf};

use super::error::TriasError;
use super::extract::extract_trips;
use super::types::{TripRequestParams, TripSummary};

/// Mock client that reads its response from a file on disk.
///
/// The file is re-read on every fetch, so updating it between cycles is
/// reflected on the board just like fresh live data.
#[derive(Debug, Clone)]
pub struct MockTriasClient {
    path: PathBuf,
}

impl MockTriasClient {
    /// Create a mock client serving the response document at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Fetch trips from the canned response.
    ///
    /// Mimics the real `TriasClient::fetch_trips` interface. The request
    /// parameters are ignored - the canned data is whatever was recorded.
    pub async fn fetch_trips(
        &self,
        _params: &TripRequestParams,
    ) -> Result<Vec<TripSummary>, TriasError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| TriasError::Api {
            status: 0,
            body: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        extract_trips(&raw)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const CANNED_RESPONSE: &str = r#"<trias:Trias xmlns:trias="http://www.vdv.de/trias">
        <trias:ServiceDelivery>
            <trias:DeliveryPayload>
                <trias:TripResponse>
                    <trias:TripResult>
                        <trias:ResultId>ID-1</trias:ResultId>
                        <trias:Trip>
                            <trias:Duration>PT17M</trias:Duration>
                            <trias:TripLeg>
                                <trias:TimedLeg>
                                    <trias:LegBoard>
                                        <trias:StopPointName><trias:Text>Rathaus</trias:Text></trias:StopPointName>
                                        <trias:ServiceDeparture>
                                            <trias:TimetabledTime>2026-08-06T07:42:00+02:00</trias:TimetabledTime>
                                        </trias:ServiceDeparture>
                                    </trias:LegBoard>
                                    <trias:LegAlight>
                                        <trias:StopPointName><trias:Text>Schlossplatz</trias:Text></trias:StopPointName>
                                        <trias:ServiceArrival>
                                            <trias:TimetabledTime>2026-08-06T07:59:00+02:00</trias:TimetabledTime>
                                        </trias:ServiceArrival>
                                    </trias:LegAlight>
                                </trias:TimedLeg>
                            </trias:TripLeg>
                        </trias:Trip>
                    </trias:TripResult>
                </trias:TripResponse>
            </trias:DeliveryPayload>
        </trias:ServiceDelivery>
    </trias:Trias>"#;

    fn params() -> TripRequestParams {
        TripRequestParams::new("a", "b", "2026-08-06T07:30:00+02:00".parse().unwrap())
    }

    #[tokio::test]
    async fn serves_trips_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CANNED_RESPONSE.as_bytes()).unwrap();

        let client = MockTriasClient::new(file.path());
        let trips = client.fetch_trips(&params()).await.unwrap();

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].start, "Rathaus");
        assert_eq!(trips[0].duration_minutes, Some(17));
    }

    #[tokio::test]
    async fn missing_file_reports_an_error() {
        let client = MockTriasClient::new("/nonexistent/response.xml");
        let err = client.fetch_trips(&params()).await.unwrap_err();

        match err {
            TriasError::Api { status: 0, body } => {
                assert!(body.contains("/nonexistent/response.xml"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
