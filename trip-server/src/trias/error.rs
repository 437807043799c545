//! TRIAS adapter error types.

/// Errors that can occur while fetching and extracting trips.
#[derive(Debug, thiserror::Error)]
pub enum TriasError {
    /// A required request parameter is missing. Checked before any network I/O.
    #[error("missing required configuration: {0}")]
    Validation(&'static str),

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status
    #[error("TRIAS endpoint returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Response XML failed to parse
    #[error("malformed TRIAS response: {message}")]
    MalformedResponse { message: String },

    /// A TripResult is missing a required element
    #[error("unexpected TripResult shape: missing {field}")]
    UnexpectedShape { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TriasError::Validation("originStopPointRef");
        assert_eq!(
            err.to_string(),
            "missing required configuration: originStopPointRef"
        );

        let err = TriasError::Api {
            status: 503,
            body: "Service Unavailable".into(),
        };
        assert_eq!(
            err.to_string(),
            "TRIAS endpoint returned HTTP 503: Service Unavailable"
        );

        let err = TriasError::UnexpectedShape { field: "LegBoard" };
        assert_eq!(err.to_string(), "unexpected TripResult shape: missing LegBoard");

        let err = TriasError::MalformedResponse {
            message: "unexpected end of document".into(),
        };
        assert!(err.to_string().contains("malformed TRIAS response"));
    }
}
