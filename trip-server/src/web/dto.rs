//! JSON payloads for the trip board API.

use serde::Serialize;

use crate::fetch::Board;
use crate::trias::TripSummary;

/// Response for `GET /api/trips`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    /// Trips from the last successful fetch
    pub trips: Vec<TripSummary>,

    /// Error message from the last failed fetch
    pub error: Option<String>,

    /// When the board last changed (RFC 3339)
    pub refreshed_at: Option<String>,
}

impl BoardResponse {
    /// Snapshot the current board.
    pub fn from_board(board: &Board) -> Self {
        Self {
            trips: board.trips.clone(),
            error: board.error.clone(),
            refreshed_at: board.refreshed_at.map(|at| at.to_rfc3339()),
        }
    }
}
