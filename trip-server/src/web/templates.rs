//! Askama templates and view models for the trip board.

use askama::Template;
use chrono::{DateTime, Local};

use crate::fetch::Board;
use crate::trias::TripSummary;

/// The trip board page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct BoardTemplate {
    pub title: String,
    pub refresh_secs: u64,
    pub error: Option<String>,
    pub trips: Vec<TripView>,
    pub refreshed_at: Option<String>,
}

impl BoardTemplate {
    /// Build the page from a board snapshot.
    pub fn new(title: impl Into<String>, refresh_secs: u64, board: &Board) -> Self {
        Self {
            title: title.into(),
            refresh_secs,
            error: board.error.clone(),
            trips: board.trips.iter().map(TripView::from_summary).collect(),
            refreshed_at: board
                .refreshed_at
                .map(|at| at.with_timezone(&Local).format("%H:%M:%S").to_string()),
        }
    }
}

/// One trip row, with all display strings precomputed.
#[derive(Debug, Clone)]
pub struct TripView {
    pub start: String,
    pub end: String,
    pub departure_display: String,
    pub arrival_display: String,
    pub duration_display: String,
    pub is_delayed: bool,
}

impl TripView {
    /// Create from a trip summary.
    ///
    /// Estimated times win over timetabled ones for display; a trip counts
    /// as delayed when an estimate exists and differs from the timetable.
    pub fn from_summary(trip: &TripSummary) -> Self {
        let departure = trip
            .start_estimated_time
            .as_deref()
            .or(trip.start_timetabled_time.as_deref());
        let arrival = trip
            .end_estimated_time
            .as_deref()
            .or(trip.end_timetabled_time.as_deref());

        let is_delayed = trip.start_estimated_time.is_some()
            && trip.start_estimated_time != trip.start_timetabled_time;

        Self {
            start: trip.start.clone(),
            end: trip.end.clone(),
            departure_display: format_time(departure),
            arrival_display: format_time(arrival),
            duration_display: match trip.duration_minutes {
                Some(minutes) => format!("{minutes} min"),
                None => "? min".to_string(),
            },
            is_delayed,
        }
    }
}

/// `HH:MM` of an ISO 8601 timestamp, `"?"` when absent or unparsable.
fn format_time(iso: Option<&str>) -> String {
    iso.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "?".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> TripSummary {
        TripSummary {
            start: "Hauptbahnhof".into(),
            start_timetabled_time: Some("2026-08-06T07:42:00+02:00".into()),
            start_estimated_time: None,
            end: "Flughafen".into(),
            end_timetabled_time: Some("2026-08-06T08:09:00+02:00".into()),
            end_estimated_time: None,
            duration_minutes: Some(27),
        }
    }

    #[test]
    fn on_time_trip_shows_timetabled_times() {
        let view = TripView::from_summary(&summary());

        assert_eq!(view.departure_display, "07:42");
        assert_eq!(view.arrival_display, "08:09");
        assert_eq!(view.duration_display, "27 min");
        assert!(!view.is_delayed);
    }

    #[test]
    fn estimated_times_win_over_timetabled() {
        let mut trip = summary();
        trip.start_estimated_time = Some("2026-08-06T07:45:00+02:00".into());
        trip.end_estimated_time = Some("2026-08-06T08:12:00+02:00".into());

        let view = TripView::from_summary(&trip);

        assert_eq!(view.departure_display, "07:45");
        assert_eq!(view.arrival_display, "08:12");
        assert!(view.is_delayed);
    }

    #[test]
    fn estimate_equal_to_timetable_is_not_delayed() {
        let mut trip = summary();
        trip.start_estimated_time = trip.start_timetabled_time.clone();

        let view = TripView::from_summary(&trip);
        assert!(!view.is_delayed);
    }

    #[test]
    fn missing_fields_degrade_to_placeholders() {
        let trip = TripSummary {
            start: "A".into(),
            start_timetabled_time: None,
            start_estimated_time: None,
            end: "B".into(),
            end_timetabled_time: Some("not a timestamp".into()),
            end_estimated_time: None,
            duration_minutes: None,
        };

        let view = TripView::from_summary(&trip);

        assert_eq!(view.departure_display, "?");
        assert_eq!(view.arrival_display, "?");
        assert_eq!(view.duration_display, "? min");
    }

    #[test]
    fn board_template_carries_the_error() {
        let board = Board {
            trips: Vec::new(),
            error: Some("upstream down".into()),
            refreshed_at: None,
        };

        let template = BoardTemplate::new("VVS Trips", 60, &board);

        assert_eq!(template.error.as_deref(), Some("upstream down"));
        assert!(template.trips.is_empty());
        assert!(template.refreshed_at.is_none());
    }

    #[test]
    fn board_page_renders() {
        let board = Board {
            trips: vec![summary()],
            error: None,
            refreshed_at: None,
        };

        let html = BoardTemplate::new("VVS Trips", 60, &board).render().unwrap();

        assert!(html.contains("VVS Trips"));
        assert!(html.contains("07:42"));
        assert!(html.contains("Hauptbahnhof"));
        assert!(html.contains(r#"content="60""#));
    }

    #[test]
    fn empty_board_renders_the_empty_state() {
        let html = BoardTemplate::new("VVS Trips", 60, &Board::default())
            .render()
            .unwrap();

        assert!(html.contains("No trips"));
    }

    #[test]
    fn failed_board_renders_the_error_instead_of_trips() {
        let board = Board {
            trips: Vec::new(),
            error: Some("HTTP error: timed out".into()),
            refreshed_at: None,
        };

        let html = BoardTemplate::new("VVS Trips", 60, &board).render().unwrap();

        assert!(html.contains("HTTP error: timed out"));
        assert!(!html.contains("No trips"));
    }
}
