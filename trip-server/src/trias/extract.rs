//! Normalization of TRIAS `TripResponse` documents into trip summaries.
//!
//! Works on the generic parsed tree from [`super::xml`]: discovers every
//! `TripResult` regardless of envelope depth, reads the first timed leg of
//! each trip, collapses fare-variant duplicates, and parses the trip
//! duration. Stateless; one call per response document.

use std::collections::HashSet;

use tracing::debug;

use super::error::TriasError;
use super::types::TripSummary;
use super::xml::{self, XmlValue, element_local_name};

/// Extract the deduplicated trip summaries from a raw `TripResponse`.
///
/// Summaries come back in first-occurrence order; no chronological sort is
/// applied. A required element missing from any `TripResult` fails the whole
/// response with [`TriasError::UnexpectedShape`].
pub fn extract_trips(raw_xml: &str) -> Result<Vec<TripSummary>, TriasError> {
    let doc = xml::parse(raw_xml)?;

    let mut trip_results = Vec::new();
    collect_trip_results(&doc, &mut trip_results);
    debug!(count = trip_results.len(), "discovered TripResult nodes");

    let mut seen = HashSet::new();
    let mut summaries = Vec::new();

    for trip_result in trip_results {
        let trip = require(trip_result, "Trip")?;
        let duration_minutes = trip
            .child("Duration")
            .and_then(XmlValue::text)
            .and_then(duration_minutes);

        let timed_leg = require(require(trip, "TripLeg")?.first(), "TimedLeg")?.first();
        let leg_board = require(timed_leg, "LegBoard")?;
        let leg_alight = require(timed_leg, "LegAlight")?;
        let board_departure = require(leg_board, "ServiceDeparture")?;
        let alight_arrival = require(leg_alight, "ServiceArrival")?;

        // Fare variants come back as separate TripResults over the same
        // physical trip; identical board/alight subtrees mean the same trip.
        let identity = (
            leg_board.clone(),
            leg_alight.clone(),
            board_departure.clone(),
            alight_arrival.clone(),
        );
        if !seen.insert(identity) {
            let result_id = trip_result
                .child("ResultId")
                .and_then(XmlValue::text)
                .unwrap_or("?");
            debug!(result_id, "dropping duplicate TripResult");
            continue;
        }

        summaries.push(TripSummary {
            start: stop_point_name(leg_board)?,
            start_timetabled_time: time_field(board_departure, "TimetabledTime"),
            start_estimated_time: time_field(board_departure, "EstimatedTime"),
            end: stop_point_name(leg_alight)?,
            end_timetabled_time: time_field(alight_arrival, "TimetabledTime"),
            end_estimated_time: time_field(alight_arrival, "EstimatedTime"),
            duration_minutes,
        });
    }

    Ok(summaries)
}

/// Depth-first search for `TripResult` elements at any nesting depth.
///
/// Servers serialize a lone result as a single element and multiple results
/// as repeated siblings; both land flat in `out`. Matched subtrees are not
/// searched again.
fn collect_trip_results<'a>(value: &'a XmlValue, out: &mut Vec<&'a XmlValue>) {
    match value {
        XmlValue::Node(entries) => {
            for (key, child) in entries {
                if element_local_name(key) == Some("TripResult") {
                    match child {
                        XmlValue::Many(items) => out.extend(items.iter()),
                        single => out.push(single),
                    }
                } else {
                    collect_trip_results(child, out);
                }
            }
        }
        XmlValue::Many(items) => {
            for item in items {
                collect_trip_results(item, out);
            }
        }
        XmlValue::Text(_) => {}
    }
}

fn require<'a>(node: &'a XmlValue, field: &'static str) -> Result<&'a XmlValue, TriasError> {
    node.child(field)
        .ok_or(TriasError::UnexpectedShape { field })
}

/// `StopPointName/Text` of a leg end.
fn stop_point_name(leg: &XmlValue) -> Result<String, TriasError> {
    require(require(leg, "StopPointName")?, "Text")?
        .text()
        .map(str::to_string)
        .ok_or(TriasError::UnexpectedShape { field: "Text" })
}

fn time_field(node: &XmlValue, field: &str) -> Option<String> {
    node.child(field).and_then(XmlValue::text).map(str::to_string)
}

/// Total minutes of an ISO 8601 duration restricted to the `PT[n]H[n]M`
/// subset TRIAS uses.
///
/// Absent hours or minutes count as zero and anything after the matched
/// parts is ignored, so `PT2H`, `PT45M` and `PT1H30M45S` all parse. Strings
/// not starting with `PT` yield `None`.
pub fn duration_minutes(duration: &str) -> Option<u32> {
    let rest = duration.strip_prefix("PT")?;
    let (hours, rest) = leading_number(rest, b'H');
    let (minutes, _) = leading_number(rest, b'M');
    Some(hours * 60 + minutes)
}

/// Parse a run of digits followed by `unit`, or give back the input untouched.
fn leading_number(input: &str, unit: u8) -> (u32, &str) {
    let digits = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    if digits == 0 || input.as_bytes().get(digits) != Some(&unit) {
        return (0, input);
    }
    match input[..digits].parse() {
        Ok(n) => (n, &input[digits + 1..]),
        Err(_) => (0, input),
    }
}
