//! TRIAS `TripRequest` document builder.

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::escape::escape;

use super::types::TripRequestParams;

/// Build a `TripRequest` document for the given parameters.
///
/// `now` becomes the `RequestTimestamp`; callers pass the current wall-clock
/// time (taken as a parameter so tests can pin it). The four detail flags
/// are a fixed request detail level, not derived from the parameters.
/// Interpolated values are XML-escaped, so stop references or requestor
/// strings containing metacharacters cannot break the document.
pub fn build_trip_request(params: &TripRequestParams, now: &DateTime<Utc>) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Trias version="1.2" xmlns="http://www.vdv.de/trias" xmlns:siri="http://www.siri.org.uk/siri" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.vdv.de/trias ../trias-xsd-v1.1/Trias.xsd">
    <ServiceRequest>
        <RequestTimestamp>{timestamp}</RequestTimestamp>
        <siri:RequestorRef>{requestor}</siri:RequestorRef>
        <RequestPayload>
            <TripRequest>
                <Origin>
                    <LocationRef>
                        <StopPointRef>{origin}</StopPointRef>
                    </LocationRef>
                    <DepArrTime>{departure}</DepArrTime>
                </Origin>
                <Destination>
                    <LocationRef>
                        <StopPointRef>{destination}</StopPointRef>
                    </LocationRef>
                </Destination>
                <Params>
                    <NumberOfResults>{results}</NumberOfResults>
                    <IncludeTrackSections>false</IncludeTrackSections>
                    <IncludeIntermediateStops>false</IncludeIntermediateStops>
                    <IncludeLegProjection>false</IncludeLegProjection>
                    <IncludeFares>false</IncludeFares>
                </Params>
            </TripRequest>
        </RequestPayload>
    </ServiceRequest>
</Trias>
"#,
        timestamp = now.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
        requestor = escape(&params.requestor_ref),
        origin = escape(&params.origin_stop_point_ref),
        departure = params
            .departure_time
            .to_rfc3339_opts(SecondsFormat::Millis, false),
        destination = escape(&params.destination_stop_point_ref),
        results = params.number_of_results,
    )
}
