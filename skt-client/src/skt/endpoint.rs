//! Per-endpoint response pipelines.
//!
//! Each SKT endpoint wraps its payload in a differently named response and
//! result element. The [`Endpoint`] implementations carry those names and the
//! mapping for the payload; the functions here drive unwrap, error detection
//! and mapping for any of them.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{Point, Trip};

use super::convert::{ConversionError, convert_nearby_stations, convert_stations, convert_trips};
use super::envelope::{ResponseError, extract_error, unwrap};
use super::error::SktError;
use super::types::{JourneyResult, NearestStopAreaResult, StartEndPointResult};

/// Static description of an SKT endpoint.
pub trait Endpoint {
    /// Short name used in logs and errors.
    const NAME: &'static str;
    /// Path relative to the API base URL.
    const PATH: &'static str;
    /// Element under `Envelope.Body`.
    const RESPONSE_KEY: &'static str;
    /// Element under the response element.
    const RESULT_KEY: &'static str;

    type Item;

    /// Map an unwrapped result element to domain values.
    fn map(result: &Value) -> Result<Vec<Self::Item>, ConversionError>;
}

/// Station search by name.
#[derive(Debug, Clone, Copy)]
pub struct Stations;

/// Stations near a location.
#[derive(Debug, Clone, Copy)]
pub struct NearbyStations;

/// Trip search between two points.
#[derive(Debug, Clone, Copy)]
pub struct Trips;

fn decode<T: DeserializeOwned>(endpoint: &'static str, result: &Value) -> Result<T, ConversionError> {
    T::deserialize(result).map_err(|e| ConversionError::Decode {
        endpoint,
        message: e.to_string(),
    })
}

impl Endpoint for Stations {
    const NAME: &'static str = "stations";
    const PATH: &'static str = "/querypage.asp";
    const RESPONSE_KEY: &'static str = "GetStartEndPointResponse";
    const RESULT_KEY: &'static str = "GetStartEndPointResult";

    type Item = Point;

    fn map(result: &Value) -> Result<Vec<Point>, ConversionError> {
        decode::<StartEndPointResult>(Self::NAME, result).map(|r| convert_stations(&r))
    }
}

impl Endpoint for NearbyStations {
    const NAME: &'static str = "nearby stations";
    const PATH: &'static str = "/neareststation.asp";
    const RESPONSE_KEY: &'static str = "GetNearestStopAreaResponse";
    const RESULT_KEY: &'static str = "GetNearestStopAreaResult";

    type Item = Point;

    fn map(result: &Value) -> Result<Vec<Point>, ConversionError> {
        decode::<NearestStopAreaResult>(Self::NAME, result).map(|r| convert_nearby_stations(&r))
    }
}

impl Endpoint for Trips {
    const NAME: &'static str = "trips";
    const PATH: &'static str = "/resultspage.asp";
    const RESPONSE_KEY: &'static str = "GetJourneyResponse";
    const RESULT_KEY: &'static str = "GetJourneyResult";

    type Item = Trip;

    fn map(result: &Value) -> Result<Vec<Trip>, ConversionError> {
        decode::<JourneyResult>(Self::NAME, result).map(|r| convert_trips(&r))
    }
}

fn result_of<E: Endpoint>(raw: &Value) -> Option<&Value> {
    unwrap(raw, E::RESPONSE_KEY, E::RESULT_KEY)
}

/// Map a raw response without checking for errors.
///
/// A response without a result element maps to an empty list.
pub fn map_endpoint<E: Endpoint>(raw: &Value) -> Result<Vec<E::Item>, ConversionError> {
    match result_of::<E>(raw) {
        Some(result) => E::map(result),
        None => Ok(Vec::new()),
    }
}

/// The error message carried by a raw response, if any.
pub fn endpoint_error<E: Endpoint>(raw: &Value) -> Option<String> {
    extract_error(result_of::<E>(raw))
}

/// Check a raw response for errors, then map it.
pub fn parse_response<E: Endpoint>(raw: &Value) -> Result<Vec<E::Item>, SktError> {
    let result = result_of::<E>(raw);
    if let Some(e) = ResponseError::from_result(result) {
        return Err(e.into());
    }

    match result {
        Some(result) => Ok(E::map(result)?),
        None => Err(ResponseError::Internal.into()),
    }
}

/// Stations from a station search response.
pub fn stations(raw: &Value) -> Result<Vec<Point>, ConversionError> {
    map_endpoint::<Stations>(raw)
}

/// Error message of a station search response.
pub fn stations_error(raw: &Value) -> Option<String> {
    endpoint_error::<Stations>(raw)
}

/// Stations from a nearby station response.
pub fn nearby_stations(raw: &Value) -> Result<Vec<Point>, ConversionError> {
    map_endpoint::<NearbyStations>(raw)
}

/// Error message of a nearby station response.
pub fn nearby_stations_error(raw: &Value) -> Option<String> {
    endpoint_error::<NearbyStations>(raw)
}

/// Trips from a trip search response.
pub fn trips(raw: &Value) -> Result<Vec<Trip>, ConversionError> {
    map_endpoint::<Trips>(raw)
}

/// Error message of a trip search response.
pub fn trips_error(raw: &Value) -> Option<String> {
    endpoint_error::<Trips>(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CarrierType, PointKind};
    use serde_json::json;

    fn envelope(response_key: &str, result_key: &str, result: Value) -> Value {
        json!({"Envelope": {"Body": {response_key: {result_key: result}}}})
    }

    #[test]
    fn single_point_is_one_element_list() {
        let raw = envelope(
            "GetStartEndPointResponse",
            "GetStartEndPointResult",
            json!({
                "Code": "0",
                "StartPoints": {
                    "Point": {"Id": "80000", "Name": "Malmö C", "Type": "STOP_AREA", "X": "6167930", "Y": "1323215"}
                }
            }),
        );

        assert_eq!(stations_error(&raw), None);
        let points = stations(&raw).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].name(), "Malmö C");
        assert!(points[0].location().is_known());
    }

    #[test]
    fn provider_error_stops_mapping() {
        let raw = envelope(
            "GetStartEndPointResponse",
            "GetStartEndPointResult",
            json!({
                "Code": "5",
                "Message": "No stations found",
                "StartPoints": {"Point": {"Id": "1", "Name": "ignored"}}
            }),
        );

        assert_eq!(stations_error(&raw).as_deref(), Some("No stations found"));

        let err = parse_response::<Stations>(&raw).unwrap_err();
        assert!(matches!(
            err,
            SktError::Response(ResponseError::Provider { ref code, .. }) if code == "5"
        ));
        assert_eq!(err.to_string(), "No stations found");
    }

    #[test]
    fn non_integer_code_is_provider_error() {
        for code in [json!("5.0"), json!(5.0), json!("E42")] {
            let raw = envelope(
                "GetStartEndPointResponse",
                "GetStartEndPointResult",
                json!({"Code": code, "Message": "No stations found"}),
            );

            assert_eq!(stations_error(&raw).as_deref(), Some("No stations found"));
            assert!(matches!(
                parse_response::<Stations>(&raw),
                Err(SktError::Response(ResponseError::Provider { .. }))
            ));
        }
    }

    #[test]
    fn missing_result_is_internal_error() {
        let raw = json!({"Envelope": {"Body": {}}});

        assert_eq!(trips_error(&raw).as_deref(), Some("roerrorinternal"));
        assert!(trips(&raw).unwrap().is_empty());
        assert!(matches!(
            parse_response::<Trips>(&raw),
            Err(SktError::Response(ResponseError::Internal))
        ));
    }

    #[test]
    fn nearby_stations_are_stations() {
        let raw = envelope(
            "GetNearestStopAreaResponse",
            "GetNearestStopAreaResult",
            json!({
                "Code": "0",
                "NearestStopAreas": {
                    "NearestStopArea": [
                        {"Id": "80100", "Name": "Triangeln", "X": "6166700", "Y": "1323500"},
                        {"Id": "80101", "Name": "Södervärn", "X": "6166000", "Y": "1323800"}
                    ]
                }
            }),
        );

        assert_eq!(nearby_stations_error(&raw), None);
        let points = parse_response::<NearbyStations>(&raw).unwrap();
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.kind() == PointKind::Station));
    }

    #[test]
    fn trips_pipeline() {
        let raw = envelope(
            "GetJourneyResponse",
            "GetJourneyResult",
            json!({
                "Code": "0",
                "Journeys": {
                    "Journey": [
                        {
                            "SequenceNo": "1",
                            "RouteLinks": {
                                "RouteLink": {
                                    "DepDateTime": "2024-03-15T10:00:00",
                                    "DepIsTimingPoint": "false",
                                    "ArrDateTime": "2024-03-15T10:12:00",
                                    "ArrIsTimingPoint": "true",
                                    "From": {"Id": "80000", "Name": "Malmö C", "StopPoint": "2b"},
                                    "To": {"Id": "81216", "Name": "Lund C", "StopPoint": "1"},
                                    "Line": {
                                        "Name": "Öresundståg",
                                        "TrainNo": "42",
                                        "TransportModeId": "4",
                                        "TransportModeName": "Tåg",
                                        "Towards": "Helsingør"
                                    }
                                }
                            }
                        },
                        {"SequenceNo": "2", "RouteLinks": null}
                    ]
                }
            }),
        );

        assert_eq!(trips_error(&raw), None);
        let trips = parse_response::<Trips>(&raw).unwrap();
        assert_eq!(trips.len(), 1);

        let leg = &trips[0].legs()[0];
        assert_eq!(leg.carrier.name, "Öresundståg 42");
        assert_eq!(leg.carrier.carrier_type, CarrierType::Train);
        assert_eq!(leg.carrier.heading, "Helsingør");
        assert!(leg.from.real_time_date.is_none());
        assert!(leg.to.real_time_date.is_some());
        assert_eq!(leg.from.track.as_deref(), Some("2b"));
    }

    #[test]
    fn mismatched_result_is_decode_error() {
        let raw = envelope(
            "GetJourneyResponse",
            "GetJourneyResult",
            json!({"Code": "0", "Journeys": {"Journey": "garbage"}}),
        );

        assert!(matches!(
            trips(&raw),
            Err(ConversionError::Decode { endpoint: "trips", .. })
        ));
    }
}
