//! Conversion from SKT DTOs to domain types.
//!
//! Stop areas become [`Point::Station`], everything else [`Point::GeoPoint`];
//! both have their RT90 grid coordinates projected to WGS84. A journey whose
//! route links cannot be converted is logged and skipped so one bad record
//! does not hide the rest of the result.

use tracing::{debug, warn};

use crate::domain::{
    Carrier, CarrierFlags, CarrierType, Leg, LegStop, Line, Location, Message, Place, Point,
    ProviderTime, TimeError, Trip,
};

use super::types::{
    JourneyResult, NearestStopAreaResult, RawJourney, RawLine, RawPoint, RawRealTimeInfo,
    RawRouteLink, StartEndPointResult,
};

/// Point type the provider uses for stations.
const STOP_AREA: &str = "STOP_AREA";

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Failed to parse a date-time string
    #[error("invalid date-time {value:?}: {source}")]
    InvalidTime {
        value: String,
        #[source]
        source: TimeError,
    },

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Result element does not match the expected shape
    #[error("cannot decode {endpoint} result: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },
}

/// Convert a station search result.
pub fn convert_stations(result: &StartEndPointResult) -> Vec<Point> {
    result
        .start_points
        .as_ref()
        .map(|list| convert_points(&list.point))
        .unwrap_or_default()
}

/// Convert a nearby station search result.
pub fn convert_nearby_stations(result: &NearestStopAreaResult) -> Vec<Point> {
    result
        .nearest_stop_areas
        .as_ref()
        .map(|list| convert_points(&list.nearest_stop_area))
        .unwrap_or_default()
}

/// Convert a trip search result.
///
/// Journeys without route links are dropped; journeys that fail to convert
/// are logged and skipped.
pub fn convert_trips(result: &JourneyResult) -> Vec<Trip> {
    let journeys = result
        .journeys
        .as_ref()
        .map(|list| list.journey.as_slice())
        .unwrap_or(&[]);

    let mut trips = Vec::with_capacity(journeys.len());

    for journey in journeys {
        let sequence_no = journey.sequence_no.as_deref().unwrap_or("?");
        match convert_journey(journey) {
            Ok(Some(trip)) => trips.push(trip),
            Ok(None) => debug!(sequence_no, "dropping journey without route links"),
            Err(e) => warn!(sequence_no, error = %e, "skipping journey"),
        }
    }

    trips
}

/// Convert a list of raw points, preserving order.
pub fn convert_points(raw: &[RawPoint]) -> Vec<Point> {
    raw.iter().map(convert_point).collect()
}

/// Convert a single point.
///
/// A point with no type, or of type `STOP_AREA`, is a station.
pub fn convert_point(raw: &RawPoint) -> Point {
    let place = Place::new(
        raw.id.clone().unwrap_or_default(),
        raw.name.clone().unwrap_or_default(),
        Location::from_rt90(raw.x, raw.y),
    );

    match raw.point_type.as_deref() {
        None | Some("") | Some(STOP_AREA) => Point::Station(place),
        Some(_) => Point::GeoPoint(place),
    }
}

/// Convert a journey into a trip.
///
/// Returns `Ok(None)` when the journey has no route links.
pub fn convert_journey(raw: &RawJourney) -> Result<Option<Trip>, ConversionError> {
    let Some(route_links) = raw.route_links.as_ref() else {
        return Ok(None);
    };

    let legs = route_links
        .route_link
        .iter()
        .map(convert_route_link)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Trip::new(legs).ok())
}

/// Convert a route link into a leg.
pub fn convert_route_link(link: &RawRouteLink) -> Result<Leg, ConversionError> {
    Ok(Leg {
        from: convert_leg_stop(link, StopSide::Departure)?,
        to: convert_leg_stop(link, StopSide::Arrival)?,
        carrier: convert_carrier(link),
        messages: convert_messages(link),
    })
}

/// Which end of a route link a stop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopSide {
    Departure,
    Arrival,
}

impl StopSide {
    fn point(self, link: &RawRouteLink) -> Option<&RawPoint> {
        match self {
            StopSide::Departure => link.from.as_ref(),
            StopSide::Arrival => link.to.as_ref(),
        }
    }

    fn date_time(self, link: &RawRouteLink) -> Option<&str> {
        match self {
            StopSide::Departure => link.dep_date_time.as_deref(),
            StopSide::Arrival => link.arr_date_time.as_deref(),
        }
    }

    fn is_timing_point(self, link: &RawRouteLink) -> bool {
        match self {
            StopSide::Departure => link.dep_is_timing_point,
            StopSide::Arrival => link.arr_is_timing_point,
        }
    }

    fn new_point(self, info: &RawRealTimeInfo) -> Option<&str> {
        match self {
            StopSide::Departure => info.new_dep_point.as_deref(),
            StopSide::Arrival => info.new_arr_point.as_deref(),
        }
    }

    fn point_field(self) -> &'static str {
        match self {
            StopSide::Departure => "From",
            StopSide::Arrival => "To",
        }
    }

    fn date_time_field(self) -> &'static str {
        match self {
            StopSide::Departure => "DepDateTime",
            StopSide::Arrival => "ArrDateTime",
        }
    }
}

/// Entries of the link's `RealTime` collection in document order.
fn realtime_collection(link: &RawRouteLink) -> impl Iterator<Item = &RawRealTimeInfo> {
    link.real_time
        .iter()
        .flat_map(|list| list.real_time_info.iter())
}

/// Every realtime block of a link, the collection followed by a direct `RealTimeInfo`.
fn realtime_infos(link: &RawRouteLink) -> impl Iterator<Item = &RawRealTimeInfo> {
    realtime_collection(link).chain(link.real_time_info.iter())
}

fn convert_leg_stop(link: &RawRouteLink, side: StopSide) -> Result<LegStop, ConversionError> {
    let point = side
        .point(link)
        .ok_or(ConversionError::MissingField(side.point_field()))?;

    let value = side
        .date_time(link)
        .ok_or(ConversionError::MissingField(side.date_time_field()))?;
    let planned_date = ProviderTime::parse(value).map_err(|source| ConversionError::InvalidTime {
        value: value.to_string(),
        source,
    })?;

    // Timing points report the live time in the same field
    let real_time_date = side.is_timing_point(link).then_some(planned_date);

    Ok(LegStop {
        point: convert_point(point),
        track: track(link, point, side),
        planned_date,
        real_time_date,
    })
}

/// The planned stop point, overridden by realtime track changes (last wins).
fn track(link: &RawRouteLink, point: &RawPoint, side: StopSide) -> Option<String> {
    realtime_collection(link)
        .filter_map(|info| side.new_point(info))
        .filter(|p| !p.is_empty())
        .last()
        .or(point.stop_point.as_deref())
        .map(str::to_string)
}

/// Build the carrier for a route link.
pub fn convert_carrier(link: &RawRouteLink) -> Carrier {
    let default_line = RawLine::default();
    let raw = link.line.as_ref().unwrap_or(&default_line);

    let carrier_type = raw
        .transport_mode_id
        .map(CarrierType::from_mode_id)
        .unwrap_or(CarrierType::Unknown);

    let name_parts = match carrier_type {
        CarrierType::Train => [raw.name.as_deref(), raw.train_no.as_deref()],
        _ => [raw.transport_mode_name.as_deref(), raw.name.as_deref()],
    };
    let name = name_parts
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    Carrier {
        name,
        heading: raw.towards.clone().unwrap_or_default(),
        carrier_type,
        line: convert_line(raw),
        cancelled: realtime_infos(link).any(|info| info.canceled),
        flags: CarrierFlags {
            accessibility: link.accessibility.is_some_and(|a| a > 0),
            needs_booking: link.call_trip,
        },
    }
}

/// Line name is the line number, falling back to the train number.
pub fn convert_line(raw: &RawLine) -> Line {
    let name = [raw.no.as_deref(), raw.train_no.as_deref()]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_default();

    Line::new(name)
}

/// Deviation details; deviations without details are ignored.
pub fn convert_messages(link: &RawRouteLink) -> Vec<Message> {
    link.deviations
        .iter()
        .flat_map(|list| list.deviation.iter())
        .filter_map(|d| d.details.as_deref())
        .map(Message::new)
        .collect()
}
