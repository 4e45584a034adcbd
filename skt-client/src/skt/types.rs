//! SKT API response DTOs.
//!
//! These types map the unwrapped `*Result` element of each endpoint. The JSON
//! comes from XML, so every leaf is decoded leniently and every repeated
//! element goes through [`one_or_many`]. Containers the provider leaves empty
//! (`<RouteLinks/>`) read as `None`.

use serde::Deserialize;

use super::normalize::{flag, lenient_f64, lenient_i64, lenient_string, object_or_none, one_or_many};

/// Result of `GetStartEndPoint` (station search).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartEndPointResult {
    #[serde(default, deserialize_with = "object_or_none")]
    pub start_points: Option<PointList>,
}

/// A list of `Point` elements.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PointList {
    #[serde(default, deserialize_with = "one_or_many")]
    pub point: Vec<RawPoint>,
}

/// Result of `GetNearestStopArea` (nearby stations).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NearestStopAreaResult {
    #[serde(default, deserialize_with = "object_or_none")]
    pub nearest_stop_areas: Option<NearestStopAreaList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NearestStopAreaList {
    #[serde(default, deserialize_with = "one_or_many")]
    pub nearest_stop_area: Vec<RawPoint>,
}

/// Result of `GetJourney` (trip search).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JourneyResult {
    #[serde(default, deserialize_with = "object_or_none")]
    pub journeys: Option<JourneyList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JourneyList {
    #[serde(default, deserialize_with = "one_or_many")]
    pub journey: Vec<RawJourney>,
}

/// One itinerary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawJourney {
    #[serde(default, deserialize_with = "lenient_string")]
    pub sequence_no: Option<String>,

    /// Absent for journeys the provider could not route.
    #[serde(default, deserialize_with = "object_or_none")]
    pub route_links: Option<RouteLinkList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteLinkList {
    #[serde(default, deserialize_with = "one_or_many")]
    pub route_link: Vec<RawRouteLink>,
}

/// A stop area, address or point of interest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawPoint {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    /// `STOP_AREA`, `ADDRESS`, `POI`; absent on nearby-station results.
    #[serde(rename = "Type", default, deserialize_with = "lenient_string")]
    pub point_type: Option<String>,

    /// RT90 northing.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub x: Option<f64>,

    /// RT90 easting.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub y: Option<f64>,

    /// Planned platform or stop position (route links only).
    #[serde(default, deserialize_with = "lenient_string")]
    pub stop_point: Option<String>,
}

/// One leg of a journey.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawRouteLink {
    #[serde(default, deserialize_with = "lenient_string")]
    pub dep_date_time: Option<String>,

    #[serde(default, deserialize_with = "flag")]
    pub dep_is_timing_point: bool,

    #[serde(default, deserialize_with = "lenient_string")]
    pub arr_date_time: Option<String>,

    #[serde(default, deserialize_with = "flag")]
    pub arr_is_timing_point: bool,

    /// Demand-responsive service that must be booked.
    #[serde(default, deserialize_with = "flag")]
    pub call_trip: bool,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub accessibility: Option<i64>,

    #[serde(default, deserialize_with = "object_or_none")]
    pub from: Option<RawPoint>,

    #[serde(default, deserialize_with = "object_or_none")]
    pub to: Option<RawPoint>,

    #[serde(default, deserialize_with = "object_or_none")]
    pub line: Option<RawLine>,

    #[serde(default, deserialize_with = "object_or_none")]
    pub real_time: Option<RealTimeList>,

    /// Some responses carry a single realtime block directly on the link.
    #[serde(default, deserialize_with = "object_or_none")]
    pub real_time_info: Option<RawRealTimeInfo>,

    #[serde(default, deserialize_with = "object_or_none")]
    pub deviations: Option<DeviationList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RealTimeList {
    #[serde(default, deserialize_with = "one_or_many")]
    pub real_time_info: Vec<RawRealTimeInfo>,
}

/// Realtime corrections for a route link.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawRealTimeInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub new_dep_point: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub new_arr_point: Option<String>,

    #[serde(default, deserialize_with = "flag")]
    pub canceled: bool,
}

/// Line (route) information.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawLine {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub no: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub train_no: Option<String>,

    #[serde(default, deserialize_with = "lenient_i64")]
    pub transport_mode_id: Option<i64>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub transport_mode_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub towards: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviationList {
    #[serde(default, deserialize_with = "one_or_many")]
    pub deviation: Vec<RawDeviation>,
}

/// A traffic deviation notice.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawDeviation {
    #[serde(default, deserialize_with = "lenient_string")]
    pub header: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub details: Option<String>,
}
