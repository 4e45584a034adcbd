//! Query parameters for the SKT endpoints.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime};

use crate::domain::{Point, PointKind};
use crate::geo::{self, Wgs84};

/// Trips returned when the caller does not ask for a number.
pub const DEFAULT_MAX_RESULTS: u32 = 6;

/// Nearby station search radius in meters.
pub const DEFAULT_NEARBY_RADIUS: u32 = 3000;

/// How far before "now" a trip search without a date starts.
const PAST_TRIP_SEARCH_MINUTES: i64 = 5;

/// A trip endpoint in the provider's `name|id|type` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointRef {
    pub name: String,
    pub id: String,
    pub kind: PointKind,
}

impl PointRef {
    pub fn new(name: impl Into<String>, id: impl Into<String>, kind: PointKind) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            kind,
        }
    }

    /// Encode as a `selPointFr`/`selPointTo` value.
    ///
    /// ```
    /// use skt_client::domain::PointKind;
    /// use skt_client::skt::PointRef;
    ///
    /// let point = PointRef::new("Malmö C", "80000", PointKind::Station);
    /// assert_eq!(point.param(), "Malmö C|80000|0");
    /// ```
    pub fn param(&self) -> String {
        let kind = match self.kind {
            PointKind::Station => 0,
            PointKind::GeoPoint => 1,
        };
        format!("{}|{}|{}", self.name, self.id, kind)
    }
}

impl fmt::Display for PointRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.param())
    }
}

impl From<&Point> for PointRef {
    fn from(point: &Point) -> Self {
        Self::new(point.name(), point.id(), point.kind())
    }
}

/// Error parsing a [`PointRef`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid point {input:?}: expected name|id|type with type 0 or 1")]
pub struct PointRefError {
    input: String,
}

impl FromStr for PointRef {
    type Err = PointRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PointRefError {
            input: s.to_string(),
        };

        // Names may contain '|', ids and types never do
        let (rest, kind) = s.rsplit_once('|').ok_or_else(err)?;
        let (name, id) = rest.rsplit_once('|').ok_or_else(err)?;
        let kind = match kind {
            "0" => PointKind::Station,
            "1" => PointKind::GeoPoint,
            _ => return Err(err()),
        };
        if id.is_empty() {
            return Err(err());
        }

        Ok(Self::new(name, id, kind))
    }
}

/// A trip search.
#[derive(Debug, Clone, PartialEq)]
pub struct TripQuery {
    pub from: PointRef,
    pub to: PointRef,
    /// Local departure time; defaults to shortly before now.
    pub date: Option<NaiveDateTime>,
    pub max_results: Option<u32>,
}

impl TripQuery {
    pub fn new(from: PointRef, to: PointRef) -> Self {
        Self {
            from,
            to,
            date: None,
            max_results: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_max_results(mut self, n: u32) -> Self {
        self.max_results = Some(n);
        self
    }
}

pub type Params = Vec<(&'static str, String)>;

/// Parameters for a station search.
pub fn stations_params(query: &str) -> Params {
    vec![
        ("inpPointFr", query.to_string()),
        ("inpPointTo", "abc".to_string()),
    ]
}

/// Parameters for a nearby station search.
///
/// The location is sent as whole RT90 meters.
pub fn nearby_stations_params(location: Wgs84, radius: Option<u32>) -> Params {
    let grid = geo::from_wgs84(location);
    vec![
        ("r", radius.unwrap_or(DEFAULT_NEARBY_RADIUS).to_string()),
        ("x", format!("{:.0}", grid.x)),
        ("y", format!("{:.0}", grid.y)),
    ]
}

/// Parameters for a trip search.
///
/// `now` is the provider-local current time, used when the query has no date.
pub fn trip_params(query: &TripQuery, now: NaiveDateTime) -> Params {
    let date = query
        .date
        .unwrap_or(now - Duration::minutes(PAST_TRIP_SEARCH_MINUTES));

    vec![
        (
            "NoOf",
            query.max_results.unwrap_or(DEFAULT_MAX_RESULTS).to_string(),
        ),
        ("cmdAction", "search".to_string()),
        ("selPointFr", query.from.param()),
        ("selPointTo", query.to.param()),
        ("inpDate", date.format("%y%m%d").to_string()),
        ("inpTime", date.format("%H:%M").to_string()),
    ]
}
