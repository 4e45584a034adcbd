//! Stations and geo points.

use serde::Serialize;

use super::Location;

/// Tag identifying SKT as the provider of a point.
pub const PROVIDER_ID: &str = "skt";

/// Data shared by every kind of point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    id: String,
    name: String,
    location: Location,
    provider_id: &'static str,
}

impl Place {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Location) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            provider_id: PROVIDER_ID,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn provider_id(&self) -> &'static str {
        self.provider_id
    }
}

/// Which variant of [`Point`] a value is, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    Station,
    GeoPoint,
}

/// A place a journey can start or end at.
///
/// A `Station` is a stop area served by public transport; a `GeoPoint` is
/// an address or point of interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Point {
    Station(Place),
    GeoPoint(Place),
}

impl Point {
    pub fn place(&self) -> &Place {
        match self {
            Point::Station(place) | Point::GeoPoint(place) => place,
        }
    }

    pub fn kind(&self) -> PointKind {
        match self {
            Point::Station(_) => PointKind::Station,
            Point::GeoPoint(_) => PointKind::GeoPoint,
        }
    }

    pub fn is_station(&self) -> bool {
        self.kind() == PointKind::Station
    }

    pub fn id(&self) -> &str {
        self.place().id()
    }

    pub fn name(&self) -> &str {
        self.place().name()
    }

    pub fn location(&self) -> &Location {
        self.place().location()
    }
}
