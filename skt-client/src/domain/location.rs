//! Geographic location type.

use serde::Serialize;

use crate::geo::{Rt90, Wgs84, to_wgs84};

/// A WGS84 location that may be unknown.
///
/// Latitude and longitude are either both present or both absent; an absent
/// pair is the "unknown location" value.
///
/// # Examples
///
/// ```
/// use skt_client::domain::Location;
///
/// let known = Location::new(55.6, 13.0);
/// assert!(known.is_known());
///
/// // Either coordinate missing gives an unknown location
/// assert!(!Location::from_rt90(Some(6_167_930.0), None).is_known());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Location {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl Location {
    /// A known location in WGS84 degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// The unknown location.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Build a location from RT90 grid coordinates.
    ///
    /// Returns the unknown location unless both coordinates are present
    /// and finite.
    pub fn from_rt90(x: Option<f64>, y: Option<f64>) -> Self {
        match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => {
                to_wgs84(Rt90::new(x, y)).into()
            }
            _ => Self::unknown(),
        }
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    pub fn is_known(&self) -> bool {
        self.latitude.is_some()
    }

    /// Returns the position, if known.
    pub fn wgs84(&self) -> Option<Wgs84> {
        Some(Wgs84::new(self.latitude?, self.longitude?))
    }
}

impl From<Wgs84> for Location {
    fn from(pos: Wgs84) -> Self {
        Self::new(pos.lat, pos.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_has_no_coordinates() {
        let loc = Location::unknown();
        assert!(!loc.is_known());
        assert_eq!(loc.latitude(), None);
        assert_eq!(loc.longitude(), None);
        assert_eq!(loc.wgs84(), None);
    }

    #[test]
    fn from_rt90_converts() {
        let loc = Location::from_rt90(Some(6_167_930.0), Some(1_323_215.0));
        let pos = loc.wgs84().unwrap();
        assert!((pos.lat - 55.61).abs() < 0.02);
        assert!((pos.lon - 13.0).abs() < 0.03);
    }

    #[test]
    fn from_rt90_requires_both() {
        assert_eq!(Location::from_rt90(None, Some(1.0)), Location::unknown());
        assert_eq!(Location::from_rt90(Some(1.0), None), Location::unknown());
        assert_eq!(Location::from_rt90(None, None), Location::unknown());
        assert_eq!(
            Location::from_rt90(Some(f64::NAN), Some(1_323_215.0)),
            Location::unknown()
        );
    }

    #[test]
    fn serializes_both_fields() {
        let json = serde_json::to_value(Location::unknown()).unwrap();
        assert_eq!(json, serde_json::json!({"latitude": null, "longitude": null}));

        let json = serde_json::to_value(Location::new(55.5, 13.25)).unwrap();
        assert_eq!(json, serde_json::json!({"latitude": 55.5, "longitude": 13.25}));
    }
}
