//! Skånetrafiken (SKT) open API client.
//!
//! The API answers in SOAP XML. A response goes through these steps:
//! - the XML is converted to JSON ([`crate::xml`])
//! - the endpoint's result element is unwrapped from `Envelope.Body` and
//!   checked for a provider error code
//! - the result is decoded into the DTOs in [`types`], normalizing
//!   single-vs-repeated elements and string leaves on the way
//! - the DTOs are converted to domain types
//!
//! Positions arrive in the RT90 grid and are projected to WGS84. Times are
//! provider-local and carry no offset.

mod client;
mod convert;
mod endpoint;
mod envelope;
mod error;
mod normalize;
mod query;
pub mod types;

pub use client::{DEFAULT_BASE_URL, SktClient, SktConfig};
pub use convert::{
    ConversionError, StopSide, convert_carrier, convert_journey, convert_line, convert_messages,
    convert_nearby_stations, convert_point, convert_points, convert_route_link, convert_stations,
    convert_trips,
};
pub use endpoint::{
    Endpoint, NearbyStations, Stations, Trips, endpoint_error, map_endpoint, nearby_stations,
    nearby_stations_error, parse_response, stations, stations_error, trips, trips_error,
};
pub use envelope::{INTERNAL_ERROR, ResponseError, extract_error, unwrap};
pub use error::SktError;
pub use normalize::{
    OneOrMany, flag, force_array, lenient_f64, lenient_i64, lenient_string, object_or_none,
    one_or_many,
};
pub use query::{
    DEFAULT_MAX_RESULTS, DEFAULT_NEARBY_RADIUS, Params, PointRef, PointRefError, TripQuery,
    nearby_stations_params, stations_params, trip_params,
};
