//! Skånetrafiken journey planner client.
//!
//! Normalizes the SKT open API's SOAP responses into provider-agnostic
//! stations, trips, legs and carriers, and converts between the RT90 grid
//! and WGS84.

pub mod domain;
pub mod geo;
pub mod skt;
pub mod xml;
