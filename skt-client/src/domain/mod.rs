//! Provider-agnostic domain types.
//!
//! These are the values the SKT responses are normalized into. All types
//! enforce their invariants at construction time and are not mutated after
//! mapping, so code that receives them can trust their validity.

mod carrier;
mod error;
mod location;
mod point;
mod time;
mod trip;

pub use carrier::{Carrier, CarrierFlags, CarrierType, DEFAULT_LINE_BG, DEFAULT_LINE_FG, Line};
pub use error::DomainError;
pub use location::Location;
pub use point::{PROVIDER_ID, Place, Point, PointKind};
pub use time::{ProviderTime, TimeError};
pub use trip::{Leg, LegStop, Message, Trip};
