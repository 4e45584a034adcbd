//! Trip, leg and leg stop types.

use chrono::Duration;
use serde::Serialize;

use super::{Carrier, CarrierType, DomainError, Point, ProviderTime};

/// A deviation message attached to a leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Message(String);

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One end of a leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegStop {
    pub point: Point,
    /// Platform or stop point, realtime-corrected when the provider knows better.
    pub track: Option<String>,
    pub planned_date: ProviderTime,
    /// Present only when the stop is a realtime timing point.
    pub real_time_date: Option<ProviderTime>,
}

impl LegStop {
    /// Best known time: realtime if available, else planned.
    pub fn expected_date(&self) -> ProviderTime {
        self.real_time_date.unwrap_or(self.planned_date)
    }

    /// Realtime minus planned, if a realtime time is known.
    pub fn delay(&self) -> Option<Duration> {
        self.real_time_date
            .map(|rt| rt.signed_duration_since(self.planned_date))
    }
}

/// A single vehicle (or walk) segment of a trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    pub from: LegStop,
    pub to: LegStop,
    pub carrier: Carrier,
    pub messages: Vec<Message>,
}

impl Leg {
    pub fn departure(&self) -> ProviderTime {
        self.from.expected_date()
    }

    pub fn arrival(&self) -> ProviderTime {
        self.to.expected_date()
    }
}

/// A journey from origin to destination.
///
/// # Invariants
///
/// - Has at least one leg
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    legs: Vec<Leg>,
}

impl Trip {
    /// Construct a trip from its legs in travel order.
    ///
    /// # Errors
    ///
    /// Returns `Err(DomainError::EmptyTrip)` if `legs` is empty.
    pub fn new(legs: Vec<Leg>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyTrip);
        }
        Ok(Self { legs })
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn first_leg(&self) -> &Leg {
        // Safe: non-empty by construction
        &self.legs[0]
    }

    pub fn last_leg(&self) -> &Leg {
        // Safe: non-empty by construction
        &self.legs[self.legs.len() - 1]
    }

    pub fn departure(&self) -> ProviderTime {
        self.first_leg().departure()
    }

    pub fn arrival(&self) -> ProviderTime {
        self.last_leg().arrival()
    }

    pub fn duration(&self) -> Duration {
        self.arrival().signed_duration_since(self.departure())
    }

    /// Number of vehicle changes, not counting walks.
    pub fn changes(&self) -> usize {
        self.legs
            .iter()
            .filter(|leg| leg.carrier.carrier_type != CarrierType::Walk)
            .count()
            .saturating_sub(1)
    }
}
