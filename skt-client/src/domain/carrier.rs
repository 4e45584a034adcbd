//! Carrier (vehicle/service) and line types.

use serde::Serialize;

/// Foreground color used for every SKT line; the API carries no styling.
pub const DEFAULT_LINE_FG: &str = "#ffffff";

/// Background color used for every SKT line.
pub const DEFAULT_LINE_BG: &str = "#555555";

/// Mode of transport for a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CarrierType {
    Walk,
    Bus,
    Train,
    Boat,
    Unknown,
}

impl CarrierType {
    /// Classify an SKT transport mode id.
    ///
    /// # Examples
    ///
    /// ```
    /// use skt_client::domain::CarrierType;
    ///
    /// assert_eq!(CarrierType::from_mode_id(0), CarrierType::Walk);
    /// assert_eq!(CarrierType::from_mode_id(16), CarrierType::Bus);
    /// assert_eq!(CarrierType::from_mode_id(4), CarrierType::Train);
    /// assert_eq!(CarrierType::from_mode_id(32), CarrierType::Unknown);
    /// ```
    pub fn from_mode_id(mode_id: i64) -> Self {
        match mode_id {
            0 => CarrierType::Walk,
            1 | 2 | 16 => CarrierType::Bus,
            4 => CarrierType::Train,
            8 => CarrierType::Boat,
            _ => CarrierType::Unknown,
        }
    }
}

/// A public transport line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub name: String,
    pub color_fg: &'static str,
    pub color_bg: &'static str,
}

impl Line {
    /// A line with the default SKT colors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color_fg: DEFAULT_LINE_FG,
            color_bg: DEFAULT_LINE_BG,
        }
    }
}

/// Service properties of a carrier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CarrierFlags {
    /// Vehicle is wheelchair accessible.
    pub accessibility: bool,
    /// Trip must be booked in advance (demand-responsive service).
    pub needs_booking: bool,
}

/// The vehicle or service that carries a traveller over a leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Carrier {
    /// Display name, e.g. "Stadsbuss 5" or "Öresundståg 1042".
    pub name: String,
    /// Destination display.
    pub heading: String,
    #[serde(rename = "type")]
    pub carrier_type: CarrierType,
    pub line: Line,
    pub cancelled: bool,
    pub flags: CarrierFlags,
}
