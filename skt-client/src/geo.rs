//! RT90 2.5 gon V ↔ WGS84 coordinate conversion.
//!
//! SKT reports positions in RT90 2.5 gon V, the legacy Swedish national
//! grid. RT90 is a Gauss-Krüger (transverse Mercator) projection; the
//! conversion here uses the national survey's parameter set for RT90 2.5 gon V
//! expressed on the GRS80 ellipsoid. Its adjusted central meridian, scale
//! factor and false origin absorb the Bessel 1841 → WGS84 datum shift, so the
//! projection maps straight between the grid and WGS84 degrees.
//!
//! In RT90, `x` is the northing and `y` the easting.

use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wgs84 {
    pub lat: f64,
    pub lon: f64,
}

impl Wgs84 {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// An RT90 2.5 gon V grid position in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rt90 {
    /// Northing.
    pub x: f64,
    /// Easting.
    pub y: f64,
}

impl Rt90 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Parameters of a Gauss-Krüger grid.
#[derive(Debug, Clone, Copy)]
struct GridProjection {
    /// Semi-major axis of the ellipsoid (metres).
    axis: f64,
    flattening: f64,
    /// Central meridian in degrees.
    central_meridian: f64,
    scale: f64,
    false_northing: f64,
    false_easting: f64,
}

/// RT90 2.5 gon V on GRS80 (national survey parameters).
const RT90_2_5_GON_V: GridProjection = GridProjection {
    axis: 6_378_137.0,
    flattening: 1.0 / 298.257_222_101,
    central_meridian: 15.0 + 48.0 / 60.0 + 22.624_306 / 3600.0,
    scale: 1.000_005_610_24,
    false_northing: -667.711,
    false_easting: 1_500_064.274,
};

impl GridProjection {
    fn e2(&self) -> f64 {
        self.flattening * (2.0 - self.flattening)
    }

    fn n(&self) -> f64 {
        self.flattening / (2.0 - self.flattening)
    }

    /// Scaled rectifying radius: `k0 * a / (1 + n) * (1 + n²/4 + n⁴/64)`.
    fn scaled_radius(&self) -> f64 {
        let n = self.n();
        self.scale * self.axis / (1.0 + n) * (1.0 + n.powi(2) / 4.0 + n.powi(4) / 64.0)
    }

    fn geodetic_to_grid(&self, lat: f64, lon: f64) -> (f64, f64) {
        let e2 = self.e2();
        let n = self.n();

        let a = e2;
        let b = (5.0 * e2.powi(2) - e2.powi(3)) / 6.0;
        let c = (104.0 * e2.powi(3) - 45.0 * e2.powi(4)) / 120.0;
        let d = (1237.0 * e2.powi(4)) / 1260.0;

        let betas = [
            n / 2.0 - 2.0 * n.powi(2) / 3.0 + 5.0 * n.powi(3) / 16.0 + 41.0 * n.powi(4) / 180.0,
            13.0 * n.powi(2) / 48.0 - 3.0 * n.powi(3) / 5.0 + 557.0 * n.powi(4) / 1440.0,
            61.0 * n.powi(3) / 240.0 - 103.0 * n.powi(4) / 140.0,
            49561.0 * n.powi(4) / 161_280.0,
        ];

        let phi = lat.to_radians();
        let sin_phi = phi.sin();
        let phi_star = phi
            - sin_phi
                * phi.cos()
                * (a + b * sin_phi.powi(2) + c * sin_phi.powi(4) + d * sin_phi.powi(6));
        let delta_lambda = (lon - self.central_meridian).to_radians();

        let xi_prime = (phi_star.tan() / delta_lambda.cos()).atan();
        let eta_prime = (phi_star.cos() * delta_lambda.sin()).atanh();

        let mut xi = xi_prime;
        let mut eta = eta_prime;
        for (i, beta) in betas.iter().enumerate() {
            let m = 2.0 * (i + 1) as f64;
            xi += beta * (m * xi_prime).sin() * (m * eta_prime).cosh();
            eta += beta * (m * xi_prime).cos() * (m * eta_prime).sinh();
        }

        let k = self.scaled_radius();
        (k * xi + self.false_northing, k * eta + self.false_easting)
    }

    fn grid_to_geodetic(&self, x: f64, y: f64) -> (f64, f64) {
        let e2 = self.e2();
        let n = self.n();

        let deltas = [
            n / 2.0 - 2.0 * n.powi(2) / 3.0 + 37.0 * n.powi(3) / 96.0 - n.powi(4) / 360.0,
            n.powi(2) / 48.0 + n.powi(3) / 15.0 - 437.0 * n.powi(4) / 1440.0,
            17.0 * n.powi(3) / 480.0 - 37.0 * n.powi(4) / 840.0,
            4397.0 * n.powi(4) / 161_280.0,
        ];

        let a_star = e2 + e2.powi(2) + e2.powi(3) + e2.powi(4);
        let b_star = -(7.0 * e2.powi(2) + 17.0 * e2.powi(3) + 30.0 * e2.powi(4)) / 6.0;
        let c_star = (224.0 * e2.powi(3) + 889.0 * e2.powi(4)) / 120.0;
        let d_star = -(4279.0 * e2.powi(4)) / 1260.0;

        let k = self.scaled_radius();
        let xi = (x - self.false_northing) / k;
        let eta = (y - self.false_easting) / k;

        let mut xi_prime = xi;
        let mut eta_prime = eta;
        for (i, delta) in deltas.iter().enumerate() {
            let m = 2.0 * (i + 1) as f64;
            xi_prime -= delta * (m * xi).sin() * (m * eta).cosh();
            eta_prime -= delta * (m * xi).cos() * (m * eta).sinh();
        }

        let phi_star = (xi_prime.sin() / eta_prime.cosh()).asin();
        let delta_lambda = (eta_prime.sinh() / xi_prime.cos()).atan();

        let sin_phi = phi_star.sin();
        let phi = phi_star
            + sin_phi
                * phi_star.cos()
                * (a_star
                    + b_star * sin_phi.powi(2)
                    + c_star * sin_phi.powi(4)
                    + d_star * sin_phi.powi(6));

        (
            phi.to_degrees(),
            self.central_meridian + delta_lambda.to_degrees(),
        )
    }
}

/// Convert an RT90 2.5 gon V grid position to WGS84.
///
/// # Examples
///
/// ```
/// use skt_client::geo::{Rt90, to_wgs84};
///
/// // Stockholm Central
/// let pos = to_wgs84(Rt90::new(6_580_822.0, 1_628_550.0));
/// assert!((pos.lat - 59.33).abs() < 0.01);
/// assert!((pos.lon - 18.06).abs() < 0.01);
/// ```
pub fn to_wgs84(point: Rt90) -> Wgs84 {
    let (lat, lon) = RT90_2_5_GON_V.grid_to_geodetic(point.x, point.y);
    Wgs84 { lat, lon }
}

/// Convert a WGS84 position to the RT90 2.5 gon V grid.
pub fn from_wgs84(point: Wgs84) -> Rt90 {
    let (x, y) = RT90_2_5_GON_V.geodetic_to_grid(point.lat, point.lon);
    Rt90 { x, y }
}
