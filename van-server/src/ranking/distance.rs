//! Short-range distance between two coordinates
//!
//! Equirectangular approximation with latitude-dependent metres per degree.
//! Good to well under a percent at city scale, which is all the van search
//! needs.

use std::f64::consts::PI;

const EARTH_RADIUS_LON_M: f64 = 6_367_449.0;

/// A WGS84 position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build from a stored `[longitude, latitude]` pair
    pub const fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self {
            lat: pair[1],
            lon: pair[0],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Metres per degree of latitude at `lat_mid` (radians)
fn metres_per_degree_lat(lat_mid: f64) -> f64 {
    111_132.954 - 559.822 * (2.0 * lat_mid).cos() + 1.175 * (4.0 * lat_mid).cos()
}

/// Metres per degree of longitude at `lat_mid` (radians)
fn metres_per_degree_lon(lat_mid: f64) -> f64 {
    (PI / 180.0) * EARTH_RADIUS_LON_M * lat_mid.cos()
}

/// Distance in metres. Symmetric in its arguments.
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_dist = a.lat - b.lat;
    let lon_dist = a.lon - b.lon;
    let lat_mid = ((a.lat + b.lat) / 2.0).to_radians();

    let dy = lat_dist * metres_per_degree_lat(lat_mid);
    let dx = lon_dist * metres_per_degree_lon(lat_mid);
    (dy * dy + dx * dx).sqrt()
}
