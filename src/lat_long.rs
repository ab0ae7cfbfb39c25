use std::f64::consts::PI;

/// Mean Earth radius in meters used for all great-circle distances.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Largest distance [`distance_meters`] can report: half the circumference.
pub const MAX_DISTANCE_METERS: f64 = PI * EARTH_RADIUS_METERS;

/// A geodetic point in decimal degrees, latitude first.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatitudeLongitude(pub f64, pub f64);

impl LatitudeLongitude {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    /// Builds a point from a map-ordered `[lon, lat]` pair.
    pub fn from_lon_lat([lon, lat]: [f64; 2]) -> Self {
        Self(lat, lon)
    }

    pub fn to_lon_lat(&self) -> [f64; 2] {
        [self.1, self.0]
    }

    pub fn haversine_distance(&self, other: &LatitudeLongitude) -> f64 {
        distance_meters(self.0, self.1, other.0, other.1)
    }

    /// Rounds both components to 5 decimals, the precision shown in tables.
    pub fn rounded(&self) -> Self {
        Self(round5(self.0), round5(self.1))
    }
}

fn round5(value: f64) -> f64 {
    (value * 1e5).round() / 1e5
}

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Great-circle distance in meters between two points given in decimal degrees.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_METERS`].
/// Inputs are not range checked; non-finite inputs propagate as NaN.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = to_radians(lat1);
    let lon1 = to_radians(lon1);
    let lat2 = to_radians(lat2);
    let lon2 = to_radians(lon2);

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for near-antipodal points. NaN passes through.
    let a = if a > 1.0 { 1.0 } else { a };
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}
