use crate::error::MissionError;
use crate::lat_long::LatitudeLongitude;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// WGS84 semi-major axis, the sphere Web Mercator is defined on.
const MERCATOR_RADIUS: f64 = 6_378_137.0;

/// Latitude where the Web Mercator square ends: `atan(sinh(PI))` in degrees.
const MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;

/// Coordinate reference system of `[x, y]` pairs in mission and drawing files.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub enum Projection {
    /// EPSG:4326, `[lon, lat]` in degrees.
    #[default]
    Geographic,
    /// EPSG:3857, `[x, y]` in meters as reported by web maps.
    WebMercator,
}

impl Projection {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Geographic => "EPSG:4326",
            Self::WebMercator => "EPSG:3857",
        }
    }

    pub fn to_lat_long(&self, [x, y]: [f64; 2]) -> LatitudeLongitude {
        match self {
            Self::Geographic => LatitudeLongitude::from_lon_lat([x, y]),
            Self::WebMercator => {
                let lon = x / MERCATOR_RADIUS * 180.0 / PI;
                let lat = (2.0 * (y / MERCATOR_RADIUS).exp().atan() - PI / 2.0) * 180.0 / PI;
                LatitudeLongitude(lat, lon)
            }
        }
    }

    pub fn from_lat_long(&self, point: LatitudeLongitude) -> [f64; 2] {
        match self {
            Self::Geographic => point.to_lon_lat(),
            Self::WebMercator => {
                let lat = point.0.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT);
                let x = MERCATOR_RADIUS * point.1 * PI / 180.0;
                let y = MERCATOR_RADIUS * (PI / 4.0 + lat * PI / 360.0).tan().ln();
                [x, y]
            }
        }
    }
}

impl FromStr for Projection {
    type Err = MissionError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.trim().to_ascii_uppercase().as_str() {
            "EPSG:4326" | "WGS84" => Ok(Self::Geographic),
            "EPSG:3857" | "EPSG:900913" => Ok(Self::WebMercator),
            _ => Err(MissionError::UnsupportedProjection(code.to_string())),
        }
    }
}

impl TryFrom<String> for Projection {
    type Error = MissionError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

impl From<Projection> for String {
    fn from(projection: Projection) -> Self {
        projection.code().to_string()
    }
}

impl Display for Projection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
