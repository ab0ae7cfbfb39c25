use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq)]
pub enum MissionError {
    WaypointOutOfRange { index: usize, len: usize },
    EmptyPerimeter,
    UnsupportedProjection(String),
    MalformedCoordinate(String),
}

impl Display for MissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WaypointOutOfRange { index, len } => f.write_fmt(format_args!(
                "Waypoint {} doesn't exist. The route has {len} waypoints.",
                index + 1
            )),
            Self::EmptyPerimeter => f.write_str("Polygon perimeter has no vertices."),
            Self::UnsupportedProjection(code) => f.write_fmt(format_args!(
                "Unsupported projection {code}. Expected EPSG:4326 or EPSG:3857."
            )),
            Self::MalformedCoordinate(text) => f.write_fmt(format_args!(
                "Expected a coordinate in the form lat,lon but got {text:?}."
            )),
        }
    }
}

impl Error for MissionError {}
