use clap::builder::{StringValueParser, TypedValueParser};
use clap::error::ErrorKind::ValueValidation;
use clap::{Arg, Command, Error};
use mission_planner::error::MissionError;
use mission_planner::lat_long::LatitudeLongitude;
use std::ffi::OsStr;

/// Parses `lat,lon` in decimal degrees.
#[derive(Clone)]
pub struct LatLongValueParser;

impl TypedValueParser for LatLongValueParser {
    type Value = LatitudeLongitude;

    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, Error> {
        StringValueParser::new()
            .parse_ref(cmd, arg, value)
            .and_then(|value| {
                parse_lat_long(&value).map_err(|error| Error::raw(ValueValidation, format!("{error}\n")))
            })
    }
}

pub fn parse_lat_long(text: &str) -> Result<LatitudeLongitude, MissionError> {
    let malformed = || MissionError::MalformedCoordinate(text.to_string());
    let (lat, lon) = text.split_once(',').ok_or_else(malformed)?;
    let lat = lat.trim().parse().map_err(|_| malformed())?;
    let lon = lon.trim().parse().map_err(|_| malformed())?;
    Ok(LatitudeLongitude(lat, lon))
}
