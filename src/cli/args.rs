use crate::cli::parser::LatLongValueParser;
use clap::{Parser, Subcommand};
use mission_planner::lat_long::LatitudeLongitude;
use mission_planner::projection::Projection;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Print rows as JSON instead of text tables
    #[arg(long, global = true)]
    pub json: bool,

    /// The path to a log4rs yaml logging configuration
    #[arg(long, global = true)]
    pub log_config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Great-circle distance in meters between two lat,lon points
    Distance {
        #[arg(allow_hyphen_values = true, value_parser = LatLongValueParser)]
        from: LatitudeLongitude,

        #[arg(allow_hyphen_values = true, value_parser = LatLongValueParser)]
        to: LatitudeLongitude,
    },

    /// Build a mission from a drawn line and print its route table
    Route {
        /// JSON array of [x, y] pairs
        line: PathBuf,

        /// Projection of the drawn coordinates
        #[arg(short, long, default_value = "EPSG:4326")]
        projection: Projection,

        /// Where to save the new mission
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the route table of a mission file
    Show {
        mission: PathBuf,

        /// Show the coordinates of attached polygons
        #[arg(short, long)]
        expand: bool,

        /// Only list the waypoint coordinates
        #[arg(short, long, conflicts_with = "expand")]
        summary: bool,
    },

    /// Draw a polygon starting at a waypoint and insert it into the mission
    Polygon {
        mission: PathBuf,

        /// JSON array of [x, y] pairs drawn after the waypoint
        perimeter: PathBuf,

        /// Waypoint number as shown in the route table
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        waypoint: u32,

        /// Insert the polygon before the waypoint
        #[arg(long, conflicts_with = "after")]
        before: bool,

        /// Insert the polygon after the waypoint (default)
        #[arg(long)]
        after: bool,

        /// Projection of the drawn coordinates
        #[arg(short, long, default_value = "EPSG:4326")]
        projection: Projection,

        /// Print the polygon table without inserting it
        #[arg(long)]
        discard: bool,

        /// Where to save the updated mission. Defaults to the mission file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
