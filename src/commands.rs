use crate::cli::args::Command;
use log::{debug, info};
use mission_planner::json_data::{read_drawing, read_mission, write_mission};
use mission_planner::lat_long::LatitudeLongitude;
use mission_planner::mission::{FinishedPolygon, Mission, Placement};
use mission_planner::table::{
    polygon_rows, render_polygon_table, render_route_table, render_summary, route_rows,
    summary_rows,
};
use serde::Serialize;
use std::path::Path;

/// Runs a subcommand and returns what should be printed.
pub fn run_command(command: Command, json: bool) -> anyhow::Result<String> {
    match command {
        Command::Distance { from, to } => distance(from, to, json),
        Command::Route {
            line,
            projection,
            output,
        } => {
            let mission = Mission::from_route(read_drawing(&line, projection)?);
            info!("Drew a route with {} waypoints", mission.len());
            if let Some(output) = output {
                write_mission(&output, &mission)?;
            }
            show(&mission, true, false, json)
        }
        Command::Show {
            mission,
            expand,
            summary,
        } => show(&read_mission(&mission)?, expand, summary, json),
        Command::Polygon {
            mission: mission_path,
            perimeter,
            waypoint,
            before,
            after: _,
            projection,
            discard,
            output,
        } => {
            let mut mission = read_mission(&mission_path)?;
            let placement = if before {
                Placement::Before
            } else {
                Placement::After
            };
            let mut draft = mission.start_polygon(waypoint as usize - 1, placement)?;
            draft.extend(read_drawing(&perimeter, projection)?);
            if discard {
                let draft = draft.discard();
                info!(
                    "Discarded polygon at waypoint {}, {} vertex left",
                    waypoint,
                    draft.vertices().len()
                );
                return render(polygon_rows(draft.vertices()).as_slice(), json, render_polygon_table);
            }
            let polygon = draft.finish();
            let out = render(polygon_rows(&polygon.perimeter).as_slice(), json, render_polygon_table)?;
            let output = output.as_deref().unwrap_or(mission_path.as_path());
            insert_and_save(&mut mission, polygon, output, output != mission_path.as_path())?;
            Ok(out)
        }
    }
}

fn distance(from: LatitudeLongitude, to: LatitudeLongitude, json: bool) -> anyhow::Result<String> {
    let meters = from.haversine_distance(&to);
    debug!("Distance from {from:?} to {to:?} is {meters} m");
    if json {
        return Ok(serde_json::to_string(&meters)?);
    }
    Ok(format!("{meters:.2} m"))
}

fn show(mission: &Mission, expand: bool, summary: bool, json: bool) -> anyhow::Result<String> {
    if summary {
        return render(summary_rows(mission).as_slice(), json, render_summary);
    }
    let rows = route_rows(mission);
    if json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }
    let mut out = render_route_table(&rows, expand);
    if !rows.is_empty() {
        out.push_str(&format!("Total route length: {:.2} m", mission.route_length()));
    }
    Ok(out)
}

/// Saves when the polygon was inserted, and always when writing to a new file.
fn insert_and_save(
    mission: &mut Mission,
    polygon: FinishedPolygon,
    output: &Path,
    new_file: bool,
) -> anyhow::Result<()> {
    let waypoint = polygon.waypoint + 1;
    let inserted = mission.insert_polygon(polygon)?;
    if inserted {
        info!("Inserted polygon at waypoint {waypoint}");
    }
    if inserted || new_file {
        write_mission(output, mission)?;
    }
    Ok(())
}

fn render<T: Serialize + ?Sized>(
    rows: &T,
    json: bool,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(rows)?)
    } else {
        Ok(text(rows))
    }
}
