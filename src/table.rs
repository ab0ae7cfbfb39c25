//! Row models and plain-text rendering for the route and polygon tables.

use crate::lat_long::LatitudeLongitude;
use crate::mission::{Mission, Placement};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RouteRow {
    /// 1-based waypoint number.
    pub index: usize,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance to the next waypoint in meters, 0 on the last one.
    pub distance: f64,
    pub polygons: Vec<PolygonTable>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PolygonTable {
    pub placement: Placement,
    pub rows: Vec<PolygonRow>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PolygonRow {
    pub index: usize,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance from the previous vertex in meters, 0 on the first one.
    pub distance: f64,
}

pub fn route_rows(mission: &Mission) -> Vec<RouteRow> {
    let waypoints = &mission.waypoints;
    waypoints
        .iter()
        .enumerate()
        .map(|(index, waypoint)| {
            let distance = waypoints
                .get(index + 1)
                .map_or(0.0, |next| waypoint.position.haversine_distance(&next.position));
            let shown = waypoint.position.rounded();
            RouteRow {
                index: index + 1,
                latitude: shown.latitude(),
                longitude: shown.longitude(),
                distance,
                polygons: waypoint
                    .polygons
                    .iter()
                    .map(|polygon| PolygonTable {
                        placement: polygon.placement,
                        rows: polygon_rows(&polygon.perimeter),
                    })
                    .collect(),
            }
        })
        .collect()
}

pub fn polygon_rows(perimeter: &[LatitudeLongitude]) -> Vec<PolygonRow> {
    perimeter
        .iter()
        .enumerate()
        .map(|(index, vertex)| {
            let distance = match index {
                0 => 0.0,
                _ => perimeter[index - 1].haversine_distance(vertex),
            };
            let shown = vertex.rounded();
            PolygonRow {
                index: index + 1,
                latitude: shown.latitude(),
                longitude: shown.longitude(),
                distance,
            }
        })
        .collect()
}

pub fn render_route_table(rows: &[RouteRow], expand: bool) -> String {
    if rows.is_empty() {
        return "No waypoints. Draw a route to start planning the mission.\n".to_string();
    }
    let mut lines = vec![format!(
        "{:>4}  {:>10}  {:>11}  {:>12}",
        "WP", "Latitude", "Longitude", "Distance"
    )];
    for row in rows {
        lines.push(format!(
            "{:>4}  {:>10.5}  {:>11.5}  {:>12.2}",
            row.index, row.latitude, row.longitude, row.distance
        ));
        if row.polygons.is_empty() {
            continue;
        }
        if !expand {
            lines.push(format!("      Polygons: {}", row.polygons.len()));
            continue;
        }
        for polygon in &row.polygons {
            lines.push(format!("      Polygon coordinates ({:?}):", polygon.placement));
            lines.extend(
                render_polygon_table(&polygon.rows)
                    .lines()
                    .map(|line| format!("        {line}")),
            );
        }
    }
    join_lines(lines)
}

pub fn render_polygon_table(rows: &[PolygonRow]) -> String {
    let header = format!(
        "{:>5}  {:>10}  {:>11}  {:>14}",
        "Index", "Latitude", "Longitude", "Distance(m)"
    );
    let lines = rows.iter().map(|row| {
        format!(
            "{:>5}  {:>10.5}  {:>11.5}  {:>14}",
            row.index,
            row.latitude,
            row.longitude,
            format_vertex_distance(row)
        )
    });
    join_lines(std::iter::once(header).chain(lines))
}

fn format_vertex_distance(row: &PolygonRow) -> String {
    match row.index {
        1 => "0".to_string(),
        _ => format!("{:.2} m", row.distance),
    }
}

fn join_lines(lines: impl IntoIterator<Item = String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// A waypoint as listed in the mission summary, position in `[lon, lat]` order.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub name: String,
    pub position: [f64; 2],
}

pub fn summary_rows(mission: &Mission) -> Vec<SummaryRow> {
    mission
        .positions()
        .enumerate()
        .map(|(index, position)| SummaryRow {
            name: format!("WP{index:02}"),
            position: position.to_lon_lat(),
        })
        .collect()
}

/// One `WPnn: lon, lat` line per waypoint.
pub fn render_summary(rows: &[SummaryRow]) -> String {
    let lines = rows.iter().map(|row| {
        let [lon, lat] = row.position;
        format!("{}: {lon}, {lat}", row.name)
    });
    join_lines(std::iter::once("Mission Waypoints".to_string()).chain(lines))
}
