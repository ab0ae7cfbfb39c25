use crate::lat_long::LatitudeLongitude;
use crate::error::MissionError;
use crate::mission::{AttachedPolygon, FinishedPolygon, Mission, Placement, Waypoint};
use crate::projection::Projection;
use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Mission file as stored on disk. Coordinates are `[x, y]` in `projection`.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct MissionFile {
    #[serde(default)]
    pub projection: Projection,

    #[serde(default)]
    pub waypoints: Vec<WaypointData>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WaypointData {
    pub position: [f64; 2],

    #[serde(default)]
    pub polygons: Vec<PolygonData>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PolygonData {
    #[serde(default)]
    pub placement: Placement,

    pub perimeter: Vec<[f64; 2]>,
}

impl MissionFile {
    /// Converts to geographic coordinates. Polygons without vertices are rejected.
    pub fn into_mission(self) -> Result<Mission, MissionError> {
        let projection = self.projection;
        let mut waypoints = Vec::with_capacity(self.waypoints.len());
        for (index, waypoint) in self.waypoints.into_iter().enumerate() {
            let mut polygons = Vec::with_capacity(waypoint.polygons.len());
            for polygon in waypoint.polygons {
                let polygon = FinishedPolygon::from_perimeter(
                    index,
                    polygon.placement,
                    to_points(projection, polygon.perimeter),
                )?;
                polygons.push(AttachedPolygon {
                    placement: polygon.placement,
                    perimeter: polygon.perimeter,
                });
            }
            waypoints.push(Waypoint {
                position: projection.to_lat_long(waypoint.position),
                polygons,
            });
        }
        Ok(Mission { waypoints })
    }

    /// Always geographic.
    pub fn from_mission(mission: &Mission) -> Self {
        let projection = Projection::Geographic;
        Self {
            projection,
            waypoints: mission
                .waypoints
                .iter()
                .map(|waypoint| WaypointData {
                    position: projection.from_lat_long(waypoint.position),
                    polygons: waypoint
                        .polygons
                        .iter()
                        .map(|polygon| PolygonData {
                            placement: polygon.placement,
                            perimeter: polygon
                                .perimeter
                                .iter()
                                .map(|&point| projection.from_lat_long(point))
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

fn to_points(projection: Projection, coords: Vec<[f64; 2]>) -> Vec<LatitudeLongitude> {
    coords
        .into_iter()
        .map(|coord| projection.to_lat_long(coord))
        .collect()
}

pub fn read_mission(path: &Path) -> anyhow::Result<Mission> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let data: MissionFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let mission = data
        .into_mission()
        .with_context(|| format!("Invalid mission in {}", path.display()))?;
    info!(
        "Loaded mission with {} waypoints from {}",
        mission.len(),
        path.display()
    );
    Ok(mission)
}

pub fn write_mission(path: &Path, mission: &Mission) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &MissionFile::from_mission(mission))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!(
        "Saved mission with {} waypoints to {}",
        mission.len(),
        path.display()
    );
    Ok(())
}

/// Reads a drawn line or polygon ring: a JSON array of `[x, y]` pairs.
pub fn read_drawing(path: &Path, projection: Projection) -> anyhow::Result<Vec<LatitudeLongitude>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let coords: Vec<[f64; 2]> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(to_points(projection, coords))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_minimal_file() {
        let data: MissionFile = serde_json::from_str(
            r#"{ "waypoints": [ { "position": [82.9726, 22.5937] } ] }"#,
        )
        .unwrap();
        assert_eq!(data.projection, Projection::Geographic);
        let mission = data.into_mission().unwrap();
        assert_eq!(mission.waypoints[0].position, LatitudeLongitude(22.5937, 82.9726));
        assert!(mission.waypoints[0].polygons.is_empty());
    }

    #[test]
    fn parses_polygons_and_mercator() {
        let data: MissionFile = serde_json::from_str(
            r#"{
                "projection": "EPSG:3857",
                "waypoints": [
                    { "position": [0.0, 0.0],
                      "polygons": [ { "placement": "before", "perimeter": [[0.0, 0.0], [111319.49, 0.0]] },
                                    { "perimeter": [[0.0, 0.0]] } ] }
                ]
            }"#,
        )
        .unwrap();
        let mission = data.into_mission().unwrap();
        let polygons = &mission.waypoints[0].polygons;
        assert_eq!(polygons[0].placement, Placement::Before);
        assert_eq!(polygons[1].placement, Placement::After);
        assert_abs_diff_eq!(polygons[0].perimeter[1].longitude(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(polygons[0].perimeter[1].latitude(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_empty_perimeter() {
        let data: MissionFile = serde_json::from_str(
            r#"{ "waypoints": [ { "position": [1.0, 2.0], "polygons": [ { "perimeter": [] } ] } ] }"#,
        )
        .unwrap();
        assert_eq!(data.into_mission(), Err(MissionError::EmptyPerimeter));
    }

    #[test]
    fn read_mission_reports_empty_perimeter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mission.json");
        fs::write(
            &path,
            r#"{ "waypoints": [ { "position": [1.0, 2.0], "polygons": [ { "perimeter": [] } ] } ] }"#,
        )
        .unwrap();
        let error = read_mission(&path).unwrap_err();
        assert_eq!(
            error.downcast_ref::<MissionError>(),
            Some(&MissionError::EmptyPerimeter)
        );
    }

    #[test]
    fn rejects_unknown_projection() {
        let result = serde_json::from_str::<MissionFile>(r#"{ "projection": "EPSG:2154" }"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("EPSG:2154"), "{message}");
    }

    #[test]
    fn writes_and_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mission.json");

        let mut mission = Mission::from_route([
            LatitudeLongitude(22.5, 82.5),
            LatitudeLongitude(23.0, 83.0),
        ]);
        let polygon = mission.start_polygon(1, Placement::Before).unwrap().finish();
        mission.insert_polygon(polygon).unwrap();

        write_mission(&path, &mission).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"EPSG:4326\""));
        assert!(text.contains("\"before\""));
        assert_eq!(read_mission(&path).unwrap(), mission);
    }

    #[test]
    fn reads_drawing_in_map_projection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("line.json");
        fs::write(&path, "[[0.0, 0.0], [-111319.49079327357, 0.0]]").unwrap();

        let points = read_drawing(&path, Projection::WebMercator).unwrap();
        assert_eq!(points.len(), 2);
        assert_abs_diff_eq!(points[1].longitude(), -1.0, epsilon = 1e-9);
    }

    #[test]
    fn missing_file_names_path() {
        let error = read_mission(Path::new("does-not-exist.json")).unwrap_err();
        assert!(error.to_string().contains("does-not-exist.json"));
    }
}
