use crate::error::MissionError;
use crate::lat_long::LatitudeLongitude;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Which side of its waypoint a polygon was requested on.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Before,
    #[default]
    After,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttachedPolygon {
    pub placement: Placement,
    pub perimeter: Vec<LatitudeLongitude>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub position: LatitudeLongitude,
    pub polygons: Vec<AttachedPolygon>,
}

impl Waypoint {
    pub fn new(position: LatitudeLongitude) -> Self {
        Self {
            position,
            polygons: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mission {
    pub waypoints: Vec<Waypoint>,
}

impl Mission {
    /// Replaces the route with a freshly drawn line. Attached polygons are dropped.
    pub fn from_route(points: impl IntoIterator<Item = LatitudeLongitude>) -> Self {
        Self {
            waypoints: points.into_iter().map(Waypoint::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn reset(&mut self) {
        self.waypoints.clear();
    }

    pub fn positions(&self) -> impl Iterator<Item = LatitudeLongitude> + '_ {
        self.waypoints.iter().map(|waypoint| waypoint.position)
    }

    pub fn waypoint(&self, index: usize) -> Result<&Waypoint, MissionError> {
        self.waypoints
            .get(index)
            .ok_or(MissionError::WaypointOutOfRange {
                index,
                len: self.waypoints.len(),
            })
    }

    /// Sum of the distances between consecutive waypoints, in meters.
    pub fn route_length(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|pair| pair[0].position.haversine_distance(&pair[1].position))
            .sum()
    }

    /// Starts drawing a polygon whose perimeter begins at waypoint `index`.
    pub fn start_polygon(
        &self,
        index: usize,
        placement: Placement,
    ) -> Result<PolygonDraft, MissionError> {
        let anchor = self.waypoint(index)?.position;
        debug!("Starting polygon {placement:?} waypoint {} at {anchor:?}", index + 1);
        Ok(PolygonDraft::new(index, placement, anchor))
    }

    /// Attaches a finished polygon to its waypoint. Returns `false` when the
    /// waypoint already carries the same perimeter.
    pub fn insert_polygon(&mut self, polygon: FinishedPolygon) -> Result<bool, MissionError> {
        let len = self.waypoints.len();
        let waypoint = self
            .waypoints
            .get_mut(polygon.waypoint)
            .ok_or(MissionError::WaypointOutOfRange {
                index: polygon.waypoint,
                len,
            })?;
        if waypoint
            .polygons
            .iter()
            .any(|existing| existing.perimeter == polygon.perimeter)
        {
            warn!(
                "Waypoint {} already has this polygon, not inserting it again",
                polygon.waypoint + 1
            );
            return Ok(false);
        }
        waypoint.polygons.push(AttachedPolygon {
            placement: polygon.placement,
            perimeter: polygon.perimeter,
        });
        Ok(true)
    }
}

/// A polygon being drawn from a waypoint. The anchor is always the first vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonDraft {
    waypoint: usize,
    placement: Placement,
    vertices: Vec<LatitudeLongitude>,
}

impl PolygonDraft {
    fn new(waypoint: usize, placement: Placement, anchor: LatitudeLongitude) -> Self {
        Self {
            waypoint,
            placement,
            vertices: vec![anchor],
        }
    }

    pub fn waypoint(&self) -> usize {
        self.waypoint
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn vertices(&self) -> &[LatitudeLongitude] {
        &self.vertices
    }

    pub fn push(&mut self, vertex: LatitudeLongitude) {
        self.vertices.push(vertex);
    }

    pub fn extend(&mut self, vertices: impl IntoIterator<Item = LatitudeLongitude>) {
        self.vertices.extend(vertices);
    }

    /// Throws away everything drawn so far and starts over from the same waypoint.
    pub fn discard(self) -> Self {
        Self::new(self.waypoint, self.placement, self.vertices[0])
    }

    /// Closes the ring so the last vertex equals the first.
    pub fn finish(self) -> FinishedPolygon {
        let mut perimeter = self.vertices;
        let first = perimeter[0];
        if perimeter.last() != Some(&first) || perimeter.len() == 1 {
            perimeter.push(first);
        }
        FinishedPolygon {
            waypoint: self.waypoint,
            placement: self.placement,
            perimeter,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinishedPolygon {
    pub waypoint: usize,
    pub placement: Placement,
    pub perimeter: Vec<LatitudeLongitude>,
}

impl FinishedPolygon {
    /// Builds a polygon from a complete perimeter, e.g. one read back from a file.
    pub fn from_perimeter(
        waypoint: usize,
        placement: Placement,
        perimeter: Vec<LatitudeLongitude>,
    ) -> Result<Self, MissionError> {
        if perimeter.is_empty() {
            return Err(MissionError::EmptyPerimeter);
        }
        Ok(Self {
            waypoint,
            placement,
            perimeter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn route() -> Mission {
        Mission::from_route([
            LatitudeLongitude(22.0, 82.0),
            LatitudeLongitude(22.0, 83.0),
            LatitudeLongitude(23.0, 83.0),
        ])
    }

    #[test]
    fn drawn_route_has_no_polygons() {
        let mission = route();
        assert_eq!(mission.len(), 3);
        assert!(mission.waypoints.iter().all(|wp| wp.polygons.is_empty()));
    }

    #[test]
    fn route_length_sums_legs() {
        let mission = route();
        let expected = LatitudeLongitude(22.0, 82.0).haversine_distance(&LatitudeLongitude(22.0, 83.0))
            + LatitudeLongitude(22.0, 83.0).haversine_distance(&LatitudeLongitude(23.0, 83.0));
        assert_relative_eq!(mission.route_length(), expected);
        assert_eq!(Mission::from_route([LatitudeLongitude(1.0, 1.0)]).route_length(), 0.0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut mission = route();
        mission.reset();
        assert!(mission.is_empty());
    }

    #[test]
    fn draft_starts_at_waypoint() {
        let mission = route();
        let draft = mission.start_polygon(1, Placement::Before).unwrap();
        assert_eq!(draft.vertices(), &[LatitudeLongitude(22.0, 83.0)]);
        assert_eq!(draft.waypoint(), 1);
        assert_eq!(draft.placement(), Placement::Before);
    }

    #[test]
    fn draft_out_of_range() {
        assert_eq!(
            route().start_polygon(3, Placement::After),
            Err(MissionError::WaypointOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn finish_closes_ring() {
        let mut draft = route().start_polygon(0, Placement::After).unwrap();
        draft.extend([LatitudeLongitude(22.1, 82.0), LatitudeLongitude(22.1, 82.1)]);
        let polygon = draft.finish();
        assert_eq!(polygon.perimeter.len(), 4);
        assert_eq!(polygon.perimeter.first(), polygon.perimeter.last());
    }

    #[test]
    fn finish_keeps_closed_ring() {
        let mut draft = route().start_polygon(0, Placement::After).unwrap();
        draft.extend([
            LatitudeLongitude(22.1, 82.0),
            LatitudeLongitude(22.1, 82.1),
            LatitudeLongitude(22.0, 82.0),
        ]);
        assert_eq!(draft.finish().perimeter.len(), 4);
    }

    #[test]
    fn discard_restarts_from_anchor() {
        let mut draft = route().start_polygon(2, Placement::Before).unwrap();
        draft.push(LatitudeLongitude(23.5, 83.5));
        let draft = draft.discard();
        assert_eq!(draft.vertices(), &[LatitudeLongitude(23.0, 83.0)]);
        assert_eq!(draft.waypoint(), 2);
        assert_eq!(draft.placement(), Placement::Before);
    }

    #[test]
    fn insert_skips_duplicates() {
        let mut mission = route();
        let mut draft = mission.start_polygon(0, Placement::After).unwrap();
        draft.extend([LatitudeLongitude(22.1, 82.0), LatitudeLongitude(22.1, 82.1)]);
        let polygon = draft.finish();

        assert_eq!(mission.insert_polygon(polygon.clone()), Ok(true));
        assert_eq!(mission.insert_polygon(polygon), Ok(false));
        assert_eq!(mission.waypoints[0].polygons.len(), 1);
    }

    #[test]
    fn insert_same_perimeter_other_placement_is_duplicate() {
        let mut mission = route();
        let perimeter = vec![LatitudeLongitude(22.0, 82.0), LatitudeLongitude(22.2, 82.2)];
        let before = FinishedPolygon::from_perimeter(0, Placement::Before, perimeter.clone()).unwrap();
        let after = FinishedPolygon::from_perimeter(0, Placement::After, perimeter).unwrap();
        assert_eq!(mission.insert_polygon(before), Ok(true));
        assert_eq!(mission.insert_polygon(after), Ok(false));
    }

    #[test]
    fn empty_perimeter_is_rejected() {
        assert_eq!(
            FinishedPolygon::from_perimeter(0, Placement::After, Vec::new()),
            Err(MissionError::EmptyPerimeter)
        );
    }

    #[test]
    fn insert_after_reset_fails() {
        let mut mission = route();
        let polygon = mission.start_polygon(1, Placement::After).unwrap().finish();
        mission.reset();
        assert_eq!(
            mission.insert_polygon(polygon),
            Err(MissionError::WaypointOutOfRange { index: 1, len: 0 })
        );
    }
}
