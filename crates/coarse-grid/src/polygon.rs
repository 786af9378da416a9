//! Ground-space footprint polygons.
//!
//! The footprint is the four-corner outline of the grid coverage. It
//! gates the inverse solver (points outside are either rejected or
//! extrapolated) and supplies the boundary geometry the extrapolator
//! clips against.

use serde::{Deserialize, Serialize};

use crate::grid::GroundGrid;
use crate::types::{wrap_180, GroundPoint};

const EDGE_EPS: f64 = 1e-9;

/// An ordered four-vertex ground-space polygon. Vertices start at the
/// grid's (0,0) corner and continue (cols-1,0), (cols-1,rows-1),
/// (0,rows-1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundPolygon {
    vertices: [GroundPoint; 4],
}

impl GroundPolygon {
    pub fn new(vertices: [GroundPoint; 4]) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[GroundPoint; 4] {
        &self.vertices
    }

    /// Boundary-inclusive point containment by ray casting in lon/lat
    /// space. Queries against a dateline-shifted polygon must be
    /// pre-shifted into the same numeric range by the caller.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        let (px, py) = (lon, lat);

        // points on an edge count as inside
        for i in 0..4 {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % 4];
            if point_near_segment(px, py, a.lon, a.lat, b.lon, b.lat) {
                return true;
            }
        }

        let mut inside = false;
        for i in 0..4 {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % 4];
            let (ax, ay) = (a.lon, a.lat);
            let (bx, by) = (b.lon, b.lat);
            if (ay > py) != (by > py) {
                let x_cross = ax + (py - ay) * (bx - ax) / (by - ay);
                if px < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Mean of the vertices. Interior for the convex quadrilaterals
    /// grid corners produce.
    pub fn interior_point(&self) -> GroundPoint {
        let lat = self.vertices.iter().map(|v| v.lat).sum::<f64>() / 4.0;
        let lon = self.vertices.iter().map(|v| v.lon).sum::<f64>() / 4.0;
        GroundPoint::new(lat, lon)
    }

    /// Intersection of the segment `from -> to` with the polygon
    /// boundary, taking the crossing nearest `to`. None when the
    /// segment never reaches the boundary (i.e. `to` is interior).
    pub fn clip_ray_to_boundary(
        &self,
        from: &GroundPoint,
        to: &GroundPoint,
    ) -> Option<GroundPoint> {
        let (dx, dy) = (to.lon - from.lon, to.lat - from.lat);
        let mut best_t: Option<f64> = None;

        for i in 0..4 {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % 4];
            let (ex, ey) = (b.lon - a.lon, b.lat - a.lat);
            let denom = dx * ey - dy * ex;
            if denom.abs() < EDGE_EPS * EDGE_EPS {
                continue; // parallel
            }
            let (wx, wy) = (a.lon - from.lon, a.lat - from.lat);
            let t = (wx * ey - wy * ex) / denom;
            let s = (wx * dy - wy * dx) / denom;
            if t > 0.0 && t <= 1.0 && (-EDGE_EPS..=1.0 + EDGE_EPS).contains(&s) {
                best_t = Some(best_t.map_or(t, |bt: f64| bt.max(t)));
            }
        }

        best_t.map(|t| GroundPoint::new(from.lat + t * dy, from.lon + t * dx))
    }
}

fn point_near_segment(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> bool {
    let (ex, ey) = (bx - ax, by - ay);
    let len2 = ex * ex + ey * ey;
    if len2 == 0.0 {
        return (px - ax).abs() < EDGE_EPS && (py - ay).abs() < EDGE_EPS;
    }
    let t = (((px - ax) * ex + (py - ay) * ey) / len2).clamp(0.0, 1.0);
    let (cx, cy) = (ax + t * ex, ay + t * ey);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt() < EDGE_EPS
}

/// Derive the footprint polygons from the grid's corner nodes.
///
/// The raw polygon carries longitudes normalized to [-180, 180]. When
/// the grid crosses the dateline a second polygon keeps the stored
/// (possibly >180) longitudes for containment tests against
/// dateline-shifted query points.
pub(crate) fn build_polygons(grid: &GroundGrid) -> (GroundPolygon, Option<GroundPolygon>) {
    let (cols, rows) = grid.size();
    let corners = [
        grid.node(0, 0),
        grid.node(cols - 1, 0),
        grid.node(cols - 1, rows - 1),
        grid.node(0, rows - 1),
    ];

    let raw = GroundPolygon::new(corners.map(|c| GroundPoint::new(c.lat, wrap_180(c.lon))));
    let shifted = grid
        .crosses_dateline()
        .then(|| GroundPolygon::new(corners));
    (raw, shifted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> GroundPolygon {
        GroundPolygon::new([
            GroundPoint::new(40.0, -120.0),
            GroundPoint::new(40.0, -110.0),
            GroundPoint::new(30.0, -110.0),
            GroundPoint::new(30.0, -120.0),
        ])
    }

    #[test]
    fn test_contains_interior_and_exterior() {
        let p = quad();
        assert!(p.contains(35.0, -115.0));
        assert!(!p.contains(45.0, -115.0));
        assert!(!p.contains(35.0, -125.0));
        assert!(!p.contains(25.0, -105.0));
    }

    #[test]
    fn test_contains_boundary_inclusive() {
        let p = quad();
        assert!(p.contains(40.0, -115.0));
        assert!(p.contains(35.0, -110.0));
        assert!(p.contains(30.0, -120.0));
    }

    #[test]
    fn test_interior_point() {
        let c = quad().interior_point();
        assert!((c.lat - 35.0).abs() < 1e-12);
        assert!((c.lon - -115.0).abs() < 1e-12);
    }

    #[test]
    fn test_clip_ray_to_boundary() {
        let p = quad();
        let inner = GroundPoint::new(35.0, -115.0);
        let outer = GroundPoint::new(35.0, -100.0);
        let edge = p.clip_ray_to_boundary(&inner, &outer).unwrap();
        assert!((edge.lon - -110.0).abs() < 1e-9);
        assert!((edge.lat - 35.0).abs() < 1e-9);

        // target still inside: no boundary crossing
        let target = GroundPoint::new(36.0, -114.0);
        assert!(p.clip_ray_to_boundary(&inner, &target).is_none());
    }

    #[test]
    fn test_clip_ray_diagonal() {
        let p = quad();
        let inner = GroundPoint::new(35.0, -115.0);
        let outer = GroundPoint::new(45.0, -105.0);
        let edge = p.clip_ray_to_boundary(&inner, &outer).unwrap();
        // exits through the northern edge at lat 40
        assert!((edge.lat - 40.0).abs() < 1e-9);
        assert!((edge.lon - -110.0).abs() < 1e-9);
    }
}
