//! Image-coordinate extrapolation for ground points outside the valid
//! footprint.
//!
//! A ray from the footprint interior to the query point is clipped to
//! the polygon boundary. The image-space directional derivative along
//! that ray is estimated one-sided at the boundary and continued
//! linearly outward, which keeps mosaicking and footprint-drawing
//! callers free of discontinuities at scene edges.

use crate::model::CoarseGridModel;
use crate::types::{shift_0_360, wrap_180, GroundPoint, ImagePoint, METERS_PER_DEGREE};

impl CoarseGridModel {
    /// Approximate image coordinates for a ground point outside the
    /// model's nominal coverage.
    ///
    /// An undefined ground point returns an undefined image point.
    /// With a seed projection attached, its ground-to-image evaluation
    /// is used instead of the ray clip; the ray-clipping path below
    /// only runs without one.
    pub fn extrapolate(&self, ground: &GroundPoint, height: f64) -> ImagePoint {
        if !ground.has_lat_lon() {
            return ImagePoint::nan();
        }
        if let Some(seed) = self.seed() {
            // seed output is in full-image space; convert on the way
            // out like every other inverse result
            let ip = seed.projection().world_to_image(ground, height);
            return ImagePoint::new(
                ip.x - self.sub_image_offset().x,
                ip.y - self.sub_image_offset().y,
            );
        }
        let height = if height.is_nan() { 0.0 } else { height };
        let crossing = self.grid().crosses_dateline();

        let poly = self.dateline_footprint().unwrap_or_else(|| self.footprint());
        let interior = poly.interior_point();
        let (query_lon, interior_lon) = if crossing {
            (shift_0_360(ground.lon), shift_0_360(interior.lon))
        } else {
            (ground.lon, interior.lon)
        };
        let query = GroundPoint::new(ground.lat, query_lon);
        let inner = GroundPoint::new(interior.lat, interior_lon);

        let edge = match poly.clip_ray_to_boundary(&inner, &query) {
            Some(edge) => edge,
            // the point is actually inside: solve directly
            None => return self.world_to_line_sample(ground, height),
        };

        let (dlat, dlon) = (query.lat - edge.lat, query.lon - edge.lon);
        let distance = (dlat * dlat + dlon * dlon).sqrt();
        let edge_world = GroundPoint::with_height(edge.lat, wrap_180(edge.lon), height);
        if distance == 0.0 {
            return self.world_to_line_sample(&edge_world, height);
        }
        let (ulat, ulon) = (dlat / distance, dlon / distance);

        // ground-space perturbation from the mean pixel footprint,
        // taken toward the interior so both probes stay solvable
        let epsilon = (self.grid().mean_gsd_m() / METERS_PER_DEGREE).max(f64::MIN_POSITIVE);
        let inner_probe = GroundPoint::with_height(
            edge.lat - epsilon * ulat,
            wrap_180(edge.lon - epsilon * ulon),
            height,
        );

        let ip_edge = self.world_to_line_sample(&edge_world, height);
        let ip_inner = self.world_to_line_sample(&inner_probe, height);
        if !ip_edge.is_defined() || !ip_inner.is_defined() {
            return ImagePoint::nan();
        }

        // one-sided directional derivative of image coords with
        // respect to ground radial distance
        let ddx = (ip_edge.x - ip_inner.x) / epsilon;
        let ddy = (ip_edge.y - ip_inner.y) / epsilon;

        ImagePoint::new(ip_edge.x + distance * ddx, ip_edge.y + distance * ddy)
    }
}
