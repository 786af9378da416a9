//! Ground-to-image inversion by bounded Newton iteration.
//!
//! The forward mapping is only available as a grid lookup, so the
//! Jacobian is estimated from forward differences at one-pixel
//! perturbations. Non-convergence at the iteration cap is accepted
//! silently: the last guess is returned.

use nalgebra::{Matrix2, Vector2};
use tracing::trace;

use crate::model::CoarseGridModel;
use crate::types::{shift_0_360, GroundPoint, ImagePoint};

/// Iteration cap for the Newton solve.
pub const MAX_ITERATIONS: usize = 20;

/// Convergence threshold on the per-iteration pixel step.
pub const PIXEL_TOLERANCE: f64 = 0.1;

impl CoarseGridModel {
    /// Inverse mapping: ground point and height (meters) to sub-image
    /// pixel coordinates.
    ///
    /// Undefined latitude or longitude yields an undefined point
    /// immediately. On a dateline-crossing scene a point outside the
    /// shifted footprint is rejected as undefined; otherwise a point
    /// outside the footprint is handed to
    /// [`extrapolate`](Self::extrapolate). A NaN height is treated as
    /// zero.
    ///
    /// Only a `Map`-tagged seed projection supplies the initial guess;
    /// a `Generic` seed is consulted solely by the extrapolation
    /// fallback (see [`SeedProjection`](crate::seed::SeedProjection)).
    pub fn world_to_line_sample(&self, ground: &GroundPoint, height: f64) -> ImagePoint {
        if !ground.has_lat_lon() {
            return ImagePoint::nan();
        }
        let height = if height.is_nan() { 0.0 } else { height };
        let crossing = self.grid().crosses_dateline();

        if let Some(poly) = self.dateline_footprint() {
            if !poly.contains(ground.lat, shift_0_360(ground.lon)) {
                return ImagePoint::nan();
            }
        } else if !self.footprint().contains(ground.lat, ground.lon) {
            return self.extrapolate(ground, height);
        }

        // seed in full-image space
        let mut guess = self
            .seed()
            .and_then(|s| s.as_map())
            .map(|p| p.world_to_image(ground, height))
            .filter(ImagePoint::is_defined)
            .unwrap_or_else(|| self.center_image_point());

        let target_lat = ground.lat;
        let target_lon = if crossing {
            shift_0_360(ground.lon)
        } else {
            ground.lon
        };

        for iter in 0..MAX_ITERATIONS {
            let g = self.probe(guess.x, guess.y, crossing);
            let g_du = self.probe(guess.x + 1.0, guess.y, crossing);
            let g_dv = self.probe(guess.x, guess.y + 1.0, crossing);
            if !(g.has_lat_lon() && g_du.has_lat_lon() && g_dv.has_lat_lon()) {
                // probe outside even the extrapolated lattice; keep
                // the current guess
                break;
            }

            let jacobian = Matrix2::new(
                g_du.lat - g.lat, // dlat/du
                g_dv.lat - g.lat, // dlat/dv
                g_du.lon - g.lon, // dlon/du
                g_dv.lon - g.lon, // dlon/dv
            );
            let residual = Vector2::new(target_lat - g.lat, target_lon - g.lon);

            // near-singular partials: hold position this iteration
            let step = if jacobian.determinant().abs() <= f64::EPSILON {
                Vector2::zeros()
            } else {
                jacobian
                    .try_inverse()
                    .map(|inv| inv * residual)
                    .unwrap_or_else(Vector2::zeros)
            };

            guess.x += step.x;
            guess.y += step.y;

            if step.x.abs() < PIXEL_TOLERANCE && step.y.abs() < PIXEL_TOLERANCE {
                break;
            }
            if iter + 1 == MAX_ITERATIONS {
                trace!(
                    residual_lat = residual.x,
                    residual_lon = residual.y,
                    "newton iteration cap reached; accepting last guess"
                );
            }
        }

        ImagePoint::new(
            guess.x - self.sub_image_offset().x,
            guess.y - self.sub_image_offset().y,
        )
    }

    /// Forward probe in full-image space, lifted into the continuous
    /// longitude range on dateline scenes so finite differences stay
    /// meaningful across the seam.
    fn probe(&self, u: f64, v: f64, crossing: bool) -> GroundPoint {
        let mut gp = self.forward_full(u, v);
        if crossing && gp.has_lat_lon() {
            gp.lon = shift_0_360(gp.lon);
        }
        gp
    }
}
