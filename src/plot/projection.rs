//! Orthographic camera for the 3D plot.
//!
//! World coordinates are `(x, y, height)` with `x, y` in `[0, 1]`. They are
//! first mapped into a box centered on the origin (`1 x 1 x BOX_HEIGHT`),
//! then rotated so the camera looks along `+y`:
//!
//! - azimuth rotates around the height axis (camera at `azimuth` degrees
//!   from `+x`, the same convention as `elev`/`azim` in common 3D plotters)
//! - elevation tilts the camera above the XY plane
//!
//! After rotation, screen coordinates are `(x, z)` and depth is `y`
//! (larger = farther from the viewer).

use nalgebra::{Rotation3, Vector3};

use crate::domain::{Camera, HeightRange};

/// Height of the plot box relative to its unit footprint.
pub const BOX_HEIGHT: f64 = 0.75;

/// A point after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

impl Projected {
    pub fn screen(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

#[derive(Debug, Clone)]
pub struct Projector {
    rotation: Rotation3<f64>,
    heights: HeightRange,
}

impl Projector {
    pub fn new(camera: &Camera, heights: HeightRange) -> Self {
        let yaw = Rotation3::from_axis_angle(
            &Vector3::z_axis(),
            (-90.0 - camera.azimuth_deg).to_radians(),
        );
        let pitch = Rotation3::from_axis_angle(&Vector3::x_axis(), camera.elevation_deg.to_radians());
        Self {
            rotation: pitch * yaw,
            heights,
        }
    }

    /// Project a world point `(x, y, height)`.
    pub fn project(&self, x: f64, y: f64, height: f64) -> Projected {
        let h = self.heights.fraction(height);
        let p = self.rotation * Vector3::new(x - 0.5, y - 0.5, (h - 0.5) * BOX_HEIGHT);
        Projected {
            x: p.x,
            y: p.z,
            depth: p.y,
        }
    }
}

/// Largest distance of any box point from the origin; bounds the screen extent.
pub fn box_radius() -> f64 {
    (0.5f64 * 0.5 + 0.5 * 0.5 + (BOX_HEIGHT / 2.0) * (BOX_HEIGHT / 2.0)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_heights() -> HeightRange {
        HeightRange { min: 0.0, max: 1.0 }
    }

    #[test]
    fn front_view_keeps_axes_aligned() {
        let cam = Camera {
            elevation_deg: 0.0,
            azimuth_deg: -90.0,
        };
        let p = Projector::new(&cam, unit_heights());

        let right = p.project(1.0, 0.5, 0.5);
        assert!((right.x - 0.5).abs() < 1e-12);
        assert!(right.y.abs() < 1e-12);

        let top = p.project(0.5, 0.5, 1.0);
        assert!((top.y - BOX_HEIGHT / 2.0).abs() < 1e-12);

        let far = p.project(0.5, 1.0, 0.5);
        let near = p.project(0.5, 0.0, 0.5);
        assert!(far.depth > near.depth);
    }

    #[test]
    fn positive_elevation_lifts_the_far_side() {
        let cam = Camera {
            elevation_deg: 30.0,
            azimuth_deg: -90.0,
        };
        let p = Projector::new(&cam, unit_heights());
        let far = p.project(0.5, 1.0, 0.0);
        let near = p.project(0.5, 0.0, 0.0);
        assert!(far.y > near.y);
        assert!(far.depth > near.depth);
    }

    #[test]
    fn projection_stays_within_box_radius() {
        let p = Projector::new(&Camera::default(), HeightRange { min: -3.0, max: 5.0 });
        let r = box_radius();
        for &(x, y, h) in &[(0.0, 0.0, -3.0), (1.0, 1.0, 5.0), (0.0, 1.0, 5.0), (1.0, 0.0, -3.0)] {
            let q = p.project(x, y, h);
            assert!((q.x * q.x + q.y * q.y + q.depth * q.depth).sqrt() <= r + 1e-12);
        }
    }

    #[test]
    fn extreme_heights_project_inside_the_box() {
        let p = Projector::new(&Camera::default(), HeightRange { min: -1e308, max: 1e308 });
        let r = box_radius();
        for h in [-1e308, 0.0, 1.0, 1e308] {
            let q = p.project(0.0, 1.0, h);
            assert!(q.x.is_finite() && q.y.is_finite() && q.depth.is_finite());
            assert!((q.x * q.x + q.y * q.y + q.depth * q.depth).sqrt() <= r + 1e-12);
        }
    }
}
