//! Shared domain types.
//!
//! These types are intentionally small value types so they can be:
//!
//! - produced by the reader/solver
//! - summarized by the `info` command
//! - handed to the viewer without further processing

use std::path::PathBuf;

use nalgebra::DMatrix;

/// A square height field, indexed `(row, col)`.
///
/// On disk the values are stored row-major; in memory we keep nalgebra's
/// layout and only ever address cells by `(i, j)`.
pub type Mesh = DMatrix<f64>;

/// Default camera elevation (degrees above the XY plane).
pub const DEFAULT_ELEVATION_DEG: f64 = 30.0;
/// Default camera azimuth (degrees around the height axis).
pub const DEFAULT_AZIMUTH_DEG: f64 = -60.0;
/// Rotation applied per arrow key press (degrees).
pub const ROTATION_STEP_DEG: f64 = 5.0;

/// Number of ticks on the height axis.
pub const HEIGHT_TICKS: usize = 10;

/// Closed value range used for the height axis and color normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightRange {
    pub min: f64,
    pub max: f64,
}

impl HeightRange {
    /// Range over the finite values of `mesh`.
    ///
    /// - no finite values: `[0, 1]`
    /// - flat surface: widened by `0.5` on each side (more for huge values,
    ///   so the bounds stay distinct)
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &v in mesh.iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }

        if !min.is_finite() || !max.is_finite() {
            return Self { min: 0.0, max: 1.0 };
        }
        if max - min <= f64::EPSILON * max.abs().max(1.0) {
            let pad = 0.5f64.max(max.abs() * f64::EPSILON * 4.0);
            return Self {
                min: (min - pad).max(f64::MIN),
                max: (max + pad).min(f64::MAX),
            };
        }
        Self { min, max }
    }

    /// `max - min`. Infinite when the difference overflows `f64`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `v` relative to the range (`min` -> 0, `max` -> 1), unclamped.
    ///
    /// Stays finite for finite bounds even when `span()` overflows.
    pub fn fraction(&self, v: f64) -> f64 {
        let span = self.span();
        if span.is_finite() {
            (v - self.min) / span
        } else {
            (v * 0.5 - self.min * 0.5) / (self.max * 0.5 - self.min * 0.5)
        }
    }

    /// Value at fraction `t` of the range; exact at both ends.
    pub fn lerp(&self, t: f64) -> f64 {
        self.min * (1.0 - t) + self.max * t
    }

    /// Map `v` to `[0, 1]` (clamped). Non-finite input yields `None`.
    pub fn normalize(&self, v: f64) -> Option<f64> {
        if !v.is_finite() {
            return None;
        }
        Some(self.fraction(v).clamp(0.0, 1.0))
    }
}

/// View direction of the 3D plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            elevation_deg: DEFAULT_ELEVATION_DEG,
            azimuth_deg: DEFAULT_AZIMUTH_DEG,
        }
    }
}

impl Camera {
    /// Rotate around the height axis, wrapping into `(-180, 180]`.
    pub fn rotate_azimuth(&mut self, delta_deg: f64) {
        let mut a = (self.azimuth_deg + delta_deg) % 360.0;
        if a > 180.0 {
            a -= 360.0;
        } else if a <= -180.0 {
            a += 360.0;
        }
        self.azimuth_deg = a;
    }

    /// Tilt the view, clamped to `[-90, 90]`.
    pub fn tilt(&mut self, delta_deg: f64) {
        self.elevation_deg = (self.elevation_deg + delta_deg).clamp(-90.0, 90.0);
    }
}

/// Parameters for the Dirichlet solver.
#[derive(Debug, Clone)]
pub struct SolveConfig {
    /// Grid points per side (`n >= 2`).
    pub n: usize,
    /// Stop once a full sweep changes the mesh by at most this much (sum of |Δ|).
    pub epsilon: f64,
    /// Upper bound on sweeps.
    pub max_iterations: usize,
    /// Where to write the resulting mesh.
    pub output: PathBuf,
}

/// Quick statistics printed by `meshplot info`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSummary {
    pub n: usize,
    pub finite_min: Option<f64>,
    pub finite_max: Option<f64>,
    pub non_finite: usize,
}

impl MeshSummary {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut finite_min: Option<f64> = None;
        let mut finite_max: Option<f64> = None;
        let mut non_finite = 0usize;

        for &v in mesh.iter() {
            if !v.is_finite() {
                non_finite += 1;
                continue;
            }
            finite_min = Some(finite_min.map_or(v, |m| m.min(v)));
            finite_max = Some(finite_max.map_or(v, |m| m.max(v)));
        }

        Self {
            n: mesh.nrows(),
            finite_min,
            finite_max,
            non_finite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_range_ignores_non_finite_values() {
        let mesh = Mesh::from_row_slice(2, 2, &[1.0, f64::NAN, f64::INFINITY, -2.0]);
        let r = HeightRange::from_mesh(&mesh);
        assert_eq!(r, HeightRange { min: -2.0, max: 1.0 });
    }

    #[test]
    fn height_range_widens_flat_surfaces() {
        let mesh = Mesh::from_element(3, 3, 4.0);
        let r = HeightRange::from_mesh(&mesh);
        assert_eq!(r, HeightRange { min: 3.5, max: 4.5 });

        let huge = HeightRange::from_mesh(&Mesh::from_element(2, 2, f64::MAX));
        assert!(huge.min < huge.max);
        assert_eq!(huge.max, f64::MAX);
        assert_eq!(huge.normalize(f64::MAX), Some(1.0));
    }

    #[test]
    fn height_range_falls_back_without_finite_values() {
        let mesh = Mesh::from_element(2, 2, f64::NAN);
        assert_eq!(HeightRange::from_mesh(&mesh), HeightRange { min: 0.0, max: 1.0 });
        assert_eq!(HeightRange::from_mesh(&Mesh::zeros(0, 0)), HeightRange { min: 0.0, max: 1.0 });
    }

    #[test]
    fn normalize_clamps_and_rejects_nan() {
        let r = HeightRange { min: 0.0, max: 10.0 };
        assert_eq!(r.normalize(5.0), Some(0.5));
        assert_eq!(r.normalize(20.0), Some(1.0));
        assert_eq!(r.normalize(f64::NAN), None);
    }

    #[test]
    fn extreme_ranges_stay_finite() {
        let mesh = Mesh::from_row_slice(2, 2, &[-1e308, 0.0, 1.0, 1e308]);
        let r = HeightRange::from_mesh(&mesh);
        assert_eq!(r, HeightRange { min: -1e308, max: 1e308 });
        assert!(r.span().is_infinite());

        assert_eq!(r.normalize(-1e308), Some(0.0));
        assert_eq!(r.normalize(1e308), Some(1.0));
        assert_eq!(r.normalize(0.0), Some(0.5));
        assert_eq!(r.lerp(0.0), -1e308);
        assert_eq!(r.lerp(1.0), 1e308);
        assert_eq!(r.lerp(0.5), 0.0);
    }

    #[test]
    fn camera_wraps_and_clamps() {
        let mut cam = Camera::default();
        cam.rotate_azimuth(-130.0);
        assert!((cam.azimuth_deg - 170.0).abs() < 1e-9);
        cam.tilt(100.0);
        assert_eq!(cam.elevation_deg, 90.0);
    }

    #[test]
    fn summary_counts_non_finite_values() {
        let mesh = Mesh::from_row_slice(2, 2, &[1.0, f64::NAN, f64::NEG_INFINITY, 3.0]);
        let s = MeshSummary::from_mesh(&mesh);
        assert_eq!(s.n, 2);
        assert_eq!(s.finite_min, Some(1.0));
        assert_eq!(s.finite_max, Some(3.0));
        assert_eq!(s.non_finite, 2);
    }
}
