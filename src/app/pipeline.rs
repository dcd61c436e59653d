//! Shared "load" logic used by the `plot` and `info` commands.
//!
//! - `plot`: mesh file -> decode -> coordinate grid -> height range
//! - `info`: mesh file -> decode -> summary
//!
//! The viewer then only has to project and draw.

use std::path::{Path, PathBuf};

use crate::domain::{HeightRange, Mesh, MeshSummary};
use crate::error::{AppError, EXIT_INPUT};
use crate::math::CoordinateGrid;

/// Everything the viewer needs for one mesh file.
#[derive(Debug, Clone)]
pub struct SurfaceData {
    pub source: PathBuf,
    pub n: usize,
    pub mesh: Mesh,
    pub grid: CoordinateGrid,
    pub heights: HeightRange,
}

impl SurfaceData {
    /// Build surface data from an already decoded mesh.
    ///
    /// A surface needs at least one sample; `n == 0` is rejected here rather
    /// than opening an empty viewer.
    pub fn from_mesh(source: PathBuf, n: usize, mesh: Mesh) -> Result<Self, AppError> {
        if n == 0 {
            return Err(AppError::new(
                EXIT_INPUT,
                format!("Mesh in '{}' is empty (n = 0); nothing to plot.", source.display()),
            ));
        }

        let grid = CoordinateGrid::unit_square(n);
        let heights = HeightRange::from_mesh(&mesh);
        log::debug!("surface n={n} heights=[{}, {}]", heights.min, heights.max);

        Ok(Self {
            source,
            n,
            mesh,
            grid,
            heights,
        })
    }
}

/// Read `path` and prepare it for plotting.
pub fn load_surface(path: &Path) -> Result<SurfaceData, AppError> {
    let (n, mesh) = crate::io::read_mesh(path)?;
    SurfaceData::from_mesh(path.to_path_buf(), n, mesh)
}

/// Read `path` and summarize its values. Empty meshes are fine here.
pub fn load_summary(path: &Path) -> Result<(usize, MeshSummary), AppError> {
    let (n, mesh) = crate::io::read_mesh(path)?;
    Ok((n, MeshSummary::from_mesh(&mesh)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_surface_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.bin");
        let mesh = Mesh::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        crate::io::write_mesh(&path, &mesh).unwrap();

        let data = load_surface(&path).unwrap();
        assert_eq!(data.n, 2);
        assert_eq!(data.mesh, mesh);
        assert_eq!(data.grid.xs, vec![0.0, 1.0]);
        assert_eq!(data.heights, HeightRange { min: 1.0, max: 4.0 });
    }

    #[test]
    fn empty_mesh_is_not_plottable() {
        let err = SurfaceData::from_mesh(PathBuf::from("e.bin"), 0, Mesh::zeros(0, 0)).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
    }

    #[test]
    fn summary_accepts_empty_meshes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e.bin");
        crate::io::write_mesh(&path, &Mesh::zeros(0, 0)).unwrap();

        let (n, summary) = load_summary(&path).unwrap();
        assert_eq!(n, 0);
        assert_eq!(summary.finite_min, None);
        assert_eq!(summary.non_finite, 0);
    }

    #[test]
    fn summary_counts_values_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.bin");
        let mesh = Mesh::from_row_slice(2, 2, &[-1.0, f64::NAN, 2.5, 0.0]);
        crate::io::write_mesh(&path, &mesh).unwrap();

        let (n, summary) = load_summary(&path).unwrap();
        assert_eq!(n, 2);
        assert_eq!(summary.finite_min, Some(-1.0));
        assert_eq!(summary.finite_max, Some(2.5));
        assert_eq!(summary.non_finite, 1);
    }

    #[test]
    fn truncated_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.bin");
        std::fs::write(&path, 5i32.to_le_bytes()).unwrap();
        let err = load_surface(&path).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.to_string().contains("Truncated"));
    }
}
