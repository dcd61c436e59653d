//! Coordinate grid over the unit square.
//!
//! Axis convention: the column index `j` runs along X and the row index `i`
//! runs along Y, so cell `(i, j)` of the mesh sits at `(xs[j], ys[i])`.

use nalgebra::DMatrix;

/// `n` evenly spaced samples over `[0, 1]`, both endpoints included.
///
/// - `n == 0`: empty
/// - `n == 1`: `[0.0]`
pub fn linspace(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (n - 1) as f64;
            (0..n).map(|k| k as f64 / last).collect()
        }
    }
}

/// Expand two axes into full grids: `X[(i, j)] = xs[j]`, `Y[(i, j)] = ys[i]`.
pub fn meshgrid(xs: &[f64], ys: &[f64]) -> (DMatrix<f64>, DMatrix<f64>) {
    let x = DMatrix::from_fn(ys.len(), xs.len(), |_, j| xs[j]);
    let y = DMatrix::from_fn(ys.len(), xs.len(), |i, _| ys[i]);
    (x, y)
}

/// Sample positions for an `n x n` mesh.
#[derive(Debug, Clone)]
pub struct CoordinateGrid {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub x: DMatrix<f64>,
    pub y: DMatrix<f64>,
}

impl CoordinateGrid {
    pub fn unit_square(n: usize) -> Self {
        let xs = linspace(n);
        let ys = linspace(n);
        let (x, y) = meshgrid(&xs, &ys);
        Self { xs, ys, x, y }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_endpoints_exactly() {
        for n in 2..50 {
            let v = linspace(n);
            assert_eq!(v.len(), n);
            assert_eq!(v[0], 0.0);
            assert_eq!(v[n - 1], 1.0);
        }
    }

    #[test]
    fn linspace_interior_is_uniform() {
        let v = linspace(5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        let step = 1.0 / 6.0;
        let w = linspace(7);
        for pair in w.windows(2) {
            assert!((pair[1] - pair[0] - step).abs() < 1e-12);
        }
    }

    #[test]
    fn linspace_degenerate_sizes() {
        assert!(linspace(0).is_empty());
        assert_eq!(linspace(1), vec![0.0]);
    }

    #[test]
    fn meshgrid_uses_column_for_x_and_row_for_y() {
        let grid = CoordinateGrid::unit_square(3);
        assert_eq!(grid.x.shape(), (3, 3));
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(grid.x[(i, j)], grid.xs[j]);
                assert_eq!(grid.y[(i, j)], grid.ys[i]);
            }
        }
        assert_eq!(grid.x[(2, 0)], 0.0);
        assert_eq!(grid.y[(2, 0)], 1.0);
    }
}
