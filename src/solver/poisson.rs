//! Gauss-Seidel solver for the Poisson equation on the unit square.
//!
//! We solve `∇²φ = u(x, y)` with `u = x² + y²` and Dirichlet boundary values
//! from `boundary_value`. The grid has `n` points per side and spacing
//! `dx = 1 / (n - 1)`; mesh cell `(i, j)` sits at `(x, y) = (i·dx, j·dx)`.
//!
//! Note the orientation: rows follow `x` here, while the viewer puts rows on
//! its Y axis. Files written by the solver therefore appear transposed in the
//! plot; the file format itself carries no axis information.

use std::time::{Duration, Instant};

use crate::domain::{Mesh, SolveConfig};
use crate::error::{AppError, EXIT_INPUT};

/// Dirichlet boundary function.
pub fn boundary_value(x: f64, y: f64) -> f64 {
    if x.abs() < 1e-4 || x.abs() > 0.999 {
        (y - 0.5) * (y - 0.5)
    } else if y.abs() < 1e-4 || y.abs() > 0.999 {
        (x - 0.5) * (x - 0.5)
    } else {
        0.0
    }
}

/// Right-hand side of the Poisson equation.
pub fn source(x: f64, y: f64) -> f64 {
    x * x + y * y
}

/// Output of a solver run.
#[derive(Debug, Clone)]
pub struct Solution {
    pub mesh: Mesh,
    pub iterations: usize,
    /// Sum of |Δφ| over the last sweep.
    pub last_change: f64,
    pub converged: bool,
    pub elapsed: Duration,
}

impl Solution {
    pub fn seconds_per_iteration(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.elapsed.as_secs_f64() / self.iterations as f64
    }
}

/// Run Gauss-Seidel sweeps until a sweep changes the mesh by at most
/// `config.epsilon`, or `config.max_iterations` sweeps have run.
pub fn solve_dirichlet(config: &SolveConfig) -> Result<Solution, AppError> {
    validate(config)?;

    let n = config.n;
    let dx = 1.0 / (n as f64 - 1.0);
    let mut mesh = Mesh::zeros(n, n);
    apply_boundaries(&mut mesh, dx);

    let started = Instant::now();
    let mut iterations = 0usize;
    let mut last_change;
    loop {
        last_change = sweep(&mut mesh, dx);
        iterations += 1;
        log::trace!("sweep {iterations}: change={last_change:e}");

        if last_change <= config.epsilon || iterations >= config.max_iterations {
            break;
        }
    }

    let converged = last_change <= config.epsilon;
    if !converged {
        log::warn!(
            "solver stopped after {iterations} sweeps without reaching epsilon={} (last change {last_change:e})",
            config.epsilon
        );
    }

    Ok(Solution {
        mesh,
        iterations,
        last_change,
        converged,
        elapsed: started.elapsed(),
    })
}

fn validate(config: &SolveConfig) -> Result<(), AppError> {
    if config.n < 2 {
        return Err(AppError::new(EXIT_INPUT, format!("Grid size must be >= 2 (got {}).", config.n)));
    }
    if i32::try_from(config.n).is_err() {
        return Err(AppError::new(EXIT_INPUT, format!("Grid size {} does not fit the file header.", config.n)));
    }
    if !(config.epsilon.is_finite() && config.epsilon > 0.0) {
        return Err(AppError::new(
            EXIT_INPUT,
            format!("Epsilon must be finite and > 0 (got {}).", config.epsilon),
        ));
    }
    if config.max_iterations == 0 {
        return Err(AppError::new(EXIT_INPUT, "Max iterations must be >= 1."));
    }
    Ok(())
}

/// Set the four boundary lines from `boundary_value`.
fn apply_boundaries(mesh: &mut Mesh, dx: f64) {
    let n = mesh.nrows();
    let last = n - 1;
    let at = |i: usize, j: usize| boundary_value(i as f64 * dx, j as f64 * dx);
    for k in 0..n {
        mesh[(0, k)] = at(0, k);
        mesh[(last, k)] = at(last, k);
        mesh[(k, 0)] = at(k, 0);
        mesh[(k, last)] = at(k, last);
    }
}

/// One in-place sweep over interior points. Returns the summed |Δφ|.
fn sweep(mesh: &mut Mesh, dx: f64) -> f64 {
    let n = mesh.nrows();
    let h2 = dx * dx;
    let mut change = 0.0;
    for i in 1..n.saturating_sub(1) {
        for j in 1..n - 1 {
            let old = mesh[(i, j)];
            let neighbours = mesh[(i - 1, j)] + mesh[(i + 1, j)] + mesh[(i, j - 1)] + mesh[(i, j + 1)];
            let new = (neighbours - source(i as f64 * dx, j as f64 * dx) * h2) / 4.0;
            mesh[(i, j)] = new;
            change += (old - new).abs();
        }
    }
    change
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(n: usize, epsilon: f64) -> SolveConfig {
        SolveConfig {
            n,
            epsilon,
            max_iterations: 100_000,
            output: PathBuf::from("unused.bin"),
        }
    }

    #[test]
    fn boundary_function_matches_edges() {
        assert_eq!(boundary_value(0.0, 0.0), 0.25);
        assert_eq!(boundary_value(1.0, 0.5), 0.0);
        assert_eq!(boundary_value(0.5, 0.0), 0.0);
        assert_eq!(boundary_value(0.25, 1.0), 0.0625);
        assert_eq!(boundary_value(0.5, 0.5), 0.0);
    }

    #[test]
    fn boundaries_are_applied_and_kept() {
        let sol = solve_dirichlet(&config(11, 1e-6)).unwrap();
        let dx = 0.1;
        for k in 0..11 {
            let t = k as f64 * dx;
            assert_eq!(sol.mesh[(0, k)], boundary_value(0.0, t));
            assert_eq!(sol.mesh[(10, k)], boundary_value(10.0 * dx, t));
            assert_eq!(sol.mesh[(k, 0)], boundary_value(t, 0.0));
        }
    }

    #[test]
    fn converges_below_epsilon() {
        let sol = solve_dirichlet(&config(16, 1e-4)).unwrap();
        assert!(sol.converged);
        assert!(sol.last_change <= 1e-4);
        assert!(sol.iterations > 1);
        assert!(sol.mesh.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn converged_interior_satisfies_the_stencil() {
        let sol = solve_dirichlet(&config(9, 1e-12)).unwrap();
        let dx = 1.0 / 8.0;
        let m = &sol.mesh;
        for i in 1..8 {
            for j in 1..8 {
                let lap = (m[(i - 1, j)] + m[(i + 1, j)] + m[(i, j - 1)] + m[(i, j + 1)] - 4.0 * m[(i, j)]) / (dx * dx);
                assert!((lap - source(i as f64 * dx, j as f64 * dx)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn two_point_grid_needs_a_single_sweep() {
        let sol = solve_dirichlet(&config(2, 1e-4)).unwrap();
        assert_eq!(sol.iterations, 1);
        assert_eq!(sol.last_change, 0.0);
    }

    #[test]
    fn iteration_cap_stops_early() {
        let mut cfg = config(32, 1e-12);
        cfg.max_iterations = 3;
        let sol = solve_dirichlet(&cfg).unwrap();
        assert_eq!(sol.iterations, 3);
        assert!(!sol.converged);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert_eq!(solve_dirichlet(&config(1, 1e-4)).unwrap_err().exit_code(), EXIT_INPUT);
        assert!(solve_dirichlet(&config(10, 0.0)).is_err());
        assert!(solve_dirichlet(&config(10, f64::NAN)).is_err());
    }
}
