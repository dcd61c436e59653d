//! Mesh generators.
//!
//! Currently a single Gauss-Seidel Poisson solver with Dirichlet boundaries,
//! used to produce input files for the viewer.

pub mod poisson;

pub use poisson::{solve_dirichlet, Solution};
