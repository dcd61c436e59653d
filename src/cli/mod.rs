//! Command-line parsing for the mesh viewer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from decoding, solving and rendering.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "meshplot",
    version,
    about = "Read a square matrix of doubles and plot it over x in (0,1) and y in (0,1)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read a mesh file and show it as a 3D surface (blocks until closed).
    Plot(MeshArgs),
    /// Read a mesh file and print its dimension and value range.
    Info(MeshArgs),
    /// Solve a Dirichlet problem on an N x N grid and write the mesh file.
    Solve(SolveArgs),
}

/// Options shared by commands that read a mesh file.
#[derive(Debug, Parser, Clone)]
pub struct MeshArgs {
    /// The binary file that is going to be used.
    #[arg(long, value_name = "PATH")]
    pub filename: PathBuf,
}

/// Options for the solver.
#[derive(Debug, Parser, Clone)]
pub struct SolveArgs {
    /// Grid points per side.
    #[arg(value_name = "N")]
    pub n: usize,

    /// Output mesh file.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Stop once a sweep changes the mesh by at most this much (sum of |Δ|).
    #[arg(long, default_value_t = 1e-4)]
    pub epsilon: f64,

    /// Upper bound on Gauss-Seidel sweeps.
    #[arg(long, default_value_t = 1_000_000)]
    pub max_iterations: usize,
}
