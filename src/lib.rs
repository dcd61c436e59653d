//! `meshplot` library crate.
//!
//! The binary (`meshplot`) is a thin wrapper around this library so that:
//!
//! - the binary mesh format can be read/written without spawning processes
//! - grid, projection and color logic is testable without a terminal
//! - the viewer only has to present precomputed data

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod solver;
pub mod tui;
