//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the in-memory height field (`Mesh`) and its value range (`HeightRange`)
//! - viewer state (`Camera`) and its defaults
//! - solver parameters (`SolveConfig`) and the `info` summary (`MeshSummary`)

pub mod types;

pub use types::*;
