//! Input/output helpers.
//!
//! - binary mesh decode/encode (`mesh`)

pub mod mesh;

pub use mesh::*;
