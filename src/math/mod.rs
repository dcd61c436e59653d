//! Mathematical utilities: unit-square grids and axis ticks.

pub mod grid;
pub mod ticks;

pub use grid::*;
pub use ticks::*;
