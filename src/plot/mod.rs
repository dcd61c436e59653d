//! Backend-independent plotting: color map, camera projection and scene
//! construction for the 3D surface.

pub mod colormap;
pub mod projection;
pub mod scene;

pub use colormap::{coolwarm, Rgb};
pub use projection::{Projected, Projector};
pub use scene::{build_scene, AxisLabel, LabelAlign, Scene, SurfacePatch};
