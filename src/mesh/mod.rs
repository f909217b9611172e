//! Geometry primitives, the BSP tree and the mesh adapter

pub mod bsp;
pub mod model;
pub mod plane;
pub mod polygon;
pub mod vertex;

pub use model::{MaterialIndex, Model, TriangleMesh};
pub use polygon::{Polygon, signed_volume};
