//! **Constructive Solid Geometry (CSG)** boolean operations (*union*,
//! *subtract*, *intersect*) on closed triangle meshes, computed with
//! [BSP](mesh::bsp) trees.
//!
//! Each operation is a one-shot, synchronous, whole-mesh recomputation:
//! meshes are converted to world-space polygons, partitioned into two BSP
//! trees, composed, and flattened back into one mesh with a submesh per
//! material.
//!
//! # Example
//! ```rust
//! use bsp_csg::{CsgOptions, Model, Operation, TriangleMesh, perform};
//! use nalgebra::{Matrix4, Point3, Vector3};
//!
//! // A unit tetrahedron, outward-facing winding
//! let mesh = TriangleMesh {
//!     positions: vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!         Point3::new(0.0, 0.0, 1.0),
//!     ],
//!     submeshes: vec![vec![0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3]],
//!     ..Default::default()
//! };
//! let a = Model::from_mesh(&mesh, &["stone"], &Matrix4::identity()).unwrap();
//! let offset = Matrix4::new_translation(&Vector3::new(5.0, 0.0, 0.0));
//! let b = Model::from_mesh(&mesh, &["stone"], &offset).unwrap();
//!
//! let merged = perform(Operation::Union, &a, &b, &CsgOptions::default()).unwrap();
//! assert_eq!(merged.materials, vec!["stone"]);
//! assert_eq!(merged.to_mesh().unwrap().triangle_count(), 8);
//! ```
//!
//! # Features
//! - **f64** (default): use f64 as `Real`
//! - **f32**: use f32 as `Real`, this conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::all)]

pub mod csg;
pub mod errors;
pub mod float_types;
pub mod mesh;
pub mod options;
pub mod traits;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use csg::{Operation, Solid, intersect, perform, perform_on_meshes, subtract, union};
pub use errors::{CsgError, Result};
pub use mesh::bsp::BspTree;
pub use mesh::{Model, Polygon, TriangleMesh, vertex::Vertex};
pub use options::CsgOptions;
pub use traits::CSGOps;
