//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use bsp_csg::{
    Model, TriangleMesh,
    float_types::Real,
    mesh::{polygon::Polygon, vertex::Vertex},
};
use nalgebra::{Matrix4, Point3, Vector3};

/// Corners of each face of the unit cube, counter-clockwise seen from outside
const CUBE_FACES: [([usize; 4], [Real; 3]); 6] = [
    ([0, 4, 6, 2], [-1.0, 0.0, 0.0]),
    ([1, 3, 7, 5], [1.0, 0.0, 0.0]),
    ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
    ([2, 6, 7, 3], [0.0, 1.0, 0.0]),
    ([0, 2, 3, 1], [0.0, 0.0, -1.0]),
    ([4, 5, 7, 6], [0.0, 0.0, 1.0]),
];

/// Corner `i` of an axis-aligned box, bit 0 = x, bit 1 = y, bit 2 = z
fn corner(min: [Real; 3], size: Real, i: usize) -> Point3<Real> {
    Point3::new(
        min[0] + size * (i & 1) as Real,
        min[1] + size * ((i >> 1) & 1) as Real,
        min[2] + size * ((i >> 2) & 1) as Real,
    )
}

/// Closed cube made of 12 outward-facing triangles
pub fn cube_triangles<S: Clone>(min: [Real; 3], size: Real, material: S) -> Vec<Polygon<S>> {
    let mut polygons = Vec::new();
    for (face, normal) in CUBE_FACES {
        let normal = Vector3::from(normal);
        let v = face.map(|i| Vertex::with_pos_normal(corner(min, size, i), normal));
        polygons.push(Polygon::new(vec![v[0], v[1], v[2]], material.clone()));
        polygons.push(Polygon::new(vec![v[0], v[2], v[3]], material.clone()));
    }
    polygons
}

/// Unit cube as an indexed mesh with 8 shared positions and one submesh
pub fn unit_cube_mesh() -> TriangleMesh {
    let positions = (0..8).map(|i| corner([0.0; 3], 1.0, i)).collect();
    let indices = CUBE_FACES
        .iter()
        .flat_map(|(f, _)| [f[0], f[1], f[2], f[0], f[2], f[3]])
        .map(|i| i as u32)
        .collect();
    TriangleMesh {
        positions,
        submeshes: vec![indices],
        ..Default::default()
    }
}

/// Unit cube model translated by `offset`, with a single material
pub fn cube_model<M: Clone>(offset: [Real; 3], material: M) -> Model<M> {
    let transform = Matrix4::new_translation(&Vector3::from(offset));
    Model::from_mesh(&unit_cube_mesh(), &[material], &transform).expect("valid cube")
}

/// Returns the approximate bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// for a set of polygons.
pub fn bounding_box<S: Clone>(polygons: &[Polygon<S>]) -> [Real; 6] {
    let mut bb = [Real::MAX, Real::MAX, Real::MAX, Real::MIN, Real::MIN, Real::MIN];
    for p in polygons.iter().flat_map(|poly| poly.positions()) {
        for axis in 0..3 {
            bb[axis] = bb[axis].min(p[axis]);
            bb[axis + 3] = bb[axis + 3].max(p[axis]);
        }
    }
    bb
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Helper to make a simple Polygon in 3D with given vertices.
pub fn make_polygon_3d(points: &[[Real; 3]]) -> Polygon<()> {
    let verts = points
        .iter()
        .map(|p| Vertex::with_pos_normal(Point3::from(*p), Vector3::z()))
        .collect();
    Polygon::new(verts, ())
}

/// Number of triangles a fan triangulation of `polygons` yields
pub fn triangle_count<S: Clone>(polygons: &[Polygon<S>]) -> usize {
    polygons.iter().map(|p| p.vertices.len().saturating_sub(2)).sum()
}
