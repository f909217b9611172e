//! Convex, planar polygons tagged with a material

use crate::float_types::Real;
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use nalgebra::Point3;

/// A convex, coplanar polygon with consistent winding.
///
/// `material` is an opaque grouping key: geometry code only clones it onto
/// split fragments and never inspects it.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<S: Clone> {
    pub vertices: Vec<Vertex>,

    /// Derived once from the first three vertices
    pub plane: Plane,

    pub material: S,
}

impl<S: Clone> Polygon<S> {
    /// Create a polygon from vertices; the plane comes from `vertices[0..3]`.
    ///
    /// Fewer than three vertices, or collinear leading vertices, produce an
    /// invalid plane rather than an error.
    pub fn new(vertices: Vec<Vertex>, material: S) -> Self {
        let plane = Plane::from_vertices(&vertices);
        Polygon {
            vertices,
            plane,
            material,
        }
    }

    /// Reverse winding, flip every vertex and the plane
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Fan triangulation `(0, i - 1, i)` for `i` in `2..len`
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let Some(first) = self.vertices.first() else {
            return Vec::new();
        };
        self.vertices
            .windows(2)
            .skip(1)
            .map(|pair| [*first, pair[0], pair[1]])
            .collect()
    }

    /// Iterator over vertex positions
    pub fn positions(&self) -> impl Iterator<Item = &Point3<Real>> + '_ {
        self.vertices.iter().map(|v| &v.pos)
    }
}

/// Signed volume enclosed by a closed polygon soup (divergence theorem).
///
/// Positive for outward-facing, counter-clockwise winding.
pub fn signed_volume<S: Clone>(polygons: &[Polygon<S>]) -> Real {
    polygons
        .iter()
        .flat_map(|p| p.triangulate())
        .map(|[a, b, c]| a.pos.coords.dot(&b.pos.coords.cross(&c.pos.coords)))
        .sum::<Real>()
        / 6.0
}
