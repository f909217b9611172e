//! Splitting planes and polygon classification

use crate::float_types::Real;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};

// Plane classification bits; a polygon's class is the OR of its vertices'.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// Output buckets of [`Plane::split_polygon`]:
/// `(coplanar_front, coplanar_back, front, back)`.
pub type SplitResult<S> = (Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>);

/// A plane `dot(normal, p) = w`.
///
/// The normal is **not** normalized: it is the raw cross product of two
/// polygon edges, so its length is twice the area of the defining triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

impl Plane {
    /// Create a plane from a normal and an offset, both taken verbatim
    pub const fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        Plane { normal, w }
    }

    /// Plane through three points, `normal = (b - a) × (c - a)`.
    ///
    /// Collinear points give a zero normal, i.e. an invalid plane.
    pub fn from_points(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Self {
        let normal = (b - a).cross(&(c - a));
        let w = normal.dot(&a.coords);
        Plane { normal, w }
    }

    /// Plane of the first three vertices; fewer than three give an invalid plane.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        match vertices {
            [a, b, c, ..] => Self::from_points(&a.pos, &b.pos, &c.pos),
            _ => Self::invalid(),
        }
    }

    /// The zero plane, which classifies every point as coplanar
    pub fn invalid() -> Self {
        Plane {
            normal: Vector3::zeros(),
            w: 0.0,
        }
    }

    /// A plane can split space only if its normal has non-zero length
    pub fn is_valid(&self) -> bool {
        self.normal.norm() > 0.0
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Flip the plane in place (reverse normal and offset)
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Return a flipped copy of this plane
    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Classify a point as [`FRONT`], [`BACK`] or [`COPLANAR`].
    ///
    /// `t = dot(normal, point) - w`; within `epsilon` of zero is coplanar.
    pub fn orient_point(&self, point: &Point3<Real>, epsilon: Real) -> i8 {
        let t = self.normal.dot(&point.coords) - self.w;
        if t < -epsilon {
            BACK
        } else if t > epsilon {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// OR of the classes of every vertex of `polygon`
    pub fn classify_polygon<S: Clone>(&self, polygon: &Polygon<S>, epsilon: Real) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.pos, epsilon))
    }

    /// Splits a polygon by this plane, returning four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    ///
    /// Coplanar polygons go to the front bucket when they face the same way as
    /// this plane. Polygons entirely on one side are passed through unmodified.
    /// Spanning polygons are cut along the plane; each side becomes a new
    /// polygon carrying the input's material, and a side with fewer than three
    /// vertices is dropped.
    pub fn split_polygon<S: Clone>(
        &self,
        polygon: &Polygon<S>,
        epsilon: Real,
    ) -> SplitResult<S> {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos, epsilon))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let count = polygon.vertices.len();
                let mut split_front = Vec::<Vertex>::with_capacity(count + 1);
                let mut split_back = Vec::<Vertex>::with_capacity(count + 1);

                for i in 0..count {
                    let j = (i + 1) % count;
                    let (type_i, type_j) = (types[i], types[j]);
                    let vertex_i = &polygon.vertices[i];
                    let vertex_j = &polygon.vertices[j];

                    if type_i != BACK {
                        split_front.push(*vertex_i);
                    }
                    if type_i != FRONT {
                        split_back.push(*vertex_i);
                    }

                    // Only a FRONT/BACK pair crosses; the denominator is then
                    // at least 2 * epsilon in magnitude.
                    if (type_i | type_j) == SPANNING {
                        let t = (self.w - self.normal.dot(&vertex_i.pos.coords))
                            / self.normal.dot(&(vertex_j.pos - vertex_i.pos));
                        let vertex_new = vertex_i.mix(vertex_j, t);
                        split_front.push(vertex_new);
                        split_back.push(vertex_new);
                    }
                }

                if split_front.len() >= 3 {
                    front.push(Polygon::new(split_front, polygon.material.clone()));
                }
                if split_back.len() >= 3 {
                    back.push(Polygon::new(split_back, polygon.material.clone()));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}
