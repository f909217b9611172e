//! Struct and functions for working with `Vertex`s from which `Polygon`s are composed.

use crate::float_types::Real;
use bitflags::bitflags;
use nalgebra::{Matrix4, Point3, Vector2, Vector3, Vector4};

mod interpolation_methods;

bitflags! {
    /// Which optional attributes a [`Vertex`] carries.
    ///
    /// Position is mandatory and has no flag. Within one polygon or mesh the
    /// set is taken from the first vertex and assumed uniform.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VertexAttributes: u8 {
        const COLOR = 1 << 0;
        const NORMAL = 1 << 1;
        const TANGENT = 1 << 2;
        const UV0 = 1 << 3;
        const UV2 = 1 << 4;
        const UV3 = 1 << 5;
        const UV4 = 1 << 6;
    }
}

/// A mesh vertex: a position plus any number of optional shading attributes.
///
/// Attribute fields hold zero when the matching [`VertexAttributes`] flag is
/// unset; use the `Option` accessors to read them with presence applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub color: Vector4<Real>,
    pub normal: Vector3<Real>,
    pub tangent: Vector4<Real>,
    pub uv0: Vector2<Real>,
    pub uv2: Vector4<Real>,
    pub uv3: Vector4<Real>,
    pub uv4: Vector4<Real>,
    pub attributes: VertexAttributes,
}

impl Vertex {
    /// Create a new [`Vertex`] with only a position.
    ///
    /// Non-finite coordinates are replaced by `0.0`.
    pub fn new(mut pos: Point3<Real>) -> Self {
        for c in pos.coords.iter_mut() {
            if !c.is_finite() {
                *c = 0.0;
            }
        }

        Vertex {
            pos,
            color: Vector4::zeros(),
            normal: Vector3::zeros(),
            tangent: Vector4::zeros(),
            uv0: Vector2::zeros(),
            uv2: Vector4::zeros(),
            uv3: Vector4::zeros(),
            uv4: Vector4::zeros(),
            attributes: VertexAttributes::empty(),
        }
    }

    /// Shorthand for a vertex with a position and a normal.
    ///
    /// # Example
    /// ```rust
    /// # use nalgebra::{Point3, Vector3};
    /// # use bsp_csg::mesh::vertex::{Vertex, VertexAttributes};
    /// let v = Vertex::with_pos_normal(Point3::new(1.0, 2.0, 3.0), Vector3::x());
    /// assert!(v.has(VertexAttributes::NORMAL));
    /// assert_eq!(v.normal(), Some(Vector3::x()));
    /// assert_eq!(v.color(), None);
    /// ```
    pub fn with_pos_normal(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        Self::new(pos).with_normal(normal)
    }

    pub fn with_color(mut self, color: Vector4<Real>) -> Self {
        self.set_color(Some(color));
        self
    }

    pub fn with_normal(mut self, normal: Vector3<Real>) -> Self {
        self.set_normal(Some(normal));
        self
    }

    pub fn with_tangent(mut self, tangent: Vector4<Real>) -> Self {
        self.set_tangent(Some(tangent));
        self
    }

    pub fn with_uv0(mut self, uv: Vector2<Real>) -> Self {
        self.set_uv0(Some(uv));
        self
    }

    pub fn with_uv2(mut self, uv: Vector4<Real>) -> Self {
        self.set_uv2(Some(uv));
        self
    }

    pub fn with_uv3(mut self, uv: Vector4<Real>) -> Self {
        self.set_uv3(Some(uv));
        self
    }

    pub fn with_uv4(mut self, uv: Vector4<Real>) -> Self {
        self.set_uv4(Some(uv));
        self
    }

    /// True if every flag in `attributes` is present on this vertex
    #[inline]
    pub const fn has(&self, attributes: VertexAttributes) -> bool {
        self.attributes.contains(attributes)
    }

    #[inline]
    fn get<T: Copy>(&self, flag: VertexAttributes, value: T) -> Option<T> {
        self.has(flag).then_some(value)
    }

    pub fn color(&self) -> Option<Vector4<Real>> {
        self.get(VertexAttributes::COLOR, self.color)
    }

    pub fn normal(&self) -> Option<Vector3<Real>> {
        self.get(VertexAttributes::NORMAL, self.normal)
    }

    pub fn tangent(&self) -> Option<Vector4<Real>> {
        self.get(VertexAttributes::TANGENT, self.tangent)
    }

    pub fn uv0(&self) -> Option<Vector2<Real>> {
        self.get(VertexAttributes::UV0, self.uv0)
    }

    pub fn uv2(&self) -> Option<Vector4<Real>> {
        self.get(VertexAttributes::UV2, self.uv2)
    }

    pub fn uv3(&self) -> Option<Vector4<Real>> {
        self.get(VertexAttributes::UV3, self.uv3)
    }

    pub fn uv4(&self) -> Option<Vector4<Real>> {
        self.get(VertexAttributes::UV4, self.uv4)
    }

    /// Store `value` into `slot`, updating the presence flag. `None` clears
    /// the flag and zeroes the slot.
    #[inline]
    fn put<T: Copy>(
        attributes: &mut VertexAttributes,
        flag: VertexAttributes,
        slot: &mut T,
        value: Option<T>,
        zero: T,
    ) {
        attributes.set(flag, value.is_some());
        *slot = value.unwrap_or(zero);
    }

    pub fn set_color(&mut self, color: Option<Vector4<Real>>) {
        Self::put(
            &mut self.attributes,
            VertexAttributes::COLOR,
            &mut self.color,
            color,
            Vector4::zeros(),
        );
    }

    pub fn set_normal(&mut self, normal: Option<Vector3<Real>>) {
        Self::put(
            &mut self.attributes,
            VertexAttributes::NORMAL,
            &mut self.normal,
            normal,
            Vector3::zeros(),
        );
    }

    pub fn set_tangent(&mut self, tangent: Option<Vector4<Real>>) {
        Self::put(
            &mut self.attributes,
            VertexAttributes::TANGENT,
            &mut self.tangent,
            tangent,
            Vector4::zeros(),
        );
    }

    pub fn set_uv0(&mut self, uv: Option<Vector2<Real>>) {
        Self::put(&mut self.attributes, VertexAttributes::UV0, &mut self.uv0, uv, Vector2::zeros());
    }

    pub fn set_uv2(&mut self, uv: Option<Vector4<Real>>) {
        Self::put(&mut self.attributes, VertexAttributes::UV2, &mut self.uv2, uv, Vector4::zeros());
    }

    pub fn set_uv3(&mut self, uv: Option<Vector4<Real>>) {
        Self::put(&mut self.attributes, VertexAttributes::UV3, &mut self.uv3, uv, Vector4::zeros());
    }

    pub fn set_uv4(&mut self, uv: Option<Vector4<Real>>) {
        Self::put(&mut self.attributes, VertexAttributes::UV4, &mut self.uv4, uv, Vector4::zeros());
    }

    /// Flip vertex normal and tangent in place.
    ///
    /// Called when the winding of the owning polygon is reversed.
    ///
    /// # Example
    /// ```rust
    /// # use nalgebra::{Point3, Vector3};
    /// # use bsp_csg::mesh::vertex::Vertex;
    /// let mut v = Vertex::with_pos_normal(Point3::new(1.0, 2.0, 3.0), Vector3::x());
    /// v.flip();
    /// assert_eq!(v.pos, Point3::new(1.0, 2.0, 3.0), "position remains the same");
    /// assert_eq!(v.normal(), Some(-Vector3::x()), "the normal is negated");
    /// ```
    pub fn flip(&mut self) {
        if self.has(VertexAttributes::NORMAL) {
            self.normal = -self.normal;
        }
        if self.has(VertexAttributes::TANGENT) {
            self.tangent = -self.tangent;
        }
    }

    /// Map this vertex through a world transform.
    ///
    /// The position is transformed as a point. Normal and tangent directions go
    /// through the linear part of `matrix` and keep their original length, so
    /// scaling does not stretch them. Tangent `w`, color and UVs are untouched.
    pub fn transform(&self, matrix: &Matrix4<Real>) -> Vertex {
        let mut out = *self;
        out.pos = matrix.transform_point(&self.pos);

        if self.has(VertexAttributes::NORMAL) {
            out.normal = transform_direction(matrix, &self.normal);
        }
        if self.has(VertexAttributes::TANGENT) {
            let xyz = transform_direction(matrix, &self.tangent.xyz());
            out.tangent = Vector4::new(xyz.x, xyz.y, xyz.z, self.tangent.w);
        }
        out
    }
}

fn transform_direction(matrix: &Matrix4<Real>, direction: &Vector3<Real>) -> Vector3<Real> {
    let length = direction.norm();
    let mapped = matrix.transform_vector(direction);
    let mapped_length = mapped.norm();
    if mapped_length > 0.0 {
        mapped * (length / mapped_length)
    } else {
        mapped
    }
}
