use nalgebra::SVector;

use crate::{float_types::Real, mesh::vertex::Vertex};

/// Blend one optional attribute.
///
/// Both present: linear interpolation. One present: that value, unmodified.
/// Neither present: stays absent.
#[inline]
fn blend<const D: usize>(
    a: Option<SVector<Real, D>>,
    b: Option<SVector<Real, D>>,
    t: Real,
) -> Option<SVector<Real, D>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}

impl Vertex {
    /// Linear interpolation between `self` (`t = 0`) and `other` (`t = 1`).
    ///
    /// - **Position**: p(t) = p₀ + t·(p₁ - p₀), always.
    /// - **Optional attributes**: interpolated the same way when both vertices
    ///   carry them, copied from whichever vertex has them otherwise.
    ///
    /// Used by plane splitting to create the vertex where an edge crosses the
    /// splitting plane. Normals are not renormalized.
    pub fn mix(&self, other: &Vertex, t: Real) -> Vertex {
        let mut out = Vertex::new(self.pos + (other.pos - self.pos) * t);

        out.set_color(blend(self.color(), other.color(), t));
        out.set_normal(blend(self.normal(), other.normal(), t));
        out.set_tangent(blend(self.tangent(), other.tangent(), t));
        out.set_uv0(blend(self.uv0(), other.uv0(), t));
        out.set_uv2(blend(self.uv2(), other.uv2(), t));
        out.set_uv3(blend(self.uv3(), other.uv3(), t));
        out.set_uv4(blend(self.uv4(), other.uv4(), t));

        out
    }
}
