//! Argument validation errors

use crate::float_types::Real;

/// Everything that can be rejected before any geometric work begins.
///
/// Degenerate geometry is *not* an error: a zero-area triangle yields an
/// invalid plane and is carried through the BSP tree permissively.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CsgError {
    /// The mesh carries no submesh, so there is nothing to tag polygons with
    #[error("(NoSubmeshes) mesh has no submeshes")]
    NoSubmeshes,

    /// The world transform contains a NaN or infinite entry
    #[error("(InvalidTransform) world transform has a non-finite entry")]
    InvalidTransform,

    /// An optional attribute array is neither empty nor as long as the position array
    #[error(
        "(AttributeLengthMismatch) attribute `{attribute}` has {len} entries, \
         expected 0 or {expected}"
    )]
    AttributeLengthMismatch {
        attribute: &'static str,
        len: usize,
        expected: usize,
    },

    /// A position or attribute component is NaN or infinite
    #[error("(NonFiniteValue) `{attribute}` of vertex {index} is not finite")]
    NonFiniteValue {
        attribute: &'static str,
        index: usize,
    },

    /// A submesh index list cannot be split into triangles
    #[error("(IncompleteTriangle) submesh {submesh} has {len} indices, not a multiple of 3")]
    IncompleteTriangle { submesh: usize, len: usize },

    /// A submesh references a vertex that does not exist
    #[error(
        "(IndexOutOfRange) submesh {submesh} references vertex {index} \
         (vertex count = {vertex_count})"
    )]
    IndexOutOfRange {
        submesh: usize,
        index: u32,
        vertex_count: usize,
    },

    /// One material per submesh is required
    #[error("(MaterialCountMismatch) {materials} materials for {submeshes} submeshes")]
    MaterialCountMismatch { materials: usize, submeshes: usize },

    /// The result has more vertices than a `u32` index can address
    #[error("(TooManyVertices) {count} vertices do not fit in 32-bit indices")]
    TooManyVertices { count: usize },

    /// The classification tolerance must be finite and not negative
    #[error("(InvalidTolerance) epsilon {0} is not a finite, non-negative number")]
    InvalidTolerance(Real),
}

pub type Result<T> = std::result::Result<T, CsgError>;
