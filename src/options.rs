//! Per-operation configuration

use crate::errors::{CsgError, Result};
use crate::float_types::{Real, is_valid_tolerance, tolerance};

/// Tunables for one boolean operation.
///
/// The plane classification tolerance depends on the scale of the input
/// meshes. Plane normals are not normalized, so `epsilon` is compared against
/// `dot(normal, p) - w` and effectively scales with triangle area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CsgOptions {
    /// Points closer than this to a splitting plane are treated as coplanar
    pub epsilon: Real,
}

impl Default for CsgOptions {
    fn default() -> Self {
        Self {
            epsilon: tolerance(),
        }
    }
}

impl CsgOptions {
    /// Options using the process-wide default tolerance
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the classification tolerance
    pub const fn with_epsilon(mut self, epsilon: Real) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Reject tolerances that would make classification meaningless
    pub fn validate(&self) -> Result<()> {
        if !is_valid_tolerance(self.epsilon) {
            return Err(CsgError::InvalidTolerance(self.epsilon));
        }
        Ok(())
    }
}
