// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized classification tolerance used when no explicit epsilon is given.
/// Defaults depend on precision (`f32` vs `f64`), but can be overridden:
///  1) **Build-time**: set env var `BSP_CSG_TOLERANCE` (e.g. `BSP_CSG_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-4
    }
    #[cfg(feature = "f64")]
    {
        1e-5
    }
}

/// Returns the process-wide default plane classification tolerance.
/// If not set yet, it tries `BSP_CSG_TOLERANCE` (parsed as the active `Real`) and
/// falls back to a precision-dependent default. An unparsable or invalid
/// environment value is ignored.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        option_env!("BSP_CSG_TOLERANCE")
            .and_then(|environment_variable| Real::from_str(environment_variable).ok())
            .filter(|&value| is_valid_tolerance(value))
            .unwrap_or(default_tolerance())
    })
}

/// Set the default tolerance programmatically once (subsequent calls are ignored).
/// Returns `false` if a value was already in place or `value` is rejected by
/// [`is_valid_tolerance`].
pub fn set_tolerance(value: Real) -> bool {
    is_valid_tolerance(value) && TOLERANCE_CELL.set(value).is_ok()
}

/// A tolerance must be finite and not negative; zero means exact classification.
/// Shared by [`set_tolerance`] and `CsgOptions::validate`.
pub fn is_valid_tolerance(value: Real) -> bool {
    value.is_finite() && value >= 0.0
}
