//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::{Float, FloatConst};

/// Wrap an angle in the range (-2pi, 2pi) into (-pi, pi].
///
/// A single full turn is added or subtracted, so the input must already be
/// within one turn of the target range. This is always true for the
/// difference of two angles which are themselves in (-pi, pi], such as those
/// returned by `atan2`.
///
/// The range is closed at +pi and open at -pi, matching `atan2`, so an input
/// of exactly -pi is returned as +pi.
pub fn wrap_pi<T>(value: T) -> T
where
    T: Float + FloatConst
{
    let tau_t = T::PI() + T::PI();

    if value > T::PI() {
        value - tau_t
    }
    else if value <= -T::PI() {
        value + tau_t
    }
    else {
        value
    }
}
