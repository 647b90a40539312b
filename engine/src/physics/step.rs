//! Frame-step helpers shared by every per-frame integrator.

/// Largest delta a single frame may integrate, in seconds.
///
/// A stalled frame (tab switch, debugger pause) would otherwise launch the
/// player through the terrain in one step.
pub const DEFAULT_MAX_DELTA: f64 = 0.1;

/// Linear interpolation from `from` toward `to` by factor `t`.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Clamp a measured frame delta into `[0, max_delta]`.
///
/// Non-finite and negative deltas integrate nothing.
#[inline]
pub fn sanitize_delta(delta: f64, max_delta: f64) -> f64 {
    if delta.is_finite() && delta > 0.0 {
        delta.min(max_delta)
    } else {
        0.0
    }
}
