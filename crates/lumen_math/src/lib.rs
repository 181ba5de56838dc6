// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod ray;
pub use ray::{Ray, SCOOCH_T};

/// Sentinel distance for "no positive-t intersection".
///
/// Positive infinity, so nearest-hit searches using `<` skip misses without
/// a special case.
pub const MISS: f64 = f64::INFINITY;

/// Reflect `a` about the normal `b`: `a - 2(a·b)b`.
///
/// `b` is expected to be unit length.
#[inline]
pub fn reflect(a: DVec3, b: DVec3) -> DVec3 {
    a - 2.0 * a.dot(b) * b
}

/// Unit vector pointing from `from` toward `to`.
#[inline]
pub fn direction_between(from: DVec3, to: DVec3) -> DVec3 {
    (to - from).normalize()
}
