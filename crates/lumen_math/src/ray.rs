use crate::DVec3;

/// Ray parameter used to nudge an origin off the surface it starts on.
pub const SCOOCH_T: f64 = 1e-10;

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not required to be normalized, but the tracer
/// normalizes every ray it shoots so that `t` doubles as a distance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray with its direction normalized.
    pub fn normalized(origin: DVec3, direction: DVec3) -> Self {
        Self::new(origin, direction.normalize())
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Advance the origin by [`SCOOCH_T`] along the direction.
    ///
    /// Keeps shadow and secondary rays from re-hitting the surface they
    /// leave because of floating point coincidence.
    #[inline]
    pub fn scooched(self) -> Self {
        Self {
            origin: self.at(SCOOCH_T),
            direction: self.direction,
        }
    }
}
