//! Plane intersection.

use crate::hittable::Hittable;
use lumen_core::Plane;
use lumen_math::{DVec3, Ray, MISS};

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray) -> f64 {
        let denominator = self.normal.dot(ray.direction);

        // Parallel to the plane
        if denominator == 0.0 {
            return MISS;
        }

        let t = -self.normal.dot(ray.origin - self.position) / denominator;
        if t > 0.0 {
            t
        } else {
            MISS
        }
    }

    fn surface_normal(&self, _point: DVec3) -> DVec3 {
        self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Plane {
        Plane::new(DVec3::ZERO, DVec3::Y).unwrap()
    }

    #[test]
    fn test_plane_hit() {
        let ray = Ray::normalized(DVec3::new(0.0, 2.0, 0.0), DVec3::new(0.0, -1.0, 1.0));
        let t = floor().intersect(&ray);

        assert!((t - 8f64.sqrt()).abs() < 1e-12);
        assert!(ray.at(t).y.abs() < 1e-12);
    }

    #[test]
    fn test_plane_hit_from_below() {
        let ray = Ray::new(DVec3::new(3.0, -4.0, 1.0), DVec3::Y);
        assert_eq!(floor().intersect(&ray), 4.0);
    }

    #[test]
    fn test_plane_parallel_ray_misses() {
        for origin in [
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, -1.0, 0.0),
            DVec3::ZERO,
        ] {
            let ray = Ray::new(origin, DVec3::new(1.0, 0.0, 1.0).normalize());
            assert_eq!(floor().intersect(&ray), MISS);
        }
    }

    #[test]
    fn test_plane_behind_misses() {
        let ray = Ray::new(DVec3::new(0.0, 2.0, 0.0), DVec3::Y);
        assert_eq!(floor().intersect(&ray), MISS);
    }

    #[test]
    fn test_plane_normal_constant() {
        let plane = floor();
        assert_eq!(plane.surface_normal(DVec3::new(5.0, 0.0, -3.0)), DVec3::Y);
        assert_eq!(plane.surface_normal(DVec3::ZERO), DVec3::Y);
    }
}
