//! Sphere intersection.

use crate::hittable::Hittable;
use lumen_core::Sphere;
use lumen_math::{DVec3, Ray, MISS};

impl Hittable for Sphere {
    /// Geometric test; expects a normalized ray direction.
    fn intersect(&self, ray: &Ray) -> f64 {
        // Parameter of the ray point closest to the center
        let closest_t = ray.direction.dot(self.center - ray.origin);
        if closest_t <= 0.0 {
            return MISS;
        }

        let closest_distance = ray.at(closest_t).distance(self.center);
        if closest_distance > self.radius {
            return MISS;
        }
        if closest_distance == self.radius {
            return closest_distance;
        }

        let half_chord = (self.radius * self.radius - closest_distance * closest_distance).sqrt();
        let near = closest_t - half_chord;
        if near > 0.0 {
            near
        } else {
            // Origin inside the sphere
            closest_t + half_chord
        }
    }

    fn surface_normal(&self, point: DVec3) -> DVec3 {
        (point - self.center).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(center: DVec3, radius: f64) -> Sphere {
        Sphere::new(center, radius).unwrap()
    }

    #[test]
    fn test_sphere_hit_at_center() {
        let s = sphere(DVec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));

        // distance to center minus radius
        assert!((s.intersect(&ray) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_hit_off_axis() {
        let s = sphere(DVec3::new(3.0, 4.0, 10.0), 2.0);
        let origin = DVec3::new(1.0, -2.0, 0.0);
        let ray = Ray::normalized(origin, s.center - origin);

        let expected = origin.distance(s.center) - 2.0;
        assert!((s.intersect(&ray) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_grazing_hit() {
        let s = sphere(DVec3::ZERO, 1.0);
        let ray = Ray::new(DVec3::new(0.6, 0.0, -5.0), DVec3::Z);

        // x² + z² = 1 at x = 0.6 gives z = -0.8
        assert!((s.intersect(&ray) - 4.2).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_tangent_returns_closest_distance() {
        let s = sphere(DVec3::ZERO, 1.0);
        let ray = Ray::new(DVec3::new(1.0, 0.0, -5.0), DVec3::Z);

        // The tangent case reports the closest-approach distance itself
        assert_eq!(s.intersect(&ray), 1.0);
    }

    #[test]
    fn test_sphere_miss() {
        let s = sphere(DVec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(DVec3::ZERO, DVec3::Y);
        assert_eq!(s.intersect(&ray), MISS);

        // Passing beside it
        let ray = Ray::new(DVec3::new(2.0, 0.0, 0.0), -DVec3::Z);
        assert_eq!(s.intersect(&ray), MISS);

        // Sphere behind the origin
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        assert_eq!(s.intersect(&ray), MISS);
    }

    #[test]
    fn test_sphere_from_inside_uses_far_side() {
        let s = sphere(DVec3::ZERO, 2.0);
        let ray = Ray::new(DVec3::new(0.0, 0.0, -1.0), DVec3::Z);
        assert!((s.intersect(&ray) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_normal() {
        let s = sphere(DVec3::new(1.0, 1.0, 1.0), 2.0);
        let normal = s.surface_normal(DVec3::new(1.0, 1.0, 3.0));
        assert!((normal - DVec3::Z).length() < 1e-12);
    }
}
