//! General quadric intersection.
//!
//! Substituting `P(t) = O + tD` into
//! `Ax² + By² + Cz² + Dxy + Exz + Fyz + Gx + Hy + Iz + J = 0`
//! gives `Aq·t² + Bq·t + Cq = 0`.

use crate::hittable::Hittable;
use lumen_core::Quadric;
use lumen_math::{DVec3, Ray, MISS};

/// Coefficients `(Aq, Bq, Cq)` of the ray-substituted quadratic.
fn ray_quadratic(q: &Quadric, ray: &Ray) -> (f64, f64, f64) {
    let o = ray.origin;
    let d = ray.direction;

    let aq = q.a * d.x * d.x
        + q.b * d.y * d.y
        + q.c * d.z * d.z
        + q.d * d.x * d.y
        + q.e * d.x * d.z
        + q.f * d.y * d.z;

    let bq = 2.0 * q.a * o.x * d.x
        + 2.0 * q.b * o.y * d.y
        + 2.0 * q.c * o.z * d.z
        + q.d * (o.x * d.y + o.y * d.x)
        + q.e * (o.x * d.z + o.z * d.x)
        + q.f * (o.y * d.z + o.z * d.y)
        + q.g * d.x
        + q.h * d.y
        + q.i * d.z;

    let cq = q.a * o.x * o.x
        + q.b * o.y * o.y
        + q.c * o.z * o.z
        + q.d * o.x * o.y
        + q.e * o.x * o.z
        + q.f * o.y * o.z
        + q.g * o.x
        + q.h * o.y
        + q.i * o.z
        + q.j;

    (aq, bq, cq)
}

impl Hittable for Quadric {
    fn intersect(&self, ray: &Ray) -> f64 {
        let (aq, bq, cq) = ray_quadratic(self, ray);

        // Degenerate to a linear equation
        if aq == 0.0 {
            if bq == 0.0 {
                return MISS;
            }
            let t = -cq / bq;
            return if t > 0.0 { t } else { MISS };
        }

        let discriminant = bq * bq - 4.0 * aq * cq;
        if discriminant < 0.0 {
            return MISS;
        }

        let sqrt_discriminant = discriminant.sqrt();
        let t0 = (-bq - sqrt_discriminant) / (2.0 * aq);
        if t0 > 0.0 {
            return t0;
        }
        let t1 = (-bq + sqrt_discriminant) / (2.0 * aq);
        if t1 > 0.0 {
            return t1;
        }

        MISS
    }

    /// Normalized gradient of the surface function.
    fn surface_normal(&self, p: DVec3) -> DVec3 {
        DVec3::new(
            2.0 * self.a * p.x + self.d * p.y + self.e * p.z + self.g,
            2.0 * self.b * p.y + self.d * p.x + self.f * p.z + self.h,
            2.0 * self.c * p.z + self.e * p.x + self.f * p.y + self.i,
        )
        .normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::Sphere;

    #[test]
    fn test_quadric_matches_sphere() {
        for radius in [0.5, 1.0, 2.5] {
            let quadric = Quadric::origin_sphere(radius);
            let sphere = Sphere::new(DVec3::ZERO, radius).unwrap();

            for origin in [
                DVec3::new(0.0, 0.0, -10.0),
                DVec3::new(0.2, -0.1, -7.0),
                DVec3::new(-3.0, 4.0, 6.0),
            ] {
                // Aim slightly off center so the hit is not symmetric
                let target = DVec3::new(0.1, 0.05, 0.0);
                let ray = Ray::normalized(origin, target - origin);

                let expected = sphere.intersect(&ray);
                let actual = quadric.intersect(&ray);
                assert!(
                    (expected - actual).abs() < 1e-9,
                    "radius {} origin {:?}: sphere {} quadric {}",
                    radius,
                    origin,
                    expected,
                    actual
                );
            }
        }
    }

    #[test]
    fn test_ray_quadratic_coefficients() {
        // Unit sphere seen from z = -5: t² - 10t + 24 = 0
        let sphere = Quadric::origin_sphere(1.0);
        let ray = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
        assert_eq!(ray_quadratic(&sphere, &ray), (1.0, -10.0, 24.0));

        // yz - 1 = 0 from (0, 2, 3) along +Y: Bq picks up F·oz·dy only
        let cylinder = Quadric {
            f: 1.0,
            j: -1.0,
            ..Default::default()
        };
        let ray = Ray::new(DVec3::new(0.0, 2.0, 3.0), DVec3::Y);
        assert_eq!(ray_quadratic(&cylinder, &ray), (0.0, 3.0, 5.0));
    }

    #[test]
    fn test_quadric_from_inside_uses_far_root() {
        let quadric = Quadric::origin_sphere(2.0);
        let ray = Ray::new(DVec3::ZERO, DVec3::X);
        assert!((quadric.intersect(&ray) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_quadric_miss() {
        let quadric = Quadric::origin_sphere(1.0);

        // Negative discriminant
        let ray = Ray::new(DVec3::new(0.0, 5.0, -5.0), DVec3::Z);
        assert_eq!(quadric.intersect(&ray), MISS);

        // Both roots behind the origin
        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::Z);
        assert_eq!(quadric.intersect(&ray), MISS);
    }

    #[test]
    fn test_quadric_linear_case() {
        // y - 2 = 0, a plane expressed as a quadric
        let quadric = Quadric {
            h: 1.0,
            j: -2.0,
            ..Default::default()
        };

        let up = Ray::new(DVec3::ZERO, DVec3::Y);
        assert!((quadric.intersect(&up) - 2.0).abs() < 1e-12);

        // Solution lies behind the origin
        let down = Ray::new(DVec3::ZERO, -DVec3::Y);
        assert_eq!(quadric.intersect(&down), MISS);

        // Parallel: Aq and Bq both vanish
        let sideways = Ray::new(DVec3::ZERO, DVec3::X);
        assert_eq!(quadric.intersect(&sideways), MISS);
    }

    #[test]
    fn test_quadric_cross_terms() {
        // Hyperbolic paraboloid z = xy, i.e. xy - z = 0
        let quadric = Quadric {
            d: 1.0,
            i: -1.0,
            ..Default::default()
        };

        // From above at (2, 3), the surface sits at z = 6
        let ray = Ray::new(DVec3::new(2.0, 3.0, 10.0), -DVec3::Z);
        assert!((quadric.intersect(&ray) - 4.0).abs() < 1e-12);

        // Hyperbolic cylinder yz = 1 exercises the F terms
        let cylinder = Quadric {
            f: 1.0,
            j: -1.0,
            ..Default::default()
        };
        let ray = Ray::normalized(DVec3::new(0.0, 0.0, 0.0), DVec3::new(0.0, 1.0, 1.0));
        // Along y = z the surface is at y = z = 1, distance sqrt(2)
        assert!((cylinder.intersect(&ray) - 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_quadric_normal_is_gradient() {
        let quadric = Quadric::origin_sphere(3.0);
        let normal = quadric.surface_normal(DVec3::new(0.0, 3.0, 0.0));
        assert!((normal - DVec3::Y).length() < 1e-12);

        let paraboloid = Quadric {
            d: 1.0,
            i: -1.0,
            ..Default::default()
        };
        // Gradient of xy - z at (2, 3, 6) is (3, 2, -1)
        let normal = paraboloid.surface_normal(DVec3::new(2.0, 3.0, 6.0));
        assert!((normal - DVec3::new(3.0, 2.0, -1.0).normalize()).length() < 1e-12);
    }
}
