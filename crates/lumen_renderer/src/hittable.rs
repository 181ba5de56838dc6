//! Hittable trait and nearest-hit search.

use lumen_core::{Object, Shape};
use lumen_math::{DVec3, Ray, MISS};

/// Geometry a ray can be tested against.
pub trait Hittable {
    /// Distance along `ray` to the nearest positive intersection, or
    /// [`MISS`] when there is none.
    fn intersect(&self, ray: &Ray) -> f64;

    /// Unit surface normal at `point`, which is assumed to lie on the surface.
    fn surface_normal(&self, point: DVec3) -> DVec3;
}

impl Hittable for Shape {
    fn intersect(&self, ray: &Ray) -> f64 {
        match self {
            Shape::Plane(plane) => plane.intersect(ray),
            Shape::Sphere(sphere) => sphere.intersect(ray),
            Shape::Quadric(quadric) => quadric.intersect(ray),
        }
    }

    fn surface_normal(&self, point: DVec3) -> DVec3 {
        match self {
            Shape::Plane(plane) => plane.surface_normal(point),
            Shape::Sphere(sphere) => sphere.surface_normal(point),
            Shape::Quadric(quadric) => quadric.surface_normal(point),
        }
    }
}

impl Hittable for Object {
    #[inline]
    fn intersect(&self, ray: &Ray) -> f64 {
        self.shape.intersect(ray)
    }

    #[inline]
    fn surface_normal(&self, point: DVec3) -> DVec3 {
        self.shape.surface_normal(point)
    }
}

/// Record of the closest ray-object intersection.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    /// Position of the object in the scene's object list
    pub index: usize,
    /// The object that was hit
    pub object: &'a Object,
    /// Ray parameter of the intersection
    pub t: f64,
    /// Point of intersection
    pub point: DVec3,
}

/// Find the closest object hit by `ray`.
///
/// Every object is tested. Ties keep the earlier object because only a
/// strictly smaller `t` replaces the current best.
pub fn nearest_hit<'a>(objects: &'a [Object], ray: &Ray) -> Option<Hit<'a>> {
    let mut best: Option<(usize, f64)> = None;
    let mut best_t = MISS;

    for (index, object) in objects.iter().enumerate() {
        let t = object.intersect(ray);
        if t < best_t {
            best_t = t;
            best = Some((index, t));
        }
    }

    best.map(|(index, t)| Hit {
        index,
        object: &objects[index],
        t,
        point: ray.at(t),
    })
}
