//! View-plane projection for primary ray generation.

use lumen_core::{Camera, SceneResult, ViewPlaneBasis};
use lumen_math::{DVec3, Ray};

/// Maps pixel coordinates to primary rays.
///
/// Row 0 is the bottom of the view plane and column 0 its left edge (along
/// `-x` of the basis). Each ray passes through the center of its pixel.
#[derive(Debug, Clone)]
pub struct Projection {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Cached computed values
    origin: DVec3,
    center: DVec3,
    basis: ViewPlaneBasis,
    plane_width: f64,
    plane_height: f64,
    pixel_width: f64,
    pixel_height: f64,
}

impl Projection {
    /// Set up the projection of `camera` onto an `image_width × image_height`
    /// raster.
    ///
    /// Fails when the camera's facing and up vectors are parallel.
    pub fn new(camera: &Camera, image_width: u32, image_height: u32) -> SceneResult<Self> {
        let basis = camera.viewplane_basis()?;

        Ok(Self {
            image_width,
            image_height,
            origin: camera.position,
            center: camera.viewplane_center(),
            basis,
            plane_width: camera.width,
            plane_height: camera.height,
            pixel_width: camera.width / image_width as f64,
            pixel_height: camera.height / image_height as f64,
        })
    }

    /// View-plane basis in use.
    pub fn basis(&self) -> ViewPlaneBasis {
        self.basis
    }

    /// Normalized primary ray through the center of pixel (row, col).
    pub fn primary_ray(&self, row: u32, col: u32) -> Ray {
        let row_offset = pixel_offset(self.plane_height, self.pixel_height, row);
        let col_offset = pixel_offset(self.plane_width, self.pixel_width, col);

        let pixel_center = self.center + self.basis.x * col_offset + self.basis.y * row_offset;
        Ray::normalized(self.origin, pixel_center - self.origin)
    }
}

/// Signed distance of a pixel center from the middle of the view plane.
#[inline]
fn pixel_offset(extent: f64, pixel_size: f64, index: u32) -> f64 {
    -extent / 2.0 + pixel_size * (index as f64 + 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(2.0, 2.0, DVec3::ZERO, DVec3::Z, DVec3::Y, 1.0).unwrap()
    }

    #[test]
    fn test_pixel_offset() {
        // Two pixels across an extent of 2: centers at -0.5 and +0.5
        assert_eq!(pixel_offset(2.0, 1.0, 0), -0.5);
        assert_eq!(pixel_offset(2.0, 1.0, 1), 0.5);
    }

    #[test]
    fn test_center_ray_follows_facing() {
        let projection = Projection::new(&camera(), 3, 3).unwrap();
        let ray = projection.primary_ray(1, 1);

        assert_eq!(ray.origin, DVec3::ZERO);
        assert!((ray.direction - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_corner_orientation() {
        let projection = Projection::new(&camera(), 2, 2).unwrap();

        // Row 0 is the bottom of the image, column 0 is image-left, which
        // is world +X for a camera facing +Z with +Y up
        let ray = projection.primary_ray(0, 0);
        let expected = DVec3::new(0.5, -0.5, 1.0).normalize();
        assert!((ray.direction - expected).length() < 1e-12);

        let ray = projection.primary_ray(1, 1);
        let expected = DVec3::new(-0.5, 0.5, 1.0).normalize();
        assert!((ray.direction - expected).length() < 1e-12);
    }

    #[test]
    fn test_offset_camera() {
        let mut camera = camera();
        camera.position = DVec3::new(0.0, 1.0, -5.0);
        camera.focal_length = 2.0;
        let projection = Projection::new(&camera, 1, 1).unwrap();

        let ray = projection.primary_ray(0, 0);
        assert_eq!(ray.origin, camera.position);
        assert!((ray.direction - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_parallel_basis_rejected() {
        let mut camera = camera();
        camera.up = DVec3::Z;
        assert!(Projection::new(&camera, 4, 4).is_err());
    }
}
