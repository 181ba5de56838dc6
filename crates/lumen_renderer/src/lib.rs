//! Lumen Renderer - recursive ray tracing on the CPU.
//!
//! Shoots one primary ray per pixel, finds the nearest primitive by a
//! linear search, lights it with point and spot lights (diffuse, specular,
//! radial and angular attenuation, hard shadows) and recurses for
//! reflection and refraction up to a fixed depth.

mod camera;
mod hittable;
mod illumination;
mod output;
mod pixel_buffer;
mod plane;
mod quadric;
mod renderer;
mod sphere;

pub use camera::Projection;
pub use hittable::{nearest_hit, Hit, Hittable};
pub use illumination::{Color, Illumination, SpotlightCutoff};
pub use output::{save_image, write_ppm, ImageFormat, OutputError, OutputResult, PpmFormat};
pub use pixel_buffer::{color_to_rgb, PixelBuffer};
pub use renderer::{
    render, RayStats, RenderConfig, RenderContext, RenderError, RenderResult, DEFAULT_BACKGROUND,
    DEFAULT_MAX_DEPTH,
};

/// Re-export the scene types and math the renderer works with
pub use lumen_core::{Camera, Light, Object, Plane, Quadric, Scene, Shape, Sphere, Surface};
pub use lumen_math::{DVec3, Ray};
