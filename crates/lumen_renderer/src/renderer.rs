//! Recursive ray tracer.
//!
//! Implements Whitted-style shading with:
//! - Diffuse and specular terms from point and spot lights
//! - Hard shadows
//! - Reflection and refraction recursing to a fixed depth

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use log::{debug, info, trace, warn};
use lumen_core::{Scene, SceneError};
use lumen_math::{direction_between, reflect, DVec3, Ray};
use rayon::prelude::*;
use thiserror::Error;

use crate::camera::Projection;
use crate::hittable::{nearest_hit, Hit, Hittable};
use crate::illumination::{Color, Illumination, SpotlightCutoff};
use crate::pixel_buffer::{color_to_rgb, PixelBuffer};

/// Default recursion depth for reflected and refracted rays.
pub const DEFAULT_MAX_DEPTH: u32 = 7;

/// Color of primary rays that hit nothing.
pub const DEFAULT_BACKGROUND: Color = Color::splat(0.5);

/// Allowed difference between the cosines of the entry and exit angles of
/// an internal bounce.
const EXIT_ANGLE_TOLERANCE: f64 = 1e-6;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum reflection/refraction depth
    pub max_depth: u32,
    /// Background color when a primary ray doesn't hit anything
    pub background: Color,
    /// Whether spotlight cones exclude points outside them
    pub spotlight_cutoff: SpotlightCutoff,
    /// Trace rows in parallel
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            background: DEFAULT_BACKGROUND,
            spotlight_cutoff: SpotlightCutoff::Bypass,
            parallel: false,
        }
    }
}

impl RenderConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_spotlight_cutoff(mut self, spotlight_cutoff: SpotlightCutoff) -> Self {
        self.spotlight_cutoff = spotlight_cutoff;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Errors that stop a render before any pixel is traced.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid camera: {0}")]
    Camera(#[from] SceneError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Ray counters for one render. Safe to update from worker threads.
#[derive(Debug, Default)]
pub struct RayStats {
    primary: AtomicU64,
    shadow: AtomicU64,
    secondary: AtomicU64,
    refraction_exit_mismatches: AtomicU64,
}

impl RayStats {
    pub fn primary(&self) -> u64 {
        self.primary.load(Ordering::Relaxed)
    }

    pub fn shadow(&self) -> u64 {
        self.shadow.load(Ordering::Relaxed)
    }

    /// Reflected, refraction probe and refraction exit rays.
    pub fn secondary(&self) -> u64 {
        self.secondary.load(Ordering::Relaxed)
    }

    /// Internal bounces whose exit angle differed from the entry angle.
    pub fn refraction_exit_mismatches(&self) -> u64 {
        self.refraction_exit_mismatches.load(Ordering::Relaxed)
    }

    #[inline]
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Read-only state shared by every ray of a render.
pub struct RenderContext<'a> {
    scene: &'a Scene,
    config: &'a RenderConfig,
    stats: RayStats,
}

impl<'a> RenderContext<'a> {
    pub fn new(scene: &'a Scene, config: &'a RenderConfig) -> Self {
        Self {
            scene,
            config,
            stats: RayStats::default(),
        }
    }

    pub fn stats(&self) -> &RayStats {
        &self.stats
    }

    /// Find the nearest object along `ray`.
    fn shoot(&self, ray: &Ray, counter: &AtomicU64) -> Option<Hit<'a>> {
        RayStats::bump(counter);
        let scene: &'a Scene = self.scene;
        nearest_hit(&scene.objects, ray)
    }

    /// Color seen along a primary ray.
    pub fn trace(&self, ray: &Ray) -> Color {
        match self.shoot(ray, &self.stats.primary) {
            Some(hit) => self.shade(&hit, ray.direction, self.config.max_depth),
            None => self.config.background,
        }
    }

    /// Color of `hit` seen along `view_direction`, recursing for reflection
    /// and refraction while `depth > 0`.
    pub fn shade(&self, hit: &Hit<'a>, view_direction: DVec3, depth: u32) -> Color {
        let surface = &hit.object.surface;
        let normal = hit.object.surface_normal(hit.point);

        let mut color = self.local_illumination(hit, normal, view_direction);
        if depth == 0 {
            return color;
        }

        // Secondary rays leave from the side the viewer is on
        let facing_normal = if normal.dot(view_direction) > 0.0 {
            -normal
        } else {
            normal
        };

        if surface.reflectivity > 0.0 {
            color += self.reflective_contribution(hit, facing_normal, view_direction, depth)
                * surface.reflectivity;
        }
        if surface.refractivity > 0.0 {
            color += self.refractive_contribution(hit, facing_normal, view_direction, depth)
                * surface.refractivity;
        }

        color
    }

    /// Diffuse and specular light reaching `hit` directly, scaled by the
    /// share of energy not reserved for secondary rays.
    fn local_illumination(&self, hit: &Hit<'a>, normal: DVec3, view_direction: DVec3) -> Color {
        let surface = &hit.object.surface;
        let to_viewer = -view_direction;

        let mut diffuse = Color::ZERO;
        let mut specular = Color::ZERO;

        for light in &self.scene.lights {
            let intersectward = direction_between(light.position, hit.point);
            if !light.is_contributing(intersectward, self.config.spotlight_cutoff) {
                continue;
            }
            if self.is_occluded(hit.point, light.position) {
                continue;
            }

            let light_normal = if normal.dot(intersectward) > 0.0 {
                -normal
            } else {
                normal
            };
            let attenuation = light.radial_attenuation(hit.point.distance(light.position));

            diffuse += light.diffuse_contribution(intersectward, light_normal) * attenuation;
            specular += light.specular_contribution(intersectward, light_normal, to_viewer, surface.ns)
                * attenuation;
        }

        (surface.diffuse_color * diffuse + surface.specular_color * specular) * surface.local_weight()
    }

    /// Whether any object sits between `point` and `light_position`.
    fn is_occluded(&self, point: DVec3, light_position: DVec3) -> bool {
        let to_light = light_position - point;
        let distance = to_light.length();
        let ray = Ray::normalized(point, to_light).scooched();

        self.shoot(&ray, &self.stats.shadow)
            .is_some_and(|blocker| blocker.t <= distance)
    }

    fn reflective_contribution(
        &self,
        hit: &Hit<'a>,
        normal: DVec3,
        view_direction: DVec3,
        depth: u32,
    ) -> Color {
        let ray = Ray::normalized(hit.point, reflect(view_direction, normal)).scooched();

        match self.shoot(&ray, &self.stats.secondary) {
            Some(next) => self.shade(&next, ray.direction, depth - 1),
            None => Color::ZERO,
        }
    }

    fn refractive_contribution(
        &self,
        hit: &Hit<'a>,
        normal: DVec3,
        view_direction: DVec3,
        depth: u32,
    ) -> Color {
        match self.refracted_ray(hit, normal, view_direction) {
            Some((ray, Some(next))) => self.shade(&next, ray.direction, depth - 1),
            _ => Color::ZERO,
        }
    }

    /// The ray carrying refracted light away from `hit`, paired with what it
    /// hits. `None` on total internal reflection.
    ///
    /// The bent ray is a probe: when it reaches the far side of the same
    /// object the light is assumed to leave along the original view
    /// direction, so the exit ray is rebuilt there.
    fn refracted_ray(
        &self,
        hit: &Hit<'a>,
        normal: DVec3,
        view_direction: DVec3,
    ) -> Option<(Ray, Option<Hit<'a>>)> {
        let axis = normal.cross(view_direction);
        let internal = if axis == DVec3::ZERO {
            view_direction
        } else {
            let a = axis.normalize();
            let b = a.cross(normal);
            let sin_phi = view_direction.dot(b) / hit.object.surface.ior;
            let cos_squared = 1.0 - sin_phi * sin_phi;
            if cos_squared < 0.0 {
                return None;
            }
            -cos_squared.sqrt() * normal + sin_phi * b
        };

        let probe = Ray::normalized(hit.point, internal).scooched();
        let probe_hit = self.shoot(&probe, &self.stats.secondary);

        match probe_hit {
            Some(exit) if exit.index == hit.index => {
                self.check_exit_angle(normal, &exit, view_direction);
                let ray = Ray::normalized(exit.point, view_direction).scooched();
                Some((ray, self.shoot(&ray, &self.stats.secondary)))
            }
            _ => Some((probe, probe_hit)),
        }
    }

    /// Compare the angle the view ray entered at with the angle it leaves at.
    fn check_exit_angle(&self, entry_normal: DVec3, exit: &Hit<'a>, view_direction: DVec3) {
        let entry_cos = view_direction.dot(entry_normal).abs();
        let exit_normal = exit.object.surface_normal(exit.point);
        let exit_cos = view_direction.dot(exit_normal).abs();

        if (entry_cos - exit_cos).abs() > EXIT_ANGLE_TOLERANCE {
            RayStats::bump(&self.stats.refraction_exit_mismatches);
            trace!(
                "Refraction exit angle mismatch on object {} at {:?}: entry cos {:.6}, exit cos {:.6}",
                exit.index,
                exit.point,
                entry_cos,
                exit_cos
            );
        }
    }
}

/// Render `scene` to a `width × height` pixel buffer.
///
/// Camera problems are reported before any pixel is traced.
pub fn render(
    scene: &Scene,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> RenderResult<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }

    let projection = Projection::new(&scene.camera, width, height)?;
    let context = RenderContext::new(scene, config);
    let mut buffer = PixelBuffer::new(width, height);

    debug!("View plane basis: {:?}", projection.basis());
    info!(
        "Rendering {}x{}: {} objects, {} lights, max depth {}{}",
        width,
        height,
        scene.objects.len(),
        scene.lights.len(),
        config.max_depth,
        if config.parallel { " (parallel)" } else { "" }
    );

    let start = Instant::now();

    if config.parallel {
        buffer.par_rows_mut().for_each(|(row, pixels)| {
            for (col, pixel) in pixels.iter_mut().enumerate() {
                let color = context.trace(&projection.primary_ray(row, col as u32));
                *pixel = color_to_rgb(color);
            }
        });
    } else {
        for row in 0..height {
            for col in 0..width {
                let color = context.trace(&projection.primary_ray(row, col));
                buffer.set(row, col, color);
            }
        }
    }

    let stats = context.stats();
    info!(
        "Render finished in {:.2?}: {} primary, {} shadow, {} secondary rays",
        start.elapsed(),
        stats.primary(),
        stats.shadow(),
        stats.secondary()
    );

    let mismatches = stats.refraction_exit_mismatches();
    if mismatches > 0 {
        warn!(
            "{} refracted rays left an object at a different angle than they entered; \
             the straight-through exit is an approximation there",
            mismatches
        );
    }

    Ok(buffer)
}
