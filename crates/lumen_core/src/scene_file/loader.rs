//! Scene loading: JSON records to validated scene types.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use lumen_math::DVec3;

use crate::error::{SceneError, SceneResult};
use crate::scene::{Camera, Light, Object, Plane, Quadric, Scene, Sphere, Surface};
use crate::scene_file::types::{CameraRecord, LightRecord, ObjectRecord, SceneRecord, VectorField};

/// Load a scene file from disk.
///
/// # Example
///
/// ```ignore
/// use lumen_core::load_scene;
///
/// let scene = load_scene("scenes/demo.json")?;
/// println!("{}", scene.camera);
/// ```
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<Scene> {
    let path = path.as_ref();
    debug!("Loading scene from {}", path.display());

    let source = fs::read_to_string(path)?;
    load_scene_from_str(&source)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(source: &str) -> SceneResult<Scene> {
    let records: Vec<SceneRecord> = serde_json::from_str(source)?;
    build_scene(records)
}

/// Build a scene from already-parsed records.
///
/// The first camera is used; later ones are ignored with a warning.
/// Objects are ordered planes first, then spheres, then quadrics, each
/// group keeping declaration order.
pub fn build_scene(records: Vec<SceneRecord>) -> SceneResult<Scene> {
    if records.is_empty() {
        return Err(SceneError::EmptyScene);
    }

    let mut camera = None;
    let mut planes = Vec::new();
    let mut spheres = Vec::new();
    let mut quadrics = Vec::new();
    let mut lights = Vec::new();

    for record in &records {
        match record {
            SceneRecord::Camera(r) => {
                if camera.is_some() {
                    warn!("Ignoring extra camera definition");
                } else {
                    camera = Some(build_camera(r)?);
                }
            }
            SceneRecord::Light(r) => lights.push(build_light(r)?),
            SceneRecord::Plane(r) => planes.push(build_plane(r)?),
            SceneRecord::Sphere(r) => spheres.push(build_sphere(r)?),
            SceneRecord::Quadric(r) => quadrics.push(build_quadric(r)?),
        }
    }

    let camera = camera.ok_or(SceneError::MissingCamera)?;
    let objects: Vec<Object> = planes
        .into_iter()
        .chain(spheres)
        .chain(quadrics)
        .collect();

    info!(
        "Loaded scene: {} objects, {} lights",
        objects.len(),
        lights.len()
    );

    Ok(Scene {
        camera,
        objects,
        lights,
    })
}

fn build_camera(r: &CameraRecord) -> SceneResult<Camera> {
    let width = require(r.width, "camera", "width")?;
    let height = require(r.height, "camera", "height")?;

    Camera::new(
        width,
        height,
        r.position.map(vec3).unwrap_or(Camera::DEFAULT_POSITION),
        r.facing.map(vec3).unwrap_or(Camera::DEFAULT_FACING),
        r.up.map(vec3).unwrap_or(Camera::DEFAULT_UP),
        r.focal_length.unwrap_or(Camera::DEFAULT_FOCAL_LENGTH),
    )
}

fn build_light(r: &LightRecord) -> SceneResult<Light> {
    let position = require(r.position, "light", "position")?;
    let color = require(r.color, "light", "color")?;
    let radial = [
        require(r.radial_a0, "light", "radial-a0")?,
        require(r.radial_a1, "light", "radial-a1")?,
        require(r.radial_a2, "light", "radial-a2")?,
    ];

    let light = Light::point(vec3(position), vec3(color), radial);

    // Spotlight fields are all-or-nothing
    let wants_spotlight = r.theta.is_some_and(|theta| theta != 0.0)
        || r.direction.is_some()
        || r.angular_a0.is_some();
    if !wants_spotlight {
        return Ok(light);
    }

    let theta = r.theta.ok_or(SceneError::IncompleteSpotlight("theta"))?;
    let direction = r
        .direction
        .map(vec3)
        .ok_or(SceneError::IncompleteSpotlight("direction"))?;
    let angular_a0 = r
        .angular_a0
        .ok_or(SceneError::IncompleteSpotlight("angular-a0"))?;
    if direction == DVec3::ZERO {
        return Err(SceneError::ZeroSpotlightDirection);
    }

    Ok(light.with_spotlight(direction, theta, angular_a0))
}

fn build_plane(r: &ObjectRecord) -> SceneResult<Object> {
    let surface = build_surface(r, "plane")?;
    let position = require(r.position, "plane", "position")?;
    let normal = require(r.normal, "plane", "normal")?;

    Ok(Object::new(Plane::new(vec3(position), vec3(normal))?, surface))
}

fn build_sphere(r: &ObjectRecord) -> SceneResult<Object> {
    let surface = build_surface(r, "sphere")?;
    let position = require(r.position, "sphere", "position")?;
    let radius = require(r.radius, "sphere", "radius")?;

    Ok(Object::new(Sphere::new(vec3(position), radius)?, surface))
}

fn build_quadric(r: &ObjectRecord) -> SceneResult<Object> {
    let surface = build_surface(r, "quadric")?;

    // Missing coefficients are zero
    let coefficients = r.quadric_coefficients().map(|c| c.unwrap_or(0.0));

    Ok(Object::new(Quadric::new(coefficients), surface))
}

fn build_surface(r: &ObjectRecord, record: &'static str) -> SceneResult<Surface> {
    let defaults = Surface::default();
    let diffuse_color = r.diffuse_color.or(r.color).ok_or(SceneError::MissingField {
        record,
        field: "diffuse_color",
    })?;

    let surface = Surface {
        diffuse_color: vec3(diffuse_color),
        specular_color: r.specular_color.map(vec3).unwrap_or(defaults.specular_color),
        ns: r.ns.unwrap_or(defaults.ns),
        reflectivity: r.reflectivity.unwrap_or(defaults.reflectivity),
        refractivity: r.refractivity.unwrap_or(defaults.refractivity),
        ior: r.ior.unwrap_or(defaults.ior),
    };
    surface.validate()?;

    Ok(surface)
}

fn require<T>(value: Option<T>, record: &'static str, field: &'static str) -> SceneResult<T> {
    value.ok_or(SceneError::MissingField { record, field })
}

#[inline]
fn vec3(v: VectorField) -> DVec3 {
    DVec3::from_array(v)
}
