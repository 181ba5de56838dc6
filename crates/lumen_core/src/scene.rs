//! Scene records for Lumen.
//!
//! These are the read-only inputs of a render: one camera, an ordered list
//! of objects and a list of lights. Nothing here is mutated while tracing.

use std::fmt;

use lumen_math::DVec3;

use crate::error::{SceneError, SceneResult};

/// Pinhole camera looking through a rectangular view plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Physical width of the view plane
    pub width: f64,

    /// Physical height of the view plane
    pub height: f64,

    /// World position of the eye
    pub position: DVec3,

    /// Unit viewing direction
    pub facing: DVec3,

    /// Unit up vector, must not be parallel to `facing`
    pub up: DVec3,

    /// Distance from the eye to the view plane
    pub focal_length: f64,
}

/// Orthonormal basis of the view plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewPlaneBasis {
    /// Image-right direction
    pub x: DVec3,
    /// Image-up direction
    pub y: DVec3,
    /// Points back toward the eye (`-facing`)
    pub z: DVec3,
}

impl Camera {
    pub const DEFAULT_POSITION: DVec3 = DVec3::ZERO;
    pub const DEFAULT_FACING: DVec3 = DVec3::Z;
    pub const DEFAULT_UP: DVec3 = DVec3::Y;
    pub const DEFAULT_FOCAL_LENGTH: f64 = 1.0;

    /// Create a validated camera.
    ///
    /// `facing` and `up` are normalized. Fails on a non-positive extent or
    /// focal length, a zero-length vector, or parallel `facing` and `up`.
    pub fn new(
        width: f64,
        height: f64,
        position: DVec3,
        facing: DVec3,
        up: DVec3,
        focal_length: f64,
    ) -> SceneResult<Self> {
        if !(width > 0.0) {
            return Err(SceneError::NonPositiveCamera { field: "width" });
        }
        if !(height > 0.0) {
            return Err(SceneError::NonPositiveCamera { field: "height" });
        }
        if !(focal_length > 0.0) {
            return Err(SceneError::NonPositiveCamera { field: "focal_length" });
        }
        if facing == DVec3::ZERO {
            return Err(SceneError::ZeroCameraVector { field: "facing" });
        }
        if up == DVec3::ZERO {
            return Err(SceneError::ZeroCameraVector { field: "up" });
        }

        let camera = Self {
            width,
            height,
            position,
            facing: facing.normalize(),
            up: up.normalize(),
            focal_length,
        };
        camera.viewplane_basis()?;
        Ok(camera)
    }

    /// Center of the view plane, one focal length along `facing`.
    pub fn viewplane_center(&self) -> DVec3 {
        self.position + self.facing * self.focal_length
    }

    /// Unit vectors spanning the view plane.
    ///
    /// `x = normalize(facing × up)`, `z = -facing`, `y = z × x`. The order
    /// and signs fix the orientation of the rendered image.
    pub fn viewplane_basis(&self) -> SceneResult<ViewPlaneBasis> {
        let cross = self.facing.cross(self.up);
        if cross == DVec3::ZERO {
            return Err(SceneError::ParallelCameraBasis);
        }

        let x = cross.normalize();
        let z = -self.facing;
        let y = z.cross(x);
        Ok(ViewPlaneBasis { x, y, z })
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Camera:")?;
        writeln!(f, "\tPosition: {}", fmt_vec(self.position))?;
        writeln!(f, "\tFacing: {}", fmt_vec(self.facing))?;
        writeln!(f, "\tUp: {}", fmt_vec(self.up))?;
        writeln!(f, "\tWidth: {:.6}", self.width)?;
        writeln!(f, "\tHeight: {:.6}", self.height)?;
        write!(f, "\tFocal Length: {:.6}", self.focal_length)
    }
}

/// Cone parameters of a spotlight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spotlight {
    /// Unit axis of the cone
    pub direction: DVec3,
    /// Full cone angle in radians
    pub theta: f64,
    /// Angular falloff exponent
    pub angular_a0: f64,
}

/// Point light, optionally restricted to a cone.
#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub position: DVec3,

    /// RGB intensity, conventionally in [0, 1]
    pub color: DVec3,

    /// Radial attenuation `1 / (a2·d² + a1·d + a0)`
    pub radial_a0: f64,
    pub radial_a1: f64,
    pub radial_a2: f64,

    /// Present only for spotlights
    pub spotlight: Option<Spotlight>,
}

impl Light {
    /// Create an omnidirectional point light.
    pub fn point(position: DVec3, color: DVec3, radial: [f64; 3]) -> Self {
        Self {
            position,
            color,
            radial_a0: radial[0],
            radial_a1: radial[1],
            radial_a2: radial[2],
            spotlight: None,
        }
    }

    /// Turn this light into a spotlight.
    ///
    /// `theta_degrees` is the full cone angle. A zero angle leaves the light
    /// omnidirectional.
    pub fn with_spotlight(mut self, direction: DVec3, theta_degrees: f64, angular_a0: f64) -> Self {
        self.spotlight = if theta_degrees != 0.0 {
            Some(Spotlight {
                direction: direction.normalize(),
                theta: theta_degrees.to_radians(),
                angular_a0,
            })
        } else {
            None
        };
        self
    }

    /// Whether this light has a cone.
    pub fn is_spotlight(&self) -> bool {
        self.spotlight.is_some()
    }
}

impl fmt::Display for Light {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Light:")?;
        writeln!(f, "\tPosition: {}", fmt_vec(self.position))?;
        if let Some(spot) = &self.spotlight {
            writeln!(f, "\tDirection: {}", fmt_vec(spot.direction))?;
        }
        writeln!(f, "\tColor: {}", fmt_vec(self.color))?;
        writeln!(f, "\tRadial-a0: {:.6}", self.radial_a0)?;
        writeln!(f, "\tRadial-a1: {:.6}", self.radial_a1)?;
        write!(f, "\tRadial-a2: {:.6}", self.radial_a2)?;
        if let Some(spot) = &self.spotlight {
            write!(f, "\n\tTheta: {:.6}", spot.theta)?;
            write!(f, "\n\tAngular-a0: {:.6}", spot.angular_a0)?;
        }
        Ok(())
    }
}

/// Shading parameters shared by every primitive kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub diffuse_color: DVec3,
    pub specular_color: DVec3,

    /// Phong exponent
    pub ns: f64,

    /// Share of the color taken from the reflected ray
    pub reflectivity: f64,

    /// Share of the color taken from the refracted ray
    pub refractivity: f64,

    /// Relative index of refraction, used only when `refractivity > 0`
    pub ior: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            diffuse_color: DVec3::splat(0.5), // Grey default
            specular_color: DVec3::ZERO,
            ns: 20.0,
            reflectivity: 0.0,
            refractivity: 0.0,
            ior: 1.0,
        }
    }
}

impl Surface {
    /// Create a matte surface with the given diffuse color.
    pub fn new(diffuse_color: DVec3) -> Self {
        Self {
            diffuse_color,
            ..Default::default()
        }
    }

    /// Set the specular color and Phong exponent.
    pub fn with_specular(mut self, specular_color: DVec3, ns: f64) -> Self {
        self.specular_color = specular_color;
        self.ns = ns;
        self
    }

    /// Set the reflectivity.
    pub fn with_reflectivity(mut self, reflectivity: f64) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    /// Set the refractivity and index of refraction.
    pub fn with_refraction(mut self, refractivity: f64, ior: f64) -> Self {
        self.refractivity = refractivity;
        self.ior = ior;
        self
    }

    /// Fraction of the local illumination kept after reserving energy for
    /// secondary rays.
    #[inline]
    pub fn local_weight(&self) -> f64 {
        1.0 - (self.reflectivity + self.refractivity)
    }

    /// Check the reflectivity/refractivity budget and the index of refraction.
    pub fn validate(&self) -> SceneResult<()> {
        for (field, value) in [
            ("reflectivity", self.reflectivity),
            ("refractivity", self.refractivity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SceneError::OutOfUnitRange { field, value });
            }
        }

        let budget = self.reflectivity + self.refractivity;
        if budget > 1.0 {
            return Err(SceneError::EnergyOverBudget(budget));
        }

        if self.refractivity > 0.0 && !(self.ior > 0.0) {
            return Err(SceneError::NonPositiveIor(self.ior));
        }

        Ok(())
    }
}

/// Infinite plane through `position`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub position: DVec3,
    /// Unit normal
    pub normal: DVec3,
}

impl Plane {
    /// Create a plane, normalizing `normal`.
    pub fn new(position: DVec3, normal: DVec3) -> SceneResult<Self> {
        if normal == DVec3::ZERO {
            return Err(SceneError::ZeroPlaneNormal);
        }
        Ok(Self {
            position,
            normal: normal.normalize(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: DVec3,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: DVec3, radius: f64) -> SceneResult<Self> {
        if !(radius > 0.0) {
            return Err(SceneError::NonPositiveRadius(radius));
        }
        Ok(Self { center, radius })
    }
}

/// General quadric `Ax² + By² + Cz² + Dxy + Exz + Fyz + Gx + Hy + Iz + J = 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Quadric {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
    pub g: f64,
    pub h: f64,
    pub i: f64,
    pub j: f64,
}

impl Quadric {
    /// Create a quadric from the coefficients A through J.
    pub fn new(coefficients: [f64; 10]) -> Self {
        let [a, b, c, d, e, f, g, h, i, j] = coefficients;
        Self {
            a,
            b,
            c,
            d,
            e,
            f,
            g,
            h,
            i,
            j,
        }
    }

    /// Sphere of the given radius centered at the origin.
    pub fn origin_sphere(radius: f64) -> Self {
        Self {
            a: 1.0,
            b: 1.0,
            c: 1.0,
            j: -radius * radius,
            ..Default::default()
        }
    }

    /// Coefficients A through J.
    pub fn coefficients(&self) -> [f64; 10] {
        [
            self.a, self.b, self.c, self.d, self.e, self.f, self.g, self.h, self.i, self.j,
        ]
    }
}

/// Geometry of an object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Plane(Plane),
    Sphere(Sphere),
    Quadric(Quadric),
}

impl Shape {
    /// Lowercase kind name, as used in scene files.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Plane(_) => "plane",
            Shape::Sphere(_) => "sphere",
            Shape::Quadric(_) => "quadric",
        }
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Quadric> for Shape {
    fn from(quadric: Quadric) -> Self {
        Shape::Quadric(quadric)
    }
}

/// A renderable primitive: geometry plus surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    pub shape: Shape,
    pub surface: Surface,
}

impl Object {
    pub fn new(shape: impl Into<Shape>, surface: Surface) -> Self {
        Self {
            shape: shape.into(),
            surface,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shape {
            Shape::Plane(p) => {
                writeln!(f, "Plane:")?;
                writeln!(f, "\tPosition: {}", fmt_vec(p.position))?;
                writeln!(f, "\tNormal: {}", fmt_vec(p.normal))?;
            }
            Shape::Sphere(s) => {
                writeln!(f, "Sphere:")?;
                writeln!(f, "\tPosition: {}", fmt_vec(s.center))?;
                writeln!(f, "\tRadius: {:.6}", s.radius)?;
            }
            Shape::Quadric(q) => {
                writeln!(f, "Quadric:")?;
                for (name, value) in "ABCDEFGHIJ".chars().zip(q.coefficients()) {
                    writeln!(f, "\t{}: {:.6}", name, value)?;
                }
            }
        }

        let s = &self.surface;
        writeln!(f, "\tDiffuseColor: {}", fmt_vec(s.diffuse_color))?;
        writeln!(f, "\tSpecularColor: {}", fmt_vec(s.specular_color))?;
        writeln!(f, "\tNS: {:.6}", s.ns)?;
        writeln!(f, "\tReflectivity: {:.6}", s.reflectivity)?;
        write!(f, "\tRefractivity: {:.6}", s.refractivity)?;
        if s.refractivity > 0.0 {
            write!(f, "\n\tIOR: {:.6}", s.ior)?;
        }
        Ok(())
    }
}

/// A complete scene.
///
/// `objects` is searched in order; when two objects are hit at exactly the
/// same distance the earlier one wins. Loaded scenes list all planes, then
/// all spheres, then all quadrics.
#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: Camera,
    pub objects: Vec<Object>,
    pub lights: Vec<Light>,
}

impl Scene {
    /// Create an empty scene viewed through `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            objects: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Append an object.
    pub fn add_object(&mut self, object: Object) {
        self.objects.push(object);
    }

    /// Append a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.camera)?;
        for object in &self.objects {
            writeln!(f)?;
            writeln!(f, "{}", object)?;
        }
        for light in &self.lights {
            writeln!(f)?;
            writeln!(f, "{}", light)?;
        }
        Ok(())
    }
}

fn fmt_vec(v: DVec3) -> String {
    format!("[{:.6}, {:.6}, {:.6}]", v.x, v.y, v.z)
}
