//! Raw records as they appear in a scene file.
//!
//! Every field is optional here; defaults and required-field checks are
//! applied by the loader.

use serde::Deserialize;

/// A three-component vector literal, `[x, y, z]`.
pub type VectorField = [f64; 3];

/// One entry of the top-level scene array, tagged by its `"type"` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneRecord {
    Camera(CameraRecord),
    Light(LightRecord),
    Plane(ObjectRecord),
    Sphere(ObjectRecord),
    Quadric(ObjectRecord),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CameraRecord {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub position: Option<VectorField>,
    pub facing: Option<VectorField>,
    pub up: Option<VectorField>,
    pub focal_length: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LightRecord {
    pub position: Option<VectorField>,
    pub color: Option<VectorField>,

    #[serde(rename = "radial-a0", alias = "radial_a0")]
    pub radial_a0: Option<f64>,

    #[serde(rename = "radial-a1", alias = "radial_a1")]
    pub radial_a1: Option<f64>,

    #[serde(rename = "radial-a2", alias = "radial_a2")]
    pub radial_a2: Option<f64>,

    pub direction: Option<VectorField>,

    /// Full cone angle in degrees
    pub theta: Option<f64>,

    #[serde(rename = "angular-a0", alias = "angular_a0")]
    pub angular_a0: Option<f64>,
}

/// Fields of planes, spheres and quadrics.
///
/// Shape fields that do not apply to a record's type are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectRecord {
    pub diffuse_color: Option<VectorField>,
    /// Older spelling of `diffuse_color`
    pub color: Option<VectorField>,
    pub specular_color: Option<VectorField>,
    pub ns: Option<f64>,
    pub reflectivity: Option<f64>,
    pub refractivity: Option<f64>,
    pub ior: Option<f64>,

    // Plane and sphere
    pub position: Option<VectorField>,
    pub normal: Option<VectorField>,
    pub radius: Option<f64>,

    // Quadric
    #[serde(rename = "A")]
    pub a: Option<f64>,
    #[serde(rename = "B")]
    pub b: Option<f64>,
    #[serde(rename = "C")]
    pub c: Option<f64>,
    #[serde(rename = "D")]
    pub d: Option<f64>,
    #[serde(rename = "E")]
    pub e: Option<f64>,
    #[serde(rename = "F")]
    pub f: Option<f64>,
    #[serde(rename = "G")]
    pub g: Option<f64>,
    #[serde(rename = "H")]
    pub h: Option<f64>,
    #[serde(rename = "I")]
    pub i: Option<f64>,
    #[serde(rename = "J")]
    pub j: Option<f64>,
}

impl ObjectRecord {
    /// Quadric coefficients A through J as written.
    pub fn quadric_coefficients(&self) -> [Option<f64>; 10] {
        [
            self.a, self.b, self.c, self.d, self.e, self.f, self.g, self.h, self.i, self.j,
        ]
    }
}
