//! Direct illumination from point and spot lights.
//!
//! Every function takes `intersectward`, the unit vector pointing from the
//! light toward the shaded point.

use lumen_core::Light;
use lumen_math::{reflect, DVec3};

/// Color type alias (RGB values typically 0-1)
pub type Color = DVec3;

/// Whether a spotlight's cone limits the points it lights.
///
/// `Bypass` lights every point regardless of the cone and only applies the
/// angular falloff, which is how existing scenes were authored. `Enforce`
/// skips points outside half the cone angle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpotlightCutoff {
    #[default]
    Bypass,
    Enforce,
}

/// Per-light shading terms.
pub trait Illumination {
    /// Whether this light reaches a point seen along `intersectward`.
    fn is_contributing(&self, intersectward: DVec3, cutoff: SpotlightCutoff) -> bool;

    /// Light color, scaled by the angular falloff for spotlights.
    fn common_contribution(&self, intersectward: DVec3) -> Color;

    /// Lambertian term. `normal` must face the light.
    fn diffuse_contribution(&self, intersectward: DVec3, normal: DVec3) -> Color;

    /// Phong term with exponent `ns`. `to_viewer` is the unit vector from
    /// the point toward the viewer.
    fn specular_contribution(
        &self,
        intersectward: DVec3,
        normal: DVec3,
        to_viewer: DVec3,
        ns: f64,
    ) -> Color;

    /// Radial attenuation factor at `distance` from the light.
    fn radial_attenuation(&self, distance: f64) -> f64;
}

impl Illumination for Light {
    fn is_contributing(&self, intersectward: DVec3, cutoff: SpotlightCutoff) -> bool {
        match (cutoff, &self.spotlight) {
            (SpotlightCutoff::Bypass, _) | (_, None) => true,
            (SpotlightCutoff::Enforce, Some(spot)) => {
                let cos = intersectward.dot(spot.direction).clamp(-1.0, 1.0);
                cos.acos() <= spot.theta / 2.0
            }
        }
    }

    fn common_contribution(&self, intersectward: DVec3) -> Color {
        match &self.spotlight {
            None => self.color,
            Some(spot) => {
                let falloff = intersectward.dot(spot.direction).powf(spot.angular_a0);
                // Fractional exponents of points behind the light
                if falloff.is_nan() {
                    Color::ZERO
                } else {
                    self.color * falloff
                }
            }
        }
    }

    fn diffuse_contribution(&self, intersectward: DVec3, normal: DVec3) -> Color {
        self.common_contribution(intersectward) * -intersectward.dot(normal)
    }

    fn specular_contribution(
        &self,
        intersectward: DVec3,
        normal: DVec3,
        to_viewer: DVec3,
        ns: f64,
    ) -> Color {
        let alignment = reflect(intersectward, normal).dot(to_viewer).max(0.0);
        self.common_contribution(intersectward) * alignment.powf(ns)
    }

    fn radial_attenuation(&self, distance: f64) -> f64 {
        1.0 / (self.radial_a2 * distance * distance + self.radial_a1 * distance + self.radial_a0)
    }
}
