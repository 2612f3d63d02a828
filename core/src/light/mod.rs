//! Light

use crate::geometry::*;
use crate::interaction::*;
use crate::pbrt::*;
use crate::rng::*;
use crate::spectrum::*;
use std::sync::Arc;

mod light_type;

// Re-export
pub use light_type::*;

/// Return value for `Light::sample()`.
#[derive(Copy, Clone, Debug)]
pub struct LightSample {
    /// Unit direction from the light toward the shaded point.
    pub direction: Vector3f,

    /// Radiance carried along `direction`.
    pub emission: Spectrum,

    /// Solid angle density of `direction` as seen from the shaded point.
    pub pdf: Float,

    /// Distance from the shaded point at which the light should be hit.
    /// Infinite for lights at infinity.
    pub expected_distance: Float,
}

impl LightSample {
    /// Return a new `LightSample`.
    ///
    /// * `direction`         - Unit direction from the light toward the point.
    /// * `emission`          - Radiance carried along `direction`.
    /// * `pdf`               - Solid angle density.
    /// * `expected_distance` - Distance to the light.
    pub fn new(direction: Vector3f, emission: Spectrum, pdf: Float, expected_distance: Float) -> Self {
        Self {
            direction,
            emission,
            pdf,
            expected_distance,
        }
    }
}

/// Light trait provides common behavior.
pub trait Light {
    /// Returns the type of light.
    fn get_type(&self) -> LightType;

    /// Sample an incident direction at a surface point.
    ///
    /// * `si`      - The shaded surface point.
    /// * `sampler` - Sampler.
    fn sample(&self, si: &SurfaceInteraction, sampler: &mut Sampler) -> LightSample;

    /// Returns the radiance emitted toward the scene along a direction.
    ///
    /// * `d` - Unit direction pointing from the scene toward the light.
    fn eval(&self, d: &Vector3f) -> Spectrum;

    /// Returns the solid angle density with which `sample()` would produce the
    /// given direction.
    ///
    /// * `p` - The shaded point.
    /// * `d` - Unit direction from the light toward `p`.
    fn pdf(&self, p: &Point3f, d: &Vector3f) -> Float;

    /// Returns the scalar emitted power used to build selection strategies.
    fn power(&self) -> Float;

    /// Returns a representative distance from a point to the light.
    ///
    /// * `p` - The point.
    fn distance(&self, p: &Point3f) -> Float;

    /// Returns the identifier of the emissive geometry that represents the
    /// light in the scene, if any.
    fn geometry_id(&self) -> Option<usize> {
        None
    }

    /// Returns true if the light is described by a delta distribution.
    fn is_dirac(&self) -> bool {
        self.get_type().matches(LightType::DIRAC)
    }

    /// Returns true if the light is located at infinity.
    fn is_infinite(&self) -> bool {
        self.get_type().matches(LightType::INFINITE)
    }
}

/// Atomic reference counted `Light`.
pub type ArcLight = Arc<dyn Light + Send + Sync>;
