//! Directional Source

use lumen::geometry::*;
use lumen::interaction::*;
use lumen::light::*;
use lumen::pbrt::*;
use lumen::rng::*;
use lumen::spectrum::*;

/// Implements a directional light source that deposits illumination from the
/// same direction at every point in space.
#[derive(Clone, Debug)]
pub struct DirectionalLight {
    /// Light source type.
    pub light_type: LightType,

    /// Radiance carried by the light.
    pub intensity: Spectrum,

    /// Unit direction in which the light travels.
    pub dir: Vector3f,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Spectrum::new(0.5), Vector3f::new(1.0, 0.0, 0.0))
    }
}

impl DirectionalLight {
    /// Returns a new `DirectionalLight`.
    ///
    /// * `intensity` - Radiance carried by the light.
    /// * `dir`       - Direction in which the light travels; normalized here.
    pub fn new(intensity: Spectrum, dir: Vector3f) -> Self {
        Self {
            light_type: LightType::DIRAC | LightType::INFINITE,
            intensity,
            dir: dir.normalize(),
        }
    }
}

impl Light for DirectionalLight {
    fn get_type(&self) -> LightType {
        self.light_type
    }

    fn sample(&self, _si: &SurfaceInteraction, _sampler: &mut Sampler) -> LightSample {
        LightSample::new(self.dir, self.intensity, 1.0, INFINITY)
    }

    fn eval(&self, _d: &Vector3f) -> Spectrum {
        self.intensity
    }

    /// A delta distribution cannot be hit by sampling the BRDF.
    fn pdf(&self, _p: &Point3f, _d: &Vector3f) -> Float {
        0.0
    }

    fn power(&self) -> Float {
        self.intensity.mean()
    }

    fn distance(&self, _p: &Point3f) -> Float {
        1.0
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
