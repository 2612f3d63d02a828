//! Lambertian Reflection

use super::*;

/// Lambertian model for perfect diffuse surfaces that scatters incident
/// illumination equally in all directions.
#[derive(Clone)]
pub struct Lambertian {
    /// Reflectance spectrum which gives the fraction of incident light that
    /// is scattered.
    pub albedo: ArcTexture<Spectrum>,
}

impl Default for Lambertian {
    fn default() -> Self {
        Self::new(constant_spectrum(Spectrum::new(0.5)))
    }
}

impl Lambertian {
    /// Returns a new instance of `Lambertian`.
    ///
    /// * `albedo` - Reflectance spectrum.
    pub fn new(albedo: ArcTexture<Spectrum>) -> Self {
        Self { albedo }
    }

    /// Returns the cosine weighted BRDF value.
    ///
    /// * `wo` - Outgoing direction.
    /// * `si` - Surface interaction.
    pub fn eval(&self, wo: &Vector3f, si: &SurfaceInteraction) -> Spectrum {
        self.albedo.evaluate(si) * (INV_PI * clamp(wo.z, 0.0, 1.0))
    }

    /// Samples a cosine distributed outgoing direction.
    ///
    /// * `si`      - Surface interaction.
    /// * `sampler` - Sampler.
    pub fn sample(&self, si: &SurfaceInteraction, sampler: &mut Sampler) -> BrdfSample {
        let wo = cosine_sample_hemisphere(&sampler.next_2d());
        BrdfSample::new(wo, self.albedo.evaluate(si))
    }

    /// Returns the PDF of `sample`.
    ///
    /// * `wo` - Outgoing direction.
    pub fn pdf(&self, wo: &Vector3f) -> Float {
        cosine_hemisphere_pdf(wo.z)
    }
}
