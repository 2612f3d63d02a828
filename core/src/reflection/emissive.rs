//! Emissive Surfaces

use super::*;

/// A surface that emits light and does not reflect any.
#[derive(Copy, Clone, Debug)]
pub struct Emissive {
    /// Emitted radiance.
    pub intensity: Spectrum,
}

impl Default for Emissive {
    fn default() -> Self {
        Self::new(Spectrum::new(1.0))
    }
}

impl Emissive {
    /// Returns a new instance of `Emissive`.
    ///
    /// * `intensity` - Emitted radiance.
    pub fn new(intensity: Spectrum) -> Self {
        Self { intensity }
    }

    /// Samples a cosine distributed direction that carries no energy.
    ///
    /// * `sampler` - Sampler.
    pub fn sample(&self, sampler: &mut Sampler) -> BrdfSample {
        let wo = cosine_sample_hemisphere(&sampler.next_2d());
        BrdfSample::new(wo, Spectrum::default())
    }
}
