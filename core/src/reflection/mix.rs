//! Mixture of two BRDFs

use super::*;

/// Linear blend `w * first + (1 - w) * second` of two BRDFs.
#[derive(Copy, Clone, Debug)]
pub struct Mix {
    /// First BRDF.
    pub first: BrdfId,

    /// Second BRDF.
    pub second: BrdfId,

    /// Weight of the first BRDF in [0, 1].
    pub weight: Float,
}

impl Mix {
    /// Returns a new instance of `Mix`.
    ///
    /// * `first`  - First BRDF.
    /// * `second` - Second BRDF.
    /// * `weight` - Weight of the first BRDF, clamped to [0, 1].
    pub fn new(first: BrdfId, second: BrdfId, weight: Float) -> Self {
        Self {
            first,
            second,
            weight: clamp(weight, 0.0, 1.0),
        }
    }

    pub fn eval(
        &self,
        arena: &BrdfArena,
        wi: &Vector3f,
        wo: &Vector3f,
        si: &SurfaceInteraction,
        sampler: &mut Sampler,
    ) -> Spectrum {
        let a = arena.get(self.first).eval(wi, wo, si, sampler);
        let b = arena.get(self.second).eval(wi, wo, si, sampler);
        a * self.weight + b * (1.0 - self.weight)
    }

    /// Picks the child that generates the direction with probability equal to
    /// its weight. The returned value is weighted by the mixture PDF.
    pub fn sample(
        &self,
        arena: &BrdfArena,
        wi: &Vector3f,
        si: &SurfaceInteraction,
        sampler: &mut Sampler,
    ) -> BrdfSample {
        let wo = if sampler.next_float() < self.weight {
            arena.get(self.first).sample(wi, si, sampler).wo
        } else {
            arena.get(self.second).sample(wi, si, sampler).wo
        };

        let pdf = self.pdf(arena, wi, &wo, si);
        if wo.z <= 0.0 || pdf <= 0.0 {
            return BrdfSample::new(wo, Spectrum::default());
        }
        BrdfSample::new(wo, self.eval(arena, wi, &wo, si, sampler) / pdf)
    }

    pub fn pdf(&self, arena: &BrdfArena, wi: &Vector3f, wo: &Vector3f, si: &SurfaceInteraction) -> Float {
        self.weight * arena.get(self.first).pdf(wi, wo, si)
            + (1.0 - self.weight) * arena.get(self.second).pdf(wi, wo, si)
    }

    pub fn emission(&self, arena: &BrdfArena) -> Spectrum {
        arena.get(self.first).emission() * self.weight
            + arena.get(self.second).emission() * (1.0 - self.weight)
    }

    pub fn flags(&self, arena: &BrdfArena) -> BrdfType {
        arena.get(self.first).flags() | arena.get(self.second).flags()
    }
}
