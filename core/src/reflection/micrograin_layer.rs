//! Micrograin Porous Layer

use super::*;
use std::borrow::Cow;
use std::sync::Arc;

/// Grains of the porous layer.
#[derive(Clone)]
pub enum Grains {
    /// Conductor grains.
    Rough(RoughMicrofacet<Micrograin>),

    /// Lambertian grains.
    Diffuse(DiffuseMicrofacet<Micrograin>),
}

impl Grains {
    /// Returns the grain microsurface.
    pub fn microsurface(&self) -> &ShapeInvariant<Micrograin> {
        match self {
            Grains::Rough(g) => &g.microsurface,
            Grains::Diffuse(g) => &g.microsurface,
        }
    }

    fn eval(
        &self,
        wi: &Vector3f,
        wo: &Vector3f,
        si: &SurfaceInteraction,
        sampler: &mut Sampler,
    ) -> Spectrum {
        match self {
            Grains::Rough(g) => g.eval(wi, wo, si),
            Grains::Diffuse(g) => g.eval(wi, wo, si, sampler),
        }
    }

    fn sample(&self, wi: &Vector3f, si: &SurfaceInteraction, sampler: &mut Sampler) -> BrdfSample {
        match self {
            Grains::Rough(g) => g.sample(wi, si, sampler),
            Grains::Diffuse(g) => g.sample(wi, si, sampler),
        }
    }

    fn pdf(&self, wi: &Vector3f, wo: &Vector3f) -> Float {
        match self {
            Grains::Rough(g) => g.pdf(wi, wo),
            Grains::Diffuse(g) => g.pdf(wo),
        }
    }

    fn flags(&self) -> BrdfType {
        match self {
            Grains::Rough(_) => BrdfType::ROUGH | BrdfType::REFLECTION,
            Grains::Diffuse(_) => BrdfType::DIFFUSE | BrdfType::REFLECTION,
        }
    }

    /// Returns the same grains with another filling factor.
    ///
    /// * `tau_0` - Filling factor.
    fn with_tau_0(&self, tau_0: Float) -> Self {
        let mut grains = self.clone();
        match &mut grains {
            Grains::Rough(g) => g.microsurface.model = g.microsurface.model.with_tau_0(tau_0),
            Grains::Diffuse(g) => g.microsurface.model = g.microsurface.model.with_tau_0(tau_0),
        }
        grains
    }
}

/// A porous layer of grains over a base BRDF.
#[derive(Clone)]
pub struct MicrograinLayer {
    /// The grains.
    pub grains: Grains,

    /// The BRDF seen through the pores.
    pub base: BrdfId,

    /// Filling factor over the surface. Overrides the one of the grain
    /// microsurface at each shading point.
    pub tau: ArcTexture<Float>,

    /// Blend with the fraction of grains seen from either direction instead of
    /// the filling factor.
    pub union_weight: bool,
}

impl MicrograinLayer {
    /// Returns a new instance of `MicrograinLayer` with the filling factor of
    /// the grain microsurface everywhere.
    ///
    /// * `grains` - The grains.
    /// * `base`   - The BRDF seen through the pores.
    pub fn new(grains: Grains, base: BrdfId) -> Self {
        let tau: ArcTexture<Float> = Arc::new(ConstantTexture::new(grains.microsurface().model.tau_0()));
        Self {
            grains,
            base,
            tau,
            union_weight: false,
        }
    }

    /// Varies the filling factor over the surface.
    ///
    /// * `tau` - Filling factor texture.
    pub fn with_tau(mut self, tau: ArcTexture<Float>) -> Self {
        self.tau = tau;
        self
    }

    /// Selects the union layering weight.
    ///
    /// * `union_weight` - Flag.
    pub fn with_union_weight(mut self, union_weight: bool) -> Self {
        self.union_weight = union_weight;
        self
    }

    /// Returns the grains with the filling factor found at `si`.
    ///
    /// * `si` - Surface interaction.
    fn grains_at(&self, si: &SurfaceInteraction) -> Cow<'_, Grains> {
        let tau = self.tau.evaluate(si);
        if tau == self.grains.microsurface().model.tau_0() {
            Cow::Borrowed(&self.grains)
        } else {
            Cow::Owned(self.grains.with_tau_0(tau))
        }
    }

    /// Returns the probability of sampling the base lobe.
    ///
    /// * `wi` - Incident direction.
    /// * `si` - Surface interaction.
    pub fn base_weight(&self, wi: &Vector3f, si: &SurfaceInteraction) -> Float {
        Self::base_weight_of(&self.grains_at(si), wi)
    }

    fn base_weight_of(grains: &Grains, wi: &Vector3f) -> Float {
        let ms = grains.microsurface();
        let tau = ms.model.tau_0();
        let porosity = 1.0 - ms.model.tau_view(&ms.to_unit_direction(wi));
        if tau + porosity == 0.0 {
            1.0
        } else {
            porosity / (tau + porosity)
        }
    }

    /// Returns the cosine weighted BRDF value.
    ///
    /// * `arena`   - The BRDF arena holding the base.
    /// * `wi`      - Incident direction.
    /// * `wo`      - Outgoing direction.
    /// * `si`      - Surface interaction.
    /// * `sampler` - Sampler.
    pub fn eval(
        &self,
        arena: &BrdfArena,
        wi: &Vector3f,
        wo: &Vector3f,
        si: &SurfaceInteraction,
        sampler: &mut Sampler,
    ) -> Spectrum {
        self.eval_with(&self.grains_at(si), arena, wi, wo, si, sampler)
    }

    fn eval_with(
        &self,
        grains: &Grains,
        arena: &BrdfArena,
        wi: &Vector3f,
        wo: &Vector3f,
        si: &SurfaceInteraction,
        sampler: &mut Sampler,
    ) -> Spectrum {
        let ms = grains.microsurface();
        let wi_u = ms.to_unit_direction(wi);
        let wo_u = ms.to_unit_direction(wo);

        let surface = grains.eval(wi, wo, si, sampler);
        let base = arena.get(self.base).eval(wi, wo, si, sampler);

        if self.union_weight {
            let w = ms.model.weight_union(&wi_u, &wo_u);
            surface * w + base * (1.0 - w)
        } else {
            let tau = ms.model.tau_0();
            surface * tau + base * ((1.0 - tau) * ms.model.g2_base(&wi_u, &wo_u))
        }
    }

    /// Samples either the grains or the base.
    ///
    /// * `arena`   - The BRDF arena holding the base.
    /// * `wi`      - Incident direction.
    /// * `si`      - Surface interaction.
    /// * `sampler` - Sampler.
    pub fn sample(
        &self,
        arena: &BrdfArena,
        wi: &Vector3f,
        si: &SurfaceInteraction,
        sampler: &mut Sampler,
    ) -> BrdfSample {
        let grains = self.grains_at(si);
        let wo = if sampler.next_float() < Self::base_weight_of(&grains, wi) {
            arena.get(self.base).sample(wi, si, sampler).wo
        } else {
            grains.sample(wi, si, sampler).wo
        };

        let pdf = self.pdf_with(&grains, arena, wi, &wo, si);
        if wo.z <= 0.0 || pdf <= 0.0 {
            return BrdfSample::new(wo, Spectrum::default());
        }
        BrdfSample::new(wo, self.eval_with(&grains, arena, wi, &wo, si, sampler) / pdf)
    }

    /// Returns the PDF of `sample`.
    ///
    /// * `arena` - The BRDF arena holding the base.
    /// * `wi`    - Incident direction.
    /// * `wo`    - Outgoing direction.
    /// * `si`    - Surface interaction.
    pub fn pdf(
        &self,
        arena: &BrdfArena,
        wi: &Vector3f,
        wo: &Vector3f,
        si: &SurfaceInteraction,
    ) -> Float {
        self.pdf_with(&self.grains_at(si), arena, wi, wo, si)
    }

    fn pdf_with(
        &self,
        grains: &Grains,
        arena: &BrdfArena,
        wi: &Vector3f,
        wo: &Vector3f,
        si: &SurfaceInteraction,
    ) -> Float {
        let w = Self::base_weight_of(grains, wi);
        w * arena.get(self.base).pdf(wi, wo, si) + (1.0 - w) * grains.pdf(wi, wo)
    }

    /// Returns the capability flags.
    ///
    /// * `arena` - The BRDF arena holding the base.
    pub fn flags(&self, arena: &BrdfArena) -> BrdfType {
        self.grains.flags() | (arena.get(self.base).flags() - BrdfType::EMISSIVE)
    }
}
