//! BRDF

use super::*;

/// The closed set of BRDF models. Directions are expressed in the local
/// shading frame where the normal is +z. Composite models refer to their
/// children through the scene's `BrdfArena`.
#[derive(Clone)]
pub enum Brdf {
    /// Lambertian reflection.
    Diffuse(Lambertian),

    /// Light emitting surface.
    Emissive(Emissive),

    /// Conductor microfacets.
    RoughMicrofacet(RoughMicrofacet<Microsurface>),

    /// Lambertian microfacets.
    DiffuseMicrofacet(DiffuseMicrofacet<Microsurface>),

    /// Porous grain layer over a base BRDF.
    Micrograin(MicrograinLayer),

    /// Linear blend of two BRDFs.
    Mix(Mix),
}

impl Brdf {
    /// Returns the cosine weighted BRDF value `f(wi, wo) * cos(θo)`.
    ///
    /// * `arena`   - The arena holding child BRDFs.
    /// * `wi`      - Incident direction.
    /// * `wo`      - Outgoing direction.
    /// * `si`      - Surface interaction.
    /// * `sampler` - Sampler for stochastic models.
    pub fn eval(
        &self,
        arena: &BrdfArena,
        wi: &Vector3f,
        wo: &Vector3f,
        si: &SurfaceInteraction,
        sampler: &mut Sampler,
    ) -> Spectrum {
        match self {
            Brdf::Diffuse(b) => b.eval(wo, si),
            Brdf::Emissive(_) => Spectrum::default(),
            Brdf::RoughMicrofacet(b) => b.eval(wi, wo, si),
            Brdf::DiffuseMicrofacet(b) => b.eval(wi, wo, si, sampler),
            Brdf::Micrograin(b) => b.eval(arena, wi, wo, si, sampler),
            Brdf::Mix(b) => b.eval(arena, wi, wo, si, sampler),
        }
    }

    /// Samples an outgoing direction.
    ///
    /// * `arena`   - The arena holding child BRDFs.
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
        match self {
            Brdf::Diffuse(b) => b.sample(si, sampler),
            Brdf::Emissive(b) => b.sample(sampler),
            Brdf::RoughMicrofacet(b) => b.sample(wi, si, sampler),
            Brdf::DiffuseMicrofacet(b) => b.sample(wi, si, sampler),
            Brdf::Micrograin(b) => b.sample(arena, wi, si, sampler),
            Brdf::Mix(b) => b.sample(arena, wi, si, sampler),
        }
    }

    /// Returns the PDF of sampling `wo` given `wi`.
    ///
    /// * `arena` - The arena holding child BRDFs.
    /// * `wi`    - Incident direction.
    /// * `wo`    - Outgoing direction.
    /// * `si`    - Surface interaction.
    pub fn pdf(&self, arena: &BrdfArena, wi: &Vector3f, wo: &Vector3f, si: &SurfaceInteraction) -> Float {
        match self {
            Brdf::Diffuse(b) => b.pdf(wo),
            Brdf::Emissive(_) => cosine_hemisphere_pdf(wo.z),
            Brdf::RoughMicrofacet(b) => b.pdf(wi, wo),
            Brdf::DiffuseMicrofacet(b) => b.pdf(wo),
            Brdf::Micrograin(b) => b.pdf(arena, wi, wo, si),
            Brdf::Mix(b) => b.pdf(arena, wi, wo, si),
        }
    }

    /// Returns the emitted radiance.
    ///
    /// * `arena` - The arena holding child BRDFs.
    pub fn emission(&self, arena: &BrdfArena) -> Spectrum {
        match self {
            Brdf::Emissive(b) => b.intensity,
            Brdf::Mix(b) => b.emission(arena),
            _ => Spectrum::default(),
        }
    }

    /// Returns the capability flags.
    ///
    /// * `arena` - The arena holding child BRDFs.
    pub fn flags(&self, arena: &BrdfArena) -> BrdfType {
        match self {
            Brdf::Diffuse(_) => BrdfType::DIFFUSE | BrdfType::REFLECTION,
            Brdf::Emissive(_) => BrdfType::EMISSIVE,
            Brdf::RoughMicrofacet(_) => BrdfType::ROUGH | BrdfType::REFLECTION,
            Brdf::DiffuseMicrofacet(_) => BrdfType::DIFFUSE | BrdfType::REFLECTION,
            Brdf::Micrograin(b) => b.flags(arena),
            Brdf::Mix(b) => b.flags(arena),
        }
    }

    /// Returns the BRDFs this one refers to.
    pub fn children(&self) -> Vec<BrdfId> {
        match self {
            Brdf::Micrograin(b) => vec![b.base],
            Brdf::Mix(b) => vec![b.first, b.second],
            _ => vec![],
        }
    }

    /// Returns the roughness scale of microfacet models.
    pub fn roughness_scale(&self) -> Option<(Float, Float)> {
        match self {
            Brdf::RoughMicrofacet(b) => Some(b.microsurface.scale()),
            Brdf::DiffuseMicrofacet(b) => Some(b.microsurface.scale()),
            Brdf::Micrograin(b) => Some(b.grains.microsurface().scale()),
            _ => None,
        }
    }
}

impl From<Lambertian> for Brdf {
    fn from(b: Lambertian) -> Self {
        Brdf::Diffuse(b)
    }
}

impl From<Emissive> for Brdf {
    fn from(b: Emissive) -> Self {
        Brdf::Emissive(b)
    }
}

impl From<RoughMicrofacet<Microsurface>> for Brdf {
    fn from(b: RoughMicrofacet<Microsurface>) -> Self {
        Brdf::RoughMicrofacet(b)
    }
}

impl From<DiffuseMicrofacet<Microsurface>> for Brdf {
    fn from(b: DiffuseMicrofacet<Microsurface>) -> Self {
        Brdf::DiffuseMicrofacet(b)
    }
}

impl From<MicrograinLayer> for Brdf {
    fn from(b: MicrograinLayer) -> Self {
        Brdf::Micrograin(b)
    }
}

impl From<Mix> for Brdf {
    fn from(b: Mix) -> Self {
        Brdf::Mix(b)
    }
}
