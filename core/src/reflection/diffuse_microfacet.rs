//! Diffuse Microfacet BRDF

use super::*;

/// Lower bound on cosines in the estimator.
const COS_EPSILON: Float = 1e-5;

/// Microsurface made of Lambertian facets. The BRDF has no closed form and
/// `eval` returns a one sample estimate of the integral over microfacet
/// normals.
#[derive(Clone)]
pub struct DiffuseMicrofacet<M> {
    /// The anisotropic microsurface.
    pub microsurface: ShapeInvariant<M>,

    /// Facet reflectance.
    pub albedo: ArcTexture<Spectrum>,

    /// Sample the distribution of normals visible from the incident direction.
    pub sample_visible: bool,
}

impl<M: MicrosurfaceModel + Default> Default for DiffuseMicrofacet<M> {
    fn default() -> Self {
        Self::new(
            ShapeInvariant::new(M::default(), 0.1, 0.1),
            constant_spectrum(Spectrum::new(0.5)),
        )
    }
}

impl<M: MicrosurfaceModel> DiffuseMicrofacet<M> {
    /// Returns a new instance of `DiffuseMicrofacet`.
    ///
    /// * `microsurface` - The anisotropic microsurface.
    /// * `albedo`       - Facet reflectance.
    pub fn new(microsurface: ShapeInvariant<M>, albedo: ArcTexture<Spectrum>) -> Self {
        Self {
            microsurface,
            albedo,
            sample_visible: false,
        }
    }

    /// Enables sampling of visible normals.
    ///
    /// * `sample_visible` - Flag.
    pub fn with_sample_visible(mut self, sample_visible: bool) -> Self {
        self.sample_visible = sample_visible;
        self
    }

    /// Returns a stochastic estimate of the cosine weighted BRDF value.
    ///
    /// * `wi`      - Incident direction.
    /// * `wo`      - Outgoing direction.
    /// * `si`      - Surface interaction.
    /// * `sampler` - Sampler.
    pub fn eval(
        &self,
        wi: &Vector3f,
        wo: &Vector3f,
        si: &SurfaceInteraction,
        sampler: &mut Sampler,
    ) -> Spectrum {
        if wi.z <= 0.0 || wo.z <= 0.0 {
            return Spectrum::default();
        }

        let wh = self
            .microsurface
            .sample(wi, &sampler.next_2d(), self.sample_visible);
        let pdf_wh = self.microsurface.pdf(&wh, wi, self.sample_visible);
        if pdf_wh <= 0.0 {
            return Spectrum::default();
        }

        let g2 = self.microsurface.g2(&wh, wi, wo);
        if g2 == 0.0 {
            return Spectrum::default();
        }
        let d = self.microsurface.d(&wh);

        let i_dot_m = clamp(wi.dot(&wh), COS_EPSILON, 1.0 - COS_EPSILON);
        let o_dot_m = clamp(wo.dot(&wh), COS_EPSILON, 1.0 - COS_EPSILON);
        let cos_i = clamp(wi.z, COS_EPSILON, 1.0 - COS_EPSILON);

        self.albedo.evaluate(si) * (i_dot_m * o_dot_m * d * g2 / pdf_wh / cos_i * INV_PI)
    }

    /// Samples a cosine distributed outgoing direction.
    ///
    /// * `wi`      - Incident direction.
    /// * `si`      - Surface interaction.
    /// * `sampler` - Sampler.
    pub fn sample(&self, wi: &Vector3f, si: &SurfaceInteraction, sampler: &mut Sampler) -> BrdfSample {
        let wo = cosine_sample_hemisphere(&sampler.next_2d());
        let pdf = self.pdf(&wo);
        if pdf <= 0.0 {
            return BrdfSample::new(wo, Spectrum::default());
        }
        BrdfSample::new(wo, self.eval(wi, &wo, si, sampler) / pdf)
    }

    /// Returns the PDF of `sample`.
    ///
    /// * `wo` - Outgoing direction.
    pub fn pdf(&self, wo: &Vector3f) -> Float {
        cosine_hemisphere_pdf(wo.z)
    }
}
