//! Rough Conductor Microfacet BRDF

use super::*;

/// Lower bound on cosines in denominators.
const COS_EPSILON: Float = 1e-4;

/// Specular microfacets with conductor Fresnel reflectance.
#[derive(Clone)]
pub struct RoughMicrofacet<M> {
    /// The anisotropic microsurface.
    pub microsurface: ShapeInvariant<M>,

    /// Index of refraction.
    pub eta: ArcTexture<Spectrum>,

    /// Absorption coefficient.
    pub kappa: ArcTexture<Spectrum>,

    /// Sample the distribution of normals visible from the incident direction.
    pub sample_visible: bool,
}

impl<M: MicrosurfaceModel + Default> Default for RoughMicrofacet<M> {
    fn default() -> Self {
        Self::new(
            ShapeInvariant::new(M::default(), 0.1, 0.1),
            constant_spectrum(Spectrum::new(1.0)),
            constant_spectrum(Spectrum::new(10000.0)),
        )
    }
}

impl<M: MicrosurfaceModel> RoughMicrofacet<M> {
    /// Returns a new instance of `RoughMicrofacet`.
    ///
    /// * `microsurface` - The anisotropic microsurface.
    /// * `eta`          - Index of refraction.
    /// * `kappa`        - Absorption coefficient.
    pub fn new(
        microsurface: ShapeInvariant<M>,
        eta: ArcTexture<Spectrum>,
        kappa: ArcTexture<Spectrum>,
    ) -> Self {
        Self {
            microsurface,
            eta,
            kappa,
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

    /// Returns the cosine weighted BRDF value.
    ///
    /// * `wi` - Incident direction.
    /// * `wo` - Outgoing direction.
    /// * `si` - Surface interaction.
    pub fn eval(&self, wi: &Vector3f, wo: &Vector3f, si: &SurfaceInteraction) -> Spectrum {
        if wi.z <= 0.0 || wo.z <= 0.0 {
            return Spectrum::default();
        }
        let wh = *wi + *wo;
        if wh.length_squared() == 0.0 {
            return Spectrum::default();
        }
        let wh = wh.normalize();

        let d = self.microsurface.d(&wh);
        let g2 = self.microsurface.g2(&wh, wi, wo);
        if d == 0.0 || g2 == 0.0 {
            return Spectrum::default();
        }
        let f = fr_conductor(wh.dot(wi), self.eta.evaluate(si), self.kappa.evaluate(si));

        f * (d * g2 / (4.0 * clamp(wi.z, COS_EPSILON, 1.0 - COS_EPSILON)))
    }

    /// Samples an outgoing direction by reflecting about a sampled normal.
    ///
    /// * `wi`      - Incident direction.
    /// * `si`      - Surface interaction.
    /// * `sampler` - Sampler.
    pub fn sample(&self, wi: &Vector3f, si: &SurfaceInteraction, sampler: &mut Sampler) -> BrdfSample {
        let wh = self
            .microsurface
            .sample(wi, &sampler.next_2d(), self.sample_visible);
        let wo = reflect(wi, &wh);

        let pdf = self.pdf(wi, &wo);
        if wo.z <= 0.0 || pdf <= 0.0 {
            return BrdfSample::new(wo, Spectrum::default());
        }
        BrdfSample::new(wo, self.eval(wi, &wo, si) / pdf)
    }

    /// Returns the PDF of `sample`.
    ///
    /// * `wi` - Incident direction.
    /// * `wo` - Outgoing direction.
    pub fn pdf(&self, wi: &Vector3f, wo: &Vector3f) -> Float {
        let wh = *wi + *wo;
        if wh.length_squared() == 0.0 {
            return 0.0;
        }
        let wh = wh.normalize();
        let pdf_wh = self.microsurface.pdf(&wh, wi, self.sample_visible);
        pdf_wh / (4.0 * clamp(wh.dot(wi), COS_EPSILON, 1.0 - COS_EPSILON))
    }
}
