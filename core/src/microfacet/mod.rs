//! Microfacet Distribution Models
//!
//! Every model is expressed in an isotropic unit space with unit roughness.
//! Anisotropic roughness is obtained by wrapping a model in
//! [`ShapeInvariant`], which stretches the configuration space.

use crate::geometry::*;
use crate::pbrt::*;

mod beckmann;
mod ggx;
mod micrograin;
mod shape_invariant;

// Re-exports
pub use beckmann::*;
pub use ggx::*;
pub use micrograin::*;
pub use shape_invariant::*;

/// Interface for microsurface models in unit space.
pub trait MicrosurfaceModel {
    /// Return the differential area of microfacets oriented with the normal
    /// `wh`.
    ///
    /// * `wh` - Microfacet normal.
    fn d(&self, wh: &Vector3f) -> Float;

    /// Returns the distribution of normals visible from `wi`.
    ///
    /// * `wh` - Microfacet normal.
    /// * `wi` - Incident direction.
    fn d_visible(&self, wh: &Vector3f, wi: &Vector3f) -> Float {
        if wi.z <= 0.0 {
            return 0.0;
        }
        self.g1(wh, wi) * max(0.0, wi.dot(wh)) * self.d(wh) / wi.z
    }

    /// Returns the PDF of `sample_d`.
    ///
    /// * `wh` - Microfacet normal.
    fn pdf(&self, wh: &Vector3f) -> Float {
        self.d(wh) * max(0.0, wh.z)
    }

    /// Returns the PDF of `sample_d_visible`.
    ///
    /// * `wh` - Microfacet normal.
    /// * `wi` - Incident direction.
    fn pdf_visible(&self, wh: &Vector3f, wi: &Vector3f) -> Float {
        self.d_visible(wh, wi)
    }

    /// Samples a normal proportionally to `d(wh) * cos(θh)`.
    ///
    /// * `u` - The 2D uniform random values.
    fn sample_d(&self, u: &Point2f) -> Vector3f;

    /// Samples a normal from the distribution of normals visible from `wi`.
    ///
    /// * `wi` - Incident direction.
    /// * `u`  - The 2D uniform random values.
    fn sample_d_visible(&self, wi: &Vector3f, u: &Point2f) -> Vector3f;

    /// Returns the invisible masked microfacet area per visible microfacet
    /// area.
    ///
    /// * `w` - The direction.
    fn lambda(&self, w: &Vector3f) -> Float;

    /// Smith masking function for a microfacet seen from `w`.
    ///
    /// * `wh` - Microfacet normal.
    /// * `w`  - The direction.
    fn g1(&self, wh: &Vector3f, w: &Vector3f) -> Float {
        if w.dot(wh) <= 0.0 || w.z <= 0.0 {
            return 0.0;
        }
        1.0 / (1.0 + self.lambda(w))
    }

    /// Height correlated masking-shadowing function.
    ///
    /// * `wh` - Microfacet normal.
    /// * `wi` - Incident direction.
    /// * `wo` - Outgoing direction.
    fn g2(&self, wh: &Vector3f, wi: &Vector3f, wo: &Vector3f) -> Float {
        if wi.dot(wh) <= 0.0 || wo.dot(wh) <= 0.0 || wi.z <= 0.0 || wo.z <= 0.0 {
            return 0.0;
        }
        1.0 / (1.0 + self.lambda(wi) + self.lambda(wo))
    }
}

/// The closed set of microsurface models a BRDF can be built with.
#[derive(Copy, Clone, Debug)]
pub enum Microsurface {
    /// GGX.
    Ggx(Ggx),

    /// Beckmann.
    Beckmann(Beckmann),

    /// Porous layer of spherical grains.
    Micrograin(Micrograin),
}

impl Default for Microsurface {
    fn default() -> Self {
        Self::Ggx(Ggx)
    }
}

macro_rules! dispatch {
    ($self: ident, $m: ident => $e: expr) => {
        match $self {
            Microsurface::Ggx($m) => $e,
            Microsurface::Beckmann($m) => $e,
            Microsurface::Micrograin($m) => $e,
        }
    };
}

impl MicrosurfaceModel for Microsurface {
    fn d(&self, wh: &Vector3f) -> Float {
        dispatch!(self, m => m.d(wh))
    }

    fn d_visible(&self, wh: &Vector3f, wi: &Vector3f) -> Float {
        dispatch!(self, m => m.d_visible(wh, wi))
    }

    fn pdf(&self, wh: &Vector3f) -> Float {
        dispatch!(self, m => m.pdf(wh))
    }

    fn pdf_visible(&self, wh: &Vector3f, wi: &Vector3f) -> Float {
        dispatch!(self, m => m.pdf_visible(wh, wi))
    }

    fn sample_d(&self, u: &Point2f) -> Vector3f {
        dispatch!(self, m => m.sample_d(u))
    }

    fn sample_d_visible(&self, wi: &Vector3f, u: &Point2f) -> Vector3f {
        dispatch!(self, m => m.sample_d_visible(wi, u))
    }

    fn lambda(&self, w: &Vector3f) -> Float {
        dispatch!(self, m => m.lambda(w))
    }

    fn g1(&self, wh: &Vector3f, w: &Vector3f) -> Float {
        dispatch!(self, m => m.g1(wh, w))
    }

    fn g2(&self, wh: &Vector3f, wi: &Vector3f, wo: &Vector3f) -> Float {
        dispatch!(self, m => m.g2(wh, wi, wo))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Sampler;
    use crate::sampling::*;

    /// Monte Carlo estimate of the projected area ∫ D(m) cos θm dm which
    /// must be 1 for a normalized distribution.
    pub(crate) fn projected_area<M: MicrosurfaceModel>(m: &M, n: usize) -> Float {
        let mut sampler = Sampler::new(17);
        let sum: f64 = (0..n)
            .map(|_| {
                let wh = uniform_sample_hemisphere(&sampler.next_2d());
                (m.d(&wh) * wh.z / uniform_hemisphere_pdf()) as f64
            })
            .sum();
        (sum / n as f64) as Float
    }

    #[test]
    fn models_are_normalized() {
        let models = [
            Microsurface::Ggx(Ggx),
            Microsurface::Beckmann(Beckmann),
            Microsurface::Micrograin(Micrograin::new(0.3)),
        ];
        for m in models.iter() {
            let a = projected_area(m, 200_000);
            assert!((a - 1.0).abs() < 0.02, "{:?}: {}", m, a);
        }
    }

    #[test]
    fn samples_are_upper_hemisphere() {
        let models = [
            Microsurface::Ggx(Ggx),
            Microsurface::Beckmann(Beckmann),
            Microsurface::Micrograin(Micrograin::new(0.5)),
        ];
        let mut sampler = Sampler::new(3);
        let wi = Vector3f::new(0.6, 0.0, 0.8);
        for m in models.iter() {
            for _ in 0..1000 {
                let u = sampler.next_2d();
                let a = m.sample_d(&u);
                let b = m.sample_d_visible(&wi, &u);
                assert!(a.z >= 0.0 && b.z >= 0.0, "{:?}", m);
                assert!((a.length() - 1.0).abs() < 1e-3);
                assert!((b.length() - 1.0).abs() < 1e-3);
            }
        }
    }
}
