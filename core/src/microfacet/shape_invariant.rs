//! Shape Invariant Anisotropic Microsurfaces

use super::MicrosurfaceModel;
use crate::geometry::*;
use crate::pbrt::*;

/// Stretches a unit space microsurface model by a per-axis roughness scale.
/// Directions map into unit space by `normalize(w * scale)` and microfacet
/// normals by `normalize(m / scale)` where `scale = (sx, sy, 1)`.
#[derive(Copy, Clone, Debug)]
pub struct ShapeInvariant<M> {
    /// The unit space model.
    pub model: M,

    /// Roughness along the tangent.
    scale_x: Float,

    /// Roughness along the bitangent.
    scale_y: Float,
}

impl<M: MicrosurfaceModel> ShapeInvariant<M> {
    /// Create a new `ShapeInvariant` microsurface. Scales must be strictly
    /// positive; validation happens at scene construction.
    ///
    /// * `model`   - Unit space model.
    /// * `scale_x` - Roughness along the tangent.
    /// * `scale_y` - Roughness along the bitangent.
    pub fn new(model: M, scale_x: Float, scale_y: Float) -> Self {
        Self {
            model,
            scale_x,
            scale_y,
        }
    }

    /// Returns the roughness scale.
    pub fn scale(&self) -> (Float, Float) {
        (self.scale_x, self.scale_y)
    }

    /// Maps a direction into unit space.
    ///
    /// * `w` - The direction.
    pub fn to_unit_direction(&self, w: &Vector3f) -> Vector3f {
        Vector3f::new(w.x * self.scale_x, w.y * self.scale_y, w.z).normalize()
    }

    /// Maps a microfacet normal into unit space.
    ///
    /// * `m` - The normal.
    pub fn to_unit_normal(&self, m: &Vector3f) -> Vector3f {
        Vector3f::new(m.x / self.scale_x, m.y / self.scale_y, m.z).normalize()
    }

    /// Maps a unit space microfacet normal back.
    ///
    /// * `m` - The unit space normal.
    pub fn from_unit_normal(&self, m: &Vector3f) -> Vector3f {
        Vector3f::new(m.x * self.scale_x, m.y * self.scale_y, m.z).normalize()
    }

    /// Returns `1 / |det(scale)|`.
    fn inv_det(&self) -> Float {
        1.0 / abs(self.scale_x * self.scale_y)
    }

    /// Return the differential area of microfacets oriented with `wh`.
    ///
    /// * `wh` - Microfacet normal.
    pub fn d(&self, wh: &Vector3f) -> Float {
        if wh.z <= 0.0 {
            return 0.0;
        }
        let wh_u = self.to_unit_normal(wh);
        let r = wh_u.z / wh.z;
        self.model.d(&wh_u) * self.inv_det() * r * r * r * r
    }

    /// Returns the density of `sample` with respect to solid angle of `wh`.
    ///
    /// * `wh`      - Microfacet normal.
    /// * `wi`      - Incident direction.
    /// * `visible` - Whether the visible normals are sampled.
    pub fn pdf(&self, wh: &Vector3f, wi: &Vector3f, visible: bool) -> Float {
        if wh.z <= 0.0 {
            return 0.0;
        }
        let wh_u = self.to_unit_normal(wh);
        let pdf_u = if visible {
            self.model.pdf_visible(&wh_u, &self.to_unit_direction(wi))
        } else {
            self.model.pdf(&wh_u)
        };
        let r = wh_u.z / wh.z;
        pdf_u * self.inv_det() * r * r * r
    }

    /// Samples a microfacet normal.
    ///
    /// * `wi`      - Incident direction.
    /// * `u`       - The 2D uniform random values.
    /// * `visible` - Whether the visible normals are sampled.
    pub fn sample(&self, wi: &Vector3f, u: &Point2f, visible: bool) -> Vector3f {
        let wh_u = if visible {
            self.model.sample_d_visible(&self.to_unit_direction(wi), u)
        } else {
            self.model.sample_d(u)
        };
        self.from_unit_normal(&wh_u)
    }

    /// Masking function.
    ///
    /// * `wh` - Microfacet normal.
    /// * `w`  - The direction.
    pub fn g1(&self, wh: &Vector3f, w: &Vector3f) -> Float {
        self.model
            .g1(&self.to_unit_normal(wh), &self.to_unit_direction(w))
    }

    /// Masking-shadowing function.
    ///
    /// * `wh` - Microfacet normal.
    /// * `wi` - Incident direction.
    /// * `wo` - Outgoing direction.
    pub fn g2(&self, wh: &Vector3f, wi: &Vector3f, wo: &Vector3f) -> Float {
        self.model.g2(
            &self.to_unit_normal(wh),
            &self.to_unit_direction(wi),
            &self.to_unit_direction(wo),
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::rng::Sampler;
    use crate::sampling::*;
    use float_cmp::*;

    fn projected_area<M: MicrosurfaceModel>(s: &ShapeInvariant<M>, n: usize) -> f64 {
        let mut sampler = Sampler::new(5);
        let sum: f64 = (0..n)
            .map(|_| {
                let wh = cosine_sample_hemisphere(&sampler.next_2d());
                // D cos / (cos / π)
                (s.d(&wh) * PI) as f64
            })
            .sum();
        sum / n as f64
    }

    #[test]
    fn stretched_ggx_is_normalized() {
        let s = ShapeInvariant::new(Ggx, 0.5, 0.8);
        assert!((projected_area(&s, 400_000) - 1.0).abs() < 0.03);
    }

    #[test]
    fn unit_scale_is_identity() {
        let s = ShapeInvariant::new(Beckmann, 1.0, 1.0);
        let wh = Vector3f::new(0.3, -0.2, 0.9).normalize();
        assert!(approx_eq!(f32, s.d(&wh), Beckmann.d(&wh), epsilon = 1e-5));
        assert!(approx_eq!(f32, s.pdf(&wh, &wh, false), Beckmann.pdf(&wh), epsilon = 1e-5));
    }

    #[test]
    fn matches_anisotropic_ggx() {
        // Closed form anisotropic GGX for comparison.
        let (ax, ay) = (0.3, 0.6);
        let s = ShapeInvariant::new(Ggx, ax, ay);
        let wh = Vector3f::new(0.2, 0.3, 0.9).normalize();
        let e = wh.x * wh.x / (ax * ax) + wh.y * wh.y / (ay * ay) + wh.z * wh.z;
        let d = 1.0 / (PI * ax * ay * e * e);
        assert!(approx_eq!(f32, s.d(&wh), d, epsilon = 1e-4));
    }

    #[test]
    fn normal_mapping_roundtrip() {
        let s = ShapeInvariant::new(Ggx, 0.1, 0.4);
        let m = Vector3f::new(0.1, 0.2, 0.97).normalize();
        let r = s.from_unit_normal(&s.to_unit_normal(&m));
        assert!(approx_eq!(f32, r.x, m.x, epsilon = 1e-5));
        assert!(approx_eq!(f32, r.y, m.y, epsilon = 1e-5));
        assert!(approx_eq!(f32, r.z, m.z, epsilon = 1e-5));
    }
}
