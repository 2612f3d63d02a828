//! Micrograin Distribution
//!
//! Porous layer made of spherical grains distributed according to a Boolean
//! model. The filling factor `τ0` is the fraction of the layer covered by
//! grains seen from above.

use super::{beckmann_lambda, Ggx, MicrosurfaceModel};
use crate::geometry::*;
use crate::pbrt::*;

/// Micrograin microsurface.
#[derive(Copy, Clone, Debug)]
pub struct Micrograin {
    /// Filling factor in (0, 1).
    tau_0: Float,

    /// Use the Smith masking function of the Beckmann distribution with an
    /// equivalent roughness instead of the Boolean model for the grains.
    use_smith: bool,

    /// Correlate masking and shadowing of the base surface in height and
    /// direction.
    height_and_direction: bool,
}

impl Default for Micrograin {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl Micrograin {
    /// Create a new `Micrograin` microsurface.
    ///
    /// * `tau_0` - Filling factor, clamped into (0, 1).
    pub fn new(tau_0: Float) -> Self {
        Self {
            tau_0: clamp(tau_0, 1e-4, 0.9999),
            use_smith: false,
            height_and_direction: true,
        }
    }

    /// Replaces the filling factor.
    ///
    /// * `tau_0` - Filling factor, clamped into (0, 1).
    pub fn with_tau_0(mut self, tau_0: Float) -> Self {
        self.tau_0 = clamp(tau_0, 1e-4, 0.9999);
        self
    }

    /// Selects the Smith grain masking function.
    ///
    /// * `use_smith` - Flag.
    pub fn with_smith(mut self, use_smith: bool) -> Self {
        self.use_smith = use_smith;
        self
    }

    /// Selects height and direction correlated base visibility.
    ///
    /// * `height_and_direction` - Flag.
    pub fn with_height_and_direction(mut self, height_and_direction: bool) -> Self {
        self.height_and_direction = height_and_direction;
        self
    }

    /// Returns the filling factor.
    pub fn tau_0(&self) -> Float {
        self.tau_0
    }

    /// Returns `-ln(1 - τ0)`.
    fn log_transmittance(&self) -> Float {
        -(1.0 - self.tau_0).ln()
    }

    /// Λ of a single sphere.
    fn lambda_sphere(w: &Vector3f) -> Float {
        Ggx.lambda(w)
    }

    /// Returns the raising exponent of `(1 - τ0)` shared by the two directions,
    /// correlated in height and optionally in direction.
    fn joint_exponent(&self, wi: &Vector3f, wo: &Vector3f) -> Float {
        let li = Self::lambda_sphere(wi);
        let lo = Self::lambda_sphere(wo);
        if self.height_and_direction {
            let phi = azimuth_difference(wi, wo);
            let l = 4.41 * phi / (4.41 * phi + 1.0);
            max(li, lo) + l * min(li, lo)
        } else {
            li + lo
        }
    }

    /// Fraction of the layer covered by grains as seen from `w`.
    ///
    /// * `w` - The direction.
    pub fn tau_view(&self, w: &Vector3f) -> Float {
        if w.z <= 0.0 {
            return 1.0;
        }
        1.0 - (1.0 - self.tau_0).powf(1.0 + Self::lambda_sphere(w))
    }

    /// Visibility of the base surface from `w`.
    ///
    /// * `w` - The direction.
    pub fn g1_base(&self, w: &Vector3f) -> Float {
        if w.z <= 0.0 {
            return 0.0;
        }
        (1.0 - self.tau_0).powf(Self::lambda_sphere(w))
    }

    /// Joint visibility of the base surface from two directions.
    ///
    /// * `wi` - Incident direction.
    /// * `wo` - Outgoing direction.
    pub fn g2_base(&self, wi: &Vector3f, wo: &Vector3f) -> Float {
        if wi.z <= 0.0 || wo.z <= 0.0 {
            return 0.0;
        }
        (1.0 - self.tau_0).powf(self.joint_exponent(wi, wo))
    }

    /// Alternative layering weight: the fraction of the layer seen as grains
    /// from at least one of the two directions.
    ///
    /// * `wi` - Incident direction.
    /// * `wo` - Outgoing direction.
    pub fn weight_union(&self, wi: &Vector3f, wo: &Vector3f) -> Float {
        if wi.z <= 0.0 || wo.z <= 0.0 {
            return 1.0;
        }
        1.0 - (1.0 - self.tau_0).powf(1.0 + self.joint_exponent(wi, wo))
    }

    /// Λ of the Beckmann distribution whose slopes match the grains.
    fn lambda_smith(&self, w: &Vector3f) -> Float {
        if w.z <= 0.0 {
            return INFINITY;
        }
        let tan_theta = sin_theta(w) / w.z;
        if tan_theta == 0.0 {
            return 0.0;
        }
        let beta = 1.0 / self.log_transmittance().sqrt();
        beckmann_lambda(1.0 / (beta * tan_theta))
    }
}

impl MicrosurfaceModel for Micrograin {
    fn d(&self, wh: &Vector3f) -> Float {
        if wh.z <= 0.0 {
            return 0.0;
        }
        let sin2_theta = max(0.0, 1.0 - wh.z * wh.z);
        self.log_transmittance() * (1.0 - self.tau_0).powf(sin2_theta) / (PI * self.tau_0)
    }

    fn sample_d(&self, u: &Point2f) -> Vector3f {
        let s = (1.0 - u[0] * self.tau_0).ln() / (1.0 - self.tau_0).ln();
        let cos_theta = clamp(1.0 - s, 0.0, 1.0).sqrt();
        let sin_theta = clamp(s, 0.0, 1.0).sqrt();
        spherical_direction(sin_theta, cos_theta, TWO_PI * u[1])
    }

    /// There is no closed form for the visible grain normals; falls back to
    /// the full distribution.
    fn sample_d_visible(&self, _wi: &Vector3f, u: &Point2f) -> Vector3f {
        self.sample_d(u)
    }

    fn pdf_visible(&self, wh: &Vector3f, _wi: &Vector3f) -> Float {
        self.pdf(wh)
    }

    fn lambda(&self, w: &Vector3f) -> Float {
        if self.use_smith {
            self.lambda_smith(w)
        } else {
            Self::lambda_sphere(w)
        }
    }

    fn g1(&self, wh: &Vector3f, w: &Vector3f) -> Float {
        if w.dot(wh) <= 0.0 || w.z <= 0.0 {
            return 0.0;
        }
        if self.use_smith {
            1.0 / (1.0 + self.lambda_smith(w))
        } else {
            // Points deeper on the grain are occluded by more grains.
            let depth = 1.0 - clamp(wh.z, 0.0, 1.0);
            (1.0 - self.tau_0).powf(depth * Self::lambda_sphere(w))
        }
    }

    fn g2(&self, wh: &Vector3f, wi: &Vector3f, wo: &Vector3f) -> Float {
        if wi.dot(wh) <= 0.0 || wo.dot(wh) <= 0.0 || wi.z <= 0.0 || wo.z <= 0.0 {
            return 0.0;
        }
        if self.use_smith {
            1.0 / (1.0 + self.lambda_smith(wi) + self.lambda_smith(wo))
        } else {
            let depth = 1.0 - clamp(wh.z, 0.0, 1.0);
            (1.0 - self.tau_0).powf(depth * self.joint_exponent(wi, wo))
        }
    }
}

/// Returns the azimuthal angle between two directions in [0, π].
///
/// * `a` - First direction.
/// * `b` - Second direction.
fn azimuth_difference(a: &Vector3f, b: &Vector3f) -> Float {
    let la = (a.x * a.x + a.y * a.y).sqrt();
    let lb = (b.x * b.x + b.y * b.y).sqrt();
    if la == 0.0 || lb == 0.0 {
        return 0.0;
    }
    clamp((a.x * b.x + a.y * b.y) / (la * lb), -1.0, 1.0).acos()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    prop_hemisphere_dir!(hemisphere_dir);

    #[test]
    fn normal_view_sees_filling_factor() {
        let m = Micrograin::new(0.3);
        let n = Vector3f::new(0.0, 0.0, 1.0);
        assert!(approx_eq!(f32, m.tau_view(&n), 0.3, epsilon = 1e-5));
        assert!(approx_eq!(f32, m.g1_base(&n), 1.0, epsilon = 1e-6));
    }

    #[test]
    fn samples_follow_pdf_moment() {
        // E[cos θ] under pdf must match ∫ D cos² θ dω.
        let m = Micrograin::new(0.6);
        let n = 20_000;
        let mean_sampled: f64 = (0..n)
            .map(|i| {
                let u = Point2f::new((i as Float + 0.5) / n as Float, 0.25);
                m.sample_d(&u).z as f64
            })
            .sum::<f64>()
            / n as f64;
        let steps = 20_000;
        let integral: f64 = (0..steps)
            .map(|i| {
                let mu = (i as Float + 0.5) / steps as Float;
                let w = Vector3f::new((1.0 - mu * mu).sqrt(), 0.0, mu);
                (TWO_PI * m.d(&w) * mu * mu) as f64 / steps as f64
            })
            .sum();
        assert!((mean_sampled - integral).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn base_visibility_in_unit_interval(
            wi in hemisphere_dir(),
            wo in hemisphere_dir(),
            tau in 0.01f32..0.99,
        ) {
            for m in [Micrograin::new(tau), Micrograin::new(tau).with_height_and_direction(false)] {
                let g2 = m.g2_base(&wi, &wo);
                prop_assert!((0.0..=1.0).contains(&g2));
                prop_assert!(g2 <= m.g1_base(&wi) + 1e-6);
                let w = m.weight_union(&wi, &wo);
                prop_assert!(w >= m.tau_view(&wi) - 1e-5 && w <= 1.0);
            }
        }

        #[test]
        fn grain_masking_in_unit_interval(
            wh in hemisphere_dir(),
            wi in hemisphere_dir(),
            wo in hemisphere_dir(),
            smith in proptest::bool::ANY,
        ) {
            let m = Micrograin::new(0.4).with_smith(smith);
            let g1 = m.g1(&wh, &wi);
            let g2 = m.g2(&wh, &wi, &wo);
            prop_assert!((0.0..=1.0).contains(&g1));
            prop_assert!((0.0..=1.0).contains(&g2));
        }
    }
}
