//! Beckmann–Spizzichino Distribution

use super::MicrosurfaceModel;
use crate::geometry::*;
use crate::pbrt::*;

/// Implements the Beckmann–Spizzichino distribution with unit roughness,
/// based on a Gaussian distribution of microfacet slopes.
#[derive(Copy, Clone, Debug, Default)]
pub struct Beckmann;

impl MicrosurfaceModel for Beckmann {
    fn d(&self, wh: &Vector3f) -> Float {
        if wh.z <= 0.0 {
            return 0.0;
        }
        let tan2_theta = tan2_theta(wh);
        if tan2_theta.is_infinite() {
            return 0.0;
        }
        let cos2_theta = wh.z * wh.z;
        (-tan2_theta).exp() / (PI * cos2_theta * cos2_theta)
    }

    fn sample_d(&self, u: &Point2f) -> Vector3f {
        let log_sample = (1.0 - u[0]).ln();
        let tan2_theta = -log_sample;
        let phi = u[1] * TWO_PI;
        let cos_theta = 1.0 / (1.0 + tan2_theta).sqrt();
        let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
        spherical_direction(sin_theta, cos_theta, phi)
    }

    fn sample_d_visible(&self, wi: &Vector3f, u: &Point2f) -> Vector3f {
        // Simulate P22_{wi}(slope_x, slope_y).
        let (slope_x, slope_y) = beckmann_sample_11(wi.z, u[0], u[1]);

        // Rotate to the azimuth of `wi`.
        let (cos_phi, sin_phi) = (cos_phi(wi), sin_phi(wi));
        let sx = cos_phi * slope_x - sin_phi * slope_y;
        let sy = sin_phi * slope_x + cos_phi * slope_y;

        Vector3f::new(-sx, -sy, 1.0).normalize()
    }

    fn lambda(&self, w: &Vector3f) -> Float {
        if w.z <= 0.0 {
            return INFINITY;
        }
        let tan_theta = sin_theta(w) / w.z;
        if tan_theta == 0.0 {
            return 0.0;
        }
        beckmann_lambda(1.0 / tan_theta)
    }
}

/// Exact Smith Λ of the Beckmann distribution as a function of
/// `a = 1 / (α tan θ)`.
///
/// * `a` - Inverse slope of the direction.
pub fn beckmann_lambda(a: Float) -> Float {
    if a <= 0.0 {
        return INFINITY;
    }
    0.5 * (erf(a) - 1.0) + (-a * a).exp() / (2.0 * a * PI.sqrt())
}

/// Samples the slopes visible from a direction with unit roughness.
///
/// * `cos_theta_i` - Cosine of the angle between the incident direction and the
///                   z-axis.
/// * `u1`          - The uniform random value.
/// * `u2`          - The uniform random value.
fn beckmann_sample_11(cos_theta_i: Float, u1: Float, u2: Float) -> (Float, Float) {
    // Special case (normal incidence).
    if cos_theta_i > 0.9999 {
        let r = (-(1.0 - u1).ln()).sqrt();
        let phi = TWO_PI * u2;
        return (r * phi.cos(), r * phi.sin());
    }

    let sin_theta_i = max(0.0, 1.0 - cos_theta_i * cos_theta_i).sqrt();
    let tan_theta_i = sin_theta_i / cos_theta_i;
    let cot_theta_i = 1.0 / tan_theta_i;

    // Search interval, parameterized in the erf() domain.
    let mut a = -1.0;
    let mut c = erf(cot_theta_i);
    let sample_x = max(u1, 1e-6);

    // Initial guess from a fitted approximation of the inverse.
    let theta_i = cos_theta_i.acos();
    let fit = 1.0 + theta_i * (-0.876 + theta_i * (0.4265 - 0.0594 * theta_i));
    let mut b = c - (1.0 + c) * (1.0 - sample_x).powf(fit);

    // Normalization factor for the CDF.
    let normalization =
        1.0 / (1.0 + c + INV_SQRT_PI * tan_theta_i * (-cot_theta_i * cot_theta_i).exp());

    for _ in 0..10 {
        // Bisection criterion; also catches NaNs.
        if !(b >= a && b <= c) {
            b = 0.5 * (a + c);
        }

        // Evaluate the CDF and its derivative (i.e. the density function).
        let inv_erf = erf_inv(b);
        let value = normalization
            * (1.0 + b + INV_SQRT_PI * tan_theta_i * (-inv_erf * inv_erf).exp())
            - sample_x;
        let derivative = normalization * (1.0 - inv_erf * tan_theta_i);

        if abs(value) < 1e-5 {
            break;
        }

        if value > 0.0 {
            c = b;
        } else {
            a = b;
        }

        b -= value / derivative;
    }

    let slope_x = erf_inv(b);
    let slope_y = erf_inv(2.0 * max(u2, 1e-6) - 1.0);
    debug_assert!(slope_x.is_finite() && slope_y.is_finite());

    (slope_x, slope_y)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn lambda_vanishes_at_normal_incidence() {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        assert!(Beckmann.lambda(&n) == 0.0);
        assert!(approx_eq!(f32, Beckmann.g1(&n, &n), 1.0, epsilon = 1e-6));
    }

    #[test]
    fn lambda_grows_towards_grazing() {
        let a = Beckmann.lambda(&spherical_direction(0.5, 0.75f32.sqrt(), 0.0));
        let b = Beckmann.lambda(&spherical_direction(0.95, (1.0f32 - 0.95 * 0.95).sqrt(), 0.0));
        assert!(a >= 0.0 && b > a);
    }

    #[test]
    fn peak_density() {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        assert!(approx_eq!(f32, Beckmann.d(&n), INV_PI, epsilon = 1e-6));
    }
}
