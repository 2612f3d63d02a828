//! Fresnel

use crate::pbrt::*;
use crate::spectrum::*;

/// Computes the Fresnel reflectance at the boundary between a dielectric
/// medium and a conductor.
///
/// * `cos_theta_i` - Cosine of the angle between the incident direction and
///                   the microfacet normal.
/// * `eta`         - Relative index of refraction.
/// * `k`           - Absorption coefficient.
pub fn fr_conductor(cos_theta_i: Float, eta: Spectrum, k: Spectrum) -> Spectrum {
    let cos_theta_i = clamp(cos_theta_i, -1.0, 1.0);

    let cos_theta_i_2 = cos_theta_i * cos_theta_i;
    let sin_theta_i_2 = 1.0 - cos_theta_i_2;
    let eta_2 = eta * eta;
    let k_2 = k * k;

    let t0 = eta_2 - k_2 - Spectrum::new(sin_theta_i_2);
    let a2_plus_b2 = (t0 * t0 + 4.0 * eta_2 * k_2).sqrt();
    let t1 = a2_plus_b2 + Spectrum::new(cos_theta_i_2);
    let a = (0.5 * (a2_plus_b2 + t0)).sqrt();
    let t2 = 2.0 * cos_theta_i * a;
    let rs = (t1 - t2) / (t1 + t2);

    let t3 = cos_theta_i_2 * a2_plus_b2 + Spectrum::new(sin_theta_i_2 * sin_theta_i_2);
    let t4 = t2 * sin_theta_i_2;
    let rp = rs * (t3 - t4) / (t3 + t4);

    0.5 * (rp + rs)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn strong_absorption_is_mirror() {
        let f = fr_conductor(0.7, Spectrum::new(1.0), Spectrum::new(10000.0));
        assert!(approx_eq!(f32, f[0], 1.0, epsilon = 1e-3));
    }

    #[test]
    fn normal_incidence_matches_closed_form() {
        // ((n-1)² + k²) / ((n+1)² + k²)
        let (n, k) = (0.2, 3.0);
        let expected = ((n - 1.0) * (n - 1.0) + k * k) / ((n + 1.0) * (n + 1.0) + k * k);
        let f = fr_conductor(1.0, Spectrum::new(n), Spectrum::new(k));
        assert!(approx_eq!(f32, f[1], expected, epsilon = 1e-4));
    }
}
