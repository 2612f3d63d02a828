//! Warps from the unit square to directions and disks.

use crate::geometry::*;
use crate::pbrt::*;

/// Maps `u` to the upper hemisphere with constant density per solid angle.
///
/// * `u` - Uniform sample in [0, 1)².
pub fn uniform_sample_hemisphere(u: &Point2f) -> Vector3f {
    let z = u[0];
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u[1];
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Density of `uniform_sample_hemisphere`.
#[inline]
pub fn uniform_hemisphere_pdf() -> Float {
    INV_TWO_PI
}

/// Maps `u` to the unit sphere with constant density per solid angle.
///
/// * `u` - Uniform sample in [0, 1)².
pub fn uniform_sample_sphere(u: &Point2f) -> Vector3f {
    let z = 1.0 - 2.0 * u[0];
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u[1];
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Density of `uniform_sample_sphere`.
#[inline]
pub fn uniform_sphere_pdf() -> Float {
    1.0 / FOUR_PI
}

/// Shirley-Chiu concentric map from the unit square to the unit disk.
///
/// * `u` - Uniform sample in [0, 1)².
pub fn concentric_sample_disk(u: &Point2f) -> Point2f {
    let ox = 2.0 * u[0] - 1.0;
    let oy = 2.0 * u[1] - 1.0;

    if ox == 0.0 && oy == 0.0 {
        return Point2f::new(0.0, 0.0);
    }

    let (r, theta) = if abs(ox) > abs(oy) {
        (ox, 0.25 * PI * (oy / ox))
    } else {
        (oy, PI_OVER_TWO - 0.25 * PI * (ox / oy))
    };

    Point2f::new(r * theta.cos(), r * theta.sin())
}

/// Projects a disk sample onto the upper hemisphere, giving density `cos θ / π`.
///
/// * `u` - Uniform sample in [0, 1)².
#[inline]
pub fn cosine_sample_hemisphere(u: &Point2f) -> Vector3f {
    let d = concentric_sample_disk(u);
    let z = max(0.0, 1.0 - d.x * d.x - d.y * d.y).sqrt();
    Vector3f::new(d.x, d.y, z)
}

/// Density of `cosine_sample_hemisphere`.
///
/// * `cos_theta` - Cosine to the normal.
#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    max(0.0, cos_theta) * INV_PI
}

/// Maps `u` uniformly into the cone of half-angle `acos(cos_theta_max)`
/// around +z.
///
/// * `u`             - Uniform sample in [0, 1)².
/// * `cos_theta_max` - Cosine of the half-angle.
pub fn uniform_sample_cone(u: &Point2f, cos_theta_max: Float) -> Vector3f {
    let cos_theta = (1.0 - u[0]) + u[0] * cos_theta_max;
    let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
    let phi = u[1] * TWO_PI;
    Vector3f::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta)
}

/// Density of `uniform_sample_cone`.
#[inline]
pub fn uniform_cone_pdf(cos_theta_max: Float) -> Float {
    1.0 / (TWO_PI * (1.0 - cos_theta_max))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
