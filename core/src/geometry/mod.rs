//! Geometry

use crate::pbrt::*;

// Define macros for property based testing.
#[cfg(test)]
macro_rules! prop_vector3 {
    ($name: ident, $t: ty, $xr: expr, $yr: expr, $zr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr, z in $zr) -> Vector3<$t> {
                Vector3 { x, y, z }
            }
        }
    };
}

#[cfg(test)]
macro_rules! prop_hemisphere_dir {
    ($name: ident) => {
        prop_compose! {
            fn $name()(u1 in 0.0f32..1.0, u2 in 0.0f32..1.0) -> Vector3f {
                // Keep clear of grazing angles where clamping dominates.
                let z = 0.05 + 0.94 * u1;
                let r = (1.0 - z * z).sqrt();
                let phi = 2.0 * std::f32::consts::PI * u2;
                Vector3f::new(r * phi.cos(), r * phi.sin(), z)
            }
        }
    };
}

mod bounds3;
mod common;
mod frame;
mod point2;
mod point3;
mod ray;
mod vector3;

// Re-export
pub use bounds3::*;
pub use common::*;
pub use frame::*;
pub use point2::*;
pub use point3::*;
pub use ray::*;
pub use vector3::*;

/// Reflects `wo` about the normal `n` (both unit vectors).
///
/// * `wo` - Direction leaving the surface.
/// * `n`  - Normal.
#[inline(always)]
pub fn reflect(wo: &Vector3f, n: &Vector3f) -> Vector3f {
    -*wo + *n * (2.0 * wo.dot(n))
}

/// Returns the unit direction for spherical coordinates in the local frame
/// where +z is the pole.
///
/// * `sin_theta` - sin(θ).
/// * `cos_theta` - cos(θ).
/// * `phi`       - φ.
#[inline(always)]
pub fn spherical_direction(sin_theta: Float, cos_theta: Float, phi: Float) -> Vector3f {
    Vector3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

/// Returns cos(φ) of a local direction.
///
/// * `w` - The direction.
#[inline(always)]
pub fn cos_phi(w: &Vector3f) -> Float {
    let sin_theta = sin_theta(w);
    if sin_theta == 0.0 {
        1.0
    } else {
        clamp(w.x / sin_theta, -1.0, 1.0)
    }
}

/// Returns sin(φ) of a local direction.
///
/// * `w` - The direction.
#[inline(always)]
pub fn sin_phi(w: &Vector3f) -> Float {
    let sin_theta = sin_theta(w);
    if sin_theta == 0.0 {
        0.0
    } else {
        clamp(w.y / sin_theta, -1.0, 1.0)
    }
}

/// Returns sin(θ) of a local direction.
///
/// * `w` - The direction.
#[inline(always)]
pub fn sin_theta(w: &Vector3f) -> Float {
    max(0.0, 1.0 - w.z * w.z).sqrt()
}

/// Returns tan²(θ) of a local direction.
///
/// * `w` - The direction.
#[inline(always)]
pub fn tan2_theta(w: &Vector3f) -> Float {
    max(0.0, 1.0 - w.z * w.z) / (w.z * w.z)
}
