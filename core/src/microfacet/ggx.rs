//! GGX Distribution

use super::MicrosurfaceModel;
use crate::geometry::*;
use crate::pbrt::*;
use crate::sampling::*;

/// GGX distribution with unit roughness. In unit space it is the distribution
/// of normals of a sphere: constant `1/π` over the upper hemisphere.
#[derive(Copy, Clone, Debug, Default)]
pub struct Ggx;

impl MicrosurfaceModel for Ggx {
    fn d(&self, wh: &Vector3f) -> Float {
        if wh.z > 0.0 {
            INV_PI
        } else {
            0.0
        }
    }

    fn sample_d(&self, u: &Point2f) -> Vector3f {
        cosine_sample_hemisphere(u)
    }

    /// Samples visible normals with the spherical cap method.
    fn sample_d_visible(&self, wi: &Vector3f, u: &Point2f) -> Vector3f {
        let phi = TWO_PI * u[0];
        let z = (1.0 - u[1]) * (1.0 + wi.z) - wi.z;
        let sin_theta = clamp(1.0 - z * z, 0.0, 1.0).sqrt();
        let c = Vector3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), z);
        let h = c + *wi;
        if h.length_squared() == 0.0 {
            return Vector3f::new(0.0, 0.0, 1.0);
        }
        h.normalize()
    }

    fn lambda(&self, w: &Vector3f) -> Float {
        if w.z <= 0.0 {
            return INFINITY;
        }
        0.5 * (1.0 / w.z - 1.0)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
