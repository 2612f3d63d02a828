//! Goniometric Camera

use lumen::camera::*;
use lumen::geometry::*;
use lumen::pbrt::*;

/// Camera that fires parallel rays from one incident direction at a square
/// patch of surface. Used to measure the reflectance of a material.
#[derive(Copy, Clone, Debug)]
pub struct GonioCamera {
    /// Zenith angle of the incident direction in radians.
    pub theta: Float,

    /// Azimuth angle of the incident direction in radians.
    pub phi: Float,

    /// Centre of the surface patch.
    pub center: Point3f,

    /// Half size of the surface patch.
    pub size: Float,

    /// How far before the patch rays start.
    pub offset: Float,

    /// Unit ray direction computed from `theta` and `phi`.
    dir: Vector3f,
}

impl Default for GonioCamera {
    fn default() -> Self {
        Self::new(0.0, 0.0, Point3f::zero(), 1.0, 100.0)
    }
}

impl GonioCamera {
    /// Create a new goniometric camera.
    ///
    /// * `theta`  - Zenith angle of the incident direction in radians.
    /// * `phi`    - Azimuth angle of the incident direction in radians.
    /// * `center` - Centre of the surface patch.
    /// * `size`   - Half size of the surface patch.
    /// * `offset` - How far before the patch rays start.
    pub fn new(theta: Float, phi: Float, center: Point3f, size: Float, offset: Float) -> Self {
        let dir = -Vector3f::new(phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
        debug!("Gonio camera θ={} φ={} direction {}", theta, phi, dir);
        Self {
            theta,
            phi,
            center,
            size,
            offset,
            dir,
        }
    }

    /// Returns the unit ray direction.
    pub fn direction(&self) -> Vector3f {
        self.dir
    }
}

impl Camera for GonioCamera {
    fn generate_ray(&self, u: Float, v: Float) -> Ray {
        let pos = self.center + Vector3f::new(u, 0.0, v) * self.size;
        Ray::new(pos - self.dir * self.offset, self.dir)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn normal_incidence_points_down() {
        let camera = GonioCamera::default();
        let r = camera.generate_ray(0.5, -0.5);
        assert!(approx_eq!(f32, r.d.y, -1.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, r.o.y, 100.0, epsilon = 1e-4));
        // The ray reaches the patch point after `offset`.
        let p = r.at(100.0);
        assert!(approx_eq!(f32, p.x, 0.5, epsilon = 1e-4));
        assert!(approx_eq!(f32, p.z, -0.5, epsilon = 1e-4));
    }

    #[test]
    fn grazing_incidence_travels_along_azimuth() {
        let camera = GonioCamera::new(PI_OVER_TWO, 0.0, Point3f::zero(), 1.0, 10.0);
        let d = camera.direction();
        assert!(approx_eq!(f32, d.x, -1.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, d.y, 0.0, epsilon = 1e-6));
        let r = camera.generate_ray(0.0, 0.0);
        assert!(approx_eq!(f32, r.o.x, 10.0, epsilon = 1e-5));
    }
}
