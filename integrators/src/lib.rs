//! Integrators

#[macro_use]
extern crate log;

mod ao;
mod brdf;
mod direct;
mod gonio;
mod path;

#[cfg(test)]
mod test_scenes;

// Re-export.
pub use ao::*;
pub use brdf::*;
pub use direct::*;
pub use gonio::*;
pub use path::*;

use lumen::geometry::*;
use lumen::pbrt::*;

/// Maximum number of consecutive material-less surfaces a ray may cross.
pub const MAX_PASS_THROUGH: usize = 64;

/// Offset applied when a ray continues through a material-less surface.
pub const PASS_THROUGH_OFFSET: Float = 1e-5;

/// Returns the ray continuing through a material-less surface at `p`.
///
/// * `ray` - The ray that hit the surface.
/// * `p`   - The hit point.
#[inline]
pub(crate) fn pass_through(ray: &Ray, p: &Point3f) -> Ray {
    Ray::new(*p + ray.d * PASS_THROUGH_OFFSET, ray.d)
}
