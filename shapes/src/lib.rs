//! Geometry

#[macro_use]
extern crate log;

mod rectangle;
mod shape_list;
mod sphere;

// Re-export
pub use rectangle::*;
pub use shape_list::*;
pub use sphere::*;

use lumen::geometry::*;
use lumen::pbrt::*;
use std::sync::Arc;

/// Geometric details of a ray hitting a shape.
#[derive(Copy, Clone, Debug)]
pub struct ShapeHit {
    /// Distance along the ray.
    pub t: Float,

    /// Unit surface normal.
    pub n: Vector3f,

    /// Surface parametrization.
    pub uv: Point2f,
}

/// Shape interface.
pub trait Shape {
    /// Returns the shape type. Usually these are behind ArcShape and harder to
    /// debug. So this will be helpful.
    fn get_type(&self) -> &'static str;

    /// Returns a bounding box in world space.
    fn world_bound(&self) -> Bounds3f;

    /// Returns the nearest intersection in front of the ray origin.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &Ray) -> Option<ShapeHit>;

    /// Returns true if the ray hits the shape closer than `t_max`.
    ///
    /// * `r`     - The ray.
    /// * `t_max` - Maximum distance along the ray.
    fn intersect_p(&self, r: &Ray, t_max: Float) -> bool {
        self.intersect(r).map_or(false, |hit| hit.t < t_max)
    }

    /// Returns the surface area.
    fn area(&self) -> Float;
}

/// Atomic reference counted `Shape`.
pub type ArcShape = Arc<dyn Shape + Send + Sync>;
