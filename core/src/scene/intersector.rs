//! Intersection Backend

use crate::geometry::*;
use crate::pbrt::*;
use std::sync::Arc;

/// The nearest hit reported by an `Intersector`.
#[derive(Copy, Clone, Debug)]
pub struct Hit {
    /// Distance along the ray.
    pub t: Float,

    /// Unit surface normal.
    pub n: Vector3f,

    /// Surface parametrization.
    pub uv: Point2f,

    /// Index of the geometry that was hit.
    pub geometry_id: usize,
}

impl Hit {
    /// Returns a new `Hit`.
    ///
    /// * `t`           - Distance along the ray.
    /// * `n`           - Unit surface normal.
    /// * `uv`          - Surface parametrization.
    /// * `geometry_id` - Index of the geometry that was hit.
    pub fn new(t: Float, n: Vector3f, uv: Point2f, geometry_id: usize) -> Self {
        Self { t, n, uv, geometry_id }
    }
}

/// Ray intersection service used by the scene. Geometry identifiers are
/// indices in `0..geometry_count()`.
pub trait Intersector {
    /// Returns the nearest intersection in front of the ray origin.
    ///
    /// * `ray` - The ray.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;

    /// Returns true if anything is hit closer than `max_distance`.
    ///
    /// * `ray`          - The ray.
    /// * `max_distance` - Maximum distance along the ray.
    fn occluded(&self, ray: &Ray, max_distance: Float) -> bool {
        self.intersect(ray).map_or(false, |hit| hit.t < max_distance)
    }

    /// Returns the bounds of all geometry.
    fn world_bound(&self) -> Bounds3f;

    /// Returns the number of geometries.
    fn geometry_count(&self) -> usize;
}

/// Atomic reference counted `Intersector`.
pub type ArcIntersector = Arc<dyn Intersector + Send + Sync>;
