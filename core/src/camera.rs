//! Camera

use crate::geometry::*;
use crate::pbrt::*;
use std::sync::Arc;

/// Camera interface.
pub trait Camera {
    /// Returns a ray for a point on the image plane.
    ///
    /// * `u` - Horizontal image plane coordinate in [-1, 1].
    /// * `v` - Vertical image plane coordinate in [-1, 1].
    fn generate_ray(&self, u: Float, v: Float) -> Ray;
}

/// Atomic reference counted `Camera`.
pub type ArcCamera = Arc<dyn Camera + Send + Sync>;
