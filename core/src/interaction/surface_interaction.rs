//! Surface Interactions

use crate::geometry::*;
use crate::pbrt::*;
use crate::reflection::BrdfId;
use std::fmt;

/// SurfaceInteraction represents geometry of a particular point on a surface
/// hit by a ray.
#[derive(Copy, Clone, Debug)]
pub struct SurfaceInteraction {
    /// Distance along the ray.
    pub t: Float,

    /// Point of interaction.
    pub p: Point3f,

    /// Unit shading normal.
    pub n: Vector3f,

    /// The uv coordinates from surface parametrization.
    pub uv: Point2f,

    /// Local shading frame with the normal as +z.
    pub frame: Frame,

    /// The material; `None` means the surface is transparent.
    pub brdf: Option<BrdfId>,

    /// Identifier of the geometry that was hit.
    pub geometry_id: usize,
}

impl SurfaceInteraction {
    /// Create a new surface interaction.
    ///
    /// * `t`           - Distance along the ray.
    /// * `p`           - Point of interaction.
    /// * `n`           - Unit shading normal.
    /// * `uv`          - The uv coordinates.
    /// * `brdf`        - The material.
    /// * `geometry_id` - Identifier of the geometry.
    pub fn new(
        t: Float,
        p: Point3f,
        n: Vector3f,
        uv: Point2f,
        brdf: Option<BrdfId>,
        geometry_id: usize,
    ) -> Self {
        Self {
            t,
            p,
            n,
            uv,
            frame: Frame::from_normal(&n),
            brdf,
            geometry_id,
        }
    }

    /// Transforms a world space direction into the shading frame.
    ///
    /// * `v` - World space direction.
    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        self.frame.to_local(v)
    }

    /// Transforms a shading space direction into world space.
    ///
    /// * `v` - Shading space direction.
    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.frame.to_world(v)
    }

    /// Returns the interaction with the normal reversed. Used for two-sided
    /// shading when the ray arrives from below the surface.
    pub fn flipped(&self) -> Self {
        Self::new(self.t, self.p, -self.n, self.uv, self.brdf, self.geometry_id)
    }

    /// Returns a point offset along the normal.
    ///
    /// * `eps` - Signed offset distance.
    pub fn offset_point(&self, eps: Float) -> Point3f {
        self.p + self.n * eps
    }
}

impl fmt::Display for SurfaceInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SurfaceInteraction {{ t: {}, p: {}, n: {}, geometry_id: {} }}",
            self.t, self.p, self.n, self.geometry_id
        )
    }
}
