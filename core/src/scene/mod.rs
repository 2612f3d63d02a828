//! Scene

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::light_distrib::*;
use crate::pbrt::*;
use crate::reflection::*;

mod error;
mod intersector;

// Re-export
pub use error::*;
pub use intersector::*;

/// Scene.
pub struct Scene {
    /// The intersection backend.
    pub intersector: ArcIntersector,

    /// Material of each geometry, indexed by geometry identifier. `None`
    /// marks a transparent surface.
    pub materials: Vec<Option<BrdfId>>,

    /// All BRDFs.
    pub brdfs: BrdfArena,

    /// Finite light sources.
    pub lights: Vec<ArcLight>,

    /// Infinite light sources.
    pub infinite_lights: Vec<ArcLight>,

    /// The bounding box of the scene geometry.
    pub world_bound: Bounds3f,

    /// Selects finite lights by power.
    power_distribution: PowerLightDistribution,

    /// Selects finite lights by power over squared distance.
    spatial_distribution: SpatialLightDistribution,
}

impl Scene {
    /// Creates a new `Scene` after validating its parts. The light selection
    /// strategies are built here and stay fixed for the lifetime of the scene.
    ///
    /// * `intersector` - The intersection backend.
    /// * `materials`   - Material of each geometry.
    /// * `brdfs`       - All BRDFs.
    /// * `lights`      - All light sources; infinite lights are split off.
    /// * `max_cells`   - Cell budget for the spatial light strategy.
    pub fn new(
        intersector: ArcIntersector,
        materials: Vec<Option<BrdfId>>,
        brdfs: BrdfArena,
        lights: Vec<ArcLight>,
        max_cells: usize,
    ) -> Result<Self, SceneError> {
        brdfs.validate()?;

        let geometries = intersector.geometry_count();
        if materials.len() != geometries {
            return Err(SceneError::GeometryCount {
                materials: materials.len(),
                geometries,
            });
        }
        if let Some(id) = materials.iter().flatten().find(|id| id.0 >= brdfs.len()) {
            return Err(SceneError::InvalidBrdf {
                id: id.0,
                len: brdfs.len(),
            });
        }
        for light in lights.iter() {
            if let Some(id) = light.geometry_id() {
                if id >= geometries {
                    return Err(SceneError::InvalidLight(format!(
                        "geometry {} does not exist; the scene has {} geometries",
                        id, geometries
                    )));
                }
            }
        }

        let (infinite_lights, lights): (Vec<_>, Vec<_>) = lights.into_iter().partition(|l| l.is_infinite());
        if lights.is_empty() && infinite_lights.is_empty() {
            warn!("Scene has no lights.");
        }

        let world_bound = intersector.world_bound();
        info!(
            "Scene: {} geometries, {} BRDFs, {} lights, {} infinite lights, bounds {}",
            geometries,
            brdfs.len(),
            lights.len(),
            infinite_lights.len(),
            world_bound
        );

        let power_distribution = PowerLightDistribution::new(&lights);
        let spatial_distribution = SpatialLightDistribution::new(&lights, world_bound, max_cells);

        Ok(Self {
            intersector,
            materials,
            brdfs,
            lights,
            infinite_lights,
            world_bound,
            power_distribution,
            spatial_distribution,
        })
    }

    /// Traces the ray into the scene and returns the `SurfaceInteraction` if
    /// an intersection occurred.
    ///
    /// * `ray` - The ray to trace.
    pub fn intersect(&self, ray: &Ray) -> Option<SurfaceInteraction> {
        self.intersector.intersect(ray).map(|hit| {
            SurfaceInteraction::new(
                hit.t,
                ray.at(hit.t),
                hit.n,
                hit.uv,
                self.materials.get(hit.geometry_id).copied().flatten(),
                hit.geometry_id,
            )
        })
    }

    /// Returns true if the path toward a light is blocked before the light's
    /// expected distance (within `SHADOW_EPSILON`). With an infinite expected
    /// distance any hit blocks.
    ///
    /// * `ray`               - Ray from the shaded point toward the light.
    /// * `expected_distance` - Distance at which the light should be hit.
    pub fn shadow_to(&self, ray: &Ray, expected_distance: Float) -> bool {
        self.intersector.occluded(ray, expected_distance - SHADOW_EPSILON)
    }

    /// Returns the BRDF at a surface point.
    ///
    /// * `si` - The surface interaction.
    pub fn brdf(&self, si: &SurfaceInteraction) -> Option<BrdfRef<'_>> {
        si.brdf.map(|id| self.brdfs.get(id))
    }

    /// Returns the total number of finite and infinite lights.
    pub fn light_count(&self) -> usize {
        self.lights.len() + self.infinite_lights.len()
    }

    /// Selects a finite light proportionally to power. Returns the light and
    /// its selection probability.
    ///
    /// * `u` - Uniform random sample in [0, 1).
    pub fn sample_light_by_power(&self, u: Float) -> Option<(&ArcLight, Float)> {
        self.power_distribution
            .sample(&self.world_bound.center(), u)
            .map(|(i, pdf)| (&self.lights[i], pdf))
    }

    /// Selects a finite light with the spatial strategy. Returns the light
    /// and its selection probability.
    ///
    /// * `p` - The point being shaded.
    /// * `u` - Uniform random sample in [0, 1).
    pub fn sample_light_spatial(&self, p: &Point3f, u: Float) -> Option<(&ArcLight, Float)> {
        self.spatial_distribution
            .sample(p, u)
            .map(|(i, pdf)| (&self.lights[i], pdf))
    }

    /// Selects a finite light with the given strategy.
    ///
    /// * `strategy` - The strategy.
    /// * `p`        - The point being shaded.
    /// * `u`        - Uniform random sample in [0, 1).
    pub fn sample_light(&self, strategy: LightSampleStrategy, p: &Point3f, u: Float) -> Option<(&ArcLight, Float)> {
        match strategy {
            LightSampleStrategy::Power => self.sample_light_by_power(u),
            LightSampleStrategy::Spatial => self.sample_light_spatial(p, u),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
