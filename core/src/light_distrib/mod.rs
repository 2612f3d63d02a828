//! Light Distribution.

mod power;
mod spatial;

pub use power::*;
pub use spatial::*;

use crate::geometry::*;
use crate::pbrt::*;
use crate::sampling::*;

/// Light sampling strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LightSampleStrategy {
    /// Samples light sources according to their emitted power.
    Power,

    /// Samples light sources according to a power over squared distance
    /// estimate precomputed on a grid over the scene.
    Spatial,
}

impl From<&str> for LightSampleStrategy {
    /// Returns a `LightSampleStrategy` given a string name.
    fn from(name: &str) -> Self {
        match name {
            "power" => Self::Power,
            "spatial" => Self::Spatial,
            _ => {
                error!("Light sample distribution type '{}' unknown. Using 'spatial'.", name);
                Self::Spatial
            }
        }
    }
}

/// Interface of light distribution implementations that provide probability
/// distributions for sampling finite light sources at a given point in space.
pub trait LightDistribution {
    /// Returns the sampling distribution for light sources at a point or
    /// `None` when there are no lights.
    ///
    /// * `p` - The point.
    fn lookup(&self, p: &Point3f) -> Option<&Distribution1D>;

    /// Selects a light index and returns it with its selection probability.
    ///
    /// * `p` - The point being shaded.
    /// * `u` - Uniform random sample in [0, 1).
    fn sample(&self, p: &Point3f, u: Float) -> Option<(usize, Float)> {
        self.lookup(p).map(|d| d.sample_discrete(u))
    }
}
