//! BRDF Integrator

use super::*;
use lumen::integrator::*;
use lumen::rng::*;
use lumen::scene::*;
use lumen::spectrum::*;

/// Cosines below this end the recursion.
const BRDF_COS_EPSILON: Float = 1e-6;

/// Offset of the next bounce origin back along the incoming ray.
const BOUNCE_OFFSET: Float = 1e-4;

/// Implements recursive transport that only samples BRDFs. Light is found by
/// hitting emissive surfaces or escaping to infinite lights, so it is a
/// reference for checking the light sampling integrators.
pub struct BrdfIntegrator {
    /// Common data for integrators.
    pub data: IntegratorData,
}

impl BrdfIntegrator {
    /// Create a new `BrdfIntegrator`.
    ///
    /// * `max_depth` - Maximum recursion depth (default to 10).
    /// * `threads`   - Number of worker threads.
    pub fn new(max_depth: usize, threads: usize) -> Self {
        Self {
            data: IntegratorData::new(max_depth, threads),
        }
    }

    /// Returns the radiance along a ray at a given recursion depth.
    ///
    /// * `ray`     - The ray.
    /// * `scene`   - The scene.
    /// * `sampler` - The sampler.
    /// * `depth`   - The recursion depth.
    /// * `skipped` - Number of material-less surfaces crossed in a row.
    fn li_rec(&self, ray: &Ray, scene: &Scene, sampler: &mut Sampler, depth: usize, skipped: usize) -> Spectrum {
        let si = match scene.intersect(ray) {
            Some(si) => si,
            None => return infinite_lights_radiance(scene, &ray.d),
        };

        let brdf = match scene.brdf(&si) {
            Some(brdf) => brdf,
            None if skipped < MAX_PASS_THROUGH => {
                return self.li_rec(&pass_through(ray, &si.p), scene, sampler, depth, skipped + 1);
            }
            None => return Spectrum::default(),
        };

        if depth >= self.data.max_depth || brdf.is_emissive() {
            return brdf.emission();
        }

        let mut wi = si.to_local(&-ray.d);
        let flip = wi.z < 0.0;
        if flip {
            wi = -wi;
        }
        if wi.z < BRDF_COS_EPSILON {
            return Spectrum::default();
        }

        let bs = brdf.sample(&wi, &si, sampler);
        if bs.wo.z < BRDF_COS_EPSILON || bs.value.is_black() {
            return Spectrum::default();
        }

        let wo = if flip { -bs.wo } else { bs.wo };
        let next = Ray::new(si.p - ray.d * BOUNCE_OFFSET, si.to_world(&wo));
        bs.value * self.li_rec(&next, scene, sampler, depth + 1, 0)
    }
}

impl Integrator for BrdfIntegrator {
    fn get_data(&self) -> &IntegratorData {
        &self.data
    }

    fn get_data_mut(&mut self) -> &mut IntegratorData {
        &mut self.data
    }

    fn li(&self, ray: &Ray, scene: &Scene, sampler: &mut Sampler) -> Spectrum {
        self.li_rec(ray, scene, sampler, 0, 0)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
