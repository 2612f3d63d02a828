//! Path Integrator

use super::*;
use lumen::integrator::*;
use lumen::light_distrib::*;
use lumen::rng::*;
use lumen::scene::*;
use lumen::spectrum::*;

/// Cosines below this end the path.
const PATH_COS_EPSILON: Float = 1e-4;

/// Offset of the next bounce origin back along the incoming ray.
const BOUNCE_OFFSET: Float = 1e-5;

/// Implements unidirectional path tracing with next event estimation at each
/// vertex and Russian roulette.
pub struct PathIntegrator {
    /// Common data for integrators.
    pub data: IntegratorData,

    /// Light selection strategy for finite lights.
    pub light_sample_strategy: LightSampleStrategy,
}

impl PathIntegrator {
    /// Create a new `PathIntegrator`.
    ///
    /// * `max_depth`             - Maximum number of bounces (default to 10).
    /// * `threads`               - Number of worker threads.
    /// * `light_sample_strategy` - Light selection strategy (default to Spatial).
    pub fn new(max_depth: usize, threads: usize, light_sample_strategy: LightSampleStrategy) -> Self {
        Self {
            data: IntegratorData::new(max_depth, threads),
            light_sample_strategy,
        }
    }
}

impl Integrator for PathIntegrator {
    fn get_data(&self) -> &IntegratorData {
        &self.data
    }

    fn get_data_mut(&mut self) -> &mut IntegratorData {
        &mut self.data
    }

    fn li(&self, ray: &Ray, scene: &Scene, sampler: &mut Sampler) -> Spectrum {
        let mut l = Spectrum::default();
        let mut throughput = Spectrum::new(1.0);
        let mut ray = *ray;
        let mut depth = 0;
        let mut skipped = 0;

        while depth < self.data.max_depth {
            debug!("Path tracer bounce {depth}, current L = {l}, throughput = {throughput}");

            let si = match scene.intersect(&ray) {
                Some(si) => si,
                None => {
                    // Deeper vertices already received infinite lights through
                    // next event estimation.
                    if depth == 0 {
                        l += throughput * infinite_lights_radiance(scene, &ray.d);
                    }
                    break;
                }
            };

            let brdf = match scene.brdf(&si) {
                Some(brdf) => brdf,
                None => {
                    // No need to update depth for skips.
                    skipped += 1;
                    if skipped > MAX_PASS_THROUGH {
                        debug!("Terminating path after {} material-less surfaces", skipped);
                        break;
                    }
                    ray = pass_through(&ray, &si.p);
                    continue;
                }
            };

            if depth == 0 {
                l += throughput * brdf.emission();
            }

            // Sample illumination from lights to find path contribution.
            let ld = throughput * sample_one_light(self.light_sample_strategy, &ray, &si, brdf, scene, sampler);
            debug!("Sampled direct lighting Ld = {ld}");
            l += ld;

            // Sample BRDF to get new path direction.
            let mut wi = si.to_local(&-ray.d);
            let flip = wi.z < 0.0;
            if flip {
                wi = -wi;
            }

            let bs = brdf.sample(&wi, &si, sampler);
            if bs.wo.z < PATH_COS_EPSILON || wi.z < PATH_COS_EPSILON || bs.value.is_black() {
                break;
            }
            throughput *= bs.value;
            debug!("Updated throughput = {throughput}");

            let wo = if flip { -bs.wo } else { bs.wo };
            ray = Ray::new(si.p - ray.d * BOUNCE_OFFSET, si.to_world(&wo));

            if russian_roulette(&mut throughput, depth, sampler.next_float()) {
                break;
            }
            depth += 1;
        }

        l
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
