//! Ambient Occlusion Integrator

use super::*;
use lumen::integrator::*;
use lumen::rng::*;
use lumen::sampling::*;
use lumen::scene::*;
use lumen::spectrum::*;

/// Offset of the occlusion ray origin back along the camera ray.
const AO_OFFSET: Float = 0.001;

/// Computes ambient occlusion: the fraction of the hemisphere above a hit
/// point from which no geometry is visible.
pub struct AOIntegrator {
    /// Common data for integrators.
    pub data: IntegratorData,
}

impl AOIntegrator {
    /// Create a new `AOIntegrator`.
    ///
    /// * `threads` - Number of worker threads.
    pub fn new(threads: usize) -> Self {
        Self {
            data: IntegratorData::new(1, threads),
        }
    }
}

impl Integrator for AOIntegrator {
    fn get_data(&self) -> &IntegratorData {
        &self.data
    }

    fn get_data_mut(&mut self) -> &mut IntegratorData {
        &mut self.data
    }

    fn li(&self, ray: &Ray, scene: &Scene, sampler: &mut Sampler) -> Spectrum {
        let si = match scene.intersect(ray) {
            Some(si) => si,
            None => return Spectrum::default(),
        };

        // Look into the hemisphere on the side the ray came from.
        let mut w = uniform_sample_hemisphere(&sampler.next_2d());
        if si.n.dot(&ray.d) > 0.0 {
            w.z = -w.z;
        }
        let ao_ray = Ray::new(si.p - ray.d * AO_OFFSET, si.to_world(&w));
        if scene.shadow_to(&ao_ray, INFINITY) {
            Spectrum::default()
        } else {
            Spectrum::new(1.0)
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
