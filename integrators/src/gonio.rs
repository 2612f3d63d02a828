//! Goniometric Integrator

use super::*;
use lumen::camera::*;
use lumen::integrator::*;
use lumen::rng::*;
use lumen::scene::*;
use lumen::sensor::*;
use lumen::spectrum::*;

/// Cosines below this end the path.
const GONIO_COS_EPSILON: Float = 1e-4;

/// Offset of the next bounce origin back along the incoming ray.
const BOUNCE_OFFSET: Float = 1e-5;

/// Measures the distribution of light reflected by a material. Each block
/// fires one camera ray at the sample, follows it through BRDF samples and
/// bins the direction in which it escapes into a latitude-longitude sensor.
pub struct GonioIntegrator {
    /// Common data for integrators.
    pub data: IntegratorData,
}

impl GonioIntegrator {
    /// Create a new `GonioIntegrator`.
    ///
    /// * `max_depth` - Maximum number of bounces (default to 10).
    /// * `threads`   - Number of worker threads.
    pub fn new(max_depth: usize, threads: usize) -> Self {
        Self {
            data: IntegratorData::new(max_depth, threads),
        }
    }

    /// Follows a ray through BRDF samples. Returns the escape direction and
    /// path throughput, or `None` if the path ended inside the scene.
    ///
    /// * `ray`     - The ray.
    /// * `scene`   - The scene.
    /// * `sampler` - The sampler.
    pub fn trace(&self, ray: &Ray, scene: &Scene, sampler: &mut Sampler) -> Option<(Vector3f, Spectrum)> {
        let mut throughput = Spectrum::new(1.0);
        let mut ray = *ray;
        let mut depth = 0;
        let mut skipped = 0;

        while depth < self.data.max_depth {
            let si = match scene.intersect(&ray) {
                Some(si) => si,
                None => return Some((ray.d, throughput)),
            };

            let brdf = match scene.brdf(&si) {
                Some(brdf) => brdf,
                None => {
                    skipped += 1;
                    if skipped > MAX_PASS_THROUGH {
                        return None;
                    }
                    ray = pass_through(&ray, &si.p);
                    continue;
                }
            };

            let mut wi = si.to_local(&-ray.d);
            let flip = wi.z < 0.0;
            if flip {
                wi = -wi;
            }

            let bs = brdf.sample(&wi, &si, sampler);
            if bs.wo.z < GONIO_COS_EPSILON || wi.z < GONIO_COS_EPSILON || bs.value.is_black() {
                return None;
            }
            throughput *= bs.value;

            let wo = if flip { -bs.wo } else { bs.wo };
            ray = Ray::new(si.p - ray.d * BOUNCE_OFFSET, si.to_world(&wo));
            depth += 1;
        }

        // Still bouncing at maximum depth.
        match scene.intersect(&ray) {
            Some(_) => None,
            None => Some((ray.d, throughput)),
        }
    }
}

/// Returns the latitude-longitude sensor pixel of a direction.
///
/// * `d`          - Unit direction.
/// * `resolution` - Sensor resolution.
pub fn direction_to_pixel(d: &Vector3f, resolution: Resolution) -> (usize, usize) {
    let w = resolution.width as Float;
    let h = resolution.height as Float;
    let x = w * (d.x.atan2(d.z) * INV_TWO_PI + 0.5);
    let y = h * clamp(d.y, -1.0, 1.0).acos() * INV_PI;
    (
        clamp(x, 0.0, w - 1.0) as usize,
        clamp(y, 0.0, h - 1.0) as usize,
    )
}

impl Integrator for GonioIntegrator {
    fn get_data(&self) -> &IntegratorData {
        &self.data
    }

    fn get_data_mut(&mut self) -> &mut IntegratorData {
        &mut self.data
    }

    fn li(&self, ray: &Ray, scene: &Scene, sampler: &mut Sampler) -> Spectrum {
        self.trace(ray, scene, sampler)
            .map_or(Spectrum::default(), |(_, throughput)| throughput)
    }

    fn render_block(
        &self,
        _block: &Block,
        resolution: Resolution,
        camera: &dyn Camera,
        scene: &Scene,
        sampler: &mut Sampler,
    ) -> SensorBlock {
        let mut sensor_block = SensorBlock::with_capacity(1);

        let u = 2.0 * sampler.next_float() - 1.0;
        let v = 2.0 * sampler.next_float() - 1.0;
        let ray = camera.generate_ray(u, v);

        if let Some((d, throughput)) = self.trace(&ray, scene, sampler) {
            let (x, y) = direction_to_pixel(&d, resolution);
            debug!("Gonio ray {ray} escaped along {d} -> ({x}, {y})");
            sensor_block.add(x, y, discard_invalid(throughput, x, y));
        }
        sensor_block
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
