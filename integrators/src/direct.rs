//! Direct Lighting Integrator

use super::*;
use lumen::integrator::*;
use lumen::light_distrib::*;
use lumen::rng::*;
use lumen::scene::*;
use lumen::spectrum::*;

/// Implements direct lighting: emission seen directly plus one bounce of
/// light arriving from the light sources.
pub struct DirectIntegrator {
    /// Common data for integrators.
    pub data: IntegratorData,

    /// Estimate every light at each hit instead of one chosen by power.
    pub sample_all_lights: bool,
}

impl DirectIntegrator {
    /// Create a new `DirectIntegrator`.
    ///
    /// * `threads`           - Number of worker threads.
    /// * `sample_all_lights` - Estimate every light at each hit instead of one
    ///                         chosen by power.
    pub fn new(threads: usize, sample_all_lights: bool) -> Self {
        Self {
            data: IntegratorData::new(1, threads),
            sample_all_lights,
        }
    }
}

impl Integrator for DirectIntegrator {
    fn get_data(&self) -> &IntegratorData {
        &self.data
    }

    fn get_data_mut(&mut self) -> &mut IntegratorData {
        &mut self.data
    }

    fn li(&self, ray: &Ray, scene: &Scene, sampler: &mut Sampler) -> Spectrum {
        let mut ray = *ray;
        for _ in 0..=MAX_PASS_THROUGH {
            let si = match scene.intersect(&ray) {
                Some(si) => si,
                None => return infinite_lights_radiance(scene, &ray.d),
            };

            let brdf = match scene.brdf(&si) {
                Some(brdf) => brdf,
                None => {
                    ray = pass_through(&ray, &si.p);
                    continue;
                }
            };

            if brdf.is_emissive() {
                return brdf.emission();
            }

            return if self.sample_all_lights {
                sample_all_lights(&ray, &si, brdf, scene, sampler)
            } else {
                sample_one_light(LightSampleStrategy::Power, &ray, &si, brdf, scene, sampler)
            };
        }

        debug!("Ray {} crossed too many material-less surfaces", ray);
        Spectrum::default()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_scenes::*;
    use float_cmp::*;
    use lumen::sensor::*;

    #[test]
    fn lit_sphere_centre_pixel_is_albedo_over_pi() {
        let scene = lit_sphere();
        let camera = sphere_camera();
        let mut sensor = Sensor::new(33, 33);
        let mut integrator = DirectIntegrator::new(2, false);
        for pass in 0..4 {
            integrator.render(&camera, &mut sensor, &scene, pass == 0);
        }
        assert_eq!(integrator.get_data().pass(), 4);

        let l = sensor.value(16, 16);
        assert!(approx_eq!(f32, l[0], 0.2 * INV_PI, epsilon = 1e-3));
        assert!(approx_eq!(f32, l[1], 0.5 * INV_PI, epsilon = 1e-3));
        assert!(approx_eq!(f32, l[2], 0.8 * INV_PI, epsilon = 1e-3));

        // Corners miss the sphere and the directional light is invisible.
        assert!(sensor.value(0, 0).is_black());
        assert_eq!(sensor.pixel_samples(0, 0), 4);
    }

    #[test]
    fn reset_restarts_accumulation() {
        let scene = lit_sphere();
        let camera = sphere_camera();
        let mut sensor = Sensor::new(16, 16);
        let mut integrator = DirectIntegrator::new(1, true);
        integrator.render(&camera, &mut sensor, &scene, false);
        integrator.render(&camera, &mut sensor, &scene, false);
        assert_eq!(sensor.pixel_samples(3, 3), 2);
        integrator.render(&camera, &mut sensor, &scene, true);
        assert_eq!(sensor.pixel_samples(3, 3), 1);
        assert_eq!(integrator.get_data().pass(), 1);
    }

    #[test]
    fn environment_furnace_converges_to_albedo() {
        let scene = furnace_sphere(0.5);
        let integrator = DirectIntegrator::new(1, false);
        let ray = Ray::new(Point3f::new(5.0, 0.0, 0.0), Vector3f::new(-1.0, 0.0, 0.0));
        let l = mean_radiance(&integrator, &scene, &ray, 20_000);
        assert!(approx_eq!(f32, l[0], 0.5, epsilon = 0.02), "L = {}", l);
    }

    #[test]
    fn one_light_is_chosen_by_power() {
        let scene = two_sphere_lights();
        // Equal radii, so the bright light carries 25/26 of the power.
        let n = 10_000;
        let bright = (0..n)
            .filter(|&i| {
                let u = (i as Float + 0.5) / n as Float;
                let (light, pdf) = scene.sample_light_by_power(u).unwrap();
                let bright = light.geometry_id() == Some(1);
                let expected = if bright { 25.0 / 26.0 } else { 1.0 / 26.0 };
                assert!(approx_eq!(f32, pdf, expected, epsilon = 1e-4));
                bright
            })
            .count();
        assert!(approx_eq!(f32, bright as Float / n as Float, 25.0 / 26.0, epsilon = 1e-3));

        // Irradiance from a sphere is π L sin²α cosθ.
        let e = PI * 50.0 * (0.2f32 / 4.0).powi(2) + PI * 2.0 * (0.2f32 / 5.0).powi(2) * 0.6;
        let expected = 0.5 * INV_PI * e;
        let ray = Ray::new(Point3f::new(0.0, 1.0, 0.0), Vector3f::new(0.0, -1.0, 0.0));
        for sample_all_lights in [false, true] {
            let integrator = DirectIntegrator::new(1, sample_all_lights);
            let l = mean_radiance(&integrator, &scene, &ray, 20_000);
            assert!(
                approx_eq!(f32, l[0], expected, epsilon = 0.03 * expected),
                "L = {} expected {}",
                l,
                expected
            );
        }
    }

    #[test]
    fn emissive_surfaces_return_emission() {
        let scene = glowing_sphere(Spectrum::rgb(1.0, 2.0, 3.0));
        let integrator = DirectIntegrator::new(1, true);
        let mut sampler = Sampler::new(1);
        let ray = Ray::new(Point3f::new(5.0, 0.0, 0.0), Vector3f::new(-1.0, 0.0, 0.0));
        assert!(integrator.li(&ray, &scene, &mut sampler) == Spectrum::rgb(1.0, 2.0, 3.0));
    }

    #[test]
    fn material_less_surfaces_are_crossed() {
        let scene = veiled_sphere();
        let integrator = DirectIntegrator::new(1, false);
        let mut sampler = Sampler::new(1);
        let ray = Ray::new(Point3f::new(5.0, 0.6, 0.0), Vector3f::new(-1.0, 0.0, 0.0));
        let l = integrator.li(&ray, &scene, &mut sampler);
        // Hit at (0.8, 0.6, 0) lit from (1, 1, 0).
        let cos = 1.4 / 2.0f32.sqrt();
        assert!(approx_eq!(f32, l[1], 0.5 * INV_PI * cos, epsilon = 1e-3), "L = {}", l);
    }
}
