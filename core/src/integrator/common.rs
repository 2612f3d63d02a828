//! Common

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::light_distrib::*;
use crate::pbrt::*;
use crate::reflection::*;
use crate::rng::*;
use crate::scene::*;
use crate::spectrum::*;

/// Local directions closer to the horizon than this are rejected by direct
/// lighting.
const DIRECT_COS_EPSILON: Float = 1e-5;

/// Offset of the BRDF sampled ray origin back along the incoming ray.
const BRDF_RAY_OFFSET: Float = 1e-4;

/// Compute a direct lighting estimate for one light by combining a light
/// sample and, unless the light is a delta distribution, a BRDF sample with
/// multiple importance sampling. Surfaces are two sided; when the ray arrives
/// from below the normal the local directions are mirrored.
///
/// * `ray`     - The ray that found the surface.
/// * `si`      - The surface interaction.
/// * `brdf`    - The BRDF at the surface.
/// * `light`   - The light.
/// * `scene`   - The scene.
/// * `sampler` - The sampler.
pub fn estimate_direct(
    ray: &Ray,
    si: &SurfaceInteraction,
    brdf: BrdfRef<'_>,
    light: &ArcLight,
    scene: &Scene,
    sampler: &mut Sampler,
) -> Spectrum {
    let mut ld = Spectrum::default();

    let flip = si.n.dot(&-ray.d) < 0.0;
    let (sign, p) = if flip {
        (-1.0, si.offset_point(-SURFACE_OFFSET))
    } else {
        (1.0, si.offset_point(SURFACE_OFFSET))
    };

    let wi = si.to_local(&-ray.d) * sign;
    if wi.z < DIRECT_COS_EPSILON {
        return ld;
    }

    // Sample light source with multiple importance sampling. The light sees
    // the same origin as the shadow ray.
    let shading = SurfaceInteraction { p, ..*si };
    let ls = light.sample(&shading, sampler);
    let wo = si.to_local(&-ls.direction) * sign;
    if ls.pdf > 0.0 && !ls.emission.is_black() && wo.z > 0.0 {
        let shadow_ray = Ray::new(p, -ls.direction);
        if scene.shadow_to(&shadow_ray, ls.expected_distance) {
            debug!("  shadow ray blocked");
        } else {
            let f = brdf.eval(&wi, &wo, si, sampler);
            if light.is_dirac() {
                ld += f * ls.emission / ls.pdf;
            } else {
                let brdf_pdf = brdf.pdf(&wi, &wo, si);
                ld += f * ls.emission * (power_heuristic(ls.pdf, brdf_pdf) / ls.pdf);
            }
        }
    }

    // Sample BRDF with multiple importance sampling.
    if !light.is_dirac() {
        let bs = brdf.sample(&wi, si, sampler);
        if bs.wo.z < DIRECT_COS_EPSILON || bs.value.is_black() {
            return ld;
        }

        let wo_world = si.to_world(&(bs.wo * sign));
        let light_pdf = light.pdf(&p, &-wo_world);
        if light_pdf == 0.0 {
            return ld;
        }
        let weight = power_heuristic(brdf.pdf(&wi, &bs.wo, si), light_pdf);

        // Only the light's own emissive geometry, or escaping to an infinite
        // light, counts as reaching the light.
        let brdf_ray = Ray::new(si.p - ray.d * BRDF_RAY_OFFSET, wo_world);
        let reached = match scene.intersect(&brdf_ray) {
            Some(hit) => {
                light.geometry_id() == Some(hit.geometry_id) && scene.brdf(&hit).map_or(false, |b| b.is_emissive())
            }
            None => light.is_infinite(),
        };
        if reached {
            ld += bs.value * light.eval(&wo_world) * weight;
        }
    }

    ld
}

/// Sum the direct lighting estimates of every finite and infinite light.
///
/// * `ray`     - The ray that found the surface.
/// * `si`      - The surface interaction.
/// * `brdf`    - The BRDF at the surface.
/// * `scene`   - The scene.
/// * `sampler` - The sampler.
pub fn sample_all_lights(
    ray: &Ray,
    si: &SurfaceInteraction,
    brdf: BrdfRef<'_>,
    scene: &Scene,
    sampler: &mut Sampler,
) -> Spectrum {
    scene
        .lights
        .iter()
        .chain(scene.infinite_lights.iter())
        .fold(Spectrum::default(), |l, light| {
            l + estimate_direct(ray, si, brdf, light, scene, sampler)
        })
}

/// Sample one finite light with a selection strategy and, when the scene has
/// any, one uniformly chosen infinite light. Each estimate is divided by its
/// selection probability.
///
/// * `strategy` - Selection strategy for finite lights.
/// * `ray`      - The ray that found the surface.
/// * `si`       - The surface interaction.
/// * `brdf`     - The BRDF at the surface.
/// * `scene`    - The scene.
/// * `sampler`  - The sampler.
pub fn sample_one_light(
    strategy: LightSampleStrategy,
    ray: &Ray,
    si: &SurfaceInteraction,
    brdf: BrdfRef<'_>,
    scene: &Scene,
    sampler: &mut Sampler,
) -> Spectrum {
    let mut l = Spectrum::default();

    let u = sampler.next_float();
    if let Some((light, pdf)) = scene.sample_light(strategy, &si.p, u) {
        if pdf > 0.0 {
            l += estimate_direct(ray, si, brdf, light, scene, sampler) / pdf;
        }
    }

    let n_infinite = scene.infinite_lights.len();
    if n_infinite > 0 {
        let light = &scene.infinite_lights[uniform_index(sampler.next_float(), n_infinite)];
        l += estimate_direct(ray, si, brdf, light, scene, sampler) * n_infinite as Float;
    }

    l
}

/// Returns the radiance of all non-dirac infinite lights along a ray that
/// escapes the scene.
///
/// * `scene` - The scene.
/// * `d`     - Direction of the escaping ray.
pub fn infinite_lights_radiance(scene: &Scene, d: &Vector3f) -> Spectrum {
    scene
        .infinite_lights
        .iter()
        .filter(|light| !light.is_dirac())
        .fold(Spectrum::default(), |l, light| l + light.eval(d))
}

/// Throughput below which Russian roulette may terminate a path.
pub const RR_THRESHOLD: Float = 0.2;

/// Depth after which Russian roulette is applied.
pub const RR_MIN_DEPTH: usize = 2;

/// Russian roulette. Returns true if the path terminates; otherwise the
/// throughput is divided by the survival probability so that its expected
/// value is unchanged.
///
/// * `throughput` - Path throughput.
/// * `depth`      - Current depth.
/// * `u`          - Uniform random sample in [0, 1).
pub fn russian_roulette(throughput: &mut Spectrum, depth: usize, u: Float) -> bool {
    let max_component = throughput.max_component_value();
    if max_component >= RR_THRESHOLD || depth <= RR_MIN_DEPTH {
        return false;
    }

    let q = max(0.05, 1.0 - max_component);
    if u < q {
        return true;
    }
    *throughput /= 1.0 - q;
    false
}

/// Maps a uniform sample to an index in `0..n`.
///
/// * `u` - Uniform random sample in [0, 1).
/// * `n` - Number of choices.
#[inline]
pub fn uniform_index(u: Float, n: usize) -> usize {
    min((u * n as Float) as usize, n - 1)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
