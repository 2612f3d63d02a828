//! Environment Source

use lumen::geometry::*;
use lumen::interaction::*;
use lumen::light::*;
use lumen::pbrt::*;
use lumen::rng::*;
use lumen::scene::*;
use lumen::spectrum::*;
use lumen::texture::*;

/// Implements an infinitely far away light source described by a
/// latitude-longitude environment map. Rows span θ ∈ [0, π] from the +y pole
/// and columns span φ ∈ [0, 2π) measured from +x toward +z.
#[derive(Clone, Debug)]
pub struct EnvironmentLight {
    /// Light source type.
    pub light_type: LightType,

    /// The environment map.
    pub envmap: ImageTexture<Spectrum>,

    /// Scale applied to the environment map.
    pub intensity: Float,

    /// Map width in pixels.
    width: usize,

    /// Map height in pixels.
    height: usize,

    /// Normalized per pixel sampling probability.
    density: Vec<Float>,

    /// Normalized cumulative sum of `density`.
    cdf: Vec<Float>,

    /// Guide table: entry `k` is the first pixel whose cumulative value
    /// exceeds `k/n`, so a lookup only scans forward a few pixels.
    guide: Vec<usize>,

    /// Last pixel carrying energy.
    last: usize,

    /// Angular height of a pixel row.
    d_theta: Float,

    /// Angular width of a pixel column.
    d_phi: Float,

    /// Total emitted power.
    power: Float,
}

impl EnvironmentLight {
    /// Returns a new `EnvironmentLight`. Fails when the intensity is negative
    /// or the map emits nothing.
    ///
    /// * `envmap`    - The environment map.
    /// * `intensity` - Scale applied to the environment map.
    pub fn new(envmap: ImageTexture<Spectrum>, intensity: Float) -> Result<Self, SceneError> {
        if !(intensity >= 0.0) {
            return Err(SceneError::InvalidLight(format!(
                "environment intensity {} is negative",
                intensity
            )));
        }

        let (width, height) = envmap.resolution();
        let d_theta = PI / height as Float;
        let d_phi = TWO_PI / width as Float;

        // Luminance weighted by the solid angle of each row.
        let mut density = Vec::with_capacity(width * height);
        for y in 0..height {
            let sin_theta = (PI * (y as Float + 0.5) / height as Float).sin();
            for x in 0..width {
                density.push(envmap.get(x, y).mean() * sin_theta);
            }
        }

        let mut cdf = Vec::with_capacity(density.len());
        let mut sum: Float = 0.0;
        for &d in density.iter() {
            sum += d;
            cdf.push(sum);
        }
        if !(sum > 0.0) || !sum.is_finite() {
            return Err(SceneError::InvalidLight(format!(
                "environment map {}x{} emits no light",
                width, height
            )));
        }

        let inv_sum = 1.0 / sum;
        density.iter_mut().for_each(|d| *d *= inv_sum);
        cdf.iter_mut().for_each(|c| *c *= inv_sum);

        let n = cdf.len();
        let last = density.iter().rposition(|&d| d > 0.0).unwrap_or(n - 1);
        let guide = linspace(0.0, 1.0, n, false)
            .into_iter()
            .map(|u| min(cdf.partition_point(|&c| c <= u), last))
            .collect();

        info!("Environment map {}x{} power {}", width, height, sum * intensity);

        Ok(Self {
            light_type: LightType::INFINITE,
            envmap,
            intensity,
            width,
            height,
            density,
            cdf,
            guide,
            last,
            d_theta,
            d_phi,
            power: sum * intensity,
        })
    }

    /// Returns the pixel whose cumulative interval contains `u`. Pixels
    /// without energy have an empty interval and are never returned.
    ///
    /// * `u` - Uniform sample in [0, 1).
    fn sample_pixel(&self, u: Float) -> usize {
        let n = self.guide.len();
        let mut id = self.guide[min((u * n as Float) as usize, n - 1)];
        while id > 0 && self.cdf[id - 1] > u {
            id -= 1;
        }
        while id < self.last && self.cdf[id] <= u {
            id += 1;
        }
        id
    }

    /// Returns the solid angle density of a direction drawn uniformly in
    /// (θ, φ) within a pixel.
    ///
    /// * `density` - Probability of the pixel.
    /// * `to_map`  - Unit direction toward the map.
    fn solid_angle_pdf(&self, density: Float, to_map: &Vector3f) -> Float {
        let sin_theta = clamp(1.0 - to_map.y * to_map.y, 1e-6, 1.0).sqrt();
        density / (sin_theta * self.d_phi * self.d_theta)
    }

    /// Returns the normalized probability of the pixel under (u, v).
    ///
    /// * `u` - Horizontal coordinate in [0, 1].
    /// * `v` - Vertical coordinate in [0, 1].
    fn density_uv(&self, u: Float, v: Float) -> Float {
        let x = min(max(u * self.width as Float, 0.0) as usize, self.width - 1);
        let y = min(max(v * self.height as Float, 0.0) as usize, self.height - 1);
        self.density[y * self.width + x]
    }
}

/// Returns the latitude-longitude coordinates of a direction toward the map.
///
/// * `d` - Unit direction.
fn direction_to_uv(d: &Vector3f) -> (Float, Float) {
    let mut phi = d.z.atan2(d.x);
    if phi < 0.0 {
        phi += TWO_PI;
    }
    (phi * INV_TWO_PI, clamp(d.y, -1.0, 1.0).acos() * INV_PI)
}

impl Light for EnvironmentLight {
    fn get_type(&self) -> LightType {
        self.light_type
    }

    fn sample(&self, _si: &SurfaceInteraction, sampler: &mut Sampler) -> LightSample {
        let id = self.sample_pixel(sampler.next_float());
        let x = id % self.width;
        let y = id / self.width;

        // Uniform in (θ, φ) over the pixel.
        let theta = self.d_theta * (y as Float + sampler.next_float());
        let phi = self.d_phi * (x as Float + sampler.next_float());

        let to_map = Vector3f::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
        let pdf = self.solid_angle_pdf(self.density[id], &to_map);

        LightSample::new(-to_map, self.eval(&to_map), pdf, INFINITY)
    }

    fn eval(&self, d: &Vector3f) -> Spectrum {
        let (u, v) = direction_to_uv(d);
        self.envmap.evaluate_uv(u, v) * self.intensity
    }

    fn pdf(&self, _p: &Point3f, d: &Vector3f) -> Float {
        let to_map = -*d;
        let (u, v) = direction_to_uv(&to_map);
        self.solid_angle_pdf(self.density_uv(u, v), &to_map)
    }

    fn power(&self) -> Float {
        self.power
    }

    fn distance(&self, _p: &Point3f) -> Float {
        1.0
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn interaction() -> SurfaceInteraction {
        SurfaceInteraction::new(
            1.0,
            Point3f::zero(),
            Vector3f::new(0.0, 1.0, 0.0),
            Point2f::default(),
            None,
            0,
        )
    }

    fn constant_map(width: usize, height: usize) -> ImageTexture<Spectrum> {
        ImageTexture::new(width, height, vec![Spectrum::new(1.0); width * height]).unwrap()
    }

    #[test]
    fn constant_map_integrates_to_full_sphere() {
        let light = EnvironmentLight::new(constant_map(16, 8), 2.0).unwrap();
        let si = interaction();
        let mut sampler = Sampler::new(17);
        let n = 20_000;
        let mut sum: Float = 0.0;
        for _ in 0..n {
            let ls = light.sample(&si, &mut sampler);
            assert!(ls.expected_distance.is_infinite());
            assert!(approx_eq!(f32, ls.direction.length(), 1.0, epsilon = 1e-5));
            sum += ls.emission[0] / ls.pdf;
        }
        assert!(approx_eq!(f32, sum / n as Float, 2.0 * FOUR_PI, epsilon = 0.01 * 2.0 * FOUR_PI));
    }

    #[test]
    fn sample_pdf_matches_pdf_of_direction() {
        let pixels: Vec<Spectrum> = (0..32).map(|i| Spectrum::new(0.25 + (i % 5) as Float)).collect();
        let light = EnvironmentLight::new(ImageTexture::new(8, 4, pixels).unwrap(), 1.0).unwrap();
        let si = interaction();
        let mut sampler = Sampler::new(5);
        let on_edge = |t: Float| {
            let f = t - t.floor();
            f < 1e-4 || f > 1.0 - 1e-4
        };
        for _ in 0..5_000 {
            let ls = light.sample(&si, &mut sampler);
            let (u, v) = direction_to_uv(&-ls.direction);
            if on_edge(u * 8.0) || on_edge(v * 4.0) {
                continue;
            }
            let pdf = light.pdf(&si.p, &ls.direction);
            assert!(
                approx_eq!(f32, ls.pdf, pdf, epsilon = 1e-3 * pdf),
                "sampled pdf {} vs {}",
                ls.pdf,
                pdf
            );
        }
    }

    #[test]
    fn inverse_pdf_recovers_row_solid_angles() {
        let (width, height) = (16, 8);
        let light = EnvironmentLight::new(constant_map(width, height), 1.0).unwrap();
        let si = interaction();
        let mut sampler = Sampler::new(11);
        let n = 400_000;
        let mut rows = vec![0.0f64; height];
        for _ in 0..n {
            let ls = light.sample(&si, &mut sampler);
            let (_, v) = direction_to_uv(&-ls.direction);
            let y = min((v * height as Float) as usize, height - 1);
            rows[y] += 1.0 / ls.pdf as f64;
        }
        let d_theta = std::f64::consts::PI / height as f64;
        for (y, sum) in rows.iter().enumerate() {
            let expected = 2.0 * std::f64::consts::PI * ((y as f64 * d_theta).cos() - ((y + 1) as f64 * d_theta).cos());
            let estimate = sum / n as f64;
            assert!(
                (estimate - expected).abs() < 0.02 * expected,
                "row {}: {} vs {}",
                y,
                estimate,
                expected
            );
        }
    }

    #[test]
    fn samples_follow_the_bright_pixel() {
        let mut pixels = vec![Spectrum::default(); 8];
        pixels[1] = Spectrum::new(4.0);
        let light = EnvironmentLight::new(ImageTexture::new(4, 2, pixels).unwrap(), 1.0).unwrap();
        let si = interaction();
        let mut sampler = Sampler::new(23);
        for _ in 0..200 {
            let ls = light.sample(&si, &mut sampler);
            let to_map = -ls.direction;
            assert!(to_map.y >= -1e-5);
            let (u, _) = direction_to_uv(&to_map);
            assert!((0.25 - 1e-4..=0.5 + 1e-4).contains(&u), "u = {}", u);
        }
        assert!(light.pdf(&Point3f::zero(), &Vector3f::new(0.0, 1.0, 0.0)) == 0.0);
    }

    #[test]
    fn eval_maps_directions_to_pixels() {
        let pixels: Vec<Spectrum> = (0..8).map(|i| Spectrum::new(i as Float + 1.0)).collect();
        let light = EnvironmentLight::new(ImageTexture::new(4, 2, pixels).unwrap(), 0.5).unwrap();
        // +x is φ = 0, upper half is row 0.
        let l = light.eval(&Vector3f::new(0.9, 0.1, 0.01).normalize());
        assert!(approx_eq!(f32, l[0], 0.5, epsilon = 1e-6));
        // +z is φ = π/2, lower half is row 1.
        let l = light.eval(&Vector3f::new(-0.01, -0.1, 0.9).normalize());
        assert!(approx_eq!(f32, l[0], 3.0, epsilon = 1e-6));
        assert!(!light.is_dirac() && light.is_infinite());
    }

    #[test]
    fn dark_map_is_rejected() {
        assert!(EnvironmentLight::new(
            ImageTexture::new(2, 2, vec![Spectrum::default(); 4]).unwrap(),
            1.0
        )
        .is_err());
        assert!(EnvironmentLight::new(constant_map(2, 2), -1.0).is_err());
    }
}
