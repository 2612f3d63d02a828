#[macro_use]
extern crate log;

use cameras::*;
use clap::Parser;
use integrators::*;
use lights::*;
use lumen::app::*;
use lumen::camera::*;
use lumen::geometry::*;
use lumen::image_io::*;
use lumen::integrator::*;
use lumen::light::*;
use lumen::light_distrib::*;
use lumen::microfacet::*;
use lumen::pbrt::*;
use lumen::reflection::*;
use lumen::scene::*;
use lumen::sensor::*;
use lumen::spectrum::*;
use lumen::texture::*;
use shapes::*;
use std::process::exit;
use std::sync::Arc;

#[cfg(all(feature = "dhat-rs", feature = "jemalloc"))]
compile_error!("feature 'dhat-rs' and feature 'jemalloc' cannot be enabled at the same time");

#[cfg(feature = "dhat-rs")]
use dhat::{Dhat, DhatAlloc};

#[cfg(feature = "dhat-rs")]
#[global_allocator]
static ALLOCATOR: DhatAlloc = DhatAlloc;

#[cfg(feature = "jemalloc")]
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static ALLOCATOR: Jemalloc = Jemalloc;

fn main() {
    #[cfg(feature = "dhat-rs")]
    let _dhat = Dhat::start_heap_profiling();

    // Initialize `env_logger`.
    env_logger::init();

    let options = Options::parse();
    if let Err(e) = render(&options) {
        error!("{e}");
        exit(1);
    }
}

fn render(options: &Options) -> Result<(), String> {
    if options.width == 0 || options.height == 0 {
        return Err(format!("Invalid resolution {}x{}", options.width, options.height));
    }

    let threads = options.threads();
    let aspect = options.width as Float / options.height as Float;

    let (scene, camera): (Scene, ArcCamera) = match options.integrator {
        IntegratorKind::Gonio => {
            let camera: ArcCamera = Arc::new(GonioCamera::new(
                options.gonio_theta.to_radians(),
                options.gonio_phi.to_radians(),
                Point3f::zero(),
                1.0,
                100.0,
            ));
            (gonio_scene()?, camera)
        }
        _ => {
            let camera: ArcCamera = Arc::new(PerspectiveCamera::new(
                Point3f::new(0.0, 2.0, 6.0),
                Point3f::new(0.0, 0.5, 0.0),
                40.0,
                aspect,
            ));
            (showcase_scene(options)?, camera)
        }
    };

    let mut integrator: Box<dyn Integrator> = match options.integrator {
        IntegratorKind::Direct => Box::new(DirectIntegrator::new(threads, options.sample_all_lights)),
        IntegratorKind::Path => Box::new(PathIntegrator::new(
            options.max_depth,
            threads,
            options.light_strategy.into(),
        )),
        IntegratorKind::Brdf => Box::new(BrdfIntegrator::new(options.max_depth, threads)),
        IntegratorKind::Ao => Box::new(AOIntegrator::new(threads)),
        IntegratorKind::Gonio => Box::new(GonioIntegrator::new(options.max_depth, threads)),
    };

    let mut sensor = Sensor::new(options.width, options.height);
    let mut total = 0;
    for pass in 0..options.passes {
        let elapsed = integrator.render(&*camera, &mut sensor, &scene, pass == 0);
        info!("Pass {}/{} took {} ms", pass + 1, options.passes, elapsed);
        total += elapsed;
    }
    info!(
        "Rendered {} samples in {} ms with {} threads",
        sensor.sample_count(),
        total,
        threads
    );

    write_image(&options.image_file, &sensor.to_rgb_buffer(), options.width, options.height)
}

/// Collects shapes with their materials into a scene.
struct SceneBuilder {
    shapes: ShapeList,
    materials: Vec<Option<BrdfId>>,
    brdfs: BrdfArena,
    lights: Vec<ArcLight>,
}

impl SceneBuilder {
    fn new() -> Self {
        Self {
            shapes: ShapeList::new(),
            materials: vec![],
            brdfs: BrdfArena::new(),
            lights: vec![],
        }
    }

    fn add_shape(&mut self, shape: ArcShape, material: Option<BrdfId>) -> usize {
        self.materials.push(material);
        self.shapes.push(shape)
    }

    fn build(self, max_cells: usize) -> Result<Scene, String> {
        Scene::new(Arc::new(self.shapes), self.materials, self.brdfs, self.lights, max_cells)
            .map_err(|e| e.to_string())
    }
}

/// Three spheres with different materials on a floor, lit by a small sphere
/// light, a ceiling panel, a dim sun and optionally an environment map.
fn showcase_scene(options: &Options) -> Result<Scene, String> {
    let mut builder = SceneBuilder::new();

    let floor = builder
        .brdfs
        .push(Lambertian::new(constant_spectrum(Spectrum::rgb(0.6, 0.6, 0.55))));
    let gold = builder.brdfs.push(RoughMicrofacet::new(
        ShapeInvariant::new(Microsurface::Ggx(Ggx), 0.2, 0.2),
        constant_spectrum(Spectrum::rgb(0.143, 0.374, 1.442)),
        constant_spectrum(Spectrum::rgb(3.983, 2.385, 1.603)),
    ));
    let clay = builder.brdfs.push(DiffuseMicrofacet::new(
        ShapeInvariant::new(Microsurface::Beckmann(Beckmann), 0.5, 0.5),
        constant_spectrum(Spectrum::rgb(0.7, 0.3, 0.2)),
    ));
    let grains = Grains::Diffuse(DiffuseMicrofacet::new(
        ShapeInvariant::new(Micrograin::new(0.4), 0.5, 0.5),
        constant_spectrum(Spectrum::new(0.9)),
    ));
    // Dust settles on top of the sphere.
    let dust =
        ImageTexture::<Float>::new(4, 1, vec![0.7, 0.4, 0.2, 0.1]).map_err(|e| e.to_string())?;
    let dusty_gold = builder
        .brdfs
        .push(MicrograinLayer::new(grains, gold).with_tau(Arc::new(dust)));
    let glow = builder.brdfs.push(Emissive::new(Spectrum::new(20.0)));
    let panel_glow = builder.brdfs.push(Emissive::new(Spectrum::rgb(4.0, 3.8, 3.5)));

    builder.add_shape(
        Arc::new(Rectangle::new(
            Point3f::zero(),
            Vector3f::new(0.0, 0.0, 4.0),
            Vector3f::new(4.0, 0.0, 0.0),
        )),
        Some(floor),
    );
    builder.add_shape(Arc::new(Sphere::new(Point3f::new(-1.2, 0.5, 0.0), 0.5)), Some(clay));
    builder.add_shape(Arc::new(Sphere::new(Point3f::new(0.0, 0.5, 0.0), 0.5)), Some(gold));
    builder.add_shape(Arc::new(Sphere::new(Point3f::new(1.2, 0.5, 0.0), 0.5)), Some(dusty_gold));

    let bulb = Sphere::new(Point3f::new(0.0, 3.0, 1.0), 0.3);
    let bulb_id = builder.add_shape(Arc::new(bulb), Some(glow));
    builder
        .lights
        .push(Arc::new(SphereLight::new(bulb, Spectrum::new(20.0), Some(bulb_id))));

    let panel = Rectangle::new(
        Point3f::new(0.0, 3.5, -2.0),
        Vector3f::new(0.5, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, 0.5),
    );
    let panel_id = builder.add_shape(Arc::new(panel), Some(panel_glow));
    builder.lights.push(Arc::new(RectangleLight::new(
        panel,
        Spectrum::rgb(4.0, 3.8, 3.5),
        Some(panel_id),
    )));

    builder.lights.push(Arc::new(DirectionalLight::new(
        Spectrum::new(0.5),
        Vector3f::new(-1.0, -2.0, -1.0),
    )));

    if let Some(path) = options.envmap.as_ref() {
        info!("Loading environment map '{}'", path);
        let envmap = read_image(path)?;
        let light = EnvironmentLight::new(envmap, 1.0).map_err(|e| e.to_string())?;
        builder.lights.push(Arc::new(light));
    }

    builder.build(options.grid_cells)
}

/// Flat square of micrograins over a diffuse base, for measuring the lobe of
/// the layered material.
fn gonio_scene() -> Result<Scene, String> {
    let mut builder = SceneBuilder::new();

    let base = builder
        .brdfs
        .push(Lambertian::new(constant_spectrum(Spectrum::rgb(0.2, 0.3, 0.6))));
    let grains = Grains::Rough(RoughMicrofacet::new(
        ShapeInvariant::new(Micrograin::new(0.3), 0.5, 0.5),
        constant_spectrum(Spectrum::new(1.5)),
        constant_spectrum(Spectrum::new(0.0)),
    ));
    let layer = builder.brdfs.push(MicrograinLayer::new(grains, base));

    builder.add_shape(
        Arc::new(Rectangle::new(
            Point3f::zero(),
            Vector3f::new(0.0, 0.0, 2.0),
            Vector3f::new(2.0, 0.0, 0.0),
        )),
        Some(layer),
    );

    builder.build(DEFAULT_MAX_CELLS)
}
