//! Small scenes shared by the integrator tests.

use cameras::*;
use lights::*;
use lumen::geometry::*;
use lumen::integrator::*;
use lumen::light::*;
use lumen::light_distrib::*;
use lumen::pbrt::*;
use lumen::reflection::*;
use lumen::rng::*;
use lumen::scene::*;
use lumen::spectrum::*;
use lumen::texture::*;
use shapes::*;
use std::sync::Arc;

fn diffuse(albedo: Spectrum) -> Lambertian {
    Lambertian::new(constant_spectrum(albedo))
}

fn build(shapes: Vec<(ArcShape, Option<BrdfId>)>, brdfs: BrdfArena, lights: Vec<ArcLight>) -> Scene {
    let mut list = ShapeList::new();
    let mut materials = vec![];
    for (shape, material) in shapes {
        list.push(shape);
        materials.push(material);
    }
    Scene::new(Arc::new(list), materials, brdfs, lights, DEFAULT_MAX_CELLS).unwrap()
}

/// Unit sphere with albedo (0.2, 0.5, 0.8) lit by a unit directional light
/// travelling along -x.
pub fn lit_sphere() -> Scene {
    let mut brdfs = BrdfArena::new();
    let id = brdfs.push(diffuse(Spectrum::rgb(0.2, 0.5, 0.8)));
    let light = DirectionalLight::new(Spectrum::new(1.0), Vector3f::new(-1.0, 0.0, 0.0));
    build(vec![(Arc::new(Sphere::default()), Some(id))], brdfs, vec![Arc::new(light)])
}

/// Camera at (5, 0, 0) looking at the origin.
pub fn sphere_camera() -> PerspectiveCamera {
    PerspectiveCamera::new(Point3f::new(5.0, 0.0, 0.0), Point3f::zero(), 40.0, 1.0)
}

/// Unit grey sphere under a constant white environment.
pub fn furnace_sphere(albedo: Float) -> Scene {
    let mut brdfs = BrdfArena::new();
    let id = brdfs.push(diffuse(Spectrum::new(albedo)));
    let envmap = ImageTexture::new(64, 32, vec![Spectrum::new(1.0); 64 * 32]).unwrap();
    let light = EnvironmentLight::new(envmap, 1.0).unwrap();
    build(vec![(Arc::new(Sphere::default()), Some(id))], brdfs, vec![Arc::new(light)])
}

/// Unit emissive sphere without light sources.
pub fn glowing_sphere(emission: Spectrum) -> Scene {
    let mut brdfs = BrdfArena::new();
    let id = brdfs.push(Emissive::new(emission));
    build(vec![(Arc::new(Sphere::default()), Some(id))], brdfs, vec![])
}

/// `lit_sphere()` behind a material-less square at x = 3, lit along (-1, -1, 0).
pub fn veiled_sphere() -> Scene {
    let mut brdfs = BrdfArena::new();
    let id = brdfs.push(diffuse(Spectrum::rgb(0.2, 0.5, 0.8)));
    let veil = Rectangle::new(
        Point3f::new(3.0, 0.6, 0.0),
        Vector3f::new(0.0, 0.5, 0.0),
        Vector3f::new(0.0, 0.0, 0.5),
    );
    let light = DirectionalLight::new(Spectrum::new(1.0), Vector3f::new(-1.0, -1.0, 0.0));
    build(
        vec![(Arc::new(Sphere::default()), Some(id)), (Arc::new(veil), None)],
        brdfs,
        vec![Arc::new(light)],
    )
}

/// Two large parallel squares 0.01 apart at y = 0 and y = 0.01.
pub fn narrow_gap() -> Scene {
    let mut brdfs = BrdfArena::new();
    let id = brdfs.push(diffuse(Spectrum::new(0.5)));
    let floor = Rectangle::new(
        Point3f::zero(),
        Vector3f::new(1000.0, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, -1000.0),
    );
    let ceiling = Rectangle::new(
        Point3f::new(0.0, 0.01, 0.0),
        Vector3f::new(1000.0, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, 1000.0),
    );
    build(
        vec![(Arc::new(floor), Some(id)), (Arc::new(ceiling), Some(id))],
        brdfs,
        vec![],
    )
}

/// A 4x4 diffuse square facing +y at the origin.
pub fn gonio_floor(albedo: Float) -> Scene {
    let mut brdfs = BrdfArena::new();
    let id = brdfs.push(diffuse(Spectrum::new(albedo)));
    let floor = Rectangle::new(
        Point3f::zero(),
        Vector3f::new(2.0, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, -2.0),
    );
    build(vec![(Arc::new(floor), Some(id))], brdfs, vec![])
}

/// A large diffuse floor (albedo 0.5) at y = 0 lit by a bright sphere light
/// straight above the origin and a dim one off to the side. Both have radius
/// 0.2; the bright one emits 50 at (0, 4, 0) and the dim one 2 at (4, 3, 0).
pub fn two_sphere_lights() -> Scene {
    let mut brdfs = BrdfArena::new();
    let floor_id = brdfs.push(diffuse(Spectrum::new(0.5)));
    let floor = Rectangle::new(
        Point3f::zero(),
        Vector3f::new(10.0, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, -10.0),
    );

    let mut shapes: Vec<(ArcShape, Option<BrdfId>)> = vec![(Arc::new(floor), Some(floor_id))];
    let mut lights: Vec<ArcLight> = vec![];
    for (center, emission) in [(Point3f::new(0.0, 4.0, 0.0), 50.0), (Point3f::new(4.0, 3.0, 0.0), 2.0)] {
        let sphere = Sphere::new(center, 0.2);
        let id = brdfs.push(Emissive::new(Spectrum::new(emission)));
        lights.push(Arc::new(SphereLight::new(sphere, Spectrum::new(emission), Some(shapes.len()))));
        shapes.push((Arc::new(sphere), Some(id)));
    }
    build(shapes, brdfs, lights)
}

/// Returns the mean of `n` radiance estimates along one ray.
pub fn mean_radiance(integrator: &dyn Integrator, scene: &Scene, ray: &Ray, n: usize) -> Spectrum {
    let mut sampler = Sampler::new(42);
    let mut sum = Spectrum::default();
    for _ in 0..n {
        sum += integrator.li(ray, scene, &mut sampler);
    }
    sum / n as Float
}
