//! Core

#[macro_use]
extern crate log;

// Declared first so its test macros are visible to the modules below.
#[macro_use]
pub mod geometry;

// Re-export.
pub mod app;
pub mod camera;
pub mod image_io;
pub mod integrator;
pub mod interaction;
pub mod light;
pub mod light_distrib;
pub mod microfacet;
pub mod pbrt;
pub mod reflection;
pub mod rng;
pub mod sampling;
pub mod scene;
pub mod sensor;
pub mod spectrum;
pub mod texture;
