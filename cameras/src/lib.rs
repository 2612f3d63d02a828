//! Camera

#[macro_use]
extern crate log;

mod gonio_camera;
mod perspective_camera;

// Re-export
pub use gonio_camera::*;
pub use perspective_camera::*;
