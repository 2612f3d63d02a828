//! Lights

#[macro_use]
extern crate log;

mod directional;
mod environment;
mod rectangle;
mod sphere;

// Re-export.
pub use directional::*;
pub use environment::*;
pub use rectangle::*;
pub use sphere::*;
