//! Application related stuff

use crate::light_distrib::{LightSampleStrategy, DEFAULT_MAX_CELLS};
use crate::pbrt::Float;
use clap::{Parser, ValueEnum};

/// Transport algorithm used to render.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum IntegratorKind {
    /// Direct lighting.
    Direct,

    /// Path tracing with light sampling.
    Path,

    /// Path tracing with BRDF sampling only.
    Brdf,

    /// Ambient occlusion.
    Ao,

    /// BRDF lobe capture with a goniometric camera.
    Gonio,
}

/// Light selection strategy on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LightStrategyArg {
    /// Proportional to emitted power.
    Power,

    /// Power over squared distance on a grid.
    Spatial,
}

impl From<LightStrategyArg> for LightSampleStrategy {
    fn from(arg: LightStrategyArg) -> Self {
        match arg {
            LightStrategyArg::Power => Self::Power,
            LightStrategyArg::Spatial => Self::Spatial,
        }
    }
}

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Options {
    /// Number of threads to use for rendering.
    #[clap(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        help = "Use specified number of threads for rendering."
    )]
    n_threads: usize,

    /// Number of progressive passes.
    #[clap(long, short = 'n', value_name = "NUM", default_value_t = 16, help = "Number of passes to render.")]
    pub passes: usize,

    /// Image width.
    #[clap(long, value_name = "PIXELS", default_value_t = 256, help = "Image width in pixels.")]
    pub width: usize,

    /// Image height.
    #[clap(long, value_name = "PIXELS", default_value_t = 256, help = "Image height in pixels.")]
    pub height: usize,

    /// Integrator.
    #[clap(long, short = 'i', value_enum, default_value_t = IntegratorKind::Path, help = "Integrator to render with.")]
    pub integrator: IntegratorKind,

    /// Maximum path depth.
    #[clap(long = "maxdepth", value_name = "NUM", default_value_t = 10, help = "Maximum path depth.")]
    pub max_depth: usize,

    /// Sum every light in the direct lighting integrator.
    #[clap(long = "all-lights", help = "Sample every light at each hit with the direct integrator.")]
    pub sample_all_lights: bool,

    /// Light selection strategy for the path integrator.
    #[clap(long = "light-strategy", value_enum, default_value_t = LightStrategyArg::Spatial, help = "Light selection strategy.")]
    pub light_strategy: LightStrategyArg,

    /// Cell budget of the spatial light strategy.
    #[clap(long = "grid-cells", value_name = "NUM", default_value_t = DEFAULT_MAX_CELLS, help = "Cell budget of the spatial light grid.")]
    pub grid_cells: usize,

    /// Environment map.
    #[clap(long = "envmap", short = 'e', value_name = "FILE", help = "Light the scene with an environment map.")]
    pub envmap: Option<String>,

    /// Incident zenith angle of the goniometric camera.
    #[clap(long = "gonio-theta", value_name = "DEGREES", default_value_t = 45.0, help = "Incident zenith angle for the gonio integrator.")]
    pub gonio_theta: Float,

    /// Incident azimuth angle of the goniometric camera.
    #[clap(long = "gonio-phi", value_name = "DEGREES", default_value_t = 0.0, help = "Incident azimuth angle for the gonio integrator.")]
    pub gonio_phi: Float,

    /// Path to the image file.
    #[clap(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        default_value = "render.exr",
        help = "Write the final image to the given filename."
    )]
    pub image_file: String,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => {
                warn!("Invalid nthreads");
                1
            }
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::parse_from(["lumen-render"]);
        assert_eq!(options.threads(), 1);
        assert_eq!(options.integrator, IntegratorKind::Path);
        assert_eq!(options.grid_cells, 4096);
        assert_eq!(options.image_file, "render.exr");
    }

    #[test]
    fn threads_are_clamped() {
        let options = Options::parse_from(["lumen-render", "-t", "0"]);
        assert_eq!(options.threads(), 1);
        let options = Options::parse_from(["lumen-render", "-t", "100000"]);
        assert_eq!(options.threads(), num_cpus::get());
    }

    #[test]
    fn parses_integrator_and_strategy() {
        let options = Options::parse_from(["lumen-render", "-i", "gonio", "--light-strategy", "power"]);
        assert_eq!(options.integrator, IntegratorKind::Gonio);
        assert_eq!(LightSampleStrategy::from(options.light_strategy), LightSampleStrategy::Power);
        assert_eq!(options.gonio_theta, 45.0);

        let options = Options::parse_from(["lumen-render", "--gonio-theta", "60", "--gonio-phi", "90"]);
        assert_eq!((options.gonio_theta, options.gonio_phi), (60.0, 90.0));
    }
}
