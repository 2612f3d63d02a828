//! Sensor

use crate::pbrt::*;
use crate::spectrum::*;

/// Image resolution and the mapping from pixels to normalized image plane
/// coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Width in pixels.
    pub width: usize,

    /// Height in pixels.
    pub height: usize,
}

impl Resolution {
    /// Returns a new `Resolution`.
    ///
    /// * `width`  - Width in pixels.
    /// * `height` - Height in pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Returns the left edge of a pixel column in [-1, 1].
    ///
    /// * `x` - Column.
    pub fn u(&self, x: usize) -> Float {
        2.0 * x as Float / self.width as Float - 1.0
    }

    /// Returns the bottom edge of a pixel row in [-1, 1]. Row 0 is the top
    /// of the image.
    ///
    /// * `y` - Row.
    pub fn v(&self, y: usize) -> Float {
        1.0 - 2.0 * (y + 1) as Float / self.height as Float
    }

    /// Returns the number of pixels.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// Samples produced by rendering one block, merged into a `Sensor` by the
/// thread driving the pass.
#[derive(Clone, Debug, Default)]
pub struct SensorBlock {
    /// Pixel coordinates and sample values.
    pub samples: Vec<(usize, usize, Spectrum)>,
}

impl SensorBlock {
    /// Returns an empty block with room for `n` samples.
    ///
    /// * `n` - Expected number of samples.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            samples: Vec::with_capacity(n),
        }
    }

    /// Records a sample.
    ///
    /// * `x`     - Column.
    /// * `y`     - Row.
    /// * `value` - Sample value.
    pub fn add(&mut self, x: usize, y: usize, value: Spectrum) {
        self.samples.push((x, y, value));
    }
}

/// Running mean pixel accumulator.
#[derive(Clone, Debug)]
pub struct Sensor {
    /// Resolution.
    pub resolution: Resolution,

    /// Mean value per pixel.
    value: Vec<Spectrum>,

    /// Number of samples per pixel.
    samples: Vec<u32>,

    /// Total number of samples since the last reset.
    sample_count: u64,
}

impl Sensor {
    /// Returns a new black sensor.
    ///
    /// * `width`  - Width in pixels.
    /// * `height` - Height in pixels.
    pub fn new(width: usize, height: usize) -> Self {
        let resolution = Resolution::new(width, height);
        Self {
            resolution,
            value: vec![Spectrum::default(); resolution.area()],
            samples: vec![0; resolution.area()],
            sample_count: 0,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.resolution.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.resolution.height
    }

    /// Clears all accumulated samples.
    pub fn reset(&mut self) {
        self.value.iter_mut().for_each(|v| *v = Spectrum::default());
        self.samples.iter_mut().for_each(|n| *n = 0);
        self.sample_count = 0;
    }

    /// Folds a sample into the running mean of a pixel.
    ///
    /// * `x`     - Column.
    /// * `y`     - Row.
    /// * `value` - Sample value.
    pub fn add(&mut self, x: usize, y: usize, value: Spectrum) {
        debug_assert!(x < self.width() && y < self.height());
        let i = y * self.width() + x;
        self.samples[i] += 1;
        let mean = self.value[i];
        self.value[i] += (value - mean) / self.samples[i] as Float;
        self.sample_count += 1;
    }

    /// Folds all samples of a rendered block into the sensor.
    ///
    /// * `block` - The block.
    pub fn merge_block(&mut self, block: SensorBlock) {
        for (x, y, value) in block.samples {
            self.add(x, y, value);
        }
    }

    /// Returns the mean value of a pixel.
    ///
    /// * `x` - Column.
    /// * `y` - Row.
    pub fn value(&self, x: usize, y: usize) -> Spectrum {
        self.value[y * self.width() + x]
    }

    /// Returns the number of samples accumulated in a pixel.
    ///
    /// * `x` - Column.
    /// * `y` - Row.
    pub fn pixel_samples(&self, x: usize, y: usize) -> u32 {
        self.samples[y * self.width() + x]
    }

    /// Returns the total number of samples since the last reset.
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Returns the mean values as interleaved RGB, row 0 first.
    pub fn to_rgb_buffer(&self) -> Vec<Float> {
        self.value.iter().flat_map(|v| v.to_rgb()).collect()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
