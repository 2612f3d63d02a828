//! Image I/O
//!
//! OpenEXR holds linear radiance. Any other format the `image` crate can
//! encode is written as 8-bit sRGB.

use crate::pbrt::*;
use crate::spectrum::*;
use crate::texture::ImageTexture;
use exr::prelude::{read_first_rgba_layer_from_file, write_rgb_file};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;

/// Loads an image as a texture, row 0 at the top. EXR values are kept as
/// they are; 8-bit values are scaled to [0, 1] without decoding sRGB.
///
/// * `path` - Input file path.
pub fn read_image(path: &str) -> Result<ImageTexture<Spectrum>, String> {
    let rows = match extension(path).as_deref() {
        Some("exr") => read_exr(path)?,
        Some(_) => read_8_bit(path)?,
        None => return Err(format!("No file extension in '{path}'")),
    };

    let (width, height) = (rows.first().map_or(0, Vec::len), rows.len());
    info!("Read image {path} ({width}x{height})");
    let pixels = rows.into_iter().flatten().collect();
    ImageTexture::new(width, height, pixels).map_err(|e| e.to_string())
}

fn read_exr(path: &str) -> Result<Vec<Vec<Spectrum>>, String> {
    let image = read_first_rgba_layer_from_file(
        path,
        |resolution, _| vec![vec![Spectrum::default(); resolution.width()]; resolution.height()],
        |rows: &mut Vec<Vec<Spectrum>>, position, (r, g, b, _a): (f32, f32, f32, f32)| {
            rows[position.y()][position.x()] = Spectrum::rgb(r, g, b);
        },
    )
    .map_err(|e| format!("Error reading '{path}': {e}"))?;
    Ok(image.layer_data.channel_data.pixels)
}

fn read_8_bit(path: &str) -> Result<Vec<Vec<Spectrum>>, String> {
    let img = image::open(path)
        .map_err(|e| format!("Error reading '{path}': {e}"))?
        .into_rgb8();
    let channel = |v: u8| v as Float / 255.0;
    Ok(img
        .rows()
        .map(|row| row.map(|p| Spectrum::rgb(channel(p[0]), channel(p[1]), channel(p[2]))).collect())
        .collect())
}

/// Writes interleaved linear RGB data, row 0 at the top. The format follows
/// the file extension.
///
/// * `path`   - Output file path.
/// * `rgb`    - Interleaved RGB values.
/// * `width`  - Width in pixels.
/// * `height` - Height in pixels.
pub fn write_image(path: &str, rgb: &[Float], width: usize, height: usize) -> Result<(), String> {
    if rgb.len() != 3 * width * height {
        return Err(format!(
            "Image data has {} values; {width}x{height} RGB needs {}",
            rgb.len(),
            3 * width * height
        ));
    }
    let texel = |x: usize, y: usize| {
        let i = 3 * (y * width + x);
        (rgb[i], rgb[i + 1], rgb[i + 2])
    };

    info!("Writing image {path} ({width}x{height})");
    match extension(path).as_deref() {
        Some("exr") => {
            write_rgb_file(path, width, height, texel).map_err(|e| format!("Error saving '{path}': {e}"))
        }
        Some(ext) => {
            let format =
                ImageFormat::from_extension(ext).ok_or_else(|| format!("Extension {ext} is not supported"))?;
            let byte = |v: Float| clamp(255.0 * gamma_correct(v) + 0.5, 0.0, 255.0) as u8;
            let img = RgbImage::from_fn(width as u32, height as u32, |x, y| {
                let (r, g, b) = texel(x as usize, y as usize);
                Rgb([byte(r), byte(g), byte(b)])
            });
            img.save_with_format(path, format)
                .map_err(|e| format!("Error saving '{path}': {e}"))
        }
        None => Err(format!("No file extension in '{path}'")),
    }
}

/// Lower case extension of a file path.
fn extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Applies the sRGB transfer curve to a linear value.
///
/// * `value` - Linear value.
#[inline]
pub fn gamma_correct(value: Float) -> Float {
    if value <= 0.0031308 {
        12.92 * value
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
