//! Conversion between pixel arrays and image files
//!
//! Arrays are indexed `[[x, y]]`, matching image pixel `(x, y)`.

use std::path::Path;

use image::{GrayImage, ImageBuffer, Luma};
use ndarray::Array2;

use crate::io::error::{PhantomError, Result};
use crate::registry::image::TestImage;

/// Decode an image file into luma values in `[0, 1]`
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_luma(path: &Path) -> Result<Array2<f64>> {
    let decoded = image::open(path).map_err(|e| PhantomError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let luma: ImageBuffer<Luma<f32>, Vec<f32>> = decoded.to_luma32f();
    Ok(luma_to_array(&luma))
}

/// Copy a float luma buffer into an array of shape `(width, height)`
pub fn luma_to_array(luma: &ImageBuffer<Luma<f32>, Vec<f32>>) -> Array2<f64> {
    let (width, height) = luma.dimensions();
    Array2::from_shape_fn((width as usize, height as usize), |(x, y)| {
        luma.get_pixel_checked(x as u32, y as u32)
            .map_or(0.0, |pixel| f64::from(pixel.0[0]))
    })
}

/// Render an image to 8-bit grayscale, scaled so its maximum maps to 255
///
/// An all-zero image renders black.
pub fn to_gray_image(image: &TestImage) -> GrayImage {
    let size = image.size();
    let max = image.max_value();
    let scale = if max > 0.0 { 255.0 / max } else { 0.0 };

    GrayImage::from_fn(size.width as u32, size.height as u32, |x, y| {
        let value = image
            .pixels()
            .get([x as usize, y as usize])
            .copied()
            .unwrap_or(0.0);
        Luma([(value * scale).round().clamp(0.0, 255.0) as u8])
    })
}

/// Write an image as an 8-bit grayscale PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or saved to the specified path
pub fn export_png(image: &TestImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| PhantomError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    to_gray_image(image)
        .save(output_path)
        .map_err(|e| PhantomError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
