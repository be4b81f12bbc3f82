//! Image size and the immutable test image handed back to callers

use std::fmt;

use ndarray::Array2;

use crate::io::configuration::MAX_IMAGE_DIMENSION;
use crate::io::error::{Result, invalid_parameter};

/// Requested extent of a phantom
///
/// An image of size `(width, height)` is an array of shape
/// `(width, height)` indexed as `[[x, y]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Extent along the first array axis
    pub width: usize,
    /// Extent along the second array axis
    pub height: usize,
}

impl ImageSize {
    /// Create a size without validating it
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Array shape matching this size
    pub const fn shape(self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Check both extents are in `1..=MAX_IMAGE_DIMENSION`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming `size` if either extent is zero
    /// or exceeds the dimension limit
    pub fn validate(self) -> Result<Self> {
        for extent in [self.width, self.height] {
            if extent == 0 {
                return Err(invalid_parameter("size", &self, &"extents must be >= 1"));
            }
            if extent > MAX_IMAGE_DIMENSION {
                return Err(invalid_parameter(
                    "size",
                    &self,
                    &format!("extents must be <= {MAX_IMAGE_DIMENSION}"),
                ));
            }
        }
        Ok(self)
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(usize, usize)> for ImageSize {
    fn from((width, height): (usize, usize)) -> Self {
        Self::new(width, height)
    }
}

/// A generated or rescaled phantom tagged with the name it was requested by
///
/// The pixel array is owned by this value; every request produces a fresh
/// array.
#[derive(Debug, Clone, PartialEq)]
pub struct TestImage {
    name: String,
    pixels: Array2<f64>,
    size: ImageSize,
}

impl TestImage {
    pub(crate) const fn new(name: String, pixels: Array2<f64>, size: ImageSize) -> Self {
        Self { name, pixels, size }
    }

    /// Name the image was requested by
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pixel values, shape equal to [`Self::size`]
    pub const fn pixels(&self) -> &Array2<f64> {
        &self.pixels
    }

    /// Extent of the image
    pub const fn size(&self) -> ImageSize {
        self.size
    }

    /// Largest pixel value, 0.0 for an all-zero image
    pub fn max_value(&self) -> f64 {
        self.pixels.iter().copied().fold(0.0, f64::max)
    }

    /// Take ownership of the pixel array
    pub fn into_pixels(self) -> Array2<f64> {
        self.pixels
    }
}
