//! Separable resampling of 2-D arrays to a new resolution
//!
//! Both schemes compute every output pixel as a convex combination of source
//! pixels, so the output never leaves the source value range. Sample
//! positions are aligned on pixel centres and clamped at the edges.

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;

use crate::io::error::{PhantomError, Result, invalid_parameter};
use crate::registry::image::ImageSize;

/// Resampling scheme for rescaling remote images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Pick the source pixel containing the target pixel centre
    Nearest,
    /// Bilinear blend of the four surrounding source pixel centres
    #[default]
    Linear,
}

impl Interpolation {
    /// Lowercase name accepted by [`FromStr`]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Linear => "linear",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interpolation {
    type Err = PhantomError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "linear" | "bilinear" => Ok(Self::Linear),
            _ => Err(invalid_parameter(
                "interpolation",
                &s,
                &"expected 'nearest' or 'linear'",
            )),
        }
    }
}

/// Source taps contributing to one output coordinate along an axis
#[derive(Debug, Clone, Copy)]
struct AxisSample {
    lower: usize,
    upper: usize,
    weight: f64,
}

// Maps every output coordinate to its source taps; `source_len` must be >= 1
fn axis_samples(source_len: usize, target_len: usize, scheme: Interpolation) -> Vec<AxisSample> {
    let last = source_len.saturating_sub(1);
    let scale = source_len as f64 / target_len as f64;

    (0..target_len)
        .map(|target| {
            let centre = (target as f64 + 0.5) * scale;
            match scheme {
                Interpolation::Nearest => {
                    let index = (centre.floor() as usize).min(last);
                    AxisSample {
                        lower: index,
                        upper: index,
                        weight: 0.0,
                    }
                }
                Interpolation::Linear => {
                    let position = (centre - 0.5).clamp(0.0, last as f64);
                    let lower = (position.floor() as usize).min(last);
                    let upper = (lower + 1).min(last);
                    AxisSample {
                        lower,
                        upper,
                        weight: position - lower as f64,
                    }
                }
            }
        })
        .collect()
}

// Clamped so rounding can never step outside [a, b]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    t.mul_add(b - a, a).clamp(a.min(b), a.max(b))
}

/// Resample `pixels` to exactly `target` using the given scheme
///
/// The first array axis maps to the target width and the second to the
/// target height. Equal source and target shapes return an identical copy.
///
/// # Errors
///
/// Returns an error if the source array is empty along either axis
pub fn rescale(pixels: &Array2<f64>, target: ImageSize, scheme: Interpolation) -> Result<Array2<f64>> {
    let (source_width, source_height) = pixels.dim();
    if source_width == 0 || source_height == 0 {
        return Err(invalid_parameter(
            "pixels",
            &format!("{source_width}x{source_height}"),
            &"cannot rescale an empty array",
        ));
    }

    if pixels.dim() == target.shape() {
        return Ok(pixels.clone());
    }

    let xs = axis_samples(source_width, target.width, scheme);
    let ys = axis_samples(source_height, target.height, scheme);
    let at = |x: usize, y: usize| pixels.get([x, y]).copied().unwrap_or(0.0);

    Ok(Array2::from_shape_fn(target.shape(), |(x, y)| {
        let (Some(sx), Some(sy)) = (xs.get(x), ys.get(y)) else {
            return 0.0;
        };
        let low = lerp(at(sx.lower, sy.lower), at(sx.upper, sy.lower), sx.weight);
        let high = lerp(at(sx.lower, sy.upper), at(sx.upper, sy.upper), sx.weight);
        lerp(low, high, sy.weight)
    }))
}
