//! Retrieve a reference image and resample it to the requested size

use log::{debug, info};
use ndarray::Array2;

use crate::generators::args::Args;
use crate::io::configuration::DEFAULT_INTERPOLATION;
use crate::io::error::{PhantomError, Result, retrieval_failure};
use crate::math::interpolation::{Interpolation, rescale};
use crate::registry::image::ImageSize;
use crate::remote::source::{ImageSource, SourceError};

/// Parameters of the remote path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RescaleParams {
    /// Scheme used to resample the source to the target size
    pub interpolation: Interpolation,
}

impl RescaleParams {
    /// Argument keys understood by [`Self::from_args`]
    pub const KEYS: [&'static str; 1] = ["interpolation"];

    /// Build parameters, using `fallback` when no interpolation is given
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for unknown keys or an unrecognised scheme
    pub fn from_args(args: &Args, fallback: Interpolation) -> Result<Self> {
        args.ensure_only(&Self::KEYS)?;
        let interpolation = match args.text("interpolation")? {
            Some(scheme) => scheme.parse()?,
            None => fallback,
        };
        Ok(Self { interpolation })
    }
}

// Source data must be usable as a phantom before it is resampled
fn check_source(source_id: &str, pixels: &Array2<f64>) -> Result<()> {
    let (width, height) = pixels.dim();
    if width == 0 || height == 0 {
        return Err(retrieval_failure(
            source_id,
            &format!("source returned an empty {width}x{height} array"),
        ));
    }
    if let Some(bad) = pixels.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(retrieval_failure(
            source_id,
            &format!("source returned invalid pixel value {bad}"),
        ));
    }
    Ok(())
}

/// Fetch `source_id` from `source` and resample it to `target`
///
/// The interpolation scheme comes from `args`, defaulting to
/// [`DEFAULT_INTERPOLATION`]. The result has exactly the target shape and
/// stays within the source value range.
///
/// # Errors
///
/// Returns:
/// - `InvalidParameter` if `target` or `args` are invalid
/// - `UnknownImage` if the source has no image under `source_id`
/// - `RetrievalFailure` if the source fails or returns unusable data
pub fn fetch_and_scale(
    source: &dyn ImageSource,
    source_id: &str,
    target: ImageSize,
    args: &Args,
) -> Result<Array2<f64>> {
    fetch_and_scale_with(source, source_id, target, args, DEFAULT_INTERPOLATION)
}

/// [`fetch_and_scale`] with an explicit fallback interpolation scheme
///
/// # Errors
///
/// Same as [`fetch_and_scale`]
pub fn fetch_and_scale_with(
    source: &dyn ImageSource,
    source_id: &str,
    target: ImageSize,
    args: &Args,
    fallback: Interpolation,
) -> Result<Array2<f64>> {
    let target = target.validate()?;
    let params = RescaleParams::from_args(args, fallback)?;

    info!("Fetching '{source_id}' from remote source");
    let pixels = source.retrieve(source_id).map_err(|error| match error {
        SourceError::NotFound => PhantomError::UnknownImage {
            name: source_id.to_string(),
        },
        SourceError::Unavailable { reason } => retrieval_failure(source_id, &reason),
    })?;
    check_source(source_id, &pixels)?;

    let (width, height) = pixels.dim();
    debug!(
        "Rescaling '{source_id}' from {width}x{height} to {target} ({})",
        params.interpolation
    );
    rescale(&pixels, target, params.interpolation)
}
