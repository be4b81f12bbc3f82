//! Checkerboard phantom: a grid of filled cells separated by background stripes
//!
//! Each axis is laid out as `stripe, cell, stripe, cell, ..., cell, stripe`
//! followed by whatever remainder the integer division leaves. Segments
//! alternate between separator and cell; a pixel is foreground exactly when
//! it falls in a cell segment on both axes. The layout is best effort: sizes
//! that do not divide evenly shrink the cells and push the remainder to the
//! trailing edge instead of failing.

use ndarray::Array2;

use crate::generators::args::{Args, to_counts};
use crate::io::configuration::{DEFAULT_CHECKERS_COUNT, DEFAULT_STRIPE_WIDTH};
use crate::io::error::Result;
use crate::registry::image::ImageSize;

/// Parameters of the checkerboard generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerParams {
    /// Number of cells along each axis, each >= 1
    pub checkers_count: [usize; 2],
    /// Background separator width along each axis
    pub stripe_width: [usize; 2],
}

impl Default for CheckerParams {
    fn default() -> Self {
        Self {
            checkers_count: DEFAULT_CHECKERS_COUNT,
            stripe_width: DEFAULT_STRIPE_WIDTH,
        }
    }
}

impl CheckerParams {
    /// Argument keys understood by [`Self::from_args`]
    pub const KEYS: [&'static str; 2] = ["checkers_count", "stripe_width"];

    /// Create parameters with the default stripe width
    pub const fn new(checkers_count: [usize; 2]) -> Self {
        Self {
            checkers_count,
            stripe_width: DEFAULT_STRIPE_WIDTH,
        }
    }

    /// Replace the stripe width
    #[must_use]
    pub const fn with_stripe_width(mut self, stripe_width: [usize; 2]) -> Self {
        self.stripe_width = stripe_width;
        self
    }

    /// Build and validate parameters from keyword arguments
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for unknown keys, wrongly typed values,
    /// a cell count below 1 or a negative stripe width
    pub fn from_args(args: &Args) -> Result<Self> {
        args.ensure_only(&Self::KEYS)?;
        let defaults = Self::default();

        let checkers_count = match args.pair("checkers_count")? {
            Some(value) => to_counts("checkers_count", value, 1)?,
            None => defaults.checkers_count,
        };
        let stripe_width = match args.pair("stripe_width")? {
            Some(value) => to_counts("stripe_width", value, 0)?,
            None => defaults.stripe_width,
        };

        Self {
            checkers_count,
            stripe_width,
        }
        .validate()
    }

    /// Check the invariants that the typed fields alone cannot express
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either cell count is zero
    pub fn validate(self) -> Result<Self> {
        to_counts(
            "checkers_count",
            self.checkers_count.map(|count| count as i64),
            1,
        )?;
        Ok(self)
    }
}

/// One axis of the checkerboard layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AxisLayout {
    pub(crate) stripe: usize,
    pub(crate) cell: usize,
    pub(crate) count: usize,
}

impl AxisLayout {
    pub(crate) const fn new(len: usize, count: usize, stripe: usize) -> Self {
        let separators = stripe.saturating_mul(count.saturating_add(1));
        let cell = if count == 0 {
            0
        } else {
            len.saturating_sub(separators) / count
        };
        Self {
            stripe,
            cell,
            count,
        }
    }

    // Stripe-first alternation: odd segments are cells, even ones separators
    pub(crate) const fn is_cell(self, position: usize) -> bool {
        if self.cell == 0 {
            return false;
        }
        let period = self.stripe + self.cell;
        if position < self.stripe {
            return false;
        }
        let offset = position - self.stripe;
        offset / period < self.count && offset % period < self.cell
    }
}

/// Render a checkerboard phantom
///
/// # Errors
///
/// Returns `InvalidParameter` if `size` or the parameters are invalid
///
/// # Examples
///
/// ```
/// use phantoms::generators::checker::{CheckerParams, checker_image};
/// use phantoms::ImageSize;
///
/// let params = CheckerParams::new([2, 3]).with_stripe_width([2, 1]);
/// let image = checker_image(ImageSize::new(8, 8), &params)?;
/// assert_eq!(image.sum(), 6.0);
/// # Ok::<(), phantoms::PhantomError>(())
/// ```
pub fn checker_image(size: ImageSize, params: &CheckerParams) -> Result<Array2<f64>> {
    let size = size.validate()?;
    let params = params.validate()?;

    let rows = AxisLayout::new(size.width, params.checkers_count[0], params.stripe_width[0]);
    let cols = AxisLayout::new(size.height, params.checkers_count[1], params.stripe_width[1]);

    Ok(Array2::from_shape_fn(size.shape(), |(x, y)| {
        if rows.is_cell(x) && cols.is_cell(y) {
            1.0
        } else {
            0.0
        }
    }))
}

/// Registry entry point: typed parameters from keyword arguments
///
/// # Errors
///
/// Returns `InvalidParameter` if `size` or `args` are invalid
pub fn generate(size: ImageSize, args: &Args) -> Result<Array2<f64>> {
    let params = CheckerParams::from_args(args)?;
    checker_image(size, &params)
}
