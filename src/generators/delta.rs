//! Point-grid phantom built from small stamped blocks
//!
//! The first point is anchored at the pivot. Every further point `i` is
//! anchored at the previous anchor shifted by `(fx(i), fy(i))`, which allows
//! lines, grids and arbitrary walks from two step functions. Stamps that
//! leave the image are clipped, never rejected.

use ndarray::Array2;

use crate::generators::args::{Args, StepFn, constant_step, to_count, to_counts};
use crate::io::configuration::{DEFAULT_PIVOT, DEFAULT_SIZE_OF_POINT, MAX_POINTS};
use crate::io::error::{Result, invalid_parameter};
use crate::registry::image::ImageSize;

/// Parameters of the point-grid generator
#[derive(Clone)]
pub struct DeltaParams {
    /// Number of points to stamp
    pub num_of_points: usize,
    /// Extent of each stamped block, each >= 1
    pub size_of_point: [usize; 2],
    /// Offset from the previous anchor, called with the 1-based point index
    ///
    /// `None` steps diagonally by the point size plus one pixel.
    pub distance_of_points: Option<[StepFn; 2]>,
    /// Anchor of the first point (0-based, may lie outside the image)
    ///
    /// Pivots written 1-based, such as `(3, 3)` for the third row and
    /// column, are `[2, 2]` here.
    pub pivot: [i64; 2],
    /// Stamp an inscribed ellipse instead of a filled rectangle
    pub circular_shape: bool,
}

impl std::fmt::Debug for DeltaParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeltaParams")
            .field("num_of_points", &self.num_of_points)
            .field("size_of_point", &self.size_of_point)
            .field("pivot", &self.pivot)
            .field("circular_shape", &self.circular_shape)
            .finish_non_exhaustive()
    }
}

impl DeltaParams {
    /// Argument keys understood by [`Self::from_args`]
    pub const KEYS: [&'static str; 5] = [
        "num_of_points",
        "size_of_point",
        "distance_of_points",
        "pivot",
        "circular_shape",
    ];

    /// Points of the default size laid out diagonally with one pixel of gap
    pub const fn new(num_of_points: usize) -> Self {
        Self {
            num_of_points,
            size_of_point: DEFAULT_SIZE_OF_POINT,
            distance_of_points: None,
            pivot: DEFAULT_PIVOT,
            circular_shape: false,
        }
    }

    /// Replace the point size
    #[must_use]
    pub const fn with_size_of_point(mut self, size_of_point: [usize; 2]) -> Self {
        self.size_of_point = size_of_point;
        self
    }

    /// Replace the step functions
    #[must_use]
    pub fn with_distance_of_points(mut self, distance_of_points: [StepFn; 2]) -> Self {
        self.distance_of_points = Some(distance_of_points);
        self
    }

    /// Replace the anchor of the first point
    #[must_use]
    pub const fn with_pivot(mut self, pivot: [i64; 2]) -> Self {
        self.pivot = pivot;
        self
    }

    /// Toggle elliptical stamps
    #[must_use]
    pub const fn with_circular_shape(mut self, circular_shape: bool) -> Self {
        self.circular_shape = circular_shape;
        self
    }

    /// Build and validate parameters from keyword arguments
    ///
    /// `num_of_points` is required.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for unknown keys, wrongly typed values, a
    /// missing or negative `num_of_points`, or a point extent below 1
    pub fn from_args(args: &Args) -> Result<Self> {
        args.ensure_only(&Self::KEYS)?;

        let num_of_points = match args.int("num_of_points")? {
            Some(value) => to_count("num_of_points", value, 0)?,
            None => {
                return Err(invalid_parameter(
                    "num_of_points",
                    &"<missing>",
                    &"required argument",
                ));
            }
        };
        let size_of_point = match args.pair("size_of_point")? {
            Some(value) => to_counts("size_of_point", value, 1)?,
            None => DEFAULT_SIZE_OF_POINT,
        };
        Self {
            num_of_points,
            size_of_point,
            distance_of_points: args.steps("distance_of_points")?,
            pivot: args.pair("pivot")?.unwrap_or(DEFAULT_PIVOT),
            circular_shape: args.flag("circular_shape")?.unwrap_or(false),
        }
        .validate()
    }

    /// Check the invariants that the typed fields alone cannot express
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either point extent is zero or
    /// `num_of_points` exceeds [`MAX_POINTS`]
    pub fn validate(self) -> Result<Self> {
        if self.num_of_points > MAX_POINTS {
            return Err(invalid_parameter(
                "num_of_points",
                &self.num_of_points,
                &format!("must be <= {MAX_POINTS}"),
            ));
        }
        to_counts(
            "size_of_point",
            self.size_of_point.map(|extent| extent as i64),
            1,
        )?;
        Ok(self)
    }

    /// Top-left anchors of every point in stamping order
    pub fn anchors(&self) -> Vec<[i64; 2]> {
        let [fx, fy] = self
            .distance_of_points
            .clone()
            .unwrap_or_else(|| default_steps(self.size_of_point));
        let mut anchor = self.pivot;
        (1..=self.num_of_points.min(MAX_POINTS))
            .map(|index| {
                if index > 1 {
                    let [x, y] = anchor;
                    anchor = [x.saturating_add(fx(index)), y.saturating_add(fy(index))];
                }
                anchor
            })
            .collect()
    }
}

fn default_steps(size_of_point: [usize; 2]) -> [StepFn; 2] {
    size_of_point.map(|extent| constant_step(extent as i64 + 1))
}

// Half-open range of an axis covered by a stamp, clipped to `0..len`
fn clip(anchor: i64, extent: usize, len: usize) -> Option<(usize, usize)> {
    let end = anchor.saturating_add(extent as i64);
    let start = anchor.max(0);
    let end = end.min(len as i64);
    (start < end).then_some((start as usize, end as usize))
}

// Pixel `(i, j)` of a `width x height` block lies inside the inscribed ellipse
fn inside_ellipse(i: i64, j: i64, width: usize, height: usize) -> bool {
    let dx = (i as f64 + 0.5).mul_add(2.0 / width as f64, -1.0);
    let dy = (j as f64 + 0.5).mul_add(2.0 / height as f64, -1.0);
    dx.mul_add(dx, dy * dy) <= 1.0
}

/// Render a point-grid phantom
///
/// # Errors
///
/// Returns `InvalidParameter` if `size` or the parameters are invalid
///
/// # Examples
///
/// ```
/// use phantoms::generators::args::constant_step;
/// use phantoms::generators::delta::{DeltaParams, delta_image};
/// use phantoms::ImageSize;
///
/// let params = DeltaParams::new(2)
///     .with_size_of_point([3, 2])
///     .with_distance_of_points([constant_step(0), constant_step(4)])
///     .with_pivot([2, 2]);
/// let image = delta_image(ImageSize::new(8, 8), &params)?;
/// assert_eq!(image.sum(), 12.0);
/// # Ok::<(), phantoms::PhantomError>(())
/// ```
pub fn delta_image(size: ImageSize, params: &DeltaParams) -> Result<Array2<f64>> {
    let size = size.validate()?;
    let params = params.clone().validate()?;
    let [point_width, point_height] = params.size_of_point;

    let mut image = Array2::zeros(size.shape());
    for [ax, ay] in params.anchors() {
        let (Some((x0, x1)), Some((y0, y1))) = (
            clip(ax, point_width, size.width),
            clip(ay, point_height, size.height),
        ) else {
            continue;
        };

        for x in x0..x1 {
            for y in y0..y1 {
                let covered = !params.circular_shape
                    || inside_ellipse(x as i64 - ax, y as i64 - ay, point_width, point_height);
                if covered && let Some(value) = image.get_mut([x, y]) {
                    *value = 1.0;
                }
            }
        }
    }
    Ok(image)
}

/// Registry entry point: typed parameters from keyword arguments
///
/// # Errors
///
/// Returns `InvalidParameter` if `size` or `args` are invalid
pub fn generate(size: ImageSize, args: &Args) -> Result<Array2<f64>> {
    let params = DeltaParams::from_args(args)?;
    delta_image(size, &params)
}
