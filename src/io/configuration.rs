//! Built-in names, parameter defaults and safety limits

use crate::math::interpolation::Interpolation;

// Registered at first use of the global registry
/// Name of the built-in checkerboard generator
pub const CHECKER_IMAGE: &str = "checker_image";
/// Name of the built-in point-grid generator
pub const DELTA_IMAGE: &str = "delta_image";

// Safety limit to prevent excessive memory allocation
/// Maximum allowed extent along either image axis
pub const MAX_IMAGE_DIMENSION: usize = 10_000;
/// Maximum number of stamped points in a point-grid phantom
pub const MAX_POINTS: usize = 1_000_000;

// Checkerboard defaults
/// Number of cells along each axis when `checkers_count` is omitted
pub const DEFAULT_CHECKERS_COUNT: [usize; 2] = [4, 4];
/// Separator width along each axis when `stripe_width` is omitted
pub const DEFAULT_STRIPE_WIDTH: [usize; 2] = [1, 1];

// Point-grid defaults
/// Extent of a stamped point when `size_of_point` is omitted
pub const DEFAULT_SIZE_OF_POINT: [usize; 2] = [1, 1];
/// Anchor of the first point when `pivot` is omitted
pub const DEFAULT_PIVOT: [i64; 2] = [0, 0];

/// Resampling scheme used for remote images unless overridden
pub const DEFAULT_INTERPOLATION: Interpolation = Interpolation::Linear;

// CLI settings
/// Image width used by the CLI when none is given
pub const DEFAULT_CLI_WIDTH: usize = 64;
/// Image height used by the CLI when none is given
pub const DEFAULT_CLI_HEIGHT: usize = 64;
/// Directory the CLI writes into when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "phantoms";
/// Extension of exported phantoms
pub const OUTPUT_EXTENSION: &str = "png";
/// Threshold above which the CLI shows a progress bar
pub const PROGRESS_MIN_IMAGES: usize = 2;

/// File extensions probed by the directory source, in lookup order
pub const SOURCE_EXTENSIONS: [&str; 6] = ["png", "tif", "tiff", "jpg", "jpeg", "bmp"];
