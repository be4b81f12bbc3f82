//! Mathematical utilities for resampling

/// Nearest and bilinear resampling used when rescaling remote images
pub mod interpolation;
