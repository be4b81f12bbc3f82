//! Synthetic and reference test images ("phantoms") for imaging-pipeline tests
//!
//! Images are requested by name. Names registered in the generator registry
//! are synthesized from their parameters; any other name is fetched from a
//! remote [`ImageSource`] and resampled to the requested size.

#![forbid(unsafe_code)]

/// Deterministic pattern generators and their parameters
pub mod generators;
/// Input/output operations, configuration and error handling
pub mod io;
/// Resampling used when rescaling reference images
pub mod math;
/// Generator registry, image types and request dispatch
pub mod registry;
/// Reference image sources and fetch-and-rescale
pub mod remote;

pub use generators::args::{ArgValue, Args, StepFn};
pub use io::error::{PhantomError, Result};
pub use math::interpolation::Interpolation;
pub use registry::{ImageSize, Resolver, TestImage, get_image, lookup, register};
pub use remote::{ImageSource, SourceError, set_remote_source};

#[cfg(test)]
#[path = "../tests/unit/mod.rs"]
mod unit;
