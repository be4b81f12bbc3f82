//! Dispatch of an image request to a generator or a remote source
//!
//! Precedence is fixed: a registered generator always wins, even when a
//! remote source also knows the name. Only names without a generator are
//! passed to the source, and a name neither side knows is an
//! `UnknownImage` error. No state is kept between requests.

use std::sync::Arc;

use log::debug;
use ndarray::Array2;

use crate::generators::args::Args;
use crate::io::configuration::DEFAULT_INTERPOLATION;
use crate::io::error::{PhantomError, Result, WithImage};
use crate::math::interpolation::Interpolation;
use crate::registry::image::{ImageSize, TestImage};
use crate::registry::store::{GeneratorRegistry, global_registry};
use crate::remote::fetch::fetch_and_scale_with;
use crate::remote::source::{ImageSource, remote_source};

/// Resolves image names against a registry and an optional remote source
#[derive(Clone)]
pub struct Resolver<'r> {
    registry: &'r GeneratorRegistry,
    source: Option<Arc<dyn ImageSource>>,
    interpolation: Interpolation,
}

impl std::fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("registry", self.registry)
            .field("has_source", &self.source.is_some())
            .field("interpolation", &self.interpolation)
            .finish()
    }
}

impl<'r> Resolver<'r> {
    /// Resolver over `registry` without a remote source
    pub const fn new(registry: &'r GeneratorRegistry) -> Self {
        Self {
            registry,
            source: None,
            interpolation: DEFAULT_INTERPOLATION,
        }
    }

    /// Use `source` for names without a registered generator
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn ImageSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Interpolation used for remote images when the request names none
    #[must_use]
    pub const fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Produce the image called `name` at `size`
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `InvalidParameter` if `size` or `args` are rejected, tagged with `name`
    /// - `InvalidOutput` if a generator breaks the output contract
    /// - `UnknownImage` if neither a generator nor the source knows `name`
    /// - `RetrievalFailure` if the source fails to deliver `name`
    pub fn get_image(&self, name: &str, size: ImageSize, args: &Args) -> Result<TestImage> {
        let size = size.validate().with_image(name)?;

        // Lookup clones the generator out so no lock is held while it runs
        let pixels = if let Some(generator) = self.registry.lookup(name) {
            debug!("Generating '{name}' at {size}");
            let pixels = generator(size, args).with_image(name)?;
            check_output(name, &pixels, size)?;
            pixels
        } else if let Some(source) = &self.source {
            debug!("No generator named '{name}', asking the remote source");
            fetch_and_scale_with(source.as_ref(), name, size, args, self.interpolation)
                .with_image(name)?
        } else {
            return Err(PhantomError::UnknownImage {
                name: name.to_string(),
            });
        };

        Ok(TestImage::new(name.to_string(), pixels, size))
    }
}

impl Resolver<'static> {
    /// Resolver over the process-wide registry and remote source
    pub fn global() -> Self {
        let resolver = Self::new(global_registry());
        match remote_source() {
            Some(source) => resolver.with_source(source),
            None => resolver,
        }
    }
}

// Every array handed to a caller matches the requested size and holds
// finite non-negative values
fn check_output(name: &str, pixels: &Array2<f64>, size: ImageSize) -> Result<()> {
    if pixels.dim() != size.shape() {
        let (width, height) = pixels.dim();
        return Err(PhantomError::InvalidOutput {
            name: name.to_string(),
            reason: format!("expected shape {size}, got {width}x{height}"),
        });
    }
    if let Some(bad) = pixels.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(PhantomError::InvalidOutput {
            name: name.to_string(),
            reason: format!("pixel value {bad} is not a finite non-negative number"),
        });
    }
    Ok(())
}

/// Produce the image called `name` using the process-wide registry
///
/// Names without a registered generator go to the source installed with
/// [`crate::remote::set_remote_source`], or fail as unknown when none is
/// installed.
///
/// # Errors
///
/// See [`Resolver::get_image`]
pub fn get_image(name: &str, size: ImageSize, args: &Args) -> Result<TestImage> {
    Resolver::global().get_image(name, size, args)
}
