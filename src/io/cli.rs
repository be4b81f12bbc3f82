//! Command-line interface for rendering named phantoms to PNG files

use crate::generators::args::{ArgValue, Args};
use crate::io::configuration::{
    DEFAULT_CLI_HEIGHT, DEFAULT_CLI_WIDTH, DEFAULT_INTERPOLATION, DEFAULT_OUTPUT_DIR,
    OUTPUT_EXTENSION,
};
use crate::io::error::Result;
use crate::io::image::export_png;
use crate::io::progress::ProgressManager;
use crate::math::interpolation::Interpolation;
use crate::registry::image::ImageSize;
use crate::registry::resolver::Resolver;
use crate::registry::store::global_registry;
use crate::remote::source::DirectorySource;
use clap::{ArgAction, Parser};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "phantoms")]
#[command(author, version, about = "Render named test images for imaging pipelines")]
/// Command-line arguments for the phantom renderer
pub struct Cli {
    /// Generator or reference image names to render
    #[arg(value_name = "NAME", required_unless_present = "list")]
    pub names: Vec<String>,

    /// Image width in pixels
    #[arg(short = 'W', long, default_value_t = DEFAULT_CLI_WIDTH)]
    pub width: usize,

    /// Image height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_CLI_HEIGHT)]
    pub height: usize,

    /// Generator argument, repeatable (e.g. `-a checkers_count=2,3`)
    #[arg(short = 'a', long = "arg", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub args: Vec<(String, ArgValue)>,

    /// Directory holding reference images for names without a generator
    #[arg(short, long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Resampling scheme for reference images (nearest or linear)
    #[arg(short, long)]
    pub interpolation: Option<Interpolation>,

    /// Directory the PNG files are written into
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// List registered generator names and exit
    #[arg(short, long)]
    pub list: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Split `key=value` and parse the value with [`ArgValue::parse`]
///
/// # Errors
///
/// Returns a message if there is no `=` or the key is empty
pub fn parse_key_value(raw: &str) -> std::result::Result<(String, ArgValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{raw}'"));
    }
    Ok((key.to_string(), ArgValue::parse(value)))
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Requested image size
    pub const fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }

    /// Arguments forwarded to every request
    pub fn request_args(&self) -> Args {
        let mut args = Args::new();
        for (key, value) in &self.args {
            args.insert(key.clone(), value.clone());
        }
        args
    }

    /// Log filter implied by the verbosity count
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Install the global logger with the CLI's verbosity as default filter
///
/// `RUST_LOG` still takes precedence when set.
pub fn init_logging(cli: &Cli) {
    let env = env_logger::Env::default().default_filter_or(cli.log_level());
    // A logger may already be installed when embedded in tests
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Renders each requested name and writes it as a PNG
pub struct Renderer {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl Renderer {
    /// Create a renderer for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Resolver over the global registry and the configured source directory
    pub fn resolver(&self) -> Resolver<'static> {
        let resolver = Resolver::new(global_registry())
            .with_interpolation(self.cli.interpolation.unwrap_or(DEFAULT_INTERPOLATION));
        match &self.cli.source_dir {
            Some(dir) => resolver.with_source(Arc::new(DirectorySource::new(dir))),
            None => resolver,
        }
    }

    /// Render all requested names, or list generators with `--list`
    ///
    /// Returns the paths written, in request order.
    ///
    /// # Errors
    ///
    /// Returns the first resolution or export error
    pub fn process(&mut self) -> Result<Vec<PathBuf>> {
        if self.cli.list {
            Self::print_names();
            return Ok(Vec::new());
        }

        let resolver = self.resolver();
        let size = self.cli.size();
        let args = self.cli.request_args();

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.names.len());
        }

        let result = self.render_all(&resolver, size, &args);

        // Cleared on failure too so no half-drawn bar is left behind
        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        result
    }

    fn render_all(
        &self,
        resolver: &Resolver<'_>,
        size: ImageSize,
        args: &Args,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.cli.names.len());
        for name in &self.cli.names {
            if let Some(ref pm) = self.progress_manager {
                pm.start_image(name);
            }

            let image = resolver.get_image(name, size, args)?;
            let path = Self::output_path(&self.cli.output, name);
            export_png(&image, &path)?;
            info!("Wrote '{name}' to {}", path.display());
            written.push(path);

            if let Some(ref pm) = self.progress_manager {
                pm.complete_image();
            }
        }
        Ok(written)
    }

    /// Progress display, absent when running quietly
    pub const fn progress_manager(&self) -> Option<&ProgressManager> {
        self.progress_manager.as_ref()
    }

    // Allow print for the listing the user asked for
    #[allow(clippy::print_stdout)]
    fn print_names() {
        for name in global_registry().names() {
            println!("{name}");
        }
    }

    /// Output file for `name`, with characters unsafe in file names replaced
    pub fn output_path(output_dir: &Path, name: &str) -> PathBuf {
        let stem: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        output_dir.join(format!("{stem}.{OUTPUT_EXTENSION}"))
    }
}
