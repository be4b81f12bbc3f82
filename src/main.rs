//! CLI entry point for rendering named phantoms

use clap::Parser;
use phantoms::io::cli::{Cli, Renderer, init_logging};

fn main() -> phantoms::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut renderer = Renderer::new(cli);
    renderer.process().map(|_| ())
}
