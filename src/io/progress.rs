//! Progress display while rendering several phantoms

use crate::io::configuration::PROGRESS_MIN_IMAGES;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Images: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Single progress bar over a batch of requested images
///
/// Stays hidden for batches smaller than [`PROGRESS_MIN_IMAGES`].
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with nothing displayed yet
    pub const fn new() -> Self {
        Self { bar: None }
    }

    /// Show a bar if `image_count` is large enough
    pub fn initialize(&mut self, image_count: usize) {
        if image_count >= PROGRESS_MIN_IMAGES {
            let bar = ProgressBar::new(image_count as u64);
            bar.set_style(BATCH_STYLE.clone());
            self.bar = Some(bar);
        }
    }

    /// Whether a bar is being displayed
    pub const fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    /// Show which image is being rendered
    pub fn start_image(&self, name: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(name.to_string());
        }
    }

    /// Advance past a finished image
    pub fn complete_image(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Clear and drop the display
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
