//! Boundary to whatever supplies reference images
//!
//! The core never performs network or file I/O itself. An [`ImageSource`]
//! hands back the native pixel array for an identifier; transport, caching
//! and retry policy belong to the implementation.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use log::debug;
use ndarray::Array2;

use crate::io::configuration::SOURCE_EXTENSIONS;
use crate::io::image::load_luma;

/// Why a source could not supply an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The source has no image under this identifier
    NotFound,
    /// The image exists or may exist but could not be delivered
    Unavailable {
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("not found"),
            Self::Unavailable { reason } => write!(f, "unavailable: {reason}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Supplies reference images by identifier
pub trait ImageSource: Send + Sync {
    /// Native pixel array for `source_id`, shape `(width, height)`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the source has no such image and `Unavailable`
    /// for any other failure
    fn retrieve(&self, source_id: &str) -> Result<Array2<f64>, SourceError>;
}

/// Reads reference images from files in a local directory
///
/// `source_id` maps to `<root>/<source_id>.<ext>` for the first existing
/// extension in [`SOURCE_EXTENSIONS`]. Pixels are decoded as luma in
/// `[0, 1]`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Source rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the source reads from
    pub fn root(&self) -> &Path {
        &self.root
    }

    // Identifiers are plain file stems; anything that could leave the root is
    // treated as absent
    fn resolve(&self, source_id: &str) -> Option<PathBuf> {
        let stem = Path::new(source_id);
        let is_plain = !source_id.is_empty()
            && stem.components().count() == 1
            && stem.file_name().is_some_and(|name| name == stem.as_os_str());
        if !is_plain {
            return None;
        }

        SOURCE_EXTENSIONS
            .iter()
            .map(|extension| self.root.join(format!("{source_id}.{extension}")))
            .find(|path| path.is_file())
    }
}

impl ImageSource for DirectorySource {
    fn retrieve(&self, source_id: &str) -> Result<Array2<f64>, SourceError> {
        let path = self.resolve(source_id).ok_or(SourceError::NotFound)?;
        debug!("Loading '{source_id}' from {}", path.display());
        load_luma(&path).map_err(|error| SourceError::Unavailable {
            reason: error.to_string(),
        })
    }
}

static REMOTE_SOURCE: OnceLock<RwLock<Option<Arc<dyn ImageSource>>>> = OnceLock::new();

fn remote_slot() -> &'static RwLock<Option<Arc<dyn ImageSource>>> {
    REMOTE_SOURCE.get_or_init(|| RwLock::new(None))
}

/// Install the source used by the process-wide `get_image`
///
/// Replaces any previously installed source.
pub fn set_remote_source(source: Arc<dyn ImageSource>) {
    *remote_slot()
        .write()
        .unwrap_or_else(PoisonError::into_inner) = Some(source);
}

/// Remove the process-wide source so unregistered names become unknown
pub fn clear_remote_source() {
    *remote_slot()
        .write()
        .unwrap_or_else(PoisonError::into_inner) = None;
}

/// The currently installed process-wide source
pub fn remote_source() -> Option<Arc<dyn ImageSource>> {
    remote_slot()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
