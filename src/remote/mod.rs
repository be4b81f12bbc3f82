//! Reference images supplied from outside the process
//!
//! This module contains:
//! - The `ImageSource` collaborator boundary and a local directory adapter
//! - Fetching and resampling to a requested size

/// Retrieval and rescaling of a named reference image
pub mod fetch;
/// Source trait, directory adapter and the process-wide source slot
pub mod source;

pub use fetch::{RescaleParams, fetch_and_scale};
pub use source::{
    DirectorySource, ImageSource, SourceError, clear_remote_source, remote_source, set_remote_source,
};
