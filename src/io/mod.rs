//! Input/output operations and error handling

/// Command-line parsing and batch rendering
pub mod cli;
/// Built-in names, defaults and limits
pub mod configuration;
/// Error type and helpers shared by the crate
pub mod error;
/// Conversion between pixel arrays and image files
pub mod image;
/// Progress display for batch rendering
pub mod progress;
