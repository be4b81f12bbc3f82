//! Error types and context management for phantom generation and retrieval

use std::fmt;
use std::path::PathBuf;

/// Main error type for all phantom operations
#[derive(Debug)]
pub enum PhantomError {
    /// A size, count, dimension or argument was rejected before generation
    InvalidParameter {
        /// Image name the arguments were addressed to, once known
        image: Option<String>,
        /// Name of the invalid parameter
        parameter: String,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Name matches neither a registered generator nor a remote source
    UnknownImage {
        /// The requested identifier
        name: String,
    },

    /// The remote source collaborator could not supply the image
    RetrievalFailure {
        /// Identifier passed to the source
        source_id: String,
        /// Description of the failure reported by the source
        reason: String,
    },

    /// A generator returned an array violating the output contract
    ///
    /// Occurs when the array shape differs from the requested size or
    /// when it contains negative or non-finite values.
    InvalidOutput {
        /// Name of the generator
        name: String,
        /// Description of the violation
        reason: String,
    },

    /// Failed to decode an image file
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered phantom to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for PhantomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                image,
                parameter,
                value,
                reason,
            } => match image {
                Some(image) => write!(
                    f,
                    "Invalid parameter '{parameter}' = '{value}' for '{image}': {reason}"
                ),
                None => write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}"),
            },
            Self::UnknownImage { name } => {
                write!(
                    f,
                    "Unknown image '{name}': no registered generator or remote source"
                )
            }
            Self::RetrievalFailure { source_id, reason } => {
                write!(f, "Failed to retrieve '{source_id}': {reason}")
            }
            Self::InvalidOutput { name, reason } => {
                write!(f, "Generator '{name}' produced invalid output: {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for PhantomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for phantom results
pub type Result<T> = std::result::Result<T, PhantomError>;

/// Attaches the requested image name to parameter errors
pub trait WithImage<T> {
    /// Record which image the rejected arguments were addressed to
    ///
    /// # Errors
    ///
    /// Propagates the original error, with the image name filled in for
    /// `InvalidParameter` errors that do not carry one yet
    fn with_image(self, name: &str) -> Result<T>;
}

impl<T> WithImage<T> for Result<T> {
    fn with_image(self, name: &str) -> Result<T> {
        self.map_err(|mut error| {
            if let PhantomError::InvalidParameter { image, .. } = &mut error
                && image.is_none()
            {
                *image = Some(name.to_string());
            }
            error
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: impl Into<String>,
    value: &impl ToString,
    reason: &impl ToString,
) -> PhantomError {
    PhantomError::InvalidParameter {
        image: None,
        parameter: parameter.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a retrieval failure error
pub fn retrieval_failure(source_id: &str, reason: &impl ToString) -> PhantomError {
    PhantomError::RetrievalFailure {
        source_id: source_id.to_string(),
        reason: reason.to_string(),
    }
}
