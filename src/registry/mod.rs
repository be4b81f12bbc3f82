//! Named generator registry and request dispatch
//!
//! This module contains:
//! - The immutable `TestImage` result and `ImageSize`
//! - The process-wide name to generator mapping
//! - The resolver deciding between generators and remote sources

/// Image size and the test image value type
pub mod image;
/// Dispatch of a request to a generator or a remote source
pub mod resolver;
/// Name to generator mapping and its process-wide instance
pub mod store;

pub use self::image::{ImageSize, TestImage};
pub use resolver::{Resolver, get_image};
pub use store::{GeneratorFn, GeneratorRegistry, global_registry, lookup, register};
