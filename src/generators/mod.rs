//! Deterministic pattern generators
//!
//! Each generator has a typed parameter struct for direct use and a
//! `generate(size, &Args)` entry point that the registry stores.

/// Keyword argument bag shared by all generators
pub mod args;
/// Grid of filled cells separated by background stripes
pub mod checker;
/// Stamped points placed by step functions
pub mod delta;

pub use args::{ArgValue, Args, StepFn, constant_step, step};
pub use checker::{CheckerParams, checker_image};
pub use delta::{DeltaParams, delta_image};
