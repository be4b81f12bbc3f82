//! Name to generator mapping shared across the process
//!
//! All mutation goes through one `RwLock`. A registration is a single map
//! insert under the write lock, so readers see either the previous entry or
//! the new one, and concurrent registrations of one name end with whichever
//! acquired the lock last. Lookups clone the `Arc` and release the lock
//! before the generator runs.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, warn};
use ndarray::Array2;

use crate::generators::args::Args;
use crate::generators::{checker, delta};
use crate::io::configuration::{CHECKER_IMAGE, DELTA_IMAGE};
use crate::io::error::Result;
use crate::registry::image::ImageSize;

/// A registered generator
pub type GeneratorFn = Arc<dyn Fn(ImageSize, &Args) -> Result<Array2<f64>> + Send + Sync>;

/// Registry of named generators
pub struct GeneratorRegistry {
    generators: RwLock<HashMap<String, GeneratorFn>>,
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl GeneratorRegistry {
    /// Registry with no generators
    pub fn empty() -> Self {
        Self {
            generators: RwLock::new(HashMap::new()),
        }
    }

    /// Registry holding the built-in checkerboard and point-grid generators
    pub fn with_builtins() -> Self {
        let registry = Self::empty();
        registry.register(CHECKER_IMAGE, checker::generate);
        registry.register(DELTA_IMAGE, delta::generate);
        registry
    }

    // The map is only touched by single inserts and reads, so a panic in
    // another thread cannot leave it inconsistent
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, GeneratorFn>> {
        self.generators.read().unwrap_or_else(|poisoned| {
            warn!("Recovering generator registry after a panic in another thread");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, GeneratorFn>> {
        self.generators.write().unwrap_or_else(|poisoned| {
            warn!("Recovering generator registry after a panic in another thread");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Insert or replace the generator for `name`
    pub fn register<F>(&self, name: impl Into<String>, generator: F)
    where
        F: Fn(ImageSize, &Args) -> Result<Array2<f64>> + Send + Sync + 'static,
    {
        self.register_fn(name, Arc::new(generator));
    }

    /// Insert or replace the generator for `name` with a shared function
    pub fn register_fn(&self, name: impl Into<String>, generator: GeneratorFn) {
        let name = name.into();
        let replaced = self.write().insert(name.clone(), generator).is_some();
        if replaced {
            debug!("Replaced generator '{name}'");
        } else {
            debug!("Registered generator '{name}'");
        }
    }

    /// Generator registered under `name`
    pub fn lookup(&self, name: &str) -> Option<GeneratorFn> {
        self.read().get(name).cloned()
    }

    /// Whether a generator is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered generators
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no generators are registered
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

static GLOBAL_REGISTRY: OnceLock<GeneratorRegistry> = OnceLock::new();

/// The process-wide registry, populated with the built-ins on first use
pub fn global_registry() -> &'static GeneratorRegistry {
    GLOBAL_REGISTRY.get_or_init(GeneratorRegistry::with_builtins)
}

/// Insert or replace a generator in the process-wide registry
///
/// A registration under a built-in name replaces the built-in.
pub fn register<F>(name: impl Into<String>, generator: F)
where
    F: Fn(ImageSize, &Args) -> Result<Array2<f64>> + Send + Sync + 'static,
{
    global_registry().register(name, generator);
}

/// Generator registered under `name` in the process-wide registry
pub fn lookup(name: &str) -> Option<GeneratorFn> {
    global_registry().lookup(name)
}
