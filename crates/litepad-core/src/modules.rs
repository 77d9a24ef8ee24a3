//! Per-run module cache and loader.
//!
//! The cache is scoped to one execution run: a module imported from any
//! number of places executes exactly once per run, and nothing carries over
//! between runs. A module is marked as loading before its source executes,
//! so re-entering it while it is still on the load stack is detected as a
//! cyclic import and fails fast instead of recursing without termination.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::config::EngineOptions;
use crate::errors::{EngineError, Result};
use crate::executor::{execute_module, Value};
use crate::output::OutputSink;
use crate::transform::transform;
use crate::vfs::VirtualFileSystem;

/// Ordered mapping from exported name to value, produced by executing one
/// module's transformed source.
pub type ExportSurface = IndexMap<String, Value>;

enum ModuleEntry {
    Loading,
    Loaded(ExportSurface),
}

pub struct ModuleLoader<'a> {
    vfs: &'a dyn VirtualFileSystem,
    pub(crate) options: &'a EngineOptions,
    pub(crate) sink: &'a dyn OutputSink,
    cache: FxHashMap<String, ModuleEntry>,
    pub(crate) call_depth: usize,
}

impl<'a> ModuleLoader<'a> {
    pub fn new(
        vfs: &'a dyn VirtualFileSystem,
        options: &'a EngineOptions,
        sink: &'a dyn OutputSink,
    ) -> Self {
        ModuleLoader {
            vfs,
            options,
            sink,
            cache: FxHashMap::default(),
            call_depth: 0,
        }
    }

    /// Load a module for an importer. Memoized per run; a runtime failure
    /// inside the module is wrapped with the module's path so transitive
    /// errors stay traceable.
    pub fn load_module(&mut self, path: &str) -> Result<ExportSurface> {
        if let Some(entry) = self.cache.get(path) {
            return match entry {
                ModuleEntry::Loaded(surface) => {
                    trace!(path, "module cache hit");
                    Ok(surface.clone())
                }
                ModuleEntry::Loading => Err(EngineError::cyclic_import(path)),
            };
        }

        match self.load_and_execute(path) {
            Ok((surface, _)) => Ok(surface),
            Err(EngineError::Runtime { message }) => Err(EngineError::Runtime {
                message: format!("error in module '{}': {}", path, message),
            }),
            Err(other) => Err(other),
        }
    }

    /// Load the entry module, returning its completion value.
    pub fn load_entry(&mut self, path: &str) -> Result<Value> {
        let (_, completion) = self.load_and_execute(path)?;
        Ok(completion)
    }

    fn load_and_execute(&mut self, path: &str) -> Result<(ExportSurface, Value)> {
        let content = self
            .vfs
            .read(path)
            .ok_or_else(|| EngineError::module_not_found(path))?;

        debug!(path, "loading module");
        self.cache.insert(path.to_string(), ModuleEntry::Loading);
        let transformed = transform(&content);

        match execute_module(self, path, &transformed) {
            Ok((surface, completion)) => {
                self.cache
                    .insert(path.to_string(), ModuleEntry::Loaded(surface.clone()));
                Ok((surface, completion))
            }
            Err(error) => {
                // A failed module must not be mistaken for an in-flight one
                // if something re-imports it later in the same run.
                self.cache.remove(path);
                Err(error)
            }
        }
    }
}
