//! Sandboxed script execution.
//!
//! A run executes the designated entry file with its module dependencies
//! resolved through the per-run module cache. Script output goes to an
//! `OutputSink` injected by the caller; nothing ambient is intercepted, so
//! there is nothing to restore on any exit path. Every failure is converted
//! into output entries at the top-level run boundary — the caller always
//! gets a log back, never an error.

pub mod builtins;
mod eval;
pub mod scope;
pub mod value;

pub use value::Value;

use tracing::{debug, warn};

use crate::config::EngineOptions;
use crate::errors::{EngineError, Result};
use crate::lexer::Lexer;
use crate::modules::{ExportSurface, ModuleLoader};
use crate::output::OutputSink;
use crate::parser::Parser;
use crate::vfs::VirtualFileSystem;
use eval::Interpreter;

/// Execute one module's transformed source in a fresh sandbox scope.
/// Returns the export surface registered during execution and the module's
/// completion value.
pub(crate) fn execute_module(
    loader: &mut ModuleLoader<'_>,
    path: &str,
    source: &str,
) -> Result<(ExportSurface, Value)> {
    let tokens = Lexer::new(source)
        .tokenize()
        .map_err(|e| EngineError::runtime(e.to_string()))?;
    let program = Parser::new(tokens)
        .parse()
        .map_err(|e| EngineError::runtime(e.to_string()))?;

    let scope = builtins::sandbox_scope();
    {
        let mut scope = scope.borrow_mut();
        scope.declare("__import", Value::Builtin(value::Builtin::ModuleImport));
        scope.declare("__export", Value::Builtin(value::Builtin::ModuleExport));
    }

    let mut interpreter = Interpreter::new(loader, path);
    let completion = interpreter.execute_program(&program, &scope)?;
    Ok((interpreter.exports, completion))
}

/// Top-level run boundary.
pub struct Executor<'a> {
    vfs: &'a dyn VirtualFileSystem,
    options: &'a EngineOptions,
}

impl<'a> Executor<'a> {
    pub fn new(vfs: &'a dyn VirtualFileSystem, options: &'a EngineOptions) -> Self {
        Executor { vfs, options }
    }

    /// Run the entry file, delivering all output to `sink`. Infallible by
    /// contract: failures become a single error- or warning-kind entry.
    pub fn run(&self, entry_path: &str, sink: &dyn OutputSink) {
        if !self.options.is_script_path(entry_path) {
            warn!(path = entry_path, "entry is not a runnable script");
            sink.warning(
                &EngineError::UnsupportedEntry {
                    path: entry_path.to_string(),
                }
                .to_string(),
            );
            return;
        }

        debug!(path = entry_path, "starting run");
        let mut loader = ModuleLoader::new(self.vfs, self.options, sink);
        match loader.load_entry(entry_path) {
            Ok(completion) => {
                if !matches!(completion, Value::Undefined) {
                    sink.info(&completion.to_display_string());
                }
            }
            Err(error) => sink.error(&error.to_string()),
        }
        debug!(path = entry_path, "run finished");
    }
}
