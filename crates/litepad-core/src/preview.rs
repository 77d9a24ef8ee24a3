//! Preview composition.
//!
//! The bundler is textually naive by design: it never resolves imports or
//! orders scripts by dependency. It reads the whole file set once and
//! concatenates by category — the designated markup file, the designated
//! stylesheet file, and every script under the script root in enumeration
//! order. Absent designated files degrade to empty strings; there are no
//! error cases.

use tracing::debug;

use crate::config::EngineOptions;
use crate::vfs::VirtualFileSystem;

/// The bundled payload handed to the isolated rendering context. Derived
/// data: fully recomputed on every request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewDocument {
    pub markup: String,
    pub style: String,
    pub script: String,
}

impl PreviewDocument {
    /// Render the single self-contained payload the rendering context
    /// replaces its content with.
    pub fn into_markup(self) -> String {
        format!(
            "<!doctype html><html><head><style>{}</style></head><body>{}<script>{}</script></body></html>",
            self.style, self.markup, self.script
        )
    }
}

pub struct PreviewBundler<'a> {
    vfs: &'a dyn VirtualFileSystem,
    options: &'a EngineOptions,
}

impl<'a> PreviewBundler<'a> {
    pub fn new(vfs: &'a dyn VirtualFileSystem, options: &'a EngineOptions) -> Self {
        PreviewBundler { vfs, options }
    }

    pub fn build(&self) -> PreviewDocument {
        let markup = self.vfs.read(&self.options.markup_path).unwrap_or_default();
        let style = self
            .vfs
            .read(&self.options.stylesheet_path)
            .unwrap_or_default();

        let scripts: Vec<String> = self
            .vfs
            .enumerate()
            .into_iter()
            .filter(|file| {
                self.options.is_under_script_root(&file.path)
                    && self.options.is_script_path(&file.path)
            })
            .map(|file| file.content)
            .collect();

        debug!(scripts = scripts.len(), "preview bundle built");
        PreviewDocument {
            markup,
            style,
            script: scripts.join("\n\n"),
        }
    }
}
