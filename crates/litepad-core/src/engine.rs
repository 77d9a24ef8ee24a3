use std::sync::Arc;

use crate::config::EngineOptions;
use crate::executor::Executor;
use crate::output::{CollectingOutputSink, OutputEntry, OutputSink};
use crate::preview::{PreviewBundler, PreviewDocument};
use crate::vfs::VirtualFileSystem;

/// Wiring facade for the host UI: one synchronous entry point per inbound
/// operation, both running against the current snapshot of the file store.
pub struct Engine {
    options: EngineOptions,
    vfs: Arc<dyn VirtualFileSystem>,
}

impl Engine {
    pub fn new(vfs: Arc<dyn VirtualFileSystem>) -> Self {
        Engine {
            options: EngineOptions::default(),
            vfs,
        }
    }

    pub fn with_options(options: EngineOptions, vfs: Arc<dyn VirtualFileSystem>) -> Self {
        Engine { options, vfs }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Run the entry file and return the captured output log.
    pub fn request_run(&self, entry_path: &str) -> Vec<OutputEntry> {
        let sink = CollectingOutputSink::new();
        self.run_with_sink(entry_path, &sink);
        sink.entries()
    }

    /// Run the entry file against a caller-provided sink.
    pub fn run_with_sink(&self, entry_path: &str, sink: &dyn OutputSink) {
        Executor::new(self.vfs.as_ref(), &self.options).run(entry_path, sink);
    }

    /// Bundle the current file set into a preview document.
    pub fn request_preview(&self) -> PreviewDocument {
        PreviewBundler::new(self.vfs.as_ref(), &self.options).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::MemoryFileSystem;

    #[test]
    fn test_engine_runs_against_current_snapshot() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.add_file("/src/main.js", "console.log('one');");
        let engine = Engine::new(fs.clone());

        let first = engine.request_run("/src/main.js");
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].text, "one");

        fs.add_file("/src/main.js", "console.log('two');");
        let second = engine.request_run("/src/main.js");
        assert_eq!(second[0].text, "two");
    }

    #[test]
    fn test_runs_share_no_state() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.add_file("/src/main.js", "console.log('tick');");
        let engine = Engine::new(fs);

        assert_eq!(engine.request_run("/src/main.js").len(), 1);
        assert_eq!(engine.request_run("/src/main.js").len(), 1);
    }
}
