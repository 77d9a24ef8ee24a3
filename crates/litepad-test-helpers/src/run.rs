use std::sync::Arc;

use litepad_core::{Engine, MemoryFileSystem, OutputEntry};

/// Run a single script placed at `/src/main.js` in an otherwise empty
/// project.
pub fn run_source(source: &str) -> Vec<OutputEntry> {
    run_files(&[("/src/main.js", source)], "/src/main.js")
}

/// Run `entry` against a project built from `(path, content)` pairs.
pub fn run_files(files: &[(&str, &str)], entry: &str) -> Vec<OutputEntry> {
    engine_with_files(files).request_run(entry)
}

/// Build an engine over an in-memory project with default options.
pub fn engine_with_files(files: &[(&str, &str)]) -> Engine {
    let fs = Arc::new(MemoryFileSystem::new());
    for (path, content) in files {
        fs.add_file(*path, *content);
    }
    Engine::new(fs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use litepad_core::OutputKind;

    #[test]
    fn test_run_source_captures_output() {
        let entries = run_source("console.log('hello');");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, OutputKind::Info);
        assert_eq!(entries[0].text, "hello");
    }

    #[test]
    fn test_run_files_resolves_imports() {
        let entries = run_files(
            &[
                ("/src/main.js", "import { sum } from \"./utils.js\";\nconsole.log(sum(1, 2));"),
                ("/src/utils.js", "export const sum = (a, b) => a + b;"),
            ],
            "/src/main.js",
        );

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "3");
    }
}
