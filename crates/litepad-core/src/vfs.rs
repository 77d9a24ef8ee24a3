use indexmap::IndexMap;
use std::sync::Mutex;

/// One file in the host's in-memory store. The path is the unique key;
/// uniqueness is enforced by the store, not by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFile {
    pub path: String,
    pub content: String,
}

impl VirtualFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Read-only view of the host application's file store.
/// The engine never writes through this boundary; mutation belongs to the
/// editing surface that owns the store.
pub trait VirtualFileSystem: Send + Sync {
    /// Content of the file at `path`, or `None` when absent.
    fn read(&self, path: &str) -> Option<String>;

    /// Every file in insertion order. Enumeration order is an observable
    /// contract: the preview bundler concatenates scripts in this order.
    fn enumerate(&self) -> Vec<VirtualFile>;
}

/// In-memory file store used by the host and by tests.
pub struct MemoryFileSystem {
    files: Mutex<IndexMap<String, String>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(IndexMap::new()),
        }
    }

    /// Insert or replace a file. Replacing keeps the original insertion slot.
    pub fn add_file(&self, path: impl Into<String>, content: impl Into<String>) {
        self.files.lock().unwrap().insert(path.into(), content.into());
    }

    pub fn remove_file(&self, path: &str) {
        self.files.lock().unwrap().shift_remove(path);
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualFileSystem for MemoryFileSystem {
    fn read(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }

    fn enumerate(&self) -> Vec<VirtualFile> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .map(|(path, content)| VirtualFile::new(path.clone(), content.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_absent_file() {
        let fs = MemoryFileSystem::new();
        assert_eq!(fs.read("/missing.js"), None);
    }

    #[test]
    fn test_enumerate_preserves_insertion_order() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/b.js", "two");
        fs.add_file("/a.js", "one");
        fs.add_file("/c.js", "three");

        let paths: Vec<String> = fs.enumerate().into_iter().map(|f| f.path).collect();
        assert_eq!(paths, vec!["/b.js", "/a.js", "/c.js"]);
    }

    #[test]
    fn test_remove_file() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/a.js", "one");
        fs.add_file("/b.js", "two");
        fs.remove_file("/a.js");

        assert_eq!(fs.file_count(), 1);
        assert_eq!(fs.read("/a.js"), None);
        assert_eq!(fs.read("/b.js"), Some("two".to_string()));
    }

    #[test]
    fn test_replace_keeps_insertion_slot() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/a.js", "one");
        fs.add_file("/b.js", "two");
        fs.add_file("/a.js", "updated");

        let files = fs.enumerate();
        assert_eq!(files[0].path, "/a.js");
        assert_eq!(files[0].content, "updated");
    }
}
