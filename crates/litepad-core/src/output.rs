use std::sync::Mutex;

/// Severity of one captured output line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Info,
    Warning,
    Error,
}

/// A single captured output line, ordered by emission time within a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEntry {
    pub kind: OutputKind,
    pub text: String,
}

impl OutputEntry {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: OutputKind::Error,
            text: text.into(),
        }
    }
}

/// Trait for receiving script output
/// Handed to a run by its caller, so no ambient output channel is ever
/// replaced; the sink is exclusively held for the duration of one run.
pub trait OutputSink: Send + Sync {
    fn emit(&self, entry: OutputEntry);

    fn info(&self, text: &str) {
        self.emit(OutputEntry::info(text));
    }

    fn warning(&self, text: &str) {
        self.emit(OutputEntry::warning(text));
    }

    fn error(&self, text: &str) {
        self.emit(OutputEntry::error(text));
    }

    fn has_errors(&self) -> bool;
    fn error_count(&self) -> usize;
    fn entries(&self) -> Vec<OutputEntry>;
}

/// Collecting sink: records entries without printing
pub struct CollectingOutputSink {
    entries: Mutex<Vec<OutputEntry>>,
}

impl CollectingOutputSink {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl Default for CollectingOutputSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for CollectingOutputSink {
    fn emit(&self, entry: OutputEntry) {
        self.entries.lock().unwrap().push(entry);
    }

    fn has_errors(&self) -> bool {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.kind == OutputKind::Error)
    }

    fn error_count(&self) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind == OutputKind::Error)
            .count()
    }

    fn entries(&self) -> Vec<OutputEntry> {
        self.entries.lock().unwrap().clone()
    }
}

/// Sink that mirrors entries to stderr while recording them
pub struct StderrOutputSink {
    entries: Mutex<Vec<OutputEntry>>,
}

impl StderrOutputSink {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl Default for StderrOutputSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for StderrOutputSink {
    fn emit(&self, entry: OutputEntry) {
        let kind_str = match entry.kind {
            OutputKind::Info => "info",
            OutputKind::Warning => "warning",
            OutputKind::Error => "error",
        };
        eprintln!("{}: {}", kind_str, entry.text);
        self.entries.lock().unwrap().push(entry);
    }

    fn has_errors(&self) -> bool {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.kind == OutputKind::Error)
    }

    fn error_count(&self) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind == OutputKind::Error)
            .count()
    }

    fn entries(&self) -> Vec<OutputEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_preserves_order() {
        let sink = CollectingOutputSink::new();

        sink.info("first");
        sink.warning("second");
        sink.error("third");

        let entries = sink.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], OutputEntry::info("first"));
        assert_eq!(entries[1], OutputEntry::warning("second"));
        assert_eq!(entries[2], OutputEntry::error("third"));
    }

    #[test]
    fn test_error_counting() {
        let sink = CollectingOutputSink::new();

        sink.error("one");
        sink.info("two");
        sink.error("three");

        assert!(sink.has_errors());
        assert_eq!(sink.error_count(), 2);
    }

    #[test]
    fn test_no_errors() {
        let sink = CollectingOutputSink::new();

        sink.info("hello");
        sink.warning("careful");

        assert!(!sink.has_errors());
        assert_eq!(sink.error_count(), 0);
    }
}
