use thiserror::Error;

/// Failures that can surface while loading or executing modules.
/// All of these propagate up to the top-level run boundary, which converts
/// them into a single error- or warning-kind output entry; nothing escapes
/// past that boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("module not found: {path}")]
    ModuleNotFound { path: String },

    #[error("cyclic import detected at {path}")]
    CyclicImport { path: String },

    #[error("entry is not a runnable script: {path}")]
    UnsupportedEntry { path: String },

    #[error("{message}")]
    Runtime { message: String },
}

impl EngineError {
    pub fn module_not_found(path: impl Into<String>) -> Self {
        Self::ModuleNotFound { path: path.into() }
    }

    pub fn cyclic_import(path: impl Into<String>) -> Self {
        Self::CyclicImport { path: path.into() }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
