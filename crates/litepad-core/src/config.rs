use serde::{Deserialize, Serialize};

/// Engine options controlling entry eligibility and preview composition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions {
    /// Designated markup file for the preview (default: /public/index.html)
    #[serde(default = "default_markup_path")]
    pub markup_path: String,

    /// Designated stylesheet file for the preview (default: /src/styles.css)
    #[serde(default = "default_stylesheet_path")]
    pub stylesheet_path: String,

    /// Directory whose script files feed the preview bundle (default: /src)
    #[serde(default = "default_script_root")]
    pub script_root: String,

    /// Extension marking a file as a runnable script (default: js)
    #[serde(default = "default_script_extension")]
    pub script_extension: String,

    /// Script call depth at which a run is aborted (default: 256)
    #[serde(default = "default_max_call_depth")]
    pub max_call_depth: usize,
}

fn default_markup_path() -> String {
    "/public/index.html".to_string()
}

fn default_stylesheet_path() -> String {
    "/src/styles.css".to_string()
}

fn default_script_root() -> String {
    "/src".to_string()
}

fn default_script_extension() -> String {
    "js".to_string()
}

fn default_max_call_depth() -> usize {
    256
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            markup_path: default_markup_path(),
            stylesheet_path: default_stylesheet_path(),
            script_root: default_script_root(),
            script_extension: default_script_extension(),
            max_call_depth: default_max_call_depth(),
        }
    }
}

impl EngineOptions {
    /// Parse options from host-supplied JSON; absent fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether `path` carries the configured script extension.
    pub fn is_script_path(&self, path: &str) -> bool {
        path.ends_with(&format!(".{}", self.script_extension))
    }

    /// Whether `path` lies under the configured script root directory.
    pub fn is_under_script_root(&self, path: &str) -> bool {
        let root = self.script_root.trim_end_matches('/');
        path.starts_with(&format!("{}/", root))
    }
}
