//! Import specifier resolution.
//!
//! Resolution is a pure string transform: no file-existence check happens
//! here. A specifier that resolves to an absent path is only detected by the
//! module loader when it tries to read the resolved path.

const RELATIVE_MARKER: &str = "./";

/// Resolve an import specifier against the file that contains the import.
///
/// A `./`-prefixed specifier is joined onto the containing directory of
/// `from_path`. Anything else is treated as an absolute virtual path and
/// returned unchanged. Only this single-level join is supported; `../` and
/// nested relative segments are not normalized.
pub fn resolve(specifier: &str, from_path: &str) -> String {
    match specifier.strip_prefix(RELATIVE_MARKER) {
        Some(rest) => format!("{}/{}", containing_dir(from_path), rest),
        None => specifier.to_string(),
    }
}

fn containing_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[..index],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_specifier_joins_containing_dir() {
        assert_eq!(resolve("./b.js", "/src/a.js"), "/src/b.js");
        assert_eq!(resolve("./utils.js", "/src/components/button.js"), "/src/components/utils.js");
    }

    #[test]
    fn test_bare_specifier_passthrough() {
        assert_eq!(resolve("helper", "/src/a.js"), "helper");
        assert_eq!(resolve("/src/utils.js", "/src/main.js"), "/src/utils.js");
    }

    #[test]
    fn test_parent_traversal_is_not_normalized() {
        // A known limitation: `../` is not a recognized marker and passes
        // through as a bare specifier.
        assert_eq!(resolve("../shared.js", "/src/a.js"), "../shared.js");
    }
}
