use std::sync::Arc;

use litepad_core::module_resolver::resolve;
use litepad_core::{Engine, MemoryFileSystem};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_bare_specifiers_pass_through(spec in "[a-zA-Z0-9_/.-]{1,24}") {
        prop_assume!(!spec.starts_with("./"));
        prop_assert_eq!(resolve(&spec, "/src/main.js"), spec.clone());
    }

    #[test]
    fn prop_relative_specifiers_join_the_containing_directory(
        name in "[a-zA-Z0-9_]{1,12}",
        dir in "[a-z]{1,8}",
    ) {
        let from = format!("/{}/from.js", dir);
        let specifier = format!("./{}.js", name);
        prop_assert_eq!(resolve(&specifier, &from), format!("/{}/{}.js", dir, name));
    }

    #[test]
    fn prop_resolution_is_pure(spec in "[a-zA-Z0-9_./-]{1,24}", from in "/[a-z/]{1,16}") {
        prop_assert_eq!(resolve(&spec, &from), resolve(&spec, &from));
    }

    #[test]
    fn prop_preview_rebuild_is_deterministic(
        contents in proptest::collection::vec("[ -~]{0,40}", 0..5),
    ) {
        let fs = Arc::new(MemoryFileSystem::new());
        for (position, content) in contents.iter().enumerate() {
            fs.add_file(format!("/src/file{}.js", position), content.clone());
        }
        let engine = Engine::new(fs);

        prop_assert_eq!(engine.request_preview(), engine.request_preview());
    }
}
