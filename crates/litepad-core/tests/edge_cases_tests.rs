use std::sync::Arc;

use indoc::indoc;
use litepad_core::{Engine, MemoryFileSystem, OutputEntry, OutputKind};

fn run(files: &[(&str, &str)], entry: &str) -> Vec<OutputEntry> {
    let fs = Arc::new(MemoryFileSystem::new());
    for (path, content) in files {
        fs.add_file(*path, *content);
    }
    Engine::new(fs).request_run(entry)
}

#[test]
fn test_entry_importing_itself_transitively_is_a_cycle() {
    let entries = run(
        &[
            (
                "/src/main.js",
                "import { helper } from \"./helper.js\";\nexport const root = 1;",
            ),
            (
                "/src/helper.js",
                "import { root } from \"./main.js\";\nexport const helper = 2;",
            ),
        ],
        "/src/main.js",
    );

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, OutputKind::Error);
    assert!(entries[0].text.contains("cyclic import"));
}

#[test]
fn test_importing_the_same_module_twice_in_one_file() {
    let entries = run(
        &[
            (
                "/src/main.js",
                indoc! {r#"
                    import { sum } from "./utils.js";
                    import { mul } from "./utils.js";
                    console.log(sum(2, 2), mul(2, 2));
                "#},
            ),
            (
                "/src/utils.js",
                indoc! {r#"
                    console.log('utils loaded');
                    export const sum = (a, b) => a + b;
                    export const mul = (a, b) => a * b;
                "#},
            ),
        ],
        "/src/main.js",
    );

    assert_eq!(
        entries,
        vec![
            OutputEntry::info("utils loaded"),
            OutputEntry::info("4 4")
        ]
    );
}

#[test]
fn test_unsupported_syntax_degrades_to_runtime_error() {
    // Markup syntax is outside the recognized grammar: the transformer
    // leaves the source untouched and execution reports the failure.
    let entries = run(
        &[("/src/main.js", "const el = <div>hello</div>;")],
        "/src/main.js",
    );

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, OutputKind::Error);
}

#[test]
fn test_unsupported_export_form_degrades_to_runtime_error() {
    let entries = run(
        &[("/src/main.js", "export class Widget {}")],
        "/src/main.js",
    );

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, OutputKind::Error);
}

#[test]
fn test_unterminated_string_degrades_to_runtime_error() {
    let entries = run(&[("/src/main.js", "console.log('oops);")], "/src/main.js");

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, OutputKind::Error);
    assert!(entries[0].text.contains("unterminated string"));
}

#[test]
fn test_module_scopes_are_isolated() {
    let entries = run(
        &[
            (
                "/src/main.js",
                "import { one } from \"./a.js\";\nconsole.log(hidden);",
            ),
            (
                "/src/a.js",
                "const hidden = 'secret';\nexport const one = 1;",
            ),
        ],
        "/src/main.js",
    );

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0], OutputEntry::error("hidden is not defined"));
}

#[test]
fn test_stray_semicolons_are_tolerated() {
    let entries = run(&[("/src/main.js", ";;console.log('ok');;")], "/src/main.js");

    assert_eq!(entries, vec![OutputEntry::info("ok")]);
}

#[test]
fn test_failing_module_is_not_misreported_as_a_cycle() {
    let entries = run(
        &[
            (
                "/src/main.js",
                "import { a } from \"./broken.js\";\nconsole.log(a);",
            ),
            ("/src/broken.js", "export const a = missing();"),
        ],
        "/src/main.js",
    );

    assert_eq!(entries.len(), 1);
    assert!(entries[0].text.contains("error in module '/src/broken.js'"));
    assert!(!entries[0].text.contains("cyclic"));
}

#[test]
fn test_deeply_chained_imports() {
    let entries = run(
        &[
            (
                "/src/main.js",
                "import { c } from \"./c.js\";\nconsole.log(c);",
            ),
            (
                "/src/c.js",
                "import { b } from \"./b.js\";\nexport const c = b + 1;",
            ),
            (
                "/src/b.js",
                "import { a } from \"./a.js\";\nexport const b = a + 1;",
            ),
            ("/src/a.js", "export const a = 1;"),
        ],
        "/src/main.js",
    );

    assert_eq!(entries, vec![OutputEntry::info("3")]);
}

#[test]
fn test_run_with_injected_sink() {
    use litepad_core::{CollectingOutputSink, OutputSink};

    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_file("/src/main.js", "console.error('sinked');");
    let engine = Engine::new(fs);

    let sink = CollectingOutputSink::new();
    engine.run_with_sink("/src/main.js", &sink);

    assert!(sink.has_errors());
    assert_eq!(sink.entries(), vec![OutputEntry::error("sinked")]);
}
