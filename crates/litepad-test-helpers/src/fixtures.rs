use std::sync::Arc;

use indoc::indoc;
use litepad_core::MemoryFileSystem;

/// The sample project the editor seeds new workspaces with: a greeter
/// entry, a helper module, a markup page and a stylesheet.
pub fn sample_project() -> Arc<MemoryFileSystem> {
    let fs = Arc::new(MemoryFileSystem::new());

    fs.add_file(
        "/src/main.js",
        indoc! {r#"
            import { sum } from "./utils.js";

            export function greet(name) {
              return 'Hello, ' + name + '!';
            }

            console.log(greet('World'));
            console.log('1 + 2 =', sum(1, 2));
        "#},
    );
    fs.add_file(
        "/src/utils.js",
        indoc! {r#"
            export const sum = (a, b) => a + b;
            export const mul = (a, b) => a * b;
        "#},
    );
    fs.add_file(
        "/src/styles.css",
        indoc! {r#"
            body { font-family: sans-serif; }
        "#},
    );
    fs.add_file(
        "/public/index.html",
        indoc! {r#"
            <!doctype html>
            <html><head><title>App</title></head><body><div id='root'></div></body></html>
        "#},
    );

    fs
}
