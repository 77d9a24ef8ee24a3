//! Module-syntax removal.
//!
//! The transformer turns a source text that may contain the restricted
//! module-syntax subset into plain script text with no module syntax left.
//! It parses the source and re-emits every ordinary statement as its
//! original source slice, desugaring only the module statements. The rules
//! are applied in a fixed order per statement:
//!
//! 1. `export const <name> = <expr>` becomes a plain `let` binding followed
//!    by an explicit `__export("<name>", <name>)` registration.
//! 2. `export function <name>(..) {..}` becomes the plain declaration
//!    followed by the same registration.
//! 3. `export default <expr>` becomes the bare expression; the value only
//!    surfaces as the entry script's completion value.
//! 4. `import { a, b } from "<spec>"` fans out into one `let` binding per
//!    name, each reading off `__import("<spec>")`.
//!
//! The transformer never fails: a source that does not lex or parse is
//! returned unchanged, and the resulting script fails later, at execution
//! time, where the failure is reported through the normal output channel.

use crate::ast::{ExportKind, ExpressionKind, Literal, Statement};
use crate::lexer::Lexer;
use crate::parser::Parser;

pub fn transform(source: &str) -> String {
    let tokens = match Lexer::new(source).tokenize() {
        Ok(tokens) => tokens,
        Err(_) => return source.to_string(),
    };
    let program = match Parser::new(tokens).parse() {
        Ok(program) => program,
        Err(_) => return source.to_string(),
    };

    let mut output = String::new();
    for statement in &program.statements {
        emit_statement(statement, source, &mut output);
    }
    output
}

fn emit_statement(statement: &Statement, source: &str, output: &mut String) {
    match statement {
        Statement::Import(import) => {
            for name in &import.names {
                output.push_str(&format!(
                    "let {} = __import(\"{}\").{};\n",
                    name.name,
                    escape_string(&import.source),
                    name.name,
                ));
            }
        }
        Statement::Export(export) => match &export.kind {
            ExportKind::Const(decl) => {
                output.push_str(&format!(
                    "let {} = {};\n",
                    decl.name.name,
                    initializer_text(decl, source),
                ));
                push_export_registration(&decl.name.name, output);
            }
            ExportKind::Function(decl) => {
                push_slice(source, decl.span.start, decl.span.end, output);
                output.push('\n');
                push_export_registration(&decl.name.name, output);
            }
            ExportKind::Default(expr) => {
                push_slice(source, expr.span.start, expr.span.end, output);
                output.push_str(";\n");
            }
        },
        other => {
            let span = other.span();
            push_slice(source, span.start, span.end, output);
            let emitted = output.trim_end();
            if !emitted.ends_with(';') && !emitted.ends_with('}') {
                output.push(';');
            }
            output.push('\n');
        }
    }
}

fn initializer_text(decl: &crate::ast::VariableDeclaration, source: &str) -> String {
    // `export const x;` has a synthesized undefined initializer with no
    // source text of its own.
    let synthesized = matches!(
        decl.initializer.kind,
        ExpressionKind::Literal(Literal::Undefined)
    ) && decl.initializer.span == decl.name.span;
    if synthesized {
        "undefined".to_string()
    } else {
        source[decl.initializer.span.start..decl.initializer.span.end].to_string()
    }
}

fn push_export_registration(name: &str, output: &mut String) {
    output.push_str(&format!("__export(\"{}\", {});\n", name, name));
}

fn push_slice(source: &str, start: usize, end: usize, output: &mut String) {
    output.push_str(&source[start..end]);
}

fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
