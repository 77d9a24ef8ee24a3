//! Sandbox globals.
//!
//! Each module executes against a fresh root scope seeded with these
//! bindings and nothing else; no host state is reachable from script code.

use indexmap::IndexMap;

use super::scope::{Scope, ScopeRef};
use super::value::{Builtin, Value};

pub fn sandbox_scope() -> ScopeRef {
    let scope = Scope::root();
    {
        let mut scope = scope.borrow_mut();
        scope.declare("console", console_object());
        scope.declare("Math", math_object());
        scope.declare("JSON", json_object());
        scope.declare("NaN", Value::Number(f64::NAN));
        scope.declare("Infinity", Value::Number(f64::INFINITY));
    }
    scope
}

fn console_object() -> Value {
    let mut entries = IndexMap::new();
    entries.insert("log".to_string(), Value::Builtin(Builtin::ConsoleLog));
    entries.insert("warn".to_string(), Value::Builtin(Builtin::ConsoleWarn));
    entries.insert("error".to_string(), Value::Builtin(Builtin::ConsoleError));
    Value::object(entries)
}

fn math_object() -> Value {
    let mut entries = IndexMap::new();
    entries.insert("abs".to_string(), Value::Builtin(Builtin::MathAbs));
    entries.insert("floor".to_string(), Value::Builtin(Builtin::MathFloor));
    entries.insert("max".to_string(), Value::Builtin(Builtin::MathMax));
    entries.insert("min".to_string(), Value::Builtin(Builtin::MathMin));
    Value::object(entries)
}

fn json_object() -> Value {
    let mut entries = IndexMap::new();
    entries.insert(
        "stringify".to_string(),
        Value::Builtin(Builtin::JsonStringify),
    );
    Value::object(entries)
}

/// Console arguments render space-joined, strings bare.
pub fn format_console_arguments(arguments: &[Value]) -> String {
    arguments
        .iter()
        .map(|v| v.to_display_string())
        .collect::<Vec<_>>()
        .join(" ")
}
