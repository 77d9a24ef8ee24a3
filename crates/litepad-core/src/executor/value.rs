use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

use super::scope::ScopeRef;
use crate::ast::{Block, Expression};

pub type ObjectRef = Rc<RefCell<IndexMap<String, Value>>>;
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// A runtime value inside the sandbox. Arrays and objects have reference
/// semantics; everything else copies.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(ArrayRef),
    Object(ObjectRef),
    Function(Rc<ScriptFunction>),
    Builtin(Builtin),
}

/// A user-defined function together with its captured scope.
pub struct ScriptFunction {
    pub name: Option<String>,
    pub parameters: Vec<String>,
    pub body: FunctionBody,
    pub scope: ScopeRef,
}

#[derive(Clone)]
pub enum FunctionBody {
    Block(Block),
    Expression(Expression),
}

/// Host-provided functions reachable from the sandbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    ConsoleLog,
    ConsoleWarn,
    ConsoleError,
    MathAbs,
    MathFloor,
    MathMax,
    MathMin,
    JsonStringify,
    /// `__import("<specifier>")` — emitted by the transformer; loads the
    /// resolved module through the run's module cache.
    ModuleImport,
    /// `__export("<name>", value)` — emitted by the transformer; registers
    /// a binding on the executing module's export surface.
    ModuleExport,
}

impl Value {
    pub fn object(entries: IndexMap<String, Value>) -> Value {
        Value::Object(Rc::new(RefCell::new(entries)))
    }

    pub fn array(elements: Vec<Value>) -> Value {
        Value::Array(Rc::new(RefCell::new(elements)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) | Value::Builtin(_) => "function",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Function(_) | Value::Builtin(_) => true,
        }
    }

    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            _ => false,
        }
    }

    /// Numeric coercion for arithmetic.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Boolean(true) => 1.0,
            Value::Boolean(false) => 0.0,
            Value::Null => 0.0,
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            _ => f64::NAN,
        }
    }

    /// Console-style rendering: strings appear bare at the top level and
    /// quoted when nested inside arrays or objects.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            other => other.render(0),
        }
    }

    fn render(&self, depth: usize) -> String {
        if depth > 4 {
            return "…".to_string();
        }
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => format!("'{}'", s),
            Value::Array(elements) => {
                let rendered: Vec<String> = elements
                    .borrow()
                    .iter()
                    .map(|v| v.render(depth + 1))
                    .collect();
                format!("[{}]", rendered.join(", "))
            }
            Value::Object(entries) => {
                let entries = entries.borrow();
                if entries.is_empty() {
                    return "{}".to_string();
                }
                let rendered: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v.render(depth + 1)))
                    .collect();
                format!("{{ {} }}", rendered.join(", "))
            }
            Value::Function(f) => match &f.name {
                Some(name) => format!("[Function: {}]", name),
                None => "[Function (anonymous)]".to_string(),
            },
            Value::Builtin(_) => "[Function (native)]".to_string(),
        }
    }

    /// JSON projection used by `JSON.stringify`. `None` marks values JSON
    /// cannot represent (undefined, functions): omitted from objects,
    /// rendered as null inside arrays.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        match self {
            Value::Undefined | Value::Function(_) | Value::Builtin(_) => None,
            Value::Null => Some(serde_json::Value::Null),
            Value::Boolean(b) => Some(serde_json::Value::Bool(*b)),
            Value::Number(n) => {
                let number = if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(serde_json::Number::from(*n as i64))
                } else {
                    serde_json::Number::from_f64(*n)
                };
                Some(
                    number
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null),
                )
            }
            Value::String(s) => Some(serde_json::Value::String(s.clone())),
            Value::Array(elements) => Some(serde_json::Value::Array(
                elements
                    .borrow()
                    .iter()
                    .map(|v| v.to_json().unwrap_or(serde_json::Value::Null))
                    .collect(),
            )),
            Value::Object(entries) => Some(serde_json::Value::Object(
                entries
                    .borrow()
                    .iter()
                    .filter_map(|(k, v)| v.to_json().map(|j| (k.clone(), j)))
                    .collect(),
            )),
        }
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(0))
    }
}

pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
