use indexmap::IndexMap;
use std::rc::Rc;

use super::builtins::format_console_arguments;
use super::scope::{Scope, ScopeRef};
use super::value::{Builtin, FunctionBody, ScriptFunction, Value};
use crate::ast::expression::*;
use crate::ast::statement::*;
use crate::ast::Program;
use crate::errors::{EngineError, Result};
use crate::module_resolver;
use crate::modules::ModuleLoader;

/// Tree-walking evaluator for one module's transformed source.
/// Shares the run-wide loader so `__import` can pull dependencies through
/// the module cache, and owns the executing module's export surface.
pub(crate) struct Interpreter<'a, 'b> {
    loader: &'a mut ModuleLoader<'b>,
    module_path: String,
    pub(crate) exports: IndexMap<String, Value>,
}

enum Flow {
    Next(Value),
    Return(Value),
}

impl<'a, 'b> Interpreter<'a, 'b> {
    pub fn new(loader: &'a mut ModuleLoader<'b>, module_path: &str) -> Self {
        Interpreter {
            loader,
            module_path: module_path.to_string(),
            exports: IndexMap::new(),
        }
    }

    /// Execute all statements against `scope`, returning the completion
    /// value: the value of the last statement when it is an expression
    /// statement, or the value of a top-level `return`.
    pub fn execute_program(&mut self, program: &Program, scope: &ScopeRef) -> Result<Value> {
        let mut completion = Value::Undefined;
        for statement in &program.statements {
            match self.execute_statement(statement, scope)? {
                Flow::Next(value) => completion = value,
                Flow::Return(value) => return Ok(value),
            }
        }
        Ok(completion)
    }

    fn execute_statement(&mut self, statement: &Statement, scope: &ScopeRef) -> Result<Flow> {
        match statement {
            Statement::Variable(decl) => {
                let value = self.eval_expression(&decl.initializer, scope)?;
                scope.borrow_mut().declare(decl.name.name.clone(), value);
                Ok(Flow::Next(Value::Undefined))
            }
            Statement::Function(decl) => {
                let function = Value::Function(Rc::new(ScriptFunction {
                    name: Some(decl.name.name.clone()),
                    parameters: decl.parameters.iter().map(|p| p.name.clone()).collect(),
                    body: FunctionBody::Block(decl.body.clone()),
                    scope: Rc::clone(scope),
                }));
                scope.borrow_mut().declare(decl.name.name.clone(), function);
                Ok(Flow::Next(Value::Undefined))
            }
            Statement::If(stmt) => {
                if self.eval_expression(&stmt.condition, scope)?.is_truthy() {
                    if let Some(value) = self.execute_block(&stmt.then_block, scope)? {
                        return Ok(Flow::Return(value));
                    }
                } else if let Some(else_branch) = &stmt.else_branch {
                    if let Flow::Return(value) = self.execute_statement(else_branch, scope)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Next(Value::Undefined))
            }
            Statement::While(stmt) => {
                while self.eval_expression(&stmt.condition, scope)?.is_truthy() {
                    if let Some(value) = self.execute_block(&stmt.body, scope)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Next(Value::Undefined))
            }
            Statement::For(stmt) => {
                let loop_scope = Scope::child(scope);
                if let Some(init) = &stmt.init {
                    self.execute_statement(init, &loop_scope)?;
                }
                loop {
                    if let Some(condition) = &stmt.condition {
                        if !self.eval_expression(condition, &loop_scope)?.is_truthy() {
                            break;
                        }
                    }
                    if let Some(value) = self.execute_block(&stmt.body, &loop_scope)? {
                        return Ok(Flow::Return(value));
                    }
                    if let Some(update) = &stmt.update {
                        self.eval_expression(update, &loop_scope)?;
                    }
                }
                Ok(Flow::Next(Value::Undefined))
            }
            Statement::Return(stmt) => {
                let value = match &stmt.value {
                    Some(expr) => self.eval_expression(expr, scope)?,
                    None => Value::Undefined,
                };
                Ok(Flow::Return(value))
            }
            Statement::Expression(expr) => {
                Ok(Flow::Next(self.eval_expression(expr, scope)?))
            }
            Statement::Block(block) => {
                if let Some(value) = self.execute_block(block, scope)? {
                    return Ok(Flow::Return(value));
                }
                Ok(Flow::Next(Value::Undefined))
            }
            Statement::Import(_) | Statement::Export(_) => {
                Err(EngineError::runtime("unexpected module syntax"))
            }
        }
    }

    /// Execute a block in its own child scope. `Some` carries a `return`
    /// value that must propagate out of the enclosing function.
    fn execute_block(&mut self, block: &Block, parent: &ScopeRef) -> Result<Option<Value>> {
        let scope = Scope::child(parent);
        for statement in &block.statements {
            if let Flow::Return(value) = self.execute_statement(statement, &scope)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    fn eval_expression(&mut self, expr: &Expression, scope: &ScopeRef) -> Result<Value> {
        match &expr.kind {
            ExpressionKind::Literal(literal) => Ok(eval_literal(literal)),
            ExpressionKind::Identifier(name) => Scope::lookup(scope, name)
                .ok_or_else(|| EngineError::runtime(format!("{} is not defined", name))),
            ExpressionKind::Parenthesized(inner) => self.eval_expression(inner, scope),
            ExpressionKind::Binary(op, left, right) => {
                let left = self.eval_expression(left, scope)?;
                let right = self.eval_expression(right, scope)?;
                eval_binary(*op, &left, &right)
            }
            ExpressionKind::Logical(op, left, right) => {
                let left = self.eval_expression(left, scope)?;
                match op {
                    LogicalOp::And => {
                        if left.is_truthy() {
                            self.eval_expression(right, scope)
                        } else {
                            Ok(left)
                        }
                    }
                    LogicalOp::Or => {
                        if left.is_truthy() {
                            Ok(left)
                        } else {
                            self.eval_expression(right, scope)
                        }
                    }
                }
            }
            ExpressionKind::Unary(op, operand) => {
                let value = self.eval_expression(operand, scope)?;
                Ok(match op {
                    UnaryOp::Not => Value::Boolean(!value.is_truthy()),
                    UnaryOp::Negate => Value::Number(-value.to_number()),
                })
            }
            ExpressionKind::Conditional(condition, then_value, else_value) => {
                if self.eval_expression(condition, scope)?.is_truthy() {
                    self.eval_expression(then_value, scope)
                } else {
                    self.eval_expression(else_value, scope)
                }
            }
            ExpressionKind::Assignment(target, value) => {
                let value = self.eval_expression(value, scope)?;
                self.assign(target, value.clone(), scope)?;
                Ok(value)
            }
            ExpressionKind::Member(object, property) => {
                let object = self.eval_expression(object, scope)?;
                self.property_access(&object, &property.name)
            }
            ExpressionKind::Index(object, index) => {
                let object = self.eval_expression(object, scope)?;
                let index = self.eval_expression(index, scope)?;
                self.index_access(&object, &index)
            }
            ExpressionKind::Call(callee, argument_exprs) => {
                let function = self.eval_expression(callee, scope)?;
                let mut arguments = Vec::with_capacity(argument_exprs.len());
                for argument in argument_exprs {
                    arguments.push(self.eval_expression(argument, scope)?);
                }
                match function {
                    Value::Function(f) => self.call_function(&f, arguments),
                    Value::Builtin(b) => self.call_builtin(b, arguments),
                    _ => Err(EngineError::runtime(format!(
                        "{} is not a function",
                        callee_description(callee)
                    ))),
                }
            }
            ExpressionKind::Array(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval_expression(element, scope)?);
                }
                Ok(Value::array(values))
            }
            ExpressionKind::Object(properties) => {
                let mut entries = IndexMap::new();
                for property in properties {
                    let value = self.eval_expression(&property.value, scope)?;
                    entries.insert(property.key.name.clone(), value);
                }
                Ok(Value::object(entries))
            }
            ExpressionKind::Function(f) => Ok(Value::Function(Rc::new(ScriptFunction {
                name: f.name.as_ref().map(|n| n.name.clone()),
                parameters: f.parameters.iter().map(|p| p.name.clone()).collect(),
                body: FunctionBody::Block(f.body.clone()),
                scope: Rc::clone(scope),
            }))),
            ExpressionKind::Arrow(f) => {
                let body = match &f.body {
                    ArrowBody::Block(block) => FunctionBody::Block(block.clone()),
                    ArrowBody::Expression(expr) => FunctionBody::Expression((**expr).clone()),
                };
                Ok(Value::Function(Rc::new(ScriptFunction {
                    name: None,
                    parameters: f.parameters.iter().map(|p| p.name.clone()).collect(),
                    body,
                    scope: Rc::clone(scope),
                })))
            }
        }
    }

    fn assign(&mut self, target: &Expression, value: Value, scope: &ScopeRef) -> Result<()> {
        match &target.kind {
            ExpressionKind::Identifier(name) => {
                if Scope::assign(scope, name, value) {
                    Ok(())
                } else {
                    Err(EngineError::runtime(format!("{} is not defined", name)))
                }
            }
            ExpressionKind::Member(object, property) => {
                let object = self.eval_expression(object, scope)?;
                match object {
                    Value::Object(entries) => {
                        entries.borrow_mut().insert(property.name.clone(), value);
                        Ok(())
                    }
                    other => Err(EngineError::runtime(format!(
                        "cannot set properties of {}",
                        other.type_name()
                    ))),
                }
            }
            ExpressionKind::Index(object, index) => {
                let object = self.eval_expression(object, scope)?;
                let index = self.eval_expression(index, scope)?;
                match &object {
                    Value::Array(elements) => {
                        let position = index.to_number();
                        if position < 0.0 || position.fract() != 0.0 || position.is_nan() {
                            return Err(EngineError::runtime("invalid array index"));
                        }
                        let position = position as usize;
                        let mut elements = elements.borrow_mut();
                        if position >= elements.len() {
                            elements.resize(position + 1, Value::Undefined);
                        }
                        elements[position] = value;
                        Ok(())
                    }
                    Value::Object(entries) => {
                        entries.borrow_mut().insert(property_key(&index), value);
                        Ok(())
                    }
                    other => Err(EngineError::runtime(format!(
                        "cannot set properties of {}",
                        other.type_name()
                    ))),
                }
            }
            _ => Err(EngineError::runtime("invalid assignment target")),
        }
    }

    fn property_access(&self, object: &Value, property: &str) -> Result<Value> {
        match object {
            Value::Object(entries) => Ok(entries
                .borrow()
                .get(property)
                .cloned()
                .unwrap_or(Value::Undefined)),
            Value::Array(elements) => match property {
                "length" => Ok(Value::Number(elements.borrow().len() as f64)),
                _ => Ok(Value::Undefined),
            },
            Value::String(s) => match property {
                "length" => Ok(Value::Number(s.chars().count() as f64)),
                _ => Ok(Value::Undefined),
            },
            Value::Undefined | Value::Null => Err(EngineError::runtime(format!(
                "cannot read properties of {} (reading '{}')",
                object.type_name(),
                property
            ))),
            _ => Ok(Value::Undefined),
        }
    }

    fn index_access(&self, object: &Value, index: &Value) -> Result<Value> {
        match object {
            Value::Array(elements) => {
                let position = index.to_number();
                if position < 0.0 || position.fract() != 0.0 || position.is_nan() {
                    return Ok(Value::Undefined);
                }
                Ok(elements
                    .borrow()
                    .get(position as usize)
                    .cloned()
                    .unwrap_or(Value::Undefined))
            }
            Value::Object(entries) => Ok(entries
                .borrow()
                .get(&property_key(index))
                .cloned()
                .unwrap_or(Value::Undefined)),
            Value::String(s) => {
                let position = index.to_number();
                if position < 0.0 || position.fract() != 0.0 || position.is_nan() {
                    return Ok(Value::Undefined);
                }
                Ok(s.chars()
                    .nth(position as usize)
                    .map(|c| Value::String(c.to_string()))
                    .unwrap_or(Value::Undefined))
            }
            Value::Undefined | Value::Null => Err(EngineError::runtime(format!(
                "cannot read properties of {} (reading '{}')",
                object.type_name(),
                property_key(index)
            ))),
            _ => Ok(Value::Undefined),
        }
    }

    fn call_function(
        &mut self,
        function: &Rc<ScriptFunction>,
        arguments: Vec<Value>,
    ) -> Result<Value> {
        if self.loader.call_depth >= self.loader.options.max_call_depth {
            return Err(EngineError::runtime("maximum call depth exceeded"));
        }
        self.loader.call_depth += 1;

        let scope = Scope::child(&function.scope);
        {
            let mut scope = scope.borrow_mut();
            for (position, parameter) in function.parameters.iter().enumerate() {
                scope.declare(
                    parameter.clone(),
                    arguments.get(position).cloned().unwrap_or(Value::Undefined),
                );
            }
        }

        let result = match &function.body {
            FunctionBody::Block(block) => self
                .execute_block(block, &scope)
                .map(|returned| returned.unwrap_or(Value::Undefined)),
            FunctionBody::Expression(expr) => self.eval_expression(expr, &scope),
        };

        self.loader.call_depth -= 1;
        result
    }

    fn call_builtin(&mut self, builtin: Builtin, arguments: Vec<Value>) -> Result<Value> {
        match builtin {
            Builtin::ConsoleLog => {
                self.loader.sink.info(&format_console_arguments(&arguments));
                Ok(Value::Undefined)
            }
            Builtin::ConsoleWarn => {
                self.loader
                    .sink
                    .warning(&format_console_arguments(&arguments));
                Ok(Value::Undefined)
            }
            Builtin::ConsoleError => {
                self.loader.sink.error(&format_console_arguments(&arguments));
                Ok(Value::Undefined)
            }
            Builtin::MathAbs => Ok(Value::Number(first_number(&arguments).abs())),
            Builtin::MathFloor => Ok(Value::Number(first_number(&arguments).floor())),
            Builtin::MathMax => Ok(Value::Number(fold_numbers(
                &arguments,
                f64::NEG_INFINITY,
                f64::max,
            ))),
            Builtin::MathMin => Ok(Value::Number(fold_numbers(
                &arguments,
                f64::INFINITY,
                f64::min,
            ))),
            Builtin::JsonStringify => {
                let value = arguments.first().cloned().unwrap_or(Value::Undefined);
                match value.to_json() {
                    Some(json) => Ok(Value::String(
                        serde_json::to_string(&json)
                            .map_err(|e| EngineError::runtime(e.to_string()))?,
                    )),
                    None => Ok(Value::Undefined),
                }
            }
            Builtin::ModuleExport => {
                let Some(Value::String(name)) = arguments.first().cloned() else {
                    return Err(EngineError::runtime("invalid export registration"));
                };
                let value = arguments.get(1).cloned().unwrap_or(Value::Undefined);
                self.exports.insert(name, value);
                Ok(Value::Undefined)
            }
            Builtin::ModuleImport => {
                let Some(Value::String(specifier)) = arguments.first().cloned() else {
                    return Err(EngineError::runtime("invalid import specifier"));
                };
                let resolved = module_resolver::resolve(&specifier, &self.module_path);
                let surface = self.loader.load_module(&resolved)?;
                Ok(Value::object(surface))
            }
        }
    }
}

fn eval_literal(literal: &Literal) -> Value {
    match literal {
        Literal::Null => Value::Null,
        Literal::Undefined => Value::Undefined,
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::String(s.clone()),
    }
}

fn eval_binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    let value = match op {
        BinaryOp::Add => match (left, right) {
            (Value::String(_), _) | (_, Value::String(_)) => Value::String(format!(
                "{}{}",
                left.to_display_string(),
                right.to_display_string()
            )),
            _ => Value::Number(left.to_number() + right.to_number()),
        },
        BinaryOp::Subtract => Value::Number(left.to_number() - right.to_number()),
        BinaryOp::Multiply => Value::Number(left.to_number() * right.to_number()),
        BinaryOp::Divide => Value::Number(left.to_number() / right.to_number()),
        BinaryOp::Modulo => Value::Number(left.to_number() % right.to_number()),
        BinaryOp::Equal | BinaryOp::StrictEqual => Value::Boolean(left.strict_equals(right)),
        BinaryOp::NotEqual | BinaryOp::StrictNotEqual => {
            Value::Boolean(!left.strict_equals(right))
        }
        BinaryOp::LessThan => compare(left, right, |o| o == std::cmp::Ordering::Less),
        BinaryOp::LessThanOrEqual => compare(left, right, |o| o != std::cmp::Ordering::Greater),
        BinaryOp::GreaterThan => compare(left, right, |o| o == std::cmp::Ordering::Greater),
        BinaryOp::GreaterThanOrEqual => compare(left, right, |o| o != std::cmp::Ordering::Less),
    };
    Ok(value)
}

fn compare(left: &Value, right: &Value, test: impl Fn(std::cmp::Ordering) -> bool) -> Value {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    };
    Value::Boolean(ordering.is_some_and(test))
}

fn property_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_display_string(),
    }
}

fn first_number(arguments: &[Value]) -> f64 {
    arguments
        .first()
        .map(|v| v.to_number())
        .unwrap_or(f64::NAN)
}

fn fold_numbers(arguments: &[Value], seed: f64, fold: impl Fn(f64, f64) -> f64) -> f64 {
    let mut accumulator = seed;
    for argument in arguments {
        let n = argument.to_number();
        if n.is_nan() {
            return f64::NAN;
        }
        accumulator = fold(accumulator, n);
    }
    accumulator
}

fn callee_description(expr: &Expression) -> String {
    match &expr.kind {
        ExpressionKind::Identifier(name) => name.clone(),
        ExpressionKind::Member(object, property) => {
            format!("{}.{}", callee_description(object), property.name)
        }
        ExpressionKind::Parenthesized(inner) => callee_description(inner),
        _ => "expression".to_string(),
    }
}
