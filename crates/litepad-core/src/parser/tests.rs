use super::*;
use crate::ast::{ExpressionKind, Literal, Statement};
use crate::lexer::Lexer;

fn parse(source: &str) -> crate::ast::Program {
    let tokens = Lexer::new(source).tokenize().unwrap();
    Parser::new(tokens).parse().unwrap()
}

fn parse_err(source: &str) -> ParserError {
    let tokens = Lexer::new(source).tokenize().unwrap();
    Parser::new(tokens).parse().unwrap_err()
}

#[test]
fn test_variable_declaration() {
    let program = parse("const x = 1 + 2;");

    assert_eq!(program.statements.len(), 1);
    let Statement::Variable(decl) = &program.statements[0] else {
        panic!("expected variable declaration");
    };
    assert_eq!(decl.name.name, "x");
}

#[test]
fn test_uninitialized_let_defaults_to_undefined() {
    let program = parse("let x;");

    let Statement::Variable(decl) = &program.statements[0] else {
        panic!("expected variable declaration");
    };
    assert!(matches!(
        decl.initializer.kind,
        ExpressionKind::Literal(Literal::Undefined)
    ));
}

#[test]
fn test_function_declaration() {
    let program = parse("function greet(name) { return 'Hello, ' + name; }");

    let Statement::Function(decl) = &program.statements[0] else {
        panic!("expected function declaration");
    };
    assert_eq!(decl.name.name, "greet");
    assert_eq!(decl.parameters.len(), 1);
    assert_eq!(decl.body.statements.len(), 1);
}

#[test]
fn test_arrow_function_forms() {
    let program = parse("const sum = (a, b) => a + b; const inc = x => x + 1;");

    assert_eq!(program.statements.len(), 2);
    for stmt in &program.statements {
        let Statement::Variable(decl) = stmt else {
            panic!("expected variable declaration");
        };
        assert!(matches!(decl.initializer.kind, ExpressionKind::Arrow(_)));
    }
}

#[test]
fn test_parenthesized_expression_is_not_arrow() {
    let program = parse("const x = (1 + 2) * 3;");

    let Statement::Variable(decl) = &program.statements[0] else {
        panic!("expected variable declaration");
    };
    assert!(matches!(
        decl.initializer.kind,
        ExpressionKind::Binary(_, _, _)
    ));
}

#[test]
fn test_import_declaration() {
    let program = parse(r#"import { sum, mul } from "./utils.js";"#);

    let Statement::Import(import) = &program.statements[0] else {
        panic!("expected import declaration");
    };
    let names: Vec<&str> = import.names.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["sum", "mul"]);
    assert_eq!(import.source, "./utils.js");
}

#[test]
fn test_export_forms() {
    let program = parse(
        "export const sum = (a, b) => a + b;\nexport function mul(a, b) { return a * b; }\nexport default 42;",
    );

    assert_eq!(program.statements.len(), 3);
    assert!(program.has_module_syntax());
}

#[test]
fn test_export_let_is_rejected() {
    let err = parse_err("export let x = 1;");
    assert!(err.message.contains("unsupported export form"));
}

#[test]
fn test_if_else_chain() {
    let program = parse("if (a) { b(); } else if (c) { d(); } else { e(); }");

    let Statement::If(stmt) = &program.statements[0] else {
        panic!("expected if statement");
    };
    let else_branch = stmt.else_branch.as_ref().unwrap();
    assert!(matches!(**else_branch, Statement::If(_)));
}

#[test]
fn test_for_statement() {
    let program = parse("for (let i = 0; i < 10; i = i + 1) { log(i); }");

    let Statement::For(stmt) = &program.statements[0] else {
        panic!("expected for statement");
    };
    assert!(stmt.init.is_some());
    assert!(stmt.condition.is_some());
    assert!(stmt.update.is_some());
}

#[test]
fn test_member_call_chain() {
    let program = parse("console.log(greet('World'));");

    let Statement::Expression(expr) = &program.statements[0] else {
        panic!("expected expression statement");
    };
    let ExpressionKind::Call(callee, args) = &expr.kind else {
        panic!("expected call");
    };
    assert!(matches!(callee.kind, ExpressionKind::Member(_, _)));
    assert_eq!(args.len(), 1);
}

#[test]
fn test_object_literal_with_shorthand() {
    let program = parse("const point = { x: 1, y, 'z-axis': 3 };");

    let Statement::Variable(decl) = &program.statements[0] else {
        panic!("expected variable declaration");
    };
    let ExpressionKind::Object(properties) = &decl.initializer.kind else {
        panic!("expected object literal");
    };
    assert_eq!(properties.len(), 3);
    assert_eq!(properties[2].key.name, "z-axis");
}

#[test]
fn test_conditional_expression() {
    let program = parse("const label = count === 1 ? 'one' : 'many';");

    let Statement::Variable(decl) = &program.statements[0] else {
        panic!("expected variable declaration");
    };
    assert!(matches!(
        decl.initializer.kind,
        ExpressionKind::Conditional(_, _, _)
    ));
}

#[test]
fn test_assignment_target_validation() {
    let err = parse_err("1 = 2;");
    assert!(err.message.contains("invalid assignment target"));
}

#[test]
fn test_unexpected_token_reports_line() {
    let err = parse_err("const x = ;\n");
    assert_eq!(err.span.line, 1);
}
