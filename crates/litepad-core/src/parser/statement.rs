use super::{ExpressionParser, Parser, ParserError};
use crate::ast::expression::{Expression, ExpressionKind, Literal};
use crate::ast::statement::*;
use crate::lexer::TokenKind;

pub trait StatementParser {
    fn parse_statement(&mut self) -> Result<Statement, ParserError>;
    fn parse_braced_block(&mut self) -> Result<Block, ParserError>;
}

impl StatementParser for Parser {
    fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        match &self.current().kind {
            TokenKind::Let | TokenKind::Const => {
                let stmt = self.parse_variable_declaration()?;
                self.match_token(&[TokenKind::Semicolon]);
                Ok(Statement::Variable(stmt))
            }
            TokenKind::Function => Ok(Statement::Function(self.parse_function_declaration()?)),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Import => self.parse_import_declaration(),
            TokenKind::Export => self.parse_export_declaration(),
            TokenKind::LeftBrace => Ok(Statement::Block(self.parse_braced_block()?)),
            _ => {
                let expr = self.parse_expression()?;
                self.match_token(&[TokenKind::Semicolon]);
                Ok(Statement::Expression(expr))
            }
        }
    }

    fn parse_braced_block(&mut self) -> Result<Block, ParserError> {
        let start_span = self.current_span();
        self.consume(TokenKind::LeftBrace, "expected '{'")?;

        let mut statements = Vec::new();
        while !self.is_at_end() && !self.check(&TokenKind::RightBrace) {
            if self.match_token(&[TokenKind::Semicolon]) {
                continue;
            }
            statements.push(self.parse_statement()?);
        }

        self.consume(TokenKind::RightBrace, "expected '}' after block")?;
        let end_span = self.previous_span();

        Ok(Block {
            statements,
            span: start_span.combine(&end_span),
        })
    }
}

// Statement implementations
impl Parser {
    pub(crate) fn parse_variable_declaration(&mut self) -> Result<VariableDeclaration, ParserError> {
        let start_span = self.current_span();
        let kind = if matches!(self.current().kind, TokenKind::Const) {
            VariableKind::Const
        } else {
            VariableKind::Let
        };
        self.advance();

        let name = self.parse_identifier()?;

        let initializer = if self.match_token(&[TokenKind::Equal]) {
            self.parse_expression()?
        } else {
            Expression::new(ExpressionKind::Literal(Literal::Undefined), name.span)
        };
        let end_span = initializer.span;

        Ok(VariableDeclaration {
            kind,
            name,
            initializer,
            span: start_span.combine(&end_span),
        })
    }

    pub(crate) fn parse_function_declaration(&mut self) -> Result<FunctionDeclaration, ParserError> {
        let start_span = self.current_span();
        self.consume(TokenKind::Function, "expected 'function'")?;

        let name = self.parse_identifier()?;

        self.consume(TokenKind::LeftParen, "expected '(' after function name")?;
        let parameters = self.parse_parameter_list()?;
        self.consume(TokenKind::RightParen, "expected ')' after parameters")?;

        let body = self.parse_braced_block()?;
        let end_span = body.span;

        Ok(FunctionDeclaration {
            name,
            parameters,
            body,
            span: start_span.combine(&end_span),
        })
    }

    pub(crate) fn parse_parameter_list(&mut self) -> Result<Vec<crate::ast::Ident>, ParserError> {
        let mut parameters = Vec::new();

        if !self.check(&TokenKind::RightParen) {
            loop {
                parameters.push(self.parse_identifier()?);
                if !self.match_token(&[TokenKind::Comma]) {
                    break;
                }
            }
        }

        Ok(parameters)
    }

    fn parse_if_statement(&mut self) -> Result<Statement, ParserError> {
        let start_span = self.current_span();
        self.consume(TokenKind::If, "expected 'if'")?;
        self.consume(TokenKind::LeftParen, "expected '(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RightParen, "expected ')' after if condition")?;

        let then_block = self.parse_braced_block()?;

        let else_branch = if self.match_token(&[TokenKind::Else]) {
            if self.check(&TokenKind::If) {
                Some(Box::new(self.parse_if_statement()?))
            } else {
                Some(Box::new(Statement::Block(self.parse_braced_block()?)))
            }
        } else {
            None
        };

        let end_span = else_branch
            .as_ref()
            .map(|s| s.span())
            .unwrap_or(then_block.span);

        Ok(Statement::If(IfStatement {
            condition,
            then_block,
            else_branch,
            span: start_span.combine(&end_span),
        }))
    }

    fn parse_while_statement(&mut self) -> Result<Statement, ParserError> {
        let start_span = self.current_span();
        self.consume(TokenKind::While, "expected 'while'")?;
        self.consume(TokenKind::LeftParen, "expected '(' after 'while'")?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RightParen, "expected ')' after while condition")?;

        let body = self.parse_braced_block()?;
        let end_span = body.span;

        Ok(Statement::While(WhileStatement {
            condition,
            body,
            span: start_span.combine(&end_span),
        }))
    }

    fn parse_for_statement(&mut self) -> Result<Statement, ParserError> {
        let start_span = self.current_span();
        self.consume(TokenKind::For, "expected 'for'")?;
        self.consume(TokenKind::LeftParen, "expected '(' after 'for'")?;

        let init = if self.match_token(&[TokenKind::Semicolon]) {
            None
        } else if matches!(self.current().kind, TokenKind::Let | TokenKind::Const) {
            let decl = self.parse_variable_declaration()?;
            self.consume(TokenKind::Semicolon, "expected ';' after for initializer")?;
            Some(Box::new(Statement::Variable(decl)))
        } else {
            let expr = self.parse_expression()?;
            self.consume(TokenKind::Semicolon, "expected ';' after for initializer")?;
            Some(Box::new(Statement::Expression(expr)))
        };

        let condition = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume(TokenKind::Semicolon, "expected ';' after for condition")?;

        let update = if self.check(&TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume(TokenKind::RightParen, "expected ')' after for clauses")?;

        let body = self.parse_braced_block()?;
        let end_span = body.span;

        Ok(Statement::For(ForStatement {
            init,
            condition,
            update,
            body,
            span: start_span.combine(&end_span),
        }))
    }

    fn parse_return_statement(&mut self) -> Result<Statement, ParserError> {
        let start_span = self.current_span();
        self.consume(TokenKind::Return, "expected 'return'")?;

        let value = if self.check(&TokenKind::Semicolon)
            || self.check(&TokenKind::RightBrace)
            || self.is_at_end()
        {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.match_token(&[TokenKind::Semicolon]);

        let end_span = value.as_ref().map(|e| e.span).unwrap_or(start_span);

        Ok(Statement::Return(ReturnStatement {
            value,
            span: start_span.combine(&end_span),
        }))
    }

    fn parse_import_declaration(&mut self) -> Result<Statement, ParserError> {
        let start_span = self.current_span();
        self.consume(TokenKind::Import, "expected 'import'")?;
        self.consume(TokenKind::LeftBrace, "expected '{' after 'import'")?;

        let mut names = Vec::new();
        if !self.check(&TokenKind::RightBrace) {
            loop {
                names.push(self.parse_identifier()?);
                if !self.match_token(&[TokenKind::Comma]) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RightBrace, "expected '}' after import names")?;
        self.consume(TokenKind::From, "expected 'from' after import names")?;

        let source_span = self.current_span();
        let source = match &self.current().kind {
            TokenKind::String(value) => {
                let value = value.clone();
                self.advance();
                value
            }
            _ => {
                return Err(ParserError {
                    message: "expected module specifier string".to_string(),
                    span: source_span,
                })
            }
        };
        self.match_token(&[TokenKind::Semicolon]);
        let end_span = self.previous_span();

        Ok(Statement::Import(ImportDeclaration {
            names,
            source,
            span: start_span.combine(&end_span),
        }))
    }

    fn parse_export_declaration(&mut self) -> Result<Statement, ParserError> {
        let start_span = self.current_span();
        self.consume(TokenKind::Export, "expected 'export'")?;

        let kind = match &self.current().kind {
            TokenKind::Const => {
                let decl = self.parse_variable_declaration()?;
                self.match_token(&[TokenKind::Semicolon]);
                ExportKind::Const(decl)
            }
            TokenKind::Function => ExportKind::Function(self.parse_function_declaration()?),
            TokenKind::Default => {
                self.advance();
                let expr = self.parse_expression()?;
                self.match_token(&[TokenKind::Semicolon]);
                ExportKind::Default(expr)
            }
            _ => return Err(self.error("unsupported export form")),
        };

        let end_span = self.previous_span();

        Ok(Statement::Export(ExportDeclaration {
            kind,
            span: start_span.combine(&end_span),
        }))
    }
}
