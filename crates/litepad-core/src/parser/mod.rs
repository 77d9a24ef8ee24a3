mod expression;
mod statement;

#[cfg(test)]
mod tests;

use crate::ast::{Ident, Program};
use crate::lexer::{Token, TokenKind};
use crate::span::Span;

pub use expression::ExpressionParser;
pub use statement::StatementParser;

#[derive(Debug, Clone)]
pub struct ParserError {
    pub message: String,
    pub span: Span,
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at line {}", self.message, self.span.line)
    }
}

impl std::error::Error for ParserError {}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            position: 0,
        }
    }

    pub fn parse(&mut self) -> Result<Program, ParserError> {
        let start_span = self.current_span();
        let mut statements = Vec::new();

        while !self.is_at_end() {
            // Stray semicolons are legal between statements
            if self.match_token(&[TokenKind::Semicolon]) {
                continue;
            }
            statements.push(self.parse_statement()?);
        }

        let end_span = if let Some(last) = statements.last() {
            last.span()
        } else {
            start_span
        };

        Ok(Program::new(statements, start_span.combine(&end_span)))
    }

    // Token stream management
    pub(crate) fn current(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or_else(|| {
            self.tokens
                .last()
                .expect("token stream always ends with Eof")
        })
    }

    pub(crate) fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.position + offset)
    }

    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    pub(crate) fn previous_span(&self) -> Span {
        if self.position == 0 {
            return self.current_span();
        }
        self.tokens[self.position - 1].span
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        &self.tokens[self.position - 1]
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn match_token(&mut self, kinds: &[TokenKind]) -> bool {
        for kind in kinds {
            if self.check(kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    pub(crate) fn consume(&mut self, kind: TokenKind, message: &str) -> Result<&Token, ParserError> {
        if self.check(&kind) {
            return Ok(self.advance());
        }

        Err(ParserError {
            message: message.to_string(),
            span: self.current_span(),
        })
    }

    pub(crate) fn parse_identifier(&mut self) -> Result<Ident, ParserError> {
        let span = self.current_span();
        match &self.current().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(Ident::new(name, span))
            }
            _ => Err(ParserError {
                message: "expected identifier".to_string(),
                span,
            }),
        }
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> ParserError {
        ParserError {
            message: message.into(),
            span: self.current_span(),
        }
    }
}
