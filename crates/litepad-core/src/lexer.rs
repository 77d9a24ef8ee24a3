use crate::span::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Identifier(String),
    Number(f64),
    String(String),

    // Keywords
    Let,
    Const,
    Function,
    Return,
    If,
    Else,
    While,
    For,
    True,
    False,
    Null,
    Undefined,
    Import,
    Export,
    From,
    Default,

    // Punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Dot,
    Semicolon,
    Colon,
    Question,
    Arrow,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Equal,
    EqualEqual,
    EqualEqualEqual,
    BangEqual,
    BangEqualEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    AmpAmp,
    PipePipe,
    Bang,

    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct LexError {
    pub message: String,
    pub span: Span,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.message, self.span)
    }
}

impl std::error::Error for LexError {}

/// Hand-written scanner producing byte-offset spans into the original
/// source, so downstream rewriting can slice statements back out verbatim.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            chars: source.char_indices().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia();
            if self.is_at_end() {
                break;
            }
            tokens.push(self.next_token()?);
        }

        let end = self.source.len();
        tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::new(end, end, self.line, self.column),
        });
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        let start_offset = self.current_offset();
        let start_line = self.line;
        let start_column = self.column;
        let ch = self.advance();

        let kind = match ch {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '=' => {
                if self.match_char('>') {
                    TokenKind::Arrow
                } else if self.match_char('=') {
                    if self.match_char('=') {
                        TokenKind::EqualEqualEqual
                    } else {
                        TokenKind::EqualEqual
                    }
                } else {
                    TokenKind::Equal
                }
            }
            '!' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        TokenKind::BangEqualEqual
                    } else {
                        TokenKind::BangEqual
                    }
                } else {
                    TokenKind::Bang
                }
            }
            '<' => {
                if self.match_char('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.match_char('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            '&' => {
                if self.match_char('&') {
                    TokenKind::AmpAmp
                } else {
                    return Err(self.error("unexpected character '&'", start_offset, start_line, start_column));
                }
            }
            '|' => {
                if self.match_char('|') {
                    TokenKind::PipePipe
                } else {
                    return Err(self.error("unexpected character '|'", start_offset, start_line, start_column));
                }
            }
            '\'' | '"' => self.scan_string(ch, start_offset, start_line, start_column)?,
            c if c.is_ascii_digit() => self.scan_number(start_offset),
            c if is_identifier_start(c) => self.scan_identifier(start_offset),
            c => {
                return Err(self.error(
                    &format!("unexpected character '{}'", c),
                    start_offset,
                    start_line,
                    start_column,
                ))
            }
        };

        Ok(Token {
            kind,
            span: Span::new(start_offset, self.current_offset(), start_line, start_column),
        })
    }

    fn scan_string(
        &mut self,
        quote: char,
        start_offset: usize,
        start_line: usize,
        start_column: usize,
    ) -> Result<TokenKind, LexError> {
        let mut value = String::new();

        loop {
            if self.is_at_end() {
                return Err(self.error("unterminated string", start_offset, start_line, start_column));
            }
            let ch = self.advance();
            if ch == quote {
                break;
            }
            if ch == '\n' {
                return Err(self.error("unterminated string", start_offset, start_line, start_column));
            }
            if ch == '\\' {
                if self.is_at_end() {
                    return Err(self.error("unterminated string", start_offset, start_line, start_column));
                }
                let escaped = self.advance();
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '\\' => value.push('\\'),
                    '\'' => value.push('\''),
                    '"' => value.push('"'),
                    other => {
                        value.push('\\');
                        value.push(other);
                    }
                }
            } else {
                value.push(ch);
            }
        }

        Ok(TokenKind::String(value))
    }

    fn scan_number(&mut self, start_offset: usize) -> TokenKind {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.source[start_offset..self.current_offset()];
        TokenKind::Number(text.parse().unwrap_or(f64::NAN))
    }

    fn scan_identifier(&mut self, start_offset: usize) -> TokenKind {
        while self.peek().is_some_and(is_identifier_continue) {
            self.advance();
        }

        let text = &self.source[start_offset..self.current_offset()];
        match text {
            "let" => TokenKind::Let,
            "const" => TokenKind::Const,
            "var" => TokenKind::Let,
            "function" => TokenKind::Function,
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            "undefined" => TokenKind::Undefined,
            "import" => TokenKind::Import,
            "export" => TokenKind::Export,
            "from" => TokenKind::From,
            "default" => TokenKind::Default,
            _ => TokenKind::Identifier(text.to_string()),
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                Some('/') if self.peek_ahead(1) == Some('*') => {
                    self.advance();
                    self.advance();
                    while !self.is_at_end() {
                        if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                            self.advance();
                            self.advance();
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    fn current_offset(&self) -> usize {
        self.chars
            .get(self.position)
            .map(|(offset, _)| *offset)
            .unwrap_or(self.source.len())
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).map(|(_, c)| *c)
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).map(|(_, c)| *c)
    }

    fn advance(&mut self) -> char {
        let (_, ch) = self.chars[self.position];
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        ch
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error(&self, message: &str, start: usize, line: usize, column: usize) -> LexError {
        LexError {
            message: message.to_string(),
            span: Span::new(start, self.current_offset(), line, column),
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("const greet = name"),
            vec![
                TokenKind::Const,
                TokenKind::Identifier("greet".to_string()),
                TokenKind::Equal,
                TokenKind::Identifier("name".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_arrow_vs_comparison() {
        assert_eq!(
            kinds("a => a >= 1"),
            vec![
                TokenKind::Identifier("a".to_string()),
                TokenKind::Arrow,
                TokenKind::Identifier("a".to_string()),
                TokenKind::GreaterEqual,
                TokenKind::Number(1.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_equality_operator_tiers() {
        assert_eq!(
            kinds("a == b === c != d !== e"),
            vec![
                TokenKind::Identifier("a".to_string()),
                TokenKind::EqualEqual,
                TokenKind::Identifier("b".to_string()),
                TokenKind::EqualEqualEqual,
                TokenKind::Identifier("c".to_string()),
                TokenKind::BangEqual,
                TokenKind::Identifier("d".to_string()),
                TokenKind::BangEqualEqual,
                TokenKind::Identifier("e".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#"'Hello, ' + "World\n""#),
            vec![
                TokenKind::String("Hello, ".to_string()),
                TokenKind::Plus,
                TokenKind::String("World\n".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_trivia() {
        assert_eq!(
            kinds("1 // line\n/* block\nstill block */ 2"),
            vec![TokenKind::Number(1.0), TokenKind::Number(2.0), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_string_fails() {
        assert!(Lexer::new("'oops").tokenize().is_err());
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens = Lexer::new("let x = 1").tokenize().unwrap();
        let source = "let x = 1";

        assert_eq!(&source[tokens[0].span.start..tokens[0].span.end], "let");
        assert_eq!(&source[tokens[1].span.start..tokens[1].span.end], "x");
        assert_eq!(&source[tokens[3].span.start..tokens[3].span.end], "1");
    }
}
