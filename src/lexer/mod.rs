//! Lexer for destructuring patterns
//!
//! Produces tokens for the subset of JavaScript that appears in binding and
//! assignment patterns: identifiers, reserved words, numeric and string
//! literals, and the punctuators `()[]{},:=-...`.

mod token;

pub use token::{Keyword, Token, TokenKind};

use crate::error::{Error, Result, SourceLocation};

/// A lexer for pattern source code
pub struct Lexer<'src> {
    /// Source code being lexed
    source: &'src str,
    /// Current position in bytes
    pos: usize,
    /// Current line number (1-indexed)
    line: u32,
    /// Current column number (1-indexed)
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Get current source location
    fn location(&self) -> SourceLocation {
        SourceLocation {
            line: self.line,
            column: self.column,
            offset: self.pos,
        }
    }

    /// Create a lexer error with source context
    fn error(&self, message: impl Into<String>, location: SourceLocation) -> Error {
        Error::lexer_error_with_context(message, location, self.source)
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Peek at next character (one ahead)
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advance and return current character
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            match (self.peek(), self.peek_next()) {
                (Some('/'), Some('/')) => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                (Some('/'), Some('*')) => {
                    self.advance();
                    self.advance();
                    while let Some(c) = self.advance() {
                        if c == '*' && self.peek() == Some('/') {
                            self.advance();
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Check if character can start an identifier
    fn is_id_start(c: char) -> bool {
        c == '_' || c == '$' || unicode_xid::UnicodeXID::is_xid_start(c)
    }

    /// Check if character can continue an identifier
    fn is_id_continue(c: char) -> bool {
        c == '_' || c == '$' || unicode_xid::UnicodeXID::is_xid_continue(c)
    }

    /// Scan an identifier or reserved word
    fn scan_identifier(&mut self) -> Token<'src> {
        let start = self.pos;
        let location = self.location();

        while self.peek().is_some_and(Self::is_id_continue) {
            self.advance();
        }

        let text = &self.source[start..self.pos];
        let kind = match Keyword::from_str(text) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier,
        };

        Token {
            kind,
            text,
            location,
        }
    }

    /// Scan a numeric literal
    fn scan_number(&mut self) -> Token<'src> {
        let start = self.pos;
        let location = self.location();

        // Hex, binary, or octal
        if self.peek() == Some('0')
            && matches!(self.peek_next(), Some('x' | 'X' | 'b' | 'B' | 'o' | 'O'))
        {
            self.advance();
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit() || c == '_') {
                self.advance();
            }
            return Token {
                kind: TokenKind::NumberLiteral,
                text: &self.source[start..self.pos],
                location,
            };
        }

        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
                self.advance();
            }
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        Token {
            kind: TokenKind::NumberLiteral,
            text: &self.source[start..self.pos],
            location,
        }
    }

    /// Scan a string literal
    fn scan_string(&mut self, quote: char) -> Result<Token<'src>> {
        let start = self.pos;
        let location = self.location();
        self.advance(); // Opening quote

        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => {
                    return Err(self.error("Unterminated string literal", location));
                }
                Some('\\') => {
                    self.advance();
                    self.advance(); // Escaped character
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                _ => {
                    self.advance();
                }
            }
        }

        Ok(Token {
            kind: TokenKind::StringLiteral,
            text: &self.source[start..self.pos],
            location,
        })
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Result<Token<'src>> {
        self.skip_whitespace_and_comments();

        let location = self.location();
        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                text: "",
                location,
            });
        };

        if Self::is_id_start(c) {
            return Ok(self.scan_identifier());
        }

        if c.is_ascii_digit() || (c == '.' && self.peek_next().is_some_and(|n| n.is_ascii_digit())) {
            return Ok(self.scan_number());
        }

        if c == '"' || c == '\'' {
            return self.scan_string(c);
        }

        let start = self.pos;
        self.advance();

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '=' => TokenKind::Equals,
            '-' => TokenKind::Minus,
            '.' if self.peek() == Some('.') && self.peek_next() == Some('.') => {
                self.advance();
                self.advance();
                TokenKind::DotDotDot
            }
            other => {
                return Err(self.error(format!("Unexpected character '{}'", other), location));
            }
        };

        Ok(Token {
            kind,
            text: &self.source[start..self.pos],
            location,
        })
    }

    /// Tokenize the entire source, ending with an `Eof` token
    pub fn tokenize(&mut self) -> Result<Vec<Token<'src>>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}
