//! Pattern parser
//!
//! A recursive descent parser for destructuring patterns and the small
//! expression subset allowed inside them. It builds the [`Pattern`] model
//! consumed by the destructuring compiler.

use crate::ast::*;
use crate::error::{messages, Error, Result, SourceLocation};
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

/// A recursive descent parser for patterns
pub struct Parser<'src> {
    /// Source code (kept for error messages)
    source: &'src str,
    /// Tokens to parse
    tokens: Vec<Token<'src>>,
    /// Current position in tokens
    pos: usize,
}

impl<'src> Parser<'src> {
    /// Create a new parser from source code
    pub fn new(source: &'src str) -> Result<Self> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            source,
            tokens,
            pos: 0,
        })
    }

    // ========== Token Access ==========

    fn current(&self) -> &Token<'src> {
        &self.tokens[self.pos]
    }

    fn peek(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    fn location(&self) -> SourceLocation {
        self.current().location
    }

    /// End location of the previously consumed token
    fn previous_end(&self) -> SourceLocation {
        let token = &self.tokens[self.pos.saturating_sub(1)];
        SourceLocation {
            line: token.location.line,
            column: token.location.column + token.text.chars().count() as u32,
            offset: token.location.offset + token.text.len(),
        }
    }

    /// Create a parse error with source context
    fn error(&self, message: impl Into<String>, location: SourceLocation) -> Error {
        Error::parse_error_with_context(message, location, self.source)
    }

    fn unexpected(&self) -> Error {
        let found = match self.peek() {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.current().text),
        };
        self.error(messages::unexpected_token(&found), self.location())
    }

    fn advance(&mut self) -> &Token<'src> {
        let token = &self.tokens[self.pos];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&Token<'src>> {
        if self.peek() == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected())
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_eof(&self) -> Result<()> {
        if self.peek() == TokenKind::Eof {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    // ========== Patterns ==========

    /// Parse an array or object pattern
    pub fn parse_pattern(&mut self) -> Result<Pattern> {
        match self.peek() {
            TokenKind::LeftBracket => self.parse_array_pattern(),
            TokenKind::LeftBrace => self.parse_object_pattern(),
            _ => {
                let loc = self.location();
                Err(self.error("Expected destructuring pattern", loc))
            }
        }
    }

    fn parse_target(&mut self) -> Result<Target> {
        match self.peek() {
            TokenKind::LeftBracket | TokenKind::LeftBrace => Ok(self.parse_pattern()?.into()),
            TokenKind::Identifier => Ok(Target::Name(self.parse_identifier()?)),
            TokenKind::Keyword(_) => {
                let loc = self.location();
                Err(self.error(
                    format!("Unexpected reserved word '{}' in binding position", self.current().text),
                    loc,
                ))
            }
            _ => {
                let loc = self.location();
                Err(self.error("Expected identifier or destructuring pattern", loc))
            }
        }
    }

    fn parse_default(&mut self) -> Result<Option<Expression>> {
        if self.consume(TokenKind::Equals) {
            Ok(Some(self.parse_expression()?))
        } else {
            Ok(None)
        }
    }

    fn parse_array_pattern(&mut self) -> Result<Pattern> {
        let start = self.location();
        self.expect(TokenKind::LeftBracket)?;

        let mut elements = Vec::new();
        let mut rest = None;

        while !self.consume(TokenKind::RightBracket) {
            let elem_start = self.location();
            if self.consume(TokenKind::Comma) {
                elements.push(ArrayElement::Hole(Span::new(elem_start, elem_start)));
                continue;
            }

            if self.consume(TokenKind::DotDotDot) {
                rest = Some(Box::new(self.parse_target()?));
                if self.peek() != TokenKind::RightBracket {
                    let loc = self.location();
                    return Err(self.error(messages::REST_NOT_LAST, loc));
                }
                self.advance();
                break;
            }

            let target = self.parse_target()?;
            let default = self.parse_default()?;
            elements.push(ArrayElement::Binding(BindingElement {
                target,
                default,
                span: Span::new(elem_start, self.previous_end()),
            }));

            if !self.consume(TokenKind::Comma) {
                self.expect(TokenKind::RightBracket)?;
                break;
            }
        }

        Ok(Pattern::Array(ArrayPattern {
            elements,
            rest,
            span: Span::new(start, self.previous_end()),
        }))
    }

    fn parse_object_pattern(&mut self) -> Result<Pattern> {
        let start = self.location();
        self.expect(TokenKind::LeftBrace)?;

        let mut properties = Vec::new();
        let mut rest = None;

        while !self.consume(TokenKind::RightBrace) {
            if self.consume(TokenKind::DotDotDot) {
                if self.peek() != TokenKind::Identifier {
                    let loc = self.location();
                    return Err(self.error(messages::INVALID_REST_TARGET, loc));
                }
                rest = Some(Box::new(Target::Name(self.parse_identifier()?)));
                if self.peek() != TokenKind::RightBrace {
                    let loc = self.location();
                    return Err(self.error(messages::REST_NOT_LAST, loc));
                }
                self.advance();
                break;
            }

            properties.push(self.parse_property_binding()?);

            if !self.consume(TokenKind::Comma) {
                self.expect(TokenKind::RightBrace)?;
                break;
            }
        }

        Ok(Pattern::Object(ObjectPattern {
            properties,
            rest,
            span: Span::new(start, self.previous_end()),
        }))
    }

    fn parse_property_binding(&mut self) -> Result<PropertyBinding> {
        let start = self.location();
        let key = self.parse_property_key()?;

        // Shorthand {foo} or {foo = default}
        if !key.is_computed() && self.peek() != TokenKind::Colon {
            let id = match &key {
                PropertyKey::Identifier(id) if Keyword::from_str(&id.name).is_none() => id.clone(),
                _ => return Err(self.error("Shorthand property must be an identifier", start)),
            };
            let default = self.parse_default()?;
            return Ok(PropertyBinding {
                key,
                target: Target::Name(id),
                default,
                shorthand: true,
                span: Span::new(start, self.previous_end()),
            });
        }

        self.expect(TokenKind::Colon)?;
        let target = self.parse_target()?;
        let default = self.parse_default()?;

        Ok(PropertyBinding {
            key,
            target,
            default,
            shorthand: false,
            span: Span::new(start, self.previous_end()),
        })
    }

    fn parse_property_key(&mut self) -> Result<PropertyKey> {
        if self.consume(TokenKind::LeftBracket) {
            let expr = self.parse_expression()?;
            self.expect(TokenKind::RightBracket)?;
            return Ok(PropertyKey::Computed(Box::new(expr)));
        }

        match self.peek() {
            TokenKind::Identifier | TokenKind::Keyword(_) => {
                let token = self.advance();
                let id = Identifier::new(
                    token.text,
                    Span::new(token.location, token.location),
                );
                Ok(PropertyKey::Identifier(id))
            }
            TokenKind::StringLiteral => {
                let text = self.advance().text;
                Ok(PropertyKey::String(self.parse_string_value(text)))
            }
            TokenKind::NumberLiteral => {
                let text = self.advance().text;
                Ok(PropertyKey::Number(self.parse_number_value(text)?))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_identifier(&mut self) -> Result<Identifier> {
        let start = self.location();
        let name = self.expect(TokenKind::Identifier)?.text.to_string();
        Ok(Identifier::new(name, Span::new(start, self.previous_end())))
    }

    // ========== Expressions ==========

    /// Parse an expression from the pattern subset
    pub fn parse_expression(&mut self) -> Result<Expression> {
        let start = self.location();
        match self.peek() {
            TokenKind::NumberLiteral | TokenKind::Minus => {
                let negative = self.consume(TokenKind::Minus);
                let text = self.expect(TokenKind::NumberLiteral)?.text;
                let n = self.parse_number_value(text)?;
                Ok(self.literal(LiteralValue::Number(if negative { -n } else { n }), start))
            }
            TokenKind::StringLiteral => {
                let text = self.advance().text;
                let s = self.parse_string_value(text);
                Ok(self.literal(LiteralValue::String(s), start))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(self.literal(LiteralValue::Null, start))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(self.literal(LiteralValue::Boolean(true), start))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(self.literal(LiteralValue::Boolean(false), start))
            }
            TokenKind::Identifier => {
                let id = self.parse_identifier()?;
                if !self.consume(TokenKind::LeftParen) {
                    return Ok(Expression::Identifier(id));
                }
                let arguments = self.parse_list(TokenKind::RightParen, Self::parse_expression)?;
                Ok(Expression::Call(Box::new(CallExpression {
                    callee: id,
                    arguments,
                    span: Span::new(start, self.previous_end()),
                })))
            }
            TokenKind::LeftBracket => {
                self.advance();
                let elements = self.parse_list(TokenKind::RightBracket, Self::parse_expression)?;
                Ok(Expression::Array(ArrayExpression {
                    elements,
                    span: Span::new(start, self.previous_end()),
                }))
            }
            TokenKind::LeftBrace => {
                self.advance();
                let properties = self.parse_list(TokenKind::RightBrace, |p| {
                    let key = p.parse_property_key()?;
                    p.expect(TokenKind::Colon)?;
                    Ok((key, p.parse_expression()?))
                })?;
                Ok(Expression::Object(ObjectExpression {
                    properties,
                    span: Span::new(start, self.previous_end()),
                }))
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Parse `item (, item)* ,?` up to and including `close`
    fn parse_list<T>(
        &mut self,
        close: TokenKind,
        mut item: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while !self.consume(close) {
            items.push(item(self)?);
            if !self.consume(TokenKind::Comma) {
                self.expect(close)?;
                break;
            }
        }
        Ok(items)
    }

    fn literal(&self, value: LiteralValue, start: SourceLocation) -> Expression {
        Expression::Literal(Literal {
            value,
            span: Span::new(start, self.previous_end()),
        })
    }

    // ========== Literal Values ==========

    fn parse_string_value(&self, text: &str) -> String {
        // Remove quotes and process escapes
        let inner = &text[1..text.len() - 1];
        let mut result = String::new();
        let mut chars = inner.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '\\' {
                result.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('0') => result.push('\0'),
                Some('x') => {
                    let hex: String = chars.by_ref().take(2).collect();
                    if let Ok(code) = u8::from_str_radix(&hex, 16) {
                        result.push(code as char);
                    }
                }
                Some('u') => {
                    let hex: String = if chars.peek() == Some(&'{') {
                        chars.next();
                        chars.by_ref().take_while(|&c| c != '}').collect()
                    } else {
                        chars.by_ref().take(4).collect()
                    };
                    if let Some(c) = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                        result.push(c);
                    }
                }
                Some(other) => result.push(other),
                None => {}
            }
        }

        result
    }

    fn parse_number_value(&self, text: &str) -> Result<f64> {
        // Remove numeric separators
        let clean: String = text.chars().filter(|&c| c != '_').collect();
        let radix = match clean.get(..2) {
            Some("0x" | "0X") => Some(16),
            Some("0b" | "0B") => Some(2),
            Some("0o" | "0O") => Some(8),
            _ => None,
        };

        let loc = self.location();
        let parsed = match radix {
            Some(radix) => i64::from_str_radix(&clean[2..], radix).map(|n| n as f64).ok(),
            None => clean.parse::<f64>().ok(),
        };
        parsed.ok_or_else(|| self.error(format!("Invalid number: {}", text), loc))
    }
}

/// Parse a destructuring pattern
pub fn parse_pattern(source: &str) -> Result<Pattern> {
    let mut parser = Parser::new(source)?;
    let pattern = parser.parse_pattern()?;
    parser.expect_eof()?;
    Ok(pattern)
}

/// Parse a single expression from the pattern subset
pub fn parse_expression(source: &str) -> Result<Expression> {
    let mut parser = Parser::new(source)?;
    let expr = parser.parse_expression()?;
    parser.expect_eof()?;
    Ok(expr)
}
