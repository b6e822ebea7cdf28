//! Recursive-descent parser for bind-string expressions.
//!
//! Grammar:
//!
//! ```text
//! expr    := literal | ident | ident '(' [ expr (',' expr)* ] ')'
//! literal := number | string | 'true' | 'false'
//! ```
//!
//! Calls nest to arbitrary depth; there are no operators. The whole
//! input must be one expression — trailing tokens are an error.

use crate::ast::{Expr, ExprKind, Literal};
use crate::error::ParseError;
use crate::lexer::{self, Token, TokenKind};

pub use crate::lexer::is_ident_char;

/// Parse one bind-string expression fragment into an [`Expr`].
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let tokens = lexer::tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty {
            src: input.to_string(),
        });
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        source: input,
    };
    let expr = parser.expr()?;

    if let Some(extra) = parser.peek() {
        return Err(ParseError::Trailing {
            fragment: extra.text.clone(),
            src: input.to_string(),
        });
    }
    Ok(expr)
}

/// Check that every character of `name` is a legal identifier
/// character, reporting the first violation against `source` (the
/// full bind-string the name came from).
pub fn validate_ident(name: &str, source: &str) -> Result<(), ParseError> {
    match name.char_indices().find(|(_, c)| !is_ident_char(*c)) {
        None => Ok(()),
        Some((offset, found)) => Err(ParseError::InvalidChar {
            found,
            offset,
            src: source.to_string(),
        }),
    }
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    source: &'a str,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, ParseError> {
        match self.advance() {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(ParseError::Unexpected {
                expected,
                found: token.text,
                src: self.source.to_string(),
            }),
            None => Err(ParseError::Unexpected {
                expected,
                found: "end of input".into(),
                src: self.source.to_string(),
            }),
        }
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let token = self.advance().ok_or_else(|| ParseError::Unexpected {
            expected: "an expression",
            found: "end of input".into(),
            src: self.source.to_string(),
        })?;

        match token.kind {
            TokenKind::Number => self.number(token),
            TokenKind::Str => Ok(Expr::literal(
                token.text.clone(),
                Literal::Str(token.text),
            )),
            TokenKind::Ident => match token.text.as_str() {
                "true" => Ok(Expr::literal("true", Literal::Bool(true))),
                "false" => Ok(Expr::literal("false", Literal::Bool(false))),
                _ => {
                    if matches!(self.peek(), Some(t) if t.kind == TokenKind::LParen) {
                        self.call(token.text)
                    } else {
                        Ok(Expr::value(token.text))
                    }
                }
            },
            _ => Err(ParseError::Unexpected {
                expected: "an expression",
                found: token.text,
                src: self.source.to_string(),
            }),
        }
    }

    fn number(&self, token: Token) -> Result<Expr, ParseError> {
        let expr = if token.text.contains('.') {
            let value = token.text.parse::<f64>().map_err(|_| self.bad_number(&token))?;
            Expr::literal(token.text.clone(), Literal::Float(value))
        } else {
            let value = token.text.parse::<i64>().map_err(|_| self.bad_number(&token))?;
            Expr::literal(token.text.clone(), Literal::Int(value))
        };
        Ok(expr)
    }

    fn bad_number(&self, token: &Token) -> ParseError {
        ParseError::InvalidNumber {
            fragment: token.text.clone(),
            src: self.source.to_string(),
        }
    }

    fn call(&mut self, name: String) -> Result<Expr, ParseError> {
        self.expect(TokenKind::LParen, "`(`")?;

        let mut args = Vec::new();
        if matches!(self.peek(), Some(t) if t.kind == TokenKind::RParen) {
            self.advance();
            return Ok(Expr::call(name, args));
        }

        loop {
            args.push(self.expr()?);
            let token = self.advance().ok_or_else(|| ParseError::Unexpected {
                expected: "`,` or `)`",
                found: "end of input".into(),
                src: self.source.to_string(),
            })?;
            match token.kind {
                TokenKind::Comma => continue,
                TokenKind::RParen => break,
                _ => {
                    return Err(ParseError::Unexpected {
                        expected: "`,` or `)`",
                        found: token.text,
                        src: self.source.to_string(),
                    });
                }
            }
        }
        Ok(Expr::call(name, args))
    }
}
