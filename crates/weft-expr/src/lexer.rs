//! Tokenizer for bind-string expressions.
//!
//! Produces a flat token stream for the recursive-descent parser. The
//! token set is small on purpose: identifiers, number and string
//! literals, and the three punctuation characters of call syntax.

use crate::error::ParseError;

/// Token kinds in a bind-string expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    Str,
    LParen,
    RParen,
    Comma,
}

/// One token, with its source offset for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// For `Str` this is the decoded payload; for everything else the
    /// source text.
    pub text: String,
    pub offset: usize,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }
}

/// Whether `c` may appear in an identifier (and therefore in an
/// attribute-bind field name or a `->` output name).
#[must_use]
pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Tokenize `input`, reporting the first invalid character.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '(' => {
                tokens.push(Token::new(TokenKind::LParen, "(", offset));
                i += 1;
            }
            ')' => {
                tokens.push(Token::new(TokenKind::RParen, ")", offset));
                i += 1;
            }
            ',' => {
                tokens.push(Token::new(TokenKind::Comma, ",", offset));
                i += 1;
            }
            '\'' | '"' => {
                let (token, next) = scan_string(input, &chars, i)?;
                tokens.push(token);
                i = next;
            }
            c if c.is_ascii_digit() => {
                let (token, next) = scan_number(&chars, i);
                tokens.push(token);
                i = next;
            }
            '-' if matches!(chars.get(i + 1), Some((_, d)) if d.is_ascii_digit()) => {
                let (token, next) = scan_number(&chars, i);
                tokens.push(token);
                i = next;
            }
            c if is_ident_start(c) => {
                let start = i;
                while i < chars.len() && is_ident_char(chars[i].1) {
                    i += 1;
                }
                let text: String = chars[start..i].iter().map(|(_, c)| *c).collect();
                tokens.push(Token::new(TokenKind::Ident, text, offset));
            }
            other => {
                return Err(ParseError::InvalidChar {
                    found: other,
                    offset,
                    src: input.to_string(),
                });
            }
        }
    }

    Ok(tokens)
}

fn scan_number(chars: &[(usize, char)], start: usize) -> (Token, usize) {
    let offset = chars[start].0;
    let mut i = start;
    if chars[i].1 == '-' {
        i += 1;
    }
    while i < chars.len() && chars[i].1.is_ascii_digit() {
        i += 1;
    }
    if i < chars.len()
        && chars[i].1 == '.'
        && matches!(chars.get(i + 1), Some((_, d)) if d.is_ascii_digit())
    {
        i += 1;
        while i < chars.len() && chars[i].1.is_ascii_digit() {
            i += 1;
        }
    }
    let text: String = chars[start..i].iter().map(|(_, c)| *c).collect();
    (Token::new(TokenKind::Number, text, offset), i)
}

fn scan_string(
    input: &str,
    chars: &[(usize, char)],
    start: usize,
) -> Result<(Token, usize), ParseError> {
    let (offset, quote) = chars[start];
    let mut decoded = String::new();
    let mut i = start + 1;

    while i < chars.len() {
        let c = chars[i].1;
        if c == quote {
            return Ok((Token::new(TokenKind::Str, decoded, offset), i + 1));
        }
        if c == '\\' {
            let escaped = chars.get(i + 1).map(|(_, e)| *e).ok_or_else(|| {
                ParseError::UnterminatedString {
                    src: input.to_string(),
                }
            })?;
            decoded.push(match escaped {
                'n' => '\n',
                't' => '\t',
                other => other,
            });
            i += 2;
        } else {
            decoded.push(c);
            i += 1;
        }
    }

    Err(ParseError::UnterminatedString {
        src: input.to_string(),
    })
}
