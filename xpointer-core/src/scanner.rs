//! Tokenizer for the XPointer Framework grammar.
//!
//! ```text
//! Pointer      := Shorthand | SchemeBased
//! Shorthand    := NCName
//! SchemeBased  := PointerPart (S? PointerPart)*
//! PointerPart  := QName '(' SchemeData ')'
//! SchemeData   := EscapedData*
//! EscapedData  := NormalChar | '^(' | '^)' | '^^' | '(' SchemeData ')'
//! ```
//!
//! A scheme-based pointer part scans to
//! `SchemeName, OpenParen, SchemeData, CloseParen`. Scheme data keeps
//! balanced nested parentheses verbatim and unescapes the `^` escapes.
//! Data without escapes is borrowed from the input.

use std::borrow::Cow;

use memchr::memchr3;

use crate::chars::{classify, scan_ncname, CharClass};
use crate::error::{ErrorCode, Result, XPointerError};

/// A framework-level token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    OpenParen,
    CloseParen,
    /// Bare NCName pointer
    Shorthand(&'a str),
    /// Scheme QName; `prefix` is `None` for unprefixed names
    SchemeName {
        prefix: Option<&'a str>,
        local: &'a str,
    },
    /// Unescaped scheme data
    SchemeData(Cow<'a, str>),
}

impl Token<'_> {
    /// Full scheme name (`prefix:local` or `local`).
    pub fn qualified_name(prefix: Option<&str>, local: &str) -> String {
        match prefix {
            Some(prefix) => format!("{}:{}", prefix, local),
            None => local.to_string(),
        }
    }
}

/// Tokenize a complete XPointer expression.
pub fn tokenize(expression: &str) -> Result<Vec<Token<'_>>> {
    let mut scanner = Scanner::new(expression);
    scanner.scan_expression()?;
    Ok(scanner.tokens)
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    tokens: Vec<Token<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn error(&self, code: ErrorCode) -> XPointerError {
        XPointerError::new(code, self.input)
    }

    #[inline]
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if classify(ch) != CharClass::Whitespace {
                break;
            }
            self.pos += 1;
        }
    }

    fn scan_expression(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.pos == self.input.len() {
            return Err(self.error(ErrorCode::EmptyXPointerExpression));
        }

        while let Some(ch) = self.peek() {
            match classify(ch) {
                CharClass::CloseParen => return Err(self.error(ErrorCode::UnbalancedParenthesis)),
                CharClass::OpenParen => return Err(self.error(ErrorCode::InvalidXPointerExpression)),
                _ => self.scan_pointer_part()?,
            }
            self.skip_whitespace();
        }
        Ok(())
    }

    fn scan_name(&mut self) -> Result<&'a str> {
        let len = scan_ncname(self.rest());
        if len == 0 {
            let code = if self.tokens.is_empty() {
                ErrorCode::InvalidShortHandPointer
            } else {
                ErrorCode::InvalidXPointerToken
            };
            return Err(self.error(code));
        }
        let name = &self.rest()[..len];
        self.pos += len;
        Ok(name)
    }

    /// Scan one pointer part: a shorthand name or `QName(data)`.
    fn scan_pointer_part(&mut self) -> Result<()> {
        let first = self.scan_name()?;

        let (prefix, local) = if self.peek() == Some(':') {
            self.pos += 1;
            let local_len = scan_ncname(self.rest());
            if local_len == 0 {
                return Err(self.error(ErrorCode::InvalidXPointerToken));
            }
            let local = &self.rest()[..local_len];
            self.pos += local_len;
            (Some(first), local)
        } else {
            (None, first)
        };

        match self.peek().map(classify) {
            Some(CharClass::OpenParen) => {
                self.tokens.push(Token::SchemeName { prefix, local });
                self.scan_scheme_body()
            }
            // A shorthand pointer is a bare NCName; a QName only ever names a scheme.
            None | Some(CharClass::Whitespace) if prefix.is_none() => {
                self.tokens.push(Token::Shorthand(local));
                Ok(())
            }
            _ => Err(self.error(ErrorCode::InvalidXPointerExpression)),
        }
    }

    /// Scan `'(' SchemeData ')'`, checking the part's parentheses balance.
    fn scan_scheme_body(&mut self) -> Result<()> {
        self.pos += 1;
        self.tokens.push(Token::OpenParen);
        let open_count = 1usize;

        let start = self.pos;
        let mut unescaped = String::new();
        self.scan_data(&mut unescaped)?;
        let raw = &self.input[start..self.pos];
        // Every escape shortens the data by one byte.
        let data = if unescaped.len() == raw.len() {
            Cow::Borrowed(raw)
        } else {
            Cow::Owned(unescaped)
        };
        self.tokens.push(Token::SchemeData(data));

        self.pos += 1;
        self.tokens.push(Token::CloseParen);
        let mut close_count = 1usize;
        while self.peek() == Some(')') {
            close_count += 1;
            self.pos += 1;
        }
        if open_count != close_count {
            return Err(self.error(ErrorCode::UnbalancedParenthesis));
        }
        Ok(())
    }

    /// Scan scheme data up to (not including) the `)` that closes it.
    ///
    /// Nested `(...)` groups are copied through verbatim; `depth` counts the
    /// groups still open.
    fn scan_data(&mut self, out: &mut String) -> Result<()> {
        let mut depth = 0usize;
        loop {
            let rest = self.rest();
            let Some(offset) = memchr3(b'(', b')', b'^', rest.as_bytes()) else {
                return Err(self.error(ErrorCode::SchemeDataNotFollowedByCloseParenthesis));
            };
            out.push_str(&rest[..offset]);
            self.pos += offset;

            match rest.as_bytes()[offset] {
                b'(' => {
                    out.push('(');
                    self.pos += 1;
                    depth += 1;
                }
                b')' if depth == 0 => return Ok(()),
                b')' => {
                    out.push(')');
                    self.pos += 1;
                    depth -= 1;
                }
                _ => match self.input.as_bytes().get(self.pos + 1) {
                    Some(&escaped @ (b'(' | b')' | b'^')) => {
                        out.push(escaped as char);
                        self.pos += 2;
                    }
                    Some(_) => return Err(self.error(ErrorCode::InvalidSchemeData)),
                    None => {
                        return Err(self.error(ErrorCode::SchemeDataNotFollowedByCloseParenthesis))
                    }
                },
            }
        }
    }
}
