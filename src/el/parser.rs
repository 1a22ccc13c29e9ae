//! Hand-rolled LL(1) parser for dotted property paths.
//!
//! The grammar has a single production (`Expr := Identifier ('.' Identifier)*`),
//! so the parser is a byte cursor with one token of effective lookahead: read an
//! identifier, then keep consuming `.` + identifier pairs until end of input.
//! Identifiers start with an ASCII letter or underscore and continue with ASCII
//! alphanumerics or underscores.

use crate::el::Expression;
use crate::{Error, Result};

/// Parse an expression text into an [`Expression`] chain rooted at argument 0.
///
/// # Errors
///
/// Returns [`Error::Parse`] with the byte offset of the offending character for:
/// empty input, an identifier starting with an invalid character, a path that
/// ends in a dangling `.`, or trailing characters after the path.
pub fn parse(text: &str) -> Result<Expression> {
    let mut parser = Parser {
        text,
        bytes: text.as_bytes(),
        position: 0,
    };
    parser.expression()
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    position: usize,
}

impl Parser<'_> {
    fn expression(&mut self) -> Result<Expression> {
        if self.bytes.is_empty() {
            return Err(self.error("empty expression"));
        }

        let mut expression = Expression::argument(0).property(self.identifier()?);

        while self.position < self.bytes.len() {
            if self.bytes[self.position] != b'.' {
                return Err(self.error("expected '.'"));
            }
            self.position += 1;
            expression = expression.property(self.identifier()?);
        }

        Ok(expression)
    }

    fn identifier(&mut self) -> Result<String> {
        let start = self.position;

        match self.bytes.get(self.position) {
            Some(byte) if byte.is_ascii_alphabetic() || *byte == b'_' => {
                self.position += 1;
            }
            Some(_) => return Err(self.error("expected identifier")),
            None => return Err(self.error("unterminated property path")),
        }

        while self
            .bytes
            .get(self.position)
            .is_some_and(|byte| byte.is_ascii_alphanumeric() || *byte == b'_')
        {
            self.position += 1;
        }

        Ok(self.text[start..self.position].to_string())
    }

    fn error(&self, message: &str) -> Error {
        Error::Parse {
            message: message.to_string(),
            expression: self.text.to_string(),
            position: self.position,
        }
    }
}
