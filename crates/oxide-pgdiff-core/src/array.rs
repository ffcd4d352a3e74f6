//! Decoder for PostgreSQL array literals.
//!
//! The catalog hands back arrays such as `conkey` or aggregated enum labels
//! in their text form, e.g. `{1,2}` or `{draft,"in review"}`. This module
//! turns that text into an ordered list of item strings. Nested arrays are
//! not supported since the catalog queries never produce them.

/// What went wrong while scanning an array literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArrayParseErrorKind {
    /// The literal does not start with `{`.
    #[error("expected '{{'")]
    ExpectedOpenBrace,
    /// A `{` appeared inside the array.
    #[error("nested arrays are not supported")]
    NestedArray,
    /// An unexpected character was found after an item.
    #[error("unexpected character '{0}'")]
    Unexpected(char),
    /// The input ended before the closing `}`.
    #[error("unterminated array")]
    UnterminatedArray,
    /// The input ended inside a quoted item.
    #[error("unterminated quoted item")]
    UnterminatedQuote,
    /// Non-whitespace input follows the closing `}`.
    #[error("trailing input after '}}'")]
    TrailingInput,
}

/// An array literal decoding error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid array literal: {kind} at byte {offset}")]
pub struct ArrayParseError {
    /// The error kind.
    pub kind: ArrayParseErrorKind,
    /// Byte offset into the input where the error was detected.
    pub offset: usize,
}

/// Decodes a PostgreSQL array literal into its items.
///
/// ```rust
/// use oxide_pgdiff_core::array::parse_array_literal;
///
/// let items = parse_array_literal(r#"{draft,"in review",done}"#).unwrap();
/// assert_eq!(items, vec!["draft", "in review", "done"]);
/// ```
pub fn parse_array_literal(input: &str) -> Result<Vec<String>, ArrayParseError> {
    ArrayScanner::new(input).parse()
}

/// A single-pass scanner over an array literal.
struct ArrayScanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ArrayScanner<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    const fn error(&self, kind: ArrayParseErrorKind) -> ArrayParseError {
        ArrayParseError {
            kind,
            offset: self.pos,
        }
    }

    fn parse(mut self) -> Result<Vec<String>, ArrayParseError> {
        self.skip_whitespace();
        if self.advance() != Some('{') {
            return Err(self.error(ArrayParseErrorKind::ExpectedOpenBrace));
        }

        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some('}') {
            self.advance();
        } else {
            loop {
                items.push(self.scan_item()?);
                self.skip_whitespace();
                match self.advance() {
                    Some(',') => {}
                    Some('}') => break,
                    Some(c) => return Err(self.error(ArrayParseErrorKind::Unexpected(c))),
                    None => return Err(self.error(ArrayParseErrorKind::UnterminatedArray)),
                }
            }
        }

        self.skip_whitespace();
        if self.peek().is_some() {
            return Err(self.error(ArrayParseErrorKind::TrailingInput));
        }
        Ok(items)
    }

    fn scan_item(&mut self) -> Result<String, ArrayParseError> {
        self.skip_whitespace();
        if self.peek() == Some('"') {
            self.advance();
            return self.scan_quoted();
        }

        let mut item = String::new();
        loop {
            match self.peek() {
                Some(',' | '}') => return Ok(item),
                Some('{') => return Err(self.error(ArrayParseErrorKind::NestedArray)),
                Some('\\') => {
                    self.advance();
                    match self.advance() {
                        Some(c) => item.push(c),
                        None => return Err(self.error(ArrayParseErrorKind::UnterminatedArray)),
                    }
                }
                Some(c) => {
                    self.advance();
                    if !c.is_whitespace() {
                        item.push(c);
                    }
                }
                None => return Err(self.error(ArrayParseErrorKind::UnterminatedArray)),
            }
        }
    }

    fn scan_quoted(&mut self) -> Result<String, ArrayParseError> {
        let mut item = String::new();
        loop {
            match self.advance() {
                Some('"') => return Ok(item),
                Some('\\') => match self.advance() {
                    Some(c) => item.push(c),
                    None => return Err(self.error(ArrayParseErrorKind::UnterminatedQuote)),
                },
                Some(c) => item.push(c),
                None => return Err(self.error(ArrayParseErrorKind::UnterminatedQuote)),
            }
        }
    }
}
