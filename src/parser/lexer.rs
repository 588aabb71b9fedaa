//! Lexical analysis utilities

use super::error::{ParseError, ParseResult};
use super::span::Spanned;
use super::tokenizer::Token;
use std::mem::discriminant;

/// Check if a character can start an identifier
pub fn is_identifier_start(c: char) -> bool {
    unicode_xid::UnicodeXID::is_xid_start(c) || c == '_'
}

/// Check if a character can continue an identifier
pub fn is_identifier_continue(c: char) -> bool {
    unicode_xid::UnicodeXID::is_xid_continue(c)
}

/// Token stream with lookahead and backtracking
#[derive(Debug)]
pub struct TokenStream<'input> {
    tokens: Vec<Spanned<Token<'input>>>,
    position: usize,
    input_len: usize,
}

impl<'input> TokenStream<'input> {
    /// Create a new token stream; `input_len` positions end-of-input errors
    pub fn new(tokens: Vec<Spanned<Token<'input>>>, input_len: usize) -> Self {
        Self {
            tokens,
            position: 0,
            input_len,
        }
    }

    /// Peek at the current token without consuming
    pub fn peek(&self) -> Option<&Spanned<Token<'input>>> {
        self.tokens.get(self.position)
    }

    /// Peek at a token n positions ahead
    pub fn peek_ahead(&self, n: usize) -> Option<&Spanned<Token<'input>>> {
        self.tokens.get(self.position + n)
    }

    /// Consume and return the current token
    pub fn next(&mut self) -> Option<Spanned<Token<'input>>> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Check if we're at the end of the stream
    pub fn is_eof(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Get the current position in the stream
    pub fn position(&self) -> usize {
        self.position
    }

    /// Reset to a previous position
    pub fn reset_to(&mut self, position: usize) {
        self.position = position.min(self.tokens.len());
    }

    /// Byte offset of the current token, or the input length at EOF
    pub fn offset(&self) -> usize {
        self.peek().map_or(self.input_len, |t| t.start)
    }

    /// End byte offset of the most recently consumed token
    pub fn last_end(&self) -> usize {
        self.position
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(0, |t| t.end)
    }

    /// Consume a token if it matches the predicate
    pub fn consume_if<F>(&mut self, predicate: F) -> Option<Spanned<Token<'input>>>
    where
        F: FnOnce(&Token<'input>) -> bool,
    {
        match self.peek() {
            Some(token) if predicate(&token.value) => self.next(),
            _ => None,
        }
    }

    /// Consume a token of the same kind as `expected`
    pub fn expect(&mut self, expected: Token<'input>) -> ParseResult<Spanned<Token<'input>>> {
        let matches = self
            .peek()
            .is_some_and(|t| discriminant(&t.value) == discriminant(&expected));
        match self.next() {
            Some(token) if matches => Ok(token),
            Some(token) => Err(ParseError::ExpectedToken {
                expected: format!("'{expected}'"),
                position: token.start,
            }),
            None => Err(self.unexpected_eof()),
        }
    }

    /// Error for the current token, or for end of input
    pub fn unexpected(&self) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken {
                token: token.value.to_string(),
                position: token.start,
            },
            None => self.unexpected_eof(),
        }
    }

    fn unexpected_eof(&self) -> ParseError {
        ParseError::UnexpectedEndOfInput {
            position: self.input_len,
        }
    }
}
