//! Tokenizer for conformance text
//!
//! A hand-written byte scanner producing zero-copy tokens. Numeric literals
//! keep their source slice and are converted by the parser, which knows
//! whether a value, a revision or a choice count is expected.

use super::error::{ParseError, ParseResult};
use super::lexer::{is_identifier_continue, is_identifier_start};
use super::span::Spanned;
use std::fmt;

/// Conformance text token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'input> {
    /// Identifier (`LT`, `OnOff`, `desc`, `v3`, `a2`)
    Identifier(&'input str),
    /// Decimal integer literal (`42`)
    Integer(&'input str),
    /// Hexadecimal literal including the prefix (`0x1F`)
    Hex(&'input str),
    /// Decimal literal (`1.5`)
    Decimal(&'input str),
    /// Cross-reference (`<<ref_Scenes>>`, `<<ref_Scenes, Scenes>>`)
    Reference {
        /// Reference id
        id: &'input str,
        /// Display label after the comma
        label: Option<&'input str>,
    },

    /// Negation (`!`)
    Not,
    /// Logical AND (`&`)
    And,
    /// Logical OR (`|`)
    Or,
    /// Logical XOR (`^`)
    Xor,
    /// Equality (`==`)
    Equal,
    /// Inequality (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessThanOrEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterThanOrEqual,
    /// Addition (`+`)
    Plus,
    /// Subtraction or negative sign (`-`)
    Minus,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
    /// Left square bracket
    LeftBracket,
    /// Right square bracket
    RightBracket,
    /// Member separator (`,`)
    Comma,
    /// Choice or status code separator (`.`)
    Dot,
}

impl<'input> Token<'input> {
    /// Get the identifier text, if this is an identifier
    pub fn as_identifier(&self) -> Option<&'input str> {
        match self {
            Token::Identifier(name) => Some(*name),
            _ => None,
        }
    }

    /// Check if the token is the given identifier
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.as_identifier() == Some(keyword)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(s) | Token::Integer(s) | Token::Hex(s) | Token::Decimal(s) => {
                f.write_str(s)
            }
            Token::Reference { id, label: None } => write!(f, "<<{id}>>"),
            Token::Reference {
                id,
                label: Some(label),
            } => write!(f, "<<{id}, {label}>>"),
            Token::Not => f.write_str("!"),
            Token::And => f.write_str("&"),
            Token::Or => f.write_str("|"),
            Token::Xor => f.write_str("^"),
            Token::Equal => f.write_str("=="),
            Token::NotEqual => f.write_str("!="),
            Token::LessThan => f.write_str("<"),
            Token::LessThanOrEqual => f.write_str("<="),
            Token::GreaterThan => f.write_str(">"),
            Token::GreaterThanOrEqual => f.write_str(">="),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Multiply => f.write_str("*"),
            Token::Divide => f.write_str("/"),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::LeftBracket => f.write_str("["),
            Token::RightBracket => f.write_str("]"),
            Token::Comma => f.write_str(","),
            Token::Dot => f.write_str("."),
        }
    }
}

/// Byte scanner over conformance text
pub struct Tokenizer<'input> {
    input: &'input str,
    bytes: &'input [u8],
    pos: usize,
}

impl<'input> Tokenizer<'input> {
    /// Create a tokenizer over `input`
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    /// Current byte offset
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    #[inline(always)]
    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek_byte(0) {
            self.pos += 1;
        }
    }

    /// Scan an identifier; ASCII takes the fast path
    fn scan_identifier(&mut self) -> &'input str {
        let start = self.pos;
        while let Some(ch) = self.input[self.pos..].chars().next() {
            let continues = if ch.is_ascii() {
                ch.is_ascii_alphanumeric() || ch == '_'
            } else {
                is_identifier_continue(ch)
            };
            if !continues {
                break;
            }
            self.pos += ch.len_utf8();
        }
        &self.input[start..self.pos]
    }

    fn scan_number(&mut self) -> Token<'input> {
        let start = self.pos;

        if self.peek_byte(0) == Some(b'0') && matches!(self.peek_byte(1), Some(b'x' | b'X')) {
            self.pos += 2;
            while self.peek_byte(0).is_some_and(|b| b.is_ascii_hexdigit()) {
                self.pos += 1;
            }
            return Token::Hex(&self.input[start..self.pos]);
        }

        while self.peek_byte(0).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }

        let is_decimal =
            self.peek_byte(0) == Some(b'.') && self.peek_byte(1).is_some_and(|b| b.is_ascii_digit());
        if is_decimal {
            self.pos += 1;
            while self.peek_byte(0).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += 1;
            }
            Token::Decimal(&self.input[start..self.pos])
        } else {
            Token::Integer(&self.input[start..self.pos])
        }
    }

    /// Scan `<<id>>` or `<<id, label>>`; the cursor is on the first `<`
    fn scan_reference(&mut self) -> ParseResult<Token<'input>> {
        let start = self.pos;
        let body_start = start + 2;
        let Some(len) = self.input[body_start..].find(">>") else {
            return Err(ParseError::UnclosedReference { position: start });
        };
        let body = &self.input[body_start..body_start + len];
        self.pos = body_start + len + 2;

        let (id, label) = match body.split_once(',') {
            Some((id, label)) => (id.trim(), Some(label.trim())),
            None => (body.trim(), None),
        };
        if id.is_empty() {
            return Err(ParseError::InvalidLiteral {
                literal_type: "reference".to_string(),
                value: body.to_string(),
                position: start,
            });
        }
        Ok(Token::Reference { id, label })
    }

    /// Consume a one- or two-byte operator
    #[inline(always)]
    fn operator(&mut self, second: u8, long: Token<'input>, short: Token<'input>) -> Token<'input> {
        if self.peek_byte(1) == Some(second) {
            self.pos += 2;
            long
        } else {
            self.pos += 1;
            short
        }
    }

    #[inline(always)]
    fn single(&mut self, token: Token<'input>) -> Token<'input> {
        self.pos += 1;
        token
    }

    /// Scan the next token, or `None` at end of input
    pub fn next_token(&mut self) -> ParseResult<Option<Token<'input>>> {
        self.skip_whitespace();

        let Some(byte) = self.peek_byte(0) else {
            return Ok(None);
        };

        let token = match byte {
            b'(' => self.single(Token::LeftParen),
            b')' => self.single(Token::RightParen),
            b'[' => self.single(Token::LeftBracket),
            b']' => self.single(Token::RightBracket),
            b',' => self.single(Token::Comma),
            b'.' => self.single(Token::Dot),
            b'&' => self.single(Token::And),
            b'|' => self.single(Token::Or),
            b'^' => self.single(Token::Xor),
            b'+' => self.single(Token::Plus),
            b'-' => self.single(Token::Minus),
            b'*' => self.single(Token::Multiply),
            b'/' => self.single(Token::Divide),
            b'!' => self.operator(b'=', Token::NotEqual, Token::Not),
            b'>' => self.operator(b'=', Token::GreaterThanOrEqual, Token::GreaterThan),
            b'<' if self.peek_byte(1) == Some(b'<') => self.scan_reference()?,
            b'<' => self.operator(b'=', Token::LessThanOrEqual, Token::LessThan),
            b'=' if self.peek_byte(1) == Some(b'=') => {
                self.pos += 2;
                Token::Equal
            }
            b'0'..=b'9' => self.scan_number(),
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => Token::Identifier(self.scan_identifier()),
            _ => {
                let character = self.input[self.pos..].chars().next().unwrap_or('\u{FFFD}');
                if is_identifier_start(character) {
                    Token::Identifier(self.scan_identifier())
                } else {
                    return Err(ParseError::UnexpectedCharacter {
                        character,
                        position: self.pos,
                    });
                }
            }
        };

        Ok(Some(token))
    }

    /// Tokenize the whole input with exact spans
    pub fn tokenize_all(&mut self) -> ParseResult<Vec<Spanned<Token<'input>>>> {
        let mut tokens = Vec::with_capacity(16);
        loop {
            self.skip_whitespace();
            let start = self.position();
            match self.next_token()? {
                Some(token) => tokens.push(Spanned::new(token, start, self.position())),
                None => return Ok(tokens),
            }
        }
    }
}

/// Tokenize conformance text
pub fn tokenize(input: &str) -> ParseResult<Vec<Spanned<Token<'_>>>> {
    Tokenizer::new(input).tokenize_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(input: &str) -> Vec<Token<'_>> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    #[test]
    fn test_tokenizer_basic() {
        assert_eq!(
            values("[LT | DF & CF].a+"),
            vec![
                Token::LeftBracket,
                Token::Identifier("LT"),
                Token::Or,
                Token::Identifier("DF"),
                Token::And,
                Token::Identifier("CF"),
                Token::RightBracket,
                Token::Dot,
                Token::Identifier("a"),
                Token::Plus,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            values("! != == < <= > >= ^ * /"),
            vec![
                Token::Not,
                Token::NotEqual,
                Token::Equal,
                Token::LessThan,
                Token::LessThanOrEqual,
                Token::GreaterThan,
                Token::GreaterThanOrEqual,
                Token::Xor,
                Token::Multiply,
                Token::Divide,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            values("42 0x1F 1.50 3."),
            vec![
                Token::Integer("42"),
                Token::Hex("0x1F"),
                Token::Decimal("1.50"),
                Token::Integer("3"),
                Token::Dot,
            ]
        );
    }

    #[test]
    fn test_references() {
        assert_eq!(
            values("<<ref_Scenes>> & !<<ref_Groups, Groups cluster>>"),
            vec![
                Token::Reference {
                    id: "ref_Scenes",
                    label: None
                },
                Token::And,
                Token::Not,
                Token::Reference {
                    id: "ref_Groups",
                    label: Some("Groups cluster")
                },
            ]
        );
        assert_eq!(
            tokenize("<<ref_Scenes").unwrap_err(),
            ParseError::UnclosedReference { position: 0 }
        );
    }

    #[test]
    fn test_spans_are_exact() {
        let tokens = tokenize("  AB  <= 0x10").unwrap();
        assert_eq!((tokens[0].start, tokens[0].end), (2, 4));
        assert_eq!((tokens[1].start, tokens[1].end), (6, 8));
        assert_eq!((tokens[2].start, tokens[2].end), (9, 13));
    }

    #[test]
    fn test_unexpected_character() {
        assert!(matches!(
            tokenize("AB ; CD").unwrap_err(),
            ParseError::UnexpectedCharacter {
                character: ';',
                position: 3
            }
        ));
        assert!(tokenize("A = B").is_err());
    }
}
