//! Expression parser for conformance text
//!
//! Boolean expressions are parsed by recursive descent. A run of logical
//! operators without parentheses forms one n-ary node keyed by the first
//! operator of the run (`LT | DF & CF` is an `|` chain of three operands).
//! Arithmetic inside comparisons uses precedence climbing.
//!
//! `AB == CD` (boolean equality) and `Level == 3` (value comparison) share a
//! prefix, so the parser tries the boolean reading first and backtracks to
//! the comparison reading when it does not fit.

use super::error::{ParseError, ParseResult};
use super::lexer::TokenStream;
use super::span::source_between;
use super::tokenizer::{Token, tokenize};
use crate::ast::revision::validate_range;
use crate::ast::{
    ComparisonOperator, ComparisonValue, EqualityData, Expression, LogicalData, LogicalOperator,
    MathOperator, RevisionRangeData,
};
use rust_decimal::Decimal;
use smallvec::SmallVec;
use std::str::FromStr;

/// Binding power of arithmetic operators (higher = tighter binding)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// `+` and `-`
    Additive = 1,
    /// `*` and `/`
    Multiplicative = 2,
}

impl Precedence {
    /// Raw level for comparison
    #[inline(always)]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

#[inline]
fn math_operator(token: &Token<'_>) -> Option<(MathOperator, Precedence)> {
    match token {
        Token::Plus => Some((MathOperator::Add, Precedence::Additive)),
        Token::Minus => Some((MathOperator::Subtract, Precedence::Additive)),
        Token::Multiply => Some((MathOperator::Multiply, Precedence::Multiplicative)),
        Token::Divide => Some((MathOperator::Divide, Precedence::Multiplicative)),
        _ => None,
    }
}

#[inline]
fn comparison_operator(token: &Token<'_>) -> Option<ComparisonOperator> {
    match token {
        Token::Equal => Some(ComparisonOperator::Equal),
        Token::NotEqual => Some(ComparisonOperator::NotEqual),
        Token::LessThan => Some(ComparisonOperator::LessThan),
        Token::LessThanOrEqual => Some(ComparisonOperator::LessThanOrEqual),
        Token::GreaterThan => Some(ComparisonOperator::GreaterThan),
        Token::GreaterThanOrEqual => Some(ComparisonOperator::GreaterThanOrEqual),
        _ => None,
    }
}

#[inline]
fn logical_operator(token: &Token<'_>) -> Option<LogicalOperator> {
    match token {
        Token::And => Some(LogicalOperator::And),
        Token::Or => Some(LogicalOperator::Or),
        Token::Xor => Some(LogicalOperator::Xor),
        _ => None,
    }
}

/// Tokens that continue a value comparison rather than a boolean expression
fn continues_value(token: &Token<'_>) -> bool {
    math_operator(token).is_some()
        || comparison_operator(token).is_some_and(|op| !op.is_equality())
        || *token == Token::Dot
}

/// `vN` revision literal
fn revision_number(name: &str) -> Option<&str> {
    name.strip_prefix('v')
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Mirror an operator so that `v3 <= Rev` reads as `Rev >= v3`
fn reversed(operator: ComparisonOperator) -> ComparisonOperator {
    match operator {
        ComparisonOperator::LessThan => ComparisonOperator::GreaterThan,
        ComparisonOperator::LessThanOrEqual => ComparisonOperator::GreaterThanOrEqual,
        ComparisonOperator::GreaterThan => ComparisonOperator::LessThan,
        ComparisonOperator::GreaterThanOrEqual => ComparisonOperator::LessThanOrEqual,
        other => other,
    }
}

/// Feature codes are upper case (`LT`, `DF`, `MULTI_PRESS`)
fn is_feature_code(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase())
        && name
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}

/// Identifiers that are literals in value position and never boolean atoms
fn is_value_keyword(name: &str) -> bool {
    matches!(name, "true" | "false" | "null")
}

/// Of two failed alternatives, keep the error that got further into the input.
///
/// An error without a position is semantic and means `first` parsed cleanly.
fn furthest(first: ParseError, second: ParseError) -> ParseError {
    match (first.position(), second.position()) {
        (None, _) => first,
        (Some(a), Some(b)) if a > b => first,
        _ => second,
    }
}

/// Recursive-descent parser over a token stream
pub struct Parser<'input> {
    pub(super) input: &'input str,
    pub(super) tokens: TokenStream<'input>,
}

impl<'input> Parser<'input> {
    /// Tokenize `input` and create a parser over it
    pub fn new(input: &'input str) -> ParseResult<Self> {
        let tokens = tokenize(input)?;
        Ok(Self {
            input,
            tokens: TokenStream::new(tokens, input.len()),
        })
    }

    /// Fail unless every token was consumed
    pub fn finish(&self) -> ParseResult<()> {
        if self.tokens.is_eof() {
            Ok(())
        } else {
            Err(self.tokens.unexpected())
        }
    }

    /// Parse a logical chain: `operand (logop operand)*`
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        let left = self.parse_operand()?;
        let Some(operand) = self
            .tokens
            .peek()
            .and_then(|t| logical_operator(&t.value))
        else {
            return Ok(left);
        };

        let mut right = SmallVec::new();
        while let Some(op) = self
            .tokens
            .consume_if(|t| logical_operator(t).is_some())
        {
            let dangling = match self.tokens.peek() {
                None => true,
                Some(t) => matches!(
                    t.value,
                    Token::RightParen | Token::RightBracket | Token::Comma
                ),
            };
            if dangling {
                return Err(ParseError::MissingOperand {
                    operator: op.value.to_string(),
                    position: op.start,
                });
            }
            right.push(self.parse_operand()?);
        }

        Ok(Expression::Logical(Box::new(LogicalData {
            operand,
            not: false,
            left,
            right,
        })))
    }

    /// One operand of a logical chain
    fn parse_operand(&mut self) -> ParseResult<Expression> {
        if let Some(revision) = self.parse_revision()? {
            return Ok(revision);
        }

        let start = self.tokens.position();
        let boolean_error = match self.parse_boolean_relation() {
            Ok(expr) => match self.tokens.peek() {
                Some(next) if continues_value(&next.value) => None,
                _ => return Ok(expr),
            },
            Err(err) => Some(err),
        };

        self.tokens.reset_to(start);
        self.parse_comparison().map_err(|err| match boolean_error {
            Some(boolean_error) => furthest(boolean_error, err),
            None => err,
        })
    }

    /// `Rev op vN`, `vA op Rev op vB`, or `vA op Rev`
    fn parse_revision(&mut self) -> ParseResult<Option<Expression>> {
        let Some(first) = self.tokens.peek() else {
            return Ok(None);
        };
        let start = first.start;
        let Some(name) = first.value.as_identifier() else {
            return Ok(None);
        };
        let Some(first_op) = self
            .tokens
            .peek_ahead(1)
            .and_then(|t| comparison_operator(&t.value))
        else {
            return Ok(None);
        };

        if name == "Rev" {
            self.tokens.next();
            self.tokens.next();
            let revision = self.parse_revision_literal()?;
            return Ok(Some(Expression::revision(first_op, revision)));
        }

        let introduces_range = revision_number(name).is_some()
            && self
                .tokens
                .peek_ahead(2)
                .is_some_and(|t| t.value.is_keyword("Rev"));
        if !introduces_range {
            return Ok(None);
        }

        let left = self.parse_revision_literal()?;
        self.tokens.next();
        self.tokens.next();

        let Some(right_op) = self
            .tokens
            .consume_if(|t| comparison_operator(t).is_some())
            .and_then(|t| comparison_operator(&t.value))
        else {
            return Ok(Some(Expression::revision(reversed(first_op), left)));
        };
        let right = self.parse_revision_literal()?;

        let data = RevisionRangeData {
            left,
            left_operator: first_op,
            right_operator: right_op,
            right,
        };
        validate_range(&data, source_between(self.input, start, self.tokens.last_end()))?;
        Ok(Some(Expression::RevisionRange(Box::new(data))))
    }

    fn parse_revision_literal(&mut self) -> ParseResult<u64> {
        let position = self.tokens.offset();
        let Some(token) = self.tokens.next() else {
            return Err(ParseError::UnexpectedEndOfInput { position });
        };
        let text = token.value.to_string();
        token
            .value
            .as_identifier()
            .and_then(revision_number)
            .and_then(|digits| digits.parse().ok())
            .ok_or(ParseError::InvalidLiteral {
                literal_type: "revision".to_string(),
                value: text,
                position,
            })
    }

    /// A boolean operand, optionally followed by `==`/`!=` and another
    fn parse_boolean_relation(&mut self) -> ParseResult<Expression> {
        let left = self.parse_boolean_unary()?;
        let Some(op) = self.tokens.consume_if(|t| matches!(t, Token::Equal | Token::NotEqual))
        else {
            return Ok(left);
        };
        let right = self.parse_boolean_unary()?;
        Ok(Expression::Equality(Box::new(EqualityData {
            not: op.value == Token::NotEqual,
            left,
            right,
        })))
    }

    /// `!`-prefixed atom or parenthesized expression
    fn parse_boolean_unary(&mut self) -> ParseResult<Expression> {
        if let Some(bang) = self.tokens.consume_if(|t| *t == Token::Not) {
            // `!` also prefixes a whole revision test: `!Rev > v3`
            let operand = match self.parse_revision()? {
                Some(revision) => revision,
                None => self.parse_boolean_unary()?,
            };
            let end = self.tokens.last_end();
            return operand
                .negated()
                .ok_or_else(|| ParseError::InvalidRevisionRange {
                    range: source_between(self.input, bang.start, end).to_string(),
                    reason: "a revision range cannot be negated".to_string(),
                });
        }

        let Some(token) = self.tokens.peek().map(|t| t.value.clone()) else {
            return Err(self.tokens.unexpected());
        };
        match token {
            Token::LeftParen => {
                self.tokens.next();
                let expr = self.parse_expression()?;
                self.tokens.expect(Token::RightParen)?;
                Ok(expr)
            }
            Token::Reference { id, label } => {
                self.tokens.next();
                Ok(Expression::Reference {
                    id: id.to_string(),
                    label: label.map(str::to_string),
                    not: false,
                })
            }
            Token::Identifier(name) if !is_value_keyword(name) => {
                self.tokens.next();
                Ok(if is_feature_code(name) {
                    Expression::feature(name)
                } else {
                    Expression::identifier(name)
                })
            }
            _ => Err(self.tokens.unexpected()),
        }
    }

    /// `math cmpop math`
    fn parse_comparison(&mut self) -> ParseResult<Expression> {
        let left = self.parse_math(0)?;
        let Some(operator) = self
            .tokens
            .consume_if(|t| comparison_operator(t).is_some())
            .and_then(|t| comparison_operator(&t.value))
        else {
            return Err(match self.tokens.peek() {
                Some(token) => ParseError::ExpectedToken {
                    expected: "comparison operator".to_string(),
                    position: token.start,
                },
                None => self.tokens.unexpected(),
            });
        };
        let right = self.parse_math(0)?;
        Ok(Expression::comparison(operator, left, right))
    }

    /// Precedence climbing over `+ - * /`
    fn parse_math(&mut self, min_precedence: u8) -> ParseResult<ComparisonValue> {
        let mut left = self.parse_value()?;

        while let Some((operator, precedence)) =
            self.tokens.peek().and_then(|t| math_operator(&t.value))
        {
            if precedence.as_u8() < min_precedence {
                break;
            }
            let position = self.tokens.offset();
            self.tokens.next();
            if self.tokens.is_eof() {
                return Err(ParseError::MissingOperand {
                    operator: operator.to_string(),
                    position,
                });
            }
            let right = self.parse_math(precedence.as_u8() + 1)?;
            left = ComparisonValue::math(operator, left, right);
        }

        Ok(left)
    }

    fn parse_value(&mut self) -> ParseResult<ComparisonValue> {
        let position = self.tokens.offset();
        let Some(token) = self.tokens.next() else {
            return Err(ParseError::UnexpectedEndOfInput { position });
        };

        match token.value {
            Token::Integer(raw) => parse_int(raw, raw, position),
            Token::Decimal(raw) => parse_decimal(raw, raw, position),
            Token::Hex(raw) => {
                let value = u64::from_str_radix(&raw[2..], 16).map_err(|_| {
                    ParseError::InvalidLiteral {
                        literal_type: "hex".to_string(),
                        value: raw.to_string(),
                        position,
                    }
                })?;
                Ok(ComparisonValue::Hex {
                    value,
                    raw: raw.to_string(),
                })
            }
            Token::Minus => match self.tokens.next().map(|t| t.value) {
                Some(Token::Integer(digits)) => parse_int(&format!("-{digits}"), digits, position),
                Some(Token::Decimal(digits)) => {
                    parse_decimal(&format!("-{digits}"), digits, position)
                }
                _ => Err(ParseError::InvalidLiteral {
                    literal_type: "number".to_string(),
                    value: "-".to_string(),
                    position,
                }),
            },
            Token::LeftParen => {
                let value = self.parse_math(0)?;
                self.tokens.expect(Token::RightParen)?;
                Ok(value)
            }
            Token::Identifier("true") => Ok(ComparisonValue::boolean(true)),
            Token::Identifier("false") => Ok(ComparisonValue::boolean(false)),
            Token::Identifier("null") => Ok(ComparisonValue::Null),
            Token::Identifier("Status") if self.tokens.consume_if(|t| *t == Token::Dot).is_some() => {
                let code_position = self.tokens.offset();
                match self.tokens.next().and_then(|t| t.value.as_identifier()) {
                    Some(code) => Ok(ComparisonValue::status_code(code)),
                    None => Err(ParseError::ExpectedToken {
                        expected: "status code name".to_string(),
                        position: code_position,
                    }),
                }
            }
            Token::Identifier(name) => Ok(ComparisonValue::identifier(name)),
            other => Err(ParseError::UnexpectedToken {
                token: other.to_string(),
                position,
            }),
        }
    }
}

/// `text` is what gets parsed (with any sign); `digits` is the literal token
fn parse_int(text: &str, digits: &str, position: usize) -> ParseResult<ComparisonValue> {
    let value = text.parse::<i64>().map_err(|_| ParseError::InvalidLiteral {
        literal_type: "integer".to_string(),
        value: digits.to_string(),
        position,
    })?;
    Ok(ComparisonValue::Int {
        value,
        raw: text.to_string(),
    })
}

fn parse_decimal(text: &str, digits: &str, position: usize) -> ParseResult<ComparisonValue> {
    let value = Decimal::from_str(text).map_err(|_| ParseError::InvalidLiteral {
        literal_type: "decimal".to_string(),
        value: digits.to_string(),
        position,
    })?;
    Ok(ComparisonValue::Float {
        value,
        raw: text.to_string(),
    })
}

/// Parse a bare conformance expression (`LT | DF`, `MaxLevel > 10`)
pub fn parse_expression(input: &str) -> ParseResult<Expression> {
    let mut parser = Parser::new(input)?;
    let expr = parser.parse_expression()?;
    parser.finish()?;
    Ok(expr)
}
