//! Conformance members and choice suffixes

use super::error::{ParseError, ParseResult};
use super::pratt::Parser;
use super::tokenizer::Token;
use crate::ast::{Choice, ChoiceLimit, Conformance, ConformanceSet};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// Members written as a single keyword
static FIXED_MEMBERS: Lazy<FxHashMap<&'static str, Conformance>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    map.insert("M", Conformance::mandatory());
    map.insert("P", Conformance::provisional());
    map.insert("D", Conformance::deprecated());
    map.insert("X", Conformance::disallowed());
    map.insert("desc", Conformance::described());
    map
});

impl<'input> Parser<'input> {
    /// Parse a comma-separated otherwise chain; empty input yields an empty set
    pub fn parse_set(&mut self) -> ParseResult<ConformanceSet> {
        let mut set = ConformanceSet::new();
        if self.tokens.is_eof() {
            return Ok(set);
        }

        loop {
            set.push(self.parse_member()?);
            match self.tokens.next() {
                None => return Ok(set),
                Some(comma) if comma.value == Token::Comma => {
                    if self.tokens.is_eof() {
                        return Err(ParseError::MissingOperand {
                            operator: ",".to_string(),
                            position: comma.start,
                        });
                    }
                }
                Some(token) => {
                    return Err(ParseError::UnexpectedToken {
                        token: token.value.to_string(),
                        position: token.start,
                    });
                }
            }
        }
    }

    /// Whether the member starting at the current token is a single keyword
    fn member_ends_after(&self, n: usize) -> bool {
        match self.tokens.peek_ahead(n) {
            None => true,
            Some(token) => token.value == Token::Comma,
        }
    }

    fn parse_member(&mut self) -> ParseResult<Conformance> {
        let keyword = self.tokens.peek().and_then(|t| t.value.as_identifier());
        if let Some(keyword) = keyword {
            if let Some(fixed) = FIXED_MEMBERS.get(keyword) {
                if self.member_ends_after(1) {
                    self.tokens.next();
                    return Ok(fixed.clone());
                }
            }

            let has_choice = self
                .tokens
                .peek_ahead(1)
                .is_some_and(|t| t.value == Token::Dot);
            if keyword == "O" && (has_choice || self.member_ends_after(1)) {
                self.tokens.next();
                let choice = self.parse_choice()?;
                return Ok(Conformance::Optional {
                    expression: None,
                    choice,
                });
            }
        }

        if self.tokens.consume_if(|t| *t == Token::LeftBracket).is_some() {
            let expression = self.parse_expression()?;
            self.tokens.expect(Token::RightBracket)?;
            let choice = self.parse_choice()?;
            return Ok(Conformance::Optional {
                expression: Some(expression),
                choice,
            });
        }

        Ok(Conformance::mandatory_if(self.parse_expression()?))
    }

    /// Optional `.set[count][+|-max]` suffix
    fn parse_choice(&mut self) -> ParseResult<Option<Choice>> {
        if self.tokens.consume_if(|t| *t == Token::Dot).is_none() {
            return Ok(None);
        }

        let position = self.tokens.offset();
        let Some(name) = self.tokens.next().and_then(|t| t.value.as_identifier()) else {
            return Err(ParseError::ExpectedToken {
                expected: "choice set name".to_string(),
                position,
            });
        };
        let invalid = || ParseError::InvalidLiteral {
            literal_type: "choice".to_string(),
            value: name.to_string(),
            position,
        };

        let split = name
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(name.len());
        let (set, digits) = name.split_at(split);
        if set.is_empty() {
            return Err(invalid());
        }
        let count = if digits.is_empty() {
            None
        } else {
            Some(digits.parse::<u32>().map_err(|_| invalid())?)
        };

        let limit = if self.tokens.consume_if(|t| *t == Token::Plus).is_some() {
            ChoiceLimit::Min {
                min: count.unwrap_or(1),
            }
        } else if self.tokens.consume_if(|t| *t == Token::Minus).is_some() {
            let max_position = self.tokens.offset();
            let max = match self.tokens.next().map(|t| t.value) {
                Some(Token::Integer(max)) => max.parse::<u32>().ok(),
                _ => None,
            }
            .ok_or(ParseError::ExpectedToken {
                expected: "choice upper bound".to_string(),
                position: max_position,
            })?;
            match count {
                Some(min) if min > max => return Err(invalid()),
                Some(min) => ChoiceLimit::Range { min, max },
                None => ChoiceLimit::Max { max },
            }
        } else {
            ChoiceLimit::Exact {
                limit: count.unwrap_or(1),
            }
        };

        Ok(Some(Choice::new(set, limit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expression;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(input: &str) -> ParseResult<ConformanceSet> {
        let mut parser = Parser::new(input)?;
        let set = parser.parse_set()?;
        parser.finish()?;
        Ok(set)
    }

    #[rstest]
    #[case("M", Conformance::mandatory())]
    #[case("O", Conformance::optional())]
    #[case("P", Conformance::provisional())]
    #[case("D", Conformance::deprecated())]
    #[case("X", Conformance::disallowed())]
    #[case("desc", Conformance::described())]
    #[case("LT", Conformance::mandatory_if(Expression::feature("LT")))]
    #[case("[LT]", Conformance::optional_if(Expression::feature("LT")))]
    fn test_single_members(#[case] input: &str, #[case] expected: Conformance) {
        assert_eq!(parse(input).unwrap(), ConformanceSet::from(expected));
    }

    #[rstest]
    #[case("O.a", ChoiceLimit::Exact { limit: 1 })]
    #[case("O.a2", ChoiceLimit::Exact { limit: 2 })]
    #[case("O.a+", ChoiceLimit::Min { min: 1 })]
    #[case("O.a2+", ChoiceLimit::Min { min: 2 })]
    #[case("O.a-2", ChoiceLimit::Max { max: 2 })]
    #[case("O.a1-2", ChoiceLimit::Range { min: 1, max: 2 })]
    fn test_choice_suffixes(#[case] input: &str, #[case] limit: ChoiceLimit) {
        let expected = Conformance::optional().with_choice(Choice::new("a", limit));
        assert_eq!(parse(input).unwrap(), ConformanceSet::from(expected));
        assert_eq!(parse(input).unwrap().to_string(), input);
    }

    #[test]
    fn test_otherwise_chain() {
        let set = parse("AB, [CD].b+, O").unwrap();
        assert_eq!(
            set,
            ConformanceSet::from(vec![
                Conformance::mandatory_if(Expression::feature("AB")),
                Conformance::optional_if(Expression::feature("CD"))
                    .with_choice(Choice::new("b", ChoiceLimit::Min { min: 1 })),
                Conformance::optional(),
            ])
        );
    }

    #[test]
    fn test_keywords_inside_expressions_are_features() {
        let set = parse("M & LT").unwrap();
        assert_eq!(
            set,
            ConformanceSet::from(Conformance::mandatory_if(Expression::and(
                Expression::feature("M"),
                [Expression::feature("LT")]
            )))
        );
    }

    #[test]
    fn test_empty_and_malformed_sets() {
        assert!(parse("").unwrap().is_empty());
        assert!(matches!(
            parse("M,").unwrap_err(),
            ParseError::MissingOperand { position: 1, .. }
        ));
        assert!(parse("[AB").is_err());
        assert!(parse("O.2").is_err());
        assert!(parse("O.a2-1").is_err());
        assert!(parse("M M").is_err());
    }
}
