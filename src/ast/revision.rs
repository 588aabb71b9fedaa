//! Revision range validation
//!
//! A range such as `v2 <= Rev < v5` must describe at least one whole revision.
//! Both operators must point the same way; `v5 > Rev >= v2` is the same range
//! written in descending form.

use super::expression::RevisionRangeData;
use crate::parser::{ParseError, ParseResult};

/// Inclusive bounds admitted by a valid revision range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionBounds {
    /// Lowest admitted revision
    pub low: u64,
    /// Highest admitted revision
    pub high: u64,
}

impl RevisionBounds {
    /// Check if a revision lies within the bounds
    pub fn contains(&self, revision: u64) -> bool {
        (self.low..=self.high).contains(&revision)
    }
}

/// Validate a revision range, returning the inclusive bounds it admits.
///
/// `source` is the range's source text and is quoted in the error.
pub fn validate_range(range: &RevisionRangeData, source: &str) -> ParseResult<RevisionBounds> {
    let invalid = |reason: &str| ParseError::InvalidRevisionRange {
        range: source.to_string(),
        reason: reason.to_string(),
    };

    let (left_op, right_op) = (range.left_operator, range.right_operator);
    if left_op.is_equality() || right_op.is_equality() {
        return Err(invalid("range bounds must use <, <=, > or >="));
    }
    if left_op.is_ascending() != right_op.is_ascending() {
        return Err(invalid("bounds point in opposite directions"));
    }

    let ((low, low_strict), (high, high_strict)) = if left_op.is_ascending() {
        (
            (range.left, left_op.is_strict()),
            (range.right, right_op.is_strict()),
        )
    } else {
        (
            (range.right, right_op.is_strict()),
            (range.left, left_op.is_strict()),
        )
    };

    if low > high {
        return Err(invalid("lower bound is greater than upper bound"));
    }

    let low = if low_strict { low.checked_add(1) } else { Some(low) };
    let high = if high_strict { high.checked_sub(1) } else { Some(high) };
    match (low, high) {
        (Some(low), Some(high)) if low <= high => Ok(RevisionBounds { low, high }),
        _ => Err(invalid("range admits no revision")),
    }
}

/// Check a single revision against a range's operators
pub fn range_contains(range: &RevisionRangeData, revision: u64) -> bool {
    range.left_operator.matches(range.left.cmp(&revision))
        && range.right_operator.matches(revision.cmp(&range.right))
}

/// Render a range's source form for error messages
pub fn range_source(range: &RevisionRangeData) -> String {
    format!(
        "v{} {} Rev {} v{}",
        range.left, range.left_operator, range.right_operator, range.right
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ComparisonOperator;
    use ComparisonOperator::*;

    fn range(left: u64, lop: ComparisonOperator, rop: ComparisonOperator, right: u64) -> RevisionRangeData {
        RevisionRangeData {
            left,
            left_operator: lop,
            right_operator: rop,
            right,
        }
    }

    #[test]
    fn test_valid_ranges() {
        let r = range(2, LessThanOrEqual, LessThan, 5);
        assert_eq!(
            validate_range(&r, "v2 <= Rev < v5").unwrap(),
            RevisionBounds { low: 2, high: 4 }
        );

        // Descending form of the same idea
        let r = range(3, GreaterThan, GreaterThan, 1);
        assert_eq!(
            validate_range(&r, "v3 > Rev > v1").unwrap(),
            RevisionBounds { low: 2, high: 2 }
        );

        let r = range(2, LessThanOrEqual, LessThanOrEqual, 2);
        assert!(validate_range(&r, "v2 <= Rev <= v2").is_ok());
    }

    #[test]
    fn test_empty_ranges_are_rejected() {
        let err = validate_range(&range(2, LessThan, LessThan, 2), "v2 < Rev < v2").unwrap_err();
        assert!(err.to_string().contains("v2 < Rev < v2"));

        assert!(validate_range(&range(1, LessThan, LessThan, 2), "v1 < Rev < v2").is_err());
        assert!(validate_range(&range(2, LessThanOrEqual, LessThan, 2), "src").is_err());
        assert!(validate_range(&range(0, GreaterThan, GreaterThanOrEqual, 0), "src").is_err());
    }

    #[test]
    fn test_inverted_and_mixed_ranges_are_rejected() {
        let err = validate_range(&range(3, LessThan, LessThan, 1), "v3 < Rev < v1").unwrap_err();
        assert!(err.to_string().contains("lower bound"));

        let err = validate_range(&range(1, LessThan, GreaterThan, 3), "v1 < Rev > v3").unwrap_err();
        assert!(err.to_string().contains("opposite directions"));

        assert!(validate_range(&range(1, Equal, LessThan, 3), "v1 == Rev < v3").is_err());
    }

    #[test]
    fn test_range_contains_matches_bounds() {
        let r = range(5, GreaterThanOrEqual, GreaterThan, 2);
        let bounds = validate_range(&r, "v5 >= Rev > v2").unwrap();
        for rev in 0..8 {
            assert_eq!(range_contains(&r, rev), bounds.contains(rev), "revision {rev}");
        }
        assert_eq!(range_source(&r), "v5 >= Rev > v2");
    }
}
