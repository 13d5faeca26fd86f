//! Parser for allowable-values expressions.
//!
//! Three forms are understood, with keywords matched case-insensitively:
//!
//! - `range[a,b]`: inclusive range
//! - `rangeexclusive[a,b]`: exclusive range
//! - anything else: a comma-separated list, kept verbatim
//!
//! Range bounds are free-form tokens; interpreting them as numbers is up
//! to whoever consumes the constraint.

use crate::error::{Error, Result};
use crate::model::ValueConstraint;

const RANGE_PREFIX: &str = "range[";
const EXCLUSIVE_RANGE_PREFIX: &str = "rangeexclusive[";

/// Parses an allowable-values expression.
///
/// Returns `Ok(None)` for empty input. Range syntax with a missing closing
/// bracket, stray brackets or anything other than two non-empty bounds is
/// rejected with [`Error::MalformedConstraint`].
pub fn parse_constraint(raw: &str) -> Result<Option<ValueConstraint>> {
    if raw.is_empty() {
        return Ok(None);
    }

    if let Some(body) = strip_keyword(raw, EXCLUSIVE_RANGE_PREFIX) {
        return parse_range(raw, body, false).map(Some);
    }
    if let Some(body) = strip_keyword(raw, RANGE_PREFIX) {
        return parse_range(raw, body, true).map(Some);
    }

    let values = raw.split(',').map(str::to_string).collect();
    Ok(Some(ValueConstraint::List(values)))
}

fn strip_keyword<'a>(raw: &'a str, keyword: &str) -> Option<&'a str> {
    let head = raw.get(..keyword.len())?;
    if head.eq_ignore_ascii_case(keyword) {
        raw.get(keyword.len()..)
    } else {
        None
    }
}

fn parse_range(raw: &str, body: &str, inclusive: bool) -> Result<ValueConstraint> {
    let malformed = |reason: &str| Error::MalformedConstraint {
        raw: raw.to_string(),
        reason: reason.to_string(),
    };

    let inner = body
        .strip_suffix(']')
        .ok_or_else(|| malformed("missing closing bracket"))?;

    let bounds: Vec<&str> = inner.split(',').collect();
    if bounds.len() != 2 {
        return Err(malformed(&format!(
            "expected exactly two bounds, found {}",
            bounds.len()
        )));
    }
    if bounds.iter().any(|bound| bound.trim().is_empty()) {
        return Err(malformed("range bounds must not be empty"));
    }
    if bounds.iter().any(|bound| bound.contains(['[', ']'])) {
        return Err(malformed("unbalanced brackets"));
    }

    Ok(ValueConstraint::Range {
        lower: bounds[0].to_string(),
        upper: bounds[1].to_string(),
        lower_inclusive: inclusive,
        upper_inclusive: inclusive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(lower: &str, upper: &str, inclusive: bool) -> ValueConstraint {
        ValueConstraint::Range {
            lower: lower.to_string(),
            upper: upper.to_string(),
            lower_inclusive: inclusive,
            upper_inclusive: inclusive,
        }
    }

    #[test]
    fn test_empty_is_absent() {
        assert_eq!(parse_constraint("").unwrap(), None);
    }

    #[test]
    fn test_inclusive_range() {
        assert_eq!(
            parse_constraint("range[1,5]").unwrap(),
            Some(range("1", "5", true))
        );
    }

    #[test]
    fn test_exclusive_range() {
        assert_eq!(
            parse_constraint("rangeexclusive[1,5]").unwrap(),
            Some(range("1", "5", false))
        );
    }

    #[test]
    fn test_keywords_ignore_case() {
        assert_eq!(
            parse_constraint("RANGE[0,infinity]").unwrap(),
            Some(range("0", "infinity", true))
        );
        assert_eq!(
            parse_constraint("RangeExclusive[-1,1]").unwrap(),
            Some(range("-1", "1", false))
        );
    }

    #[test]
    fn test_list_kept_verbatim() {
        assert_eq!(
            parse_constraint("a,b,c").unwrap(),
            Some(ValueConstraint::List(vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string()
            ]))
        );
        // no trimming, no de-duplication
        assert_eq!(
            parse_constraint("a, b,a").unwrap(),
            Some(ValueConstraint::List(vec![
                "a".to_string(),
                " b".to_string(),
                "a".to_string()
            ]))
        );
    }

    #[test]
    fn test_missing_bracket_is_malformed() {
        let err = parse_constraint("range[1,5").unwrap_err();
        match err {
            Error::MalformedConstraint { raw, .. } => assert_eq!(raw, "range[1,5"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_wrong_bound_count_is_malformed() {
        assert!(parse_constraint("range[1,2,3]").is_err());
        assert!(parse_constraint("rangeexclusive[1]").is_err());
        assert!(parse_constraint("range[,5]").is_err());
        assert!(parse_constraint("range[1,5]]").is_err());
        assert!(parse_constraint("range[[1,5]").is_err());
        assert!(parse_constraint("rangeexclusive[1,5]]").is_err());
    }

    #[test]
    fn test_non_ascii_input_is_a_list() {
        assert_eq!(
            parse_constraint("ränge").unwrap(),
            Some(ValueConstraint::List(vec!["ränge".to_string()]))
        );
    }
}
