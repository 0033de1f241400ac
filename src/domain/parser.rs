//! Splitting of calculator input into an operator and two operands.
//!
//! The calculator only understands a single binary operation. The whole
//! input must match:
//!
//! ```bnf
//! Expression ::= Operand Operator Operand
//! Operator   ::= "+" | "-" | "*" | "/"
//! Operand    ::= Digits ( "." Digits? )? | "." Digits
//! Digits     ::= [0-9]+
//! ```
//!
//! Every operator character in the text counts, wherever it appears. A
//! leading `-` is read as the operator with an empty left operand, so
//! negative first operands (including a negative carried result) are
//! rejected rather than guessed at.

use super::errors::{DomainResult, EvaluationError};
use super::models::Operator;

/// An expression split around its single operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpression<'a> {
    pub lhs: &'a str,
    pub operator: Operator,
    pub rhs: &'a str,
}

/// Splits `text` into two segments around exactly one operator character.
///
/// Segments are returned as-is; they are not checked to be numbers here.
pub fn split_expression(text: &str) -> DomainResult<BinaryExpression<'_>> {
    let mut operators = text
        .char_indices()
        .filter_map(|(index, ch)| Operator::from_symbol(ch).map(|op| (index, op)));

    let (index, operator) = operators
        .next()
        .ok_or_else(|| EvaluationError::MissingOperator(text.to_string()))?;

    let extra = operators.count();
    if extra > 0 {
        return Err(EvaluationError::ExtraOperator {
            expression: text.to_string(),
            count: extra + 1,
        });
    }

    // Operator symbols are all single-byte ASCII.
    Ok(BinaryExpression {
        lhs: &text[..index],
        operator,
        rhs: &text[index + 1..],
    })
}

/// Parses one operand as a plain, finite decimal number.
///
/// Surrounding whitespace is ignored. Signs, exponents and the textual
/// `inf`/`NaN` forms that `f64::from_str` would accept are rejected.
pub fn parse_operand(token: &str) -> DomainResult<f64> {
    let token = token.trim();
    if token.is_empty() {
        return Err(EvaluationError::EmptyOperand);
    }

    let mut seen_point = false;
    let mut seen_digit = false;
    for ch in token.chars() {
        match ch {
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => return Err(EvaluationError::InvalidOperand(token.to_string())),
        }
    }
    if !seen_digit {
        return Err(EvaluationError::InvalidOperand(token.to_string()));
    }

    let value: f64 = token
        .parse()
        .map_err(|_| EvaluationError::InvalidOperand(token.to_string()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvaluationError::InvalidOperand(token.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple() {
        let expr = split_expression("12+3").unwrap();
        assert_eq!(expr.lhs, "12");
        assert_eq!(expr.operator, Operator::Add);
        assert_eq!(expr.rhs, "3");

        let expr = split_expression("8.00/4").unwrap();
        assert_eq!(expr.lhs, "8.00");
        assert_eq!(expr.operator, Operator::Divide);
        assert_eq!(expr.rhs, "4");
    }

    #[test]
    fn test_split_keeps_empty_segments() {
        let expr = split_expression("5+").unwrap();
        assert_eq!(expr.lhs, "5");
        assert_eq!(expr.rhs, "");

        let expr = split_expression("-5").unwrap();
        assert_eq!(expr.lhs, "");
        assert_eq!(expr.operator, Operator::Subtract);
        assert_eq!(expr.rhs, "5");
    }

    #[test]
    fn test_split_missing_operator() {
        assert_eq!(
            split_expression("42"),
            Err(EvaluationError::MissingOperator("42".to_string()))
        );
        assert!(matches!(split_expression(""), Err(EvaluationError::MissingOperator(_))));
    }

    #[test]
    fn test_split_extra_operators() {
        assert_eq!(
            split_expression("1+2*3"),
            Err(EvaluationError::ExtraOperator {
                expression: "1+2*3".to_string(),
                count: 2,
            })
        );
        // A leading minus is an operator like any other.
        assert!(matches!(
            split_expression("-10000+1"),
            Err(EvaluationError::ExtraOperator { count: 2, .. })
        ));
    }

    #[test]
    fn test_parse_operand_accepts_decimals() {
        assert_eq!(parse_operand("42").unwrap(), 42.0);
        assert_eq!(parse_operand("2.5").unwrap(), 2.5);
        assert_eq!(parse_operand("8.00").unwrap(), 8.0);
        assert_eq!(parse_operand("5.").unwrap(), 5.0);
        assert_eq!(parse_operand(".5").unwrap(), 0.5);
        assert_eq!(parse_operand(" 7 ").unwrap(), 7.0);
    }

    #[test]
    fn test_parse_operand_rejects_other_forms() {
        assert_eq!(parse_operand(""), Err(EvaluationError::EmptyOperand));
        assert_eq!(parse_operand("   "), Err(EvaluationError::EmptyOperand));
        for token in [".", "1.2.3", "1e3", "inf", "NaN", "abc", "x"] {
            assert!(
                matches!(parse_operand(token), Err(EvaluationError::InvalidOperand(_))),
                "{token:?} should be rejected"
            );
        }
    }
}
