//! Expression evaluation for the calculator.
//!
//! This module turns the text built from key presses into a result string:
//! it prefixes the carried-over result, splits the text around its operator,
//! checks the operands and formats the value with two decimal places.

use super::errors::{DomainResult, EvaluationError};
use super::models::{EvaluationOutcome, OPERAND_MAX, OPERAND_MIN, Operator};
use super::parser::{parse_operand, split_expression};
use tracing::debug;

/// Fractional digits requested when printing the exact value of an `f64`.
/// Enough for the longest exact expansion (subnormals need 1074).
const EXACT_FRACTION_DIGITS: usize = 1100;

/// Evaluates single-operator calculator expressions.
///
/// The evaluator is stateless; the carried-over result is passed in on every
/// call.
///
/// # Examples
///
/// ```
/// use tcalc::domain::{EvaluationOutcome, ExpressionEvaluator};
///
/// let evaluator = ExpressionEvaluator::new();
///
/// assert_eq!(evaluator.evaluate("2+3", None).to_string(), "5.00");
/// assert_eq!(evaluator.evaluate("10/0", None), EvaluationOutcome::Error);
///
/// // Chained calculation: "8" was the previous result.
/// assert_eq!(evaluator.evaluate("+2", Some("8")).to_string(), "10.00");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates `expression`, prefixed by `previous_result` when present.
    ///
    /// Malformed input, non-numeric or out-of-range operands and division by
    /// zero all produce [`EvaluationOutcome::Error`].
    ///
    /// # Arguments
    ///
    /// * `expression` - Text entered since the last evaluation (e.g. "5+3", "+2")
    /// * `previous_result` - Last successful result, prepended without separator
    pub fn evaluate(&self, expression: &str, previous_result: Option<&str>) -> EvaluationOutcome {
        match self.compute(expression, previous_result) {
            Ok(value) => EvaluationOutcome::Success(format_two_places(value)),
            Err(err) => {
                debug!(expression, ?previous_result, error = %err, "evaluation failed");
                EvaluationOutcome::Error
            }
        }
    }

    /// Computes the unrounded value of an expression, keeping the failure reason.
    pub fn compute(&self, expression: &str, previous_result: Option<&str>) -> DomainResult<f64> {
        let full = full_expression(expression, previous_result);
        let parts = split_expression(&full)?;

        let lhs = checked_operand(parse_operand(parts.lhs)?)?;
        let rhs = checked_operand(parse_operand(parts.rhs)?)?;

        if parts.operator == Operator::Divide && rhs == 0.0 {
            return Err(EvaluationError::DivisionByZero);
        }

        let value = parts.operator.function()(lhs, rhs);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvaluationError::NonFiniteResult)
        }
    }
}

/// Joins the carried-over result and the new input into the text that is evaluated.
pub fn full_expression(expression: &str, previous_result: Option<&str>) -> String {
    match previous_result {
        Some(previous) => format!("{previous}{expression}"),
        None => expression.to_string(),
    }
}

fn checked_operand(value: f64) -> DomainResult<f64> {
    if (OPERAND_MIN..=OPERAND_MAX).contains(&value) {
        Ok(value)
    } else {
        Err(EvaluationError::OperandOutOfRange(value))
    }
}

/// Formats `value` with exactly two fractional digits, rounding half up.
///
/// Rounding is applied to the exact binary value of the `f64`, so `1.005`
/// (stored as 1.00499...) becomes `1.00` while `0.125` becomes `0.13`. Ties
/// round away from zero, and results that round to zero carry no sign.
///
/// `value` must be finite. [`ExpressionEvaluator::evaluate`] rejects
/// infinite and NaN results before formatting.
///
/// # Panics
///
/// Panics in debug builds if `value` is infinite or NaN.
///
/// ```
/// use tcalc::domain::format_two_places;
///
/// assert_eq!(format_two_places(7.0), "7.00");
/// assert_eq!(format_two_places(-3.5), "-3.50");
/// assert_eq!(format_two_places(0.125), "0.13");
/// ```
pub fn format_two_places(value: f64) -> String {
    debug_assert!(value.is_finite(), "cannot format {value}");
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let frac = frac_part.as_bytes();

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain((0..2).map(|i| frac.get(i).copied().unwrap_or(b'0')))
        .map(|b| b - b'0')
        .collect();

    if frac.get(2).is_some_and(|&d| d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let negative = value.is_sign_negative() && digits.iter().any(|&d| d != 0);
    let split = digits.len() - 2;

    let mut formatted = String::with_capacity(digits.len() + 2);
    if negative {
        formatted.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i == split {
            formatted.push('.');
        }
        formatted.push(char::from(b'0' + digit));
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expression: &str, previous: Option<&str>) -> String {
        ExpressionEvaluator::new().evaluate(expression, previous).to_string()
    }

    #[test]
    fn test_simple_arithmetic() {
        assert_eq!(eval("2+3", None), "5.00");
        assert_eq!(eval("10-3", None), "7.00");
        assert_eq!(eval("4*2.5", None), "10.00");
        assert_eq!(eval("15/3", None), "5.00");
        assert_eq!(eval("10/4", None), "2.50");
        assert_eq!(eval("3-5", None), "-2.00");
        assert_eq!(eval("2/3", None), "0.67");
        assert_eq!(eval("10/3", None), "3.33");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("10/0", None), "Error");
        assert_eq!(eval("10/0.0", None), "Error");
        assert_eq!(
            ExpressionEvaluator::new().compute("10/0", None),
            Err(EvaluationError::DivisionByZero)
        );
        // Zero is only rejected as a divisor.
        assert_eq!(eval("0/10", None), "0.00");
        assert_eq!(eval("10*0", None), "0.00");
    }

    #[test]
    fn test_operand_range() {
        assert_eq!(eval("10000+1", None), "10001.00");
        assert_eq!(eval("10000*10000", None), "100000000.00");
        assert_eq!(eval("10001+1", None), "Error");
        assert_eq!(eval("1*20000", None), "Error");
        assert_eq!(eval("10000.01-1", None), "Error");
        assert_eq!(
            ExpressionEvaluator::new().compute("10001+1", None),
            Err(EvaluationError::OperandOutOfRange(10001.0))
        );
    }

    #[test]
    fn test_leading_minus_is_not_a_sign() {
        assert_eq!(eval("-10000+1", None), "Error");
        assert_eq!(eval("-5", None), "Error");
        assert_eq!(eval("+2", Some("-3.00")), "Error");
        assert!(matches!(
            ExpressionEvaluator::new().compute("-10000+1", None),
            Err(EvaluationError::ExtraOperator { count: 2, .. })
        ));
        assert_eq!(
            ExpressionEvaluator::new().compute("-5", None),
            Err(EvaluationError::EmptyOperand)
        );
    }

    #[test]
    fn test_malformed_shapes() {
        assert_eq!(eval("", None), "Error");
        assert_eq!(eval("42", None), "Error");
        assert_eq!(eval("5+", None), "Error");
        assert_eq!(eval("1+2+3", None), "Error");
        assert_eq!(eval("1++2", None), "Error");
        assert_eq!(eval("a+1", None), "Error");
        assert_eq!(eval("1e3+1", None), "Error");
    }

    #[test]
    fn test_chaining_with_previous_result() {
        assert_eq!(eval("+2", Some("8")), "10.00");
        assert_eq!(eval("*3", Some("8.00")), "24.00");
        assert_eq!(eval("/0", Some("8.00")), "Error");
        // Without an operator the prefix just extends the first number.
        assert_eq!(eval("2", Some("8.00")), "Error");
        assert_eq!(eval("", Some("8.00")), "Error");
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let evaluator = ExpressionEvaluator::new();
        for (expression, previous) in [("2+3", None), ("+2", Some("8")), ("1/0", None)] {
            assert_eq!(
                evaluator.evaluate(expression, previous),
                evaluator.evaluate(expression, previous)
            );
        }
    }

    #[test]
    fn test_full_expression() {
        assert_eq!(full_expression("+3", Some("5")), "5+3");
        assert_eq!(full_expression("5+3", None), "5+3");
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(format_two_places(0.125), "0.13");
        assert_eq!(format_two_places(0.375), "0.38");
        assert_eq!(format_two_places(-0.125), "-0.13");
        assert_eq!(format_two_places(2.5), "2.50");
        assert_eq!(format_two_places(0.994), "0.99");
        assert_eq!(format_two_places(9.999), "10.00");
        assert_eq!(format_two_places(99.999), "100.00");
    }

    #[test]
    fn test_rounding_uses_exact_binary_value() {
        // 1.005 and 2.675 are stored just below the tie.
        assert_eq!(format_two_places(1.005), "1.00");
        assert_eq!(format_two_places(2.675), "2.67");
        assert_eq!(eval("1.005+0", None), "1.00");
        assert_eq!(eval("0.125+0", None), "0.13");
    }

    #[test]
    fn test_zero_has_no_sign() {
        assert_eq!(format_two_places(0.0), "0.00");
        assert_eq!(format_two_places(-0.0), "0.00");
        assert_eq!(format_two_places(-0.004), "0.00");
        assert_eq!(eval("1-1.004", None), "0.00");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "cannot format")]
    fn test_format_rejects_infinity() {
        format_two_places(f64::INFINITY);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "cannot format")]
    fn test_format_rejects_nan() {
        format_two_places(f64::NAN);
    }

    #[test]
    fn test_non_finite_result_never_reaches_formatting() {
        assert_eq!(eval("10000/0.0", None), "Error");
        assert_eq!(eval("0/0", None), "Error");
    }

    #[test]
    fn test_results_have_two_fraction_digits() {
        let evaluator = ExpressionEvaluator::new();
        for expression in ["1/3", "10000/7", "0.1+0.2", "9999*9999", "1/10000", "7-7"] {
            let outcome = evaluator.evaluate(expression, None);
            let value = outcome.value().expect("should evaluate");
            let (_, fraction) = value.split_once('.').expect("has a decimal point");
            assert_eq!(fraction.len(), 2, "{expression} gave {value}");
        }
        assert_eq!(eval("0.1+0.2", None), "0.30");
        assert_eq!(eval("1/10000", None), "0.00");
        assert_eq!(eval("9999*9999", None), "99980001.00");
    }
}
