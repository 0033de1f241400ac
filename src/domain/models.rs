use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest operand the evaluator accepts.
pub const OPERAND_MIN: f64 = -10_000.0;
/// Largest operand the evaluator accepts.
pub const OPERAND_MAX: f64 = 10_000.0;
/// Text shown in place of a result when evaluation fails.
pub const ERROR_MARKER: &str = "Error";

/// The four binary operators a calculation can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// The character this operator has inside an expression.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// The arithmetic this operator performs. Division by zero is rejected
    /// before dispatch, so every function here is total.
    pub fn function(self) -> fn(f64, f64) -> f64 {
        match self {
            Operator::Add => |lhs, rhs| lhs + rhs,
            Operator::Subtract => |lhs, rhs| lhs - rhs,
            Operator::Multiply => |lhs, rhs| lhs * rhs,
            Operator::Divide => |lhs, rhs| lhs / rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Result of evaluating one expression.
///
/// `Success` holds the value already formatted with two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationOutcome {
    Success(String),
    Error,
}

impl EvaluationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The formatted value, if evaluation succeeded.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Success(value) => Some(value),
            Self::Error => None,
        }
    }

    /// The text a display shows for this outcome.
    pub fn as_str(&self) -> &str {
        self.value().unwrap_or(ERROR_MARKER)
    }
}

impl fmt::Display for EvaluationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the calculation tape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRecord {
    /// Full text that was evaluated, previous result included.
    pub expression: String,
    pub outcome: EvaluationOutcome,
}

/// Everything needed to resume a calculator session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub previous_result: Option<String>,
    #[serde(default)]
    pub tape: Vec<CalculationRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_symbols() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operator::from_symbol('x'), None);
        assert_eq!(Operator::from_symbol('%'), None);
    }

    #[test]
    fn test_operator_functions() {
        assert_eq!(Operator::Add.function()(2.0, 3.0), 5.0);
        assert_eq!(Operator::Subtract.function()(2.0, 3.0), -1.0);
        assert_eq!(Operator::Multiply.function()(4.0, 2.5), 10.0);
        assert_eq!(Operator::Divide.function()(9.0, 3.0), 3.0);
    }

    #[test]
    fn test_outcome_display() {
        let success = EvaluationOutcome::Success("5.00".to_string());
        assert!(success.is_success());
        assert_eq!(success.value(), Some("5.00"));
        assert_eq!(success.to_string(), "5.00");

        let error = EvaluationOutcome::Error;
        assert!(!error.is_success());
        assert_eq!(error.value(), None);
        assert_eq!(error.to_string(), "Error");
    }

    #[test]
    fn test_session_without_tape_deserializes() {
        let session: Session = serde_json::from_str(r#"{"previous_result":"8.00"}"#).unwrap();
        assert_eq!(session.previous_result.as_deref(), Some("8.00"));
        assert!(session.tape.is_empty());
    }
}
