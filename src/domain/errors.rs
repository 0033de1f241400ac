use thiserror::Error;

/// Reasons an expression fails to evaluate.
///
/// Callers of [`ExpressionEvaluator::evaluate`](super::ExpressionEvaluator::evaluate)
/// only ever see the flat `Error` outcome; the reason is kept for logging and
/// for [`ExpressionEvaluator::compute`](super::ExpressionEvaluator::compute).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("no operator in expression: {0:?}")]
    MissingOperator(String),
    #[error("expected exactly one operator, found {count} in {expression:?}")]
    ExtraOperator { expression: String, count: usize },
    #[error("missing operand")]
    EmptyOperand,
    #[error("not a decimal number: {0:?}")]
    InvalidOperand(String),
    #[error("operand {0} outside [-10000, 10000]")]
    OperandOutOfRange(f64),
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not a finite number")]
    NonFiniteResult,
}

pub type DomainResult<T> = Result<T, EvaluationError>;
