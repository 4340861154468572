//! Expression error types.

use derive_more::{Display, Error};

use super::token::OperatorKind;

/// Why a token sequence could not be folded into a single boolean.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Malformed {
    /// The sequence had no tokens at all.
    #[display("empty expression")]
    Empty,

    /// The fold ended on an operator still waiting for its right operand.
    #[display("operator {_0} is missing its right operand")]
    DanglingOperator(OperatorKind),

    /// A binary operator received its right operand without a left one.
    #[display("operator {_0} is missing its left operand")]
    MissingLeftOperand(OperatorKind),

    /// A binary operator was chained directly after another operator.
    #[display("operator {outer} cannot take operator {inner} as its left operand")]
    OperatorAsOperand {
        outer: OperatorKind,
        inner: OperatorKind,
    },
}

/// Errors raised while resolving or folding an access-rule expression.
///
/// Both variants are static configuration defects: retrying the same rules
/// against the same request always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ExpressionError {
    /// A rule entry could not be mapped to a token.
    #[display("invalid token: {entry}")]
    InvalidToken { entry: String },

    /// The token sequence does not describe a complete expression.
    #[display("malformed expression: {reason}")]
    MalformedExpression { reason: Malformed },
}

impl ExpressionError {
    pub fn invalid_token(entry: impl Into<String>) -> Self {
        ExpressionError::InvalidToken {
            entry: entry.into(),
        }
    }

    pub fn malformed(reason: Malformed) -> Self {
        ExpressionError::MalformedExpression { reason }
    }
}
