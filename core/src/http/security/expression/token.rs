//! Tokens of an access-rule expression.

use std::fmt;

/// The operator carried by an operator marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Logical AND (both operands must be true)
    And,
    /// Logical OR (at least one operand must be true)
    Or,
    /// Logical NOT (negates its right operand)
    Not,
}

impl OperatorKind {
    /// Maps a configuration marker (`"AND"`, `"OR"`, `"NOT"`) to its operator.
    ///
    /// Markers are case-sensitive so that a group called `or` stays a group.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "AND" => Some(OperatorKind::And),
            "OR" => Some(OperatorKind::Or),
            "NOT" => Some(OperatorKind::Not),
            _ => None,
        }
    }

    /// Returns the configuration marker for this operator.
    pub fn marker(&self) -> &'static str {
        match self {
            OperatorKind::And => "AND",
            OperatorKind::Or => "OR",
            OperatorKind::Not => "NOT",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// One element of the sequence handed to the [`Reducer`](super::Reducer).
///
/// Operands are already resolved to booleans by the time they become tokens;
/// only operator markers wait for the fold to bind their operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A resolved predicate result
    Bool(bool),

    /// An operator marker, e.g. `OR`
    Operator(OperatorKind),

    /// A nested sequence, reduced to a single boolean before it is folded
    /// into its parent
    /// e.g., `[IsSelfUser, OR, IsAdminUser]`
    SubExpression(Vec<Token>),
}

impl Token {
    /// Creates an AND marker.
    pub fn and() -> Self {
        Token::Operator(OperatorKind::And)
    }

    /// Creates an OR marker.
    pub fn or() -> Self {
        Token::Operator(OperatorKind::Or)
    }

    /// Creates a NOT marker.
    #[allow(clippy::should_implement_trait)]
    pub fn not() -> Self {
        Token::Operator(OperatorKind::Not)
    }

    /// Creates a nested sub-expression.
    pub fn group(tokens: Vec<Token>) -> Self {
        Token::SubExpression(tokens)
    }
}

impl From<bool> for Token {
    fn from(value: bool) -> Self {
        Token::Bool(value)
    }
}

impl From<OperatorKind> for Token {
    fn from(kind: OperatorKind) -> Self {
        Token::Operator(kind)
    }
}

impl From<Vec<Token>> for Token {
    fn from(tokens: Vec<Token>) -> Self {
        Token::SubExpression(tokens)
    }
}
