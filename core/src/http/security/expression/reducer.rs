//! Fold driver for access-rule expressions.
//!
//! Folds a flat, possibly nested token sequence into a single boolean.

use super::error::{ExpressionError, Malformed};
use super::operator::{Operand, OperatorNode, Readiness};
use super::token::Token;

/// Accumulator of the left fold.
#[derive(Debug)]
pub enum FoldState {
    /// A resolved value.
    Value(bool),
    /// An operator still waiting for operands.
    Pending(OperatorNode),
}

/// Outcome of one fold step.
#[derive(Debug)]
pub enum FoldStep {
    /// Keep folding with the new accumulator.
    Continue(FoldState),
    /// The whole sequence is decided; stop pulling tokens.
    Done(bool),
}

/// Reduces token sequences to a single authorization verdict.
///
/// # Semantics
/// The sequence has no operator precedence. It is folded strictly left to
/// right:
///
/// - Adjacent operands without an operator between them are ANDed, so
///   `[a, b, c]` is `a && b && c`.
/// - `[a, OR, b]`, `[a, AND, b]` combine the neighbouring operands.
/// - `[NOT, b]` is `!b`; `[a, NOT, b]` is `a && !b`; `[a, OR, NOT, b]` is
///   `a || !b`.
/// - A [`Token::SubExpression`] is reduced on its own before it joins its
///   parent.
///
/// # Short-circuit
/// Once an OR receives a true left operand, or an AND a false one, the fold
/// stops and that value becomes the result of the **whole** sequence at
/// that nesting level. Tokens after it are never pulled from the source, so
/// `[true, OR, false, AND, false]` is `true`.
///
/// A short-circuit inside a sub-expression only ends that sub-expression.
/// Operands that must always be combined with the rest of a sequence have
/// to be grouped in a sub-expression: `[[a, OR, b], AND, c]` is
/// `(a || b) && c`, while `[a, OR, b, AND, c]` is `true` as soon as `a` is.
///
/// # Example
/// ```
/// use actix_guard_core::http::security::expression::{Reducer, Token};
///
/// let reducer = Reducer::new();
/// let verdict = reducer
///     .evaluate(vec![
///         Token::Bool(true),
///         Token::and(),
///         Token::group(vec![Token::Bool(false), Token::or(), Token::Bool(true)]),
///     ])
///     .unwrap();
/// assert!(verdict);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Reducer;

impl Reducer {
    /// Creates a new reducer.
    pub fn new() -> Self {
        Reducer
    }

    /// Evaluates a sequence of resolved tokens.
    ///
    /// # Returns
    /// * `Ok(true)` / `Ok(false)` - The verdict
    /// * `Err(ExpressionError::MalformedExpression)` - The sequence is empty
    ///   or ends on an operator that never received its operands
    pub fn evaluate<I>(&self, tokens: I) -> Result<bool, ExpressionError>
    where
        I: IntoIterator<Item = Token>,
    {
        self.try_evaluate(tokens.into_iter().map(Ok))
    }

    /// Evaluates a lazily resolved token sequence.
    ///
    /// Tokens are pulled one at a time. A resolution error is returned as
    /// soon as the fold reaches it, while entries skipped by a short-circuit
    /// are never resolved at all.
    pub fn try_evaluate<I>(&self, tokens: I) -> Result<bool, ExpressionError>
    where
        I: IntoIterator<Item = Result<Token, ExpressionError>>,
    {
        let mut tokens = tokens.into_iter();

        let first = tokens
            .next()
            .ok_or_else(|| ExpressionError::malformed(Malformed::Empty))??;

        let mut state = self.start(first)?;

        for token in tokens {
            match self.combine(state, token?)? {
                FoldStep::Continue(next) => state = next,
                FoldStep::Done(value) => return Ok(value),
            }
        }

        match state {
            FoldState::Value(value) => Ok(value),
            FoldState::Pending(node) => Err(ExpressionError::malformed(node.missing_operand())),
        }
    }

    /// Turns the first token into the initial accumulator.
    fn start(&self, token: Token) -> Result<FoldState, ExpressionError> {
        Ok(match token {
            Token::Bool(value) => FoldState::Value(value),
            Token::Operator(kind) => FoldState::Pending(OperatorNode::new(kind)),
            Token::SubExpression(tokens) => FoldState::Value(self.evaluate(tokens)?),
        })
    }

    /// One step of the left fold.
    pub fn combine(&self, left: FoldState, right: Token) -> Result<FoldStep, ExpressionError> {
        match (left, right) {
            (FoldState::Pending(left), Token::Operator(kind)) => {
                log::trace!("chaining {} after pending {}", kind, left.kind());
                let mut node = OperatorNode::new(kind);
                node.set_left(Operand::Pending(Box::new(left)));
                Ok(FoldStep::Continue(FoldState::Pending(node)))
            }
            (left, Token::SubExpression(tokens)) => {
                let value = self.evaluate(tokens)?;
                self.combine(left, Token::Bool(value))
            }
            (FoldState::Pending(mut node), Token::Bool(value)) => {
                node.set_right(value);
                self.settle(node)
            }
            (FoldState::Value(value), Token::Operator(kind)) => {
                let mut node = OperatorNode::new(kind);
                node.set_left(Operand::Value(value));
                self.settle(node)
            }
            (FoldState::Value(left), Token::Bool(right)) => {
                Ok(FoldStep::Continue(FoldState::Value(left && right)))
            }
        }
    }

    /// Evaluates a node once it has what it needs.
    fn settle(&self, node: OperatorNode) -> Result<FoldStep, ExpressionError> {
        match node.readiness() {
            Readiness::ShortCircuit(value) => {
                log::debug!("{} short-circuited the expression to {}", node.kind(), value);
                Ok(FoldStep::Done(value))
            }
            Readiness::Ready => Ok(FoldStep::Continue(FoldState::Value(node.evaluate()?))),
            Readiness::Waiting => Ok(FoldStep::Continue(FoldState::Pending(node))),
        }
    }
}

/// Evaluates a token sequence with a default [`Reducer`].
pub fn evaluate(tokens: Vec<Token>) -> Result<bool, ExpressionError> {
    Reducer::new().evaluate(tokens)
}
