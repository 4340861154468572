//! Pending operators inside a fold.

use super::error::{ExpressionError, Malformed};
use super::token::OperatorKind;

/// Left operand of an [`OperatorNode`].
///
/// An operator immediately followed by another operator is stored as the
/// second one's left operand until a concrete value arrives.
#[derive(Debug)]
pub enum Operand {
    Value(bool),
    Pending(Box<OperatorNode>),
}

/// What an [`OperatorNode`] can do with the operands it holds so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Still waiting for an operand.
    Waiting,
    /// Holds every operand its kind needs.
    Ready,
    /// Its value is already decided by the left operand. The whole
    /// remaining sequence collapses to this value.
    ShortCircuit(bool),
}

/// One operator marker accumulating its operands during a fold.
///
/// Nodes are created per marker, per evaluation, and mutated in place as
/// the fold assigns operands.
#[derive(Debug)]
pub struct OperatorNode {
    kind: OperatorKind,
    left: Option<Operand>,
    right: Option<bool>,
}

impl OperatorNode {
    /// Creates a node with no operands.
    pub fn new(kind: OperatorKind) -> Self {
        OperatorNode {
            kind,
            left: None,
            right: None,
        }
    }

    /// Returns the operator kind.
    pub fn kind(&self) -> OperatorKind {
        self.kind
    }

    pub fn set_left(&mut self, operand: Operand) {
        self.left = Some(operand);
    }

    pub fn set_right(&mut self, value: bool) {
        self.right = Some(value);
    }

    /// Reports whether the node can produce a value.
    ///
    /// AND and OR need both operands, NOT only its right one. A true left
    /// operand of OR, or a false left operand of AND, decides the node
    /// regardless of the right operand.
    pub fn readiness(&self) -> Readiness {
        match self.kind {
            OperatorKind::Or => match (&self.left, self.right) {
                (Some(Operand::Value(true)), _) => Readiness::ShortCircuit(true),
                (Some(_), Some(_)) => Readiness::Ready,
                _ => Readiness::Waiting,
            },
            OperatorKind::And => match (&self.left, self.right) {
                (Some(Operand::Value(false)), _) => Readiness::ShortCircuit(false),
                (Some(_), Some(_)) => Readiness::Ready,
                _ => Readiness::Waiting,
            },
            OperatorKind::Not => {
                if self.right.is_some() {
                    Readiness::Ready
                } else {
                    Readiness::Waiting
                }
            }
        }
    }

    /// Describes which operand a node that never became ready is missing.
    pub fn missing_operand(&self) -> Malformed {
        if self.right.is_none() {
            Malformed::DanglingOperator(self.kind)
        } else {
            Malformed::MissingLeftOperand(self.kind)
        }
    }

    /// Consumes the node and computes its value.
    ///
    /// A NOT whose left operand is another operator binds tighter than it:
    /// `[A, AND, NOT, B]` rewrites the AND's right operand to `!B` and
    /// evaluates the AND. A NOT after a plain value joins it with the
    /// implicit AND, so `[A, NOT, B]` is `A && !B`.
    pub fn evaluate(self) -> Result<bool, ExpressionError> {
        let right = self
            .right
            .ok_or_else(|| ExpressionError::malformed(Malformed::DanglingOperator(self.kind)))?;

        match self.kind {
            OperatorKind::And | OperatorKind::Or => {
                let left = match self.left {
                    Some(Operand::Value(left)) => left,
                    Some(Operand::Pending(inner)) => {
                        return Err(ExpressionError::malformed(Malformed::OperatorAsOperand {
                            outer: self.kind,
                            inner: inner.kind,
                        }));
                    }
                    None => {
                        return Err(ExpressionError::malformed(
                            Malformed::MissingLeftOperand(self.kind),
                        ));
                    }
                };
                Ok(match self.kind {
                    OperatorKind::And => left && right,
                    _ => left || right,
                })
            }
            OperatorKind::Not => match self.left {
                Some(Operand::Pending(mut inner)) => {
                    inner.set_right(!right);
                    inner.evaluate()
                }
                Some(Operand::Value(left)) => Ok(left && !right),
                None => Ok(!right),
            },
        }
    }
}
