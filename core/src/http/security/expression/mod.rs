//! Access-rule expression engine.
//!
//! # Overview
//! Access rules are written as flat lists mixing checks, operator markers
//! and nested lists. By the time they reach this module every check has been
//! resolved to a boolean, so an expression is a sequence of [`Token`]s that
//! the [`Reducer`] folds into a single verdict.
//!
//! # Tokens
//! - `Bool(b)` - A resolved check
//! - `Operator(AND | OR | NOT)` - An operator marker
//! - `SubExpression(tokens)` - A nested list, reduced before it is folded
//!   into its parent
//!
//! # Folding rules
//! - No precedence: the sequence is folded left to right
//! - Adjacent operands without an operator are ANDed
//! - `NOT` binds to the operand that follows it
//! - An OR with a true left side, or an AND with a false left side,
//!   decides the whole remaining sequence at its nesting level
//!
//! # Examples
//! ```
//! use actix_guard_core::http::security::expression::{evaluate, Token};
//!
//! // IsAuthenticated AND (IsSelfUser OR IsAdminUser)
//! let allowed = evaluate(vec![
//!     Token::Bool(true),
//!     Token::and(),
//!     Token::group(vec![Token::Bool(false), Token::or(), Token::Bool(true)]),
//! ])?;
//! assert!(allowed);
//! # Ok::<(), actix_guard_core::http::security::expression::ExpressionError>(())
//! ```

mod error;
mod operator;
mod reducer;
mod token;

pub use error::{ExpressionError, Malformed};
pub use operator::{Operand, OperatorNode, Readiness};
pub use reducer::{evaluate, FoldState, FoldStep, Reducer};
pub use token::{OperatorKind, Token};
