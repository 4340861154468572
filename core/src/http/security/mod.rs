//! Access control for Actix Web views.
//!
//! # Module Structure
//!
//! - `expression` - Boolean rule expressions (tokens, operators, reducer)
//! - `rule` - Access rule configuration (per method and action)
//! - `permission` - Permission classes and the name registry
//! - `guard` - Evaluates rules for a request (AccessGuard)
//! - `extractor` - Actix Web extractors and request helpers
//! - `manager` - Factory methods (AuthorizationManager)
//! - `request` - The facts a decision is made on
//! - `user` - User model

pub use extractor::{GuardExt, OptionalUser};
pub use guard::{AccessGuard, Decision, RuleKind};
pub use manager::AuthorizationManager;
pub use permission::{Permission, PermissionRegistry};
pub use request::{AccessRequest, Action};
pub use rule::{AccessRule, AccessRules, MethodRules, RuleEntry};
pub use user::User;

pub mod expression;
pub mod guard;
pub mod permission;
pub mod rule;

mod extractor;
mod manager;
mod request;
mod user;
