//! Access guard: turns access rules into allow/deny decisions.
//!
//! The guard resolves every entry of a rule list to an expression token
//! (group membership, user permission, permission class, operator or nested
//! list) and lets the [`Reducer`] fold them into a verdict.

use std::any::Any;
use std::fmt;

use crate::http::error::AuthError;
use crate::http::security::expression::{ExpressionError, Reducer, Token};
use crate::http::security::permission::{Permission, PermissionRegistry};
use crate::http::security::rule::{AccessRule, AccessRules, RuleEntry};
use crate::http::security::{AccessRequest, Action};

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

impl From<bool> for Decision {
    fn from(allowed: bool) -> Self {
        if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}

/// Which list of a rule an entry belongs to. Names mean group names in
/// one and permission names in the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Groups,
    Permissions,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Groups => f.write_str("groups"),
            RuleKind::Permissions => f.write_str("permissions"),
        }
    }
}

/// Per-view access control driven by [`AccessRules`].
///
/// A request passes when both its required groups and its required
/// permissions evaluate to `true`. Checks run in two phases:
///
/// - [`has_permission`](Self::has_permission) before the target object is
///   loaded. Group rules of `retrieve` are deferred to the object phase.
/// - [`has_object_permission`](Self::has_object_permission) with the
///   object. Group rules of `list` were already decided in the first phase.
///
/// # Example
/// ```
/// use actix_web::http::Method;
/// use actix_guard_core::http::security::rule::AND;
/// use actix_guard_core::http::security::{
///     AccessGuard, AccessRequest, AccessRule, AccessRules, Action, Decision, User,
/// };
///
/// let guard = AccessGuard::new(AccessRules::new().action(
///     Method::GET,
///     Action::List,
///     AccessRule::new()
///         .groups(vec!["admin".into()])
///         .permissions(vec!["IsAuthenticated".into(), AND, "users.view_user".into()]),
/// ));
///
/// let method = Method::GET;
/// let admin = User::new("admin").groups(&["admin"]).permissions(&["users.view_user"]);
/// let student = User::new("student").groups(&["student"]);
///
/// let request = AccessRequest::new(&method, Action::List, Some(&admin));
/// assert_eq!(guard.has_permission(&request).unwrap(), Decision::Allow);
///
/// let request = AccessRequest::new(&method, Action::List, Some(&student));
/// assert_eq!(guard.has_permission(&request).unwrap(), Decision::Deny);
/// ```
#[derive(Debug, Clone)]
pub struct AccessGuard {
    rules: AccessRules,
    registry: PermissionRegistry,
    unconfigured: Decision,
    reducer: Reducer,
}

impl AccessGuard {
    /// Creates a guard with the built-in permission classes registered and
    /// unconfigured rules allowing access.
    pub fn new(rules: AccessRules) -> Self {
        AccessGuard {
            rules,
            registry: PermissionRegistry::with_defaults(),
            unconfigured: Decision::Allow,
            reducer: Reducer::new(),
        }
    }

    /// Registers a permission class that rules can refer to by name.
    pub fn permission<P: Permission + 'static>(mut self, name: &str, permission: P) -> Self {
        self.registry = self.registry.register(name, permission);
        self
    }

    /// Replaces the permission registry, built-ins included.
    pub fn registry(mut self, registry: PermissionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the decision used when no rule is configured (default: allow).
    pub fn unconfigured(mut self, decision: Decision) -> Self {
        self.unconfigured = decision;
        self
    }

    pub fn get_rules(&self) -> &AccessRules {
        &self.rules
    }

    /// Resolves one rule entry to an expression token.
    ///
    /// Names are group memberships in a groups list. In a permissions list
    /// they are registered permission classes, or else user permission
    /// identifiers. Permission classes see the object when one is given.
    /// Nested lists are resolved in full.
    ///
    /// # Errors
    /// `InvalidToken` for unrecognized entries and for permission classes
    /// placed in a groups list.
    pub fn resolve_token(
        &self,
        entry: &RuleEntry,
        list: RuleKind,
        request: &AccessRequest<'_>,
        object: Option<&dyn Any>,
    ) -> Result<Token, ExpressionError> {
        let token = match entry {
            RuleEntry::Any => Token::Bool(true),
            RuleEntry::Operator(kind) => Token::Operator(*kind),
            RuleEntry::Nested(entries) => Token::SubExpression(
                entries
                    .iter()
                    .map(|entry| self.resolve_token(entry, list, request, object))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            RuleEntry::Name(name) => match list {
                RuleKind::Groups => Token::Bool(request.user().is_some_and(|u| u.in_group(name))),
                RuleKind::Permissions => match self.registry.get(name) {
                    Some(permission) => Token::Bool(check(permission.as_ref(), request, object)),
                    None => Token::Bool(request.user().is_some_and(|u| u.has_perm(name))),
                },
            },
            RuleEntry::Permission(permission) => match list {
                RuleKind::Permissions => Token::Bool(check(permission.as_ref(), request, object)),
                RuleKind::Groups => {
                    return Err(ExpressionError::invalid_token(
                        "permission class in a groups list",
                    ));
                }
            },
            RuleEntry::Unrecognized(raw) => {
                return Err(ExpressionError::invalid_token(raw.clone()));
            }
        };
        Ok(token)
    }

    /// Evaluates one rule list. `None` yields the unconfigured decision.
    ///
    /// Top-level entries are resolved only as the fold reaches them.
    fn evaluate(
        &self,
        entries: Option<&[RuleEntry]>,
        list: RuleKind,
        request: &AccessRequest<'_>,
        object: Option<&dyn Any>,
    ) -> Result<bool, ExpressionError> {
        let Some(entries) = entries else {
            log::debug!(
                "no {} rule for {} {}, falling back to {:?}",
                list,
                request.method(),
                request.action(),
                self.unconfigured
            );
            return Ok(self.unconfigured.is_allowed());
        };

        let allowed = self.reducer.try_evaluate(
            entries
                .iter()
                .map(|entry| self.resolve_token(entry, list, request, object)),
        )?;
        log::trace!(
            "{} rule for {} {} evaluated to {}",
            list,
            request.method(),
            request.action(),
            allowed
        );
        Ok(allowed)
    }

    /// Checks a groups expression for the request's user.
    pub fn has_required_groups(
        &self,
        request: &AccessRequest<'_>,
        groups: Option<&[RuleEntry]>,
    ) -> Result<bool, ExpressionError> {
        self.evaluate(groups, RuleKind::Groups, request, None)
    }

    /// Checks a permissions expression, at object level when `object` is set.
    pub fn has_required_permissions(
        &self,
        request: &AccessRequest<'_>,
        permissions: Option<&[RuleEntry]>,
        object: Option<&dyn Any>,
    ) -> Result<bool, ExpressionError> {
        self.evaluate(permissions, RuleKind::Permissions, request, object)
    }

    /// Request-level check, before the target object is loaded.
    pub fn has_permission(&self, request: &AccessRequest<'_>) -> Result<Decision, ExpressionError> {
        let rule = self.rules.lookup(request.method(), request.action());

        let groups = match request.action() {
            Action::Retrieve => true,
            _ => self.has_required_groups(request, rule.and_then(AccessRule::get_groups))?,
        };
        if !groups {
            return Ok(Decision::Deny);
        }

        let permissions =
            self.has_required_permissions(request, rule.and_then(AccessRule::get_permissions), None)?;
        Ok(Decision::from(permissions))
    }

    /// Object-level check, once the target object is loaded.
    pub fn has_object_permission(
        &self,
        request: &AccessRequest<'_>,
        object: &dyn Any,
    ) -> Result<Decision, ExpressionError> {
        let rule = self.rules.lookup(request.method(), request.action());

        let groups = match request.action() {
            Action::List => true,
            _ => self.has_required_groups(request, rule.and_then(AccessRule::get_groups))?,
        };
        if !groups {
            return Ok(Decision::Deny);
        }

        let permissions = self.has_required_permissions(
            request,
            rule.and_then(AccessRule::get_permissions),
            Some(object),
        )?;
        Ok(Decision::from(permissions))
    }

    /// Runs [`has_permission`](Self::has_permission) and maps the outcome
    /// to an HTTP error.
    ///
    /// # Returns
    /// * `Ok(())` - Access granted
    /// * `Err(AuthError::Unauthorized)` - Denied, no user on the request
    /// * `Err(AuthError::Forbidden)` - Denied, authenticated user
    /// * `Err(AuthError::Misconfigured)` - The rules could not be evaluated
    pub fn authorize(&self, request: &AccessRequest<'_>) -> Result<(), AuthError> {
        self.enforce(request, self.has_permission(request))
    }

    /// Runs [`has_object_permission`](Self::has_object_permission) and maps
    /// the outcome like [`authorize`](Self::authorize).
    pub fn authorize_object(
        &self,
        request: &AccessRequest<'_>,
        object: &dyn Any,
    ) -> Result<(), AuthError> {
        self.enforce(request, self.has_object_permission(request, object))
    }

    fn enforce(
        &self,
        request: &AccessRequest<'_>,
        outcome: Result<Decision, ExpressionError>,
    ) -> Result<(), AuthError> {
        let username = request.user().map(|u| u.get_username()).unwrap_or("<anonymous>");
        match outcome {
            Ok(Decision::Allow) => Ok(()),
            Ok(Decision::Deny) => {
                log::warn!(
                    "access denied: {} {} for {}",
                    request.method(),
                    request.action(),
                    username
                );
                if request.is_authenticated() {
                    Err(AuthError::Forbidden)
                } else {
                    Err(AuthError::Unauthorized)
                }
            }
            Err(err) => {
                log::error!(
                    "access rules for {} {} are misconfigured: {}",
                    request.method(),
                    request.action(),
                    err
                );
                Err(AuthError::Misconfigured(err))
            }
        }
    }
}

fn check(permission: &dyn Permission, request: &AccessRequest<'_>, object: Option<&dyn Any>) -> bool {
    match object {
        Some(object) => permission.has_object_permission(request, object),
        None => permission.has_permission(request),
    }
}
