use crate::http::security::guard::AccessGuard;
use crate::http::security::permission::PermissionRegistry;
use crate::http::security::rule::AccessRules;

pub struct AuthorizationManager {}

impl AuthorizationManager {
    /// Guard over `rules` with the built-in permission classes registered.
    pub fn access_guard(rules: AccessRules) -> AccessGuard {
        AccessGuard::new(rules)
    }

    /// Guard that resolves permission names against `registry` only.
    pub fn access_guard_with(rules: AccessRules, registry: PermissionRegistry) -> AccessGuard {
        AccessGuard::new(rules).registry(registry)
    }
}
