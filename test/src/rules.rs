//! Access rules of the users view-set.
//!
//! ```text
//! GET    list     -> groups: ["admin"],   permissions: [IsAuthenticated]
//!        retrieve -> groups: ["__all__"], permissions: [IsAuthenticated, AND,
//!                                          [IsAllowedUser, OR, IsAdminUser, OR, IsTeacherAccessingStudent]]
//! PUT             -> groups: ["__all__"], permissions: [IsAuthenticated, [IsAllowedUser, OR, IsAdminUser]]
//! PATCH           -> same as PUT
//! DELETE          -> groups: ["admin"],   permissions: [IsAuthenticated]
//! ```
//!
//! The same table is available as code and as JSON.

use actix_web::http::Method;
use serde_json::{json, Value};

use actix_guard_core::http::security::permission::IsAuthenticated;
use actix_guard_core::http::security::rule::{AND, OR};
use actix_guard_core::http::security::{
    AccessGuard, AccessRule, AccessRules, Action, AuthorizationManager, RuleEntry,
};

use crate::permissions::{IsAdminUser, IsAllowedUser, IsTeacherAccessingStudent};

fn self_or_admin() -> AccessRule {
    AccessRule::new().groups(vec!["__all__".into()]).permissions(vec![
        RuleEntry::permission(IsAuthenticated),
        RuleEntry::nested(vec![
            RuleEntry::permission(IsAllowedUser),
            OR,
            RuleEntry::permission(IsAdminUser),
        ]),
    ])
}

fn admins_only() -> AccessRule {
    AccessRule::new()
        .groups(vec!["admin".into()])
        .permissions(vec![RuleEntry::permission(IsAuthenticated)])
}

/// Rules with permission classes placed directly in the lists.
pub fn user_access_rules() -> AccessRules {
    AccessRules::new()
        .action(Method::GET, Action::List, admins_only())
        .action(
            Method::GET,
            Action::Retrieve,
            AccessRule::new().groups(vec!["__all__".into()]).permissions(vec![
                RuleEntry::permission(IsAuthenticated),
                AND,
                RuleEntry::nested(vec![
                    RuleEntry::permission(IsAllowedUser),
                    OR,
                    RuleEntry::permission(IsAdminUser),
                    OR,
                    RuleEntry::permission(IsTeacherAccessingStudent),
                ]),
            ]),
        )
        .rule(Method::PUT, self_or_admin())
        .rule(Method::PATCH, self_or_admin())
        .rule(Method::DELETE, admins_only())
}

/// The same rules as plain data, naming permission classes.
pub fn user_access_rules_json() -> Value {
    let self_or_admin = json!({
        "groups": ["__all__"],
        "permissions": ["IsAuthenticated", ["IsAllowedUser", "OR", "IsAdminUser"]]
    });
    json!({
        "GET": {
            "list": {"groups": ["admin"], "permissions": ["IsAuthenticated"]},
            "retrieve": {
                "groups": ["__all__"],
                "permissions": [
                    "IsAuthenticated", "AND",
                    ["IsAllowedUser", "OR", "IsAdminUser", "OR", "IsTeacherAccessingStudent"]
                ]
            }
        },
        "PUT": self_or_admin.clone(),
        "PATCH": self_or_admin,
        "DELETE": {"groups": ["admin"], "permissions": ["IsAuthenticated"]}
    })
}

pub fn user_access_guard() -> AccessGuard {
    AuthorizationManager::access_guard(user_access_rules())
}

/// Guard over [`user_access_rules_json`], with the view-set's classes
/// registered by name. `IsAdminUser` replaces the built-in one.
pub fn json_access_guard() -> Result<AccessGuard, serde_json::Error> {
    let rules = AccessRules::from_json(user_access_rules_json())?;
    Ok(AuthorizationManager::access_guard(rules)
        .permission("IsAllowedUser", IsAllowedUser)
        .permission("IsAdminUser", IsAdminUser)
        .permission("IsTeacherAccessingStudent", IsTeacherAccessingStudent))
}
