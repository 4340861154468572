//! Access rule configuration.
//!
//! Rules are keyed by HTTP method and, optionally, by view action:
//!
//! ```text
//! GET    list     -> groups: ["admin"],   permissions: [IsAuthenticated]
//!        retrieve -> groups: ["__all__"], permissions: [IsAuthenticated, AND, [IsOwner, OR, IsAdminUser]]
//! PUT             -> groups: ["__all__"], permissions: [IsAuthenticated, [IsOwner, OR, IsAdminUser]]
//! ```
//!
//! Each list is an expression: names, permission classes, operator markers
//! and nested lists, folded by the [`Reducer`](super::expression::Reducer).
//! A missing method, a missing action or a missing list means "no rule
//! configured" and falls back to the guard's default decision.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use actix_web::http::Method;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use crate::http::security::expression::OperatorKind;
use crate::http::security::{Action, Permission};

/// Sentinel names that always resolve to `true`.
pub const ANY_SENTINELS: [&str; 2] = ["__all__", "__any__"];

/// `AND` marker.
pub const AND: RuleEntry = RuleEntry::Operator(OperatorKind::And);
/// `OR` marker.
pub const OR: RuleEntry = RuleEntry::Operator(OperatorKind::Or);
/// `NOT` marker.
pub const NOT: RuleEntry = RuleEntry::Operator(OperatorKind::Not);

/// One raw entry of a rule list, before it is resolved to a token.
#[derive(Clone)]
pub enum RuleEntry {
    /// `"__all__"` / `"__any__"`: always true
    Any,
    /// A group name, or a permission name in a `permissions` list
    Name(String),
    /// A permission class
    Permission(Arc<dyn Permission>),
    /// `AND` / `OR` / `NOT`
    Operator(OperatorKind),
    /// A nested list
    Nested(Vec<RuleEntry>),
    /// A value no other variant accepts; resolving it is an error
    Unrecognized(String),
}

impl RuleEntry {
    /// Classifies a string entry: sentinel, operator marker or name.
    pub fn name(name: &str) -> Self {
        if ANY_SENTINELS.contains(&name) {
            return RuleEntry::Any;
        }
        match OperatorKind::from_marker(name) {
            Some(kind) => RuleEntry::Operator(kind),
            None => RuleEntry::Name(name.to_string()),
        }
    }

    /// Wraps a permission class.
    pub fn permission<P: Permission + 'static>(permission: P) -> Self {
        RuleEntry::Permission(Arc::new(permission))
    }

    /// Creates a nested list.
    pub fn nested(entries: Vec<RuleEntry>) -> Self {
        RuleEntry::Nested(entries)
    }

    /// Classifies a raw JSON value.
    ///
    /// Strings and arrays are recognized; every other value is kept as
    /// [`RuleEntry::Unrecognized`] and only rejected if evaluation reaches it.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(name) => RuleEntry::name(name),
            Value::Array(entries) => {
                RuleEntry::Nested(entries.iter().map(RuleEntry::from_json).collect())
            }
            other => RuleEntry::Unrecognized(other.to_string()),
        }
    }
}

impl From<&str> for RuleEntry {
    fn from(name: &str) -> Self {
        RuleEntry::name(name)
    }
}

impl From<OperatorKind> for RuleEntry {
    fn from(kind: OperatorKind) -> Self {
        RuleEntry::Operator(kind)
    }
}

impl From<Vec<RuleEntry>> for RuleEntry {
    fn from(entries: Vec<RuleEntry>) -> Self {
        RuleEntry::Nested(entries)
    }
}

impl fmt::Debug for RuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleEntry::Any => f.write_str("Any"),
            RuleEntry::Name(name) => f.debug_tuple("Name").field(name).finish(),
            RuleEntry::Permission(_) => f.write_str("Permission(..)"),
            RuleEntry::Operator(kind) => write!(f, "{}", kind),
            RuleEntry::Nested(entries) => f.debug_list().entries(entries).finish(),
            RuleEntry::Unrecognized(raw) => f.debug_tuple("Unrecognized").field(raw).finish(),
        }
    }
}

impl<'de> Deserialize<'de> for RuleEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(RuleEntry::from_json(&value))
    }
}

/// Required groups and permissions for one method (and action).
///
/// `None` means the list is not configured, which is different from an
/// empty list: an empty expression is a configuration error.
///
/// # Example
/// ```
/// use actix_guard_core::http::security::rule::{AccessRule, RuleEntry, AND, OR};
/// use actix_guard_core::http::security::permission::{IsAdminUser, IsAuthenticated};
///
/// let rule = AccessRule::new()
///     .groups(vec!["__all__".into()])
///     .permissions(vec![
///         RuleEntry::permission(IsAuthenticated),
///         AND,
///         RuleEntry::nested(vec!["users.change_user".into(), OR, RuleEntry::permission(IsAdminUser)]),
///     ]);
/// assert!(rule.get_groups().is_some());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessRule {
    #[serde(default)]
    groups: Option<Vec<RuleEntry>>,
    #[serde(default)]
    permissions: Option<Vec<RuleEntry>>,
}

impl AccessRule {
    /// Creates a rule with neither list configured.
    pub fn new() -> Self {
        AccessRule::default()
    }

    /// Sets the required groups expression.
    pub fn groups(mut self, groups: Vec<RuleEntry>) -> Self {
        self.groups = Some(groups);
        self
    }

    /// Sets the required permissions expression.
    pub fn permissions(mut self, permissions: Vec<RuleEntry>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn get_groups(&self) -> Option<&[RuleEntry]> {
        self.groups.as_deref()
    }

    pub fn get_permissions(&self) -> Option<&[RuleEntry]> {
        self.permissions.as_deref()
    }
}

/// The rules for one HTTP method.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MethodRules {
    /// One rule for every action under this method.
    Rule(AccessRule),
    /// A rule per action name; unlisted actions are unconfigured.
    Actions(HashMap<String, AccessRule>),
}

/// Access rules of a view, keyed by HTTP method.
///
/// # Example
/// ```
/// use actix_web::http::Method;
/// use actix_guard_core::http::security::{Action, AccessRule, AccessRules};
///
/// let rules = AccessRules::new()
///     .action(Method::GET, Action::List, AccessRule::new().groups(vec!["admin".into()]))
///     .rule(Method::DELETE, AccessRule::new().groups(vec!["admin".into()]));
///
/// assert!(rules.lookup(&Method::GET, &Action::List).is_some());
/// assert!(rules.lookup(&Method::GET, &Action::Retrieve).is_none());
/// assert!(rules.lookup(&Method::DELETE, &Action::Destroy).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccessRules {
    methods: HashMap<String, MethodRules>,
}

/// Method keys must be spelled the way requests report them. A key that
/// could never match, such as `"delete"`, is rejected instead of leaving
/// the method unconfigured.
impl<'de> Deserialize<'de> for AccessRules {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, MethodRules>::deserialize(deserializer)?;

        let mut methods = HashMap::with_capacity(raw.len());
        for (key, rules) in raw {
            let method = Method::from_bytes(key.as_bytes())
                .map_err(|_| de::Error::custom(format!("invalid HTTP method `{}`", key)))?;
            if key != key.to_ascii_uppercase() {
                return Err(de::Error::custom(format!(
                    "HTTP method `{}` must be upper case (`{}`)",
                    key,
                    key.to_ascii_uppercase()
                )));
            }
            methods.insert(method.as_str().to_string(), rules);
        }
        Ok(AccessRules { methods })
    }
}

impl AccessRules {
    /// Creates an empty rule table.
    pub fn new() -> Self {
        AccessRules::default()
    }

    /// Sets one rule for every action under a method.
    pub fn rule(mut self, method: Method, rule: AccessRule) -> Self {
        self.methods
            .insert(method.as_str().to_string(), MethodRules::Rule(rule));
        self
    }

    /// Sets the rule for one action under a method.
    ///
    /// Replaces a method-wide rule previously set with [`rule`](Self::rule).
    pub fn action(mut self, method: Method, action: Action, rule: AccessRule) -> Self {
        let key = method.as_str().to_string();
        let mut actions = match self.methods.remove(&key) {
            Some(MethodRules::Actions(actions)) => actions,
            _ => HashMap::new(),
        };
        actions.insert(action.as_str().to_string(), rule);
        self.methods.insert(key, MethodRules::Actions(actions));
        self
    }

    /// Finds the rule that applies to a method and action.
    ///
    /// Returns `None` when nothing is configured for them.
    pub fn lookup(&self, method: &Method, action: &Action) -> Option<&AccessRule> {
        match self.methods.get(method.as_str())? {
            MethodRules::Rule(rule) => Some(rule),
            MethodRules::Actions(actions) => actions.get(action.as_str()),
        }
    }

    /// Parses rules from a JSON value.
    ///
    /// Method keys are upper-case HTTP methods. Each value is either a rule
    /// object (`{"groups": [...], "permissions": [...]}`) or an object mapping
    /// action names to rule objects.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
