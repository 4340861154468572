//! The request facts access rules are evaluated against.

use std::fmt;

use actix_web::http::Method;

use crate::http::security::User;

/// A view action, the second key (after the HTTP method) of an access rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// `GET` on a collection
    List,
    /// `POST` on a collection
    Create,
    /// `GET` on a single object
    Retrieve,
    /// `PUT` on a single object
    Update,
    /// `PATCH` on a single object
    PartialUpdate,
    /// `DELETE` on a single object
    Destroy,
    /// Any other named action
    Custom(String),
}

impl Action {
    /// Maps an action name to an action. Unknown names become `Custom`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "list" => Action::List,
            "create" => Action::Create,
            "retrieve" => Action::Retrieve,
            "update" => Action::Update,
            "partial_update" => Action::PartialUpdate,
            "destroy" => Action::Destroy,
            other => Action::Custom(other.to_string()),
        }
    }

    /// Returns the action name used as a key in access rules.
    pub fn as_str(&self) -> &str {
        match self {
            Action::List => "list",
            Action::Create => "create",
            Action::Retrieve => "retrieve",
            Action::Update => "update",
            Action::PartialUpdate => "partial_update",
            Action::Destroy => "destroy",
            Action::Custom(name) => name,
        }
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        Action::from_name(name)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The method, action and user an access decision is made for.
#[derive(Debug, Clone)]
pub struct AccessRequest<'a> {
    method: &'a Method,
    action: Action,
    user: Option<&'a User>,
}

impl<'a> AccessRequest<'a> {
    pub fn new(method: &'a Method, action: Action, user: Option<&'a User>) -> Self {
        AccessRequest {
            method,
            action,
            user,
        }
    }

    pub fn method(&self) -> &Method {
        self.method
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Returns the authenticated user, `None` for anonymous requests.
    pub fn user(&self) -> Option<&'a User> {
        self.user
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
