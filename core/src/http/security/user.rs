//! User model consulted by access rules.

use std::fmt;

/// An authenticated user as seen by the access rules.
///
/// Authentication itself happens elsewhere; whatever authenticates the
/// request stores a `User` in the request extensions.
///
/// # Example
/// ```
/// use actix_guard_core::http::security::User;
///
/// let user = User::new("alice")
///     .groups(&["teacher"])
///     .permissions(&["users.view_user"]);
///
/// assert!(user.in_group("teacher"));
/// assert!(user.has_perm("users.view_user"));
/// assert!(!user.is_staff());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    username: String,
    groups: Vec<String>,
    permissions: Vec<String>,
    staff: bool,
    superuser: bool,
}

impl User {
    /// Creates a user with no groups, no permissions and no flags.
    pub fn new(username: impl Into<String>) -> Self {
        User {
            username: username.into(),
            groups: Vec::new(),
            permissions: Vec::new(),
            staff: false,
            superuser: false,
        }
    }

    /// Returns the username.
    pub fn get_username(&self) -> &str {
        &self.username
    }

    /// Returns the names of the groups the user belongs to.
    pub fn get_groups(&self) -> &[String] {
        &self.groups
    }

    /// Returns the permission identifiers granted directly to the user.
    pub fn get_permissions(&self) -> &[String] {
        &self.permissions
    }

    /// Adds groups (builder pattern). Duplicates are ignored.
    pub fn groups(mut self, groups: &[&str]) -> Self {
        for group in groups {
            if !self.in_group(group) {
                self.groups.push(group.to_string());
            }
        }
        self
    }

    /// Adds permissions (builder pattern). Duplicates are ignored.
    pub fn permissions(mut self, permissions: &[&str]) -> Self {
        for permission in permissions {
            if !self.permissions.iter().any(|p| p == permission) {
                self.permissions.push(permission.to_string());
            }
        }
        self
    }

    /// Marks the user as staff (builder pattern).
    pub fn staff(mut self, staff: bool) -> Self {
        self.staff = staff;
        self
    }

    /// Marks the user as superuser (builder pattern).
    pub fn superuser(mut self, superuser: bool) -> Self {
        self.superuser = superuser;
        self
    }

    /// Checks group membership by name.
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// Checks a permission identifier. Superusers hold every permission.
    pub fn has_perm(&self, permission: &str) -> bool {
        self.superuser || self.permissions.iter().any(|p| p == permission)
    }

    pub fn is_staff(&self) -> bool {
        self.staff
    }

    pub fn is_superuser(&self) -> bool {
        self.superuser
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User {{ username: {}, groups: {:?}, permissions: {:?} }}",
            self.username, self.groups, self.permissions
        )
    }
}
