//! Permission classes usable as operands of access rules.
//!
//! A permission class is a reusable check placed directly in a rule's
//! `permissions` list, e.g. `[IsAuthenticated, AND, [IsOwner, OR, IsAdminUser]]`.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::http::security::AccessRequest;

/// Trait for custom permission checks.
///
/// Checks run in two phases: [`has_permission`](Permission::has_permission)
/// before the target object is loaded, and
/// [`has_object_permission`](Permission::has_object_permission) once it is.
/// Both default to `true`, so a class only overrides the phase it cares
/// about.
///
/// # Example
/// ```
/// use std::any::Any;
///
/// use actix_guard_core::http::security::{AccessRequest, Permission, User};
///
/// /// Only lets users act on their own account.
/// struct IsSelf;
///
/// impl Permission for IsSelf {
///     fn has_object_permission(&self, request: &AccessRequest<'_>, object: &dyn Any) -> bool {
///         match (request.user(), object.downcast_ref::<User>()) {
///             (Some(user), Some(target)) => user == target,
///             _ => false,
///         }
///     }
/// }
/// ```
pub trait Permission: Send + Sync {
    /// Request-level check, run without an object.
    fn has_permission(&self, _request: &AccessRequest<'_>) -> bool {
        true
    }

    /// Object-level check. The object is whatever the view loaded; downcast
    /// it to the concrete type the permission understands.
    fn has_object_permission(&self, _request: &AccessRequest<'_>, _object: &dyn Any) -> bool {
        true
    }
}

/// Allows every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAny;

impl Permission for AllowAny {}

/// Denies every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl Permission for DenyAll {
    fn has_permission(&self, _request: &AccessRequest<'_>) -> bool {
        false
    }

    fn has_object_permission(&self, _request: &AccessRequest<'_>, _object: &dyn Any) -> bool {
        false
    }
}

/// Allows authenticated users only.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsAuthenticated;

impl Permission for IsAuthenticated {
    fn has_permission(&self, request: &AccessRequest<'_>) -> bool {
        request.is_authenticated()
    }

    fn has_object_permission(&self, request: &AccessRequest<'_>, _object: &dyn Any) -> bool {
        request.is_authenticated()
    }
}

/// Allows staff users only.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsAdminUser;

impl Permission for IsAdminUser {
    fn has_permission(&self, request: &AccessRequest<'_>) -> bool {
        request.user().is_some_and(|u| u.is_staff())
    }

    fn has_object_permission(&self, request: &AccessRequest<'_>, _object: &dyn Any) -> bool {
        self.has_permission(request)
    }
}

/// Permission classes addressable by name.
///
/// Rules written as plain data (for example deserialized from JSON) refer to
/// permission classes by name; the registry maps those names back to
/// classes. A name in a `permissions` list that is not registered is
/// checked as a user permission identifier instead.
#[derive(Clone, Default)]
pub struct PermissionRegistry {
    permissions: HashMap<String, Arc<dyn Permission>>,
}

impl PermissionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        PermissionRegistry {
            permissions: HashMap::new(),
        }
    }

    /// Creates a registry holding the built-in classes:
    /// - `AllowAny`
    /// - `DenyAll`
    /// - `IsAuthenticated`
    /// - `IsAdminUser`
    pub fn with_defaults() -> Self {
        PermissionRegistry::new()
            .register("AllowAny", AllowAny)
            .register("DenyAll", DenyAll)
            .register("IsAuthenticated", IsAuthenticated)
            .register("IsAdminUser", IsAdminUser)
    }

    /// Registers a class under a name, replacing any previous one.
    pub fn register<P: Permission + 'static>(mut self, name: &str, permission: P) -> Self {
        self.permissions
            .insert(name.to_string(), Arc::new(permission));
        self
    }

    /// Looks up a class by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Permission>> {
        self.permissions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.permissions.contains_key(name)
    }
}

impl fmt::Debug for PermissionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.permissions.keys().collect();
        names.sort();
        f.debug_struct("PermissionRegistry")
            .field("permissions", &names)
            .finish()
    }
}
