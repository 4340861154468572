//! Extractors and request helpers for guarded handlers.
//!
//! The user is read from the request extensions, where an identity
//! middleware put it. A request without a `User` is anonymous.

use std::any::Any;
use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::http::error::AuthError;
use crate::http::security::guard::AccessGuard;
use crate::http::security::{AccessRequest, Action, User};

/// Extractor for the current user, `None` when anonymous.
///
/// # Usage
/// ```ignore
/// use actix_guard_core::http::security::OptionalUser;
///
/// async fn handler(user: OptionalUser) -> impl Responder {
///     match user.into_inner() {
///         Some(u) => format!("Hello, {}!", u.get_username()),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OptionalUser(Option<User>);

impl OptionalUser {
    pub fn into_inner(self) -> Option<User> {
        self.0
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl Deref for OptionalUser {
    type Target = Option<User>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for OptionalUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalUser(req.get_user())))
    }
}

/// Extension trait running an [`AccessGuard`] against an `HttpRequest`.
///
/// # Usage
/// ```ignore
/// async fn retrieve(
///     req: HttpRequest,
///     guard: web::Data<AccessGuard>,
///     path: web::Path<String>,
/// ) -> Result<HttpResponse, actix_web::Error> {
///     req.authorize(&guard, Action::Retrieve)?;
///     let user = load(&path)?;
///     req.authorize_object(&guard, Action::Retrieve, &user)?;
///     Ok(HttpResponse::Ok().json(user))
/// }
/// ```
pub trait GuardExt {
    /// Returns a clone of the current user if present.
    fn get_user(&self) -> Option<User>;

    /// Request-level check for `action`.
    fn authorize(&self, guard: &AccessGuard, action: Action) -> Result<(), AuthError>;

    /// Object-level check for `action` on a loaded object.
    fn authorize_object(
        &self,
        guard: &AccessGuard,
        action: Action,
        object: &dyn Any,
    ) -> Result<(), AuthError>;
}

impl GuardExt for HttpRequest {
    fn get_user(&self) -> Option<User> {
        self.extensions().get::<User>().cloned()
    }

    fn authorize(&self, guard: &AccessGuard, action: Action) -> Result<(), AuthError> {
        let user = self.get_user();
        let request = AccessRequest::new(self.method(), action, user.as_ref());
        guard.authorize(&request)
    }

    fn authorize_object(
        &self,
        guard: &AccessGuard,
        action: Action,
        object: &dyn Any,
    ) -> Result<(), AuthError> {
        let user = self.get_user();
        let request = AccessRequest::new(self.method(), action, user.as_ref());
        guard.authorize_object(&request, object)
    }
}
