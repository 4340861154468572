//! # Actix Guard
//!
//! Per-view access rules for Actix Web, written as small boolean
//! expressions over group membership, user permissions and permission
//! classes.
//!
//! ## Example
//!
//! ```rust,ignore
//! use actix_web::{get, web, HttpRequest, HttpResponse};
//! use actix_guard_core::http::error::AuthError;
//! use actix_guard_core::http::security::{AccessGuard, Action, GuardExt};
//!
//! #[get("/users")]
//! async fn list(req: HttpRequest, guard: web::Data<AccessGuard>) -> Result<HttpResponse, AuthError> {
//!     req.authorize(&guard, Action::List)?;
//!     Ok(HttpResponse::Ok().finish())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`http::security`] - Rules, permission classes, the expression engine and the guard
//! - [`http::error`] - Error types

pub mod http;
