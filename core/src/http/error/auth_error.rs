use actix_web::{error, http::StatusCode, HttpResponse, HttpResponseBuilder};
use derive_more::{Display, Error, From};

use crate::http::security::expression::ExpressionError;

#[derive(Debug, Display, Error, From)]
pub enum AuthError {
    #[display("forbidden")]
    #[from(ignore)]
    Forbidden,
    #[display("unauthorized")]
    #[from(ignore)]
    Unauthorized,
    /// The access rules themselves are broken; the request was not judged.
    #[display("access rules misconfigured: {_0}")]
    Misconfigured(ExpressionError),
}

impl error::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Misconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            // Rule details stay in the server log.
            AuthError::Misconfigured(_) => "internal server error".to_string(),
            other => other.to_string(),
        };
        HttpResponseBuilder::new(self.status_code()).body(body)
    }
}
