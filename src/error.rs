//!
//! # Error handling
//!
//! This module defines the error type `AppError` used throughout the
//! application. Handlers return `Result<impl Responder, AppError>` and the
//! `ResponseError` implementation is the single place where domain errors are
//! translated into HTTP responses with the `{message, details}` body shape.
//!
//! Server-side failures (5xx) are logged with their real cause and answered
//! with an opaque body. Client-triggerable conditions (4xx) are never logged.
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError` route the
//! collaborator errors into this taxonomy via the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// The closed set of error conditions the API can answer with.
#[derive(Debug)]
pub enum AppError {
    /// A request body that failed schema validation (HTTP 400).
    /// Carries the validation detail returned to the client.
    Validation(String),
    /// A duplicate unique key, currently only the user email (HTTP 400).
    Conflict(String),
    /// Failed or missing authentication (HTTP 401). The message is kept
    /// generic: the client cannot tell a missing user from a bad password
    /// from a bad token.
    Unauthorized(String),
    /// A resource that does not exist for the caller (HTTP 404).
    NotFound(String),
    /// Any unexpected server-side failure (HTTP 500). The message is logged
    /// and never returned to the client.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(details) => HttpResponse::BadRequest().json(json!({
                "message": "Bad Request",
                "details": details
            })),
            AppError::Conflict(msg) => HttpResponse::BadRequest().json(json!({
                "message": msg,
                "details": {}
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "message": msg,
                "details": {}
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "message": msg,
                "details": {}
            })),
            AppError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "message": "Internal Service Error",
                    "details": {}
                }))
            }
        }
    }
}

/// `sqlx::Error::RowNotFound` maps to `NotFound`; everything else from the
/// database is an internal failure.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::Internal(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Token processing failures never reveal what went wrong.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized("Unauthorised".into())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
