use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::{Claims, TokenIssuer};
use crate::error::AppError;

/// The verified identity of the caller.
///
/// Routes that require authentication declare this extractor as a handler
/// parameter. Extraction reads the `Authorization: Bearer` header and checks
/// the token against the [`TokenIssuer`] registered on the app; a missing or
/// invalid token resolves to a 401 before the handler body runs.
#[derive(Debug, Clone)]
pub struct AuthedUser(pub Claims);

impl FromRequest for AuthedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(AuthedUser).map_err(ActixError::from))
    }
}

fn authenticate(req: &HttpRequest) -> Result<Claims, AppError> {
    let issuer = req
        .app_data::<web::Data<TokenIssuer>>()
        .ok_or_else(|| AppError::Internal("TokenIssuer is not registered as app data".into()))?;

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Unauthorised".into()))?;

    issuer.verify(token)
}
