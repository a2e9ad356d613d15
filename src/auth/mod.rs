pub mod extractors;
pub mod password;
pub mod token;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthedUser;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenIssuer};

/// Name of the HTTP-only cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Represents the payload for a new account registration.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account.
    #[validate(email)]
    pub email: String,
    /// Password for the new account. Must be at least 8 characters long.
    #[validate(length(min = 8))]
    pub password: String,
}

/// Represents the payload for a login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

/// Response body after a successful login or token refresh.
///
/// Only the access token travels in the body; the refresh token is set as a
/// cookie and never appears here.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
}

/// Builds the refresh-token cookie set on login and rotated on refresh.
pub fn refresh_token_cookie(value: String) -> Cookie<'static> {
    Cookie::build(REFRESH_TOKEN_COOKIE, value)
        .http_only(true)
        .max_age(CookieDuration::days(1))
        .finish()
}
