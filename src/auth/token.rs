use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::PublicUser;

/// The claim set embedded in both access and refresh tokens.
///
/// Claims are built from the public user projection only; the password hash
/// never enters a token payload. `jti` is a fresh UUID per issuance, so
/// rotating a refresh token always produces a value distinct from its
/// predecessor even within the same second.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's unique identifier.
    pub sub: Uuid,
    /// The user's email, used to re-resolve the account on refresh.
    pub email: String,
    /// Issuance timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
    /// Unique token id.
    pub jti: Uuid,
}

/// Signs and verifies session tokens.
///
/// Constructed once from the configured secret and shared across workers as
/// app data. Access tokens live for 20 minutes, refresh tokens for a day.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a short-lived token authorizing API calls.
    pub fn issue_access_token(&self, user: &PublicUser) -> Result<String, AppError> {
        self.issue(user, Duration::minutes(20))
    }

    /// Issues a long-lived token used to mint new access tokens. Delivered
    /// to clients only via an HTTP-only cookie.
    pub fn issue_refresh_token(&self, user: &PublicUser) -> Result<String, AppError> {
        self.issue(user, Duration::days(1))
    }

    fn issue(&self, user: &PublicUser, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let expiry = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::Internal("token expiry out of range".into()))?;

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            iat: now.timestamp() as usize,
            exp: expiry.timestamp() as usize,
            jti: Uuid::new_v4(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verifies a token's signature and expiry and decodes its claims.
    ///
    /// Malformed, tampered, and expired tokens all fail the same way: a
    /// generic `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Unauthorised".into()))
    }
}
