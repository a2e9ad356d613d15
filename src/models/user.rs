use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user row as stored, password hash included.
///
/// Deliberately not `Serialize`: the hash must never reach a response body
/// or a token payload, so this type cannot cross the wire at all.
#[derive(Debug, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub hash: String,
}

/// The public projection of a user: the only user shape returned by the API
/// and the only one embedded in token claims.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
}

impl User {
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email,
        }
    }
}
