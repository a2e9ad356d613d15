use crate::error::AppError;
use bcrypt::{hash, verify};

/// Hashes a password with a per-call random salt. The plaintext is never
/// stored or logged.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, 10)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}
