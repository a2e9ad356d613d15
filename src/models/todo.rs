use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A todo entity as stored in the database and returned by the API.
///
/// `deleted` is a tombstone: soft-deleted todos stay in the table and remain
/// visible to reads, the flag only blocks a second delete.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier for the todo (UUID v4).
    pub id: Uuid,
    /// Identifier of the user who owns the todo.
    pub owner_id: Uuid,
    /// Free-text content.
    pub content: String,
    pub completed: bool,
    pub deleted: bool,
}

/// Input for creating a todo.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1))]
    pub content: String,
}

/// Patch for an existing todo. At least one field must be present.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[validate(schema(function = "at_least_one_field"))]
pub struct UpdateTodoRequest {
    #[validate(length(min = 1))]
    pub content: Option<String>,
    pub completed: Option<bool>,
}

fn at_least_one_field(patch: &UpdateTodoRequest) -> Result<(), ValidationError> {
    if patch.content.is_none() && patch.completed.is_none() {
        return Err(ValidationError::new("at_least_one_field"));
    }
    Ok(())
}
