use crate::{
    auth::AuthedUser,
    error::AppError,
    models::{CreateTodoRequest, Todo, UpdateTodoRequest},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Adds a todo to the authenticated user's list.
///
/// New todos start out not completed and not deleted.
#[post("")]
pub async fn create_todo(
    pool: web::Data<PgPool>,
    authed: AuthedUser,
    payload: web::Json<CreateTodoRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let todo = sqlx::query_as::<_, Todo>(
        "INSERT INTO todos (id, owner_id, content) VALUES ($1, $2, $3) \
         RETURNING id, owner_id, content, completed, deleted",
    )
    .bind(Uuid::new_v4())
    .bind(authed.0.sub)
    .bind(&payload.content)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(todo))
}

/// Retrieves every todo owned by the authenticated user.
///
/// Soft-deleted todos are included; the tombstone flag does not filter
/// reads. No explicit ordering is applied.
#[get("")]
pub async fn list_todos(
    pool: web::Data<PgPool>,
    authed: AuthedUser,
) -> Result<impl Responder, AppError> {
    let todos = sqlx::query_as::<_, Todo>(
        "SELECT id, owner_id, content, completed, deleted FROM todos WHERE owner_id = $1",
    )
    .bind(authed.0.sub)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(todos))
}

/// Retrieves a single todo by id.
///
/// The todo is resolved by id first, so a missing id is a 404 while an id
/// owned by someone else is a 401. Soft-deleted todos are still returned.
#[get("/{id}")]
pub async fn get_todo(
    pool: web::Data<PgPool>,
    authed: AuthedUser,
    todo_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let id = todo_id.into_inner();

    let todo = sqlx::query_as::<_, Todo>(
        "SELECT id, owner_id, content, completed, deleted FROM todos WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Todo {} not found", id)))?;

    if todo.owner_id != authed.0.sub {
        return Err(AppError::Unauthorized("Unauthorised".into()));
    }

    Ok(HttpResponse::Ok().json(todo))
}

/// Applies a partial update to a todo the caller owns.
///
/// The update is scoped to id and owner in one statement; when no row
/// matches, the caller learns only "not found", whether the todo is missing
/// or belongs to someone else. On success the row is re-read and returned.
#[put("/{id}")]
pub async fn update_todo(
    pool: web::Data<PgPool>,
    authed: AuthedUser,
    todo_id: web::Path<Uuid>,
    payload: web::Json<UpdateTodoRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;
    let id = todo_id.into_inner();

    let result = sqlx::query(
        "UPDATE todos SET content = COALESCE($1, content), completed = COALESCE($2, completed) \
         WHERE id = $3 AND owner_id = $4",
    )
    .bind(&payload.content)
    .bind(payload.completed)
    .bind(id)
    .bind(authed.0.sub)
    .execute(&**pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Todo {} not found", id)));
    }

    let todo = sqlx::query_as::<_, Todo>(
        "SELECT id, owner_id, content, completed, deleted FROM todos WHERE id = $1 AND owner_id = $2",
    )
    .bind(id)
    .bind(authed.0.sub)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(todo))
}

/// Soft-deletes a todo the caller owns.
///
/// Sets the tombstone flag rather than removing the row. Matching is scoped
/// to id, owner, and not-yet-deleted, so deleting twice reports 404 the
/// second time.
#[delete("/{id}")]
pub async fn delete_todo(
    pool: web::Data<PgPool>,
    authed: AuthedUser,
    todo_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let id = todo_id.into_inner();

    let result = sqlx::query(
        "UPDATE todos SET deleted = TRUE WHERE id = $1 AND owner_id = $2 AND deleted = FALSE",
    )
    .bind(id)
    .bind(authed.0.sub)
    .execute(&**pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Todo {} not found", id)));
    }

    Ok(HttpResponse::NoContent().finish())
}
