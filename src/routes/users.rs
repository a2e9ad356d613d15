use crate::{
    auth::{
        hash_password, refresh_token_cookie, verify_password, AuthResponse, AuthedUser,
        LoginRequest, RegisterRequest, TokenIssuer, REFRESH_TOKEN_COOKIE,
    },
    error::AppError,
    models::{PublicUser, User},
};
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Registers a new account.
///
/// Stores a salted hash of the password, never the plaintext. A duplicate
/// email surfaces the unique-constraint violation as a conflict rather than
/// a generic failure.
///
/// ## Responses:
/// - `201 Created`: the public user projection `{id, email}`.
/// - `400 Bad Request`: validation failure, or the email is already taken.
/// - `500 Internal Server Error`: any other persistence failure.
#[post("")]
pub async fn register(
    pool: web::Data<PgPool>,
    payload: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let hash = hash_password(&payload.password)?;

    let user = sqlx::query_as::<_, PublicUser>(
        "INSERT INTO users (id, email, hash) VALUES ($1, $2, $3) RETURNING id, email",
    )
    .bind(Uuid::new_v4())
    .bind(&payload.email)
    .bind(&hash)
    .fetch_one(&**pool)
    .await
    .map_err(|err| {
        let is_unique_violation = err
            .as_database_error()
            .and_then(|db_err| db_err.code())
            .as_deref()
            == Some("23505");
        if is_unique_violation {
            AppError::Conflict("A user exists with this email.".into())
        } else {
            AppError::from(err)
        }
    })?;

    Ok(HttpResponse::Created().json(user))
}

/// Authenticates a user and starts a session.
///
/// On success the access token is returned in the body and the refresh token
/// only as an HTTP-only cookie. An unknown email and a wrong password
/// produce the same 401 body.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    issuer: web::Data<TokenIssuer>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let user = sqlx::query_as::<_, User>("SELECT id, email, hash FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&**pool)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".into()))?;

    if !verify_password(&payload.password, &user.hash)? {
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    let user = user.into_public();
    let access_token = issuer.issue_access_token(&user)?;
    let refresh_token = issuer.issue_refresh_token(&user)?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_token_cookie(refresh_token))
        .json(AuthResponse { access_token }))
}

/// Exchanges a valid refresh token for a new access/refresh pair.
///
/// The user is re-resolved by the email claim; an account that disappeared
/// since the token was signed fails like any bad token. The cookie is
/// rotated, never reused.
#[post("/tokens/refresh")]
pub async fn refresh(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    issuer: web::Data<TokenIssuer>,
) -> Result<impl Responder, AppError> {
    let cookie = req
        .cookie(REFRESH_TOKEN_COOKIE)
        .ok_or_else(|| AppError::Unauthorized("Unauthorised".into()))?;

    let claims = issuer.verify(cookie.value())?;

    let user = sqlx::query_as::<_, PublicUser>("SELECT id, email FROM users WHERE email = $1")
        .bind(&claims.email)
        .fetch_optional(&**pool)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthorised".into()))?;

    let access_token = issuer.issue_access_token(&user)?;
    let refresh_token = issuer.issue_refresh_token(&user)?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_token_cookie(refresh_token))
        .json(AuthResponse { access_token }))
}

/// Returns the authenticated user's public projection.
#[get("/me")]
pub async fn me(
    pool: web::Data<PgPool>,
    authed: AuthedUser,
) -> Result<impl Responder, AppError> {
    let user = sqlx::query_as::<_, PublicUser>("SELECT id, email FROM users WHERE email = $1")
        .bind(&authed.0.email)
        .fetch_optional(&**pool)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthorised".into()))?;

    Ok(HttpResponse::Ok().json(user))
}
