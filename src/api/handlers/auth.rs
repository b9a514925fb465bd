use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::auth::jwt::create_token;
use crate::auth::password::{check_strength, hash_password, verify_password};
use crate::config::Config;
use crate::domain::errors::require_text;
use crate::domain::repositories::UserRepository;
use crate::domain::user::{Email, User};
use crate::infrastructure::repositories::PostgresUserRepository;

#[derive(Debug, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Serialize)]
pub struct Registered {
    pub user_id: Uuid,
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
}

/// Create a member account
///
/// POST /api/auth/register
pub async fn register(
    State(pool): State<PgPool>,
    Json(form): Json<Registration>,
) -> Result<(StatusCode, Json<Registered>), ApiError> {
    check_strength(&form.password)?;
    let member = User {
        id: Uuid::new_v4(),
        email: Email::new(&form.email)?,
        password_hash: hash_password(&form.password).map_err(|e| {
            ApiError::internal_server_error(format!("Failed to hash password: {}", e))
        })?,
        full_name: require_text(&form.full_name, "Full name")?,
        is_active: true,
    };

    // 409 when the address is taken
    PostgresUserRepository::new(pool).create(&member).await?;
    tracing::info!(user_id = %member.id, "Member registered");

    Ok((
        StatusCode::CREATED,
        Json(Registered {
            user_id: member.id,
            message: "User registered successfully",
        }),
    ))
}

/// Exchange credentials for a session token
///
/// POST /api/auth/login
pub async fn login(
    State(pool): State<PgPool>,
    State(config): State<Arc<Config>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Session>, ApiError> {
    let members = PostgresUserRepository::new(pool);
    let member = authenticate(&members, &credentials).await?;

    if let Err(e) = members.update_last_login(member.id).await {
        tracing::warn!(user_id = %member.id, error = %e, "Failed to update last login");
    }

    let token = create_token(member.id, &config.jwt_secret)
        .map_err(|e| ApiError::internal_server_error(format!("Failed to create token: {}", e)))?;

    Ok(Json(Session {
        token,
        user_id: member.id,
    }))
}

/// Unknown e-mail and wrong password answer identically
async fn authenticate(
    members: &PostgresUserRepository,
    credentials: &Credentials,
) -> Result<User, ApiError> {
    let email = Email::new(&credentials.email)?;
    let member = members
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !member.is_active {
        return Err(ApiError::unauthorized("Account is disabled"));
    }

    let matches = verify_password(&credentials.password, &member.password_hash).map_err(|e| {
        tracing::error!(user_id = %member.id, error = %e, "Stored password hash is unreadable");
        ApiError::internal_server_error("Internal server error")
    })?;
    if !matches {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    Ok(member)
}

/// Liveness probe
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
