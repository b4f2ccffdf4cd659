// src/handlers/users.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{SyncUserRequest, User},
};

/// Upserts the mirror row for a user from the identity provider's webhook.
///
/// A previously soft-deleted user is reactivated; profile fields always take
/// the provider's latest values. Webhook signature verification happens in
/// front of this service, at the auth layer.
pub async fn sync_user(
    State(pool): State<SqlitePool>,
    Json(payload): Json<SyncUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    sqlx::query(
        "INSERT INTO users (id, first_name, last_name, email, role, IsActive)
         VALUES (?1, ?2, ?3, ?4, ?5, 1)
         ON CONFLICT(id) DO UPDATE SET
             first_name = excluded.first_name,
             last_name = excluded.last_name,
             email = excluded.email,
             role = excluded.role,
             IsActive = 1",
    )
    .bind(&payload.id)
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.email)
    .bind(&payload.role)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to sync user: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(serde_json::json!({
        "message": "User synced successfully"
    })))
}

/// Retrieves an active user's mirror row by provider ID.
pub async fn get_user(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, first_name, last_name, email, role, IsActive, created_at
         FROM users
         WHERE id = ?1 AND IsActive = 1",
    )
    .bind(&id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch user: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}
