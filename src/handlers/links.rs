// src/handlers/links.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::link::{CreateLinkRequest, Link},
    utils::html::clean_html,
};

/// Query parameters for listing a user's links.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub user_id: Option<String>,
}

/// Creates a new link. The URL must parse; title and description are
/// sanitized like note content.
pub async fn add_link(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let linktitle = clean_html(&payload.linktitle);
    let linkcontent = clean_html(&payload.linkcontent);
    let is_public = payload.is_public as i64;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO links (linktitle, url, linkcontent, user_id, isPublic)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING id",
    )
    .bind(&linktitle)
    .bind(&payload.url)
    .bind(&linkcontent)
    .bind(&payload.user_id)
    .bind(is_public)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to add link: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(serde_json::json!({
        "message": "Link added successfully!",
        "link": {
            "id": id,
            "linktitle": linktitle,
            "url": payload.url,
            "linkcontent": linkcontent,
            "user_id": payload.user_id,
            "isPublic": is_public
        }
    })))
}

/// Lists the calling user's active links.
pub async fn list_links(
    State(pool): State<SqlitePool>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = params
        .user_id
        .ok_or(AppError::BadRequest("User ID is required".to_string()))?;

    let links = sqlx::query_as::<_, Link>(
        "SELECT id, linktitle, url, linkcontent, user_id, isPublic, view_count, IsActive, created_at
         FROM links
         WHERE user_id = ?1 AND IsActive = 1
         ORDER BY id DESC",
    )
    .bind(&user_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch links: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(links))
}

/// Soft-deletes a link.
pub async fn delete_link(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("UPDATE links SET IsActive = 0 WHERE id = ?1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete link: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Link not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "message": "Link deleted successfully"
    })))
}

/// Increments a link's view counter.
pub async fn count_view(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exists: Option<i64> =
        sqlx::query_scalar("SELECT id FROM links WHERE id = ?1 AND IsActive = 1")
            .bind(id)
            .fetch_optional(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch link: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;

    if exists.is_none() {
        return Err(AppError::NotFound("Link not found".to_string()));
    }

    sqlx::query("UPDATE links SET view_count = COALESCE(view_count, 0) + 1 WHERE id = ?1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update link view count: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let updated: Option<i64> = sqlx::query_scalar("SELECT view_count FROM links WHERE id = ?1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch link view count: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(serde_json::json!({
        "message": "View count updated successfully",
        "view_count": updated.unwrap_or(0)
    })))
}
