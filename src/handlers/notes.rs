// src/handlers/notes.rs

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
    models::note::{AdminPublicNote, CreateNoteRequest, Note, UpdateNoteRequest},
    utils::html::clean_html,
};

const NOTE_COLUMNS: &str = "id, title, content, user_id, file_path, isPublic, view_count, \
     download_count, other_user_view_count, other_user_download_count, IsActive, created_at";

/// Query parameters for listing a user's notes.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub user_id: Option<String>,
}

/// Creates a new note. `file_path` is whatever the external upload
/// collaborator handed back; text-only notes leave it empty.
pub async fn add_note(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let title = clean_html(&payload.title);
    let content = clean_html(&payload.content);
    let is_public = payload.is_public as i64;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO notes (title, content, user_id, file_path, isPublic)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING id",
    )
    .bind(&title)
    .bind(&content)
    .bind(&payload.user_id)
    .bind(&payload.file_path)
    .bind(is_public)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to add note: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(serde_json::json!({
        "message": "Notes added Successfully!!",
        "notes": {
            "id": id,
            "title": title,
            "content": content,
            "user_id": payload.user_id,
            "file_path": payload.file_path,
            "isPublic": is_public
        }
    })))
}

/// Lists the calling user's active notes.
pub async fn list_notes(
    State(pool): State<SqlitePool>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = params
        .user_id
        .ok_or(AppError::BadRequest("User ID is required".to_string()))?;

    let notes = sqlx::query_as::<_, Note>(&format!(
        "SELECT {NOTE_COLUMNS} FROM notes WHERE user_id = ?1 AND IsActive = 1 ORDER BY id DESC"
    ))
    .bind(&user_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch notes: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(notes))
}

/// Lists every active public note.
pub async fn list_public_notes(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let notes = sqlx::query_as::<_, Note>(&format!(
        "SELECT {NOTE_COLUMNS} FROM notes WHERE isPublic = 1 AND IsActive = 1 ORDER BY id DESC"
    ))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch public notes: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(notes))
}

/// Lists active public notes authored by admins, with the author's name for
/// the "Shared by" badge.
pub async fn list_admin_public_notes(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let notes = sqlx::query_as::<_, AdminPublicNote>(
        "SELECT n.id, n.title, n.content, n.user_id, n.file_path, n.isPublic,
                n.view_count, n.download_count, n.other_user_view_count,
                n.other_user_download_count,
                u.first_name AS firstName, u.last_name AS lastName
         FROM notes n
         INNER JOIN users u ON u.id = n.user_id AND u.IsActive = 1
         WHERE u.role = 'admin' AND n.isPublic = 1 AND n.IsActive = 1
         ORDER BY n.id DESC",
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch admin public notes: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(notes))
}

/// Soft-deletes a note.
pub async fn delete_note(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("UPDATE notes SET IsActive = 0 WHERE id = ?1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete note: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Note not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "message": "Note deleted successfully"
    })))
}

/// Increments the owner's view counter. The stored count may be NULL for
/// rows that predate the counter column, so it is read first and defaulted.
pub async fn count_view(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let current: Option<i64> =
        sqlx::query_scalar("SELECT view_count FROM notes WHERE id = ?1 AND IsActive = 1")
            .bind(id)
            .fetch_optional(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch note for view count: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?
            .ok_or(AppError::NotFound("Note not found".to_string()))?;

    let new_count = current.unwrap_or(0) + 1;

    sqlx::query("UPDATE notes SET view_count = ?1 WHERE id = ?2")
        .bind(new_count)
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update view count: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(serde_json::json!({
        "message": "View count updated successfully",
        "view_count": new_count
    })))
}

/// Increments the owner's download counter.
pub async fn count_download(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let current: Option<i64> =
        sqlx::query_scalar("SELECT download_count FROM notes WHERE id = ?1 AND IsActive = 1")
            .bind(id)
            .fetch_optional(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch note for download count: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?
            .ok_or(AppError::NotFound("Note not found".to_string()))?;

    let new_count = current.unwrap_or(0) + 1;

    sqlx::query("UPDATE notes SET download_count = ?1 WHERE id = ?2")
        .bind(new_count)
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update download count: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(serde_json::json!({
        "message": "Download count updated successfully",
        "download_count": new_count
    })))
}

/// Increments the visitor view counter on a note someone else shared.
pub async fn count_public_view(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    ensure_note_active(&pool, id).await?;

    sqlx::query("UPDATE notes SET other_user_view_count = other_user_view_count + 1 WHERE id = ?1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update visitor view count: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let updated: Option<i64> =
        sqlx::query_scalar("SELECT other_user_view_count FROM notes WHERE id = ?1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch visitor view count: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;

    Ok(Json(serde_json::json!({
        "message": "View count updated successfully",
        "other_user_view_count": updated.unwrap_or(0)
    })))
}

/// Increments the visitor download counter on a note someone else shared.
pub async fn count_public_download(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    ensure_note_active(&pool, id).await?;

    sqlx::query(
        "UPDATE notes SET other_user_download_count = other_user_download_count + 1 WHERE id = ?1",
    )
    .bind(id)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update visitor download count: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let updated: Option<i64> =
        sqlx::query_scalar("SELECT other_user_download_count FROM notes WHERE id = ?1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch visitor download count: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;

    Ok(Json(serde_json::json!({
        "message": "Download count updated successfully",
        "other_user_download_count": updated.unwrap_or(0)
    })))
}

/// Updates a note's text and visibility; the stored file path is only
/// replaced when the client sends a new one.
pub async fn update_note(
    State(pool): State<SqlitePool>,
    Json(payload): Json<UpdateNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM notes WHERE id = ?1")
        .bind(payload.id)
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch note for update: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if exists.is_none() {
        return Err(AppError::NotFound("Note not found".to_string()));
    }

    let title = clean_html(&payload.title);
    let content = clean_html(&payload.content);
    let is_public = payload.is_public as i64;

    let result = if let Some(file_path) = &payload.file_path {
        sqlx::query(
            "UPDATE notes SET title = ?1, content = ?2, isPublic = ?3, file_path = ?4 WHERE id = ?5",
        )
        .bind(&title)
        .bind(&content)
        .bind(is_public)
        .bind(file_path)
        .bind(payload.id)
        .execute(&pool)
        .await
    } else {
        sqlx::query("UPDATE notes SET title = ?1, content = ?2, isPublic = ?3 WHERE id = ?4")
            .bind(&title)
            .bind(&content)
            .bind(is_public)
            .bind(payload.id)
            .execute(&pool)
            .await
    }
    .map_err(|e| {
        tracing::error!("Failed to update note: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::InternalServerError(
            "Failed to update note".to_string(),
        ));
    }

    Ok(Json(serde_json::json!({
        "message": "Note updated successfully!"
    })))
}

async fn ensure_note_active(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let exists: Option<i64> =
        sqlx::query_scalar("SELECT id FROM notes WHERE id = ?1 AND IsActive = 1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch note: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;

    if exists.is_none() {
        return Err(AppError::NotFound("Note not found".to_string()));
    }

    Ok(())
}
