// src/models/note.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'notes' table in the database.
///
/// `file_path` is the retrievable path handed back by the external upload
/// collaborator; the service never touches the blob itself. Owner views and
/// visitor views are counted separately, as are downloads.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: String,
    pub file_path: Option<String>,
    #[sqlx(rename = "isPublic")]
    #[serde(rename = "isPublic")]
    pub is_public: i64,
    pub view_count: Option<i64>,
    pub download_count: Option<i64>,
    pub other_user_view_count: Option<i64>,
    pub other_user_download_count: Option<i64>,
    #[sqlx(rename = "IsActive")]
    #[serde(rename = "IsActive")]
    pub is_active: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A public note joined with its author's name, for the admin-notes listing.
#[derive(Debug, FromRow, Serialize)]
pub struct AdminPublicNote {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: String,
    pub file_path: Option<String>,
    #[sqlx(rename = "isPublic")]
    #[serde(rename = "isPublic")]
    pub is_public: i64,
    pub view_count: Option<i64>,
    pub download_count: Option<i64>,
    pub other_user_view_count: Option<i64>,
    pub other_user_download_count: Option<i64>,
    #[sqlx(rename = "firstName")]
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[sqlx(rename = "lastName")]
    #[serde(rename = "lastName")]
    pub last_name: String,
}

/// DTO for creating a note. `file_path` is optional: text-only notes exist.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateNoteRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required."))]
    pub title: String,
    #[validate(length(min = 1, max = 10000, message = "Content is required."))]
    pub content: String,
    #[validate(length(min = 1, max = 128, message = "User ID is required."))]
    pub user_id: String,
    #[serde(rename = "isPublic", default)]
    pub is_public: bool,
    pub file_path: Option<String>,
}

/// DTO for updating a note. The stored file path is only overwritten when a
/// new one is supplied.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateNoteRequest {
    pub id: i64,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 10000))]
    pub content: String,
    #[serde(rename = "isPublic", default)]
    pub is_public: bool,
    pub file_path: Option<String>,
}
