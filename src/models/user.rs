// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'users' table: a mirror of the external identity
/// provider's directory, written by the sync webhook. `id` is the
/// provider's opaque identifier and is trusted as-is.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub role: String,
    #[sqlx(rename = "IsActive")]
    #[serde(rename = "IsActive")]
    pub is_active: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_role() -> String {
    "user".to_string()
}

/// DTO for the identity provider's user-sync webhook.
#[derive(Debug, Deserialize, Validate)]
pub struct SyncUserRequest {
    #[validate(length(min = 1, max = 128, message = "User ID is required."))]
    pub id: String,
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    #[serde(rename = "lastName", default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
}
