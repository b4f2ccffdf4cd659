// src/models/link.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'links' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Link {
    pub id: i64,
    pub linktitle: String,
    pub url: String,
    pub linkcontent: String,
    pub user_id: String,
    #[sqlx(rename = "isPublic")]
    #[serde(rename = "isPublic")]
    pub is_public: i64,
    pub view_count: Option<i64>,
    #[sqlx(rename = "IsActive")]
    #[serde(rename = "IsActive")]
    pub is_active: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn validate_link_url(value: &str) -> Result<(), validator::ValidationError> {
    if url::Url::parse(value).is_err() {
        return Err(validator::ValidationError::new("invalid_url"));
    }
    Ok(())
}

/// DTO for creating a link.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(length(min = 1, max = 200, message = "Link title is required."))]
    pub linktitle: String,
    #[validate(custom(function = validate_link_url))]
    pub url: String,
    #[validate(length(min = 1, max = 2000, message = "Link description is required."))]
    pub linkcontent: String,
    #[validate(length(min = 1, max = 128, message = "User ID is required."))]
    pub user_id: String,
    #[serde(rename = "isPublic", default)]
    pub is_public: bool,
}
