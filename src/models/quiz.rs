// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Represents the 'Quiz' table in the database.
///
/// `NumberOfQue` is the declared question count entered at creation time; it
/// is the grading denominator and is not recomputed from the attached
/// questions. The quiz counts as "ready" in the authoring UI once the active
/// question count catches up with it.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
#[sqlx(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct Quiz {
    pub quiz_id: i64,
    pub quiz_name: String,
    pub quiz_description: String,
    pub number_of_que: i64,
    pub is_active: i64,
    #[sqlx(rename = "created_at")]
    #[serde(rename = "created_at")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for creating a new quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 100, message = "Quiz title is required."))]
    pub title: String,
    #[validate(length(min = 1, max = 500, message = "Quiz description is required."))]
    pub description: String,
    #[serde(rename = "noOfQue")]
    #[validate(range(min = 1, max = 100, message = "Question count must be between 1 and 100."))]
    pub no_of_que: i64,
}

/// DTO for updating a quiz. All fields are written.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuizRequest {
    pub id: i64,
    #[serde(rename = "quizName")]
    #[validate(length(min = 1, max = 100))]
    pub quiz_name: String,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    #[serde(rename = "noOfQue")]
    #[validate(range(min = 1, max = 100))]
    pub no_of_que: i64,
}
