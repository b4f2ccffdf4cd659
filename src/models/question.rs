// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Represents the 'QuizQuestions' table in the database.
///
/// Includes the answer key; only the admin authoring endpoints may serialize
/// this struct to a client.
#[derive(Debug, Clone, FromRow, Serialize)]
#[sqlx(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct Question {
    pub question_id: i64,
    pub quiz_id: i64,
    pub question_text: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
    /// Index of the correct option, 1 through 4.
    pub correct_option: i64,
    pub is_active: i64,
}

/// DTO for quiz takers: the question without the answer key.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
#[sqlx(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct ExamQuestion {
    pub question_id: i64,
    pub quiz_id: i64,
    pub question_text: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
}

/// DTO for creating a new question. Field casing follows the wire format.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct CreateQuestionRequest {
    pub quiz_id: i64,
    #[validate(length(min = 1, max = 1000, message = "Question text is required."))]
    pub question_text: String,
    #[validate(length(min = 1, max = 500))]
    pub option1: String,
    #[validate(length(min = 1, max = 500))]
    pub option2: String,
    #[validate(length(min = 1, max = 500))]
    pub option3: String,
    #[validate(length(min = 1, max = 500))]
    pub option4: String,
    #[validate(range(min = 1, max = 4, message = "Correct option must be between 1 and 4."))]
    pub correct_option: i64,
}

/// DTO for updating a question. All fields are written.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,
    #[validate(length(min = 1, max = 500))]
    pub option1: String,
    #[validate(length(min = 1, max = 500))]
    pub option2: String,
    #[validate(length(min = 1, max = 500))]
    pub option3: String,
    #[validate(length(min = 1, max = 500))]
    pub option4: String,
    #[validate(range(min = 1, max = 4, message = "Correct option must be between 1 and 4."))]
    pub correct_option: i64,
}
