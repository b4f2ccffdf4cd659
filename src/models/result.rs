// src/models/result.rs

use serde::Serialize;
use sqlx::prelude::FromRow;
use utoipa::ToSchema;

use crate::models::quiz::Quiz;

/// Represents the 'QuizResults' table in the database.
/// One row per completed attempt; rows are appended and never mutated.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
#[sqlx(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct QuizResult {
    pub result_id: i64,
    pub user_id: String,
    pub quiz_id: i64,
    pub total_marks: i64,
    pub obtained_marks: i64,
    pub percentage: f64,
    pub status: String,
    pub is_active: i64,
    #[sqlx(rename = "created_at")]
    #[serde(rename = "created_at")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Grading outcome returned to the submitter.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub obtained_marks: i64,
    pub total_marks: i64,
    pub percentage: f64,
    pub status: String,
}

/// Response body for the "already solved" check: count of active results
/// for the (user, quiz) pair.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckSolvedResponse {
    #[serde(rename = "IsSolved")]
    pub is_solved: i64,
}

/// One transcript row: the question joined with the user's answer to it.
#[derive(Debug, FromRow, Serialize, ToSchema)]
#[sqlx(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct TranscriptRow {
    pub question_id: i64,
    pub question_text: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
    pub selected_option: i64,
    pub correct_option: i64,
    pub is_correct: bool,
}

/// Compact per-quiz listing entry for a user's solved quizzes.
#[derive(Debug, FromRow, Serialize, ToSchema)]
#[sqlx(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct SolvedQuizSummary {
    pub quiz_id: i64,
    pub percentage: f64,
    pub status: String,
}

/// Joined report row for a user's attempt history.
#[derive(Debug, FromRow, Serialize, ToSchema)]
#[sqlx(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub struct SolvedQuizReportRow {
    pub quiz_name: String,
    pub obtained_marks: i64,
    pub total_marks: i64,
    pub percentage: f64,
    pub status: String,
    pub attempt_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// One entry in the cross-user quiz analysis.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalysisEntry {
    pub name: String,
    pub percentage: f64,
    pub status: String,
}

/// Response body for the cross-user quiz analysis.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuizAnalysisResponse {
    pub quiz: Quiz,
    pub results: Vec<AnalysisEntry>,
}
