// src/models/answer.rs

use serde::Deserialize;
use utoipa::ToSchema;

/// One submitted answer within an attempt.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub question_id: i64,
    /// Selected option index, compared numerically against the stored key.
    pub selected_option: i64,
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    pub user_id: String,
    pub quiz_id: i64,
    /// May be empty: an empty attempt still grades (to zero marks) and is
    /// recorded in the ledger.
    pub answers: Vec<AnswerEntry>,
}

/// DTO for the read-only "already solved" presentation check.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckSolvedRequest {
    pub quiz_id: i64,
    pub user_id: String,
}
