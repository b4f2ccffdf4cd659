// src/handlers/reports.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    config::UNKNOWN_USER_LABEL,
    error::AppError,
    models::{
        quiz::Quiz,
        result::{
            AnalysisEntry, QuizAnalysisResponse, QuizResult, SolvedQuizReportRow,
            SolvedQuizSummary, TranscriptRow,
        },
    },
};

/// Helper struct for the analysis join of results to user names.
#[derive(sqlx::FromRow)]
struct AnalysisRow {
    percentage: f64,
    status: String,
    first_name: Option<String>,
    last_name: Option<String>,
}

/// Returns the user's latest active result for a quiz.
#[utoipa::path(
    get,
    path = "/api/quiz/result/{quizId}/{userId}",
    params(
        ("quizId" = i64, Path, description = "Quiz identifier"),
        ("userId" = String, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "Latest attempt result", body = QuizResult),
        (status = 404, description = "No active result for the pair")
    )
)]
pub async fn get_result(
    State(pool): State<SqlitePool>,
    Path((quiz_id, user_id)): Path<(i64, String)>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query_as::<_, QuizResult>(
        "SELECT ResultId, UserId, QuizId, TotalMarks, ObtainedMarks, Percentage, Status, IsActive, created_at
         FROM QuizResults
         WHERE QuizId = ?1 AND UserId = ?2 AND IsActive = 1
         ORDER BY ResultId DESC
         LIMIT 1",
    )
    .bind(quiz_id)
    .bind(&user_id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch quiz result: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .ok_or(AppError::NotFound("Quiz result not found".to_string()))?;

    Ok(Json(result))
}

/// Reconstructs the user's reviewable transcript for a quiz.
///
/// Active questions inner-join the user's latest active answer per question,
/// reproducing the submission-time selection and correctness verdict.
/// Questions the user never answered are not in the output.
#[utoipa::path(
    get,
    path = "/api/quiz/questions/{quizId}/{userId}",
    params(
        ("quizId" = i64, Path, description = "Quiz identifier"),
        ("userId" = String, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "Per-question review rows", body = [TranscriptRow])
    )
)]
pub async fn get_transcript(
    State(pool): State<SqlitePool>,
    Path((quiz_id, user_id)): Path<(i64, String)>,
) -> Result<impl IntoResponse, AppError> {
    let rows = sqlx::query_as::<_, TranscriptRow>(
        "SELECT q.QuestionId, q.QuestionText, q.Option1, q.Option2, q.Option3, q.Option4,
                a.SelectedOption, q.CorrectOption, a.IsCorrect
         FROM QuizQuestions q
         INNER JOIN UserAnswers a ON a.QuestionId = q.QuestionId
         WHERE q.QuizId = ?1 AND q.IsActive = 1
           AND a.QuizId = ?1 AND a.UserId = ?2 AND a.IsActive = 1
           AND a.AnswerId = (
               SELECT MAX(a2.AnswerId) FROM UserAnswers a2
               WHERE a2.QuestionId = a.QuestionId AND a2.UserId = a.UserId
                 AND a2.QuizId = a.QuizId AND a2.IsActive = 1
           )
         ORDER BY q.QuestionId",
    )
    .bind(quiz_id)
    .bind(&user_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch transcript: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(rows))
}

/// Cross-user analysis of a quiz: every recorded result with the submitting
/// user's display name.
///
/// Result rows are read regardless of their own active flag; only the name
/// resolution is restricted to active users, with a placeholder for users
/// the directory no longer knows.
#[utoipa::path(
    get,
    path = "/get-quiz-analysis/{quizId}",
    params(("quizId" = i64, Path, description = "Quiz identifier")),
    responses(
        (status = 200, description = "Quiz with per-user results", body = QuizAnalysisResponse),
        (status = 404, description = "Quiz missing or no results recorded")
    )
)]
pub async fn get_quiz_analysis(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = sqlx::query_as::<_, Quiz>(
        "SELECT QuizId, QuizName, QuizDescription, NumberOfQue, IsActive, created_at
         FROM Quiz
         WHERE QuizId = ?1 AND IsActive = 1",
    )
    .bind(quiz_id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch quiz for analysis: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    let rows = sqlx::query_as::<_, AnalysisRow>(
        "SELECT r.Percentage AS percentage, r.Status AS status, u.first_name, u.last_name
         FROM QuizResults r
         LEFT JOIN users u ON u.id = r.UserId AND u.IsActive = 1
         WHERE r.QuizId = ?1
         ORDER BY r.ResultId",
    )
    .bind(quiz_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch quiz analysis rows: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if rows.is_empty() {
        return Err(AppError::NotFound(
            "No results recorded for this quiz".to_string(),
        ));
    }

    let results = rows
        .into_iter()
        .map(|row| {
            let name = match (row.first_name, row.last_name) {
                (Some(first), Some(last)) if !(first.is_empty() && last.is_empty()) => {
                    format!("{} {}", first, last).trim().to_string()
                }
                _ => UNKNOWN_USER_LABEL.to_string(),
            };
            AnalysisEntry {
                name,
                percentage: row.percentage,
                status: row.status,
            }
        })
        .collect();

    Ok(Json(QuizAnalysisResponse { quiz, results }))
}

/// Compact listing of the user's active results.
#[utoipa::path(
    get,
    path = "/api/solved-quizzes/{userId}",
    params(("userId" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Active results, newest first", body = [SolvedQuizSummary])
    )
)]
pub async fn list_solved_quizzes(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let rows = sqlx::query_as::<_, SolvedQuizSummary>(
        "SELECT QuizId, Percentage, Status
         FROM QuizResults
         WHERE UserId = ?1 AND IsActive = 1
         ORDER BY ResultId DESC",
    )
    .bind(&user_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list solved quizzes: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(rows))
}

/// Attempt history joined with quiz names, for the user's report page.
#[utoipa::path(
    get,
    path = "/api/solved-quiz-report/{userId}",
    params(("userId" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Joined attempt history", body = [SolvedQuizReportRow])
    )
)]
pub async fn solved_quiz_report(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let rows = sqlx::query_as::<_, SolvedQuizReportRow>(
        "SELECT z.QuizName, r.ObtainedMarks, r.TotalMarks, r.Percentage, r.Status,
                r.created_at AS AttemptDate
         FROM QuizResults r
         INNER JOIN Quiz z ON z.QuizId = r.QuizId
         WHERE r.UserId = ?1 AND r.IsActive = 1
         ORDER BY r.ResultId DESC",
    )
    .bind(&user_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to build solved-quiz report: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(rows))
}

/// Full active result rows for the user.
#[utoipa::path(
    get,
    path = "/api/quiz-results/{userId}",
    params(("userId" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Active result rows, newest first", body = [QuizResult])
    )
)]
pub async fn list_quiz_results(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let rows = sqlx::query_as::<_, QuizResult>(
        "SELECT ResultId, UserId, QuizId, TotalMarks, ObtainedMarks, Percentage, Status, IsActive, created_at
         FROM QuizResults
         WHERE UserId = ?1 AND IsActive = 1
         ORDER BY ResultId DESC",
    )
    .bind(&user_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list quiz results: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(rows))
}
