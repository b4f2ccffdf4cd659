// src/handlers/quizzes.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::quiz::{CreateQuizRequest, Quiz, UpdateQuizRequest},
};

/// Creates a new quiz shell. Questions are attached separately; the quiz
/// shows as "ready" in the authoring UI once the active question count
/// reaches `NumberOfQue`.
/// Admin only.
pub async fn add_quiz(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO Quiz (QuizName, QuizDescription, NumberOfQue)
         VALUES (?1, ?2, ?3)
         RETURNING QuizId",
    )
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(payload.no_of_que)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create quiz: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(serde_json::json!({
        "message": "Quiz added Successfully!",
        "quiz": {
            "QuizId": id,
            "QuizName": payload.title,
            "QuizDescription": payload.description,
            "NumberOfQue": payload.no_of_que
        }
    })))
}

/// Lists all active quizzes, newest first.
pub async fn list_quizzes(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let quizzes = sqlx::query_as::<_, Quiz>(
        "SELECT QuizId, QuizName, QuizDescription, NumberOfQue, IsActive, created_at
         FROM Quiz
         WHERE IsActive = 1
         ORDER BY created_at DESC",
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list quizzes: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(quizzes))
}

/// Retrieves the matching active quiz rows as an array (legacy shape kept
/// for the authoring client).
pub async fn get_quiz_by_id(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quizzes = sqlx::query_as::<_, Quiz>(
        "SELECT QuizId, QuizName, QuizDescription, NumberOfQue, IsActive, created_at
         FROM Quiz
         WHERE QuizId = ?1 AND IsActive = 1",
    )
    .bind(quiz_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch quiz: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(quizzes))
}

/// Retrieves a single active quiz by ID.
pub async fn get_quiz(
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
        tracing::error!("Failed to fetch quiz: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    Ok(Json(quiz))
}

/// Updates a quiz's name, description and declared question count.
///
/// The declared count is the grading denominator for future attempts only;
/// recorded results keep the snapshot taken when they were graded.
/// Admin only.
pub async fn update_quiz(
    State(pool): State<SqlitePool>,
    Json(payload): Json<UpdateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let result = sqlx::query(
        "UPDATE Quiz SET QuizName = ?1, QuizDescription = ?2, NumberOfQue = ?3 WHERE QuizId = ?4",
    )
    .bind(&payload.quiz_name)
    .bind(&payload.description)
    .bind(payload.no_of_que)
    .bind(payload.id)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update quiz: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Quiz updated successfully"
    })))
}

/// Soft-deletes a quiz and every question attached to it.
/// Admin only.
pub async fn soft_delete_quiz(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    sqlx::query("UPDATE QuizQuestions SET IsActive = 0 WHERE QuizId = ?1")
        .bind(quiz_id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to soft delete quiz questions: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let result = sqlx::query("UPDATE Quiz SET IsActive = 0 WHERE QuizId = ?1")
        .bind(quiz_id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to soft delete quiz: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "message": "Quiz deleted successfully"
        })),
    ))
}
