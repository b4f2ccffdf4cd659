// src/handlers/questions.rs

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
    models::question::{CreateQuestionRequest, ExamQuestion, Question, UpdateQuestionRequest},
};

/// Creates a new quiz question.
/// Admin only.
pub async fn add_question(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO QuizQuestions
         (QuizId, QuestionText, Option1, Option2, Option3, Option4, CorrectOption)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         RETURNING QuestionId",
    )
    .bind(payload.quiz_id)
    .bind(&payload.question_text)
    .bind(&payload.option1)
    .bind(&payload.option2)
    .bind(&payload.option3)
    .bind(&payload.option4)
    .bind(payload.correct_option)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create question: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Question added successfully!",
            "QuestionId": id
        })),
    ))
}

/// Lists a quiz's active questions with the answer key, for the authoring UI.
/// Admin only.
pub async fn get_questions(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        "SELECT QuestionId, QuizId, QuestionText, Option1, Option2, Option3, Option4,
                CorrectOption, IsActive
         FROM QuizQuestions
         WHERE QuizId = ?1 AND IsActive = 1
         ORDER BY QuestionId",
    )
    .bind(quiz_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch quiz questions: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(questions))
}

/// Retrieves the matching active question rows as an array, for the edit
/// modal. Admin only.
pub async fn get_question_by_id(
    State(pool): State<SqlitePool>,
    Path(question_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        "SELECT QuestionId, QuizId, QuestionText, Option1, Option2, Option3, Option4,
                CorrectOption, IsActive
         FROM QuizQuestions
         WHERE QuestionId = ?1 AND IsActive = 1",
    )
    .bind(question_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch question: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(questions))
}

/// Counts a quiz's active questions. The authoring UI compares this against
/// the quiz's declared `NumberOfQue` to gate the "quiz ready" state.
/// Admin only.
pub async fn get_question_count(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM QuizQuestions WHERE QuizId = ?1 AND IsActive = 1")
            .bind(quiz_id)
            .fetch_one(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch question count: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;

    Ok(Json(serde_json::json!({ "count": count })))
}

/// Updates a question by ID.
/// Admin only.
pub async fn update_question(
    State(pool): State<SqlitePool>,
    Path(question_id): Path<i64>,
    Json(payload): Json<UpdateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let result = sqlx::query(
        "UPDATE QuizQuestions
         SET QuestionText = ?1, Option1 = ?2, Option2 = ?3, Option3 = ?4, Option4 = ?5,
             CorrectOption = ?6
         WHERE QuestionId = ?7",
    )
    .bind(&payload.question_text)
    .bind(&payload.option1)
    .bind(&payload.option2)
    .bind(&payload.option3)
    .bind(&payload.option4)
    .bind(payload.correct_option)
    .bind(question_id)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update question: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Question updated successfully"
    })))
}

/// Soft-deletes a question by ID.
/// Admin only.
pub async fn soft_delete_question(
    State(pool): State<SqlitePool>,
    Path(question_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("UPDATE QuizQuestions SET IsActive = 0 WHERE QuestionId = ?1")
        .bind(question_id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to soft delete question: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Question deleted successfully"
    })))
}

/// Serves a quiz's active questions to a quiz taker.
///
/// Mapped through `ExamQuestion` so the answer key never reaches the client
/// before grading.
#[utoipa::path(
    get,
    path = "/quiz/{quizId}",
    params(("quizId" = i64, Path, description = "Quiz identifier")),
    responses(
        (status = 200, description = "Questions without the answer key", body = [ExamQuestion])
    )
)]
pub async fn exam_questions(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let questions = sqlx::query_as::<_, ExamQuestion>(
        "SELECT QuestionId, QuizId, QuestionText, Option1, Option2, Option3, Option4
         FROM QuizQuestions
         WHERE QuizId = ?1 AND IsActive = 1
         ORDER BY QuestionId",
    )
    .bind(quiz_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch exam questions: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(questions))
}
