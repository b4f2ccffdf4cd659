// src/handlers/submissions.rs

use std::collections::HashMap;

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::{
    config::PASS_THRESHOLD_PERCENTAGE,
    error::AppError,
    models::{
        answer::{AnswerEntry, CheckSolvedRequest, SubmitQuizRequest},
        result::{CheckSolvedResponse, SubmissionOutcome},
    },
};

/// Helper struct for fetching answer keys from the database.
#[derive(sqlx::FromRow)]
struct AnswerKey {
    #[sqlx(rename = "QuestionId")]
    question_id: i64,
    #[sqlx(rename = "CorrectOption")]
    correct_option: i64,
}

/// One graded answer, ready to persist.
struct GradedAnswer {
    question_id: i64,
    selected_option: i64,
    is_correct: bool,
}

/// Grades the submitted answers against the stored keys.
///
/// Options are compared as integers on both sides. Answers to unknown or
/// inactive questions grade as incorrect but are kept, so the persisted
/// attempt record stays complete.
fn grade_answers(answers: &[AnswerEntry], answer_keys: &HashMap<i64, i64>) -> Vec<GradedAnswer> {
    answers
        .iter()
        .map(|ans| GradedAnswer {
            question_id: ans.question_id,
            selected_option: ans.selected_option,
            is_correct: answer_keys
                .get(&ans.question_id)
                .is_some_and(|correct| *correct == ans.selected_option),
        })
        .collect()
}

/// Computes (percentage, status) for an attempt.
///
/// The pass threshold is non-strict: exactly 40% passes. A zero denominator
/// grades to 0% instead of faulting.
fn score_attempt(obtained_marks: i64, total_marks: i64) -> (f64, &'static str) {
    let percentage = if total_marks > 0 {
        obtained_marks as f64 / total_marks as f64 * 100.0
    } else {
        0.0
    };

    let status = if percentage >= PASS_THRESHOLD_PERCENTAGE {
        "Pass"
    } else {
        "Fail"
    };

    (percentage, status)
}

/// Fetches the answer key for every submitted question id in one query.
async fn fetch_answer_keys(
    pool: &SqlitePool,
    answers: &[AnswerEntry],
) -> Result<HashMap<i64, i64>, AppError> {
    if answers.is_empty() {
        return Ok(HashMap::new());
    }

    // Dynamic IN clause over the submitted question ids
    let mut query_builder = QueryBuilder::<Sqlite>::new(
        "SELECT QuestionId, CorrectOption FROM QuizQuestions WHERE IsActive = 1 AND QuestionId IN (",
    );

    let mut separated = query_builder.separated(",");
    for ans in answers {
        separated.push_bind(ans.question_id);
    }
    separated.push_unseparated(")");

    let keys: Vec<AnswerKey> = query_builder
        .build_query_as()
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch answer keys: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(keys
        .into_iter()
        .map(|k| (k.question_id, k.correct_option))
        .collect())
}

/// Grades a quiz attempt and records it in the ledger.
///
/// The denominator is the quiz's declared `NumberOfQue`, snapshotted into the
/// result row, so later re-authoring does not shift historical results. The
/// answer rows and the result row commit in a single transaction: a failed
/// submission leaves no partial attempt behind. Nothing prevents a user from
/// submitting the same quiz again; attempts append.
#[utoipa::path(
    post,
    path = "/submit-quiz",
    request_body = SubmitQuizRequest,
    responses(
        (status = 200, description = "Attempt graded and recorded", body = SubmissionOutcome),
        (status = 404, description = "Quiz missing or inactive")
    )
)]
pub async fn submit_quiz(
    State(pool): State<SqlitePool>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Resolve the quiz before any write so a bad quiz id has no side effects.
    let total_marks: i64 =
        sqlx::query_scalar("SELECT NumberOfQue FROM Quiz WHERE QuizId = ?1 AND IsActive = 1")
            .bind(req.quiz_id)
            .fetch_optional(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch quiz for grading: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?
            .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    let answer_keys = fetch_answer_keys(&pool, &req.answers).await?;
    let graded = grade_answers(&req.answers, &answer_keys);
    let obtained_marks = graded.iter().filter(|g| g.is_correct).count() as i64;
    let (percentage, status) = score_attempt(obtained_marks, total_marks);

    let mut tx = pool.begin().await?;

    for answer in &graded {
        sqlx::query(
            "INSERT INTO UserAnswers (UserId, QuizId, QuestionId, SelectedOption, IsCorrect)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&req.user_id)
        .bind(req.quiz_id)
        .bind(answer.question_id)
        .bind(answer.selected_option)
        .bind(answer.is_correct)
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query(
        "INSERT INTO QuizResults (UserId, QuizId, TotalMarks, ObtainedMarks, Percentage, Status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(&req.user_id)
    .bind(req.quiz_id)
    .bind(total_marks)
    .bind(obtained_marks)
    .bind(percentage)
    .bind(status)
    .execute(&mut *tx)
    .await?;

    tx.commit().await.map_err(|e| {
        tracing::error!("Failed to commit attempt for quiz {}: {:?}", req.quiz_id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(SubmissionOutcome {
        obtained_marks,
        total_marks,
        percentage,
        status: status.to_string(),
    }))
}

/// Read-only check used by the client to decide between "Start Quiz" and
/// "See Solutions". Not a write-time guard.
#[utoipa::path(
    post,
    path = "/checkIsQuizSolved",
    request_body = CheckSolvedRequest,
    responses(
        (status = 200, description = "Count of active results for the pair", body = CheckSolvedResponse)
    )
)]
pub async fn check_is_quiz_solved(
    State(pool): State<SqlitePool>,
    Json(req): Json<CheckSolvedRequest>,
) -> Result<impl IntoResponse, AppError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM QuizResults WHERE UserId = ?1 AND QuizId = ?2 AND IsActive = 1",
    )
    .bind(&req.user_id)
    .bind(req.quiz_id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to check solved state: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(CheckSolvedResponse { is_solved: count }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(pairs: &[(i64, i64)]) -> HashMap<i64, i64> {
        pairs.iter().copied().collect()
    }

    fn entries(pairs: &[(i64, i64)]) -> Vec<AnswerEntry> {
        pairs
            .iter()
            .map(|&(question_id, selected_option)| AnswerEntry {
                question_id,
                selected_option,
            })
            .collect()
    }

    fn obtained(graded: &[GradedAnswer]) -> i64 {
        graded.iter().filter(|g| g.is_correct).count() as i64
    }

    #[test]
    fn test_grade_all_correct() {
        let graded = grade_answers(&entries(&[(1, 2), (2, 3)]), &keys(&[(1, 2), (2, 3)]));
        assert_eq!(obtained(&graded), 2);

        let (percentage, status) = score_attempt(2, 2);
        assert_eq!(percentage, 100.0);
        assert_eq!(status, "Pass");
    }

    #[test]
    fn test_grade_half_correct() {
        // Keys {Q1 -> 2, Q2 -> 3}, submission {Q1 -> 2, Q2 -> 4}
        let graded = grade_answers(&entries(&[(1, 2), (2, 4)]), &keys(&[(1, 2), (2, 3)]));
        assert_eq!(obtained(&graded), 1);

        let (percentage, status) = score_attempt(1, 2);
        assert_eq!(percentage, 50.0);
        assert_eq!(status, "Pass");
    }

    #[test]
    fn test_pass_threshold_boundary() {
        // 2 of 5 is exactly 40%, which passes (non-strict threshold).
        let (percentage, status) = score_attempt(2, 5);
        assert_eq!(percentage, 40.0);
        assert_eq!(status, "Pass");

        let (percentage, status) = score_attempt(1, 5);
        assert_eq!(percentage, 20.0);
        assert_eq!(status, "Fail");
    }

    #[test]
    fn test_zero_total_marks() {
        let (percentage, status) = score_attempt(0, 0);
        assert_eq!(percentage, 0.0);
        assert_eq!(status, "Fail");
    }

    #[test]
    fn test_empty_submission() {
        let graded = grade_answers(&[], &keys(&[(1, 1)]));
        assert!(graded.is_empty());
        assert_eq!(obtained(&graded), 0);
    }

    #[test]
    fn test_unknown_question_grades_incorrect() {
        let graded = grade_answers(&entries(&[(99, 1)]), &keys(&[(1, 1)]));
        assert_eq!(graded.len(), 1);
        assert!(!graded[0].is_correct);
    }
}
