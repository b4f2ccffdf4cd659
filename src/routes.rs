// src/routes.rs

use axum::{
    Router, http::Method,
    middleware,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    handlers::{links, notes, questions, quizzes, reports, submissions, users},
    models::{
        answer::{AnswerEntry, CheckSolvedRequest, SubmitQuizRequest},
        question::ExamQuestion,
        quiz::Quiz,
        result::{
            AnalysisEntry, CheckSolvedResponse, QuizAnalysisResponse, QuizResult,
            SolvedQuizReportRow, SolvedQuizSummary, SubmissionOutcome, TranscriptRow,
        },
    },
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// OpenAPI description of the quiz core. The surrounding CRUD endpoints are
/// not documented here.
#[derive(OpenApi)]
#[openapi(
    paths(
        submissions::submit_quiz,
        submissions::check_is_quiz_solved,
        questions::exam_questions,
        reports::get_result,
        reports::get_transcript,
        reports::get_quiz_analysis,
        reports::list_solved_quizzes,
        reports::solved_quiz_report,
        reports::list_quiz_results,
    ),
    components(schemas(
        SubmitQuizRequest,
        AnswerEntry,
        CheckSolvedRequest,
        CheckSolvedResponse,
        SubmissionOutcome,
        ExamQuestion,
        Quiz,
        QuizResult,
        TranscriptRow,
        SolvedQuizSummary,
        SolvedQuizReportRow,
        AnalysisEntry,
        QuizAnalysisResponse,
    ))
)]
struct ApiDoc;

/// Assembles the main application router.
///
/// * Nests the notes/links/users sub-routers and merges the quiz routes.
/// * Puts the authoring routes behind auth + admin middleware.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (pool + config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let note_routes = Router::new()
        .route("/add", post(notes::add_note))
        .route("/", get(notes::list_notes))
        .route("/public", get(notes::list_public_notes))
        .route("/{id}", delete(notes::delete_note))
        .route("/{id}/view", post(notes::count_view))
        .route("/{id}/download", post(notes::count_download))
        .route("/public/{id}/view", post(notes::count_public_view))
        .route("/public/{id}/download", post(notes::count_public_download))
        .route("/update-note", post(notes::update_note));

    let link_routes = Router::new()
        .route("/addLink", post(links::add_link))
        .route("/", get(links::list_links))
        .route("/delete/{id}", delete(links::delete_link))
        .route("/{id}/view", post(links::count_view));

    let user_routes = Router::new()
        .route("/sync", post(users::sync_user))
        .route("/{id}", get(users::get_user));

    let quiz_routes = Router::new()
        .route("/submit-quiz", post(submissions::submit_quiz))
        .route("/checkIsQuizSolved", post(submissions::check_is_quiz_solved))
        .route("/quiz/{quizId}", get(questions::exam_questions))
        .route("/api/quizzes", get(quizzes::list_quizzes))
        .route("/get-quiz-by-id/{quizId}", get(quizzes::get_quiz_by_id))
        .route("/api/quiz/{quizId}", get(quizzes::get_quiz))
        .route("/api/quiz/result/{quizId}/{userId}", get(reports::get_result))
        .route(
            "/api/quiz/questions/{quizId}/{userId}",
            get(reports::get_transcript),
        )
        .route("/get-quiz-analysis/{quizId}", get(reports::get_quiz_analysis))
        .route("/api/solved-quizzes/{userId}", get(reports::list_solved_quizzes))
        .route(
            "/api/solved-quiz-report/{userId}",
            get(reports::solved_quiz_report),
        )
        .route("/api/quiz-results/{userId}", get(reports::list_quiz_results));

    let authoring_routes = Router::new()
        .route("/addQuiz", post(quizzes::add_quiz))
        .route("/updateQuiz", put(quizzes::update_quiz))
        .route("/soft-delete-quiz/{id}", put(quizzes::soft_delete_quiz))
        .route("/add-question", post(questions::add_question))
        .route("/update-question/{id}", put(questions::update_question))
        .route(
            "/soft-delete-question/{id}",
            put(questions::soft_delete_question),
        )
        .route("/get-questions/{quizId}", get(questions::get_questions))
        .route(
            "/get-question-by-id/{questionId}",
            get(questions::get_question_by_id),
        )
        .route(
            "/get-question-count/{quizId}",
            get(questions::get_question_count),
        )
        // Double middleware protection: Auth first, then Admin check
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/notes", note_routes)
        .nest("/api/links", link_routes)
        .nest("/api/users", user_routes)
        .route("/api/admin-notes/public", get(notes::list_admin_public_notes))
        .merge(quiz_routes)
        .merge(authoring_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
