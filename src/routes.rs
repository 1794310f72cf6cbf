// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{dashboard, quiz, submission};
use crate::state::AppState;

/// Assembles the main application router.
///
/// * Quiz routes serve the list, editor and taker views; submission and
///   dashboard routes serve the taker result and analytics views.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (entity store, summarizer, in-flight guard).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
        "http://localhost:5173".parse().unwrap(),
        "http://127.0.0.1:5173".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/", get(quiz::list_quizzes).post(quiz::create_quiz))
        .route("/{id}", get(quiz::get_quiz).put(quiz::save_quiz))
        .route("/{id}/clone", post(quiz::clone_quiz))
        .route("/{id}/questions", get(quiz::list_questions))
        .route(
            "/{id}/submissions",
            get(submission::list_submissions).post(submission::submit),
        )
        .route("/{id}/stats", get(dashboard::get_stats))
        .route("/{id}/summary", post(dashboard::generate_summary));

    let submission_routes = Router::new().route("/{id}", delete(submission::delete_submission));

    Router::new()
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/submissions", submission_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
