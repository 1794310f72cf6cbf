// src/handlers/dashboard.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{error::AppError, handlers::quiz::find_quiz, state::AppState, stats};

/// Computes the dashboard statistics for one quiz: score histogram,
/// average, per-option tallies. Aggregation happens in memory at read
/// time over the quiz's own submissions only.
pub async fn get_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    find_quiz(&state.store, &id).await?;

    let questions = state.store.list_questions(&id).await?;
    let submissions = state.store.list_submissions(&id).await?;

    Ok(Json(stats::dashboard_stats(&questions, &submissions)))
}

/// Generates the AI narrative over the quiz's aggregated results.
///
/// * At most one analysis per quiz runs at a time; overlapping requests
///   are answered with 409 while one is in flight.
/// * The summarizer itself never fails: any upstream problem surfaces
///   as the fixed unavailable message in a 200 response.
pub async fn generate_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    find_quiz(&state.store, &id).await?;

    let questions = state.store.list_questions(&id).await?;
    let submissions = state.store.list_submissions(&id).await?;

    {
        let mut in_flight = state.analyses_in_flight.lock().await;
        if !in_flight.insert(id.clone()) {
            return Err(AppError::Conflict(
                "An analysis for this quiz is already running".to_string(),
            ));
        }
    }

    let summary = state.summarizer.summarize(&questions, &submissions).await;

    state.analyses_in_flight.lock().await.remove(&id);

    Ok(Json(serde_json::json!({ "summary": summary })))
}
