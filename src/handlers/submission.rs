// src/handlers/submission.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::AppError,
    handlers::quiz::find_quiz,
    models::submission::{SubmitRequest, SubmitResponse, Submission},
    scoring,
    store::EntityStore,
};

/// Records a respondent's completed pass through a quiz.
///
/// The total score is computed here, once, against the current question
/// definitions, and never recomputed afterwards: submissions are
/// historical snapshots of scoring. Selections that do not resolve to
/// an option simply score 0; malformed answers are tolerated, never
/// rejected.
pub async fn submit(
    State(store): State<Arc<dyn EntityStore>>,
    Path(quiz_id): Path<String>,
    Json(payload): Json<SubmitRequest>,
) -> Result<impl IntoResponse, AppError> {
    find_quiz(&store, &quiz_id).await?;

    let questions = store.list_questions(&quiz_id).await?;
    let total_score = scoring::total_score(&questions, &payload.answers);
    let max_score = scoring::max_total_score(&questions);

    let submission = Submission {
        id: Uuid::new_v4().to_string(),
        quiz_id,
        total_score,
        submitted_at: Utc::now(),
        answers: payload.answers,
    };
    store.save_submission(&submission).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            submission_id: submission.id,
            total_score,
            max_score,
        }),
    ))
}

/// The respondent ledger: submissions newest-first. An unknown quiz id
/// yields an empty ledger, not an error.
pub async fn list_submissions(
    State(store): State<Arc<dyn EntityStore>>,
    Path(quiz_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let submissions = store.list_submissions(&quiz_id).await?;
    Ok(Json(submissions))
}

/// Permanently removes one submission from every aggregate view.
pub async fn delete_submission(
    State(store): State<Arc<dyn EntityStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if store.delete_submission(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Submission not found".to_string()))
    }
}
