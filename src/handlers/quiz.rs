// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    authoring,
    error::AppError,
    models::quiz::{Quiz, QuizDetail, SaveQuizRequest},
    scoring,
    store::EntityStore,
};

/// Looks a quiz up by id, mapping absence to a 404.
/// The store itself returns empty results rather than raising.
pub(crate) async fn find_quiz(
    store: &Arc<dyn EntityStore>,
    quiz_id: &str,
) -> Result<Quiz, AppError> {
    store
        .list_quizzes()
        .await?
        .into_iter()
        .find(|quiz| quiz.id == quiz_id)
        .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))
}

/// Lists all assessments for the list view.
pub async fn list_quizzes(
    State(store): State<Arc<dyn EntityStore>>,
) -> Result<impl IntoResponse, AppError> {
    let quizzes = store.list_quizzes().await?;
    Ok(Json(quizzes))
}

/// Creates a fresh assessment with editor defaults and persists it
/// immediately, mirroring the list view's "New Assessment" flow.
pub async fn create_quiz(
    State(store): State<Arc<dyn EntityStore>>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = authoring::new_quiz();
    store.save_quiz(&quiz).await?;
    Ok((StatusCode::CREATED, Json(quiz)))
}

/// Retrieves the taker payload: the quiz, its ordered questions and the
/// theoretical maximum score. The maximum is derived data, recomputed
/// here on every read.
pub async fn get_quiz(
    State(store): State<Arc<dyn EntityStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = find_quiz(&store, &id).await?;
    let questions = store.list_questions(&id).await?;
    let max_score = scoring::max_total_score(&questions);

    Ok(Json(QuizDetail {
        quiz,
        questions,
        max_score,
    }))
}

/// Commits an editor draft: the quiz fields plus the full replacement
/// question set.
///
/// * Validates the payload and rejects commits against unknown quizzes.
/// * Rewires every question to this quiz id.
/// * Both writes must land for the save to count; a failed question
///   replace means the caller treats the whole commit as failed.
pub async fn save_quiz(
    State(store): State<Arc<dyn EntityStore>>,
    Path(id): Path<String>,
    Json(payload): Json<SaveQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let existing = find_quiz(&store, &id).await?;
    let quiz = Quiz {
        id: id.clone(),
        title: payload.title,
        description: payload.description,
        created_at: existing.created_at,
    };

    let mut questions = payload.questions;
    for question in &mut questions {
        question.quiz_id = id.clone();
    }

    store.save_quiz(&quiz).await?;
    store.save_questions(&id, &questions).await?;

    Ok(StatusCode::OK)
}

/// Deep-copies an assessment under fresh identities. The copy starts
/// with zero submissions.
pub async fn clone_quiz(
    State(store): State<Arc<dyn EntityStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let copy = store
        .clone_quiz(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

    Ok((StatusCode::CREATED, Json(copy)))
}

/// Lists the quiz's question set, ordered by position.
pub async fn list_questions(
    State(store): State<Arc<dyn EntityStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let questions = store.list_questions(&id).await?;
    Ok(Json(questions))
}
