// src/models/quiz.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An assessment definition: title, description and (via `Question`) a
/// set of scorable prompts. Edits overwrite in place; quizzes are never
/// versioned and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Response mode of a question: exclusive choice or multi-select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Single,
    Multi,
}

/// One selectable, individually weighted answer choice.
/// The weight may be any integer, negative and zero included.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
    pub score: i64,
}

/// One scorable prompt within a quiz.
///
/// `position` orders display and iteration. It is set by authoring-time
/// insertion order and deliberately never enforced unique nor renumbered
/// when questions are removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub quiz_id: String,
    pub text: String,
    /// 'single' or 'multi'. Mapped from the wire field 'type' since
    /// `type` is a reserved keyword in Rust.
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub position: i64,
    pub options: Vec<AnswerOption>,
}

/// DTO for committing an editor draft: the quiz fields plus the full
/// replacement question set.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveQuizRequest {
    #[validate(length(min = 1, max = 200, message = "Title length must be between 1 and 200 characters."))]
    pub title: String,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters."))]
    pub description: String,
    pub questions: Vec<Question>,
}

/// DTO for the taker view: the quiz, its ordered questions and the
/// theoretical maximum achievable score.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDetail {
    pub quiz: Quiz,
    pub questions: Vec<Question>,
    pub max_score: i64,
}
