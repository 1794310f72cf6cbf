// src/models/submission.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A respondent's selections for one question. Transient, held only
/// inside a `Submission`. For `single` questions the sequence is meant
/// to hold at most one id; this is not enforced anywhere, and scoring
/// tolerates over-full answers by summing whatever resolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub option_ids: Vec<String>,
}

/// The durable record of one respondent's pass through a quiz.
///
/// Immutable once created. `total_score` is computed exactly once at
/// submission time; later edits to questions or options never update it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub quiz_id: String,
    pub total_score: i64,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<Answer>,
}

/// DTO for submitting a completed quiz. The server recomputes the score
/// from the current question definitions; clients never supply it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub answers: Vec<Answer>,
}

/// DTO returned after a submission is recorded, so the taker view can
/// render `score / max`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub submission_id: String,
    pub total_score: i64,
    pub max_score: i64,
}
