// src/scoring.rs

use crate::models::quiz::{Question, QuestionType};
use crate::models::submission::Answer;

/// Scores one question against a set of selected option ids.
///
/// Sums the weight of every option whose id was selected. Selected ids
/// that do not resolve to an option of this question are ignored, not an
/// error; the same holds for over-full answers on `single` questions.
pub fn question_score(question: &Question, selected_option_ids: &[String]) -> i64 {
    question
        .options
        .iter()
        .filter(|opt| selected_option_ids.iter().any(|id| id == &opt.id))
        .map(|opt| opt.score)
        .sum()
}

/// Total maturity score for a full answer sheet.
///
/// Answers are matched to questions by id; an answer whose question no
/// longer exists contributes 0.
pub fn total_score(questions: &[Question], answers: &[Answer]) -> i64 {
    answers
        .iter()
        .map(|answer| {
            questions
                .iter()
                .find(|q| q.id == answer.question_id)
                .map_or(0, |q| question_score(q, &answer.option_ids))
        })
        .sum()
}

/// Maximum achievable score for one question.
///
/// * `single`: the largest option weight (0 when there are no options).
/// * `multi`: the sum of the strictly positive weights. Negative and
///   zero-weighted options are "avoid, don't select" choices and are
///   excluded from the ceiling.
pub fn question_max_score(question: &Question) -> i64 {
    match question.question_type {
        QuestionType::Single => question.options.iter().map(|opt| opt.score).max().unwrap_or(0),
        QuestionType::Multi => question.options.iter().map(|opt| opt.score.max(0)).sum(),
    }
}

/// Maximum achievable score across a question set. Derived data,
/// recomputed whenever the active question set changes; never stored.
pub fn max_total_score(questions: &[Question]) -> i64 {
    questions.iter().map(question_max_score).sum()
}
