// src/authoring.rs

use chrono::Utc;
use uuid::Uuid;

use crate::models::quiz::{AnswerOption, Question, QuestionType, Quiz};

/// The in-memory editor state: one quiz and its draft question set.
/// Nothing here touches the store; `handlers::quiz::save_quiz` commits
/// a finished draft.
#[derive(Debug, Clone)]
pub struct EditorDraft {
    pub quiz: Quiz,
    pub questions: Vec<Question>,
}

/// A single editor mutation. Partial fields merge into the target;
/// `None` leaves the current value untouched.
#[derive(Debug, Clone)]
pub enum EditorAction {
    UpdateQuiz {
        title: Option<String>,
        description: Option<String>,
    },
    AddQuestion,
    RemoveQuestion {
        question_id: String,
    },
    UpdateQuestion {
        question_id: String,
        text: Option<String>,
        question_type: Option<QuestionType>,
        position: Option<i64>,
    },
    AddOption {
        question_id: String,
    },
    UpdateOption {
        question_id: String,
        option_id: String,
        text: Option<String>,
        score: Option<i64>,
    },
    RemoveOption {
        question_id: String,
        option_id: String,
    },
}

/// Applies one editor action to a draft and returns the new draft.
///
/// Pure state transition, independent of any rendering or transport
/// layer. Actions naming an unknown question or option id leave the
/// draft unchanged; removal never renumbers surviving positions.
pub fn apply(mut draft: EditorDraft, action: EditorAction) -> EditorDraft {
    match action {
        EditorAction::UpdateQuiz { title, description } => {
            if let Some(title) = title {
                draft.quiz.title = title;
            }
            if let Some(description) = description {
                draft.quiz.description = description;
            }
        }
        EditorAction::AddQuestion => {
            let question = new_question(&draft.quiz.id, draft.questions.len() as i64 + 1);
            draft.questions.push(question);
        }
        EditorAction::RemoveQuestion { question_id } => {
            draft.questions.retain(|q| q.id != question_id);
        }
        EditorAction::UpdateQuestion {
            question_id,
            text,
            question_type,
            position,
        } => {
            if let Some(question) = draft.questions.iter_mut().find(|q| q.id == question_id) {
                if let Some(text) = text {
                    question.text = text;
                }
                if let Some(question_type) = question_type {
                    question.question_type = question_type;
                }
                if let Some(position) = position {
                    question.position = position;
                }
            }
        }
        EditorAction::AddOption { question_id } => {
            if let Some(question) = draft.questions.iter_mut().find(|q| q.id == question_id) {
                question.options.push(AnswerOption {
                    id: Uuid::new_v4().to_string(),
                    text: "New Response Tier".to_string(),
                    score: 0,
                });
            }
        }
        EditorAction::UpdateOption {
            question_id,
            option_id,
            text,
            score,
        } => {
            if let Some(option) = draft
                .questions
                .iter_mut()
                .find(|q| q.id == question_id)
                .and_then(|q| q.options.iter_mut().find(|o| o.id == option_id))
            {
                if let Some(text) = text {
                    option.text = text;
                }
                if let Some(score) = score {
                    option.score = score;
                }
            }
        }
        EditorAction::RemoveOption {
            question_id,
            option_id,
        } => {
            if let Some(question) = draft.questions.iter_mut().find(|q| q.id == question_id) {
                question.options.retain(|o| o.id != option_id);
            }
        }
    }
    draft
}

/// A freshly created quiz as the list view creates it, ready for the
/// editor.
pub fn new_quiz() -> Quiz {
    Quiz {
        id: Uuid::new_v4().to_string(),
        title: "New Legal Tech Assessment".to_string(),
        description: "Define the scope and objectives of this IT maturity review.".to_string(),
        created_at: Utc::now(),
    }
}

/// A freshly appended question: single-choice, positioned after the
/// current set, seeded with a low and a high response tier.
fn new_question(quiz_id: &str, position: i64) -> Question {
    Question {
        id: Uuid::new_v4().to_string(),
        quiz_id: quiz_id.to_string(),
        text: "New Strategic Question".to_string(),
        question_type: QuestionType::Single,
        position,
        options: vec![
            AnswerOption {
                id: Uuid::new_v4().to_string(),
                text: "Baseline Practice".to_string(),
                score: 1,
            },
            AnswerOption {
                id: Uuid::new_v4().to_string(),
                text: "Optimized Workflow".to_string(),
                score: 5,
            },
        ],
    }
}

/// Deep-copies a quiz and its question set with every identity
/// regenerated: fresh quiz/question/option ids, ownership rewired to
/// the new quiz, title suffixed as a copy, creation time reset.
/// Submissions are never carried over.
pub fn clone_quiz(source: &Quiz, questions: &[Question]) -> (Quiz, Vec<Question>) {
    let copy = Quiz {
        id: Uuid::new_v4().to_string(),
        title: format!("{} (Copy)", source.title),
        description: source.description.clone(),
        created_at: Utc::now(),
    };
    let copied_questions = questions
        .iter()
        .map(|question| Question {
            id: Uuid::new_v4().to_string(),
            quiz_id: copy.id.clone(),
            text: question.text.clone(),
            question_type: question.question_type,
            position: question.position,
            options: question
                .options
                .iter()
                .map(|opt| AnswerOption {
                    id: Uuid::new_v4().to_string(),
                    text: opt.text.clone(),
                    score: opt.score,
                })
                .collect(),
        })
        .collect();
    (copy, copied_questions)
}
